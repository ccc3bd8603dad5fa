//! Reading the play length of audio files
//!
//! Decoding is left to [symphonia](https://docs.rs/symphonia). The rest of the crate only ever
//! talks to the [`DurationReader`] trait, so tests (or callers with their own metadata) can
//! swap it out.

use log::debug;
use std::{fs::File, path::Path};
use symphonia::core::{
    codecs::CODEC_TYPE_NULL,
    errors::Error as SymphoniaError,
    formats::{FormatOptions, FormatReader},
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
    units::{Time, TimeBase},
};
use thiserror::Error;

/// Something that can tell how long an audio file plays
pub trait DurationReader {
    /// The duration of the file at `path` in seconds, or `None` if it couldn't be determined
    ///
    /// Implementations should not panic or abort on bad files; a `None` just means the file gets
    /// skipped.
    fn duration(&self, path: &Path) -> Option<f64>;
}

impl<F> DurationReader for F
where
    F: Fn(&Path) -> Option<f64>,
{
    fn duration(&self, path: &Path) -> Option<f64> {
        self(path)
    }
}

/// A [`DurationReader`] that probes files with symphonia
///
/// Containers that advertise their frame count are not decoded at all. For the rest (e.g. some
/// VBR MP3s) the packets are walked and their durations summed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaReader;

impl SymphoniaReader {
    /// Probe a file, returning why it failed if it did
    pub fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(extension);
        }

        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut reader = probed.format;

        let track = reader.default_track().ok_or(ProbeError::MissingDefaultTrack)?;
        if track.codec_params.codec == CODEC_TYPE_NULL {
            return Err(ProbeError::UnsupportedCodec);
        }

        let track_id = track.id;
        let n_frames = track.codec_params.n_frames;
        let time_base = time_base(track.codec_params.time_base, track.codec_params.sample_rate)?;

        let frames = match n_frames {
            Some(frames) => frames,
            None => count_frames(reader.as_mut(), track_id)?,
        };

        Ok(seconds(time_base.calc_time(frames)))
    }
}

impl DurationReader for SymphoniaReader {
    fn duration(&self, path: &Path) -> Option<f64> {
        match self.probe(path) {
            Ok(duration) => Some(duration),
            Err(err) => {
                debug!("Could not decode {}: {err}", path.display());
                None
            }
        }
    }
}

/// Sum the durations of all packets belonging to a track
fn count_frames(reader: &mut dyn FormatReader, track_id: u32) -> Result<u64, ProbeError> {
    let mut frames = 0u64;

    loop {
        match reader.next_packet() {
            Ok(packet) => {
                if packet.track_id() == track_id {
                    frames += packet.dur;
                }
            }
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(frames)
}

/// The time base of a track, falling back to one tick per sample
///
/// Zero time bases and sample rates are treated as missing.
fn time_base(
    time_base: Option<TimeBase>,
    sample_rate: Option<u32>,
) -> Result<TimeBase, ProbeError> {
    match (time_base, sample_rate) {
        (Some(time_base), _) if time_base.numer != 0 && time_base.denom != 0 => Ok(time_base),
        (_, Some(sample_rate)) if sample_rate != 0 => Ok(TimeBase::new(1, sample_rate)),
        _ => Err(ProbeError::MissingTimeBase),
    }
}

fn seconds(time: Time) -> f64 {
    time.seconds as f64 + time.frac
}

/// Errors that might be returned from [`SymphoniaReader::probe()`]
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Opening the file itself failed
    #[error("Opening the file failed")]
    FileOpen(#[from] std::io::Error),

    /// Symphonia could not make sense of the file
    #[error(transparent)]
    Symphonia(#[from] SymphoniaError),

    /// The container does not expose a default track
    #[error("The file does not have a default track")]
    MissingDefaultTrack,

    /// The codec of the track is not supported
    #[error("Unsupported codec")]
    UnsupportedCodec,

    /// Neither a (non-zero) time base nor a sample rate is known, so frames can't be converted to time
    #[error("The track advertises neither a time base nor a sample rate")]
    MissingTimeBase,
}
