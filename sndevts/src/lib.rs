//! Grouping audio files into sound groups and generating `.vsndevts` sound event files from them.
//!
//! The work happens in two stages, which can run independently:
//!
//! 1. [`Scanner`](scan::Scanner) walks a directory of sounds, and
//!    [`GroupingMap`](grouping::GroupingMap) groups the files it finds by directory and
//!    [`GroupKey`](key::GroupKey) (`rain1.wav`, `rain_2.wav` and `rain.wav` are all `rain`).
//!    The grouping is written to JSON, so it can be checked or edited by hand.
//! 2. [`Generator`](generate::Generator) reads the grouping back and produces one
//!    [`SoundEvent`](event::SoundEvent) per group, optionally measuring file durations through a
//!    [`DurationReader`](duration::DurationReader). The events are written as a `.vsndevts` file.
//!
//! This crate does not decode audio itself; [`SymphoniaReader`](duration::SymphoniaReader)
//! leaves that to symphonia.

pub mod duration;
pub mod event;
pub mod generate;
pub mod grouping;
pub mod key;
pub mod scan;
mod write;

pub use write::WriteError;
