use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use sndevts_tools::generate::{generate, GenerateArgs};
use sndevts_tools::group::{group, GroupArgs};
use sndevts_tools::inspect::{inspect, InspectArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
enum Cli {
    Group(GroupArgs),
    Generate(GenerateArgs),
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match Cli::parse_from(wild::args()) {
        Cli::Group(args) => group(args),
        Cli::Generate(args) => generate(args),
        Cli::Inspect(args) => inspect(&args),
    }
}
