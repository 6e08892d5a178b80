use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// One or more input files, planned in parallel
    #[arg(short, long, value_name = "FILE", num_args = 1.., required = true)]
    pub input_file: Vec<PathBuf>,
    #[arg(short, long, value_name = "FOLDER")]
    pub solution_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    #[arg(short, long, value_enum, default_value = "generate")]
    pub mode: Mode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Inputs are briefings, a floor plan is generated for each
    #[value(alias = "gen")]
    Generate,
    /// Inputs are layouts in normalized coordinates, they are corrected and audited
    #[value(alias = "norm")]
    Normalize,
}
