use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Config file to use instead of the one in the default config directory
    #[clap(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Default verbosity of logs written to stderr, per module overrides are hardcoded in logger_setup.rs
    #[clap(short = 'l', long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    /// Start the root layout in strip mode, regardless of what the config says
    #[clap(short = 's', long = "strip")]
    pub strip: bool,

    /// When set, a fresh default config is written over the current one before the run
    #[clap(short = 'r', long = "reconfigure")]
    pub reconfigure: bool,
}
