use std::io::stdout;
use std::process::exit;

use clap::Parser;
use log::{debug, error, info};

use simplelayout::demo::args::Args;
use simplelayout::demo::load_config::load_config;
use simplelayout::demo::logger_setup::logger_setup;
use simplelayout::demo::run_demo::run_demo;

fn main() {
    let args = Args::parse();
    logger_setup(args.log_level);

    let mut config = load_config(args.config.as_deref(), args.reconfigure);
    if args.strip {
        config.server.strip_dimensions = true;
    }
    debug!("{:?}", config);

    let stdout = stdout();
    let mut out = stdout.lock();

    match run_demo(&config, &mut out) {
        Ok(report) => {
            info!(
                "{} passes, {} button clicks, {} layout clicks, {} client errors",
                report.passes,
                report.button_clicks,
                report.layout_clicks,
                report.errors.len()
            );
        }
        Err(e) => {
            error!("demo failed: {}", e);
            exit(1);
        }
    }
}
