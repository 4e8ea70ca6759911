mod cli;

use clap::Parser;
use servicetag_edl::{Environment, HttpFetcher, PortalLocator};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    if let Err(error) = cli::log::init(&args.verbose) {
        eprintln!("Error: unable to initialize logging: {error}");
    }

    let config = cli::build_config(&args, &Environment::from_process());

    let written = HttpFetcher::new().and_then(|fetcher| {
        servicetag_edl::generate(&config, &fetcher, &PortalLocator::default())
    });

    match written {
        Ok(written) => {
            cli::log::summary(&written, config.output_dir());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
