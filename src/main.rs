use std::process::ExitCode;

use log::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = actual_import::args::parse();
    init_logging(args.verbose);
    match actual_import::cli::main(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Error during import: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}
