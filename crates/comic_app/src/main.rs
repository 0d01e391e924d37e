mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use comic_engine::{Pipeline, ReqwestComicFetcher};
use config::AppConfig;
use index_logging::{index_error, index_info, LogDestination};
use log::LevelFilter;

fn main() -> ExitCode {
    // Logging is not up yet while the config loads; config errors go to stderr.
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("comic_index: {err}");
            return ExitCode::FAILURE;
        }
    };

    let destination = match &config.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    index_logging::initialize(destination, LevelFilter::Info);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            index_error!("comic_index error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    let fetcher = ReqwestComicFetcher::new(config.fetch_settings())
        .context("failed to set up the comic fetcher")?;
    let pipeline = Pipeline::new(config.pipeline(), Arc::new(fetcher));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the tokio runtime")?;

    let (output, written) = runtime
        .block_on(pipeline.write_index(&config.output_path))
        .with_context(|| format!("failed to build index at {:?}", config.output_path))?;

    index_info!(
        "Wrote {} comics to {:?} ({} jobs, {} missing, {} failed)",
        output.collection.len(),
        written,
        output.summary.outcomes,
        output.summary.missing,
        output.summary.failed
    );
    Ok(())
}
