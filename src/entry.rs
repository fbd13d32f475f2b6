use clap::Parser;

use crate::args::RunnerArgs;
use crate::error::AppResult;

/// Parses CLI arguments, initializes logging, and drives one run on a
/// fresh multi-threaded runtime.
///
/// # Errors
///
/// Returns an error when startup validation fails, a report cannot be
/// written, or any executed request failed.
pub fn run() -> AppResult<()> {
    let args = RunnerArgs::parse();

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(mut args: RunnerArgs) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, &config)?;
    }

    crate::app::run(&args).await
}
