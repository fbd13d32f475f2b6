use crate::args::RunnerArgs;
use crate::error::AppResult;

use super::types::ConfigFile;

/// Fills in args the CLI left unset from the loaded config. Explicit
/// flags always win.
///
/// # Errors
///
/// Returns an error when a config duration value is invalid.
pub fn apply_config(args: &mut RunnerArgs, config: &ConfigFile) -> AppResult<()> {
    if args.dir.is_none() {
        args.dir.clone_from(&config.dir);
    }
    if args.file.is_none() {
        args.file.clone_from(&config.file);
    }
    if args.output.is_none() {
        args.output.clone_from(&config.output);
    }
    if args.format.is_none() {
        args.format = config.format;
    }
    if args.parallel.is_none() {
        args.parallel = config.parallel;
    }
    if args.timeout.is_none() {
        if let Some(value) = config.timeout.as_ref() {
            args.timeout = Some(value.as_duration()?);
        }
    }
    if config.verbose == Some(true) {
        args.verbose = true;
    }
    Ok(())
}
