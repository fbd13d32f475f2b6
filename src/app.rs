use std::path::{Path, PathBuf};

use tracing::info;

use crate::args::RunnerArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::report::{Reporter, success_rate_x10, totals};
use crate::runner::{self, RunOptions, TestSummary};

pub(crate) async fn run(args: &RunnerArgs) -> AppResult<()> {
    let files = resolve_targets(args)?;
    info!("Running {} collection file(s)", files.len());

    let options = RunOptions {
        workers: args.worker_count(),
        timeout: args.request_timeout(),
    };
    let summaries = runner::run_all(files, options).await?;

    let reporter = Reporter::new(args.report_format());
    match args.output.as_deref() {
        Some(output) => {
            let path = Path::new(output);
            reporter.save_to_file(&summaries, path).await?;
            info!("Report written to {}", path.display());
        }
        None => reporter.print(&summaries)?,
    }

    print_overall_summary(&summaries);

    let failed = totals(&summaries).failed;
    if failed > 0 {
        return Err(AppError::validation(ValidationError::TestsFailed { failed }));
    }
    Ok(())
}

fn resolve_targets(args: &RunnerArgs) -> AppResult<Vec<PathBuf>> {
    if let Some(file) = args.file.as_deref() {
        let path = PathBuf::from(file);
        if !path.is_file() {
            return Err(AppError::validation(ValidationError::FileNotFound { path }));
        }
        return Ok(vec![path]);
    }

    let dir = PathBuf::from(args.collections_dir());
    if !dir.is_dir() {
        return Err(AppError::validation(ValidationError::DirectoryNotFound {
            path: dir,
        }));
    }

    let mut files = Vec::new();
    collect_json_files(&dir, &mut files)?;
    if files.is_empty() {
        return Err(AppError::validation(ValidationError::NoCollectionsFound {
            path: dir,
        }));
    }
    Ok(files)
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> AppResult<()> {
    let scan_error = |err: std::io::Error| {
        AppError::validation(ValidationError::ScanDirectory {
            path: dir.to_path_buf(),
            source: err,
        })
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_error)? {
        entries.push(entry.map_err(scan_error)?.path());
    }
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_json_files(&path, files)?;
        } else if has_json_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn print_overall_summary(summaries: &[TestSummary]) {
    let aggregate = totals(summaries);

    println!("{}", "=".repeat(51));
    println!("Overall Summary");
    println!("{}", "=".repeat(51));
    println!(
        "Collections: {} ({} passing)",
        aggregate.collections, aggregate.passing_collections
    );
    println!(
        "Tests: {} ({} passed, {} failed)",
        aggregate.tests, aggregate.passed, aggregate.failed
    );

    if aggregate.failed > 0 {
        let rate_x10 = success_rate_x10(aggregate.passed, aggregate.tests);
        println!("Success rate: {}.{}%", rate_x10 / 10, rate_x10 % 10);
    } else {
        println!("All tests passed.");
    }
}
