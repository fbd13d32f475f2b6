use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::{Runner, TestSummary};
use crate::collection::load_collection;
use crate::error::{AppError, AppResult};
use crate::report::format_secs2;

/// Options shared by every worker in one run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub workers: usize,
    pub timeout: Duration,
}

/// Runs every collection file and returns the per-file summaries.
///
/// With one worker, files are processed strictly sequentially through a
/// single shared client. Otherwise at most `options.workers` tokio tasks
/// claim files from a shared cursor; each worker owns a private
/// [`Runner`] (and HTTP client) and accumulates worker-local summaries
/// that are merged after the pool drains, so no result state is shared
/// while requests are in flight. Summary order follows completion order
/// in that case.
///
/// A file whose load step fails is logged and excluded; it never aborts
/// sibling files.
///
/// # Errors
///
/// Returns an error when an HTTP client cannot be built or a worker task
/// panics.
pub async fn run_all(files: Vec<PathBuf>, options: RunOptions) -> AppResult<Vec<TestSummary>> {
    if options.workers <= 1 {
        return run_sequential(&files, options.timeout).await;
    }
    run_parallel(files, options).await
}

async fn run_sequential(files: &[PathBuf], timeout: Duration) -> AppResult<Vec<TestSummary>> {
    let runner = Runner::new(timeout)?;
    let total = files.len();

    let mut summaries = Vec::with_capacity(total);
    for (index, file) in files.iter().enumerate() {
        info!(
            "[{}/{}] {}",
            index.saturating_add(1),
            total,
            file.display()
        );
        if let Some(summary) = process_file(&runner, file).await {
            summaries.push(summary);
        }
    }
    Ok(summaries)
}

async fn run_parallel(files: Vec<PathBuf>, options: RunOptions) -> AppResult<Vec<TestSummary>> {
    let worker_count = options.workers.min(files.len()).max(1);
    let files = Arc::new(files);
    let cursor = Arc::new(AtomicUsize::new(0));
    let mut workers = JoinSet::new();

    for worker_id in 0..worker_count {
        let files = Arc::clone(&files);
        let cursor = Arc::clone(&cursor);
        let timeout = options.timeout;
        workers.spawn(async move {
            let runner = Runner::new(timeout)?;
            let mut local = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(file) = files.get(index) else {
                    break;
                };
                debug!("worker {} picked up {}", worker_id, file.display());
                if let Some(summary) = process_file(&runner, file).await {
                    local.push(summary);
                }
            }
            Ok::<_, AppError>(local)
        });
    }

    let mut summaries = Vec::with_capacity(files.len());
    while let Some(joined) = workers.join_next().await {
        summaries.extend(joined??);
    }
    Ok(summaries)
}

async fn process_file(runner: &Runner, file: &Path) -> Option<TestSummary> {
    let collection = match load_collection(file) {
        Ok(collection) => collection,
        Err(err) => {
            error!("Skipping {}: {}", file.display(), err);
            return None;
        }
    };

    let summary = runner.run_collection(&collection, file).await;
    info!(
        "{}: {}/{} passed ({}s)",
        summary.collection_name,
        summary.passed_tests,
        summary.total_tests,
        format_secs2(summary.total_time)
    );
    Some(summary)
}
