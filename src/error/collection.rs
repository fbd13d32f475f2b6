use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Failed to read collection '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse collection '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
