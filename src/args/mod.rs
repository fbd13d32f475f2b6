mod cli;
mod defaults;
mod parsers;
mod types;


pub use cli::RunnerArgs;
pub use defaults::{DEFAULT_COLLECTIONS_DIR, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use parsers::parse_duration_arg;
pub use types::ReportFormat;
