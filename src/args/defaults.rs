use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!(
    "postrun/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/postrun-dev/postrun)"
);

pub const DEFAULT_COLLECTIONS_DIR: &str = "./postman";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
