use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("unable to open installer list {path}: {source}")]
    ConfigOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to read installer list: {0}")]
    ConfigRead(#[source] std::io::Error),
    #[error("installer list is missing the {0}")]
    MissingField(&'static str),
    #[error("Java {required} is required but {installed} is installed")]
    JavaOutdated { required: String, installed: String },
    #[error("{path} exited with code {code}")]
    InstallerFailed { path: String, code: i32 },
    #[error("unable to start {path}: {source}")]
    Launch {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
