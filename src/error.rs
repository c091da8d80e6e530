use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Debug)]
pub enum Error {
    /// Opening or writing an output unit failed
    IoError(std::io::Error),
    /// A snapshot file could not be decoded
    SnapshotError { file: PathBuf, message: String },
    /// No snapshot on the search path defines the requested module
    ModuleNotFound(String),
    InvalidArgument(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SnapshotError { file, message } => {
                write!(f, "invalid snapshot {}: {}", file.display(), message)
            }
            Error::ModuleNotFound(name) => write!(f, "no module named '{}'", name),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SnapshotError {
            file: PathBuf::from("<unknown>"),
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SnapshotError {
            file: PathBuf::from("<unknown>"),
            message: format!("YAML error: {}", err),
        }
    }
}
