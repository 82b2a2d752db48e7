use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Format(String),

    #[error("Cached IP list is corrupted ({}): {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("io error on {}: {source}", path.display())]
    Io { path: PathBuf, source: IoError },

    #[error("failed to write report: {0}")]
    Output(#[source] IoError),
}

impl TrackerError {
    pub fn io(path: impl Into<PathBuf>, source: IoError) -> TrackerError {
        TrackerError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn corrupt_names_path_and_reason() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TrackerError::Corrupt {
            path: PathBuf::from("/tmp/cache.json"),
            source,
        };

        let msg = err.to_string();
        assert!(msg.starts_with("Cached IP list is corrupted (/tmp/cache.json): "));
        assert!(msg.contains("EOF"));
    }

    #[test]
    fn io_names_path() {
        let err = TrackerError::io("/tmp/x", IoError::new(ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "io error on /tmp/x: denied");
    }
}
