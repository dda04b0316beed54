//! Preference store errors.

use std::path::PathBuf;

/// Error returned when the persistent store cannot be read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing file could not be read or written
    Io { path: PathBuf, message: String },
    /// The backing file exists but is not a flat JSON object of strings
    Malformed { path: PathBuf, message: String },
    /// The platform offers no storage (e.g. browser storage disabled)
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io { path, message } => {
                write!(f, "cannot access store '{}': {}", path.display(), message)
            }
            StoreError::Malformed { path, message } => {
                write!(f, "store '{}' is malformed: {}", path.display(), message)
            }
            StoreError::Unavailable(reason) => write!(f, "storage unavailable: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/storage.json"),
            message: "permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/storage.json"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_unavailable_error_display() {
        let err = StoreError::Unavailable("localStorage disabled".to_string());
        assert!(err.to_string().contains("localStorage disabled"));
    }
}
