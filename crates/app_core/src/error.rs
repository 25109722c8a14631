//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Reported to the user, the session continues =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("File operation failed: {0}")]
    FileOperation(#[from] app_fs::FileOpError),

    #[error("No image selected")]
    NoSelection,

    /// One-based tab number, as the user typed it
    #[error("No tab {0}")]
    NoSuchGroup(usize),

    // ===== Configuration (recovered by falling back to defaults) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed tag state: {0}")]
    TagState(#[from] serde_json::Error),
}

impl AppError {
    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::FileNotFound(path) => format!("File not found: {}", path),
            AppError::AccessDenied(path) => format!("Access denied: {}", path),
            AppError::FileOperation(app_fs::FileOpError::AlreadyExists(p)) => {
                format!("A file named {} already exists", p.display())
            }
            AppError::FileOperation(app_fs::FileOpError::PermissionDenied(p)) => {
                format!("Permission denied: {}", p.display())
            }
            AppError::NoSelection => "No image selected".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::NotFound(p) => AppError::FileNotFound(p),
            app_fs::FsError::AccessDenied(p) => AppError::AccessDenied(p),
            app_fs::FsError::InvalidPath(p) => AppError::FileNotFound(p),
            app_fs::FsError::Io(e) => AppError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(AppError::NoSuchGroup(4).user_message(), "No tab 4");
        assert_eq!(AppError::NoSelection.user_message(), "No image selected");
        let err = AppError::from(app_fs::FsError::NotFound("/x".into()));
        assert_eq!(err.user_message(), "File not found: /x");
    }
}
