//! Photo Renamer file system layer
//!
//! Provides the pieces of the file system the renamer touches:
//! - Directory browsing filtered by the image extension allow-list
//! - Rename, delete-to-trash and rotate-and-resave operations

mod browser;
mod file_operations;

pub use browser::{list_images, IMAGE_EXTENSIONS};
pub use file_operations::{DefaultFileOperations, FileOpError, FileOperations, Rotation};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
