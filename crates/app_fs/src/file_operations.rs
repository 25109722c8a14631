//! File operations module
//! Provides rename, delete and rotate operations on the current image

use filetime::FileTime;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File operation errors
#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Trash error: {0}")]
    #[cfg(feature = "trash-support")]
    Trash(#[from] trash::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, FileOpError>;

/// Quarter-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// File operations trait
pub trait FileOperations {
    /// Delete files (move to trash or permanent delete)
    fn delete(&self, paths: &[PathBuf], use_trash: bool) -> Result<()>;

    /// Rename a file, refusing to replace an existing one
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Rotate an image by a quarter turn and save it back in place
    fn rotate(&self, path: &Path, rotation: Rotation) -> Result<()>;
}

/// Default implementation of file operations
#[derive(Debug, Default)]
pub struct DefaultFileOperations;

impl DefaultFileOperations {
    pub fn new() -> Self {
        Self
    }
}

impl FileOperations for DefaultFileOperations {
    #[cfg(feature = "trash-support")]
    fn delete(&self, paths: &[PathBuf], use_trash: bool) -> Result<()> {
        for path in paths {
            if !path.exists() {
                return Err(FileOpError::NotFound(path.clone()));
            }

            if use_trash {
                trash::delete(path)?;
                tracing::info!("Moved to trash: {}", path.display());
            } else {
                remove_permanently(path)?;
            }
        }

        Ok(())
    }

    #[cfg(not(feature = "trash-support"))]
    fn delete(&self, paths: &[PathBuf], _use_trash: bool) -> Result<()> {
        // Fallback: always permanent delete
        for path in paths {
            if !path.exists() {
                return Err(FileOpError::NotFound(path.clone()));
            }
            remove_permanently(path)?;
        }

        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if !from.exists() {
            return Err(FileOpError::NotFound(from.to_path_buf()));
        }

        // symlink_metadata also sees dangling links, which rename would replace
        if to.symlink_metadata().is_ok() {
            return Err(FileOpError::AlreadyExists(to.to_path_buf()));
        }

        std::fs::rename(from, to).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => FileOpError::PermissionDenied(from.to_path_buf()),
            _ => FileOpError::Io(e),
        })?;
        tracing::info!("Renamed: {} -> {}", from.display(), to.display());

        Ok(())
    }

    fn rotate(&self, path: &Path, rotation: Rotation) -> Result<()> {
        if !path.is_file() {
            return Err(FileOpError::NotFound(path.to_path_buf()));
        }

        // The date tab names files after their mtime, so it has to survive
        let mtime = FileTime::from_last_modification_time(&std::fs::metadata(path)?);
        let format = ImageFormat::from_path(path)?;
        let img = image::open(path)?;
        let rotated = match rotation {
            Rotation::Clockwise => img.rotate90(),
            Rotation::CounterClockwise => img.rotate270(),
        };

        // Encode next to the original first so a failed save leaves it intact
        let staging = staging_path(path)?;
        if let Err(e) = rotated.save_with_format(&staging, format) {
            let _ = std::fs::remove_file(&staging);
            return Err(e.into());
        }
        std::fs::rename(&staging, path)?;
        filetime::set_file_mtime(path, mtime)?;

        tracing::info!("Rotated {:?}: {}", rotation, path.display());
        Ok(())
    }
}

fn remove_permanently(path: &Path) -> Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    tracing::warn!("Permanently deleted: {}", path.display());
    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| FileOpError::InvalidOperation("Invalid file name".to_string()))?;
    Ok(path.with_file_name(format!(".{}.rotating", name.to_string_lossy())))
}
