//! Directory listing for the image browser

use crate::{FsError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Extensions (lower case, without the dot) the browser treats as images.
///
/// `"jpeg 2000"` is kept verbatim: it only matches a file whose extension is
/// literally `JPEG 2000`.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "tiff", "psd",
    "raw", "bmp", "heif", "indd", "jpeg 2000", "svg",
    "ai", "eps", "pdf", "exr", "tga",
];

/// Check a bare file name against the image allow-list (case-insensitive)
fn is_image_name(name: &str) -> bool {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Names of the image files in a folder, naturally sorted. Hidden files are
/// listed, directories are not.
pub fn list_images<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsError::NotFound(path.display().to_string()));
    }

    if !path.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", path.display())));
    }

    let read_dir = fs::read_dir(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => FsError::AccessDenied(path.display().to_string()),
        _ => FsError::Io(e),
    })?;

    let mut names = Vec::new();

    for entry in read_dir {
        let entry = entry?;
        let is_dir = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata.is_dir(),
            Err(_) => continue, // Skip entries we can't read
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_dir && is_image_name(&name) {
            names.push(name);
        }
    }

    names.sort_by_cached_key(|name| natural_sort_key(name));
    tracing::debug!("Found {} images in {}", names.len(), path.display());

    Ok(names)
}

/// Generate a natural sort key (handles numbers correctly)
/// "image2.jpg" < "image10.jpg"
fn natural_sort_key(s: &str) -> Vec<NaturalSortPart> {
    let mut parts = Vec::new();
    let mut current_num = String::new();
    let mut current_str = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            if !current_str.is_empty() {
                parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
                current_str.clear();
            }
            current_num.push(c);
        } else {
            if !current_num.is_empty() {
                if let Ok(n) = current_num.parse::<u64>() {
                    parts.push(NaturalSortPart::Num(n));
                }
                current_num.clear();
            }
            current_str.push(c);
        }
    }

    if !current_num.is_empty() {
        if let Ok(n) = current_num.parse::<u64>() {
            parts.push(NaturalSortPart::Num(n));
        }
    }
    if !current_str.is_empty() {
        parts.push(NaturalSortPart::Str(current_str.to_lowercase()));
    }

    parts
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalSortPart {
    Num(u64),
    Str(String),
}
