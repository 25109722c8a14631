//! Destination names built from tokens, without ever clobbering a file

use std::path::{Path, PathBuf};

/// Separator placed between tokens and before a collision suffix
pub const TOKEN_SEPARATOR: &str = "_";

/// What the composer decided for a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// No tokens, nothing to name the file after
    NothingToDo,
    /// The file already carries the composed name
    Unchanged,
    /// A token would leave the file's directory
    InvalidToken(String),
    /// Free destination path
    Target(PathBuf),
}

/// Whether `token` holds a path separator and so cannot be part of a name
pub fn has_separator(token: &str) -> bool {
    token.contains('/') || token.contains(std::path::MAIN_SEPARATOR)
}

/// Compose the destination of `current` from `tokens`.
///
/// The directory and extension (case kept) of `current` are reused. When the
/// name is taken, `_2`, `_3`, ... are appended to the base until a free path
/// turns up.
pub fn compose(tokens: &[String], current: &Path) -> Composition {
    let directory = current.parent().unwrap_or_else(|| Path::new(""));
    let extension = current
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    compose_in(tokens, directory, &extension, current)
}

/// Same as [`compose`] with an explicit directory and extension (dot included)
pub fn compose_in(tokens: &[String], directory: &Path, extension: &str, current: &Path) -> Composition {
    if tokens.is_empty() {
        return Composition::NothingToDo;
    }
    if let Some(token) = tokens.iter().find(|t| has_separator(t)) {
        return Composition::InvalidToken(token.clone());
    }

    let base = tokens.join(TOKEN_SEPARATOR);
    let candidate = directory.join(format!("{}{}", base, extension));
    if candidate == current {
        return Composition::Unchanged;
    }

    let mut candidate = candidate;
    let mut suffix = 1u64;
    // symlink_metadata so a dangling link still counts as taken
    while candidate.symlink_metadata().is_ok() {
        suffix += 1;
        candidate = directory.join(format!("{}{}{}{}", base, TOKEN_SEPARATOR, suffix, extension));
        if candidate == current {
            return Composition::Unchanged;
        }
    }

    Composition::Target(candidate)
}
