//! Image browser state: the listed folder and the current selection

use crate::AppError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What the rename workflow needs from whatever shows the images
pub trait ImageBrowser {
    /// Full path of the selected image, if any
    fn current_file(&self) -> Option<PathBuf>;

    /// The selected image now carries `new_name` on disk
    fn on_renamed(&mut self, new_name: &str);

    /// The selected image is gone from disk
    fn on_discarded(&mut self);

    /// Switch to another folder and list its images
    fn on_folder_changed(&mut self, folder: &Path) -> Result<(), AppError>;
}

/// Navigation state over the images of one folder
#[derive(Debug, Clone)]
pub struct NavigationState {
    folder: PathBuf,
    images: Vec<String>,
    current_index: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            folder: PathBuf::from("."),
            images: Vec::new(),
            current_index: 0,
        }
    }

    /// Start browsing `folder`
    pub fn open(folder: impl AsRef<Path>) -> Result<Self, AppError> {
        let mut state = Self::new();
        state.on_folder_changed(folder.as_ref())?;
        Ok(state)
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// File names of the listed images, in display order
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_name(&self) -> Option<&str> {
        self.images.get(self.current_index).map(String::as_str)
    }

    /// Select an entry; out-of-range indices are ignored
    pub fn set_index(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.current_index = index;
            true
        } else {
            false
        }
    }

    /// Move to next item
    pub fn next(&mut self) -> bool {
        self.set_index(self.current_index + 1)
    }

    /// Move to previous item
    pub fn prev(&mut self) -> bool {
        self.current_index > 0 && self.set_index(self.current_index - 1)
    }

    /// Re-read the folder. Known entries keep their order, new images are
    /// appended, and the selection stays on the same file when it survives.
    pub fn refresh(&mut self) -> Result<(), AppError> {
        let on_disk = scan(&self.folder)?;
        let present: HashSet<&str> = on_disk.iter().map(String::as_str).collect();
        let selected = self.current_name().map(str::to_owned);

        let mut images: Vec<String> = self
            .images
            .iter()
            .filter(|name| present.contains(name.as_str()))
            .cloned()
            .collect();
        let known: HashSet<String> = images.iter().cloned().collect();
        images.extend(on_disk.into_iter().filter(|name| !known.contains(name)));

        self.current_index = selected
            .and_then(|name| images.iter().position(|n| *n == name))
            .unwrap_or_else(|| self.current_index.min(images.len().saturating_sub(1)));
        self.images = images;

        tracing::debug!("Refreshed {}: {} images", self.folder.display(), self.images.len());
        Ok(())
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBrowser for NavigationState {
    fn current_file(&self) -> Option<PathBuf> {
        self.current_name().map(|name| self.folder.join(name))
    }

    fn on_renamed(&mut self, new_name: &str) {
        if let Some(entry) = self.images.get_mut(self.current_index) {
            tracing::debug!("Entry {} renamed to {}", entry, new_name);
            *entry = new_name.to_string();
            self.next();
        }
    }

    fn on_discarded(&mut self) {
        if self.current_index < self.images.len() {
            let removed = self.images.remove(self.current_index);
            tracing::debug!("Entry {} discarded", removed);
            self.current_index = self.current_index.min(self.images.len().saturating_sub(1));
        }
    }

    fn on_folder_changed(&mut self, folder: &Path) -> Result<(), AppError> {
        let images = scan(folder)?;
        tracing::info!("Browsing {} ({} images)", folder.display(), images.len());
        self.folder = folder.to_path_buf();
        self.images = images;
        self.current_index = 0;
        Ok(())
    }
}

fn scan(folder: &Path) -> Result<Vec<String>, AppError> {
    Ok(app_fs::list_images(folder)?)
}
