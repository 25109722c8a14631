//! Application context, built once at startup and passed around explicitly

use crate::composer::Composition;
use crate::config::{AppConfig, TagStore};
use crate::navigation::{ImageBrowser, NavigationState};
use crate::tag_manager::TagManager;
use crate::workflow::{RenameOutcome, RenamePlan, RenameWorkflow};
use crate::AppError;
use app_fs::{DefaultFileOperations, FileOperations, Rotation};
use std::path::{Path, PathBuf};

/// Everything the front end drives
pub struct AppContext {
    /// Application configuration
    pub config: AppConfig,

    /// Tag tabs
    pub tags: TagManager,

    /// Browsed folder and current image
    pub navigation: NavigationState,

    store: TagStore,
    file_ops: Box<dyn FileOperations>,
}

impl AppContext {
    /// Load the stored tabs and open the start folder
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        Self::with_file_operations(config, Box::new(DefaultFileOperations::new()))
    }

    pub fn with_file_operations(
        config: AppConfig,
        file_ops: Box<dyn FileOperations>,
    ) -> Result<Self, AppError> {
        let store = config.tag_store();
        let tags = store.load();
        let navigation = NavigationState::open(&config.start_folder)?;

        Ok(Self {
            config,
            tags,
            navigation,
            store,
            file_ops,
        })
    }

    pub fn current_file(&self) -> Option<PathBuf> {
        self.navigation.current_file()
    }

    /// What a rename of the current image would do
    pub fn preview(&self) -> Option<RenamePlan> {
        let file = self.current_file()?;
        Some(RenameWorkflow::new(&self.tags, self.file_ops.as_ref()).plan(&file))
    }

    /// Rename the current image after the checked tags
    pub fn rename_current(&mut self) -> RenameOutcome {
        RenameWorkflow::new(&self.tags, self.file_ops.as_ref()).rename(&mut self.navigation)
    }

    /// Delete the current image (to the trash when configured)
    pub fn discard_current(&mut self) -> Result<PathBuf, AppError> {
        let file = self.current_file().ok_or(AppError::NoSelection)?;
        self.file_ops.delete(std::slice::from_ref(&file), self.config.use_trash)?;
        self.navigation.on_discarded();
        Ok(file)
    }

    /// Rotate the current image a quarter turn and resave it
    pub fn rotate_current(&mut self, rotation: Rotation) -> Result<PathBuf, AppError> {
        let file = self.current_file().ok_or(AppError::NoSelection)?;
        self.file_ops.rotate(&file, rotation)?;
        self.navigation.refresh()?;
        Ok(file)
    }

    pub fn change_folder(&mut self, folder: &Path) -> Result<(), AppError> {
        self.navigation.on_folder_changed(folder)
    }

    pub fn refresh(&mut self) -> Result<(), AppError> {
        self.navigation.refresh()
    }

    /// Persist the tabs. Called once when the front end exits.
    pub fn shutdown(self) -> anyhow::Result<()> {
        tracing::info!("Shutting down, saving {} tabs", self.tags.len());
        self.store.save(&self.tags)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("tags", &self.tags)
            .field("navigation", &self.navigation)
            .finish_non_exhaustive()
    }
}

/// Human readable description of a plan, as shown before renaming
pub fn describe_plan(plan: &RenamePlan) -> String {
    match &plan.composition {
        Composition::NothingToDo => "no tags checked".to_string(),
        Composition::Unchanged => format!("[{}] -> name unchanged", plan.tokens.join(", ")),
        Composition::InvalidToken(token) => format!("'{}' cannot be part of a file name", token),
        Composition::Target(path) => format!(
            "[{}] -> {}",
            plan.tokens.join(", "),
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ),
    }
}
