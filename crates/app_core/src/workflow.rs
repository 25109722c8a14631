//! Rename of the selected image after its checked tags

use crate::composer::{self, Composition};
use crate::navigation::ImageBrowser;
use crate::tag_manager::TagManager;
use app_fs::{FileOpError, FileOperations};
use std::path::{Path, PathBuf};

/// Why a rename did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    NoSelection,
    NoTokens,
    Unchanged,
}

/// Result of a rename request
#[derive(Debug)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    NoOp(NoOpReason),
    Failed(FileOpError),
}

impl RenameOutcome {
    /// File name the image now carries
    pub fn new_name(&self) -> Option<String> {
        match self {
            RenameOutcome::Renamed { to, .. } => to
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

/// Tokens and destination computed for one file, without touching the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub tokens: Vec<String>,
    pub composition: Composition,
}

/// Tag-driven rename of the browser's current image
pub struct RenameWorkflow<'a> {
    manager: &'a TagManager,
    file_ops: &'a dyn FileOperations,
}

impl<'a> RenameWorkflow<'a> {
    pub fn new(manager: &'a TagManager, file_ops: &'a dyn FileOperations) -> Self {
        Self { manager, file_ops }
    }

    pub fn plan(&self, file: &Path) -> RenamePlan {
        let tokens = self.manager.tokens_for(file);
        let composition = composer::compose(&tokens, file);
        RenamePlan { tokens, composition }
    }

    /// Rename the current image. On success the browser learns the new name
    /// and moves on; on failure it is left as it was.
    pub fn rename(&self, browser: &mut dyn ImageBrowser) -> RenameOutcome {
        let Some(file) = browser.current_file() else {
            return RenameOutcome::NoOp(NoOpReason::NoSelection);
        };

        let target = match self.plan(&file).composition {
            Composition::NothingToDo => {
                tracing::debug!("No checked tags for {}", file.display());
                return RenameOutcome::NoOp(NoOpReason::NoTokens);
            }
            Composition::Unchanged => {
                tracing::info!("Same name requested for {}, skipping", file.display());
                return RenameOutcome::NoOp(NoOpReason::Unchanged);
            }
            Composition::InvalidToken(token) => {
                tracing::warn!("Token {:?} holds a path separator, not renaming {}", token, file.display());
                return RenameOutcome::Failed(FileOpError::InvalidOperation(format!(
                    "'{}' cannot be part of a file name",
                    token
                )));
            }
            Composition::Target(target) => target,
        };

        if let Err(e) = self.file_ops.rename(&file, &target) {
            tracing::error!("Failed to rename {}: {}", file.display(), e);
            return RenameOutcome::Failed(e);
        }

        let outcome = RenameOutcome::Renamed { from: file, to: target };
        if let Some(name) = outcome.new_name() {
            browser.on_renamed(&name);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationState;
    use crate::tags::{GroupKind, TagGroup};
    use app_fs::{DefaultFileOperations, Rotation};
    use std::fs;

    /// File operations that always refuse
    struct DenyingOps;

    impl FileOperations for DenyingOps {
        fn delete(&self, _paths: &[PathBuf], _use_trash: bool) -> Result<(), FileOpError> {
            unreachable!()
        }
        fn rename(&self, from: &Path, _to: &Path) -> Result<(), FileOpError> {
            Err(FileOpError::PermissionDenied(from.to_path_buf()))
        }
        fn rotate(&self, _path: &Path, _rotation: Rotation) -> Result<(), FileOpError> {
            unreachable!()
        }
    }

    fn manager_with(checked: &[&str]) -> TagManager {
        let mut manager = TagManager::empty();
        let idx = manager.add_group(GroupKind::Tags, "t");
        if let Some(TagGroup::Tags(set)) = manager.group_mut(idx) {
            for name in checked {
                set.add(*name);
                set.set_checked(name, true);
            }
        }
        manager
    }

    fn folder_with(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn test_no_selection() {
        let ops = DefaultFileOperations::new();
        let manager = manager_with(&["a"]);
        let mut nav = NavigationState::new();
        let outcome = RenameWorkflow::new(&manager, &ops).rename(&mut nav);
        assert!(matches!(outcome, RenameOutcome::NoOp(NoOpReason::NoSelection)));
    }

    #[test]
    fn test_no_tokens() {
        let dir = folder_with(&["1.jpg"]);
        let ops = DefaultFileOperations::new();
        let mut manager = TagManager::default();
        if let Some(TagGroup::Date(date)) = manager.group_mut(0) {
            date.set_pattern("");
        }
        let mut nav = NavigationState::open(dir.path()).unwrap();

        let outcome = RenameWorkflow::new(&manager, &ops).rename(&mut nav);
        assert!(matches!(outcome, RenameOutcome::NoOp(NoOpReason::NoTokens)));
        assert!(dir.path().join("1.jpg").exists());
    }

    #[test]
    fn test_rename_updates_browser() {
        let dir = folder_with(&["1.jpg", "2.jpg"]);
        let ops = DefaultFileOperations::new();
        let manager = manager_with(&["Paris", "Curu"]);
        let mut nav = NavigationState::open(dir.path()).unwrap();

        let outcome = RenameWorkflow::new(&manager, &ops).rename(&mut nav);
        assert_eq!(outcome.new_name().as_deref(), Some("Paris_Curu.jpg"));
        assert_eq!(fs::read(dir.path().join("Paris_Curu.jpg")).unwrap(), b"1.jpg");
        assert!(!dir.path().join("1.jpg").exists());
        assert_eq!(nav.images(), &["Paris_Curu.jpg", "2.jpg"]);
        assert_eq!(nav.current_name(), Some("2.jpg"));

        // Second image collides with the first one
        let outcome = RenameWorkflow::new(&manager, &ops).rename(&mut nav);
        assert_eq!(outcome.new_name().as_deref(), Some("Paris_Curu_2.jpg"));
        assert_eq!(nav.images(), &["Paris_Curu.jpg", "Paris_Curu_2.jpg"]);
    }

    #[test]
    fn test_rename_twice_is_noop() {
        let dir = folder_with(&["1.jpg"]);
        let ops = DefaultFileOperations::new();
        let manager = manager_with(&["x"]);
        let mut nav = NavigationState::open(dir.path()).unwrap();

        let workflow = RenameWorkflow::new(&manager, &ops);
        assert!(matches!(workflow.rename(&mut nav), RenameOutcome::Renamed { .. }));
        let outcome = workflow.rename(&mut nav);
        assert!(matches!(outcome, RenameOutcome::NoOp(NoOpReason::Unchanged)));
    }

    #[test]
    fn test_failure_leaves_browser_untouched() {
        let dir = folder_with(&["1.jpg", "2.jpg"]);
        let manager = manager_with(&["x"]);
        let mut nav = NavigationState::open(dir.path()).unwrap();

        let outcome = RenameWorkflow::new(&manager, &DenyingOps).rename(&mut nav);
        assert!(matches!(outcome, RenameOutcome::Failed(FileOpError::PermissionDenied(_))));
        assert_eq!(nav.images(), &["1.jpg", "2.jpg"]);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_separator_token_keeps_file_in_folder() {
        let dir = folder_with(&["1.jpg"]);
        fs::create_dir(dir.path().join("sub")).unwrap();
        let ops = DefaultFileOperations::new();
        let mut manager = TagManager::empty();
        let idx = manager.add_group(GroupKind::Date, "date");
        if let Some(TagGroup::Date(date)) = manager.group_mut(idx) {
            date.set_pattern("sub/x");
        }
        let mut nav = NavigationState::open(dir.path()).unwrap();

        let outcome = RenameWorkflow::new(&manager, &ops).rename(&mut nav);
        assert!(matches!(outcome, RenameOutcome::Failed(FileOpError::InvalidOperation(_))));
        assert!(dir.path().join("1.jpg").exists());
        assert_eq!(fs::read_dir(dir.path().join("sub")).unwrap().count(), 0);
        assert_eq!(nav.images(), &["1.jpg"]);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_plan_does_not_touch_disk() {
        let dir = folder_with(&["1.jpg"]);
        let ops = DefaultFileOperations::new();
        let manager = manager_with(&["a", "b"]);
        let file = dir.path().join("1.jpg");

        let plan = RenameWorkflow::new(&manager, &ops).plan(&file);
        assert_eq!(plan.tokens, vec!["a", "b"]);
        assert_eq!(plan.composition, Composition::Target(dir.path().join("a_b.jpg")));
        assert!(file.exists());
    }
}
