//! Photo Renamer core domain logic
//!
//! This crate contains:
//! - Date token substitution
//! - Tag tabs and the tag manager with its persisted form
//! - Filename composition with collision avoidance
//! - The rename workflow and the image browser state
//! - Configuration, application context and error types
//! - The command vocabulary of the front end

pub mod date_token;
pub mod tags;
pub mod tag_manager;
pub mod composer;
pub mod workflow;
pub mod navigation;
pub mod command;
pub mod config;
pub mod state;
pub mod error;

pub use state::{AppContext, describe_plan};
pub use config::{AppConfig, TagStore};
pub use command::{Command, ParseError, HELP};
pub use error::AppError;
pub use tags::{DateGroup, GroupKind, GroupRecord, Tag, TagGroup, TagSet};
pub use tag_manager::TagManager;
pub use composer::{compose, Composition};
pub use workflow::{NoOpReason, RenameOutcome, RenamePlan, RenameWorkflow};
pub use navigation::{ImageBrowser, NavigationState};
