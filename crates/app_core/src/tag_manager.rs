//! Ordered collection of tag tabs and its persisted form

use crate::tags::{DateGroup, GroupKind, GroupRecord, TagGroup, TagSet, DATE_LABEL};
use crate::AppError;
use std::path::Path;

/// The tabs, left to right. Their order is the order of tokens in a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagManager {
    groups: Vec<TagGroup>,
}

impl Default for TagManager {
    /// Date tab, then a place tab and a name tab with a few unchecked samples
    fn default() -> Self {
        Self {
            groups: vec![
                TagGroup::Date(DateGroup::new(DATE_LABEL)),
                TagGroup::Tags(TagSet::with_names("place", &["Dunkerque", "Paris", "Montreal"])),
                TagGroup::Tags(TagSet::with_names("name", &["Justine", "Victor", "Curu"])),
            ],
        }
    }
}

impl TagManager {
    /// Manager without any tab
    pub fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn groups(&self) -> &[TagGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&TagGroup> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut TagGroup> {
        self.groups.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Append a new tab and return its position
    pub fn add_group(&mut self, kind: GroupKind, label: impl Into<String>) -> usize {
        let group = TagGroup::new(kind, label);
        tracing::debug!("Adding {:?} tab '{}'", kind, group.label());
        self.groups.push(group);
        self.groups.len() - 1
    }

    /// Remove a tab. The caller is expected to have asked for confirmation.
    pub fn remove_group(&mut self, index: usize) -> Option<TagGroup> {
        if index >= self.groups.len() {
            return None;
        }
        let group = self.groups.remove(index);
        tracing::debug!("Removed tab '{}'", group.label());
        Some(group)
    }

    /// Tokens of every tab for `file`, in tab order
    pub fn tokens_for(&self, file: &Path) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|group| group.tags_for(file))
            .collect()
    }

    pub fn to_records(&self) -> Vec<GroupRecord> {
        self.groups.iter().map(TagGroup::to_record).collect()
    }

    pub fn from_records(records: Vec<GroupRecord>) -> Self {
        Self {
            groups: records.into_iter().map(TagGroup::from_record).collect(),
        }
    }

    /// Serialize to the sidecar JSON format
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(&self.to_records())?)
    }

    /// Parse the sidecar JSON format. Any structural problem fails the whole parse.
    pub fn try_from_json(data: &str) -> Result<Self, AppError> {
        let records: Option<Vec<GroupRecord>> = serde_json::from_str(data)?;
        match records {
            Some(records) if !records.is_empty() => Ok(Self::from_records(records)),
            _ => Err(AppError::Config("no tabs stored".to_string())),
        }
    }

    /// Parse stored state, falling back to the default tabs on any failure
    pub fn restore(data: Option<&str>) -> Self {
        let Some(data) = data else {
            tracing::info!("No stored tabs, using defaults");
            return Self::default();
        };

        match Self::try_from_json(data) {
            Ok(manager) => {
                tracing::info!("Restored {} tabs", manager.len());
                manager
            }
            Err(e) => {
                tracing::warn!("Failed to load stored tabs, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
