//! Tag tabs: checkable tag sets and date patterns

use crate::composer::has_separator;
use crate::date_token;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label given to date tabs when none is stored
pub const DATE_LABEL: &str = "date";

/// Pattern a fresh date tab starts with
pub const DEFAULT_DATE_PATTERN: &str = "YYYY_MM";

/// A checkable tag. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub checked: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checked: false,
        }
    }
}

/// Ordered set of uniquely named tags under a tab label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    label: String,
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tags: Vec::new(),
        }
    }

    /// Build a set from unchecked names, skipping empty and repeated ones
    pub fn with_names(label: impl Into<String>, names: &[&str]) -> Self {
        let mut set = Self::new(label);
        for name in names {
            set.add(*name);
        }
        set
    }

    /// Build a set from stored tags; a repeated name keeps its first entry and
    /// names that are not valid tags are dropped
    pub fn from_tags(label: impl Into<String>, tags: Vec<Tag>) -> Self {
        let mut set = Self::new(label);
        for tag in tags {
            if !is_valid_name(&tag.name) || set.contains(&tag.name) {
                tracing::debug!("Dropping invalid or duplicate tag {:?} from {}", tag.name, set.label);
                continue;
            }
            set.tags.push(tag);
        }
        set
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Append an unchecked tag. Empty names, names with a path separator and
    /// already present names are ignored.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if !is_valid_name(&name) || self.contains(&name) {
            return false;
        }
        self.tags.push(Tag::new(name));
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.name != name);
        self.tags.len() != before
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        match self.tags.iter_mut().find(|t| t.name == name) {
            Some(tag) => {
                tag.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Flip a tag; returns its new state
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let tag = self.tags.iter_mut().find(|t| t.name == name)?;
        tag.checked = !tag.checked;
        Some(tag.checked)
    }

    /// Names of the checked tags, in stored order
    pub fn toggled_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .filter(|t| t.checked)
            .map(|t| t.name.clone())
            .collect()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !has_separator(name)
}

/// Tab turning a file's modification date into one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    label: String,
    pattern: String,
}

impl DateGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_pattern(label, DEFAULT_DATE_PATTERN)
    }

    pub fn with_pattern(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = pattern.into();
    }

    /// Zero or one token. An unreadable timestamp yields nothing.
    pub fn tags_for(&self, file: &Path) -> Vec<String> {
        if self.pattern.is_empty() {
            return Vec::new();
        }

        match date_token::modified_utc(file) {
            Ok(timestamp) => vec![date_token::substitute(&self.pattern, timestamp)],
            Err(e) => {
                tracing::warn!("Cannot read modification time of {}: {}", file.display(), e);
                Vec::new()
            }
        }
    }
}

/// Kind of tab, as offered when creating a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Tags,
    Date,
}

impl std::str::FromStr for GroupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tags" | "regular" => Ok(GroupKind::Tags),
            "date" => Ok(GroupKind::Date),
            other => Err(format!("unknown tab kind '{}' (expected tags or date)", other)),
        }
    }
}

/// One tab of the tag manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagGroup {
    Tags(TagSet),
    Date(DateGroup),
}

impl TagGroup {
    pub fn new(kind: GroupKind, label: impl Into<String>) -> Self {
        match kind {
            GroupKind::Tags => TagGroup::Tags(TagSet::new(label)),
            GroupKind::Date => TagGroup::Date(DateGroup::new(label)),
        }
    }

    pub fn kind(&self) -> GroupKind {
        match self {
            TagGroup::Tags(_) => GroupKind::Tags,
            TagGroup::Date(_) => GroupKind::Date,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TagGroup::Tags(set) => set.label(),
            TagGroup::Date(date) => date.label(),
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        match self {
            TagGroup::Tags(set) => set.set_label(label),
            TagGroup::Date(date) => date.set_label(label),
        }
    }

    /// Tokens this tab contributes to the name of `file`
    pub fn tags_for(&self, file: &Path) -> Vec<String> {
        match self {
            TagGroup::Tags(set) => set.toggled_names(),
            TagGroup::Date(date) => date.tags_for(file),
        }
    }

    pub fn to_record(&self) -> GroupRecord {
        match self {
            TagGroup::Tags(set) => GroupRecord::TagsTab {
                name: set.label.clone(),
                content: set.tags.clone(),
            },
            TagGroup::Date(date) => GroupRecord::DateTab {
                name: date.label.clone(),
                content: date.pattern.clone(),
            },
        }
    }

    pub fn from_record(record: GroupRecord) -> Self {
        match record {
            GroupRecord::TagsTab { name, content } => TagGroup::Tags(TagSet::from_tags(name, content)),
            GroupRecord::DateTab { name, content } => TagGroup::Date(DateGroup::with_pattern(name, content)),
        }
    }
}

/// Persisted form of a tab in the sidecar file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GroupRecord {
    TagsTab {
        name: String,
        content: Vec<Tag>,
    },
    DateTab {
        #[serde(default = "default_date_label")]
        name: String,
        content: String,
    },
}

fn default_date_label() -> String {
    DATE_LABEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn set_mtime(path: &Path, y: i32, m: u32, d: u32) {
        let ts = Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap().timestamp();
        filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(ts, 0)).unwrap();
    }

    #[test]
    fn test_add_rejects_empty_and_duplicates() {
        let mut set = TagSet::new("place");
        assert!(set.add("Paris"));
        assert!(!set.add("Paris"));
        assert!(!set.add(""));
        assert!(set.add("paris"));
        assert_eq!(set.tags().len(), 2);
        assert!(set.tags().iter().all(|t| !t.checked));
    }

    #[test]
    fn test_add_rejects_path_separators() {
        let mut set = TagSet::new("place");
        assert!(!set.add("sub/x"));
        assert!(!set.add(format!("a{}b", std::path::MAIN_SEPARATOR)));
        assert!(set.tags().is_empty());

        let stored = TagSet::from_tags("place", vec![Tag { name: "../up".into(), checked: true }]);
        assert!(stored.tags().is_empty());
    }

    #[test]
    fn test_remove() {
        let mut set = TagSet::with_names("name", &["Justine", "Victor"]);
        assert!(set.remove("Justine"));
        assert!(!set.remove("Justine"));
        assert_eq!(set.tags(), &[Tag::new("Victor")]);
    }

    #[test]
    fn test_toggled_names_keep_stored_order() {
        let mut set = TagSet::with_names("place", &["Dunkerque", "Paris", "Montreal"]);
        assert!(set.set_checked("Montreal", true));
        assert_eq!(set.toggle("Dunkerque"), Some(true));
        assert_eq!(set.toggle("Nowhere"), None);
        assert!(!set.set_checked("Nowhere", true));

        assert_eq!(set.toggled_names(), vec!["Dunkerque", "Montreal"]);
    }

    #[test]
    fn test_regular_group_ignores_file() {
        let mut set = TagSet::with_names("name", &["Curu"]);
        set.set_checked("Curu", true);
        let group = TagGroup::Tags(set);
        assert_eq!(group.tags_for(Path::new("/does/not/exist.jpg")), vec!["Curu"]);
    }

    #[test]
    fn test_date_group_uses_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.jpg");
        std::fs::write(&path, b"").unwrap();
        set_mtime(&path, 2019, 11, 4);

        let group = TagGroup::Date(DateGroup::new(DATE_LABEL));
        assert_eq!(group.tags_for(&path), vec!["2019_11"]);

        let literal = DateGroup::with_pattern(DATE_LABEL, "misc");
        assert_eq!(literal.tags_for(&path), vec!["misc"]);
    }

    #[test]
    fn test_date_group_empty_pattern_or_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = DateGroup::with_pattern(DATE_LABEL, "");
        assert!(empty.tags_for(&dir.path().join("whatever.jpg")).is_empty());

        let group = DateGroup::new(DATE_LABEL);
        assert!(group.tags_for(&dir.path().join("missing.jpg")).is_empty());
    }

    #[test]
    fn test_from_tags_keeps_first_duplicate() {
        let set = TagSet::from_tags(
            "place",
            vec![
                Tag { name: "Paris".into(), checked: true },
                Tag { name: "Paris".into(), checked: false },
                Tag { name: "".into(), checked: true },
            ],
        );
        assert_eq!(set.tags(), &[Tag { name: "Paris".into(), checked: true }]);
    }

    #[test]
    fn test_record_shape() {
        let mut set = TagSet::with_names("place", &["Paris"]);
        set.set_checked("Paris", true);
        let json = serde_json::to_value(TagGroup::Tags(set).to_record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "TagsTab",
                "name": "place",
                "content": [{"name": "Paris", "checked": true}]
            })
        );

        let json = serde_json::to_value(TagGroup::new(GroupKind::Date, "date").to_record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "DateTab", "name": "date", "content": "YYYY_MM"})
        );
    }

    #[test]
    fn test_date_record_without_name() {
        let record: GroupRecord =
            serde_json::from_str(r#"{"type": "DateTab", "content": "YY"}"#).unwrap();
        let group = TagGroup::from_record(record);
        assert_eq!(group.label(), DATE_LABEL);
        assert_eq!(group.kind(), GroupKind::Date);
    }

    #[test]
    fn test_group_kind_parse() {
        assert_eq!("tags".parse::<GroupKind>(), Ok(GroupKind::Tags));
        assert_eq!("Date".parse::<GroupKind>(), Ok(GroupKind::Date));
        assert!("other".parse::<GroupKind>().is_err());
    }

    #[test]
    fn test_set_label() {
        let mut group = TagGroup::new(GroupKind::Tags, "people");
        group.set_label("friends");
        assert_eq!(group.label(), "friends");
    }
}
