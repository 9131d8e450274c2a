//! Todo and project records
//!
//! The persisted JSON shape (camelCase keys, `dueDate` as `"YYYY-MM-DD"` or
//! `""`) is kept stable so existing data files keep loading.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a todo
///
/// New ids are random UUIDs; any other string (e.g. older numeric ids) is
/// accepted as-is when loading.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Todo priority, persisted lowercase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Sort rank, urgent first
    pub fn rank(self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Thấp",
            Priority::Medium => "Trung bình",
            Priority::High => "Cao",
            Priority::Urgent => "Khẩn cấp",
        }
    }

    pub fn all() -> &'static [Priority] {
        &[
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ]
    }

    /// Next priority in form-cycling order (low -> urgent -> low)
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Urgent,
            Priority::Urgent => Priority::Low,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Priority::Low => Priority::Urgent,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
            Priority::Urgent => Priority::High,
        }
    }
}

/// A single trackable task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Build a fresh, not completed todo from a validated draft
    pub(crate) fn from_draft(draft: TodoDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TodoId::generate(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            project: draft.project,
            tags: draft.tags,
            completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Overwrite the editable fields, leaving identity and completion alone
    pub(crate) fn apply_draft(&mut self, draft: TodoDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.due_date = draft.due_date;
        self.priority = draft.priority;
        self.project = draft.project;
        self.tags = draft.tags;
    }

    /// Restore `completed_at.is_some() == completed` on records loaded from
    /// storage. Returns `true` if the record was adjusted.
    pub(crate) fn normalize(&mut self) -> bool {
        match (self.completed, self.completed_at) {
            (true, None) => {
                self.completed_at = Some(self.created_at);
                true
            }
            (false, Some(_)) => {
                self.completed_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    /// Editable fields of this todo, for pre-filling the edit form
    pub fn to_draft(&self) -> TodoDraft {
        TodoDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            project: self.project.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Raw field input for create and update
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub project: String,
    pub tags: Vec<String>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Trim text fields and drop empty tags
    pub(crate) fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.tags = self
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }
}

/// Split comma-separated tag input: `"work, urgent,,x "` -> `["work", "urgent", "x"]`
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a `YYYY-MM-DD` due date, `None` for blank or malformed input
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// A named grouping of todos
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// Icon assigned to user-created projects
pub const USER_PROJECT_ICON: &str = "fas fa-folder";

impl Project {
    /// A user project; the id is derived from the name
    pub fn user(name: &str, color: impl Into<String>) -> Self {
        let name = name.trim();
        Self {
            id: project_id_from_name(name),
            name: name.to_string(),
            color: color.into(),
            icon: USER_PROJECT_ICON.to_string(),
        }
    }

    /// Parse the `#rrggbb` color into components
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Lowercase and replace each whitespace run with `-`: `"Học  Tập"` -> `"học-tập"`
pub fn project_id_from_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Built-in projects present on first launch
pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: "personal".into(),
            name: "Cá nhân".into(),
            color: "#4285f4".into(),
            icon: "fas fa-user".into(),
        },
        Project {
            id: "work".into(),
            name: "Công việc".into(),
            color: "#34a853".into(),
            icon: "fas fa-briefcase".into(),
        },
        Project {
            id: "shopping".into(),
            name: "Mua sắm".into(),
            color: "#fbbc04".into(),
            icon: "fas fa-shopping-cart".into(),
        },
    ]
}

/// `#rrggbb` -> `(r, g, b)`
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// `dueDate` is stored as `"YYYY-MM-DD"`, with `""` meaning no due date.
mod due_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let parsed = super::parse_due_date(&raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            tracing::warn!(due_date = %raw, "Ignoring malformed due date");
        }
        Ok(parsed)
    }
}
