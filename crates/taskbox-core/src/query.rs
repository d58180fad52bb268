//! Task query engine: filtering and ordering of the task collection.
//!
//! [`filter_and_sort`] is a pure function of the task snapshot, a
//! [`FilterSpec`], and a [`SortSpec`]. It never mutates its input.
//!
//! # Filtering
//!
//! `status`, `priority`, and `project` are [`Selector`]s: `"all"` places no
//! constraint, anything else must match exactly (`project` compares the raw
//! `projectId`, so unassigned tasks never match a concrete project).
//!
//! A non-empty `search` is matched case-insensitively against title or
//! description. Under [`SearchMode::Exclusive`] (the default) the search
//! alone decides whether a task is kept and the three selectors are
//! bypassed. [`SearchMode::Combined`] ANDs the search with the selectors.
//!
//! # Ordering
//!
//! - `priority` ranks high=3, medium=2, low=1
//! - `dueDate` treats a missing date as later than every real date, in both
//!   directions (last when ascending, first when descending)
//! - tasks with equal keys come out in reverse input order

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ParseError;
use crate::types::{Task, TaskPriority, TaskStatus};

// ─────────────────────────────────────────────────────────────────────────────
// Filter
// ─────────────────────────────────────────────────────────────────────────────

/// A filter constraint: `All` (no constraint) or a single required value.
///
/// Serialized as the string `"all"` or the value's wire name. An empty
/// string also deserializes to `All`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selector<T> {
    /// No constraint.
    #[default]
    All,
    /// Only this value.
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    /// Whether `value` satisfies this selector.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Selector<T> {
    /// Whether this selector places no constraint.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: fmt::Display> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Only(value) => serializer.collect_str(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Selector<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || raw == "all" {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only).map_err(D::Error::custom)
    }
}

/// How a non-empty search combines with the other filter fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Search alone decides; status/priority/project are bypassed.
    #[default]
    Exclusive,
    /// Search is ANDed with status/priority/project.
    Combined,
}

/// User-selected filter criteria.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Required stored status.
    pub status: Selector<TaskStatus>,
    /// Required priority.
    pub priority: Selector<TaskPriority>,
    /// Required raw project ID.
    pub project: Selector<String>,
    /// Case-insensitive title/description substring. Empty means none.
    pub search: String,
    /// How `search` combines with the selectors.
    pub search_mode: SearchMode,
}

impl FilterSpec {
    /// Whether `task` is visible under this filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_lowered(task, &self.search.to_lowercase())
    }

    /// Merge a partial filter into this one.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(project) = patch.project {
            self.project = project;
        }
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(search_mode) = patch.search_mode {
            self.search_mode = search_mode;
        }
    }

    fn passes_selectors(&self, task: &Task) -> bool {
        let project_ok = match &self.project {
            Selector::All => true,
            Selector::Only(id) => task.project_id.as_deref() == Some(id.as_str()),
        };
        project_ok && self.status.accepts(&task.status) && self.priority.accepts(&task.priority)
    }

    fn matches_lowered(&self, task: &Task, needle: &str) -> bool {
        if needle.is_empty() {
            return self.passes_selectors(task);
        }
        match self.search_mode {
            SearchMode::Exclusive => task.matches_search(needle),
            SearchMode::Combined => self.passes_selectors(task) && task.matches_search(needle),
        }
    }
}

/// Partial filter update. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPatch {
    /// New status selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Selector<TaskStatus>>,
    /// New priority selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Selector<TaskPriority>>,
    /// New project selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Selector<String>>,
    /// New search string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// New search mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_mode: Option<SearchMode>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sort
// ─────────────────────────────────────────────────────────────────────────────

/// Sortable task field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Creation instant.
    #[default]
    CreatedAt,
    /// Last mutation instant.
    UpdatedAt,
    /// Due instant; missing dates sort as infinitely late.
    DueDate,
    /// Priority rank.
    Priority,
    /// Title, raw string order.
    Title,
    /// Stored status, by wire name.
    Status,
}

impl SortField {
    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Title => "title",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "dueDate" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            other => Err(ParseError::UnknownSortField(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// User-selected ordering. Defaults to newest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortSpec {
    /// Key to order by.
    pub sort_by: SortField,
    /// Direction.
    pub sort_order: SortOrder,
}

impl SortSpec {
    /// Sort by `field` in `order`.
    pub const fn new(sort_by: SortField, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }

    /// Directional comparison of two tasks' keys. Returns `Equal` on ties.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = compare_keys(self.sort_by, a, b);
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Formats as the combined picker token, e.g. `dueDate_asc`.
impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.sort_by, self.sort_order.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s
            .rsplit_once('_')
            .ok_or_else(|| ParseError::MalformedSort(s.to_string()))?;
        Ok(Self::new(field.parse()?, order.parse()?))
    }
}

fn compare_keys(field: SortField, a: &Task, b: &Task) -> Ordering {
    match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// Order `tasks` in place by `spec`.
///
/// Equal keys resolve later-input-first, so ties come out reversed.
pub fn sort_tasks(tasks: &mut Vec<Task>, spec: &SortSpec) {
    let mut indexed: Vec<(usize, Task)> = tasks.drain(..).enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| spec.compare(a, b).then_with(|| ib.cmp(ia)));
    tasks.extend(indexed.into_iter().map(|(_, task)| task));
}

/// Produce the visible, ordered task list.
pub fn filter_and_sort(tasks: &[Task], filter: &FilterSpec, sort: &SortSpec) -> Vec<Task> {
    let needle = filter.search.to_lowercase();
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| filter.matches_lowered(task, &needle))
        .cloned()
        .collect();
    sort_tasks(&mut visible, sort);
    visible
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
