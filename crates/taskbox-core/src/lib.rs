//! # taskbox-core
//!
//! Foundation types, the task query engine, and the statistics engine for
//! TaskBox.
//!
//! - **Types**: [`Task`], [`Project`], their status/priority enums, and the
//!   draft/patch records used to create and edit them
//! - **Query**: [`filter_and_sort`] turns the full task collection plus a
//!   [`FilterSpec`] and [`SortSpec`] into the visible, ordered task list
//! - **Stats**: [`compute_stats`] and friends derive status buckets, overdue
//!   counts, completion rates, and per-project/per-priority breakdowns
//! - **Logging**: `tracing` subscriber setup and log capture for tests
//!
//! Everything here is pure: no I/O, no persistence. The repositories that own
//! and persist the collections live in `taskbox-tasks`.

#![deny(unsafe_code)]

pub mod errors;
pub mod ids;
pub mod logging;
pub mod query;
pub mod stats;
pub mod types;

pub use errors::ParseError;
pub use ids::generate_id;
pub use query::{
    FilterPatch, FilterSpec, SearchMode, Selector, SortField, SortOrder, SortSpec,
    filter_and_sort, sort_tasks,
};
pub use stats::{
    DEFAULT_DASHBOARD_LIMIT, PriorityStats, ProjectStats, TaskStats, compute_stats,
    compute_stats_at, percent_of, priority_stats, project_stats, recent_tasks, upcoming_tasks,
};
pub use types::*;
