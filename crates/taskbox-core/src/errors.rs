//! Parse errors for the string forms of task enums and sort tokens.

use thiserror::Error;

/// Failure to parse a wire-format token into a typed value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not one of `pending`, `in-progress`, `completed`.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),

    /// Not one of `low`, `medium`, `high`.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),

    /// Sort field not supported by the query engine.
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    /// Not one of `asc`, `desc`.
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),

    /// Combined sort token without the `<field>_<order>` shape.
    #[error("malformed sort token: {0}")]
    MalformedSort(String),
}
