//! Row selection for table stores.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Direction {
    /// Ascending
    #[display("asc")]
    Asc,
    /// Descending
    #[display("desc")]
    Desc,
}

/// Column equality filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    /// `column = value`, compared on the value's text form
    Eq(String, String),
}

impl Filter {
    /// Column the filter applies to.
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _) => column,
        }
    }

    /// Whether a JSON row satisfies the filter.
    pub fn matches(&self, row: &serde_json::Value) -> bool {
        match self {
            Filter::Eq(column, expected) => match row.get(column) {
                Some(serde_json::Value::String(s)) => s == expected,
                Some(serde_json::Value::Null) | None => false,
                Some(other) => other.to_string() == *expected,
            },
        }
    }
}

/// Sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// Column to sort on
    pub column: String,
    /// Sort direction
    pub direction: Direction,
}

/// Filters, ordering and limit for a select.
///
/// # Examples
///
/// ```
/// use storie_interface::{Direction, Query};
///
/// let query = Query::new()
///     .eq("user_id", "42")
///     .order_by("created_at", Direction::Desc)
///     .limit(10);
///
/// assert_eq!(query.filters.len(), 1);
/// assert_eq!(query.limit, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// All filters must match
    pub filters: Vec<Filter>,
    /// Optional sort key
    pub order: Option<Order>,
    /// Maximum number of rows
    pub limit: Option<usize>,
}

impl Query {
    /// Empty query selecting every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq(column.into(), value.to_string()));
        self
    }

    /// Set the sort key.
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    /// Cap the number of rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a JSON row satisfies every filter.
    pub fn matches(&self, row: &serde_json::Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }
}
