use chrono::NaiveDate;

use crate::api::Query;

pub const DEFAULT_CATEGORY: &str = "Cybersecurity";

/// Date format the news endpoint expects for `start` and `end`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filters for the news request. Owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub category: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self::with_category(DEFAULT_CATEGORY)
    }
}

impl QueryParameters {
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            start: None,
            end: None,
        }
    }

    /// Query pairs for `GET /news`. Absent values are left out entirely.
    pub fn to_query(&self) -> Query {
        let mut query = Vec::with_capacity(3);
        if !self.category.is_empty() {
            query.push(("category", self.category.clone()));
        }
        if let Some(start) = self.start {
            query.push(("start", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            query.push(("end", end.format(DATE_FORMAT).to_string()));
        }
        query
    }
}
