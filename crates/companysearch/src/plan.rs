//! The finished, executable query.

use crate::sql::{BindValue, PlaceholderStyle, count_placeholders};
use serde::Serialize;

/// A rendered query string plus its bound values.
///
/// `params()[i]` binds the `i`-th placeholder of `sql()`. Plans are only
/// produced by [`Sql::into_plan`](crate::sql::Sql::into_plan), which checks
/// that the two agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    sql: String,
    params: Vec<BindValue>,
    #[serde(skip)]
    style: PlaceholderStyle,
}

impl QueryPlan {
    pub(crate) fn new(sql: String, params: Vec<BindValue>, style: PlaceholderStyle) -> Self {
        Self { sql, params, style }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[BindValue] {
        &self.params
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Placeholders found in the rendered text.
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.sql, self.style)
    }

    pub fn into_parts(self) -> (String, Vec<BindValue>) {
        (self.sql, self.params)
    }

    /// Parameter refs compatible with `tokio-postgres`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}
