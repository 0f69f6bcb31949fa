//! Parameter-safe SQL composition.
//!
//! Query text and bound values travel separately from the first fragment to
//! the finished [`QueryPlan`](crate::QueryPlan). Only identifiers and keywords
//! are ever written into the text.
//!
//! # Example
//!
//! ```ignore
//! use companysearch::sql::{PlaceholderStyle, Sql};
//!
//! let mut q = Sql::new("SELECT company_name FROM companies WHERE 1=1");
//! q.push(" AND company_status = ").push_bind("Active");
//! let plan = q.into_plan(PlaceholderStyle::Numbered)?;
//! assert_eq!(plan.sql(), "SELECT company_name FROM companies WHERE 1=1 AND company_status = $1");
//! ```

mod builder;
mod value;


pub use builder::Sql;
pub use value::BindValue;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
enum SqlPart {
    Raw(String),
    Param,
}

/// How placeholders are written into the rendered SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `?` for every parameter (SQLite, MySQL).
    #[default]
    Positional,
    /// `$1, $2, ...` (PostgreSQL).
    Numbered,
}

impl PlaceholderStyle {
    fn write_placeholder(self, out: &mut String, idx: usize) {
        match self {
            PlaceholderStyle::Positional => out.push('?'),
            PlaceholderStyle::Numbered => {
                out.push('$');
                out.push_str(&idx.to_string());
            }
        }
    }
}

/// Count placeholders in rendered SQL, skipping single-quoted literals.
pub fn count_placeholders(sql: &str, style: PlaceholderStyle) -> usize {
    let mut count = 0;
    let mut in_literal = false;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' => in_literal = !in_literal,
            '?' if !in_literal && style == PlaceholderStyle::Positional => count += 1,
            '$' if !in_literal && style == PlaceholderStyle::Numbered => {
                if chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                    count += 1;
                    while chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                        chars.next();
                    }
                }
            }
            _ => {}
        }
    }
    count
}
