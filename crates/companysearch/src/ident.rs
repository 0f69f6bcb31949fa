//! Safe SQL identifier handling.
//!
//! Column and table names cannot be bound as parameters, so every identifier
//! that reaches a query string goes through [`Ident`] first.
//!
//! - Each dot-separated part must match `[A-Za-z_][A-Za-z0-9_]*`
//! - Dotted names (`companies.company_name`) are allowed, empty parts are not
//!
//! # Example
//! ```ignore
//! use companysearch::Ident;
//!
//! let col = Ident::parse("reg_postcode")?;
//! assert!(Ident::parse("company_name; DROP TABLE companies").is_err());
//! # Ok::<(), companysearch::SearchError>(())
//! ```

use crate::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated SQL identifier (column or table name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ident(String);

impl Ident {
    /// Parse and validate an identifier.
    pub fn parse(s: &str) -> SearchResult<Self> {
        if s.is_empty() {
            return Err(SearchError::validation("Identifier cannot be empty"));
        }

        for part in s.split('.') {
            validate_part(part, s)?;
        }

        Ok(Self(s.to_string()))
    }

    /// Identifier from a built-in column or table name.
    pub(crate) fn known(name: &'static str) -> Self {
        debug_assert!(Self::parse(name).is_ok(), "invalid built-in identifier: {name}");
        Self(name.to_string())
    }

    /// Identifier as it is written into SQL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last dotted part, i.e. the bare column name.
    pub fn name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

fn validate_part(part: &str, whole: &str) -> SearchResult<()> {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return Err(SearchError::validation(format!(
            "Empty identifier segment in '{whole}'"
        )));
    };
    if first != '_' && !first.is_ascii_alphabetic() {
        return Err(SearchError::validation(format!(
            "Invalid identifier start character: '{first}'"
        )));
    }
    if let Some(c) = chars.find(|c| *c != '_' && !c.is_ascii_alphanumeric()) {
        return Err(SearchError::validation(format!(
            "Invalid character in identifier '{whole}': '{c}'"
        )));
    }
    Ok(())
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ident {
    type Error = SearchError;

    fn try_from(value: String) -> SearchResult<Self> {
        Self::parse(&value)
    }
}

impl From<Ident> for String {
    fn from(ident: Ident) -> Self {
        ident.0
    }
}
