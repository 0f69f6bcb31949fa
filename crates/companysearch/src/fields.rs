//! Projection columns and the allow-list that guards them.
//!
//! Column names cannot be bound as parameters, so the projection of a search
//! query is written straight into the SQL text. [`SelectedFields`] can only be
//! obtained from [`FieldAllowList::select`]: validating requested columns is
//! the caller's job, and the type makes that step impossible to skip.

use crate::error::{SearchError, SearchResult};
use crate::ident::Ident;

/// Columns the search screens project by default.
pub const DEFAULT_COMPANY_FIELDS: &[&str] = &[
    "company_number",
    "company_name",
    "company_status",
    "company_category",
    "incorporation_date",
    "sic_code_1",
    "sic_code_2",
    "sic_code_3",
    "sic_code_4",
    "reg_address_line1",
    "reg_address_line2",
    "reg_post_town",
    "reg_county",
    "reg_postcode",
];

/// Set of column names callers are allowed to project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAllowList {
    allowed: Vec<Ident>,
}

impl Default for FieldAllowList {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_COMPANY_FIELDS.iter().copied().map(Ident::known).collect(),
        }
    }
}

impl FieldAllowList {
    /// Build an allow-list; every entry must be a valid identifier.
    pub fn new<I, S>(fields: I) -> SearchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: Vec<Ident> = Vec::new();
        for f in fields {
            let ident = Ident::parse(f.as_ref())?;
            if !allowed.contains(&ident) {
                allowed.push(ident);
            }
        }
        if allowed.is_empty() {
            return Err(SearchError::validation("Field allow-list cannot be empty"));
        }
        Ok(Self { allowed })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.allowed.iter().any(|a| a.as_str() == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ident> {
        self.allowed.iter()
    }

    /// Validate requested columns and return them as [`SelectedFields`].
    ///
    /// Order is kept and duplicates are dropped. Fails on an empty request or
    /// on any column not in the allow-list.
    pub fn select<I, S>(&self, requested: I) -> SearchResult<SelectedFields>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<Ident> = Vec::new();
        for name in requested {
            let name = name.as_ref();
            let Some(ident) = self.allowed.iter().find(|a| a.as_str() == name) else {
                return Err(SearchError::validation(format!(
                    "Field not allowed: '{name}'"
                )));
            };
            if !selected.contains(ident) {
                selected.push(ident.clone());
            }
        }

        if selected.is_empty() {
            return Err(SearchError::validation("At least one field must be selected"));
        }
        Ok(SelectedFields(selected))
    }

    /// Every allowed column, in allow-list order.
    pub fn select_all(&self) -> SelectedFields {
        SelectedFields(self.allowed.clone())
    }
}

/// Non-empty, allow-listed projection columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFields(Vec<Ident>);

impl SelectedFields {
    pub fn iter(&self) -> impl Iterator<Item = &Ident> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Ident] {
        &self.0
    }
}
