//! Search configuration: where the companies live and how queries are shaped.
//!
//! Every field has a default matching the production `companies` table, so an
//! empty TOML table (or `SearchConfig::default()`) is a complete config.

use crate::error::{SearchError, SearchResult};
use crate::fields::FieldAllowList;
use crate::ident::Ident;
use crate::sql::PlaceholderStyle;
use serde::Deserialize;

/// Table and column names used by the generated queries.
///
/// The query shapes assume an index on each of the searched columns
/// (`company_number` unique, `company_status`, `company_name` prefix,
/// `sic_code`, `postcode`, `post_town`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanySchema {
    pub table: Ident,
    pub company_number: Ident,
    pub company_name: Ident,
    pub company_status: Ident,
    /// Primary SIC code, numeric.
    pub sic_code: Ident,
    /// Primary SIC code as its `"62020 - Description"` label.
    pub sic_label: Ident,
    pub postcode: Ident,
    pub post_town: Ident,
    pub enrichment_table: Ident,
    pub contacts_table: Ident,
}

impl Default for CompanySchema {
    fn default() -> Self {
        Self {
            table: Ident::known("companies"),
            company_number: Ident::known("company_number"),
            company_name: Ident::known("company_name"),
            company_status: Ident::known("company_status"),
            sic_code: Ident::known("sic_code_1_num"),
            sic_label: Ident::known("sic_code_1"),
            postcode: Ident::known("reg_postcode"),
            post_town: Ident::known("reg_post_town"),
            enrichment_table: Ident::known("company_enrichment"),
            contacts_table: Ident::known("company_contacts"),
        }
    }
}

/// Configuration for [`QueryBuilder`](crate::QueryBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub schema: CompanySchema,
    pub placeholder_style: PlaceholderStyle,
    /// Names shorter than this (in chars) only get the prefix pattern.
    pub word_boundary_min_len: usize,
    /// Locations shorter than this (in chars) are ignored.
    pub location_min_len: usize,
    /// Longest space-stripped value still treated as a postcode.
    pub postcode_max_len: usize,
    /// Columns callers may project. `None` uses [`FieldAllowList::default`].
    pub allowed_fields: Option<Vec<String>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            schema: CompanySchema::default(),
            placeholder_style: PlaceholderStyle::Positional,
            word_boundary_min_len: 3,
            location_min_len: 2,
            postcode_max_len: 8,
            allowed_fields: None,
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder style.
    pub fn with_placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Set the table and column names.
    pub fn with_schema(mut self, schema: CompanySchema) -> Self {
        self.schema = schema;
        self
    }

    /// Restrict the projectable columns.
    pub fn with_allowed_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(raw: &str) -> SearchResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric tunables and the allow-list.
    pub fn validate(&self) -> SearchResult<()> {
        if self.word_boundary_min_len == 0 {
            return Err(SearchError::validation(
                "word_boundary_min_len must be at least 1",
            ));
        }
        if self.location_min_len == 0 {
            return Err(SearchError::validation("location_min_len must be at least 1"));
        }
        if self.postcode_max_len == 0 {
            return Err(SearchError::validation("postcode_max_len must be at least 1"));
        }
        self.field_allow_list()?;
        Ok(())
    }

    /// The allow-list callers must validate `selected_fields` against.
    pub fn field_allow_list(&self) -> SearchResult<FieldAllowList> {
        match &self.allowed_fields {
            Some(fields) => FieldAllowList::new(fields),
            None => Ok(FieldAllowList::default()),
        }
    }
}
