//! Search filter criteria.
//!
//! [`FilterSpec`] is the typed form of a company search request. Requests
//! arrive from the search screen as nested JSON (see [`SearchParams`]) and are
//! converted once at the boundary.

use crate::error::SearchResult;
use serde::Deserialize;

/// How `company_name` is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchType {
    /// Exact match.
    Is,
    /// Prefix or word-boundary match.
    #[default]
    Contains,
}

impl SearchType {
    /// `"is"` selects exact matching; anything else is `Contains`.
    pub fn parse(s: &str) -> Self {
        if s == "is" {
            SearchType::Is
        } else {
            SearchType::Contains
        }
    }
}

impl<'de> Deserialize<'de> for SearchType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(SearchType::parse).unwrap_or_default())
    }
}

/// Filter criteria of a company search. All criteria are optional and AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub company_number: Option<String>,
    pub company_name: Option<String>,
    pub search_type: SearchType,
    pub company_status: Option<String>,
    /// SIC entries, e.g. `"62020 - Computer consultancy activities"`.
    pub sic_codes: Vec<String>,
    /// Postcode or town.
    pub location: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company_number(mut self, number: impl Into<String>) -> Self {
        self.company_number = Some(number.into());
        self
    }

    pub fn with_company_name(mut self, name: impl Into<String>, search_type: SearchType) -> Self {
        self.company_name = Some(name.into());
        self.search_type = search_type;
        self
    }

    pub fn with_company_status(mut self, status: impl Into<String>) -> Self {
        self.company_status = Some(status.into());
        self
    }

    pub fn with_sic_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sic_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Search request body as sent by the search screen.
///
/// ```json
/// {
///   "basic":    {"companyName": "Acme", "companyNumber": "", "searchType": "contains"},
///   "location": {"location": "SW1A 1AA"},
///   "status":   {"companyStatus": "active"},
///   "sic":      {"codes": ["62020 - Computer consultancy activities"]}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub basic: BasicParams,
    pub location: LocationParams,
    pub status: StatusParams,
    pub sic: SicParams,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicParams {
    pub company_name: Option<String>,
    pub company_number: Option<String>,
    pub search_type: SearchType,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationParams {
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusParams {
    pub company_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SicParams {
    pub codes: Vec<String>,
}

impl SearchParams {
    /// Decode a request body.
    pub fn from_json(raw: &str) -> SearchResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<SearchParams> for FilterSpec {
    fn from(params: SearchParams) -> Self {
        FilterSpec {
            company_number: non_empty(params.basic.company_number),
            company_name: non_empty(params.basic.company_name),
            search_type: params.basic.search_type,
            company_status: non_empty(params.status.company_status),
            sic_codes: params.sic.codes,
            location: non_empty(params.location.location),
        }
    }
}
