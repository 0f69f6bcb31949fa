//! # companysearch
//!
//! Index-aware search query construction for the CRM companies dataset.
//!
//! ## Features
//!
//! - **Index-friendly patterns**: name searches use prefix and word-boundary
//!   `LIKE` patterns, never an unanchored `%term%`
//! - **Parameterized**: every user-supplied value is bound; only validated
//!   identifiers and keywords reach the SQL text
//! - **Allow-listed projection**: selected columns must pass a [`FieldAllowList`]
//! - **Pure**: no I/O, no shared state; build plans from any thread
//! - **Dialects**: `?` placeholders by default, `$n` for PostgreSQL
//!
//! ## Example
//!
//! ```ignore
//! use companysearch::{FieldAllowList, FilterSpec, QueryBuilder, SearchParams};
//!
//! let builder = QueryBuilder::default();
//! let filter = FilterSpec::from(SearchParams::from_json(body)?);
//! let fields = FieldAllowList::default().select(&requested_fields)?;
//!
//! let plan = builder.build(&filter, &fields, page, page_size)?;
//! let (sql, params) = plan.into_parts();
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod filter;
pub mod ident;
pub mod plan;
pub mod predicate;
pub mod search;
pub mod sic;
pub mod sql;
pub mod stats;

pub use config::{CompanySchema, SearchConfig};
pub use error::{SearchError, SearchResult};
pub use fields::{DEFAULT_COMPANY_FIELDS, FieldAllowList, SelectedFields};
pub use filter::{FilterSpec, SearchParams, SearchType};
pub use ident::Ident;
pub use plan::QueryPlan;
pub use predicate::{CompareOp, PredicateClause};
pub use search::{ACTIVE_STATUS, QueryBuilder, is_postcode_like, normalize_status};
pub use sic::{extract_sic_codes, industry_from_label, leading_sic_code};
pub use sql::{BindValue, PlaceholderStyle, Sql};
pub use stats::{CoverageMetric, build_coverage_queries};
