//! Index-aware company search query construction.
//!
//! [`QueryBuilder`] turns a [`FilterSpec`] and a page request into one
//! parameterized [`QueryPlan`]. Every emitted predicate can be served by an
//! index on its column, or is OR-ed with one that can:
//!
//! | filter | predicate |
//! |---|---|
//! | company number | `company_number = ?` |
//! | status | `company_status = ?` (`active` → `Active`) |
//! | name, `is` | `company_name = ?` |
//! | name, `contains`, ≥ 3 chars | `(company_name LIKE 'x%' OR company_name LIKE '% x%')` |
//! | name, `contains`, < 3 chars | `company_name LIKE 'x%'` |
//! | SIC codes | `(sic_code_1_num = ? OR ...)` |
//! | postcode-like location | `(reg_postcode LIKE 'X%' OR reg_post_town LIKE '%x%')` |
//! | other location | `reg_post_town LIKE '%x%'` |
//!
//! The unanchored `%name%` pattern is never produced for names: it cannot use
//! the prefix index on `company_name` and forces a full scan.
//!
//! # Example
//! ```ignore
//! use companysearch::{FieldAllowList, FilterSpec, QueryBuilder, SearchType};
//!
//! let builder = QueryBuilder::default();
//! let fields = FieldAllowList::default().select(["company_number", "company_name"])?;
//! let filter = FilterSpec::new()
//!     .with_company_name("Microsoft", SearchType::Contains)
//!     .with_company_status("active");
//!
//! let plan = builder.build(&filter, &fields, 1, 20)?;
//! // SELECT company_number, company_name FROM companies WHERE 1=1
//! //   AND company_status = ? AND (company_name LIKE ? OR company_name LIKE ?)
//! //   ORDER BY company_name LIMIT ? OFFSET ?
//! ```

#[cfg(test)]
mod tests;

use crate::config::SearchConfig;
use crate::error::{SearchError, SearchResult};
use crate::fields::SelectedFields;
use crate::filter::{FilterSpec, SearchType};
use crate::plan::QueryPlan;
use crate::predicate::PredicateClause;
use crate::sic::leading_sic_code;
use crate::sql::Sql;
use crate::stats::{CoverageMetric, build_coverage_queries};

/// Canonical stored casing of the active status.
pub const ACTIVE_STATUS: &str = "Active";

/// Builds parameterized company search queries.
///
/// Holds only immutable configuration; share one instance across threads.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    config: SearchConfig,
}

impl QueryBuilder {
    /// Create a builder from a validated configuration.
    pub fn new(config: SearchConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build the paginated search query.
    ///
    /// `fields` is written into the projection verbatim. It can only come from
    /// [`FieldAllowList::select`](crate::FieldAllowList::select); callers that
    /// accept column names from a request must run them through the allow-list
    /// first.
    ///
    /// Fails with [`SearchError::Validation`] if `page` or `page_size` is 0,
    /// or if the offset does not fit a signed 64-bit integer.
    pub fn build(
        &self,
        filter: &FilterSpec,
        fields: &SelectedFields,
        page: u32,
        page_size: u32,
    ) -> SearchResult<QueryPlan> {
        if page < 1 {
            return Err(SearchError::validation("page must be at least 1"));
        }
        if page_size < 1 {
            return Err(SearchError::validation("page_size must be at least 1"));
        }

        let schema = &self.config.schema;
        let mut sql = Sql::new("SELECT ");
        sql.push_ident_list(fields.iter())
            .push(" FROM ")
            .push_ident(&schema.table)
            .push(" WHERE 1=1");
        self.push_predicates(&mut sql, filter);

        let offset = i64::from(page - 1)
            .checked_mul(i64::from(page_size))
            .ok_or_else(|| SearchError::validation("page offset out of range"))?;
        sql.push(" ORDER BY ")
            .push_ident(&schema.company_name)
            .push(" LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind(offset);

        let plan = sql.into_plan(self.config.placeholder_style)?;
        #[cfg(feature = "tracing")]
        log_plan("search", &plan, Some((page, page_size)));
        Ok(plan)
    }

    /// Count the rows `build` would page through.
    pub fn count(&self, filter: &FilterSpec) -> SearchResult<QueryPlan> {
        let mut sql = Sql::new("SELECT COUNT(*) FROM ");
        sql.push_ident(&self.config.schema.table).push(" WHERE 1=1");
        self.push_predicates(&mut sql, filter);

        let plan = sql.into_plan(self.config.placeholder_style)?;
        #[cfg(feature = "tracing")]
        log_plan("count", &plan, None);
        Ok(plan)
    }

    /// A short alphabetical list of active companies, projected as
    /// `id`, `name` and `sic`.
    pub fn active_sample(&self, limit: u32) -> SearchResult<QueryPlan> {
        if limit < 1 {
            return Err(SearchError::validation("limit must be at least 1"));
        }

        let schema = &self.config.schema;
        let mut sql = Sql::new("SELECT ");
        sql.push_ident(&schema.company_number)
            .push(" AS id, ")
            .push_ident(&schema.company_name)
            .push(" AS name, ")
            .push_ident(&schema.sic_label)
            .push(" AS sic FROM ")
            .push_ident(&schema.table)
            .push(" WHERE ");
        PredicateClause::eq(&schema.company_status, ACTIVE_STATUS).append_to_sql(&mut sql);
        sql.push(" ORDER BY ")
            .push_ident(&schema.company_name)
            .push(" LIMIT ")
            .push_bind(limit);

        sql.into_plan(self.config.placeholder_style)
    }

    /// Enrichment coverage count queries for the given companies.
    pub fn coverage<S: AsRef<str>>(
        &self,
        company_numbers: &[S],
    ) -> SearchResult<Vec<(CoverageMetric, QueryPlan)>> {
        build_coverage_queries(
            &self.config.schema,
            self.config.placeholder_style,
            company_numbers,
        )
    }

    /// The AND-ed predicates for `filter`, in emission order.
    pub fn predicates(&self, filter: &FilterSpec) -> Vec<PredicateClause> {
        let mut out = Vec::new();

        let number = trimmed(&filter.company_number);
        if let Some(number) = number {
            out.push(PredicateClause::eq(&self.config.schema.company_number, number));
        }
        if let Some(status) = filter.company_status.as_deref().filter(|s| !s.is_empty()) {
            out.push(PredicateClause::eq(
                &self.config.schema.company_status,
                normalize_status(status),
            ));
        }
        // A company number pins the row; name matching adds nothing.
        if number.is_none()
            && let Some(name) = trimmed(&filter.company_name)
        {
            out.push(self.name_clause(name, filter.search_type));
        }
        if let Some(clause) = self.sic_clause(&filter.sic_codes) {
            out.push(clause);
        }
        if let Some(clause) = trimmed(&filter.location).and_then(|l| self.location_clause(l)) {
            out.push(clause);
        }

        out
    }

    fn push_predicates(&self, sql: &mut Sql, filter: &FilterSpec) {
        for clause in self.predicates(filter) {
            sql.push(" AND ");
            clause.append_to_sql(sql);
        }
    }

    fn name_clause(&self, name: &str, search_type: SearchType) -> PredicateClause {
        let column = &self.config.schema.company_name;
        match search_type {
            SearchType::Is => PredicateClause::eq(column, name),
            SearchType::Contains if name.chars().count() >= self.config.word_boundary_min_len => {
                PredicateClause::any_of(vec![
                    PredicateClause::like(column, format!("{name}%")),
                    PredicateClause::like(column, format!("% {name}%")),
                ])
            }
            // Word-boundary scans cost too much for very short terms.
            SearchType::Contains => PredicateClause::like(column, format!("{name}%")),
        }
    }

    fn sic_clause(&self, entries: &[String]) -> Option<PredicateClause> {
        let column = &self.config.schema.sic_code;
        let mut clauses = Vec::new();
        for entry in entries {
            match leading_sic_code(entry) {
                Some(code) => clauses.push(PredicateClause::eq(column, code)),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        target: "companysearch.query",
                        entry = %entry,
                        "dropping SIC entry without a leading code"
                    );
                }
            }
        }
        (!clauses.is_empty()).then(|| PredicateClause::any_of(clauses))
    }

    fn location_clause(&self, location: &str) -> Option<PredicateClause> {
        if location.chars().count() < self.config.location_min_len {
            return None;
        }

        let schema = &self.config.schema;
        let town = PredicateClause::like(&schema.post_town, format!("%{location}%"));
        if is_postcode_like(location, self.config.postcode_max_len) {
            let postcode =
                PredicateClause::like(&schema.postcode, format!("{}%", location.to_uppercase()));
            Some(PredicateClause::any_of(vec![postcode, town]))
        } else {
            Some(town)
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Map any casing of `active` to the stored `Active`; other statuses pass through.
pub fn normalize_status(status: &str) -> String {
    if status.to_lowercase() == "active" {
        ACTIVE_STATUS.to_string()
    } else {
        status.to_string()
    }
}

/// Loose postcode check: with spaces removed, non-empty, all alphanumeric
/// and at most `max_len` chars.
///
/// This is an approximation, not a postcode format validator; town names
/// like `"Leeds"` also pass and are then matched against both columns.
pub fn is_postcode_like(value: &str, max_len: usize) -> bool {
    let stripped: String = value.chars().filter(|c| *c != ' ').collect();
    !stripped.is_empty()
        && stripped.chars().all(char::is_alphanumeric)
        && stripped.chars().count() <= max_len
}

#[cfg(feature = "tracing")]
const MAX_LOGGED_SQL: usize = 200;

#[cfg(feature = "tracing")]
fn log_plan(kind: &'static str, plan: &QueryPlan, page: Option<(u32, u32)>) {
    let sql = plan.sql();
    let sql = match sql.char_indices().nth(MAX_LOGGED_SQL) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    };
    let (page, page_size) = page.unzip();
    tracing::debug!(
        target: "companysearch.query",
        kind,
        param_count = plan.params().len(),
        page,
        page_size,
        sql = %sql,
        "built query"
    );
}
