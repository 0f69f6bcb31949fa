//! Enrichment coverage counts.
//!
//! For a selection of companies, count how many already have each kind of
//! enrichment data. Company numbers are always bound; the selection can be
//! large, so each query is a single `IN (...)` list.

use crate::config::CompanySchema;
use crate::error::{SearchError, SearchResult};
use crate::ident::Ident;
use crate::plan::QueryPlan;
use crate::sql::{PlaceholderStyle, Sql};
use serde::Serialize;

/// One kind of enrichment data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageMetric {
    Sic,
    Websites,
    Emails,
    Social,
    Phones,
    Contacts,
}

impl CoverageMetric {
    pub const ALL: [CoverageMetric; 6] = [
        CoverageMetric::Sic,
        CoverageMetric::Websites,
        CoverageMetric::Emails,
        CoverageMetric::Social,
        CoverageMetric::Phones,
        CoverageMetric::Contacts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CoverageMetric::Sic => "sic",
            CoverageMetric::Websites => "websites",
            CoverageMetric::Emails => "emails",
            CoverageMetric::Social => "social",
            CoverageMetric::Phones => "phones",
            CoverageMetric::Contacts => "contacts",
        }
    }

    /// Column on the enrichment table holding this metric.
    fn enrichment_column(self) -> Option<&'static str> {
        match self {
            CoverageMetric::Websites => Some("website"),
            CoverageMetric::Emails => Some("email"),
            CoverageMetric::Social => Some("linkedin_url"),
            CoverageMetric::Phones => Some("phone"),
            CoverageMetric::Sic | CoverageMetric::Contacts => None,
        }
    }
}

/// Build one count query per [`CoverageMetric`], in [`CoverageMetric::ALL`] order.
///
/// Fails if `company_numbers` is empty.
pub fn build_coverage_queries<S: AsRef<str>>(
    schema: &CompanySchema,
    style: PlaceholderStyle,
    company_numbers: &[S],
) -> SearchResult<Vec<(CoverageMetric, QueryPlan)>> {
    if company_numbers.is_empty() {
        return Err(SearchError::validation("No companies provided"));
    }

    let mut out = Vec::with_capacity(CoverageMetric::ALL.len());
    for metric in CoverageMetric::ALL {
        let plan = coverage_query(schema, metric, company_numbers).into_plan(style)?;
        out.push((metric, plan));
    }
    Ok(out)
}

fn coverage_query<S: AsRef<str>>(
    schema: &CompanySchema,
    metric: CoverageMetric,
    company_numbers: &[S],
) -> Sql {
    let numbers = company_numbers.iter().map(|n| n.as_ref().to_string());

    let mut sql = match metric {
        CoverageMetric::Contacts => {
            let mut sql = Sql::new("SELECT COUNT(DISTINCT ");
            sql.push_ident(&schema.company_number)
                .push(") AS count FROM ")
                .push_ident(&schema.contacts_table);
            sql
        }
        CoverageMetric::Sic => {
            let mut sql = Sql::new("SELECT COUNT(*) AS count FROM ");
            sql.push_ident(&schema.table);
            sql
        }
        _ => {
            let mut sql = Sql::new("SELECT COUNT(*) AS count FROM ");
            sql.push_ident(&schema.enrichment_table);
            sql
        }
    };

    sql.push(" WHERE ")
        .push_ident(&schema.company_number)
        .push(" IN (")
        .push_bind_list(numbers)
        .push(")");

    let present = match metric {
        CoverageMetric::Sic => Some(schema.sic_label.clone()),
        other => other.enrichment_column().map(Ident::known),
    };
    if let Some(column) = present {
        sql.push(" AND ")
            .push_ident(&column)
            .push(" IS NOT NULL AND ")
            .push_ident(&column)
            .push(" <> ''");
    }
    sql
}
