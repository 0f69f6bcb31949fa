//! WHERE-clause building blocks.
//!
//! A [`PredicateClause`] is one AND-ed condition of a search: either a single
//! `column OP ?` comparison or a parenthesized OR-group of comparisons. Values
//! are carried alongside the clause and emitted left to right.

use crate::ident::Ident;
use crate::sql::{BindValue, Sql};

/// Comparison operator of a single predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `column = ?`
    Eq,
    /// `column LIKE ?`
    Like,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Like => "LIKE",
        }
    }
}

/// One AND-ed condition of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateClause {
    /// `column OP ?`
    Compare {
        column: Ident,
        op: CompareOp,
        value: BindValue,
    },
    /// `(a OR b OR ...)`
    AnyOf(Vec<PredicateClause>),
}

impl PredicateClause {
    /// Exact match: `column = ?`
    pub fn eq(column: &Ident, value: impl Into<BindValue>) -> Self {
        PredicateClause::Compare {
            column: column.clone(),
            op: CompareOp::Eq,
            value: value.into(),
        }
    }

    /// Pattern match: `column LIKE ?`
    pub fn like(column: &Ident, pattern: impl Into<BindValue>) -> Self {
        PredicateClause::Compare {
            column: column.clone(),
            op: CompareOp::Like,
            value: pattern.into(),
        }
    }

    /// OR-group of clauses.
    pub fn any_of(clauses: Vec<PredicateClause>) -> Self {
        PredicateClause::AnyOf(clauses)
    }

    /// Bound values in emission order.
    pub fn params(&self) -> Vec<&BindValue> {
        let mut out = Vec::new();
        self.collect_params(&mut out);
        out
    }

    fn collect_params<'a>(&'a self, out: &mut Vec<&'a BindValue>) {
        match self {
            PredicateClause::Compare { value, .. } => out.push(value),
            PredicateClause::AnyOf(clauses) => {
                for c in clauses {
                    c.collect_params(out);
                }
            }
        }
    }

    /// Whether any comparison in this clause uses `op`.
    pub fn uses(&self, op: CompareOp) -> bool {
        match self {
            PredicateClause::Compare { op: o, .. } => *o == op,
            PredicateClause::AnyOf(clauses) => clauses.iter().any(|c| c.uses(op)),
        }
    }

    /// Append this clause into a [`Sql`] builder.
    pub fn append_to_sql(&self, sql: &mut Sql) {
        match self {
            PredicateClause::Compare { column, op, value } => {
                sql.push_ident(column);
                sql.push(" ");
                sql.push(op.as_sql());
                sql.push(" ");
                sql.push_bind(value.clone());
            }
            // Empty group matches nothing.
            PredicateClause::AnyOf(clauses) if clauses.is_empty() => {
                sql.push("1=0");
            }
            PredicateClause::AnyOf(clauses) => {
                sql.push("(");
                for (i, c) in clauses.iter().enumerate() {
                    if i > 0 {
                        sql.push(" OR ");
                    }
                    c.append_to_sql(sql);
                }
                sql.push(")");
            }
        }
    }
}
