use std::borrow::Cow;

use sea_query::{Alias, Asterisk, Expr, SelectStatement};

/// One entry in a record's selection: what to project for it in `SELECT`.
///
/// Selection order is render order, which in turn fixes result-column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selectable {
    /// Every declared column, rendered as `*`.
    AllColumns,
    /// A single column reference, rendered double-quoted.
    Column(Cow<'static, str>),
    /// A verbatim SQL expression, optionally aliased. Covers computed values
    /// such as rowid aliases. The expression is spliced as-is, unquoted.
    Expression {
        /// The SQL expression text.
        sql: Cow<'static, str>,
        /// Optional result-column alias.
        alias: Option<Cow<'static, str>>,
    },
}

impl Selectable {
    /// A column reference.
    pub fn column(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Column(name.into())
    }

    /// A verbatim SQL expression with no alias.
    pub fn expression(sql: impl Into<Cow<'static, str>>) -> Self {
        Self::Expression {
            sql: sql.into(),
            alias: None,
        }
    }

    /// A verbatim SQL expression exposed under `alias`.
    pub fn expression_as(
        sql: impl Into<Cow<'static, str>>, alias: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Expression {
            sql: sql.into(),
            alias: Some(alias.into()),
        }
    }

    /// Adds this selectable to a `SELECT` statement's projection list.
    pub(crate) fn apply(&self, statement: &mut SelectStatement) {
        match self {
            Self::AllColumns => {
                statement.column(Asterisk);
            }
            Self::Column(name) => {
                statement.column(Alias::new(name.as_ref()));
            }
            Self::Expression {
                sql,
                alias: Some(alias),
            } => {
                statement.expr_as(Expr::cust(sql.as_ref()), Alias::new(alias.as_ref()));
            }
            Self::Expression { sql, alias: None } => {
                statement.expr(Expr::cust(sql.as_ref()));
            }
        }
    }
}
