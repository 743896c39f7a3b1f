//! DELETE statement.

use crate::column::{Col, ColumnList};
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::ident::Ident;
use crate::node::Node;
use crate::stmt::WhereClause;
use crate::writer::SqlWriter;

/// `DELETE FROM <table>[ WHERE ..][ RETURNING ..]`
#[derive(Debug, Clone)]
#[must_use]
pub struct DeleteStmt {
    table: Ident,
    where_clause: WhereClause,
    returning: ColumnList,
}

impl DeleteStmt {
    pub fn new(table: impl Into<Ident>) -> Self {
        Self {
            table: table.into(),
            where_clause: WhereClause::default(),
            returning: ColumnList::default(),
        }
    }

    pub fn where_clause<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.where_clause = WhereClause::new(exprs);
        self
    }

    pub fn and_where(mut self, expr: impl Into<Expr>) -> Self {
        self.where_clause.push(expr);
        self
    }

    pub fn returning<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Col>,
    {
        self.returning = ColumnList::new(cols);
        self
    }

    /// Check whether the statement would delete every row.
    pub fn is_unfiltered(&self) -> bool {
        self.where_clause.is_empty()
    }
}

impl Node for DeleteStmt {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        w.write_str("DELETE FROM ")?;
        self.table.write_sql(w)?;
        if !self.where_clause.is_empty() {
            w.write_str(" ")?;
            self.where_clause.write_sql(w)?;
        }
        if !self.returning.is_empty() {
            w.write_str(" RETURNING ")?;
            self.returning.write_sql(w)?;
        }
        Ok(())
    }
}
