//! UPDATE statement.

use crate::column::{Col, Column, ColumnList};
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::ident::Ident;
use crate::node::{Node, write_list};
use crate::stmt::WhereClause;
use crate::writer::SqlWriter;

/// One SET assignment: `key = value`.
#[derive(Debug, Clone)]
pub struct SetArg {
    pub key: Column,
    pub value: Col,
}

impl SetArg {
    pub fn new(key: impl Into<Column>, value: impl Into<Col>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Node for SetArg {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        self.key.write_sql(w)?;
        w.write_str(" = ")?;
        self.value.write_sql(w)
    }
}

/// `UPDATE <table> SET a = .., b = ..[ WHERE ..][ RETURNING ..]`
///
/// Without assignments the SET clause is omitted; the result is not executable.
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateStmt {
    table: Ident,
    set: Vec<SetArg>,
    where_clause: WhereClause,
    returning: ColumnList,
}

impl UpdateStmt {
    pub fn new(table: impl Into<Ident>) -> Self {
        Self {
            table: table.into(),
            set: Vec::new(),
            where_clause: WhereClause::default(),
            returning: ColumnList::default(),
        }
    }

    /// Add `key = value`. Use [`arg`](crate::arg) for bound values and
    /// [`col`](crate::col) to copy another column.
    pub fn set(mut self, key: impl Into<Column>, value: impl Into<Col>) -> Self {
        self.set.push(SetArg::new(key, value));
        self
    }

    /// Replace all assignments.
    pub fn set_all<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = SetArg>,
    {
        self.set = items.into_iter().collect();
        self
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

    /// Check whether any assignment has been added.
    pub fn has_set(&self) -> bool {
        !self.set.is_empty()
    }
}

impl Node for UpdateStmt {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        w.write_str("UPDATE ")?;
        self.table.write_sql(w)?;
        if !self.set.is_empty() {
            w.write_str(" SET ")?;
            write_list(w, &self.set, ", ")?;
        }
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
