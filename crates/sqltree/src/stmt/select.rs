//! SELECT statement.

use crate::column::{Col, ColumnList, OrderBy, write_comma_list};
use crate::error::SqlResult;
use crate::expr::Expr;
use crate::ident::Ident;
use crate::node::Node;
use crate::stmt::WhereClause;
use crate::table::Table;
use crate::writer::SqlWriter;

/// `SELECT [DISTINCT] <cols|*> FROM <table> [WHERE] [GROUP BY] [HAVING] [ORDER BY]
/// [LIMIT] [OFFSET] [FOR UPDATE]`
///
/// Empty clauses are skipped together with their separating space.
#[derive(Debug, Clone)]
#[must_use]
pub struct SelectStmt {
    /// FROM source
    from: Table,
    /// Projection; empty renders `*`
    columns: ColumnList,
    distinct: bool,
    where_clause: WhereClause,
    group_by: Vec<Col>,
    having: WhereClause,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
    for_update: bool,
}

impl SelectStmt {
    /// `SELECT * FROM <table>`
    pub fn new(from: impl Into<Table>) -> Self {
        Self {
            from: from.into(),
            columns: ColumnList::default(),
            distinct: false,
            where_clause: WhereClause::default(),
            group_by: Vec::new(),
            having: WhereClause::default(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            for_update: false,
        }
    }

    // ==================== Projection ====================

    /// Replace the projection.
    pub fn select<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Col>,
    {
        self.columns = ColumnList::new(cols);
        self
    }

    /// Replace the projection with a prepared (possibly prefixed) list.
    pub fn select_list(mut self, cols: ColumnList) -> Self {
        self.columns = cols;
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    // ==================== FROM ====================

    /// Replace the FROM source.
    pub fn from(mut self, from: impl Into<Table>) -> Self {
        self.from = from.into();
        self
    }

    // ==================== WHERE / HAVING ====================

    /// Replace the WHERE predicates. They are AND-ed, each in its own parentheses.
    pub fn where_clause<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.where_clause = WhereClause::new(exprs);
        self
    }

    /// Add one WHERE predicate.
    pub fn and_where(mut self, expr: impl Into<Expr>) -> Self {
        self.where_clause.push(expr);
        self
    }

    pub fn having<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.having = WhereClause::new(exprs);
        self
    }

    // ==================== Ordering & Grouping ====================

    pub fn group_by<I, C>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Col>,
    {
        self.group_by = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn order_by<I, O>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OrderBy>,
    {
        self.order_by = items.into_iter().map(Into::into).collect();
        self
    }

    // ==================== Pagination & locking ====================

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1).saturating_mul(size));
        self
    }

    /// Append `FOR UPDATE`; always the last clause.
    pub fn for_update(mut self) -> Self {
        self.for_update = true;
        self
    }

    /// Use this SELECT as a derived table: `(<select>) AS <alias>`.
    pub fn as_(self, alias: impl Into<Ident>) -> Table {
        Table::SubSelect {
            select: Box::new(self),
            alias: alias.into(),
        }
    }
}

impl Node for SelectStmt {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        w.write_str("SELECT ")?;
        if self.distinct {
            w.write_str("DISTINCT ")?;
        }
        if self.columns.is_empty() {
            w.write_str("*")?;
        } else {
            self.columns.write_sql(w)?;
        }

        w.write_str(" FROM ")?;
        self.from.write_sql(w)?;

        if !self.where_clause.is_empty() {
            w.write_str(" ")?;
            self.where_clause.write_sql(w)?;
        }

        if !self.group_by.is_empty() {
            w.write_str(" GROUP BY ")?;
            write_comma_list(w, &self.group_by)?;
        }

        if !self.having.is_empty() {
            w.write_str(" ")?;
            self.having.write_with_keyword(w, "HAVING")?;
        }

        if !self.order_by.is_empty() {
            w.write_str(" ORDER BY ")?;
            write_comma_list(w, &self.order_by)?;
        }

        if let Some(limit) = self.limit {
            w.write_str(&format!(" LIMIT {limit}"))?;
        }

        if let Some(offset) = self.offset {
            w.write_str(&format!(" OFFSET {offset}"))?;
        }

        if self.for_update {
            w.write_str(" FOR UPDATE")?;
        }
        Ok(())
    }
}
