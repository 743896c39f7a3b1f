//! INSERT statement.

use crate::column::{Arg, Col, Column, ColumnList, RawSql};
use crate::error::SqlResult;
use crate::ident::Ident;
use crate::node::{Node, write_list};
use crate::stmt::SelectStmt;
use crate::writer::SqlWriter;
use tokio_postgres::types::ToSql;

/// One value inside a VALUES row.
#[derive(Debug, Clone)]
pub enum InsertValue {
    Arg(Arg),
    Raw(RawSql),
    /// `DEFAULT`
    Default,
}

impl InsertValue {
    pub fn arg<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        InsertValue::Arg(Arg::new(value))
    }
}

impl Node for InsertValue {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match self {
            InsertValue::Arg(a) => a.write_sql(w),
            InsertValue::Raw(r) => r.write_sql(w),
            InsertValue::Default => w.write_str("DEFAULT"),
        }
    }
}

impl From<Arg> for InsertValue {
    fn from(a: Arg) -> Self {
        InsertValue::Arg(a)
    }
}

impl From<RawSql> for InsertValue {
    fn from(r: RawSql) -> Self {
        InsertValue::Raw(r)
    }
}

/// Where inserted rows come from.
#[derive(Debug, Clone)]
pub enum InsertSource {
    /// `VALUES (..), (..)`; empty rows are skipped and no rows renders `DEFAULT VALUES`.
    Values(Vec<Vec<InsertValue>>),
    Select(Box<SelectStmt>),
}

impl Default for InsertSource {
    fn default() -> Self {
        InsertSource::Values(Vec::new())
    }
}

impl Node for InsertSource {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match self {
            InsertSource::Values(rows) if rows.iter().all(Vec::is_empty) => {
                w.write_str("DEFAULT VALUES")
            }
            InsertSource::Values(rows) => {
                w.write_str("VALUES ")?;
                for (i, row) in rows.iter().filter(|r| !r.is_empty()).enumerate() {
                    if i > 0 {
                        w.write_str(", ")?;
                    }
                    w.write_str("(")?;
                    write_list(w, row, ", ")?;
                    w.write_str(")")?;
                }
                Ok(())
            }
            InsertSource::Select(select) => select.write_sql(w),
        }
    }
}

impl From<SelectStmt> for InsertSource {
    fn from(select: SelectStmt) -> Self {
        InsertSource::Select(Box::new(select))
    }
}

/// `INSERT INTO <table>[(<cols>)] <source>[ RETURNING <cols>]`
#[derive(Debug, Clone)]
#[must_use]
pub struct InsertStmt {
    table: Ident,
    columns: Vec<Column>,
    source: InsertSource,
    returning: ColumnList,
}

impl InsertStmt {
    pub fn new<I, C>(table: impl Into<Ident>, columns: I, source: impl Into<InsertSource>) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            source: source.into(),
            returning: ColumnList::default(),
        }
    }

    /// Empty INSERT into `table`; renders `DEFAULT VALUES` until rows are added.
    pub fn into_table(table: impl Into<Ident>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            source: InsertSource::default(),
            returning: ColumnList::default(),
        }
    }

    /// Replace the target column list.
    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one VALUES row.
    ///
    /// Replaces a SELECT source if one was set.
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<InsertValue>,
    {
        let row: Vec<InsertValue> = row.into_iter().map(Into::into).collect();
        match &mut self.source {
            InsertSource::Values(rows) => rows.push(row),
            InsertSource::Select(_) => self.source = InsertSource::Values(vec![row]),
        }
        self
    }

    /// Insert the rows produced by a SELECT.
    pub fn from_select(mut self, select: SelectStmt) -> Self {
        self.source = InsertSource::Select(Box::new(select));
        self
    }

    /// Drop any rows and insert a single `DEFAULT VALUES` row.
    pub fn default_values(mut self) -> Self {
        self.source = InsertSource::default();
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

    /// Number of non-empty VALUES rows (0 for a SELECT source).
    pub fn row_count(&self) -> usize {
        match &self.source {
            InsertSource::Values(rows) => rows.iter().filter(|r| !r.is_empty()).count(),
            InsertSource::Select(_) => 0,
        }
    }
}

impl Node for InsertStmt {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        w.write_str("INSERT INTO ")?;
        self.table.write_sql(w)?;
        if !self.columns.is_empty() {
            w.write_str("(")?;
            write_list(w, &self.columns, ", ")?;
            w.write_str(")")?;
        }
        w.write_str(" ")?;
        self.source.write_sql(w)?;
        if !self.returning.is_empty() {
            w.write_str(" RETURNING ")?;
            self.returning.write_sql(w)?;
        }
        Ok(())
    }
}
