//! Statement builders: SELECT, INSERT, UPDATE and DELETE.
//!
//! Every builder is a plain value. Clause methods take `self` and return the
//! updated statement, so a partially built statement can be cloned and extended
//! in different directions without affecting the original:
//!
//! ```ignore
//! use sqltree::{arg, col, eq, select_from, table, Dialect, Node};
//!
//! let base = select_from(table("users")).select(["id", "name"]);
//! let active = base.clone().and_where(eq(col("active"), arg(true)));
//! let page = active.clone().order_by([col("id").desc()]).limit(20);
//!
//! let built = page.to_sql(Dialect::Numbered)?;
//! ```

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteStmt;
pub use insert::{InsertSource, InsertStmt, InsertValue};
pub use select::SelectStmt;
pub use update::{SetArg, UpdateStmt};

use crate::error::SqlResult;
use crate::expr::Expr;
use crate::ident::Ident;
use crate::node::Node;
use crate::table::Table;
use crate::writer::SqlWriter;

/// Top-level predicate list with an implicit AND: `WHERE (a) AND (b)`.
#[derive(Debug, Clone, Default)]
pub struct WhereClause {
    exprs: Vec<Expr>,
}

impl WhereClause {
    pub fn new<I, E>(exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self {
            exprs: exprs.into_iter().map(Into::into).collect(),
        }
    }

    /// True when no predicate would render anything; the keyword is then omitted.
    pub fn is_empty(&self) -> bool {
        self.exprs.iter().all(Expr::is_empty)
    }

    pub fn push(&mut self, expr: impl Into<Expr>) {
        self.exprs.push(expr.into());
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }

    pub(crate) fn write_with_keyword(&self, w: &mut dyn SqlWriter, keyword: &str) -> SqlResult<()> {
        w.write_str(keyword)?;
        for (i, expr) in self.exprs.iter().filter(|e| !e.is_empty()).enumerate() {
            w.write_str(if i == 0 { " (" } else { " AND (" })?;
            expr.write_sql(w)?;
            w.write_str(")")?;
        }
        Ok(())
    }
}

impl Node for WhereClause {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        self.write_with_keyword(w, "WHERE")
    }
}

/// Any complete statement.
#[derive(Debug, Clone)]
pub enum Statement {
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
}

impl Node for Statement {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match self {
            Statement::Select(s) => s.write_sql(w),
            Statement::Insert(s) => s.write_sql(w),
            Statement::Update(s) => s.write_sql(w),
            Statement::Delete(s) => s.write_sql(w),
        }
    }
}

impl From<SelectStmt> for Statement {
    fn from(s: SelectStmt) -> Self {
        Statement::Select(s)
    }
}

impl From<InsertStmt> for Statement {
    fn from(s: InsertStmt) -> Self {
        Statement::Insert(s)
    }
}

impl From<UpdateStmt> for Statement {
    fn from(s: UpdateStmt) -> Self {
        Statement::Update(s)
    }
}

impl From<DeleteStmt> for Statement {
    fn from(s: DeleteStmt) -> Self {
        Statement::Delete(s)
    }
}

/// Start a SELECT: `SELECT * FROM <table>`.
pub fn select_from(table: impl Into<Table>) -> SelectStmt {
    SelectStmt::new(table)
}

/// Start an INSERT. Without rows it renders `DEFAULT VALUES`.
pub fn insert_into(table: impl Into<Ident>) -> InsertStmt {
    InsertStmt::into_table(table)
}

/// Start an UPDATE.
pub fn update(table: impl Into<Ident>) -> UpdateStmt {
    UpdateStmt::new(table)
}

/// Start a DELETE.
pub fn delete_from(table: impl Into<Ident>) -> DeleteStmt {
    DeleteStmt::new(table)
}

#[cfg(test)]
mod tests;
