//! FROM sources and join trees.
//!
//! Joins are binary nodes that own both operands. Chaining join methods on a
//! [`Table`] wraps the current tree on the left, so the result is always
//! left-deep and renders in the order the calls were made:
//!
//! ```ignore
//! use sqltree::{on, table};
//!
//! // users LEFT JOIN posts ON users.id=posts.user_id RIGHT JOIN cities ON ...
//! let from = table("users")
//!     .left_join(table("posts"), on("users.id", "posts.user_id"))
//!     .right_join(table("cities"), on("users.city_id", "cities.id"));
//! ```

use crate::column::RawSql;
use crate::error::SqlResult;
use crate::expr::OnExpr;
use crate::ident::Ident;
use crate::node::Node;
use crate::stmt::SelectStmt;
use crate::writer::SqlWriter;

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    FullOuter,
    Cross,
}

impl JoinKind {
    /// Keyword written before `JOIN`.
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::FullOuter => "FULL OUTER",
            JoinKind::Cross => "CROSS",
        }
    }
}

/// `<left> <KIND> JOIN <right>[ ON <cond>]`
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub left: Table,
    pub right: Table,
    /// Always `None` for CROSS joins.
    pub on: Option<OnExpr>,
}

impl Node for Join {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        self.left.write_sql(w)?;
        w.write_str(" ")?;
        w.write_str(self.kind.keyword())?;
        w.write_str(" JOIN ")?;
        self.right.write_sql(w)?;
        if let Some(on) = &self.on {
            w.write_str(" ON ")?;
            on.write_sql(w)?;
        }
        Ok(())
    }
}

/// A FROM source or join operand.
#[derive(Debug, Clone)]
pub enum Table {
    /// Bare table name.
    Name(Ident),
    /// `<table> AS <alias>`
    Aliased { table: Ident, alias: Ident },
    /// Join result.
    Join(Box<Join>),
    /// `(<select>) AS <alias>`
    SubSelect { select: Box<SelectStmt>, alias: Ident },
    Raw(RawSql),
    /// Aliased join or raw source: `(<join>) AS <alias>`, `<raw> AS <alias>`
    AliasedSource { source: Box<Table>, alias: Ident },
}

impl Table {
    pub fn new(name: impl Into<Ident>) -> Self {
        Table::Name(name.into())
    }

    /// Alias this source: `users AS u`.
    ///
    /// Re-aliasing replaces the previous alias. A join is parenthesized:
    /// `(a INNER JOIN b ON ...) AS j`.
    pub fn as_(self, alias: impl Into<Ident>) -> Self {
        let alias = alias.into();
        match self {
            Table::Name(table) | Table::Aliased { table, .. } => Table::Aliased { table, alias },
            Table::SubSelect { select, .. } => Table::SubSelect { select, alias },
            Table::AliasedSource { source, .. } => Table::AliasedSource { source, alias },
            source @ (Table::Join(_) | Table::Raw(_)) => Table::AliasedSource {
                source: Box::new(source),
                alias,
            },
        }
    }

    fn join(self, kind: JoinKind, right: Table, on: Option<OnExpr>) -> Self {
        Table::Join(Box::new(Join {
            kind,
            left: self,
            right,
            on,
        }))
    }

    pub fn inner_join(self, right: impl Into<Table>, on: impl Into<OnExpr>) -> Self {
        self.join(JoinKind::Inner, right.into(), Some(on.into()))
    }

    pub fn left_join(self, right: impl Into<Table>, on: impl Into<OnExpr>) -> Self {
        self.join(JoinKind::Left, right.into(), Some(on.into()))
    }

    pub fn right_join(self, right: impl Into<Table>, on: impl Into<OnExpr>) -> Self {
        self.join(JoinKind::Right, right.into(), Some(on.into()))
    }

    pub fn full_outer_join(self, right: impl Into<Table>, on: impl Into<OnExpr>) -> Self {
        self.join(JoinKind::FullOuter, right.into(), Some(on.into()))
    }

    pub fn cross_join(self, right: impl Into<Table>) -> Self {
        self.join(JoinKind::Cross, right.into(), None)
    }
}

impl Node for Table {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match self {
            Table::Name(name) => name.write_sql(w),
            Table::Aliased { table, alias } => {
                table.write_sql(w)?;
                w.write_str(" AS ")?;
                alias.write_sql(w)
            }
            Table::Join(join) => join.write_sql(w),
            Table::SubSelect { select, alias } => {
                w.write_str("(")?;
                select.write_sql(w)?;
                w.write_str(") AS ")?;
                alias.write_sql(w)
            }
            Table::Raw(raw) => raw.write_sql(w),
            Table::AliasedSource { source, alias } => {
                if matches!(**source, Table::Join(_)) {
                    w.write_str("(")?;
                    source.write_sql(w)?;
                    w.write_str(")")?;
                } else {
                    source.write_sql(w)?;
                }
                w.write_str(" AS ")?;
                alias.write_sql(w)
            }
        }
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Table::new(name)
    }
}

impl From<Ident> for Table {
    fn from(name: Ident) -> Self {
        Table::Name(name)
    }
}

impl From<RawSql> for Table {
    fn from(raw: RawSql) -> Self {
        Table::Raw(raw)
    }
}

impl From<Join> for Table {
    fn from(join: Join) -> Self {
        Table::Join(Box::new(join))
    }
}

/// Table reference: `table("users")`.
pub fn table(name: impl Into<Ident>) -> Table {
    Table::new(name)
}

pub fn inner_join(left: impl Into<Table>, right: impl Into<Table>, on: impl Into<OnExpr>) -> Table {
    left.into().inner_join(right, on)
}

pub fn left_join(left: impl Into<Table>, right: impl Into<Table>, on: impl Into<OnExpr>) -> Table {
    left.into().left_join(right, on)
}

pub fn right_join(left: impl Into<Table>, right: impl Into<Table>, on: impl Into<OnExpr>) -> Table {
    left.into().right_join(right, on)
}

pub fn full_outer_join(
    left: impl Into<Table>,
    right: impl Into<Table>,
    on: impl Into<OnExpr>,
) -> Table {
    left.into().full_outer_join(right, on)
}

pub fn cross_join(left: impl Into<Table>, right: impl Into<Table>) -> Table {
    left.into().cross_join(right)
}
