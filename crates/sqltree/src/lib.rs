//! # sqltree
//!
//! Composable SQL statement trees rendered into dialect-specific SQL text plus an
//! ordered list of bound arguments.
//!
//! ## Features
//!
//! - **Values, not mutation**: every builder method takes `self` and returns a new value
//! - **Parameterized by construction**: [`arg`] values always become placeholders
//! - **Two dialects**: positional `?` with bare identifiers, numbered `$N` with quoted identifiers
//! - **Pluggable output**: render into a [`SqlBuffer`], an [`IoWriter`], or your own [`SqlWriter`]
//! - **tokio-postgres ready**: [`BuiltQuery::params_ref`] feeds `client.query` directly
//!
//! ## Example
//!
//! ```ignore
//! use sqltree::{arg, col, eq, exists, not, on, select_from, table, Dialect, Node};
//!
//! let inactive = select_from(table("statuses")).where_clause([
//!     eq(col("statuses.active"), arg(true)),
//!     eq(col("users.id"), col("statuses.user_id")),
//! ]);
//!
//! let q = select_from(table("users").left_join(table("cities"), on("users.city_id", "cities.id")))
//!     .select(["users.id", "cities.name"])
//!     .and_where(not(exists(inactive)))
//!     .order_by([col("users.id").desc()])
//!     .limit(10);
//!
//! let built = q.to_sql(Dialect::Numbered)?;
//! let rows = client.query(&built.sql, &built.params_ref()).await?;
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod expr;
pub mod ident;
pub mod node;
pub mod param;
pub mod stmt;
pub mod table;
pub mod writer;

pub use column::{
    AggFunc, Aggregate, Arg, Col, Column, ColumnList, Direction, OrderBy, RawSql, Template, arg,
    avg, col, count, count_all, max, min, raw, sum, template,
};
pub use config::RenderConfig;
pub use error::{SqlError, SqlResult};
pub use expr::{
    CmpOp, Comparable, EqExpr, Expr, InSource, OnExpr, and, eq, exists, gt, gte, ilike, in_list,
    in_select, is_not_null, is_null, like, lt, lte, ne, not, not_in, on, or,
};
pub use ident::Ident;
pub use node::{BuiltQuery, Node, render};
pub use param::{Param, ParamList};
pub use stmt::{
    DeleteStmt, InsertSource, InsertStmt, InsertValue, SelectStmt, SetArg, Statement, UpdateStmt,
    WhereClause, delete_from, insert_into, select_from, update,
};
pub use table::{
    Join, JoinKind, Table, cross_join, full_outer_join, inner_join, left_join, right_join, table,
};
pub use writer::{Dialect, IoWriter, SqlBuffer, SqlWriter};
