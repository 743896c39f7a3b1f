//! Column references, bound arguments, raw fragments and projection items.

use crate::error::SqlResult;
use crate::ident::Ident;
use crate::node::{Node, write_list};
use crate::param::Param;
use crate::writer::SqlWriter;
use tokio_postgres::types::ToSql;

/// A column reference, optionally dotted (`users.id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    ident: Ident,
}

impl Column {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self { ident: name.into() }
    }

    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Alias this column: `<col> AS <alias>`.
    pub fn as_(self, alias: impl Into<Ident>) -> Col {
        Col::from(self).as_(alias)
    }

    /// `<col> ASC`
    pub fn asc(self) -> OrderBy {
        OrderBy::new(self, Some(Direction::Asc))
    }

    /// `<col> DESC`
    pub fn desc(self) -> OrderBy {
        OrderBy::new(self, Some(Direction::Desc))
    }
}

impl Node for Column {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        self.ident.write_sql(w)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::new(name)
    }
}

/// A bound argument: renders as the writer's placeholder and records the value.
#[derive(Debug, Clone)]
pub struct Arg {
    value: Param,
}

impl Arg {
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Param::new(value),
        }
    }

    pub fn from_param(value: Param) -> Self {
        Self { value }
    }

    pub fn param(&self) -> &Param {
        &self.value
    }
}

impl Node for Arg {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        w.push_arg(self.value.clone())
    }
}

/// Literal SQL text with arguments already referenced by the text itself.
///
/// The text is written verbatim and the arguments are appended without
/// placeholders. With the numbered dialect the caller is responsible for
/// numbering them (`$n` must match the argument's final position).
#[derive(Debug, Clone)]
pub struct RawSql {
    sql: String,
    args: Vec<Param>,
}

impl RawSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    pub fn with_params(sql: impl Into<String>, args: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Attach one more pre-bound argument.
    pub fn bind<T: ToSql + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.args.push(Param::new(value));
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Param] {
        &self.args
    }
}

impl Node for RawSql {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        w.write_str(&self.sql)?;
        // Placeholders for these are already part of `sql`.
        w.extend_args(&self.args)
    }
}

/// SQL text with `?` markers that are rewritten into the writer's placeholders.
///
/// Example: `Template::new("a = ? OR b = ?").bind(1).bind(2)` renders
/// `a = $1 OR b = $2` in the numbered dialect. Markers without a matching
/// argument are left as literal `?`.
#[derive(Debug, Clone)]
pub struct Template {
    sql: String,
    args: Vec<Param>,
}

impl Template {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    pub fn with_params(sql: impl Into<String>, args: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    pub fn bind<T: ToSql + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.args.push(Param::new(value));
        self
    }
}

impl Node for Template {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        let mut args = self.args.iter();
        let mut rest = self.sql.as_str();
        while let Some(pos) = rest.find('?') {
            let Some(arg) = args.next() else {
                break;
            };
            w.write_str(&rest[..pos])?;
            w.push_arg(arg.clone())?;
            rest = &rest[pos + 1..];
        }
        w.write_str(rest)
    }
}

/// Aggregate function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggFunc {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggFunc::Count => "COUNT",
            AggFunc::Sum => "SUM",
            AggFunc::Avg => "AVG",
            AggFunc::Min => "MIN",
            AggFunc::Max => "MAX",
        }
    }
}

/// Aggregate call such as `COUNT(*)` or `SUM(amount)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    func: AggFunc,
    /// `None` renders `*`.
    arg: Option<Column>,
    distinct: bool,
}

impl Aggregate {
    pub fn new(func: AggFunc, arg: Option<Column>) -> Self {
        Self {
            func,
            arg,
            distinct: false,
        }
    }

    /// `FUNC(DISTINCT col)`
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn as_(self, alias: impl Into<Ident>) -> Col {
        Col::from(self).as_(alias)
    }
}

impl Node for Aggregate {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        w.write_str(self.func.as_str())?;
        w.write_str("(")?;
        if self.distinct {
            w.write_str("DISTINCT ")?;
        }
        match &self.arg {
            Some(col) => col.write_sql(w)?,
            None => w.write_str("*")?,
        }
        w.write_str(")")
    }
}

/// One item of a projection, GROUP BY, ORDER BY, RETURNING or SET value list.
#[derive(Debug, Clone)]
pub enum Col {
    Column(Column),
    Arg(Arg),
    Raw(RawSql),
    Aggregate(Aggregate),
    /// `<col> AS <alias>`
    Aliased { col: Box<Col>, alias: Ident },
}

impl Col {
    pub fn as_(self, alias: impl Into<Ident>) -> Col {
        Col::Aliased {
            col: Box::new(self),
            alias: alias.into(),
        }
    }

    pub fn asc(self) -> OrderBy {
        OrderBy::new(self, Some(Direction::Asc))
    }

    pub fn desc(self) -> OrderBy {
        OrderBy::new(self, Some(Direction::Desc))
    }

    fn write_prefixed(&self, prefix: Option<&Ident>, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match (self, prefix) {
            (Col::Column(c), Some(prefix)) => c.ident().qualified(prefix).write_sql(w),
            (Col::Aliased { col, alias }, _) => {
                col.write_prefixed(prefix, w)?;
                w.write_str(" AS ")?;
                alias.write_sql(w)
            }
            (Col::Column(c), None) => c.write_sql(w),
            (Col::Arg(a), _) => a.write_sql(w),
            (Col::Raw(r), _) => r.write_sql(w),
            (Col::Aggregate(a), _) => a.write_sql(w),
        }
    }
}

impl Node for Col {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        self.write_prefixed(None, w)
    }
}

impl From<Column> for Col {
    fn from(c: Column) -> Self {
        Col::Column(c)
    }
}

impl From<Arg> for Col {
    fn from(a: Arg) -> Self {
        Col::Arg(a)
    }
}

impl From<RawSql> for Col {
    fn from(r: RawSql) -> Self {
        Col::Raw(r)
    }
}

impl From<Aggregate> for Col {
    fn from(a: Aggregate) -> Self {
        Col::Aggregate(a)
    }
}

impl From<&str> for Col {
    fn from(name: &str) -> Self {
        Col::Column(Column::new(name))
    }
}

/// Comma-separated list of [`Col`] items with an optional list-level prefix.
///
/// With a prefix every plain column is qualified: `prefixed("u", ["id", "name"])`
/// renders `u.id, u.name`. Other items are written unchanged.
#[derive(Debug, Clone, Default)]
pub struct ColumnList {
    prefix: Option<Ident>,
    cols: Vec<Col>,
}

impl ColumnList {
    pub fn new<I, C>(cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Col>,
    {
        Self {
            prefix: None,
            cols: cols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixed<I, C>(prefix: impl Into<Ident>, cols: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Col>,
    {
        Self {
            prefix: Some(prefix.into()),
            cols: cols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cols.len()
    }

    pub fn push(&mut self, col: impl Into<Col>) {
        self.cols.push(col.into());
    }
}

impl Node for ColumnList {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        for (i, col) in self.cols.iter().enumerate() {
            if i > 0 {
                w.write_str(", ")?;
            }
            col.write_prefixed(self.prefix.as_ref(), w)?;
        }
        Ok(())
    }
}

/// Sort direction for ORDER BY items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One ORDER BY item.
#[derive(Debug, Clone)]
pub struct OrderBy {
    col: Col,
    direction: Option<Direction>,
}

impl OrderBy {
    pub fn new(col: impl Into<Col>, direction: Option<Direction>) -> Self {
        Self {
            col: col.into(),
            direction,
        }
    }
}

impl Node for OrderBy {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        self.col.write_sql(w)?;
        match self.direction {
            Some(Direction::Asc) => w.write_str(" ASC"),
            Some(Direction::Desc) => w.write_str(" DESC"),
            None => Ok(()),
        }
    }
}

impl From<Column> for OrderBy {
    fn from(c: Column) -> Self {
        OrderBy::new(c, None)
    }
}

impl From<Col> for OrderBy {
    fn from(c: Col) -> Self {
        OrderBy::new(c, None)
    }
}

impl From<Aggregate> for OrderBy {
    fn from(a: Aggregate) -> Self {
        OrderBy::new(a, None)
    }
}

impl From<&str> for OrderBy {
    fn from(name: &str) -> Self {
        OrderBy::new(name, None)
    }
}

/// Write a plain `Vec<Col>`/`Vec<OrderBy>` as a comma-separated list.
pub(crate) fn write_comma_list<N: Node>(w: &mut dyn SqlWriter, items: &[N]) -> SqlResult<()> {
    write_list(w, items, ", ")
}

/// Column reference: `col("users.id")`.
pub fn col(name: impl Into<Ident>) -> Column {
    Column::new(name)
}

/// Bound argument: `arg(10)`.
pub fn arg<T: ToSql + Send + Sync + 'static>(value: T) -> Arg {
    Arg::new(value)
}

/// Raw SQL fragment. Attach pre-bound arguments with [`RawSql::bind`].
pub fn raw(sql: impl Into<String>) -> RawSql {
    RawSql::new(sql)
}

/// Template fragment whose `?` markers become bound placeholders.
pub fn template(sql: impl Into<String>) -> Template {
    Template::new(sql)
}

/// `COUNT(*)`
pub fn count_all() -> Aggregate {
    Aggregate::new(AggFunc::Count, None)
}

/// `COUNT(col)`
pub fn count(col: impl Into<Column>) -> Aggregate {
    Aggregate::new(AggFunc::Count, Some(col.into()))
}

/// `SUM(col)`
pub fn sum(col: impl Into<Column>) -> Aggregate {
    Aggregate::new(AggFunc::Sum, Some(col.into()))
}

/// `AVG(col)`
pub fn avg(col: impl Into<Column>) -> Aggregate {
    Aggregate::new(AggFunc::Avg, Some(col.into()))
}

/// `MIN(col)`
pub fn min(col: impl Into<Column>) -> Aggregate {
    Aggregate::new(AggFunc::Min, Some(col.into()))
}

/// `MAX(col)`
pub fn max(col: impl Into<Column>) -> Aggregate {
    Aggregate::new(AggFunc::Max, Some(col.into()))
}
