//! Boolean expression tree for WHERE/HAVING/ON conditions.
//!
//! The nesting of the tree is the precedence: AND/OR groups parenthesize every
//! child, so mixing operators can never be ambiguous.
//!
//! ```ignore
//! use sqltree::{and, col, eq, not};
//!
//! // NOT ((a=b) AND (c=d))
//! let e = not(and([eq(col("a"), col("b")), eq(col("c"), col("d"))]));
//! ```

use crate::column::{Arg, Column, RawSql, Template};
use crate::error::SqlResult;
use crate::node::{Node, write_list};
use crate::stmt::SelectStmt;
use crate::writer::SqlWriter;

/// Anything usable on either side of a comparison.
#[derive(Debug, Clone)]
pub enum Comparable {
    Column(Column),
    Arg(Arg),
    Raw(RawSql),
}

impl Node for Comparable {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match self {
            Comparable::Column(c) => c.write_sql(w),
            Comparable::Arg(a) => a.write_sql(w),
            Comparable::Raw(r) => r.write_sql(w),
        }
    }
}

impl From<Column> for Comparable {
    fn from(c: Column) -> Self {
        Comparable::Column(c)
    }
}

impl From<Arg> for Comparable {
    fn from(a: Arg) -> Self {
        Comparable::Arg(a)
    }
}

impl From<RawSql> for Comparable {
    fn from(r: RawSql) -> Self {
        Comparable::Raw(r)
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
}

impl CmpOp {
    /// Operator text as written between the operands.
    pub fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Like => " LIKE ",
            CmpOp::Ilike => " ILIKE ",
        }
    }
}

/// Right-hand side of an IN expression.
#[derive(Debug, Clone)]
pub enum InSource {
    List(Vec<Comparable>),
    Select(Box<SelectStmt>),
}

/// Boolean expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    /// `left<op>right`, no surrounding parentheses.
    Compare {
        left: Comparable,
        op: CmpOp,
        right: Comparable,
    },

    /// `(a) AND (b) ...`; empty renders nothing.
    And(Vec<Expr>),

    /// `(a) OR (b) ...`; empty renders nothing.
    Or(Vec<Expr>),

    /// `NOT (inner)`
    Not(Box<Expr>),

    /// `operand IS NULL` / `operand IS NOT NULL`
    NullCheck { operand: Comparable, is_null: bool },

    /// `exists(<select>)`
    Exists(Box<SelectStmt>),

    /// `left IN (...)` / `left NOT IN (...)`
    In {
        left: Comparable,
        source: InSource,
        negated: bool,
    },

    /// Literal fragment with pre-bound arguments.
    Raw(RawSql),

    /// Fragment whose `?` markers become placeholders.
    Template(Template),
}

impl Expr {
    pub fn compare(left: impl Into<Comparable>, op: CmpOp, right: impl Into<Comparable>) -> Self {
        Expr::Compare {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// Check whether this renders nothing: an AND/OR group whose children are
    /// all empty, or a NOT around such a group.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().all(Expr::is_empty),
            Expr::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }
}

impl Node for Expr {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match self {
            Expr::Compare { left, op, right } => write_compare(w, left, *op, right),
            Expr::And(exprs) => write_group(w, exprs, " AND ", Expr::is_empty),
            Expr::Or(exprs) => write_group(w, exprs, " OR ", Expr::is_empty),
            Expr::Not(inner) if inner.is_empty() => Ok(()),
            Expr::Not(inner) => {
                w.write_str("NOT (")?;
                inner.write_sql(w)?;
                w.write_str(")")
            }
            Expr::NullCheck { operand, is_null } => {
                operand.write_sql(w)?;
                w.write_str(if *is_null { " IS NULL" } else { " IS NOT NULL" })
            }
            Expr::Exists(select) => {
                w.write_str("exists(")?;
                select.write_sql(w)?;
                w.write_str(")")
            }
            Expr::In {
                left,
                source: InSource::List(values),
                negated,
            } => write_in_list(w, left, values, *negated),
            Expr::In {
                left,
                source: InSource::Select(select),
                negated,
            } => {
                left.write_sql(w)?;
                w.write_str(if *negated { " NOT IN (" } else { " IN (" })?;
                select.write_sql(w)?;
                w.write_str(")")
            }
            Expr::Raw(raw) => raw.write_sql(w),
            Expr::Template(t) => t.write_sql(w),
        }
    }
}

fn write_compare(
    w: &mut dyn SqlWriter,
    left: &Comparable,
    op: CmpOp,
    right: &Comparable,
) -> SqlResult<()> {
    left.write_sql(w)?;
    w.write_str(op.as_str())?;
    right.write_sql(w)
}

/// Parenthesize each non-empty child and join with `keyword`.
fn write_group<N: Node>(
    w: &mut dyn SqlWriter,
    children: &[N],
    keyword: &str,
    is_empty: fn(&N) -> bool,
) -> SqlResult<()> {
    for (i, child) in children.iter().filter(|c| !is_empty(*c)).enumerate() {
        if i > 0 {
            w.write_str(keyword)?;
        }
        w.write_str("(")?;
        child.write_sql(w)?;
        w.write_str(")")?;
    }
    Ok(())
}

fn write_in_list(
    w: &mut dyn SqlWriter,
    left: &Comparable,
    values: &[Comparable],
    negated: bool,
) -> SqlResult<()> {
    // x IN () is not valid SQL; an empty set matches nothing.
    if values.is_empty() {
        return w.write_str(if negated { "1=1" } else { "1=0" });
    }
    left.write_sql(w)?;
    w.write_str(if negated { " NOT IN (" } else { " IN (" })?;
    write_list(w, values, ", ")?;
    w.write_str(")")
}

/// Equality produced by [`eq`]; usable both as a WHERE predicate and as a JOIN condition.
#[derive(Debug, Clone)]
pub struct EqExpr {
    pub left: Comparable,
    pub right: Comparable,
}

impl Node for EqExpr {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        write_compare(w, &self.left, CmpOp::Eq, &self.right)
    }
}

impl From<EqExpr> for Expr {
    fn from(e: EqExpr) -> Self {
        Expr::Compare {
            left: e.left,
            op: CmpOp::Eq,
            right: e.right,
        }
    }
}

impl From<RawSql> for Expr {
    fn from(r: RawSql) -> Self {
        Expr::Raw(r)
    }
}

impl From<Template> for Expr {
    fn from(t: Template) -> Self {
        Expr::Template(t)
    }
}

/// JOIN ... ON condition: equality, AND, OR or IN.
#[derive(Debug, Clone)]
pub enum OnExpr {
    Eq { left: Comparable, right: Comparable },
    And(Vec<OnExpr>),
    Or(Vec<OnExpr>),
    In { left: Comparable, values: Vec<Comparable> },
}

impl OnExpr {
    pub fn and<I, E>(exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<OnExpr>,
    {
        OnExpr::And(exprs.into_iter().map(Into::into).collect())
    }

    pub fn or<I, E>(exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<OnExpr>,
    {
        OnExpr::Or(exprs.into_iter().map(Into::into).collect())
    }

    pub fn in_list<I, C>(left: impl Into<Comparable>, values: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Comparable>,
    {
        OnExpr::In {
            left: left.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl OnExpr {
    /// Check whether this is an AND/OR group with nothing to render.
    pub fn is_empty(&self) -> bool {
        match self {
            OnExpr::And(exprs) | OnExpr::Or(exprs) => exprs.iter().all(OnExpr::is_empty),
            _ => false,
        }
    }
}

impl Node for OnExpr {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        match self {
            OnExpr::Eq { left, right } => write_compare(w, left, CmpOp::Eq, right),
            OnExpr::And(exprs) => write_group(w, exprs, " AND ", OnExpr::is_empty),
            OnExpr::Or(exprs) => write_group(w, exprs, " OR ", OnExpr::is_empty),
            OnExpr::In { left, values } => write_in_list(w, left, values, false),
        }
    }
}

impl From<EqExpr> for OnExpr {
    fn from(e: EqExpr) -> Self {
        OnExpr::Eq {
            left: e.left,
            right: e.right,
        }
    }
}

/// `a=b`
pub fn eq(a: impl Into<Comparable>, b: impl Into<Comparable>) -> EqExpr {
    EqExpr {
        left: a.into(),
        right: b.into(),
    }
}

/// Shorthand for a column-to-column join condition: `on("users.id", "posts.user_id")`.
pub fn on(a: &str, b: &str) -> OnExpr {
    eq(Column::new(a), Column::new(b)).into()
}

/// `a<>b`
pub fn ne(a: impl Into<Comparable>, b: impl Into<Comparable>) -> Expr {
    Expr::compare(a, CmpOp::Ne, b)
}

/// `a>b`
pub fn gt(a: impl Into<Comparable>, b: impl Into<Comparable>) -> Expr {
    Expr::compare(a, CmpOp::Gt, b)
}

/// `a>=b`
pub fn gte(a: impl Into<Comparable>, b: impl Into<Comparable>) -> Expr {
    Expr::compare(a, CmpOp::Gte, b)
}

/// `a<b`
pub fn lt(a: impl Into<Comparable>, b: impl Into<Comparable>) -> Expr {
    Expr::compare(a, CmpOp::Lt, b)
}

/// `a<=b`
pub fn lte(a: impl Into<Comparable>, b: impl Into<Comparable>) -> Expr {
    Expr::compare(a, CmpOp::Lte, b)
}

/// `a LIKE b`
pub fn like(a: impl Into<Comparable>, b: impl Into<Comparable>) -> Expr {
    Expr::compare(a, CmpOp::Like, b)
}

/// `a ILIKE b`
pub fn ilike(a: impl Into<Comparable>, b: impl Into<Comparable>) -> Expr {
    Expr::compare(a, CmpOp::Ilike, b)
}

pub fn and<I, E>(exprs: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::And(exprs.into_iter().map(Into::into).collect())
}

pub fn or<I, E>(exprs: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::Or(exprs.into_iter().map(Into::into).collect())
}

pub fn not(expr: impl Into<Expr>) -> Expr {
    Expr::Not(Box::new(expr.into()))
}

pub fn is_null(operand: impl Into<Comparable>) -> Expr {
    Expr::NullCheck {
        operand: operand.into(),
        is_null: true,
    }
}

pub fn is_not_null(operand: impl Into<Comparable>) -> Expr {
    Expr::NullCheck {
        operand: operand.into(),
        is_null: false,
    }
}

pub fn exists(select: SelectStmt) -> Expr {
    Expr::Exists(Box::new(select))
}

/// `left IN (v1, v2, ...)`; an empty list renders `1=0`.
pub fn in_list<I, C>(left: impl Into<Comparable>, values: I) -> Expr
where
    I: IntoIterator<Item = C>,
    C: Into<Comparable>,
{
    Expr::In {
        left: left.into(),
        source: InSource::List(values.into_iter().map(Into::into).collect()),
        negated: false,
    }
}

/// `left NOT IN (v1, v2, ...)`; an empty list renders `1=1`.
pub fn not_in<I, C>(left: impl Into<Comparable>, values: I) -> Expr
where
    I: IntoIterator<Item = C>,
    C: Into<Comparable>,
{
    Expr::In {
        left: left.into(),
        source: InSource::List(values.into_iter().map(Into::into).collect()),
        negated: true,
    }
}

/// `left IN (<select>)`
pub fn in_select(left: impl Into<Comparable>, select: SelectStmt) -> Expr {
    Expr::In {
        left: left.into(),
        source: InSource::Select(Box::new(select)),
        negated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{arg, col, raw};
    use crate::writer::Dialect;

    fn sql(node: &dyn Node) -> String {
        node.to_sql(Dialect::Positional).unwrap().sql
    }

    #[test]
    fn equality_has_no_parentheses() {
        assert_eq!(sql(&eq(col("a"), col("b"))), "a=b");
    }

    #[test]
    fn single_child_group_has_no_keyword() {
        assert_eq!(sql(&or([eq(col("a"), col("b"))])), "(a=b)");
        assert_eq!(sql(&and([eq(col("a"), col("b"))])), "(a=b)");
    }

    #[test]
    fn empty_group_renders_nothing() {
        assert_eq!(sql(&and(Vec::<Expr>::new())), "");
        assert_eq!(sql(&or(Vec::<Expr>::new())), "");
        assert!(and(Vec::<Expr>::new()).is_empty());
    }

    #[test]
    fn empty_children_are_skipped() {
        let e = and([
            and(Vec::<Expr>::new()),
            eq(col("a"), col("b")).into(),
            or([and(Vec::<Expr>::new())]),
            eq(col("c"), col("d")).into(),
        ]);
        assert_eq!(sql(&e), "(a=b) AND (c=d)");
        assert!(or([and(Vec::<Expr>::new())]).is_empty());
        assert!(!e.is_empty());
    }

    #[test]
    fn not_of_empty_group_renders_nothing() {
        let e = not(and(Vec::<Expr>::new()));
        assert!(e.is_empty());
        assert_eq!(sql(&e), "");
    }

    #[test]
    fn empty_on_children_are_skipped() {
        let e = OnExpr::and([OnExpr::or(Vec::<OnExpr>::new()), on("a.id", "b.id")]);
        assert_eq!(sql(&e), "(a.id=b.id)");
        assert!(OnExpr::and(Vec::<OnExpr>::new()).is_empty());
    }

    #[test]
    fn not_wraps_child() {
        let e = not(and([eq(col("a"), col("b")), eq(col("c"), col("d"))]));
        assert_eq!(sql(&e), "NOT ((a=b) AND (c=d))");
    }

    #[test]
    fn nested_groups() {
        let e = or([
            and([eq(col("a"), arg(1i32)), eq(col("b"), arg(2i32))]),
            eq(col("c"), arg(3i32)).into(),
        ]);
        let built = e.to_sql(Dialect::Numbered).unwrap();
        assert_eq!(built.sql, r#"(("a"=$1) AND ("b"=$2)) OR ("c"=$3)"#);
        assert_eq!(format!("{:?}", built.params), "[1, 2, 3]");
    }

    #[test]
    fn null_checks() {
        assert_eq!(sql(&is_null(col("deleted_at"))), "deleted_at IS NULL");
        assert_eq!(sql(&is_not_null(col("deleted_at"))), "deleted_at IS NOT NULL");
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(sql(&ne(col("a"), arg(1i32))), "a<>?");
        assert_eq!(sql(&gte(col("age"), arg(18i32))), "age>=?");
        assert_eq!(sql(&lt(col("age"), arg(65i32))), "age<?");
        assert_eq!(sql(&like(col("name"), arg("a%"))), "name LIKE ?");
        assert_eq!(sql(&ilike(col("name"), arg("a%"))), "name ILIKE ?");
    }

    #[test]
    fn in_list_is_parenthesized() {
        let e = in_list(col("id"), [arg(1i32), arg(2i32), arg(3i32)]);
        let built = e.to_sql(Dialect::Numbered).unwrap();
        assert_eq!(built.sql, r#""id" IN ($1, $2, $3)"#);
        assert_eq!(built.params.len(), 3);
    }

    #[test]
    fn empty_in_lists() {
        assert_eq!(sql(&in_list(col("id"), Vec::<Arg>::new())), "1=0");
        assert_eq!(sql(&not_in(col("id"), Vec::<Arg>::new())), "1=1");
    }

    #[test]
    fn not_in_list() {
        assert_eq!(sql(&not_in(col("role"), [arg("admin")])), "role NOT IN (?)");
    }

    #[test]
    fn raw_and_template_predicates() {
        let e = and([
            Expr::from(raw("age > $1").bind(18i32)),
            Expr::from(crate::column::template("name = ?").bind("bob")),
        ]);
        let built = e.to_sql(Dialect::Numbered).unwrap();
        assert_eq!(built.sql, r#"(age > $1) AND (name = $2)"#);
        assert_eq!(format!("{:?}", built.params), r#"[18, "bob"]"#);
    }

    #[test]
    fn on_expressions() {
        let e = OnExpr::and([
            on("u.id", "p.user_id"),
            OnExpr::in_list(col("p.kind"), [arg(1i32), arg(2i32)]),
        ]);
        assert_eq!(sql(&e), "(u.id=p.user_id) AND (p.kind IN (?, ?))");
        assert_eq!(sql(&OnExpr::or([eq(col("a"), col("b"))])), "(a=b)");
    }
}
