use super::*;
use crate::column::{arg, col, raw, template};
use crate::expr::{and, eq, exists, in_select, not, on, or};
use crate::table::{left_join, table};
use crate::writer::{Dialect, IoWriter, SqlBuffer};

fn positional(node: &dyn Node) -> (String, String) {
    let built = node.to_sql(Dialect::Positional).unwrap();
    (built.sql, format!("{:?}", built.params))
}

fn numbered(node: &dyn Node) -> (String, String) {
    let built = node.to_sql(Dialect::Numbered).unwrap();
    (built.sql, format!("{:?}", built.params))
}

fn placeholder_count(sql: &str, dialect: Dialect) -> usize {
    match dialect {
        Dialect::Positional => sql.matches('?').count(),
        Dialect::Numbered => sql.matches('$').count(),
    }
}

// ==================== SELECT ====================

#[test]
fn select_star() {
    assert_eq!(positional(&select_from(table("t"))).0, "SELECT * FROM t");
}

#[test]
fn select_where_positional() {
    let s = select_from(table("users")).and_where(eq(col("city"), arg(10i32)));
    let (sql, args) = positional(&s);
    assert_eq!(sql, "SELECT * FROM users WHERE (city=?)");
    assert_eq!(args, "[10]");
}

#[test]
fn select_where_numbered() {
    let s = select_from(table("users")).and_where(eq(col("city"), arg(10i32)));
    let (sql, args) = numbered(&s);
    assert_eq!(sql, r#"SELECT * FROM "users" WHERE ("city"=$1)"#);
    assert_eq!(args, "[10]");
}

#[test]
fn not_exists_correlated_subquery() {
    let statuses = select_from(table("statuses")).where_clause([
        eq(col("statuses.active"), arg(true)),
        eq(col("users.id"), col("statuses.user_id")),
    ]);
    let s = select_from(table("users").as_("users")).and_where(not(exists(statuses)));
    let (sql, args) = positional(&s);
    assert_eq!(
        sql,
        "SELECT * FROM users AS users WHERE (NOT (exists(SELECT * FROM statuses \
         WHERE (statuses.active=?) AND (users.id=statuses.user_id))))"
    );
    assert_eq!(args, "[true]");
}

#[test]
fn or_of_ands() {
    let s = select_from(table("users")).and_where(or([
        and([eq(col("a"), arg(1i32)), eq(col("b"), arg(2i32))]),
        and([eq(col("c"), arg(3i32)), eq(col("d"), arg(4i32))]),
    ]));
    let (sql, args) = numbered(&s);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE ((("a"=$1) AND ("b"=$2)) OR (("c"=$3) AND ("d"=$4)))"#
    );
    assert_eq!(args, "[1, 2, 3, 4]");
}

#[test]
fn select_from_subselect() {
    let s = select_from(select_from(table("users")).as_("users"));
    assert_eq!(positional(&s).0, "SELECT * FROM (SELECT * FROM users) AS users");
}

#[test]
fn subselect_arguments_keep_their_order() {
    let inner = select_from(table("orders"))
        .select(["user_id"])
        .and_where(eq(col("total"), arg(100i32)));
    let s = select_from(table("users"))
        .and_where(eq(col("active"), arg(true)))
        .and_where(in_select(col("id"), inner))
        .and_where(eq(col("city"), arg("Oslo")));
    let (sql, args) = numbered(&s);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE ("active"=$1) AND ("id" IN (SELECT "user_id" FROM "orders" WHERE ("total"=$2))) AND ("city"=$3)"#
    );
    assert_eq!(args, r#"[true, 100, "Oslo"]"#);
}

#[test]
fn join_then_where() {
    let from = left_join(table("users"), table("posts"), on("users.id", "posts.user_id"));
    let s = select_from(from)
        .select(["users.id", "posts.title"])
        .and_where(eq(col("posts.published"), arg(true)))
        .order_by([col("posts.id").desc()])
        .limit(5);
    assert_eq!(
        positional(&s).0,
        "SELECT users.id, posts.title FROM users LEFT JOIN posts ON users.id=posts.user_id \
         WHERE (posts.published=?) ORDER BY posts.id DESC LIMIT 5"
    );
}

#[test]
fn full_clause_order() {
    let s = select_from(table("t"))
        .distinct()
        .select(["a"])
        .and_where(eq(col("b"), arg(1i32)))
        .group_by(["a"])
        .having([raw("COUNT(*) > 1")])
        .order_by(["a"])
        .limit(10)
        .offset(5)
        .for_update();
    assert_eq!(
        positional(&s).0,
        "SELECT DISTINCT a FROM t WHERE (b=?) GROUP BY a HAVING (COUNT(*) > 1) \
         ORDER BY a LIMIT 10 OFFSET 5 FOR UPDATE"
    );
}

#[test]
fn template_predicate_in_where() {
    let s = select_from(table("users"))
        .and_where(eq(col("id"), arg(1i32)))
        .and_where(template("age BETWEEN ? AND ?").bind(18i32).bind(65i32));
    let (sql, args) = numbered(&s);
    assert_eq!(
        sql,
        r#"SELECT * FROM "users" WHERE ("id"=$1) AND (age BETWEEN $2 AND $3)"#
    );
    assert_eq!(args, "[1, 18, 65]");
}

// ==================== Builder values ====================

#[test]
fn cloned_builders_are_independent() {
    let base = select_from(table("users")).select(["id"]);
    let filtered = base.clone().and_where(eq(col("active"), arg(true)));
    assert_eq!(positional(&base).0, "SELECT id FROM users");
    assert_eq!(positional(&filtered).0, "SELECT id FROM users WHERE (active=?)");
}

#[test]
fn rendering_is_deterministic() {
    let s = select_from(table("users"))
        .and_where(eq(col("a"), arg(1i32)))
        .and_where(eq(col("b"), arg("x")));
    assert_eq!(numbered(&s), numbered(&s));
    assert_eq!(positional(&s), positional(&s));
}

#[test]
fn placeholder_count_matches_args() {
    let statements: Vec<Statement> = vec![
        select_from(table("users"))
            .and_where(eq(col("a"), arg(1i32)))
            .and_where(or([eq(col("b"), arg(2i32)), eq(col("c"), arg(3i32))]))
            .into(),
        insert_into("users")
            .columns(["a", "b"])
            .values([arg(1i32), arg(2i32)])
            .values([arg(3i32), arg(4i32)])
            .into(),
        update("users")
            .set("a", arg(1i32))
            .and_where(eq(col("id"), arg(2i32)))
            .into(),
        delete_from("users").and_where(eq(col("id"), arg(9i32))).into(),
    ];
    for stmt in &statements {
        for dialect in [Dialect::Positional, Dialect::Numbered] {
            let built = stmt.to_sql(dialect).unwrap();
            assert_eq!(placeholder_count(&built.sql, dialect), built.params.len(), "{}", built.sql);
        }
    }
}

#[test]
fn numbered_placeholders_increase() {
    let s = insert_into("t")
        .columns(["a", "b", "c"])
        .values([arg(1i32), arg(2i32), arg(3i32)]);
    let (sql, _) = numbered(&s);
    let a = sql.find("$1").unwrap();
    let b = sql.find("$2").unwrap();
    let c = sql.find("$3").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn render_concurrently() {
    let s = select_from(table("users"))
        .and_where(eq(col("id"), arg(42i64)))
        .limit(1);
    let expected = numbered(&s);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| numbered(&s))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

// ==================== UPDATE / INSERT ====================

#[test]
fn update_with_timestamp() {
    let now = chrono::Utc::now();
    let stmt = update("users").set("updated_at", arg(now));
    let built = stmt.to_sql(Dialect::Positional).unwrap();
    assert_eq!(built.sql, "UPDATE users SET updated_at = ?");
    assert_eq!(built.params.len(), 1);
}

#[test]
fn insert_returning_numbered() {
    let stmt = insert_into("users")
        .columns(["name"])
        .values([arg("carol")])
        .returning(["id"]);
    assert_eq!(
        numbered(&stmt).0,
        r#"INSERT INTO "users"("name") VALUES ($1) RETURNING "id""#
    );
}

// ==================== Writers ====================

#[test]
fn render_into_caller_buffer() {
    let mut w = SqlBuffer::numbered();
    crate::node::render(&select_from(table("users")).and_where(eq(col("id"), arg(1i32))), &mut w)
        .unwrap();
    assert_eq!(w.sql(), r#"SELECT * FROM "users" WHERE ("id"=$1)"#);
    assert_eq!(w.params().len(), 1);
}

#[test]
fn render_into_io_sink() {
    let stmt = select_from(table("users")).and_where(eq(col("id"), arg(1i32)));
    let mut w = IoWriter::new(Dialect::Positional, Vec::new());
    stmt.write_sql(&mut w).unwrap();
    let (bytes, params) = w.finish().unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "SELECT * FROM users WHERE (id=?)");
    assert_eq!(params.len(), 1);
}

// ==================== Empty predicates ====================

#[test]
fn empty_predicate_groups_drop_where() {
    use crate::expr::Expr;
    assert_eq!(
        positional(&select_from(table("t")).and_where(and(Vec::<Expr>::new()))).0,
        "SELECT * FROM t"
    );
    assert_eq!(
        positional(&delete_from("t").and_where(or(Vec::<Expr>::new()))).0,
        "DELETE FROM t"
    );
    let (sql, args) = positional(
        &update("t")
            .set("a", arg(1i32))
            .and_where(and([or(Vec::<Expr>::new()), eq(col("id"), arg(2i32)).into()])),
    );
    assert_eq!(sql, "UPDATE t SET a = ? WHERE ((id=?))");
    assert_eq!(args, "[1, 2]");
}
