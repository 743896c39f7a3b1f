use sqltree::{
    Dialect, InsertValue, Node, RenderConfig, SqlBuffer, SqlError, SqlResult, SqlWriter, Statement,
    and, arg, col, count_all, delete_from, eq, exists, gt, in_list, insert_into, is_null, not, on,
    or, raw, select_from, table, update,
};

fn build(node: &dyn Node, dialect: Dialect) -> (String, String) {
    let built = node.to_sql(dialect).unwrap();
    (built.sql, format!("{:?}", built.params))
}

#[test]
fn users_with_recent_orders() {
    let recent = select_from(table("orders"))
        .and_where(eq(col("orders.user_id"), col("users.id")))
        .and_where(gt(col("orders.total"), arg(50i32)));
    let q = select_from(table("users").as_("users"))
        .select(["users.id", "users.email"])
        .and_where(exists(recent))
        .and_where(is_null(col("users.deleted_at")))
        .order_by([col("users.id").asc()])
        .limit(25);

    let (sql, args) = build(&q, Dialect::Numbered);
    assert_eq!(
        sql,
        r#"SELECT "users"."id", "users"."email" FROM "users" AS "users" WHERE (exists(SELECT * FROM "orders" WHERE ("orders"."user_id"="users"."id") AND ("orders"."total">$1))) AND ("users"."deleted_at" IS NULL) ORDER BY "users"."id" ASC LIMIT 25"#
    );
    assert_eq!(args, "[50]");
}

#[test]
fn report_with_joins_and_grouping() {
    let from = table("users")
        .inner_join(table("orders"), on("users.id", "orders.user_id"))
        .left_join(table("cities"), on("users.city_id", "cities.id"));
    let q = select_from(from)
        .select([col("cities.name").as_("city"), count_all().as_("orders")])
        .and_where(or([
            eq(col("users.role"), arg("admin")).into(),
            and([eq(col("users.role"), arg("staff")), eq(col("users.active"), arg(true))]),
        ]))
        .group_by(["cities.name"])
        .having([gt(raw("COUNT(*)"), arg(10i64))]);

    let (sql, args) = build(&q, Dialect::Positional);
    assert_eq!(
        sql,
        "SELECT cities.name AS city, COUNT(*) AS orders FROM users \
         INNER JOIN orders ON users.id=orders.user_id \
         LEFT JOIN cities ON users.city_id=cities.id \
         WHERE ((users.role=?) OR ((users.role=?) AND (users.active=?))) \
         GROUP BY cities.name HAVING (COUNT(*)>?)"
    );
    assert_eq!(args, r#"["admin", "staff", true, 10]"#);
}

#[test]
fn not_in_filtered_delete() {
    let q = delete_from("sessions")
        .and_where(not(in_list(col("user_id"), [arg(1i64), arg(2i64)])))
        .returning(["id"]);
    assert_eq!(
        build(&q, Dialect::Numbered).0,
        r#"DELETE FROM "sessions" WHERE (NOT ("user_id" IN ($1, $2))) RETURNING "id""#
    );
}

#[test]
fn upsert_shaped_insert() {
    let q = insert_into("users")
        .columns(["id", "name"])
        .values([InsertValue::Default, arg("dora").into()])
        .returning(["id"]);
    assert_eq!(
        build(&q, Dialect::Positional).0,
        "INSERT INTO users(id, name) VALUES (DEFAULT, ?) RETURNING id"
    );
}

#[test]
fn statements_share_one_entry_point() {
    let statements: Vec<Statement> = vec![
        select_from(table("t")).into(),
        insert_into("t").into(),
        update("t").set("a", arg(1i32)).into(),
        delete_from("t").into(),
    ];
    let sql: Vec<String> = statements
        .iter()
        .map(|s| s.to_sql(Dialect::Positional).unwrap().sql)
        .collect();
    assert_eq!(
        sql,
        [
            "SELECT * FROM t",
            "INSERT INTO t DEFAULT VALUES",
            "UPDATE t SET a = ?",
            "DELETE FROM t",
        ]
    );
}

#[test]
fn quoted_identifiers_are_escaped() {
    let q = select_from(table("weird\"table")).select(["a\"b"]);
    assert_eq!(
        build(&q, Dialect::Numbered).0,
        r#"SELECT "a""b" FROM "weird""table""#
    );
}

#[test]
fn config_from_toml_drives_rendering() {
    let config: RenderConfig = toml::from_str(
        r#"
        dialect = "numbered"
        max_log_sql_length = 64
        "#,
    )
    .unwrap();
    let built = select_from(table("users"))
        .and_where(eq(col("id"), arg(1i32)))
        .build(&config)
        .unwrap();
    assert_eq!(built.sql, r#"SELECT * FROM "users" WHERE ("id"=$1)"#);
    assert_eq!(built.params_ref().len(), 1);
}

/// Writer that accepts a fixed number of bytes and then fails.
struct Limited {
    inner: SqlBuffer,
    budget: usize,
}

impl SqlWriter for Limited {
    fn write_str(&mut self, s: &str) -> SqlResult<()> {
        if s.len() > self.budget {
            return Err(SqlError::writer("budget exhausted"));
        }
        self.budget -= s.len();
        self.inner.write_str(s)
    }

    fn push_arg(&mut self, value: sqltree::Param) -> SqlResult<()> {
        self.inner.push_arg(value)
    }

    fn extend_args(&mut self, values: &[sqltree::Param]) -> SqlResult<()> {
        self.inner.extend_args(values)
    }

    fn arg_count(&self) -> usize {
        self.inner.arg_count()
    }
}

#[test]
fn custom_writer_errors_stop_rendering() {
    let mut w = Limited {
        inner: SqlBuffer::positional(),
        budget: 19,
    };
    let q = select_from(table("users")).and_where(eq(col("id"), arg(1i32)));
    let err = sqltree::render(&q, &mut w).unwrap_err();
    assert!(matches!(err, SqlError::Writer(_)));
    assert_eq!(w.inner.sql(), "SELECT * FROM users");
    assert!(w.inner.params().is_empty());
}
