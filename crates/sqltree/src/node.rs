//! The render contract shared by every tree node.

use crate::config::RenderConfig;
use crate::error::SqlResult;
use crate::param::Param;
use crate::writer::{Dialect, SqlBuffer, SqlWriter};
use tokio_postgres::types::ToSql;

/// Anything that can render itself into a [`SqlWriter`].
///
/// Rendering never mutates the node; all side effects go through the writer.
/// A child's error is returned immediately and nothing more is written.
pub trait Node {
    /// Append this node's SQL (and its bound arguments, in placeholder order) to `w`.
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()>;

    /// Render into a fresh in-memory writer configured by `config`.
    ///
    /// On failure the partially written text is discarded.
    fn build(&self, config: &RenderConfig) -> SqlResult<BuiltQuery> {
        let mut w = SqlBuffer::new(config.dialect);
        match self.write_sql(&mut w) {
            Ok(()) => {
                let (sql, params) = w.into_parts();
                let built = BuiltQuery::new(sql, params.into_vec());
                log_built(config, &built);
                Ok(built)
            }
            Err(err) => {
                log_failed(config, &err);
                Err(err)
            }
        }
    }

    /// Render with default settings for `dialect`.
    fn to_sql(&self, dialect: Dialect) -> SqlResult<BuiltQuery> {
        self.build(&RenderConfig::new().with_dialect(dialect))
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        (**self).write_sql(w)
    }
}

impl<T: Node + ?Sized> Node for &T {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        (**self).write_sql(w)
    }
}

/// Render `node` into a caller-supplied writer.
pub fn render<N: Node + ?Sized>(node: &N, w: &mut dyn SqlWriter) -> SqlResult<()> {
    node.write_sql(w)
}

/// Write `items` separated by `sep`.
pub(crate) fn write_list<N: Node>(w: &mut dyn SqlWriter, items: &[N], sep: &str) -> SqlResult<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.write_str(sep)?;
        }
        item.write_sql(w)?;
    }
    Ok(())
}

/// The result of rendering a statement: SQL text plus its ordered arguments.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Param>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, params: Vec<Param>) -> Self {
        Self { sql, params }
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.params)
    }
}

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg(feature = "tracing")]
fn log_built(config: &RenderConfig, built: &BuiltQuery) {
    let sql = match config.max_log_sql_length {
        Some(max) if built.sql.len() > max => {
            format!("{}...", truncate_sql_bytes(&built.sql, max))
        }
        _ => built.sql.clone(),
    };
    tracing::debug!(
        target: "sqltree.sql",
        dialect = config.dialect.name(),
        params = built.params.len(),
        sql = %sql,
        "rendered statement"
    );
}

#[cfg(not(feature = "tracing"))]
fn log_built(_config: &RenderConfig, _built: &BuiltQuery) {}

#[cfg(feature = "tracing")]
fn log_failed(config: &RenderConfig, err: &crate::error::SqlError) {
    tracing::warn!(
        target: "sqltree.sql",
        dialect = config.dialect.name(),
        error = %err,
        "failed to render statement"
    );
}

#[cfg(not(feature = "tracing"))]
fn log_failed(_config: &RenderConfig, _err: &crate::error::SqlError) {}
