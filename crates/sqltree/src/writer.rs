//! Rendering sinks.
//!
//! A [`SqlWriter`] accumulates SQL text and the bound arguments that go with it.
//! Dialects differ in two places only: the placeholder token emitted for each
//! bound argument and whether identifiers are quoted.
//!
//! | Dialect | Placeholder | Identifiers |
//! |---|---|---|
//! | [`Dialect::Positional`] | `?` | verbatim |
//! | [`Dialect::Numbered`] | `$1`, `$2`, ... | `"double_quoted"` |
//!
//! Other dialects are added by implementing [`SqlWriter`] directly.

use crate::error::SqlResult;
use crate::param::{Param, ParamList};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sink that a [`Node`](crate::Node) renders into.
///
/// The Nth placeholder written must correspond to the Nth argument recorded.
/// A writer is used by one render pass at a time; it is not shared.
pub trait SqlWriter {
    /// Append raw SQL text.
    fn write_str(&mut self, sql: &str) -> SqlResult<()>;

    /// Append the dialect's placeholder token and record `param` as the next argument.
    fn push_arg(&mut self, param: Param) -> SqlResult<()>;

    /// Record arguments without emitting placeholders.
    ///
    /// This is the one exception to the placeholder/argument correspondence:
    /// it exists for raw fragments whose text already carries the placeholders.
    fn extend_args(&mut self, params: &[Param]) -> SqlResult<()>;

    /// Number of arguments recorded so far.
    fn arg_count(&self) -> usize;

    /// Append an identifier. Writers that quote identifiers override this.
    fn write_ident(&mut self, name: &str) -> SqlResult<()> {
        self.write_str(name)
    }
}

/// Built-in placeholder and quoting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `?` placeholders, unquoted identifiers.
    #[default]
    Positional,
    /// `$n` placeholders, double-quoted identifiers.
    Numbered,
}

impl Dialect {
    /// Name used in logs and config files.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Positional => "positional",
            Dialect::Numbered => "numbered",
        }
    }

    /// Whether identifiers are wrapped in double quotes.
    pub fn quotes_identifiers(&self) -> bool {
        matches!(self, Dialect::Numbered)
    }

    /// Write the placeholder for the argument at 1-based `index`.
    pub fn write_placeholder<W: std::fmt::Write>(&self, out: &mut W, index: usize) -> std::fmt::Result {
        match self {
            Dialect::Positional => out.write_char('?'),
            Dialect::Numbered => write!(out, "${index}"),
        }
    }

    /// Write an identifier according to this dialect.
    ///
    /// `*` is never quoted. Embedded `"` are doubled.
    pub fn write_ident<W: std::fmt::Write>(&self, out: &mut W, name: &str) -> std::fmt::Result {
        if !self.quotes_identifiers() || name == "*" {
            return out.write_str(name);
        }
        out.write_char('"')?;
        for ch in name.chars() {
            if ch == '"' {
                out.write_str("\"\"")?;
            } else {
                out.write_char(ch)?;
            }
        }
        out.write_char('"')
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positional" | "?" => Ok(Dialect::Positional),
            "numbered" | "postgres" | "$" => Ok(Dialect::Numbered),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

/// In-memory writer: a `String` buffer plus the argument list.
#[derive(Debug, Clone, Default)]
pub struct SqlBuffer {
    dialect: Dialect,
    sql: String,
    params: ParamList,
}

impl SqlBuffer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            params: ParamList::new(),
        }
    }

    /// Writer emitting `?` placeholders.
    pub fn positional() -> Self {
        Self::new(Dialect::Positional)
    }

    /// Writer emitting `$n` placeholders and quoted identifiers.
    pub fn numbered() -> Self {
        Self::new(Dialect::Numbered)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// SQL written so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments recorded so far.
    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Consume the buffer into its SQL text and arguments.
    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}

impl SqlWriter for SqlBuffer {
    fn write_str(&mut self, sql: &str) -> SqlResult<()> {
        self.sql.push_str(sql);
        Ok(())
    }

    fn push_arg(&mut self, param: Param) -> SqlResult<()> {
        let index = self.params.push(param);
        self.dialect.write_placeholder(&mut self.sql, index)?;
        Ok(())
    }

    fn extend_args(&mut self, params: &[Param]) -> SqlResult<()> {
        self.params.extend_params(params.iter().cloned());
        Ok(())
    }

    fn arg_count(&self) -> usize {
        self.params.len()
    }

    fn write_ident(&mut self, name: &str) -> SqlResult<()> {
        self.dialect.write_ident(&mut self.sql, name)?;
        Ok(())
    }
}

/// Writer that streams SQL text into any [`std::io::Write`].
///
/// Arguments are still collected in memory. I/O failures surface as
/// [`SqlError::Io`](crate::SqlError::Io) and abort the render.
#[derive(Debug)]
pub struct IoWriter<W: std::io::Write> {
    dialect: Dialect,
    out: W,
    params: ParamList,
}

impl<W: std::io::Write> IoWriter<W> {
    pub fn new(dialect: Dialect, out: W) -> Self {
        Self {
            dialect,
            out,
            params: ParamList::new(),
        }
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Flush the stream and return it together with the collected arguments.
    pub fn finish(mut self) -> SqlResult<(W, ParamList)> {
        self.out.flush()?;
        Ok((self.out, self.params))
    }

    fn write_fragment(&mut self, f: impl FnOnce(&mut String) -> std::fmt::Result) -> SqlResult<()> {
        let mut buf = String::new();
        f(&mut buf)?;
        self.out.write_all(buf.as_bytes())?;
        Ok(())
    }
}

impl<W: std::io::Write> SqlWriter for IoWriter<W> {
    fn write_str(&mut self, sql: &str) -> SqlResult<()> {
        self.out.write_all(sql.as_bytes())?;
        Ok(())
    }

    fn push_arg(&mut self, param: Param) -> SqlResult<()> {
        let dialect = self.dialect;
        let index = self.params.len() + 1;
        self.write_fragment(|buf| dialect.write_placeholder(buf, index))?;
        self.params.push(param);
        Ok(())
    }

    fn extend_args(&mut self, params: &[Param]) -> SqlResult<()> {
        self.params.extend_params(params.iter().cloned());
        Ok(())
    }

    fn arg_count(&self) -> usize {
        self.params.len()
    }

    fn write_ident(&mut self, name: &str) -> SqlResult<()> {
        let dialect = self.dialect;
        self.write_fragment(|buf| dialect.write_ident(buf, name))
    }
}
