//! SQL identifiers (schema/table/column names).
//!
//! An [`Ident`] keeps dotted names split into parts so that each part goes through
//! the writer's identifier hook on its own: `users.id` renders as `users.id` in the
//! positional dialect and `"users"."id"` in the numbered one.
//!
//! Names are not validated; they are taken from the caller's code, not from input.

use crate::error::SqlResult;
use crate::node::Node;
use crate::writer::SqlWriter;

/// A possibly dotted SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    parts: Vec<String>,
}

impl Ident {
    /// Split `name` on `.` into identifier parts.
    pub fn new(name: &str) -> Self {
        Self {
            parts: name.split('.').map(str::to_string).collect(),
        }
    }

    /// Build an identifier from pre-split parts. Dots inside a part are kept as-is.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Qualify this identifier with `prefix`.
    pub fn qualified(&self, prefix: &Ident) -> Self {
        let mut parts = prefix.parts.clone();
        parts.extend(self.parts.iter().cloned());
        Self { parts }
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl Node for Ident {
    fn write_sql(&self, w: &mut dyn SqlWriter) -> SqlResult<()> {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                w.write_str(".")?;
            }
            w.write_ident(part)?;
        }
        Ok(())
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::new(&name)
    }
}

impl From<&String> for Ident {
    fn from(name: &String) -> Self {
        Ident::new(name)
    }
}
