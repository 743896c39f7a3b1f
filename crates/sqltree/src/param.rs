//! Bound argument storage using Arc for clone-friendly statement trees.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly bound value.
///
/// Statements are cloned freely while being built, so values live behind an `Arc`
/// and are never copied. `Debug` forwards to the wrapped value.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap a value for binding.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the value in the form `tokio_postgres` query methods accept.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&*self.0, f)
    }
}

/// Ordered list of bound arguments collected during one render pass.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based index.
    pub fn push(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append without renumbering anything already recorded.
    pub fn extend_params(&mut self, params: impl IntoIterator<Item = Param>) {
        self.params.extend(params);
    }

    /// Borrow every value for a `client.query(sql, &params)` call.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    pub fn into_vec(self) -> Vec<Param> {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_one_based_index() {
        let mut list = ParamList::new();
        assert_eq!(list.push(Param::new(1i32)), 1);
        assert_eq!(list.push(Param::new("two")), 2);
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_refs().len(), 2);
        assert_eq!(format!("{:?}", list.iter().next()), "Some(1)");
    }

    #[test]
    fn debug_shows_inner_values() {
        let mut list = ParamList::new();
        list.push(Param::new(10i32));
        list.push(Param::new("alice"));
        assert_eq!(format!("{:?}", list.into_vec()), r#"[10, "alice"]"#);
    }

    #[test]
    fn clone_shares_value() {
        let p = Param::new(String::from("shared"));
        let q = p.clone();
        assert!(Arc::ptr_eq(&p.0, &q.0));
    }
}
