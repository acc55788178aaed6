use std::sync::Arc;

use crate::Value;

/// Remaps the columns a [`Row`] exposes, without copying values.
///
/// Each entry maps an exposed column name to a position in the underlying
/// row, so an adapted row can rename or subset columns while lookups still
/// resolve into the original value storage.
#[derive(Debug, Clone, Default)]
pub struct RowAdapter {
    mapping: Vec<(String, usize)>,
}

impl RowAdapter {
    /// Builds an adapter from `(exposed name, base position)` pairs.
    ///
    /// Exposed order is the iteration order of `mapping`.
    pub fn new<N: Into<String>>(mapping: impl IntoIterator<Item = (N, usize)>) -> Self {
        Self {
            mapping: mapping.into_iter().map(|(name, index)| (name.into(), index)).collect(),
        }
    }

    /// Number of columns the adapted row exposes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Returns `true` when the adapter exposes no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub(crate) fn name(&self, index: usize) -> Option<&str> {
        self.mapping.get(index).map(|(name, _)| name.as_str())
    }

    pub(crate) fn base_index(&self, index: usize) -> Option<usize> {
        self.mapping.get(index).map(|&(_, base)| base)
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<usize> {
        self.mapping
            .iter()
            .find(|(exposed, _)| exposed.eq_ignore_ascii_case(name))
            .map(|&(_, base)| base)
    }
}

/// A view over one result row, indexable by position or by name.
///
/// A row's contents are only valid between two steps of the statement that
/// fills it: the same buffer is rewritten in place on every step, so
/// consumers must copy out whatever they need before stepping again. Column
/// name lookup is ASCII case-insensitive.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
    adapter: Option<Arc<RowAdapter>>,
}

impl Row {
    /// Creates an empty row buffer for a statement's result columns.
    #[must_use]
    pub fn new(columns: Arc<[String]>) -> Self {
        Self::with_adapter(columns, None)
    }

    /// Creates an empty row buffer whose lookups go through `adapter`.
    #[must_use]
    pub fn with_adapter(columns: Arc<[String]>, adapter: Option<RowAdapter>) -> Self {
        let values = vec![Value::Null; columns.len()];
        Self {
            columns,
            values,
            adapter: adapter.map(Arc::new),
        }
    }

    /// Builds a standalone row from name/value pairs.
    ///
    /// Useful in tests and for record constructors that retain a copy of the
    /// row they were decoded from.
    pub fn from_pairs<N: Into<String>>(pairs: impl IntoIterator<Item = (N, Value)>) -> Self {
        let (columns, values): (Vec<String>, Vec<Value>) =
            pairs.into_iter().map(|(name, value)| (name.into(), value)).unzip();
        Self {
            columns: columns.into(),
            values,
            adapter: None,
        }
    }

    /// Number of columns this row exposes.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.adapter.as_ref().map_or(self.columns.len(), |adapter| adapter.len())
    }

    /// Name of the exposed column at `index`.
    #[must_use]
    pub fn column_name(&self, index: usize) -> Option<&str> {
        match &self.adapter {
            Some(adapter) => adapter.name(index),
            None => self.columns.get(index).map(String::as_str),
        }
    }

    /// Value of the exposed column at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        let base = match &self.adapter {
            Some(adapter) => adapter.base_index(index)?,
            None => index,
        };
        self.values.get(base)
    }

    /// Value of the exposed column called `name` (ASCII case-insensitive).
    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        let base = match &self.adapter {
            Some(adapter) => adapter.lookup(name)?,
            None => self.columns.iter().position(|column| column.eq_ignore_ascii_case(name))?,
        };
        self.values.get(base)
    }

    /// Returns `true` when the row exposes a column called `name`.
    #[must_use]
    pub fn contains_column(&self, name: &str) -> bool {
        self.get_named(name).is_some()
    }

    /// Mutable access to the underlying value storage.
    ///
    /// Intended for statement implementations and the fetch cursor, which
    /// rewrite the buffer in place on every step. The vector must be refilled
    /// to one value per underlying column.
    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::from_pairs([
            ("id", Value::Integer(1)),
            ("name", Value::Text("Arthur".to_owned())),
            ("score", Value::Integer(500)),
        ])
    }

    #[test]
    fn positional_and_named_access() {
        let row = sample_row();
        assert_eq!(row.column_count(), 3);
        assert_eq!(row.column_name(1), Some("name"));
        assert_eq!(row.get(0), Some(&Value::Integer(1)));
        assert_eq!(row.get_named("score"), Some(&Value::Integer(500)));
        assert_eq!(row.get(3), None);
        assert_eq!(row.get_named("missing"), None);
    }

    #[test]
    fn named_access_is_ascii_case_insensitive() {
        let row = sample_row();
        assert_eq!(row.get_named("NAME"), Some(&Value::Text("Arthur".to_owned())));
        assert!(row.contains_column("Score"));
    }

    #[test]
    fn adapter_renames_and_subsets() {
        let adapter = RowAdapter::new([("player_name", 1), ("points", 2)]);
        let mut row = Row::with_adapter(
            ["id".to_owned(), "name".to_owned(), "score".to_owned()].into(),
            Some(adapter),
        );
        *row.values_mut() =
            vec![Value::Integer(1), Value::Text("Arthur".to_owned()), Value::Integer(500)];

        assert_eq!(row.column_count(), 2);
        assert_eq!(row.column_name(0), Some("player_name"));
        assert_eq!(row.get(0), Some(&Value::Text("Arthur".to_owned())));
        assert_eq!(row.get_named("points"), Some(&Value::Integer(500)));
        assert_eq!(row.get_named("id"), None);
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn buffer_rewrite_changes_visible_values() {
        let mut row = Row::new(["id".to_owned()].into());
        assert_eq!(row.get(0), Some(&Value::Null));

        *row.values_mut() = vec![Value::Integer(9)];
        assert_eq!(row.get_named("id"), Some(&Value::Integer(9)));
    }
}
