use silt_sql::{Connection, PrimaryKey};

use crate::FetchError;

/// The implicit key column every table carries when no explicit primary key
/// is usable for ordering.
const ROWID: &str = "rowid";

/// Resolves the column to order `table` by, from its declared key shape.
///
/// A single declared key column resolves to that column. Tables with no
/// explicit primary key resolve to the implicit `rowid`. Compound keys also
/// resolve to `rowid`: they are not orderable as one expression, so the
/// rowid surrogate stands in. This is a deliberate simplification, not
/// general compound-key ordering.
///
/// # Errors
///
/// Returns [`FetchError::Schema`] when the table is unknown to the engine.
pub fn primary_key_column<C: Connection>(
    connection: &mut C, table: &str,
) -> Result<String, FetchError> {
    let key = connection.primary_key(table).map_err(|error| FetchError::Schema {
        table: table.to_owned(),
        message: error.message,
    })?;

    let column = match key {
        PrimaryKey::Single(column) => column,
        PrimaryKey::Implicit | PrimaryKey::Compound(_) => ROWID.to_owned(),
    };

    tracing::debug!(table, column = %column, "resolved primary key column");

    Ok(column)
}
