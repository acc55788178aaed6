use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use silt_sql::{Row, RowAdapter, Statement, Value};

use crate::cursor::RecordCursor;
use crate::{FetchError, Selectable};

/// Trait for types that can be extracted from result rows.
///
/// Implemented for the standard Rust types a column value can decode into
/// (`i64`, `String`, `DateTime<Utc>`, etc.). Implement it for newtypes to
/// teach the `record!` macro how to decode them.
pub trait FetchValue: Sized {
    /// Fetch a value from a row by column name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or the value cannot be
    /// converted to the target type.
    fn fetch(row: &Row, col: &str) -> Result<Self>;
}

/// Declares a record type with an automatic [`Record`] implementation.
///
/// All header lines are optional and ordered: `table` declares an explicit
/// table name, `selection` replaces the default `*` projection, and `parent`
/// links another record type whose table declaration is inherited.
///
/// # Examples
///
/// ```ignore
/// record! {
///     table = "players",
///     pub struct Player {
///         pub id: i64,
///         pub name: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (@declared_table) => { None };
    (@declared_table $table:literal) => { Some($table) };

    (@selection) => { vec![$crate::Selectable::AllColumns] };
    (@selection $($selectable:expr),+) => { vec![$($selectable),+] };

    (@chain $name:ident) => {
        vec![<$name as $crate::Record>::declared_table_name()]
    };
    (@chain $name:ident $parent:ty) => {{
        let mut chain = vec![<$name as $crate::Record>::declared_table_name()];
        chain.extend(<$parent as $crate::Record>::table_name_chain());
        chain
    }};

    (
        $(table = $table:literal,)?
        $(selection = [$($selectable:expr),* $(,)?],)?
        $(parent = $parent:ty,)?
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $field_type:ty
            ),* $(,)?
        }
    ) => {
        #[allow(missing_docs)]
        $(#[$meta])*
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field : $field_type
            ),*
        }

        impl $crate::Record for $name {
            fn declared_table_name() -> Option<&'static str> {
                $crate::record!(@declared_table $($table)?)
            }

            fn table_name_chain() -> Vec<Option<&'static str>> {
                $crate::record!(@chain $name $($parent)?)
            }

            fn selection() -> Vec<$crate::Selectable> {
                $crate::record!(@selection $($($selectable),*)?)
            }

            fn from_row(row: &$crate::Row) -> $crate::anyhow::Result<Self> {
                Ok(Self {
                    $(
                        $field: <$field_type as $crate::FetchValue>::fetch(
                            row,
                            stringify!($field),
                        )?,
                    )*
                })
            }
        }
    };
}

/// Trait for types that map to a database table and decode from its rows.
///
/// Typically implemented via the [`record!`] macro rather than manually. The
/// only required operation is [`Record::from_row`]; table identity and
/// selection have derivable defaults.
pub trait Record: Sized {
    /// Explicit table name declared directly on this type, if any.
    #[must_use]
    fn declared_table_name() -> Option<&'static str> {
        None
    }

    /// Table-name declarations for this type's declaration chain,
    /// most-derived first. The resolver takes the first explicit entry and
    /// falls back to name derivation when every level is `None`.
    #[must_use]
    fn table_name_chain() -> Vec<Option<&'static str>> {
        vec![Self::declared_table_name()]
    }

    /// Columns and expressions selected when fetching this record, in
    /// result order. Defaults to all declared columns; an override fully
    /// replaces the default.
    #[must_use]
    fn selection() -> Vec<Selectable> {
        vec![Selectable::AllColumns]
    }

    /// Construct an instance from the current result row.
    ///
    /// The row buffer is rewritten on the next step, so any needed data must
    /// be copied out of it here.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing or cannot be
    /// converted to the expected type.
    fn from_row(row: &Row) -> Result<Self>;

    /// Opens a cursor over `statement`, resetting it first.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Execute`] when the statement fails to reset.
    fn fetch_cursor<S: Statement>(
        statement: S, arguments: Option<Vec<Value>>, adapter: Option<RowAdapter>,
    ) -> Result<RecordCursor<S, Self>, FetchError> {
        RecordCursor::new(statement, arguments, adapter)
    }

    /// Fetches every row of `statement` into an ordered list.
    ///
    /// # Errors
    ///
    /// Returns the first [`FetchError`] the cursor raises; records decoded
    /// before the failure are discarded with the cursor.
    fn fetch_all<S: Statement>(
        statement: S, arguments: Option<Vec<Value>>, adapter: Option<RowAdapter>,
    ) -> Result<Vec<Self>, FetchError> {
        let mut cursor = Self::fetch_cursor(statement, arguments, adapter)?;
        let mut records = Vec::new();
        while let Some(record) = cursor.try_next()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Fetches the first row of `statement`, or `None` when there is none.
    ///
    /// Steps exactly once and discards the cursor; the decode path is the
    /// same one [`Record::fetch_all`] uses.
    ///
    /// # Errors
    ///
    /// Returns any [`FetchError`] the single step raises.
    fn fetch_one<S: Statement>(
        statement: S, arguments: Option<Vec<Value>>, adapter: Option<RowAdapter>,
    ) -> Result<Option<Self>, FetchError> {
        let mut cursor = Self::fetch_cursor(statement, arguments, adapter)?;
        cursor.try_next()
    }
}

fn row_field<'a>(row: &'a Row, name: &str) -> Result<&'a Value> {
    row.get_named(name).ok_or_else(|| anyhow!("missing column '{name}'"))
}

impl FetchValue for bool {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_bool(row_field(row, col)?)
    }
}

impl FetchValue for i32 {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_i32(row_field(row, col)?)
    }
}

impl FetchValue for i64 {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_i64(row_field(row, col)?)
    }
}

impl FetchValue for u32 {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_u32(row_field(row, col)?)
    }
}

impl FetchValue for u64 {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_u64(row_field(row, col)?)
    }
}

impl FetchValue for f32 {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_f32(row_field(row, col)?)
    }
}

impl FetchValue for f64 {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_f64(row_field(row, col)?)
    }
}

impl FetchValue for String {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_string(row_field(row, col)?)
    }
}

impl FetchValue for Vec<u8> {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_blob(row_field(row, col)?)
    }
}

impl FetchValue for DateTime<Utc> {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_timestamp(row_field(row, col)?)
    }
}

impl FetchValue for NaiveDate {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_date(row_field(row, col)?)
    }
}

impl FetchValue for serde_json::Value {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        as_json(row_field(row, col)?)
    }
}

impl<T: FetchValue> FetchValue for Option<T> {
    fn fetch(row: &Row, col: &str) -> Result<Self> {
        match row_field(row, col) {
            Ok(value) if !value.is_null() => Ok(Some(T::fetch(row, col)?)),
            _ => Ok(None),
        }
    }
}

fn as_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Integer(v) => Ok(*v != 0),
        _ => bail!("expected integer storage for boolean"),
    }
}

fn as_i32(value: &Value) -> Result<i32> {
    match value {
        Value::Integer(v) => {
            i32::try_from(*v).with_context(|| format!("integer {v} out of range for i32"))
        }
        _ => bail!("expected integer storage"),
    }
}

fn as_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Integer(v) => Ok(*v),
        _ => bail!("expected integer storage"),
    }
}

fn as_u32(value: &Value) -> Result<u32> {
    match value {
        Value::Integer(v) => {
            u32::try_from(*v).with_context(|| format!("integer {v} out of range for u32"))
        }
        _ => bail!("expected integer storage"),
    }
}

fn as_u64(value: &Value) -> Result<u64> {
    match value {
        Value::Integer(v) => {
            u64::try_from(*v).with_context(|| format!("integer {v} out of range for u64"))
        }
        _ => bail!("expected integer storage"),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_f32(value: &Value) -> Result<f32> {
    match value {
        Value::Real(v) => Ok(*v as f32),
        _ => bail!("expected real storage"),
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &Value) -> Result<f64> {
    match value {
        Value::Real(v) => Ok(*v),
        // Columns with numeric affinity may come back as integers.
        Value::Integer(v) => Ok(*v as f64),
        _ => bail!("expected real storage"),
    }
}

fn as_string(value: &Value) -> Result<String> {
    match value {
        Value::Text(raw) => Ok(raw.clone()),
        _ => bail!("expected text storage"),
    }
}

fn as_blob(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::Blob(bytes) => Ok(bytes.clone()),
        _ => bail!("expected blob storage"),
    }
}

fn as_timestamp(value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::Text(raw) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                return Ok(parsed.with_timezone(&Utc));
            }

            if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
                return Ok(DateTime::<Utc>::from_naive_utc_and_offset(parsed, Utc));
            }

            bail!(
                "unsupported timestamp: {raw}; expected RFC3339 or \"%Y-%m-%d %H:%M:%S%.f\" format"
            )
        }
        _ => bail!("expected text storage for timestamp"),
    }
}

fn as_date(value: &Value) -> Result<NaiveDate> {
    match value {
        Value::Text(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("unsupported date: {raw}; expected \"%Y-%m-%d\" format")),
        _ => bail!("expected text storage for date"),
    }
}

fn as_json(value: &Value) -> Result<serde_json::Value> {
    match value {
        Value::Text(raw) => Ok(serde_json::from_str(raw)?),
        Value::Blob(bytes) => Ok(serde_json::from_slice(bytes)?),
        _ => bail!("expected json compatible storage"),
    }
}
