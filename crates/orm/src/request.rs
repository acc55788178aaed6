use std::marker::PhantomData;

use sea_query::{
    Alias, Expr, Order, Query, SimpleExpr, SqliteQueryBuilder, Value as SeaValue, Values,
};
use silt_sql::{Connection, RowAdapter, Value};

use crate::cursor::RecordCursor;
use crate::primary_key::primary_key_column;
use crate::table::table_name;
use crate::{FetchError, Record};

/// An immutable, executable fetch request: SQL text, bound arguments, and an
/// optional row adapter.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    sql: String,
    arguments: Vec<Value>,
    adapter: Option<RowAdapter>,
}

impl FetchRequest {
    /// Wraps raw SQL text and arguments into a request.
    ///
    /// The SQL is passed to the engine verbatim; quoting and placeholder
    /// syntax are the caller's responsibility.
    pub fn raw(
        sql: impl Into<String>, arguments: Vec<Value>, adapter: Option<RowAdapter>,
    ) -> Self {
        Self {
            sql: sql.into(),
            arguments,
            adapter,
        }
    }

    /// The request's SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The request's bound arguments, in binding order.
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// The request's row adapter, if any.
    #[must_use]
    pub fn adapter(&self) -> Option<&RowAdapter> {
        self.adapter.as_ref()
    }

    /// Prepares the request on `connection` and opens a record cursor over
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Execute`] when preparation or the initial reset
    /// fails.
    pub fn fetch_cursor<R: Record, C: Connection>(
        &self, connection: &mut C,
    ) -> Result<RecordCursor<C::Statement, R>, FetchError> {
        let statement = connection.prepare(&self.sql).map_err(|error| FetchError::Execute {
            code: error.code,
            message: error.message,
            sql: self.sql.clone(),
            arguments: self.arguments.clone(),
        })?;
        RecordCursor::new(statement, Some(self.arguments.clone()), self.adapter.clone())
    }

    /// Fetches every row of the request into an ordered list.
    ///
    /// # Errors
    ///
    /// Returns the first [`FetchError`] raised while preparing or stepping.
    pub fn fetch_all<R: Record, C: Connection>(
        &self, connection: &mut C,
    ) -> Result<Vec<R>, FetchError> {
        let mut cursor = self.fetch_cursor::<R, C>(connection)?;
        let mut records = Vec::new();
        while let Some(record) = cursor.try_next()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Fetches the first row of the request, or `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns any [`FetchError`] raised while preparing or on the single
    /// step taken.
    pub fn fetch_one<R: Record, C: Connection>(
        &self, connection: &mut C,
    ) -> Result<Option<R>, FetchError> {
        let mut cursor = self.fetch_cursor::<R, C>(connection)?;
        cursor.try_next()
    }
}

/// Builder assembling a table-scan [`FetchRequest`] for a record type from
/// its declared metadata plus pre-built filter and ordering expressions.
///
/// Table and column identifiers are always rendered double-quoted; reserved
/// words and mixed-case identifiers are valid table names.
pub struct FetchRequestBuilder<R: Record> {
    filters: Vec<SimpleExpr>,
    order: Vec<(SimpleExpr, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
    adapter: Option<RowAdapter>,
    _marker: PhantomData<R>,
}

impl<R: Record> Default for FetchRequestBuilder<R> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            adapter: None,
            _marker: PhantomData,
        }
    }
}

impl<R: Record> FetchRequestBuilder<R> {
    /// Creates a builder with the record's default selection and no filter
    /// or ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pre-built `WHERE` predicate; multiple predicates are ANDed.
    #[must_use]
    pub fn filter(mut self, predicate: SimpleExpr) -> Self {
        self.filters.push(predicate);
        self
    }

    /// Adds an `ORDER BY` entry on a column.
    #[must_use]
    pub fn order_by(mut self, column: &str, order: Order) -> Self {
        self.order.push((Expr::col(Alias::new(column)).into(), order));
        self
    }

    /// Adds an ascending `ORDER BY` entry on the table's primary key,
    /// resolving it through `connection`'s schema metadata.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Schema`] when the record's table is unknown to
    /// the engine.
    pub fn order_by_primary_key<C: Connection>(
        mut self, connection: &mut C,
    ) -> Result<Self, FetchError> {
        let table = table_name::<R>();
        let column = primary_key_column(connection, &table)?;
        self.order.push((Expr::col(Alias::new(column.as_str())).into(), Order::Asc));
        Ok(self)
    }

    /// Caps the number of rows the request returns.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` rows.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attaches a row adapter applied to every fetched row.
    #[must_use]
    pub fn adapter(mut self, adapter: RowAdapter) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Renders the request: `SELECT <selection> FROM "<table>"` plus any
    /// filter, ordering, limit and offset.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Argument`] when a bound value has no engine
    /// representation.
    pub fn build(self) -> Result<FetchRequest, FetchError> {
        let table = table_name::<R>();
        let mut statement = Query::select();

        for selectable in R::selection() {
            selectable.apply(&mut statement);
        }

        statement.from(Alias::new(table.as_str()));

        for predicate in self.filters {
            statement.and_where(predicate);
        }

        for (expr, order) in self.order {
            statement.order_by_expr(expr, order);
        }

        if let Some(limit) = self.limit {
            statement.limit(limit);
        }

        if let Some(offset) = self.offset {
            statement.offset(offset);
        }

        let (sql, values) = statement.build(SqliteQueryBuilder);
        let arguments = arguments_from_values(values)?;

        tracing::debug!(
            table = %table,
            sql = %sql,
            argument_count = arguments.len(),
            "built fetch request"
        );

        Ok(FetchRequest {
            sql,
            arguments,
            adapter: self.adapter,
        })
    }

    /// Builds the request and opens a cursor over it on `connection`.
    ///
    /// # Errors
    ///
    /// Returns any [`FetchError`] raised while building or preparing.
    pub fn fetch_cursor<C: Connection>(
        self, connection: &mut C,
    ) -> Result<RecordCursor<C::Statement, R>, FetchError> {
        self.build()?.fetch_cursor(connection)
    }

    /// Builds the request and fetches every row into an ordered list.
    ///
    /// # Errors
    ///
    /// Returns the first [`FetchError`] raised while building, preparing or
    /// stepping.
    pub fn fetch_all<C: Connection>(self, connection: &mut C) -> Result<Vec<R>, FetchError> {
        self.build()?.fetch_all(connection)
    }

    /// Builds the request and fetches its first row, or `None`.
    ///
    /// # Errors
    ///
    /// Returns any [`FetchError`] raised while building, preparing or on the
    /// single step taken.
    pub fn fetch_one<C: Connection>(self, connection: &mut C) -> Result<Option<R>, FetchError> {
        self.build()?.fetch_one(connection)
    }
}

fn arguments_from_values(values: Values) -> Result<Vec<Value>, FetchError> {
    values.into_iter().map(argument_from_value).collect()
}

fn argument_from_value(value: SeaValue) -> Result<Value, FetchError> {
    let argument = match value {
        SeaValue::Bool(v) => v.map_or(Value::Null, |b| Value::Integer(i64::from(b))),
        SeaValue::TinyInt(v) => v.map_or(Value::Null, |i| Value::Integer(i64::from(i))),
        SeaValue::SmallInt(v) => v.map_or(Value::Null, |i| Value::Integer(i64::from(i))),
        SeaValue::Int(v) => v.map_or(Value::Null, |i| Value::Integer(i64::from(i))),
        SeaValue::BigInt(v) => v.map_or(Value::Null, Value::Integer),
        SeaValue::TinyUnsigned(v) => v.map_or(Value::Null, |u| Value::Integer(i64::from(u))),
        SeaValue::SmallUnsigned(v) => v.map_or(Value::Null, |u| Value::Integer(i64::from(u))),
        SeaValue::Unsigned(v) => v.map_or(Value::Null, |u| Value::Integer(i64::from(u))),
        SeaValue::BigUnsigned(Some(u)) => match i64::try_from(u) {
            Ok(i) => Value::Integer(i),
            Err(_) => {
                return Err(FetchError::argument(
                    "unsigned argument exceeds the engine's integer range",
                ));
            }
        },
        SeaValue::BigUnsigned(None) => Value::Null,
        SeaValue::Float(v) => v.map_or(Value::Null, |f| Value::Real(f64::from(f))),
        SeaValue::Double(v) => v.map_or(Value::Null, Value::Real),
        SeaValue::String(v) => v.map_or(Value::Null, |s| Value::Text(*s)),
        SeaValue::Char(v) => v.map_or(Value::Null, |c| Value::Text(c.to_string())),
        SeaValue::Bytes(v) => v.map_or(Value::Null, |b| Value::Blob(*b)),
        SeaValue::ChronoDate(v) => v.map_or(Value::Null, |d| Value::Text(d.to_string())),
        SeaValue::ChronoTime(v) => v.map_or(Value::Null, |t| Value::Text(t.to_string())),
        SeaValue::ChronoDateTime(v) => v.map_or(Value::Null, |dt| Value::Text(dt.to_string())),
        SeaValue::ChronoDateTimeUtc(v) => v.map_or(Value::Null, |dt| Value::Text(dt.to_rfc3339())),
        _ => {
            return Err(FetchError::argument(
                "unsupported argument value; convert it before building the request",
            ));
        }
    };
    Ok(argument)
}
