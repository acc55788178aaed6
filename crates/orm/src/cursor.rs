use std::marker::PhantomData;

use silt_sql::{Row, RowAdapter, Statement, Step, Value};

use crate::{FetchError, Record};

/// A forward-only, single-pass cursor decoding statement rows into records.
///
/// The cursor owns one [`Row`] buffer which the statement rewrites in place
/// on every step; each successful step decodes that buffer into a fresh
/// record before the next step invalidates it. After the first
/// end-of-results or the first error the cursor is permanently exhausted:
/// further calls return `Ok(None)` without touching the statement, and the
/// cursor never resets itself.
///
/// Rows arrive in result order, each exactly once. If the underlying table
/// is mutated while the cursor iterates, the remaining rows are unspecified
/// (not memory-unsafe, but contractually unreliable).
pub struct RecordCursor<S: Statement, R: Record> {
    statement: S,
    row: Row,
    done: bool,
    _marker: PhantomData<R>,
}

impl<S: Statement, R: Record> RecordCursor<S, R> {
    /// Opens a cursor over `statement`, resetting its execution position and
    /// optionally rebinding `arguments`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Execute`] when the reset fails.
    pub fn new(
        mut statement: S, arguments: Option<Vec<Value>>, adapter: Option<RowAdapter>,
    ) -> Result<Self, FetchError> {
        if let Err(error) = statement.reset(arguments) {
            return Err(FetchError::execute(error, &statement));
        }
        let row = Row::with_adapter(statement.column_names(), adapter);
        Ok(Self {
            statement,
            row,
            done: false,
            _marker: PhantomData,
        })
    }

    /// Advances one step and decodes the next record, or returns `Ok(None)`
    /// at the end of results.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Execute`] when the engine reports a failure and
    /// [`FetchError::Decode`] when the record constructor rejects the row.
    /// Either failure exhausts the cursor: records already returned remain
    /// valid, but every later call yields `Ok(None)`.
    pub fn try_next(&mut self) -> Result<Option<R>, FetchError> {
        if self.done {
            return Ok(None);
        }

        match self.statement.step() {
            Ok(Step::Row) => {
                if let Err(error) = self.statement.read_row(self.row.values_mut()) {
                    self.done = true;
                    return Err(FetchError::execute(error, &self.statement));
                }
                match R::from_row(&self.row) {
                    Ok(record) => Ok(Some(record)),
                    Err(error) => {
                        self.done = true;
                        Err(FetchError::Decode(error))
                    }
                }
            }
            Ok(Step::Done) => {
                self.done = true;
                Ok(None)
            }
            Err(error) => {
                self.done = true;
                Err(FetchError::execute(error, &self.statement))
            }
        }
    }

    /// Returns `true` once the cursor has reached its terminal state.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.done
    }
}
