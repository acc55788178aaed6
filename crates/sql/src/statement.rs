use std::sync::Arc;

use crate::{EngineError, Value};

/// Outcome of advancing a prepared statement by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A result row is available for reading.
    Row,
    /// The statement has run to completion.
    Done,
}

/// A prepared statement, executed one step at a time.
///
/// At most one statement per connection may be actively stepped at a time,
/// and stepping must happen on the connection's serial access context.
/// Enforcing that discipline is the connection's job; the statement itself
/// does not lock.
pub trait Statement {
    /// Advances execution by one step.
    fn step(&mut self) -> Result<Step, EngineError>;

    /// Rewinds execution to the start, optionally rebinding arguments.
    ///
    /// `None` keeps the current bindings in place.
    fn reset(&mut self, arguments: Option<Vec<Value>>) -> Result<(), EngineError>;

    /// The SQL text this statement was prepared from.
    fn sql(&self) -> &str;

    /// The currently bound arguments, in binding order.
    fn arguments(&self) -> &[Value];

    /// Names of the result columns, in result order.
    fn column_names(&self) -> Arc<[String]>;

    /// Copies the current row's values into `into`, replacing its contents.
    ///
    /// Only meaningful immediately after [`Statement::step`] returned
    /// [`Step::Row`]; the engine overwrites the underlying data on the next
    /// step.
    fn read_row(&self, into: &mut Vec<Value>) -> Result<(), EngineError>;
}

impl<S: Statement + ?Sized> Statement for &mut S {
    fn step(&mut self) -> Result<Step, EngineError> {
        (**self).step()
    }

    fn reset(&mut self, arguments: Option<Vec<Value>>) -> Result<(), EngineError> {
        (**self).reset(arguments)
    }

    fn sql(&self) -> &str {
        (**self).sql()
    }

    fn arguments(&self) -> &[Value] {
        (**self).arguments()
    }

    fn column_names(&self) -> Arc<[String]> {
        (**self).column_names()
    }

    fn read_row(&self, into: &mut Vec<Value>) -> Result<(), EngineError> {
        (**self).read_row(into)
    }
}
