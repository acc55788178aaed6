use crate::{EngineError, Statement};

/// Shape of a table's declared primary key, as reported by schema metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKey {
    /// No explicit primary key; the engine's implicit `rowid` stands in.
    Implicit,
    /// A single declared key column.
    Single(String),
    /// A compound key over two or more columns.
    Compound(Vec<String>),
}

/// An open connection to the embedded engine.
///
/// All statement preparation and stepping for one connection must be
/// funneled through a single logical thread of execution (a queue, a lock,
/// or a single-threaded runtime). Rows read while another cursor steps the
/// same connection are contractually unreliable.
pub trait Connection {
    /// Statement handle type produced by [`Connection::prepare`].
    type Statement: Statement;

    /// Prepares `sql` for execution.
    fn prepare(&mut self, sql: &str) -> Result<Self::Statement, EngineError>;

    /// Looks up the primary key declared for `table`.
    ///
    /// # Errors
    ///
    /// Fails when the table does not exist in the schema; the lookup failure
    /// is reported, never swallowed.
    fn primary_key(&mut self, table: &str) -> Result<PrimaryKey, EngineError>;
}
