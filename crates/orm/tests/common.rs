//! Common test helpers shared across integration tests: scripted engine
//! doubles and record fixtures.
#![allow(dead_code)]
#![allow(missing_docs)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use silt_orm::{
    Connection, EngineError, PrimaryKey, Selectable, Statement, Step, Value, record,
};

// Common test records used across multiple test files

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Player {
        pub id: i64,
        pub name: String,
        pub score: i64,
    }
}

record! {
    table = "users",
    selection = [Selectable::column("id"), Selectable::column("email")],
    #[derive(Debug, Clone, PartialEq)]
    pub struct UserEmail {
        pub id: i64,
        pub email: String,
    }
}

pub const PLAYER_COLUMNS: &[&str] = &["id", "name", "score"];

/// A result row for the `Player` fixture.
pub fn player_row(id: i64, name: &str, score: i64) -> Outcome {
    Outcome::Row(vec![Value::Integer(id), Value::Text(name.to_owned()), Value::Integer(score)])
}

/// What one call to [`Statement::step`] produces.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// A result row becomes readable.
    Row(Vec<Value>),
    /// The engine fails the step with this code and message.
    Fail { code: i32, message: &'static str },
}

/// A [`Statement`] double that replays a fixed script of step outcomes.
pub struct ScriptedStatement {
    sql: String,
    arguments: Vec<Value>,
    columns: Arc<[String]>,
    script: Vec<Outcome>,
    position: usize,
    current: Option<Vec<Value>>,
    resets: usize,
}

impl ScriptedStatement {
    pub fn new(sql: &str, columns: &[&str], script: Vec<Outcome>) -> Self {
        Self {
            sql: sql.to_owned(),
            arguments: Vec::new(),
            columns: columns.iter().map(|&name| name.to_owned()).collect(),
            script,
            position: 0,
            current: None,
            resets: 0,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Statement for ScriptedStatement {
    fn step(&mut self) -> Result<Step, EngineError> {
        let outcome = self.script.get(self.position).cloned();
        match outcome {
            None => {
                self.current = None;
                Ok(Step::Done)
            }
            Some(Outcome::Row(values)) => {
                self.position += 1;
                self.current = Some(values);
                Ok(Step::Row)
            }
            Some(Outcome::Fail { code, message }) => {
                self.position += 1;
                self.current = None;
                Err(EngineError::new(code, message))
            }
        }
    }

    fn reset(&mut self, arguments: Option<Vec<Value>>) -> Result<(), EngineError> {
        self.position = 0;
        self.current = None;
        self.resets += 1;
        if let Some(arguments) = arguments {
            self.arguments = arguments;
        }
        Ok(())
    }

    fn sql(&self) -> &str {
        &self.sql
    }

    fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    fn column_names(&self) -> Arc<[String]> {
        Arc::clone(&self.columns)
    }

    fn read_row(&self, into: &mut Vec<Value>) -> Result<(), EngineError> {
        match &self.current {
            Some(values) => {
                into.clear();
                into.extend(values.iter().cloned());
                Ok(())
            }
            None => Err(EngineError::new(21, "no row to read")),
        }
    }
}

/// A [`Connection`] double handing out queued scripted statements and serving
/// primary-key metadata from a fixed schema map.
#[derive(Default)]
pub struct ScriptedConnection {
    primary_keys: HashMap<String, PrimaryKey>,
    statements: VecDeque<ScriptedStatement>,
    prepared: Vec<String>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_primary_key(mut self, table: &str, key: PrimaryKey) -> Self {
        self.primary_keys.insert(table.to_owned(), key);
        self
    }

    #[must_use]
    pub fn with_statement(mut self, statement: ScriptedStatement) -> Self {
        self.statements.push_back(statement);
        self
    }

    /// SQL texts prepared on this connection, in order.
    pub fn prepared_sql(&self) -> &[String] {
        &self.prepared
    }
}

impl Connection for ScriptedConnection {
    type Statement = ScriptedStatement;

    fn prepare(&mut self, sql: &str) -> Result<ScriptedStatement, EngineError> {
        self.prepared.push(sql.to_owned());
        let mut statement = self
            .statements
            .pop_front()
            .ok_or_else(|| EngineError::new(1, format!("unscripted statement: {sql}")))?;
        statement.sql = sql.to_owned();
        Ok(statement)
    }

    fn primary_key(&mut self, table: &str) -> Result<PrimaryKey, EngineError> {
        self.primary_keys
            .get(table)
            .cloned()
            .ok_or_else(|| EngineError::new(1, format!("no such table: {table}")))
    }
}

/// Canonicalize SQL for comparison: strip identifier quotes (quotes inside
/// string literals are preserved) and collapse whitespace.
fn canonicalize_sql(sql: &str) -> String {
    let mut cleaned = String::with_capacity(sql.len());
    let mut in_literal = false;

    for ch in sql.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                cleaned.push(ch);
            }
            '"' if !in_literal => {}
            _ => cleaned.push(ch),
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assert that `actual` contains every fragment, in order, comparing
/// canonicalized forms. Avoids brittle exact matching of generated SQL while
/// still pinning clause order.
#[allow(clippy::missing_panics_doc)]
pub fn assert_sql_contains(actual: &str, fragments: &[&str]) {
    let haystack = canonicalize_sql(actual);
    let mut from = 0usize;

    for fragment in fragments {
        let needle = canonicalize_sql(fragment);
        match haystack[from..].find(&needle) {
            Some(position) => from += position + needle.len(),
            None => panic!(
                "SQL fragment `{needle}` not found after position {from} in `{haystack}`"
            ),
        }
    }
}
