#![doc = include_str!("../README.md")]

//! # Engine interface boundary
//!
//! Everything here is specified from the mapping layer's point of view: what
//! it needs from a prepared statement, a result row, and a connection's
//! schema metadata. Implementations are expected to wrap an embedded engine
//! whose statements execute step by step and whose tables carry an implicit
//! `rowid` when no explicit primary key is declared.

#![forbid(unsafe_code)]

mod connection;
mod error;
mod row;
mod statement;
mod value;

pub use connection::{Connection, PrimaryKey};
pub use error::EngineError;
pub use row::{Row, RowAdapter};
pub use statement::{Statement, Step};
pub use value::Value;
