//! Record mapping and cursor-based fetching for an embedded SQL engine.
//!
//! Provides declarative table/selection metadata for record types, request
//! building with quoted identifiers, and a forward-only cursor that decodes
//! statement rows into typed values through one reused row buffer.
//!
//! # Quick Start
//!
//! ## Declare a record
//!
//! ```ignore
//! record! {
//!     #[derive(Debug, Clone)]
//!     pub struct Player {
//!         pub id: i64,
//!         pub name: String,
//!         pub score: i64,
//!     }
//! }
//! // Table name derives from the type name: "player".
//! // An explicit `table = "players",` line overrides it.
//! ```
//!
//! ## Fetch
//!
//! ```ignore
//! use silt_orm::{Expr, Order, Alias, FetchRequestBuilder};
//!
//! // Request-based, against a connection:
//! let players: Vec<Player> = FetchRequestBuilder::new()
//!     .filter(Expr::col(Alias::new("score")).gt(1000))
//!     .order_by_primary_key(&mut conn)?
//!     .fetch_all(&mut conn)?;
//!
//! // Statement-based, one row at a time:
//! let mut cursor = Player::fetch_cursor(&mut statement, None, None)?;
//! while let Some(player) = cursor.try_next()? {
//!     println!("{player:?}");
//! }
//!
//! // Raw SQL:
//! let best: Option<Player> = FetchRequest::raw(
//!     r#"SELECT * FROM "player" WHERE "score" >= ?"#,
//!     vec![Value::Integer(1000)],
//!     None,
//! )
//! .fetch_one(&mut conn)?;
//! ```
//!
//! ## Custom column decoding
//!
//! ```ignore
//! impl FetchValue for PlayerId {
//!     fn fetch(row: &Row, col: &str) -> anyhow::Result<Self> {
//!         let id: i64 = FetchValue::fetch(row, col)?;
//!         Ok(PlayerId(id))
//!     }
//! }
//! ```

mod cursor;
mod error;
mod primary_key;
mod record;
mod request;
mod selection;
mod table;

pub use cursor::RecordCursor;
pub use error::FetchError;
pub use primary_key::primary_key_column;
pub use record::{FetchValue, Record};
pub use request::{FetchRequest, FetchRequestBuilder};
// Re-export engine-boundary types used throughout the fetch API.
pub use silt_sql::{Connection, EngineError, PrimaryKey, Row, RowAdapter, Statement, Step, Value};
pub use selection::Selectable;
pub use table::{derived_table_name, table_name};

// Filter and ordering expressions are spliced into requests pre-built; these
// re-exports are what callers need to construct them.
pub use sea_query::{Alias, Expr, ExprTrait, Order, SimpleExpr};

// Re-export for `record!` macro expansion only.
#[doc(hidden)]
pub use anyhow;
