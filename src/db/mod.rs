//! Database module: models, schema and repository queries.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `RoutineStorage` pool wrapper and schema bootstrap
//! - `users.rs`, `fitness.rs`, `catalog.rs`, `ledger.rs`: per-table queries

pub mod catalog;
pub mod fitness;
pub mod ledger;
pub mod models;
pub mod schema;
pub mod sqlite;
pub mod users;

pub use models::{DbCategory, DbFitness, DbItem, DbLedgerEntry, DbUser};
pub use schema::SQLITE_INIT;
pub use sqlite::{RoutineStorage, SqlitePool};
