#![deny(unsafe_code, rust_2018_idioms)]

//! This crate contains constants and utilities that are useful for writing tests against the
//! facade: a scripted in-memory connection, and helpers for live MySQL tests.

pub mod mysql;
/// Tokio test runtime utils.
pub mod runtime;
pub mod scripted;

mod logging;

pub use logging::init_logger;
pub use mysql::{create_mysql_database, mysql_safe_identifier, mysql_test_url};
pub use scripted::{introspection_result, RecordedStatement, ScriptedConnection};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;
