//! A database client connector and its connection configuration.
//!
//! The facade talks to the database through the [Queryable] trait. The only
//! driver implementation is [Mysql], built on `mysql_async`.
mod connection_info;
mod metrics;
mod mysql;
mod queryable;
mod result_set;

pub use self::connection_info::*;
pub use self::mysql::Mysql;
pub use self::queryable::Queryable;
pub use self::result_set::*;
