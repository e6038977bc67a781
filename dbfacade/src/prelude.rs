//! A "prelude" for users of the `dbfacade` crate.
pub use crate::ast::*;
pub use crate::connector::{ConnectionInfo, Mysql, Queryable, ResultRow, ResultRowRef, ResultSet};
pub use crate::{Database, TableDefinition};
