//! An abstract syntax tree for the statements the facade issues.
//!
//! The ast module only describes statements. Turning them into SQL with
//! placeholders is the job of the [visitor](../visitor/index.html) module.
mod create;
mod delete;
mod insert;
mod query;
mod select;
mod table;
mod update;
mod values;

pub use create::{CreateDatabase, CreateTable, TableSource};
pub use delete::Delete;
pub use insert::Insert;
pub use query::Query;
pub use select::Select;
pub use table::Table;
pub use update::Update;
pub use values::Value;

pub(crate) use values::Params;
