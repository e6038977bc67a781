use crate::ast::*;
use std::borrow::Cow;

/// A builder for a `SELECT` statement.
///
/// Projections and the filter are raw SQL fragments. They are written to the
/// query as-is, so they must never contain unescaped user input.
#[derive(Debug, PartialEq, Clone)]
pub struct Select<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) columns: Vec<Cow<'a, str>>,
    pub(crate) conditions: Option<Cow<'a, str>>,
}

impl<'a> Select<'a> {
    /// Creates a new `SELECT` statement for the given table. Without any
    /// projection, every column is selected.
    ///
    /// ```rust
    /// # use dbfacade::{ast::*, visitor::{Mysql, Visitor}};
    /// # fn main() -> dbfacade::Result<()> {
    /// let query = Select::from_table(("app", "users")).column("id").column("name").filter("id > 10");
    /// let (sql, _) = Mysql::build(query)?;
    ///
    /// assert_eq!("SELECT id, name FROM `app`.`users` WHERE id > 10", sql);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Select {
            table: table.into(),
            columns: Vec::new(),
            conditions: None,
        }
    }

    /// Adds a projection expression, e.g. a column name or `*`.
    pub fn column<C>(mut self, column: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        self.columns.push(column.into());
        self
    }

    /// Adds several projection expressions.
    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cow<'a, str>>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Sets the raw `WHERE` expression.
    pub fn filter<C>(mut self, conditions: C) -> Self
    where
        C: Into<Cow<'a, str>>,
    {
        self.conditions = Some(conditions.into());
        self
    }
}
