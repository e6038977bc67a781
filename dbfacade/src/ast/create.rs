use crate::ast::*;
use std::borrow::Cow;

/// Where the columns of a new table come from.
#[derive(Debug, PartialEq, Clone)]
pub enum TableSource<'a> {
    /// Column names with their raw SQL definitions, e.g. `INT NOT NULL`.
    Columns(Vec<(Cow<'a, str>, Cow<'a, str>)>),
    /// The result of a query over an existing table.
    Select(Select<'a>),
}

/// A builder for a `CREATE TABLE IF NOT EXISTS` statement.
#[derive(Debug, PartialEq, Clone)]
pub struct CreateTable<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) source: TableSource<'a>,
}

impl<'a> CreateTable<'a> {
    /// ```rust
    /// # use dbfacade::{ast::*, visitor::{Mysql, Visitor}};
    /// # fn main() -> dbfacade::Result<()> {
    /// let query = CreateTable::new(("app", "users"))
    ///     .column("id", "INT NOT NULL AUTO_INCREMENT PRIMARY KEY")
    ///     .column("name", "VARCHAR(50) NOT NULL");
    ///
    /// let (sql, _) = Mysql::build(query)?;
    ///
    /// assert_eq!(
    ///     "CREATE TABLE IF NOT EXISTS `app`.`users` (`id` INT NOT NULL AUTO_INCREMENT PRIMARY KEY, `name` VARCHAR(50) NOT NULL)",
    ///     sql
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        CreateTable {
            table: table.into(),
            source: TableSource::Columns(Vec::new()),
        }
    }

    /// Adds a column definition. Replaces a previously set `as_select`.
    pub fn column<K, D>(mut self, name: K, definition: D) -> Self
    where
        K: Into<Cow<'a, str>>,
        D: Into<Cow<'a, str>>,
    {
        if let TableSource::Select(_) = self.source {
            self.source = TableSource::Columns(Vec::new());
        }

        if let TableSource::Columns(ref mut columns) = self.source {
            columns.push((name.into(), definition.into()));
        }

        self
    }

    /// Creates the table from the result of a query.
    pub fn as_select(mut self, select: Select<'a>) -> Self {
        self.source = TableSource::Select(select);
        self
    }
}

/// A builder for a `CREATE DATABASE IF NOT EXISTS` statement.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CreateDatabase<'a> {
    pub(crate) name: Cow<'a, str>,
}

impl<'a> CreateDatabase<'a> {
    pub fn if_not_exists<N>(name: N) -> Self
    where
        N: Into<Cow<'a, str>>,
    {
        CreateDatabase { name: name.into() }
    }
}
