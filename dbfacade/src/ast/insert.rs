use crate::ast::*;
use std::borrow::Cow;

/// A builder for a multi-row `INSERT` statement.
#[derive(Debug, PartialEq, Clone)]
pub struct Insert<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) columns: Vec<Cow<'a, str>>,
    pub(crate) values: Vec<Vec<Value<'a>>>,
}

impl<'a> Insert<'a> {
    /// Creates an `INSERT` statement for the given columns. Rows are added
    /// with [`values`](#method.values).
    ///
    /// ```rust
    /// # use dbfacade::{ast::*, visitor::{Mysql, Visitor}};
    /// # fn main() -> dbfacade::Result<()> {
    /// let query = Insert::multi_into(("app", "users"), ["id", "name"])
    ///     .values([Value::from(1), Value::from("Musti")])
    ///     .values([Value::from(2), Value::from("Naukio")]);
    ///
    /// let (sql, params) = Mysql::build(query)?;
    ///
    /// assert_eq!("INSERT INTO `app`.`users` (`id`, `name`) VALUES (?, ?), (?, ?)", sql);
    /// assert_eq!(4, params.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn multi_into<T, I, K>(table: T, columns: I) -> Self
    where
        T: Into<Table<'a>>,
        I: IntoIterator<Item = K>,
        K: Into<Cow<'a, str>>,
    {
        Insert {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            values: Vec::new(),
        }
    }

    /// Adds a row of values.
    pub fn values<I, V>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value<'a>>,
    {
        self.values.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// The number of rows added so far.
    pub fn row_count(&self) -> usize {
        self.values.len()
    }
}
