use crate::ast::*;
use std::borrow::Cow;

/// A builder for an `UPDATE` statement.
#[derive(Debug, PartialEq, Clone)]
pub struct Update<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) columns: Vec<Cow<'a, str>>,
    pub(crate) values: Vec<Value<'a>>,
    pub(crate) conditions: Option<Cow<'a, str>>,
}

impl<'a> Update<'a> {
    /// Creates the basis for an `UPDATE` statement to the given table.
    #[inline]
    pub fn table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Update {
            table: table.into(),
            columns: Vec::new(),
            values: Vec::new(),
            conditions: None,
        }
    }

    /// Add a column value assignment to the query.
    ///
    /// ```rust
    /// # use dbfacade::{ast::*, visitor::{Mysql, Visitor}};
    /// # fn main() -> dbfacade::Result<()> {
    /// let query = Update::table(("app", "users")).set("name", "Musti").set("age", 7).filter("id = 1");
    /// let (sql, params) = Mysql::build(query)?;
    ///
    /// assert_eq!("UPDATE `app`.`users` SET `name` = ?, `age` = ? WHERE id = 1", sql);
    /// assert_eq!(vec![Value::from("Musti"), Value::from(7)], params);
    /// # Ok(())
    /// # }
    /// ```
    pub fn set<K, V>(mut self, column: K, value: V) -> Self
    where
        K: Into<Cow<'a, str>>,
        V: Into<Value<'a>>,
    {
        self.columns.push(column.into());
        self.values.push(value.into());
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
