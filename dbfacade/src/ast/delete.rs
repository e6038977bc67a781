use crate::ast::*;
use std::borrow::Cow;

/// A builder for a `DELETE` statement.
#[derive(Debug, PartialEq, Clone)]
pub struct Delete<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) conditions: Option<Cow<'a, str>>,
}

impl<'a> Delete<'a> {
    /// Creates a new `DELETE` statement for the given table. Without a filter
    /// every row is removed.
    pub fn from_table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Delete {
            table: table.into(),
            conditions: None,
        }
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
