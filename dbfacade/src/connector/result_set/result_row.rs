use crate::ast::Value;
use std::{ops, sync::Arc};

/// An owned version of a `Row` in a `ResultSet`. See
/// [ResultRowRef](struct.ResultRowRef.html) for documentation on data access.
#[derive(Debug, PartialEq)]
pub struct ResultRow {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) values: Vec<Value<'static>>,
}

impl IntoIterator for ResultRow {
    type Item = Value<'static>;
    type IntoIter = std::vec::IntoIter<Value<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// A reference to a `Row` in a `ResultSet`. The columns can be accessed either
/// through their position or using the column name.
///
/// ```
/// # use dbfacade::connector::*;
/// let names = vec!["id".to_string(), "name".to_string()];
/// let rows = vec![vec![1234.into(), "Musti".into()]];
///
/// let result_set = ResultSet::new(names, rows);
/// let row = result_set.first().unwrap();
///
/// assert_eq!(row[0], row["id"]);
/// assert_eq!(row[1], row["name"]);
/// ```
#[derive(Debug, PartialEq)]
pub struct ResultRowRef<'a> {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) values: &'a Vec<Value<'static>>,
}

impl ResultRow {
    /// Take a value from a certain position in the row, if having a value in
    /// that position.
    pub fn at(&self, i: usize) -> Option<&Value<'static>> {
        self.values.get(i)
    }

    /// Take a value with the given column name from the row.
    pub fn get(&self, name: &str) -> Option<&Value<'static>> {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn columns(&self) -> &[String] {
        self.columns.as_slice()
    }

    /// Make a referring [ResultRowRef](struct.ResultRowRef.html).
    pub fn as_ref(&self) -> ResultRowRef<'_> {
        ResultRowRef {
            columns: Arc::clone(&self.columns),
            values: &self.values,
        }
    }
}

impl<'a> ResultRowRef<'a> {
    /// Take a value from a certain position in the row, if having a value in
    /// that position.
    ///
    /// ```
    /// # use dbfacade::connector::*;
    /// # let names = vec!["id".to_string(), "name".to_string()];
    /// # let rows = vec![vec![1234.into(), "Musti".into()]];
    /// # let result_set = ResultSet::new(names, rows);
    /// # let row = result_set.first().unwrap();
    /// assert_eq!(Some(&row[0]), row.at(0));
    /// ```
    pub fn at(&self, i: usize) -> Option<&'a Value<'static>> {
        self.values.get(i)
    }

    /// Take a value with the given column name from the row.
    ///
    /// ```
    /// # use dbfacade::connector::*;
    /// # let names = vec!["id".to_string(), "name".to_string()];
    /// # let rows = vec![vec![1234.into(), "Musti".into()]];
    /// # let result_set = ResultSet::new(names, rows);
    /// # let row = result_set.first().unwrap();
    /// assert_eq!(Some(&row["id"]), row.get("id"));
    /// ```
    pub fn get(&self, name: &str) -> Option<&'a Value<'static>> {
        let values = self.values;
        self.columns.iter().position(|c| c == name).and_then(|idx| values.get(idx))
    }

    pub fn columns(&self) -> &[String] {
        self.columns.as_slice()
    }
}

impl ops::Index<usize> for ResultRow {
    type Output = Value<'static>;

    fn index(&self, index: usize) -> &Value<'static> {
        &self.values[index]
    }
}

impl ops::Index<&str> for ResultRow {
    type Output = Value<'static>;

    fn index(&self, name: &str) -> &Value<'static> {
        let idx = self.columns.iter().position(|c| c == name).unwrap_or_else(|| {
            panic!("Column `{name}` not found in the result row.");
        });

        &self.values[idx]
    }
}

impl<'a> ops::Index<usize> for ResultRowRef<'a> {
    type Output = Value<'static>;

    fn index(&self, index: usize) -> &Value<'static> {
        &self.values[index]
    }
}

impl<'a> ops::Index<&str> for ResultRowRef<'a> {
    type Output = Value<'static>;

    fn index(&self, name: &str) -> &Value<'static> {
        let idx = self.columns.iter().position(|c| c == name).unwrap_or_else(|| {
            panic!("Column `{name}` not found in the result row.");
        });

        &self.values[idx]
    }
}
