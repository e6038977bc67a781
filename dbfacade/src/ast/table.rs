use std::borrow::Cow;

/// A table, optionally qualified with the database it lives in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table<'a> {
    pub(crate) name: Cow<'a, str>,
    pub(crate) database: Option<Cow<'a, str>>,
}

impl<'a> Table<'a> {
    /// Define in which database the table is located.
    pub fn database<T>(mut self, database: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        self.database = Some(database.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<'a> From<&'a str> for Table<'a> {
    fn from(s: &'a str) -> Table<'a> {
        Table {
            name: Cow::Borrowed(s),
            database: None,
        }
    }
}

impl From<String> for Table<'_> {
    fn from(s: String) -> Self {
        Table {
            name: Cow::Owned(s),
            database: None,
        }
    }
}

impl<'a> From<(&'a str, &'a str)> for Table<'a> {
    fn from((database, table): (&'a str, &'a str)) -> Table<'a> {
        Table::from(table).database(database)
    }
}

impl From<(String, String)> for Table<'_> {
    fn from((database, table): (String, String)) -> Self {
        Table::from(table).database(database)
    }
}
