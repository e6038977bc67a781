use crate::ColumnDescriptor;

/// A table in the catalog, with the schema it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct TableWalker<'a> {
    pub(crate) schema: &'a str,
    pub(crate) name: &'a str,
    pub(crate) columns: &'a [ColumnDescriptor],
}

impl<'a> TableWalker<'a> {
    pub fn schema(&self) -> &'a str {
        self.schema
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The column descriptors, in input order.
    pub fn columns(&self) -> &'a [ColumnDescriptor] {
        self.columns
    }

    /// The first descriptor with the given column name.
    pub fn column(&self, name: &str) -> Option<&'a ColumnDescriptor> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.columns.iter().map(|column| column.name.as_str())
    }
}
