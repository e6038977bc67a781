//! Database catalog built from flat `information_schema.columns` metadata.
//!
//! The catalog maps each schema (a database, in MySQL terms) to its tables, and
//! each table to the descriptors of its columns, in the order the metadata rows
//! were encountered.

#![deny(rust_2018_idioms, unsafe_code)]

mod builder;
mod walkers;

pub use builder::{build, SchemaCatalogBuilder};
pub use walkers::TableWalker;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Columns of a single table, in input order.
pub type Columns = Vec<ColumnDescriptor>;

/// Tables of a single schema, in order of first appearance.
pub type Tables = IndexMap<String, Columns>;

/// One row of raw schema-introspection metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRecord {
    /// `TABLE_SCHEMA`
    pub schema_name: String,
    /// `TABLE_NAME`
    pub table_name: String,
    /// `COLUMN_NAME`
    pub column_name: String,
    /// `DATA_TYPE`
    pub data_type: String,
    /// `CHARACTER_MAXIMUM_LENGTH`, absent for types without a character length.
    pub max_length: Option<u64>,
}

impl ColumnRecord {
    pub fn new(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        ColumnRecord {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type: data_type.into(),
            max_length: None,
        }
    }

    pub fn with_max_length(mut self, max_length: impl Into<Option<u64>>) -> Self {
        self.max_length = max_length.into();
        self
    }

    /// The formatted column type, e.g. `varchar(50)` or `int()`.
    pub fn formatted_type(&self) -> String {
        match self.max_length {
            Some(len) => format!("{}({})", self.data_type, len),
            None => format!("{}()", self.data_type),
        }
    }
}

/// The derived summary of a column stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// The column name.
    pub name: String,
    /// The data type with its character length in parentheses.
    #[serde(rename = "type")]
    pub tpe: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, tpe: impl Into<String>) -> Self {
        ColumnDescriptor {
            name: name.into(),
            tpe: tpe.into(),
        }
    }
}

impl From<&ColumnRecord> for ColumnDescriptor {
    fn from(record: &ColumnRecord) -> Self {
        ColumnDescriptor {
            name: record.column_name.clone(),
            tpe: record.formatted_type(),
        }
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.tpe)
    }
}

/// Schema name -> table name -> column descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    schemas: IndexMap<String, Tables>,
}

impl Catalog {
    /// Build a catalog from a sequence of column records. See [`build`].
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ColumnRecord>,
    {
        build(records)
    }

    /// True if the catalog has no schemas.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema names, in order of first appearance.
    pub fn schemas(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.schemas.keys().map(String::as_str)
    }

    /// The tables of a schema.
    pub fn schema(&self, name: &str) -> Option<&Tables> {
        self.schemas.get(name)
    }

    /// Table names of a schema, empty if the schema is unknown.
    pub fn table_names<'a>(&'a self, schema: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.schemas
            .get(schema)
            .into_iter()
            .flat_map(|tables| tables.keys().map(String::as_str))
    }

    /// Walk a single table.
    pub fn table<'a>(&'a self, schema: &str, table: &str) -> Option<TableWalker<'a>> {
        let (schema_name, tables) = self.schemas.get_key_value(schema)?;
        let (table_name, columns) = tables.get_key_value(table)?;

        Some(TableWalker {
            schema: schema_name,
            name: table_name,
            columns,
        })
    }

    /// Walk every table, schema by schema.
    pub fn walk_tables(&self) -> impl Iterator<Item = TableWalker<'_>> + '_ {
        self.schemas.iter().flat_map(|(schema, tables)| {
            tables.iter().map(move |(name, columns)| TableWalker {
                schema,
                name,
                columns,
            })
        })
    }

    pub fn has_table(&self, schema: &str, table: &str) -> bool {
        self.schemas
            .get(schema)
            .map(|tables| tables.contains_key(table))
            .unwrap_or(false)
    }

    /// The total number of column descriptors across all schemas and tables.
    pub fn column_count(&self) -> usize {
        self.schemas
            .values()
            .flat_map(|tables| tables.values())
            .map(Vec::len)
            .sum()
    }

    pub(crate) fn push(&mut self, record: &ColumnRecord) {
        if !self.schemas.contains_key(&record.schema_name) {
            self.schemas.insert(record.schema_name.clone(), Tables::new());
        }

        let tables = &mut self.schemas[&record.schema_name];

        if !tables.contains_key(&record.table_name) {
            tables.insert(record.table_name.clone(), Columns::new());
        }

        tables[&record.table_name].push(ColumnDescriptor::from(record));
    }
}

impl<'a> FromIterator<&'a ColumnRecord> for Catalog {
    fn from_iter<T: IntoIterator<Item = &'a ColumnRecord>>(iter: T) -> Self {
        build(iter)
    }
}

impl FromIterator<ColumnRecord> for Catalog {
    fn from_iter<T: IntoIterator<Item = ColumnRecord>>(iter: T) -> Self {
        let mut builder = SchemaCatalogBuilder::new();

        for record in iter {
            builder.push(&record);
        }

        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_type_with_length() {
        let record = ColumnRecord::new("app", "users", "name", "varchar").with_max_length(50);
        assert_eq!("varchar(50)", record.formatted_type());
    }

    #[test]
    fn formatted_type_without_length_has_empty_parens() {
        let record = ColumnRecord::new("app", "users", "id", "int");
        assert_eq!("int()", record.formatted_type());
    }

    #[test]
    fn has_table_on_unknown_schema() {
        let catalog = Catalog::default();

        assert!(!catalog.has_table("app", "users"));
        assert_eq!(0, catalog.table_names("app").count());
        assert!(catalog.table("app", "users").is_none());
    }

    #[test]
    fn descriptor_serializes_type_key() {
        let descriptor = ColumnDescriptor::new("id", "INT()");
        let json = serde_json::to_string(&descriptor).unwrap();

        assert_eq!(r#"{"name":"id","type":"INT()"}"#, json);
    }
}
