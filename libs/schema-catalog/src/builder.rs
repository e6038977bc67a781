use crate::{Catalog, ColumnRecord};
use tracing::trace;

/// Groups column records into a [`Catalog`].
///
/// Records may arrive in any order. Schema and table keys are created on first
/// sight, and every record appends exactly one descriptor to its table, so
/// repeated `(schema, table, column)` triples show up repeatedly.
#[derive(Debug, Default)]
pub struct SchemaCatalogBuilder {
    catalog: Catalog,
    records: usize,
}

impl SchemaCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    pub fn push(&mut self, record: &ColumnRecord) -> &mut Self {
        self.catalog.push(record);
        self.records += 1;
        self
    }

    /// Number of records pushed so far.
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub fn finish(self) -> Catalog {
        trace!(
            records = self.records,
            schemas = self.catalog.schemas().len(),
            "built schema catalog"
        );

        self.catalog
    }
}

/// Build a fresh catalog from a complete sequence of records.
pub fn build<'a, I>(records: I) -> Catalog
where
    I: IntoIterator<Item = &'a ColumnRecord>,
{
    let mut builder = SchemaCatalogBuilder::new();

    for record in records {
        builder.push(record);
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_builds_empty_catalog() {
        let catalog = build(std::iter::empty());

        assert!(catalog.is_empty());
        assert_eq!(0, catalog.column_count());
    }

    #[test]
    fn builder_counts_pushed_records() {
        let mut builder = SchemaCatalogBuilder::new();
        assert!(builder.is_empty());

        builder
            .push(&ColumnRecord::new("app", "users", "id", "int"))
            .push(&ColumnRecord::new("app", "users", "id", "int"));

        assert_eq!(2, builder.len());
        assert_eq!(2, builder.finish().column_count());
    }
}
