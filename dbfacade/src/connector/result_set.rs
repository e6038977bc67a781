mod result_row;

pub use result_row::*;

use crate::ast::Value;
use serde_json::Map;
use std::sync::Arc;

/// Encapsulates a set of results and their respective column names.
#[derive(Debug, Default, PartialEq)]
pub struct ResultSet {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) rows: Vec<Vec<Value<'static>>>,
    pub(crate) last_insert_id: Option<u64>,
    pub(crate) affected_rows: u64,
}

impl ResultSet {
    /// Creates a new instance, bound to the given column names and result rows.
    pub fn new(names: Vec<String>, rows: Vec<Vec<Value<'static>>>) -> Self {
        Self {
            columns: Arc::new(names),
            rows,
            last_insert_id: None,
            affected_rows: 0,
        }
    }

    pub fn with_last_insert_id(mut self, id: u64) -> Self {
        self.last_insert_id = Some(id);
        self
    }

    pub fn with_affected_rows(mut self, affected_rows: u64) -> Self {
        self.affected_rows = affected_rows;
        self
    }

    /// The last id inserted, if available. Only set if the table uses an
    /// auto-increment id.
    pub fn last_insert_id(&self) -> Option<u64> {
        self.last_insert_id
    }

    /// The number of rows changed by the statement.
    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    /// The column names, in the order the database returned them.
    pub fn columns(&self) -> &[String] {
        self.columns.as_slice()
    }

    /// Returns the number of rows in the `ResultSet`.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the `ResultSet` contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first row of the `ResultSet`, or None if the set is empty.
    pub fn first(&self) -> Option<ResultRowRef<'_>> {
        self.get(0)
    }

    /// Returns a reference to a row in a given position.
    pub fn get(&self, index: usize) -> Option<ResultRowRef<'_>> {
        self.rows.get(index).map(|row| ResultRowRef {
            columns: Arc::clone(&self.columns),
            values: row,
        })
    }

    /// An iterator over references to the rows.
    pub fn iter(&self) -> impl Iterator<Item = ResultRowRef<'_>> + '_ {
        self.rows.iter().map(move |row| ResultRowRef {
            columns: Arc::clone(&self.columns),
            values: row,
        })
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultRow;
    type IntoIter = ResultSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        ResultSetIterator {
            columns: self.columns,
            internal_iterator: self.rows.into_iter(),
        }
    }
}

/// Thin iterator for ResultSet rows.
pub struct ResultSetIterator {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) internal_iterator: std::vec::IntoIter<Vec<Value<'static>>>,
}

impl Iterator for ResultSetIterator {
    type Item = ResultRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.internal_iterator.next().map(|row| ResultRow {
            columns: Arc::clone(&self.columns),
            values: row,
        })
    }
}

/// An array of objects keyed by column name. A repeated column name gets its
/// position as a suffix (`a`, `a_1`), and a value without a column is keyed by
/// its position alone.
impl From<ResultSet> for serde_json::Value {
    fn from(result_set: ResultSet) -> Self {
        let columns = Arc::clone(&result_set.columns);
        let mut result = Vec::with_capacity(result_set.len());

        for row in result_set.into_iter() {
            let mut object = Map::new();

            for (idx, value) in row.into_iter().enumerate() {
                let key = match columns.get(idx) {
                    Some(name) if object.contains_key(name) => format!("{name}_{idx}"),
                    Some(name) => name.clone(),
                    None => idx.to_string(),
                };

                object.insert(key, serde_json::Value::from(value));
            }

            result.push(serde_json::Value::Object(object));
        }

        serde_json::Value::Array(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn users() -> ResultSet {
        let names = vec!["id".to_string(), "name".to_string()];
        let rows = vec![
            vec![Value::from(1), Value::from("Musti")],
            vec![Value::from(2), Value::Text(None)],
        ];

        ResultSet::new(names, rows)
    }

    #[test]
    fn rows_are_reachable_by_position_and_name() {
        let result_set = users();
        let row = result_set.first().unwrap();

        assert_eq!(2, result_set.len());
        assert_eq!(row[0], row["id"]);
        assert_eq!(Some("Musti"), row["name"].as_str());
        assert_eq!(None, row.get("age"));
        assert_eq!(None, row.at(2));
    }

    #[test]
    fn owned_rows_keep_their_columns() {
        let ids: Vec<Option<i64>> = users().into_iter().map(|row| row["id"].as_i64()).collect();

        assert_eq!(vec![Some(1), Some(2)], ids);
    }

    #[test]
    fn result_set_to_json() {
        let json = serde_json::Value::from(users().with_affected_rows(2));

        assert_eq!(
            serde_json::json!([
                { "id": 1, "name": "Musti" },
                { "id": 2, "name": null }
            ]),
            json
        );
    }

    #[test]
    fn repeated_column_names_keep_every_value() {
        let names = vec!["a".to_string(), "a".to_string()];
        let result_set = ResultSet::new(names, vec![vec![Value::from(1), Value::from(2)]]);

        assert_eq!(
            serde_json::json!([{ "a": 1, "a_1": 2 }]),
            serde_json::Value::from(result_set)
        );
    }

    #[test]
    fn values_without_a_column_are_keyed_by_position() {
        let names = vec!["id".to_string()];
        let result_set = ResultSet::new(names, vec![vec![Value::from(1), Value::from("Musti")]]);

        let row = result_set.first().unwrap();
        assert_eq!(Some("Musti"), row.at(1).and_then(|v| v.as_str()));

        assert_eq!(
            serde_json::json!([{ "id": 1, "1": "Musti" }]),
            serde_json::Value::from(result_set)
        );
    }

    #[test]
    fn columns_without_a_value_are_absent() {
        let names = vec!["id".to_string(), "name".to_string()];
        let result_set = ResultSet::new(names, vec![vec![Value::from(1)]]);

        let row = result_set.first().unwrap();
        assert_eq!(None, row.get("name"));

        let owned = result_set.into_iter().next().unwrap();
        assert_eq!(None, owned.get("name"));
        assert_eq!(Some(&Value::from(1)), owned.get("id"));
    }

    #[test]
    fn json_objects_keep_column_order() {
        let json = serde_json::Value::from(users());
        let keys: Vec<&String> = json[0].as_object().unwrap().keys().collect();

        assert_eq!(vec!["id", "name"], keys);
    }
}
