use crate::{
    ast::*,
    error::ErrorKind,
    visitor::{self, Visitor},
};
use std::fmt::{self, Write};
use tracing::debug;

/// A visitor to generate queries for the MySQL database.
///
/// The returned parameter values can be used directly with the `mysql_async` crate.
pub struct Mysql<'a> {
    query: String,
    parameters: Vec<Value<'a>>,
}

impl<'a> Visitor<'a> for Mysql<'a> {
    const C_BACKTICK_OPEN: &'static str = "`";
    const C_BACKTICK_CLOSE: &'static str = "`";

    fn build<Q>(query: Q) -> crate::Result<(String, Vec<Value<'a>>)>
    where
        Q: Into<Query<'a>>,
    {
        let mut mysql = Mysql {
            query: String::with_capacity(4096),
            parameters: Vec::with_capacity(128),
        };

        Mysql::visit_query(&mut mysql, query.into())?;

        debug!(query = %mysql.query, params = %Params(&mysql.parameters), "built statement");

        Ok((mysql.query, mysql.parameters))
    }

    fn write<D: fmt::Display>(&mut self, s: D) -> visitor::Result {
        write!(&mut self.query, "{s}")?;
        Ok(())
    }

    fn add_parameter(&mut self, value: Value<'a>) {
        self.parameters.push(value);
    }

    fn parameter_substitution(&mut self) -> visitor::Result {
        self.write("?")
    }

    fn visit_insert(&mut self, insert: Insert<'a>) -> visitor::Result {
        if insert.columns.is_empty() {
            return Err(ErrorKind::conversion("An INSERT needs at least one column.").into());
        }

        if insert.values.is_empty() {
            return Err(ErrorKind::conversion("An INSERT needs at least one row.").into());
        }

        let expected = insert.columns.len();

        if let Some(row) = insert.values.iter().find(|row| row.len() != expected) {
            return Err(ErrorKind::ColumnCountMismatch {
                expected,
                found: row.len(),
            }
            .into());
        }

        self.write("INSERT INTO ")?;
        self.visit_table(&insert.table)?;
        self.write(" (")?;
        self.visit_columns(&insert.columns)?;
        self.write(") VALUES ")?;

        let rows = insert.values.len();

        for (i, row) in insert.values.into_iter().enumerate() {
            self.write("(")?;

            for (j, value) in row.into_iter().enumerate() {
                self.visit_parameterized(value)?;

                if j < (expected - 1) {
                    self.write(", ")?;
                }
            }

            self.write(")")?;

            if i < (rows - 1) {
                self.write(", ")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build<'a>(q: impl Into<Query<'a>>) -> (String, Vec<Value<'a>>) {
        Mysql::build(q).unwrap()
    }

    #[test]
    fn insert_flattens_rows_into_parameters() {
        let insert = Insert::multi_into(("app", "users"), ["id", "name"])
            .values([Value::from(1), Value::from("Musti")])
            .values([Value::from(2), Value::from("Naukio")]);

        let (sql, params) = build(insert);

        assert_eq!("INSERT INTO `app`.`users` (`id`, `name`) VALUES (?, ?), (?, ?)", sql);
        assert_eq!(
            vec![
                Value::from(1),
                Value::from("Musti"),
                Value::from(2),
                Value::from("Naukio"),
            ],
            params
        );
    }

    #[test]
    fn insert_with_uneven_rows_is_rejected() {
        let insert = Insert::multi_into("users", ["id", "name"]).values([Value::from(1)]);

        let err = Mysql::build(insert).unwrap_err();

        match err.kind() {
            ErrorKind::ColumnCountMismatch { expected, found } => {
                assert_eq!(2, *expected);
                assert_eq!(1, *found);
            }
            e => panic!("Expected ColumnCountMismatch, got {e:?}"),
        }
    }

    #[test]
    fn insert_without_rows_is_rejected() {
        let insert = Insert::multi_into("users", ["id"]);

        assert!(Mysql::build(insert).is_err());
    }

    #[test]
    fn select_without_columns_selects_everything() {
        let (sql, params) = build(Select::from_table(("app", "users")));

        assert_eq!("SELECT * FROM `app`.`users`", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn select_projections_are_raw() {
        let select = Select::from_table(("app", "users"))
            .columns(["COUNT(*) AS total", "name"])
            .filter("name LIKE 'M%'");

        let (sql, _) = build(select);

        assert_eq!(
            "SELECT COUNT(*) AS total, name FROM `app`.`users` WHERE name LIKE 'M%'",
            sql
        );
    }

    #[test]
    fn update_values_are_parameterized() {
        let update = Update::table(("app", "users"))
            .set("name", "Robert'); DROP TABLE users;--")
            .filter("id = 3");

        let (sql, params) = build(update);

        assert_eq!("UPDATE `app`.`users` SET `name` = ? WHERE id = 3", sql);
        assert_eq!(vec![Value::from("Robert'); DROP TABLE users;--")], params);
    }

    #[test]
    fn update_without_assignments_is_rejected() {
        assert!(Mysql::build(Update::table("users")).is_err());
    }

    #[test]
    fn delete_with_and_without_filter() {
        let (all, _) = build(Delete::from_table(("app", "users")));
        let (some, _) = build(Delete::from_table(("app", "users")).filter("id = 1"));

        assert_eq!("DELETE FROM `app`.`users`", all);
        assert_eq!("DELETE FROM `app`.`users` WHERE id = 1", some);
    }

    #[test]
    fn create_table_from_select() {
        let select = Select::from_table(("app", "users")).column("id").filter("active = 1");
        let create = CreateTable::new(("app", "active_users")).as_select(select);

        let (sql, _) = build(create);

        assert_eq!(
            "CREATE TABLE IF NOT EXISTS `app`.`active_users` AS SELECT id FROM `app`.`users` WHERE active = 1",
            sql
        );
    }

    #[test]
    fn create_table_without_columns_is_rejected() {
        assert!(Mysql::build(CreateTable::new("empty")).is_err());
    }

    #[test]
    fn create_database_escapes_backticks() {
        let (sql, _) = build(CreateDatabase::if_not_exists("we`ird"));

        assert_eq!("CREATE DATABASE IF NOT EXISTS `we``ird`", sql);
    }
}
