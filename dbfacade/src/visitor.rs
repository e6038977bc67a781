//! Visitors for reading an abstract SQL syntax tree, generating the query and
//! gathering parameters in the right order.
//!
//! The visitor writes identifiers delimited and escaped, raw fragments (filters
//! and projections) as-is, and every value as a `?` placeholder with the value
//! pushed to the parameter list.
mod mysql;

pub use self::mysql::Mysql;

use crate::ast::*;
use std::{borrow::Cow, fmt};

pub type Result = crate::Result<()>;

/// A function travelling through the query AST, building the final query string
/// and gathering parameters sent to the database together with the query.
pub trait Visitor<'a> {
    /// Opening backtick character to surround identifiers, such as column and table names.
    const C_BACKTICK_OPEN: &'static str;
    /// Closing backtick character to surround identifiers, such as column and table names.
    const C_BACKTICK_CLOSE: &'static str;

    /// Convert the given `Query` to an SQL string and a vector of parameters.
    fn build<Q>(query: Q) -> crate::Result<(String, Vec<Value<'a>>)>
    where
        Q: Into<Query<'a>>;

    /// Write to the query.
    fn write<D: fmt::Display>(&mut self, s: D) -> Result;

    /// Pushes a value to the parameter list.
    fn add_parameter(&mut self, value: Value<'a>);

    /// The placeholder written in place of a parameter.
    fn parameter_substitution(&mut self) -> Result;

    fn visit_parameterized(&mut self, value: Value<'a>) -> Result {
        self.add_parameter(value);
        self.parameter_substitution()
    }

    fn surround_with_backticks(&mut self, part: &str) -> Result {
        let escaped = part.replace(Self::C_BACKTICK_CLOSE, &format!("{0}{0}", Self::C_BACKTICK_CLOSE));

        self.write(Self::C_BACKTICK_OPEN)?;
        self.write(escaped)?;
        self.write(Self::C_BACKTICK_CLOSE)?;

        Ok(())
    }

    /// Writes `part1`.`part2`... for a dotted identifier.
    fn delimited_identifiers(&mut self, parts: &[&str]) -> Result {
        let len = parts.len();

        for (i, part) in parts.iter().enumerate() {
            self.surround_with_backticks(part)?;

            if i < (len - 1) {
                self.write(".")?;
            }
        }

        Ok(())
    }

    /// Writes a comma separated list of delimited column names.
    fn visit_columns(&mut self, columns: &[Cow<'a, str>]) -> Result {
        let len = columns.len();

        for (i, column) in columns.iter().enumerate() {
            self.surround_with_backticks(column)?;

            if i < (len - 1) {
                self.write(", ")?;
            }
        }

        Ok(())
    }

    /// Writes a raw SQL fragment.
    fn visit_raw(&mut self, fragment: &str) -> Result {
        self.write(fragment)
    }

    fn visit_table(&mut self, table: &Table<'a>) -> Result {
        match table.database {
            Some(ref database) => self.delimited_identifiers(&[database.as_ref(), table.name.as_ref()]),
            None => self.delimited_identifiers(&[table.name.as_ref()]),
        }
    }

    fn visit_conditions(&mut self, conditions: Option<Cow<'a, str>>) -> Result {
        if let Some(conditions) = conditions {
            self.write(" WHERE ")?;
            self.visit_raw(&conditions)?;
        }

        Ok(())
    }

    fn visit_query(&mut self, query: Query<'a>) -> Result {
        match query {
            Query::Select(select) => self.visit_select(*select),
            Query::Insert(insert) => self.visit_insert(*insert),
            Query::Update(update) => self.visit_update(*update),
            Query::Delete(delete) => self.visit_delete(*delete),
            Query::CreateTable(create) => self.visit_create_table(*create),
            Query::CreateDatabase(create) => self.visit_create_database(*create),
        }
    }

    fn visit_select(&mut self, select: Select<'a>) -> Result {
        self.write("SELECT ")?;

        if select.columns.is_empty() {
            self.write("*")?;
        } else {
            let len = select.columns.len();

            for (i, column) in select.columns.iter().enumerate() {
                self.visit_raw(column)?;

                if i < (len - 1) {
                    self.write(", ")?;
                }
            }
        }

        self.write(" FROM ")?;
        self.visit_table(&select.table)?;
        self.visit_conditions(select.conditions)
    }

    fn visit_insert(&mut self, insert: Insert<'a>) -> Result;

    fn visit_update(&mut self, update: Update<'a>) -> Result {
        if update.columns.is_empty() {
            return Err(crate::error::ErrorKind::conversion("An UPDATE needs at least one assignment.").into());
        }

        self.write("UPDATE ")?;
        self.visit_table(&update.table)?;
        self.write(" SET ")?;

        let len = update.columns.len();

        for (i, (column, value)) in update.columns.iter().zip(update.values).enumerate() {
            self.surround_with_backticks(column)?;
            self.write(" = ")?;
            self.visit_parameterized(value)?;

            if i < (len - 1) {
                self.write(", ")?;
            }
        }

        self.visit_conditions(update.conditions)
    }

    fn visit_delete(&mut self, delete: Delete<'a>) -> Result {
        self.write("DELETE FROM ")?;
        self.visit_table(&delete.table)?;
        self.visit_conditions(delete.conditions)
    }

    fn visit_create_table(&mut self, create: CreateTable<'a>) -> Result {
        self.write("CREATE TABLE IF NOT EXISTS ")?;
        self.visit_table(&create.table)?;

        match create.source {
            TableSource::Columns(columns) => {
                if columns.is_empty() {
                    return Err(crate::error::ErrorKind::conversion("A table needs at least one column.").into());
                }

                self.write(" (")?;

                let len = columns.len();

                for (i, (name, definition)) in columns.iter().enumerate() {
                    self.surround_with_backticks(name)?;
                    self.write(" ")?;
                    self.visit_raw(definition)?;

                    if i < (len - 1) {
                        self.write(", ")?;
                    }
                }

                self.write(")")
            }
            TableSource::Select(select) => {
                self.write(" AS ")?;
                self.visit_select(select)
            }
        }
    }

    fn visit_create_database(&mut self, create: CreateDatabase<'a>) -> Result {
        self.write("CREATE DATABASE IF NOT EXISTS ")?;
        self.surround_with_backticks(&create.name)
    }
}
