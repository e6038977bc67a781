//! The database facade: one named MySQL database, its session and the cached
//! schema catalog.
use crate::{
    ast::*,
    connector::{ConnectionInfo, Mysql, Queryable, ResultRow, ResultSet},
    error::{Error, ErrorKind},
};
use indoc::indoc;
use schema_catalog::{Catalog, ColumnRecord};
use std::borrow::Cow;
use tracing::{debug, info, warn};

/// Every column of every user table. The aliases keep the column names lower
/// case, MySQL 8 returns them upper case otherwise.
const COLUMNS_QUERY: &str = indoc! {r#"
    SELECT
        TABLE_SCHEMA AS table_schema,
        TABLE_NAME AS table_name,
        COLUMN_NAME AS column_name,
        DATA_TYPE AS data_type,
        CHARACTER_MAXIMUM_LENGTH AS character_maximum_length
    FROM information_schema.columns
    WHERE TABLE_SCHEMA NOT IN ('information_schema', 'sys', 'performance_schema', 'mysql')
    ORDER BY TABLE_SCHEMA, TABLE_NAME, ORDINAL_POSITION
"#};

/// How [make_table](struct.Database.html#method.make_table) defines the columns
/// of a new table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableDefinition<'a> {
    /// Column names with their raw SQL types, in order.
    Columns(Vec<(Cow<'a, str>, Cow<'a, str>)>),
    /// Copy structure and rows from another table of the same database.
    FromTable {
        source: Cow<'a, str>,
        /// Projection expressions; all columns if `None`.
        columns: Option<Vec<Cow<'a, str>>>,
        /// A raw `WHERE` expression.
        filter: Option<Cow<'a, str>>,
    },
}

impl<'a> TableDefinition<'a> {
    /// ```
    /// # use dbfacade::TableDefinition;
    /// let definition = TableDefinition::columns([("id", "INT NOT NULL"), ("name", "VARCHAR(50)")]);
    ///
    /// assert!(matches!(definition, TableDefinition::Columns(ref c) if c.len() == 2));
    /// ```
    pub fn columns<I, K, V>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        Self::Columns(columns.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn from_table(source: impl Into<Cow<'a, str>>) -> Self {
        Self::FromTable {
            source: source.into(),
            columns: None,
            filter: None,
        }
    }
}

/// A named MySQL database.
///
/// All statements address tables of this database as `` `name`.`table` ``.
/// Nothing can be queried before [connect](#method.connect) or after
/// [end_connection](#method.end_connection).
pub struct Database {
    name: String,
    info: Option<ConnectionInfo>,
    connection: Option<Box<dyn Queryable>>,
    catalog: Option<Catalog>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("name", &self.name)
            .field("info", &self.info)
            .field("connected", &self.connection.is_some())
            .finish()
    }
}

impl Database {
    /// A database connecting with the `DB_*` environment variables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: None,
            connection: None,
            catalog: None,
        }
    }

    pub fn with_connection_info(name: impl Into<String>, info: ConnectionInfo) -> Self {
        Self {
            info: Some(info),
            ..Self::new(name)
        }
    }

    /// A database using an already open connection. `connect` skips opening
    /// a session while this connection is held.
    pub fn with_queryable(name: impl Into<String>, conn: impl Queryable + 'static) -> Self {
        Self {
            connection: Some(Box::new(conn)),
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// The catalog of the last introspection, without querying.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    fn connection(&self) -> crate::Result<&dyn Queryable> {
        self.connection
            .as_deref()
            .ok_or_else(|| Error::builder(ErrorKind::NotConnected).build())
    }

    /// The session has no default schema, the database may not exist before
    /// `connect` creates it.
    fn session_info(&self) -> crate::Result<ConnectionInfo> {
        let info = match self.info {
            Some(ref info) => info.clone(),
            None => ConnectionInfo::from_env()?,
        };

        if let Some(database) = info.database() {
            debug!(database, "ignoring the default schema of the connection string");
        }

        Ok(info.without_database())
    }

    /// Opens the session, creates the database if missing and refreshes the
    /// catalog.
    #[tracing::instrument(skip(self), fields(database = %self.name))]
    pub async fn connect(&mut self) -> crate::Result<()> {
        if self.connection.is_none() {
            let info = self.session_info()?;
            self.connection = Some(Box::new(Mysql::new(&info).await?));
        }

        let create = CreateDatabase::if_not_exists(self.name.as_str());
        self.connection()?.execute(create.into()).await?;

        let catalog = self.get_databases().await?;
        info!(schemas = catalog.schemas().len(), "database ready");

        Ok(())
    }

    /// Closes the session. `connect` may be called again afterwards.
    #[tracing::instrument(skip(self), fields(database = %self.name))]
    pub async fn end_connection(&mut self) -> crate::Result<()> {
        if let Some(conn) = self.connection.take() {
            conn.close().await?;
            info!("connection closed");
        }

        Ok(())
    }

    /// Introspects every user schema, caches the result and returns it.
    #[tracing::instrument(skip(self), fields(database = %self.name))]
    pub async fn get_databases(&mut self) -> crate::Result<Catalog> {
        let rows = self.connection()?.query_raw(COLUMNS_QUERY, &[]).await?;

        let records = rows
            .into_iter()
            .map(column_record)
            .collect::<crate::Result<Vec<_>>>()?;

        let catalog = schema_catalog::build(&records);

        debug!(
            schemas = catalog.schemas().len(),
            columns = catalog.column_count(),
            "catalog refreshed"
        );

        self.catalog = Some(catalog.clone());

        Ok(catalog)
    }

    /// Inserts `rows` into an existing table with one statement, returning the
    /// number of inserted rows.
    #[tracing::instrument(skip(self, rows), fields(database = %self.name, rows = rows.len()))]
    pub async fn create(&mut self, table: &str, columns: &[&str], rows: Vec<Vec<Value<'_>>>) -> crate::Result<u64> {
        let catalog = self.get_databases().await?;

        if !catalog.has_table(&self.name, table) {
            warn!(table, "table does not exist, nothing inserted");

            let kind = ErrorKind::TableDoesNotExist {
                table: table.to_string(),
            };

            return Err(Error::builder(kind).build());
        }

        if rows.is_empty() {
            return Ok(0);
        }

        let insert = rows.into_iter().fold(
            Insert::multi_into((self.name.as_str(), table), columns.iter().copied()),
            |insert, row| insert.values(row),
        );

        self.connection()?.execute(insert.into()).await
    }

    /// Creates a table if it does not exist yet.
    #[tracing::instrument(skip(self), fields(database = %self.name))]
    pub async fn make_table(&self, table: &str, definition: TableDefinition<'_>) -> crate::Result<()> {
        let target = (self.name.as_str(), table);

        let create = match definition {
            TableDefinition::Columns(columns) => columns
                .into_iter()
                .fold(CreateTable::new(target), |create, (name, tpe)| create.column(name, tpe)),
            TableDefinition::FromTable { source, columns, filter } => {
                let mut select = Select::from_table((self.name.clone(), source.into_owned()));

                if let Some(columns) = columns {
                    select = select.columns(columns);
                }

                if let Some(filter) = filter {
                    select = select.filter(filter);
                }

                CreateTable::new(target).as_select(select)
            }
        };

        self.connection()?.execute(create.into()).await?;

        Ok(())
    }

    /// Selects `properties` (all columns if empty) from rows matching the raw
    /// `filter`.
    #[tracing::instrument(skip(self), fields(database = %self.name))]
    pub async fn read(&self, table: &str, properties: &[&str], filter: Option<&str>) -> crate::Result<ResultSet> {
        let mut select = Select::from_table((self.name.as_str(), table)).columns(properties.iter().copied());

        if let Some(filter) = filter {
            select = select.filter(filter);
        }

        self.connection()?.query(select.into()).await
    }

    /// Sets the given columns on rows matching the raw `key` expression,
    /// returning the number of changed rows.
    #[tracing::instrument(skip(self, assignments), fields(database = %self.name))]
    pub async fn update(&self, table: &str, assignments: Vec<(&str, Value<'_>)>, key: &str) -> crate::Result<u64> {
        let update = assignments
            .into_iter()
            .fold(Update::table((self.name.as_str(), table)), |update, (column, value)| {
                update.set(column, value)
            })
            .filter(key);

        self.connection()?.execute(update.into()).await
    }

    /// Deletes rows matching the raw `key` expression, or every row if `None`.
    #[tracing::instrument(skip(self), fields(database = %self.name))]
    pub async fn delete(&self, table: &str, key: Option<&str>) -> crate::Result<u64> {
        let mut delete = Delete::from_table((self.name.as_str(), table));

        if let Some(key) = key {
            delete = delete.filter(key);
        }

        self.connection()?.execute(delete.into()).await
    }

    /// Runs raw SQL with positional `?` parameters.
    #[tracing::instrument(skip(self, params), fields(database = %self.name))]
    pub async fn query(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<ResultSet> {
        self.connection()?.query_raw(sql, params).await
    }
}

fn column_record(row: ResultRow) -> crate::Result<ColumnRecord> {
    let text = |column: &str| -> crate::Result<String> {
        row.get(column)
            .and_then(|value| value.as_str())
            .map(ToString::to_string)
            .ok_or_else(|| {
                let msg = format!("Introspection row has no text column `{column}`.");
                Error::builder(ErrorKind::conversion(msg)).build()
            })
    };

    let max_length = match row.get("character_maximum_length") {
        Some(value) if !value.is_null() => {
            let length = value.as_i64().ok_or_else(|| {
                let msg = format!("Invalid character_maximum_length: {value}");
                Error::builder(ErrorKind::conversion(msg)).build()
            })?;

            Some(u64::try_from(length)?)
        }
        _ => None,
    };

    let record = ColumnRecord::new(
        text("table_schema")?,
        text("table_name")?,
        text("column_name")?,
        text("data_type")?,
    )
    .with_max_length(max_length);

    Ok(record)
}
