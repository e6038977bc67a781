//! An in-memory connection answering statements from a script, for testing the
//! facade without a server.
use async_trait::async_trait;
use dbfacade::{
    ast::Value,
    connector::{Queryable, ResultSet},
    error::{Error, ErrorKind},
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// One statement the connection received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub sql: String,
    pub params: Vec<Value<'static>>,
}

#[derive(Default)]
struct Inner {
    responses: Mutex<VecDeque<dbfacade::Result<ResultSet>>>,
    statements: Mutex<Vec<RecordedStatement>>,
    closed: Mutex<bool>,
}

/// A `Queryable` answering each statement with the next scripted response, and
/// an empty result set once the script runs out. Clones share the script and
/// the record of received statements.
///
/// ```
/// # use test_setup::ScriptedConnection;
/// # use dbfacade::connector::{Queryable, ResultSet};
/// # test_setup::runtime::run_with_tokio(async {
/// let conn = ScriptedConnection::new().respond(ResultSet::default().with_affected_rows(3));
///
/// assert_eq!(3, conn.execute_raw("DELETE FROM `app`.`users`", &[]).await.unwrap());
/// assert_eq!(vec!["DELETE FROM `app`.`users`"], conn.sql_log());
/// # });
/// ```
#[derive(Clone, Default)]
pub struct ScriptedConnection {
    inner: Arc<Inner>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(self, result_set: ResultSet) -> Self {
        self.inner.responses.lock().unwrap().push_back(Ok(result_set));
        self
    }

    /// Queue a failure.
    pub fn fail(self, kind: ErrorKind) -> Self {
        self.inner.responses.lock().unwrap().push_back(Err(Error::from(kind)));
        self
    }

    /// Every statement received so far.
    pub fn statements(&self) -> Vec<RecordedStatement> {
        self.inner.statements.lock().unwrap().clone()
    }

    /// The SQL of every statement received so far.
    pub fn sql_log(&self) -> Vec<String> {
        self.statements().into_iter().map(|s| s.sql).collect()
    }

    pub fn is_closed(&self) -> bool {
        *self.inner.closed.lock().unwrap()
    }

    fn answer(&self, sql: &str, params: &[Value<'_>]) -> dbfacade::Result<ResultSet> {
        if self.is_closed() {
            return Err(Error::from(ErrorKind::NotConnected));
        }

        self.inner.statements.lock().unwrap().push(RecordedStatement {
            sql: sql.to_string(),
            params: params.iter().cloned().map(Value::into_owned).collect(),
        });

        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::default()))
    }
}

#[async_trait]
impl Queryable for ScriptedConnection {
    async fn query_raw(&self, sql: &str, params: &[Value<'_>]) -> dbfacade::Result<ResultSet> {
        self.answer(sql, params)
    }

    async fn execute_raw(&self, sql: &str, params: &[Value<'_>]) -> dbfacade::Result<u64> {
        self.answer(sql, params).map(|result_set| result_set.affected_rows())
    }

    async fn raw_cmd(&self, cmd: &str) -> dbfacade::Result<()> {
        self.answer(cmd, &[]).map(drop)
    }

    async fn version(&self) -> dbfacade::Result<Option<String>> {
        Ok(Some("8.0.0-scripted".to_string()))
    }

    async fn close(&self) -> dbfacade::Result<()> {
        *self.inner.closed.lock().unwrap() = true;
        Ok(())
    }
}

/// The result set the introspection query returns for the given
/// `(schema, table, column, data_type, max_length)` rows, as the text protocol
/// delivers it.
pub fn introspection_result(rows: &[(&str, &str, &str, &str, Option<u64>)]) -> ResultSet {
    let columns = [
        "table_schema",
        "table_name",
        "column_name",
        "data_type",
        "character_maximum_length",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let rows = rows
        .iter()
        .map(|(schema, table, column, data_type, max_length)| {
            vec![
                Value::text(schema.to_string()),
                Value::text(table.to_string()),
                Value::text(column.to_string()),
                Value::text(data_type.to_string()),
                Value::Text(max_length.map(|len| len.to_string().into())),
            ]
        })
        .collect();

    ResultSet::new(columns, rows)
}
