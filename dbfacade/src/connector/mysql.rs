mod conversion;
mod error;

use super::{metrics, ConnectionInfo, Queryable, ResultSet};
use crate::{
    ast::Value,
    error::{Error, ErrorKind},
};
use async_trait::async_trait;
use mysql_async::{
    self as my,
    prelude::{Protocol, Queryable as _},
};
use tokio::sync::Mutex;
use tracing::info;

/// A connector interface for the MySQL database.
///
/// Calls on one connection are serialized. After [close](#method.close) every
/// call fails with `NotConnected`.
#[derive(Debug)]
pub struct Mysql {
    pub(crate) conn: Mutex<Option<my::Conn>>,
}

impl Mysql {
    /// Opens a new session, failing with `ConnectTimeout` if the server does not
    /// answer within the configured connect timeout.
    pub async fn new(info: &ConnectionInfo) -> crate::Result<Self> {
        let opts = info.to_opts_builder();
        let timeout = info.connect_timeout();

        let conn = metrics::connect("mysql", || async move {
            let conn = tokio::time::timeout(timeout, my::Conn::new(opts)).await??;
            Ok::<_, Error>(conn)
        })
        .await?;

        info!(host = info.host(), port = info.port(), "connected to MySQL");

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }
}

async fn collect_results<P>(mut results: my::QueryResult<'_, 'static, P>) -> crate::Result<ResultSet>
where
    P: Protocol,
{
    let columns = results
        .columns_ref()
        .iter()
        .map(|column| column.name_str().into_owned())
        .collect();

    let last_insert_id = results.last_insert_id();
    let rows = results.collect::<my::Row>().await?;
    let affected_rows = results.affected_rows();

    let mut result_set = ResultSet::new(columns, Vec::with_capacity(rows.len()));

    for row in rows {
        result_set.rows.push(conversion::take_row(row)?);
    }

    result_set.affected_rows = affected_rows;
    result_set.last_insert_id = last_insert_id.filter(|id| *id > 0);

    Ok(result_set)
}

fn not_connected() -> Error {
    Error::builder(ErrorKind::NotConnected).build()
}

#[async_trait]
impl Queryable for Mysql {
    async fn query_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<ResultSet> {
        metrics::query("mysql.query_raw", sql, params, move || async move {
            let mut guard = self.conn.lock().await;
            let conn = guard.as_mut().ok_or_else(not_connected)?;

            // Statements without parameters go over the text protocol, so
            // commands that cannot be prepared still work.
            if params.is_empty() {
                let results = conn.query_iter(sql).await?;
                collect_results(results).await
            } else {
                let results = conn.exec_iter(sql, conversion::conv_params(params)?).await?;
                collect_results(results).await
            }
        })
        .await
    }

    async fn execute_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<u64> {
        let result_set = self.query_raw(sql, params).await?;
        Ok(result_set.affected_rows())
    }

    async fn raw_cmd(&self, cmd: &str) -> crate::Result<()> {
        metrics::query("mysql.raw_cmd", cmd, &[], move || async move {
            let mut guard = self.conn.lock().await;
            let conn = guard.as_mut().ok_or_else(not_connected)?;

            conn.query_drop(cmd).await?;

            Ok(())
        })
        .await
    }

    async fn version(&self) -> crate::Result<Option<String>> {
        let query = r#"SELECT @@GLOBAL.version version"#;
        let rows = self.query_raw(query, &[]).await?;

        let version_string = rows
            .first()
            .and_then(|row| row.get("version").and_then(|version| version.as_str()).map(ToString::to_string));

        Ok(version_string)
    }

    async fn close(&self) -> crate::Result<()> {
        let conn = self.conn.lock().await.take();

        if let Some(conn) = conn {
            conn.disconnect().await?;
            info!("disconnected from MySQL");
        }

        Ok(())
    }
}
