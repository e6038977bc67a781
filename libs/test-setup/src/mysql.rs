use crate::AnyError;
use dbfacade::{connector::ConnectionInfo, prelude::*};
use once_cell::sync::Lazy;
use url::Url;

static MYSQL_TEST_URL: Lazy<Option<String>> =
    Lazy::new(|| std::env::var("TEST_MYSQL").ok().filter(|url| !url.is_empty()));

/// The connection string of the MySQL server for live tests, from the
/// `TEST_MYSQL` environment variable. Live tests skip themselves when this is
/// `None`.
pub fn mysql_test_url() -> Option<&'static str> {
    MYSQL_TEST_URL.as_deref()
}

/// The maximum length of identifiers on mysql is 64 bytes.
///
/// Source: https://dev.mysql.com/doc/mysql-reslimits-excerpt/5.5/en/identifier-length.html
pub fn mysql_safe_identifier(identifier: &str) -> &str {
    if identifier.len() <= 64 {
        identifier
    } else {
        identifier.get(0..64).expect("mysql identifier truncation")
    }
}

/// Drops and recreates the given database, returning its (possibly truncated)
/// name and the connection info of the server without a default database.
pub async fn create_mysql_database<'a>(
    database_url: &str,
    db_name: &'a str,
) -> Result<(&'a str, ConnectionInfo), AnyError> {
    let mut url: Url = database_url.parse()?;
    url.set_path("");

    let db_name = mysql_safe_identifier(db_name);

    debug_assert!(!db_name.is_empty());

    let info = ConnectionInfo::from_url(url.as_str())?;
    let conn = Mysql::new(&info).await?;

    // The two commands have to be run separately on mariadb.
    conn.raw_cmd(&format!("DROP DATABASE IF EXISTS `{db_name}`")).await?;
    conn.raw_cmd(&format!("CREATE DATABASE `{db_name}`")).await?;
    conn.close().await?;

    Ok((db_name, info))
}
