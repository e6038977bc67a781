use crate::error::{DatabaseConstraint, Error, ErrorKind};
use mysql_async as my;

fn server_error(error: my::ServerError) -> Error {
    let code = error.code;

    let kind = match code {
        1062 => {
            let constraint = error
                .message
                .split_whitespace()
                .last()
                .and_then(|s| s.split('\'').nth(1))
                .and_then(|s| s.split('.').last())
                .map(ToString::to_string)
                .map(DatabaseConstraint::Index)
                .unwrap_or(DatabaseConstraint::CannotParse);

            ErrorKind::UniqueConstraintViolation { constraint }
        }
        1049 => {
            let db_name = quoted(error.message.split_whitespace().last());
            ErrorKind::DatabaseDoesNotExist { db_name }
        }
        1044 => {
            let db_name = quoted(error.message.split_whitespace().last());
            ErrorKind::DatabaseAccessDenied { db_name }
        }
        1045 => {
            let user = error
                .message
                .split_whitespace()
                .nth(4)
                .and_then(|s| s.split('@').next())
                .and_then(|s| s.split('\'').nth(1))
                .unwrap_or_default()
                .to_string();

            ErrorKind::AuthenticationFailed { user }
        }
        1146 => {
            let table = error
                .message
                .split_whitespace()
                .nth(1)
                .and_then(|s| s.split('\'').nth(1))
                .and_then(|s| s.split('.').last())
                .unwrap_or_default()
                .to_string();

            ErrorKind::TableDoesNotExist { table }
        }
        1054 => {
            let column = quoted(error.message.split_whitespace().nth(2));
            ErrorKind::ColumnNotFound { column }
        }
        _ => ErrorKind::QueryError(Box::new(error.clone())),
    };

    let mut builder = Error::builder(kind);
    builder.set_original_code(format!("{code}"));
    builder.set_original_message(error.message);

    builder.build()
}

/// The first single-quoted part of a message word.
fn quoted(word: Option<&str>) -> String {
    word.and_then(|s| s.split('\'').nth(1)).unwrap_or_default().to_string()
}

impl From<my::Error> for Error {
    fn from(e: my::Error) -> Error {
        match e {
            my::Error::Server(error) => server_error(error),
            e @ my::Error::Io(_) => Error::builder(ErrorKind::ConnectionError(Box::new(e))).build(),
            e @ my::Error::Driver(my::DriverError::ConnectionClosed) => {
                Error::builder(ErrorKind::ConnectionError(Box::new(e))).build()
            }
            my::Error::Url(e) => Error::builder(ErrorKind::DatabaseUrlIsInvalid(e.to_string())).build(),
            e => Error::builder(ErrorKind::QueryError(Box::new(e))).build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn server(code: u16, message: &str) -> Error {
        Error::from(my::Error::Server(my::ServerError {
            code,
            message: message.to_string(),
            state: "42000".to_string(),
        }))
    }

    #[test]
    fn missing_table() {
        let err = server(1146, "Table 'app.users' doesn't exist");

        match err.kind() {
            ErrorKind::TableDoesNotExist { table } => assert_eq!("users", table),
            e => panic!("Expected TableDoesNotExist, got {e:?}"),
        }

        assert_eq!(Some("1146"), err.original_code());
        assert_eq!(Some("Table 'app.users' doesn't exist"), err.original_message());
    }

    #[test]
    fn unknown_database() {
        let err = server(1049, "Unknown database 'shop'");

        match err.kind() {
            ErrorKind::DatabaseDoesNotExist { db_name } => assert_eq!("shop", db_name),
            e => panic!("Expected DatabaseDoesNotExist, got {e:?}"),
        }
    }

    #[test]
    fn access_denied_to_database() {
        let err = server(1044, "Access denied for user 'app'@'%' to database 'shop'");

        match err.kind() {
            ErrorKind::DatabaseAccessDenied { db_name } => assert_eq!("shop", db_name),
            e => panic!("Expected DatabaseAccessDenied, got {e:?}"),
        }

        assert!(err.is_connection_error());
    }

    #[test]
    fn wrong_password() {
        let err = server(1045, "Access denied for user 'root'@'172.17.0.1' (using password: YES)");

        match err.kind() {
            ErrorKind::AuthenticationFailed { user } => assert_eq!("root", user),
            e => panic!("Expected AuthenticationFailed, got {e:?}"),
        }
    }

    #[test]
    fn unknown_column() {
        let err = server(1054, "Unknown column 'age' in 'field list'");

        match err.kind() {
            ErrorKind::ColumnNotFound { column } => assert_eq!("age", column),
            e => panic!("Expected ColumnNotFound, got {e:?}"),
        }
    }

    #[test]
    fn duplicate_entry() {
        let err = server(1062, "Duplicate entry 'a@b.c' for key 'users.email_unique'");

        match err.kind() {
            ErrorKind::UniqueConstraintViolation { constraint } => {
                assert_eq!(&DatabaseConstraint::Index("email_unique".into()), constraint)
            }
            e => panic!("Expected UniqueConstraintViolation, got {e:?}"),
        }
    }

    #[test]
    fn other_server_errors_are_query_errors() {
        let err = server(1064, "You have an error in your SQL syntax");

        assert!(matches!(err.kind(), ErrorKind::QueryError(_)));
        assert_eq!(Some("1064"), err.original_code());
    }

    #[test]
    fn io_errors_are_connection_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::from(my::Error::Io(my::IoError::Io(io)));

        assert!(err.is_connection_error());
    }
}
