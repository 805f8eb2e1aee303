//! Expense Tracker is a small, single-user tool for recording expenses.
//!
//! Transactions (a date, payee, amount and category) live in a single SQLite
//! table. [TransactionStore] owns the database connection and maps each
//! operation onto one parameterized SQL statement. The [cli] module is the
//! presentation layer: it validates user input, calls into the store and
//! renders the rows it gets back.

#![warn(missing_docs)]

pub mod cli;
mod logging;
mod store;
pub mod transaction;

pub use logging::setup_logging;
pub use store::{RowValues, TransactionStore};
pub use transaction::{
    Column, Record, TableName, Transaction, TransactionForm, Uniqueness, create_transaction_table,
};

use rusqlite::ffi::{SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction already exists and the table does not allow duplicates.
    ///
    /// This is a recoverable condition: the store is still usable and the
    /// caller should tell the user rather than abort.
    #[error("the transaction already exists in the database")]
    DuplicateTransaction,

    /// A required field was empty.
    #[error("{0} cannot be empty")]
    EmptyField(Column),

    /// The amount could not be parsed as a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The table name is not a plain SQL identifier.
    #[error("\"{0}\" is not a valid table name")]
    InvalidTableName(String),

    /// A delete or update was given a record with no fields to match on.
    #[error("at least one field is needed to match transactions")]
    EmptyRecord,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Results could not be written out.
    #[error("could not write output: {0}")]
    OutputError(String),
}

/// Broad classes of [Error], used by callers to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A write was rejected by a uniqueness constraint.
    UniquenessViolation,
    /// The caller supplied input that should never reach the database.
    MalformedInput,
    /// Any other database error. Not recovered.
    StorageFailure,
    /// Writing results to the user failed.
    Output,
}

impl Error {
    /// The class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DuplicateTransaction => ErrorKind::UniquenessViolation,
            Error::EmptyField(_)
            | Error::InvalidAmount(_)
            | Error::InvalidTableName(_)
            | Error::EmptyRecord => ErrorKind::MalformedInput,
            Error::SqlError(_) => ErrorKind::StorageFailure,
            Error::OutputError(_) => ErrorKind::Output,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY,
                },
                _,
            ) => Error::DuplicateTransaction,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::OutputError(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::OutputError(value.to_string())
    }
}

#[cfg(test)]
mod error_tests {
    use rusqlite::Connection;

    use crate::{Column, Error, ErrorKind};

    #[test]
    fn unique_constraint_failure_maps_to_duplicate() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (name TEXT UNIQUE)", ()).unwrap();
        conn.execute("INSERT INTO t (name) VALUES ('a')", ()).unwrap();

        let error: Error = conn
            .execute("INSERT INTO t (name) VALUES ('a')", ())
            .unwrap_err()
            .into();

        assert_eq!(error, Error::DuplicateTransaction);
        assert_eq!(error.kind(), ErrorKind::UniquenessViolation);
    }

    #[test]
    fn syntax_error_is_a_storage_failure() {
        let conn = Connection::open_in_memory().unwrap();

        let error: Error = conn.execute("SELEC 1", ()).unwrap_err().into();

        assert!(matches!(error, Error::SqlError(_)));
        assert_eq!(error.kind(), ErrorKind::StorageFailure);
    }

    #[test]
    fn input_errors_are_malformed_input() {
        let errors = [
            Error::EmptyField(Column::Payee),
            Error::InvalidAmount("abc".to_owned()),
            Error::InvalidTableName("1abc".to_owned()),
            Error::EmptyRecord,
        ];

        for error in errors {
            assert_eq!(error.kind(), ErrorKind::MalformedInput, "{error}");
        }
    }
}
