//! Implements a SQLite backed transaction store.

use std::path::Path;

use rusqlite::{Connection, Params, params_from_iter, types::Value};

use crate::{
    Error,
    transaction::{
        Column, Record, TableName, Transaction, delete_statement, insert_statement,
        map_transaction_row, select_all_statement, update_statement,
    },
};

/// One result row, with SQLite's dynamic typing preserved.
pub type RowValues = Vec<Value>;

/// Stores transactions in a SQLite database.
///
/// The store owns a single connection for its whole life. Call
/// [TransactionStore::close] to release it and see any error from closing;
/// dropping the store also releases the connection.
///
/// The store never creates its table. See
/// [create_transaction_table](crate::create_transaction_table).
#[derive(Debug)]
pub struct TransactionStore {
    connection: Connection,
    table: TableName,
}

impl TransactionStore {
    /// Open the database at `path`, creating the file if it does not exist.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let connection = Connection::open(path)?;
        tracing::debug!("Opened database at {path:?}");

        Ok(Self::from_connection(connection))
    }

    /// Open a private, in-memory database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, Error> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// Create a store for an existing SQLite `connection`.
    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection,
            table: TableName::default(),
        }
    }

    /// The table the convenience methods ([TransactionStore::insert],
    /// [TransactionStore::delete] etc.) operate on.
    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Close the connection.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if SQLite refuses to close, e.g. because a
    /// statement is still in use. The connection is released regardless.
    pub fn close(self) -> Result<(), Error> {
        self.connection.close().map_err(|(_, error)| error)?;
        tracing::info!("Database connection closed successfully.");

        Ok(())
    }

    /// Insert `transaction` into the default table.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateTransaction] if the table enforces uniqueness and an
    ///   identical transaction exists,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn insert(&self, transaction: &Transaction) -> Result<(), Error> {
        self.insert_into(&self.table, &Record::from(transaction))
    }

    /// Insert the fields of `record` into `table`.
    ///
    /// The column list is exactly the columns in `record`. Values are bound as
    /// parameters and the row is committed immediately.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyRecord] if `record` has no fields,
    /// - [Error::DuplicateTransaction] if a uniqueness constraint rejects the row,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn insert_into(&self, table: &TableName, record: &Record) -> Result<(), Error> {
        let sql = insert_statement(table, record)?;

        self.execute(&sql, params_from_iter(record.values()))
            .inspect_err(|error| {
                if *error == Error::DuplicateTransaction {
                    tracing::warn!("Rejected duplicate transaction {record:?}");
                }
            })?;

        Ok(())
    }

    /// Delete every transaction in the default table equal to `transaction`.
    ///
    /// Returns the number of rows deleted, which is zero when nothing matched.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn delete(&self, transaction: &Transaction) -> Result<usize, Error> {
        self.delete_from(&self.table, &Record::from(transaction))
    }

    /// Delete every row of `table` whose columns equal all the fields in
    /// `record`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyRecord] if `record` has no fields,
    /// - or [Error::SqlError] if there is an SQL error.
    pub fn delete_from(&self, table: &TableName, record: &Record) -> Result<usize, Error> {
        let sql = delete_statement(table, record)?;

        self.execute(&sql, params_from_iter(record.values()))
    }

    /// Set `column` to `new_value` on every row of the default table matching
    /// `condition`.
    ///
    /// Returns the number of rows changed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyRecord] if `condition` has no fields,
    /// - [Error::DuplicateTransaction] if the change would duplicate a row in a
    ///   table that enforces uniqueness,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn update(
        &self,
        column: Column,
        new_value: impl Into<Value>,
        condition: &Record,
    ) -> Result<usize, Error> {
        self.update_in(&self.table, column, new_value, condition)
    }

    /// Like [TransactionStore::update] but for an explicit `table`.
    ///
    /// # Errors
    /// See [TransactionStore::update].
    pub fn update_in(
        &self,
        table: &TableName,
        column: Column,
        new_value: impl Into<Value>,
        condition: &Record,
    ) -> Result<usize, Error> {
        let sql = update_statement(table, column, condition)?;
        let new_value = new_value.into();
        let params = std::iter::once(&new_value).chain(condition.values());

        self.execute(&sql, params_from_iter(params))
    }

    /// Every row of the default table in storage order.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error, e.g. the table
    /// does not exist.
    pub fn query_all(&self) -> Result<Vec<RowValues>, Error> {
        self.query_all_from(&self.table)
    }

    /// Every row of `table` in storage order.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error, e.g. the table
    /// does not exist.
    pub fn query_all_from(&self, table: &TableName) -> Result<Vec<RowValues>, Error> {
        self.query(&select_all_statement(table))
    }

    /// Run arbitrary SQL and return every result row.
    ///
    /// Statements that produce no rows (e.g. `UPDATE`) return an empty vector.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if `sql` is invalid or fails.
    pub fn query(&self, sql: &str) -> Result<Vec<RowValues>, Error> {
        tracing::debug!("Running query: {sql}");

        let mut statement = self.connection.prepare(sql)?;
        let column_count = statement.column_count();

        statement
            .query_map([], |row| {
                (0..column_count)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<Result<RowValues, _>>()
            })?
            .map(|maybe_row| maybe_row.map_err(|error| error.into()))
            .collect()
    }

    /// Every transaction in the default table, in storage order.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn transactions(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .prepare(&format!(
                "SELECT date, payee, amount, category FROM \"{}\"",
                self.table
            ))?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// The transactions in `category`, in storage order.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn transactions_in_category(&self, category: &str) -> Result<Vec<Transaction>, Error> {
        self.connection
            .prepare(&format!(
                "SELECT date, payee, amount, category FROM \"{}\" WHERE category = ?1",
                self.table
            ))?
            .query_map([category], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// The distinct categories, ordered alphabetically.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn categories(&self) -> Result<Vec<String>, Error> {
        self.connection
            .prepare(&format!(
                "SELECT DISTINCT category FROM \"{}\" ORDER BY category ASC",
                self.table
            ))?
            .query_map([], |row| row.get(0))?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// The sum of the amounts in `category`, or zero if it has no transactions.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn category_total(&self, category: &str) -> Result<f64, Error> {
        self.connection
            .query_row(
                &format!(
                    "SELECT TOTAL(amount) FROM \"{}\" WHERE category = ?1",
                    self.table
                ),
                [category],
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }

    /// The number of transactions in the default table.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    pub fn count(&self) -> Result<u64, Error> {
        self.connection
            .query_row(
                &format!("SELECT COUNT(*) FROM \"{}\"", self.table),
                [],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count as u64)
            .map_err(|error| error.into())
    }

    fn execute(&self, sql: &str, params: impl Params) -> Result<usize, Error> {
        tracing::debug!("Executing statement: {sql}");

        let rows_affected = self.connection.execute(sql, params)?;

        Ok(rows_affected)
    }
}
