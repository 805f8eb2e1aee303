//! Schema provisioning and row mapping for the transaction table.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    transaction::{TableName, Transaction},
};

/// Whether the transaction table rejects rows that duplicate all four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Uniqueness {
    /// Add a `UNIQUE(date, payee, amount, category)` constraint.
    #[default]
    Enforced,
    /// Allow identical rows.
    AllowDuplicates,
}

/// Create the transaction table and its category index.
///
/// [TransactionStore](crate::TransactionStore) never calls this; the table is
/// provisioned ahead of time, e.g. by the `create_db` binary.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(
    connection: &Connection,
    table: &TableName,
    uniqueness: Uniqueness,
) -> Result<(), Error> {
    let unique_constraint = match uniqueness {
        Uniqueness::Enforced => ",\n                UNIQUE(date, payee, amount, category)",
        Uniqueness::AllowDuplicates => "",
    };

    connection.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS \"{table}\" (
                date TEXT NOT NULL,
                payee TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL{unique_constraint}
                );

        CREATE INDEX IF NOT EXISTS \"idx_{table}_category\" ON \"{table}\"(category);"
    ))?;

    Ok(())
}

/// Map a `date, payee, amount, category` row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let date = row.get(0)?;
    let payee = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;

    Ok(Transaction {
        date,
        payee,
        amount,
        category,
    })
}
