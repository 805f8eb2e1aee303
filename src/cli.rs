//! The command-line front end: turns user commands into store calls and
//! renders the results.
//!
//! After every write the full list of transactions is printed again, so the
//! user always sees the current state of the table.

use std::io::Write;

use rusqlite::types::Value;
use time::OffsetDateTime;

use crate::{Column, Error, Record, Transaction, TransactionForm, TransactionStore};

/// Where the database lives unless `--db-path` says otherwise.
pub const DEFAULT_DB_PATH: &str = "transactions.db";

/// The actions a user can take.
#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record a new transaction.
    Add(TransactionArgs),

    /// Remove every transaction matching all of the given fields.
    Remove(TransactionArgs),

    /// Change one field on every transaction matching all of the given fields.
    Edit {
        #[command(flatten)]
        transaction: TransactionArgs,

        /// The field to change.
        #[arg(long, value_enum)]
        column: Column,

        /// The new value for the field.
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Show the recorded transactions.
    List {
        /// Only show transactions in this category.
        #[arg(long)]
        category: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show every category in alphabetical order.
    Categories,

    /// Show the sum of the amounts in a category.
    Total {
        /// The category to sum.
        #[arg(long)]
        category: String,
    },

    /// Run an SQL statement against the database and print the rows.
    Query {
        /// The SQL to run, e.g. "SELECT * FROM transactions".
        sql: String,
    },
}

/// The four transaction fields as given on the command line.
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct TransactionArgs {
    /// When the transaction happened, e.g. 2024-01-31.
    #[arg(long, required_unless_present = "today")]
    pub date: Option<String>,

    /// Use today's date.
    #[arg(long, conflicts_with = "date")]
    pub today: bool,

    /// Who was paid.
    #[arg(long)]
    pub payee: String,

    /// How much was spent.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    /// The category, e.g. Groceries.
    #[arg(long)]
    pub category: String,
}

impl TransactionArgs {
    /// The form these arguments describe, with `--today` resolved to a date.
    pub fn into_form(self) -> TransactionForm {
        let date = if self.today {
            today()
        } else {
            self.date.unwrap_or_default()
        };

        TransactionForm {
            date,
            payee: self.payee,
            amount: self.amount,
            category: self.category,
        }
    }
}

/// Today's date as `YYYY-MM-DD`, using UTC if the local offset is unknown.
pub fn today() -> String {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
        .to_string()
}

/// Carry out `command` against `store`, writing results to `output`.
///
/// A transaction that already exists is reported to the user as a warning
/// rather than an error.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyField] or [Error::InvalidAmount] if the user's input is invalid,
/// - [Error::SqlError] if the store fails,
/// - or [Error::OutputError] if `output` cannot be written to.
pub fn run(
    command: Command,
    store: &TransactionStore,
    output: &mut impl Write,
) -> Result<(), Error> {
    match command {
        Command::Add(args) => add(args, store, output),
        Command::Remove(args) => remove(args, store, output),
        Command::Edit {
            transaction,
            column,
            value,
        } => edit(transaction, column, &value, store, output),
        Command::List { category, json } => list(category.as_deref(), json, store, output),
        Command::Categories => {
            for category in store.categories()? {
                writeln!(output, "{category}")?;
            }

            Ok(())
        }
        Command::Total { category } => {
            let total = store.category_total(&category)?;
            writeln!(output, "{category}: {total:.2}")?;

            Ok(())
        }
        Command::Query { sql } => {
            for row in store.query(&sql)? {
                let line = row.iter().map(format_value).collect::<Vec<_>>().join(" | ");
                writeln!(output, "{line}")?;
            }

            Ok(())
        }
    }
}

fn add(
    args: TransactionArgs,
    store: &TransactionStore,
    output: &mut impl Write,
) -> Result<(), Error> {
    let transaction = args.into_form().validate()?;

    match store.insert(&transaction) {
        Ok(()) => writeln!(output, "Added transaction.")?,
        Err(Error::DuplicateTransaction) => writeln!(
            output,
            "Warning: this transaction has already been recorded, nothing was added."
        )?,
        Err(error) => return Err(error),
    }

    write_table(&store.transactions()?, output)
}

fn remove(
    args: TransactionArgs,
    store: &TransactionStore,
    output: &mut impl Write,
) -> Result<(), Error> {
    let transaction = args.into_form().validate()?;

    match store.delete(&transaction)? {
        0 => writeln!(output, "No matching transaction found.")?,
        count => writeln!(output, "Removed {count} transaction(s).")?,
    }

    write_table(&store.transactions()?, output)
}

fn edit(
    args: TransactionArgs,
    column: Column,
    value: &str,
    store: &TransactionStore,
    output: &mut impl Write,
) -> Result<(), Error> {
    let transaction = args.into_form().validate()?;
    let new_value = column.parse_value(value)?;

    match store.update(column, new_value, &Record::from(&transaction)) {
        Ok(0) => writeln!(output, "No matching transaction found.")?,
        Ok(count) => writeln!(output, "Updated {count} transaction(s).")?,
        Err(Error::DuplicateTransaction) => writeln!(
            output,
            "Warning: the change would duplicate an existing transaction, nothing was changed."
        )?,
        Err(error) => return Err(error),
    }

    write_table(&store.transactions()?, output)
}

fn list(
    category: Option<&str>,
    json: bool,
    store: &TransactionStore,
    output: &mut impl Write,
) -> Result<(), Error> {
    let transactions = match category {
        Some(category) => store.transactions_in_category(category)?,
        None => store.transactions()?,
    };

    if json {
        serde_json::to_writer_pretty(&mut *output, &transactions)?;
        writeln!(output)?;
        Ok(())
    } else {
        write_table(&transactions, output)
    }
}

/// Write `transactions` as an aligned table.
///
/// Amounts use the shortest text that parses back to the stored value, so a
/// row can always be matched again by typing what the table shows.
fn write_table(transactions: &[Transaction], output: &mut impl Write) -> Result<(), Error> {
    if transactions.is_empty() {
        writeln!(output, "No transactions.")?;
        return Ok(());
    }

    let header = ["Date", "Payee", "Amount", "Category"].map(str::to_owned);
    let rows = transactions
        .iter()
        .map(|transaction| {
            [
                transaction.date.clone(),
                transaction.payee.clone(),
                transaction.amount.to_string(),
                transaction.category.clone(),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = header.clone().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(output, "{}", line.trim_end())?;
    }

    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_owned(),
        Value::Integer(integer) => integer.to_string(),
        Value::Real(real) => real.to_string(),
        Value::Text(text) => text.clone(),
        Value::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}
