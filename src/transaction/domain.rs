//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::Error;

/// An expense, i.e. an event where money was spent.
///
/// A transaction has no ID. Two transactions with the same four fields are
/// indistinguishable, and matching operations such as
/// [TransactionStore::delete](crate::TransactionStore::delete) act on all of
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the transaction happened, in whatever format the user entered.
    pub date: String,
    /// Who was paid.
    pub payee: String,
    /// The amount of money spent.
    pub amount: f64,
    /// The category used for grouping and filtering, e.g. "Groceries".
    pub category: String,
}

impl Transaction {
    /// Create a transaction without validation.
    ///
    /// Use [TransactionForm](crate::TransactionForm) for user input.
    pub fn new(date: &str, payee: &str, amount: f64, category: &str) -> Self {
        Self {
            date: date.to_owned(),
            payee: payee.to_owned(),
            amount,
            category: category.to_owned(),
        }
    }
}

/// A column of the transaction table.
///
/// Column names in generated SQL only ever come from this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Column {
    /// The `date` column.
    Date,
    /// The `payee` column.
    Payee,
    /// The `amount` column.
    Amount,
    /// The `category` column.
    Category,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; 4] = [
        Column::Date,
        Column::Payee,
        Column::Amount,
        Column::Category,
    ];

    /// The column's name in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Payee => "payee",
            Column::Amount => "amount",
            Column::Category => "category",
        }
    }

    /// Parse user text into a value suitable for this column.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] if `text` is blank, or
    /// [Error::InvalidAmount] if this is the amount column and `text` is not
    /// a finite number.
    pub fn parse_value(&self, text: &str) -> Result<Value, Error> {
        let text = text.trim();

        if text.is_empty() {
            return Err(Error::EmptyField(*self));
        }

        match self {
            Column::Amount => parse_amount(text).map(Value::Real),
            _ => Ok(Value::Text(text.to_owned())),
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an amount, rejecting anything that is not a finite number.
pub(crate) fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

/// A validated SQL table name.
///
/// Table names cannot be bound as statement parameters, so they are limited
/// to an ASCII letter or underscore followed by letters, digits or
/// underscores.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// The table transactions are stored in unless told otherwise.
    pub const DEFAULT: &'static str = "transactions";

    /// Create a table name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidTableName] if `name` is not
    /// a plain identifier.
    pub fn new(name: &str) -> Result<Self, Error> {
        let mut chars = name.chars();

        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid_start && valid_rest {
            Ok(Self(name.to_owned()))
        } else {
            Err(Error::InvalidTableName(name.to_owned()))
        }
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::new(s)
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod table_name_tests {
    use crate::{Error, TableName};

    #[test]
    fn default_is_transactions() {
        assert_eq!(TableName::default().as_ref(), "transactions");
    }

    #[test]
    fn new_succeeds_on_identifier() {
        for name in ["transactions", "_scratch", "t2", "Expenses_2024"] {
            assert!(TableName::new(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn new_fails_on_non_identifier() {
        for name in ["", "2t", "drop table", "t;--", "t\"", "tëst"] {
            assert_eq!(
                TableName::new(name),
                Err(Error::InvalidTableName(name.to_owned()))
            );
        }
    }
}

#[cfg(test)]
mod column_tests {
    use rusqlite::types::Value;

    use crate::{Column, Error};

    #[test]
    fn amount_parses_as_real() {
        assert_eq!(Column::Amount.parse_value(" 12.5 "), Ok(Value::Real(12.5)));
    }

    #[test]
    fn amount_rejects_text() {
        assert_eq!(
            Column::Amount.parse_value("twelve"),
            Err(Error::InvalidAmount("twelve".to_owned()))
        );
    }

    #[test]
    fn amount_rejects_non_finite() {
        for text in ["inf", "NaN", "-infinity"] {
            assert_eq!(
                Column::Amount.parse_value(text),
                Err(Error::InvalidAmount(text.to_owned()))
            );
        }
    }

    #[test]
    fn text_columns_are_trimmed() {
        assert_eq!(
            Column::Payee.parse_value("  Acme "),
            Ok(Value::Text("Acme".to_owned()))
        );
    }

    #[test]
    fn blank_value_is_rejected() {
        assert_eq!(
            Column::Category.parse_value(" \t"),
            Err(Error::EmptyField(Column::Category))
        );
    }
}
