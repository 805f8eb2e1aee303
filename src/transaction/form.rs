//! Validation of user-entered transaction fields.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{Column, Transaction, domain::parse_amount},
};

/// The raw text of a transaction as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The date, kept as entered.
    pub date: String,
    /// Who was paid.
    pub payee: String,
    /// The amount, which must parse as a number.
    pub amount: String,
    /// The category.
    pub category: String,
}

impl TransactionForm {
    /// Check every field and build the [Transaction].
    ///
    /// Text fields are trimmed. Fields are checked in table order, so the
    /// first empty column is the one reported.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::EmptyField] if any field is empty or only whitespace,
    /// - or [Error::InvalidAmount] if the amount is not a finite number.
    pub fn validate(&self) -> Result<Transaction, Error> {
        let date = non_empty(&self.date, Column::Date)?;
        let payee = non_empty(&self.payee, Column::Payee)?;
        let amount = non_empty(&self.amount, Column::Amount)?;
        let category = non_empty(&self.category, Column::Category)?;

        let amount = parse_amount(amount)?;

        Ok(Transaction::new(date, payee, amount, category))
    }
}

fn non_empty(text: &str, column: Column) -> Result<&str, Error> {
    let text = text.trim();

    if text.is_empty() {
        Err(Error::EmptyField(column))
    } else {
        Ok(text)
    }
}
