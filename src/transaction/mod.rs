//! Transactions: the domain types, form validation, SQL text and schema.

mod db;
mod domain;
mod form;
mod record;
mod statement;

pub use db::{Uniqueness, create_transaction_table, map_transaction_row};
pub use domain::{Column, TableName, Transaction};
pub use form::TransactionForm;
pub use record::Record;
pub use statement::{delete_statement, insert_statement, select_all_statement, update_statement};
