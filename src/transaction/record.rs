//! Column/value pairs used as insert payloads and match conditions.

use rusqlite::types::Value;

use crate::transaction::{Column, Transaction};

/// An ordered set of column/value pairs.
///
/// Each column appears at most once; setting a column again replaces its
/// value in place, keeping its position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(Column, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value`.
    pub fn with(mut self, column: Column, value: impl Into<Value>) -> Self {
        let value = value.into();

        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(field) => field.1 = value,
            None => self.fields.push((column, value)),
        }

        self
    }

    /// The value for `column`, if present.
    pub fn get(&self, column: Column) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, value)| value)
    }

    /// The columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.fields.iter().map(|(column, _)| *column)
    }

    /// The values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&Transaction> for Record {
    fn from(transaction: &Transaction) -> Self {
        Record::new()
            .with(Column::Date, transaction.date.clone())
            .with(Column::Payee, transaction.payee.clone())
            .with(Column::Amount, transaction.amount)
            .with(Column::Category, transaction.category.clone())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use crate::{Column, Record, Transaction};

    #[test]
    fn from_transaction_has_all_columns_in_table_order() {
        let transaction = Transaction::new("2024-01-01", "Acme", 12.5, "Food");

        let record = Record::from(&transaction);

        assert_eq!(record.columns().collect::<Vec<_>>(), Column::ALL);
        assert_eq!(record.get(Column::Amount), Some(&Value::Real(12.5)));
        assert_eq!(
            record.get(Column::Payee),
            Some(&Value::Text("Acme".to_owned()))
        );
    }

    #[test]
    fn setting_a_column_twice_replaces_the_value() {
        let record = Record::new()
            .with(Column::Category, "Food".to_owned())
            .with(Column::Payee, "Acme".to_owned())
            .with(Column::Category, "Rent".to_owned());

        assert_eq!(record.len(), 2);
        assert_eq!(
            record.columns().collect::<Vec<_>>(),
            [Column::Category, Column::Payee]
        );
        assert_eq!(
            record.get(Column::Category),
            Some(&Value::Text("Rent".to_owned()))
        );
    }

    #[test]
    fn new_record_is_empty() {
        let record = Record::new();

        assert!(record.is_empty());
        assert_eq!(record.get(Column::Date), None);
    }
}
