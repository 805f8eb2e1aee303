//! SQL text for the statements the store runs.
//!
//! Values are never written into the SQL text. Every builder emits numbered
//! placeholders (`?1`, `?2`, ...) that line up with [Record::values].

use crate::{
    Error,
    transaction::{Column, Record, TableName},
};

/// `INSERT INTO "<table>" (<columns>) VALUES (?1, ...)` with exactly the
/// columns present in `record`.
///
/// # Errors
/// Returns [Error::EmptyRecord] if `record` has no fields.
pub fn insert_statement(table: &TableName, record: &Record) -> Result<String, Error> {
    if record.is_empty() {
        return Err(Error::EmptyRecord);
    }

    let columns = record
        .columns()
        .map(|column| column.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=record.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("INSERT INTO \"{table}\" ({columns}) VALUES ({placeholders})"))
}

/// `DELETE FROM "<table>" WHERE <column> = ?1 AND ...` matching every field in
/// `record`.
///
/// # Errors
/// Returns [Error::EmptyRecord] if `record` has no fields.
pub fn delete_statement(table: &TableName, record: &Record) -> Result<String, Error> {
    let condition = where_condition(record, 1)?;

    Ok(format!("DELETE FROM \"{table}\" WHERE {condition}"))
}

/// `UPDATE "<table>" SET <column> = ?1 WHERE <condition>`, where the condition
/// placeholders start at `?2`.
///
/// # Errors
/// Returns [Error::EmptyRecord] if `condition` has no fields.
pub fn update_statement(
    table: &TableName,
    column: Column,
    condition: &Record,
) -> Result<String, Error> {
    let condition = where_condition(condition, 2)?;

    Ok(format!("UPDATE \"{table}\" SET {column} = ?1 WHERE {condition}"))
}

/// `SELECT * FROM "<table>"` in storage order.
pub fn select_all_statement(table: &TableName) -> String {
    format!("SELECT * FROM \"{table}\"")
}

/// Join `<column> = ?n` clauses with `AND`, numbering from `first_index`.
fn where_condition(record: &Record, first_index: usize) -> Result<String, Error> {
    if record.is_empty() {
        return Err(Error::EmptyRecord);
    }

    Ok(record
        .columns()
        .enumerate()
        .map(|(i, column)| format!("{column} = ?{}", first_index + i))
        .collect::<Vec<_>>()
        .join(" AND "))
}

#[cfg(test)]
mod tests {
    use crate::{Column, Error, Record, TableName, Transaction};

    use super::{delete_statement, insert_statement, select_all_statement, update_statement};

    fn full_record() -> Record {
        Record::from(&Transaction::new("2024-01-01", "Acme", 12.5, "Food"))
    }

    #[test]
    fn insert_lists_every_field_with_placeholders() {
        let sql = insert_statement(&TableName::default(), &full_record()).unwrap();

        assert_eq!(
            sql,
            "INSERT INTO \"transactions\" (date, payee, amount, category) \
             VALUES (?1, ?2, ?3, ?4)"
        );
    }

    #[test]
    fn insert_only_lists_supplied_fields() {
        let record = Record::new()
            .with(Column::Payee, "Acme".to_owned())
            .with(Column::Amount, 1.0);

        let sql = insert_statement(&TableName::default(), &record).unwrap();

        assert_eq!(
            sql,
            "INSERT INTO \"transactions\" (payee, amount) VALUES (?1, ?2)"
        );
    }

    #[test]
    fn delete_joins_clauses_without_trailing_and() {
        let sql = delete_statement(&TableName::default(), &full_record()).unwrap();

        assert_eq!(
            sql,
            "DELETE FROM \"transactions\" \
             WHERE date = ?1 AND payee = ?2 AND amount = ?3 AND category = ?4"
        );
        assert!(!sql.trim_end().ends_with("AND"));
    }

    #[test]
    fn delete_with_single_field_has_no_and() {
        let record = Record::new().with(Column::Category, "Food".to_owned());

        let sql = delete_statement(&TableName::default(), &record).unwrap();

        assert_eq!(sql, "DELETE FROM \"transactions\" WHERE category = ?1");
    }

    #[test]
    fn update_numbers_condition_after_new_value() {
        let table = TableName::new("expenses").unwrap();
        let condition = Record::new()
            .with(Column::Payee, "Acme".to_owned())
            .with(Column::Date, "2024-01-01".to_owned());

        let sql = update_statement(&table, Column::Amount, &condition).unwrap();

        assert_eq!(
            sql,
            "UPDATE \"expenses\" SET amount = ?1 WHERE payee = ?2 AND date = ?3"
        );
    }

    #[test]
    fn empty_records_are_rejected() {
        let table = TableName::default();

        assert_eq!(
            insert_statement(&table, &Record::new()),
            Err(Error::EmptyRecord)
        );
        assert_eq!(
            delete_statement(&table, &Record::new()),
            Err(Error::EmptyRecord)
        );
        assert_eq!(
            update_statement(&table, Column::Payee, &Record::new()),
            Err(Error::EmptyRecord)
        );
    }

    #[test]
    fn select_all_has_no_order_by() {
        assert_eq!(
            select_all_statement(&TableName::default()),
            "SELECT * FROM \"transactions\""
        );
    }
}
