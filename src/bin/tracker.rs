use std::{
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;

use expense_tracker::{
    Error, ErrorKind, TransactionStore,
    cli::{Command, DEFAULT_DB_PATH, run},
    setup_logging,
};

/// Record and review expenses stored in a SQLite database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database, as created by `create_db`.
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db_path: PathBuf,

    /// Also append debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        print_error(format!("Could not open the log file: {error}"));
        return ExitCode::FAILURE;
    }

    if let Err(message) = validate_db_path(&args.db_path) {
        print_error(message);
        return ExitCode::FAILURE;
    }

    let store = match TransactionStore::open(&args.db_path) {
        Ok(store) => store,
        Err(error) => {
            print_error(format!(
                "Could not open the database at {:?}: {error}",
                args.db_path
            ));
            return ExitCode::FAILURE;
        }
    };

    let result = run(args.command, &store, &mut io::stdout().lock());
    let close_result = store.close();
    let messages = failure_messages(result, close_result);

    if messages.is_empty() {
        return ExitCode::SUCCESS;
    }

    for message in messages {
        print_error(message);
    }

    ExitCode::FAILURE
}

/// Describe every failure of a run, including a failed close after the command
/// itself failed.
fn failure_messages(result: Result<(), Error>, close_result: Result<(), Error>) -> Vec<String> {
    let mut messages = Vec::new();

    if let Err(error) = result {
        messages.push(match error.kind() {
            ErrorKind::MalformedInput => format!("Invalid input: {error}"),
            _ => error.to_string(),
        });
    }

    if let Err(error) = close_result {
        messages.push(format!("Could not close the database: {error}"));
    }

    messages
}

fn validate_db_path(db_path: &Path) -> Result<(), String> {
    match db_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            return Err(
                "Database path must include a file extension (e.g., 'transactions.db').".to_owned(),
            );
        }
    }

    if !db_path.is_file() {
        return Err(format!(
            "File does not exist at {db_path:#?}! Create it with `create_db` first."
        ));
    }

    Ok(())
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", capitalise_first_char(&error.to_string()));
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}

#[cfg(test)]
mod tests {
    use expense_tracker::{Column, Error};

    use super::failure_messages;

    #[test]
    fn successful_run_has_no_failures() {
        assert!(failure_messages(Ok(()), Ok(())).is_empty());
    }

    #[test]
    fn close_failure_is_reported_after_command_failure() {
        let messages = failure_messages(
            Err(Error::EmptyField(Column::Payee)),
            Err(Error::EmptyRecord),
        );

        assert_eq!(
            messages,
            [
                "Invalid input: payee cannot be empty".to_owned(),
                format!("Could not close the database: {}", Error::EmptyRecord),
            ]
        );
    }

    #[test]
    fn close_failure_alone_is_reported() {
        let messages = failure_messages(Ok(()), Err(Error::EmptyRecord));

        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Could not close the database"));
    }
}
