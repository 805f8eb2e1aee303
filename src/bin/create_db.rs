use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use expense_tracker::{
    TableName, Transaction, TransactionStore, Uniqueness, cli::DEFAULT_DB_PATH,
    create_transaction_table, setup_logging,
};

/// A utility for creating the SQLite database used by the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short, default_value = DEFAULT_DB_PATH)]
    output_path: PathBuf,

    /// Allow identical transactions to be recorded more than once.
    #[arg(long)]
    allow_duplicates: bool,

    /// Add a handful of example transactions.
    #[arg(long)]
    with_sample_data: bool,
}

/// Create the database file and its transaction table.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    setup_logging(None)?;

    let output_path = args.output_path.as_path();

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'transactions.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let store = TransactionStore::open(output_path)?;

    let uniqueness = if args.allow_duplicates {
        Uniqueness::AllowDuplicates
    } else {
        Uniqueness::Enforced
    };
    create_transaction_table(store.connection(), &TableName::default(), uniqueness)?;

    if args.with_sample_data {
        println!("Adding sample transactions...");

        for transaction in sample_transactions() {
            store.insert(&transaction)?;
        }
    }

    store.close()?;

    println!("Success!");

    Ok(())
}

fn sample_transactions() -> [Transaction; 5] {
    [
        Transaction::new("2024-01-01", "Countdown", 84.2, "Groceries"),
        Transaction::new("2024-01-02", "Landlord", 450.0, "Rent"),
        Transaction::new("2024-01-03", "Metro Cafe", 5.5, "Eating Out"),
        Transaction::new("2024-01-05", "Countdown", 61.75, "Groceries"),
        Transaction::new("2024-01-07", "Power Co", 120.0, "Bills"),
    ]
}
