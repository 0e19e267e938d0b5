use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Business rule violations on a single account
#[derive(Error, PartialEq, Debug)]
pub enum AccountError {
    /// Deposits and withdrawals must move a positive amount
    #[error("Invalid amount {amount}, must be greater than zero")]
    InvalidAmount { amount: Decimal },
    /// The withdrawal would take the balance below zero
    #[error("Insufficient funds. Available {balance}, requested {amount}")]
    InsufficientFunds { balance: Decimal, amount: Decimal },
    /// The new balance does not fit in a `Decimal`
    #[error("Balance overflow. Balance {balance}, amount {amount}")]
    Overflow { balance: Decimal, amount: Decimal },
    #[error("Transaction index {index} out of range, the log holds {len} transactions")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures while producing a passbook file
#[derive(Error, Debug)]
pub enum PassbookError {
    #[error("Cannot open passbook {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write passbook {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write statement {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The caller's block failed while the passbook was open
    #[error("Passbook update failed")]
    Body(#[source] anyhow::Error),
}
