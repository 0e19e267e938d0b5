use std::fmt::Display;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;

pub type AccountNumber = u64;

/// Format used when a timestamp is shown to the holder, second precision
pub const TIMESTAMP_FORMAT: &str = "%d %B %Y %I:%M:%S %p";

/// Direction of a balance change
#[derive(Serialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum TransactionKind {
    /// Money coming into the account
    #[serde(rename = "CREDIT")]
    Credit,
    /// Money leaving the account
    #[serde(rename = "DEBIT")]
    Debit,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Credit => write!(f, "CREDIT"),
            TransactionKind::Debit => write!(f, "DEBIT"),
        }
    }
}

/// One entry of the account's transaction log.
/// Records are never modified once appended to a log.
#[derive(PartialEq, Clone, Debug)]
pub struct TransactionRecord {
    kind: TransactionKind,
    timestamp: DateTime<Local>,
    balance_before: Decimal,
    /// Positive for credits, negative for debits
    amount: Decimal,
    balance_after: Decimal,
}

impl TransactionRecord {
    /// Records a credit of `amount` on top of `balance_before`
    /// Returns `None` if the new balance does not fit in a `Decimal`
    pub fn credit(
        balance_before: Decimal,
        amount: Decimal,
        timestamp: DateTime<Local>,
    ) -> Option<Self> {
        Some(Self {
            kind: TransactionKind::Credit,
            timestamp,
            balance_before,
            amount,
            balance_after: balance_before.checked_add(amount)?,
        })
    }

    /// Records a debit of `amount`; the stored amount is negated
    /// Returns `None` if the new balance does not fit in a `Decimal`
    pub fn debit(
        balance_before: Decimal,
        amount: Decimal,
        timestamp: DateTime<Local>,
    ) -> Option<Self> {
        Some(Self {
            kind: TransactionKind::Debit,
            timestamp,
            balance_before,
            amount: -amount,
            balance_after: balance_before.checked_sub(amount)?,
        })
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn balance_before(&self) -> Decimal {
        self.balance_before
    }

    /// The signed amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    /// Human readable timestamp, e.g. `16 October 2026 03:04:05 PM`
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn to_statement_row(&self) -> StatementRow {
        StatementRow {
            kind: self.kind,
            timestamp: self.formatted_timestamp(),
            balance_before: self.balance_before,
            amount: self.amount,
            balance_after: self.balance_after,
        }
    }
}

/// Tuple-like rendering used by the passbook, one record per line
impl Display for TransactionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "('{}', '{}', {}, {}, {})",
            self.kind,
            self.formatted_timestamp(),
            self.balance_before,
            self.amount,
            self.balance_after
        )
    }
}

/// Represents a transaction row in the CSV statement
#[derive(Serialize, Debug)]
pub struct StatementRow {
    pub kind: TransactionKind,
    pub timestamp: String,
    pub balance_before: Decimal,
    pub amount: Decimal,
    pub balance_after: Decimal,
}
