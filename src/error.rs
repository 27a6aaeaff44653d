//! Error types for the ledger.

use crate::account::AccountKind;
use crate::decimal::Money;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while operating on accounts or running scripts.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Amount was zero or negative
    #[error("Invalid amount {amount}: must be greater than zero")]
    InvalidAmount { amount: Money },

    /// Withdrawal would take the balance below the account's floor
    #[error("Withdrawal of {requested} denied: {}", denial(.kind, .floor))]
    InsufficientFunds {
        kind: AccountKind,
        balance: Money,
        requested: Money,
        floor: Money,
    },

    /// Deposit would take the balance past the largest representable amount
    #[error("Deposit of {requested} denied: balance {balance} would overflow")]
    BalanceOverflow { balance: Money, requested: Money },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid script record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Operation referenced an account that was never opened
    #[error("Unknown account {account} at row {row}")]
    UnknownAccount { row: usize, account: String },

    /// Bad command line
    #[error("{0}. Usage: atm-ledger [script.csv] [--history] [--sequential] [--journal <file>]")]
    Usage(String),

    /// Account number opened twice
    #[error("Account {account} already exists (row {row})")]
    DuplicateAccount { row: usize, account: String },
}

impl LedgerError {
    /// Returns `true` for the domain rejections an account can produce.
    ///
    /// These never change state and are recoverable by the caller.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount { .. }
                | LedgerError::InsufficientFunds { .. }
                | LedgerError::BalanceOverflow { .. }
        )
    }
}

fn denial(kind: &AccountKind, floor: &Money) -> String {
    match kind {
        AccountKind::Savings => format!("minimum balance of {floor} must be maintained"),
        AccountKind::Current => format!("overdraft limit of {floor} reached"),
    }
}
