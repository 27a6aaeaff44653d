//! # ATM Ledger
//!
//! An in-memory bank account ledger. Accounts keep a balance and an
//! append-only transaction history; deposits always succeed for a positive
//! amount, withdrawals are bounded by a floor that depends on the account
//! kind.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **One withdrawal rule**: savings and current accounts differ only in floor
//! - **No partial effects**: a rejected operation changes nothing
//! - **Typed outcomes**: the core returns results and never prints or logs
//! - **Decoupled observers**: loggers hang off the terminal, not the account
//!
//! ## Example
//!
//! ```
//! use atm_ledger::{Account, MemoryLogger, Money, Terminal};
//!
//! let memory = MemoryLogger::new();
//! let mut atm = Terminal::new("Delhi", "ATM001");
//! atm.register_logger(Box::new(memory.clone()));
//!
//! let mut savings = Account::savings("SA123", "Amit", Money::from(5000));
//! atm.request_deposit(&mut savings, Money::from(2000)).unwrap();
//! assert!(atm.request_withdraw(&mut savings, Money::from(6500)).is_err());
//!
//! assert_eq!(savings.balance(), Money::from(7000));
//! assert_eq!(memory.len(), 1);
//! ```

pub mod account;
pub mod decimal;
pub mod error;
pub mod logger;
pub mod script;
pub mod terminal;
pub mod transaction;

pub use account::{Account, AccountKind, MIN_BALANCE, OVERDRAFT_LIMIT};
pub use decimal::Money;
pub use error::{LedgerError, Result};
pub use logger::{CsvJournal, MemoryLogger, RecordLogger, TransactionLogger};
pub use script::{Ledger, ScriptRecord, Step};
pub use terminal::Terminal;
pub use transaction::{IdGenerator, RandomIds, SequentialIds, Transaction, TxKind};
