//! Observers for accepted transactions.
//!
//! Loggers are attached to a [`Terminal`](crate::terminal::Terminal), never to
//! an account. They see only transactions that were accepted.

use crate::transaction::Transaction;
use log::{info, warn};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Side channel notified after an operation has been accepted.
pub trait TransactionLogger {
    fn log(&self, txn: &Transaction);
}

impl<F> TransactionLogger for F
where
    F: Fn(&Transaction),
{
    fn log(&self, txn: &Transaction) {
        self(txn)
    }
}

/// Forwards transactions to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLogger;

impl TransactionLogger for RecordLogger {
    fn log(&self, txn: &Transaction) {
        info!("Logging Transaction: {}", txn);
    }
}

/// Keeps a copy of every transaction it observes.
///
/// Clones share the same storage, so a clone can be registered with a
/// terminal while the original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    entries: Rc<RefCell<Vec<Transaction>>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observed transactions in the order they were logged.
    pub fn entries(&self) -> Vec<Transaction> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TransactionLogger for MemoryLogger {
    fn log(&self, txn: &Transaction) {
        self.entries.borrow_mut().push(txn.clone());
    }
}

/// Appends each transaction as a CSV row: `id,timestamp,amount,kind`.
///
/// Write failures are reported through `warn!` and otherwise swallowed; a
/// broken journal must not affect the operation that was already accepted.
pub struct CsvJournal<W: Write> {
    writer: RefCell<csv::Writer<W>>,
}

impl<W: Write> CsvJournal<W> {
    pub fn new(writer: W) -> Self {
        CsvJournal {
            writer: RefCell::new(csv::Writer::from_writer(writer)),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> std::io::Result<W> {
        self.writer
            .into_inner()
            .into_inner()
            .map_err(|e| e.into_error())
    }
}

impl<W: Write> TransactionLogger for CsvJournal<W> {
    fn log(&self, txn: &Transaction) {
        let mut writer = self.writer.borrow_mut();
        if let Err(e) = writer.serialize(txn) {
            warn!("Failed to journal transaction {}: {}", txn.id(), e);
            return;
        }
        if let Err(e) = writer.flush() {
            warn!("Failed to flush journal after {}: {}", txn.id(), e);
        }
    }
}
