//! ATM front that forwards requests to accounts and notifies loggers.

use crate::account::Account;
use crate::decimal::Money;
use crate::error::Result;
use crate::logger::TransactionLogger;
use log::debug;

/// A cash machine. Holds no account state of its own.
pub struct Terminal {
    location: String,
    machine_id: String,
    loggers: Vec<Box<dyn TransactionLogger>>,
}

impl Terminal {
    pub fn new(location: impl Into<String>, machine_id: impl Into<String>) -> Self {
        Terminal {
            location: location.into(),
            machine_id: machine_id.into(),
            loggers: Vec::new(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    /// Adds a logger. Loggers are notified in registration order.
    pub fn register_logger(&mut self, logger: Box<dyn TransactionLogger>) {
        self.loggers.push(logger);
    }

    pub fn logger_count(&self) -> usize {
        self.loggers.len()
    }

    /// Deposits through this terminal and returns the new balance.
    pub fn request_deposit(&self, account: &mut Account, amount: Money) -> Result<Money> {
        let outcome = account.deposit(amount);
        self.settle(account, "deposit", amount, outcome)
    }

    /// Withdraws through this terminal and returns the new balance.
    pub fn request_withdraw(&self, account: &mut Account, amount: Money) -> Result<Money> {
        let outcome = account.withdraw(amount);
        self.settle(account, "withdraw", amount, outcome)
    }

    fn settle(
        &self,
        account: &Account,
        op: &str,
        amount: Money,
        outcome: Result<Money>,
    ) -> Result<Money> {
        match &outcome {
            Ok(balance) => {
                debug!(
                    "{}: {} of {} on {} accepted, balance {}",
                    self.machine_id,
                    op,
                    amount,
                    account.account_number(),
                    balance
                );
                if let Some(txn) = account.last_transaction() {
                    for logger in &self.loggers {
                        logger.log(txn);
                    }
                }
            }
            Err(e) => {
                debug!(
                    "{}: {} of {} on {} rejected: {}",
                    self.machine_id,
                    op,
                    amount,
                    account.account_number(),
                    e
                );
            }
        }
        outcome
    }
}
