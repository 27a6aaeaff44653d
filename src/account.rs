//! Bank account model and operations.
//!
//! Savings and current accounts share every rule except the floor a
//! withdrawal must not breach, so the variant is a tag carrying that floor and
//! the withdrawal algorithm is written once.

use crate::decimal::Money;
use crate::error::{LedgerError, Result};
use crate::transaction::{IdGenerator, RandomIds, Transaction, TxKind};
use std::fmt;
use std::str::FromStr;

/// Lowest balance a savings account may be left with.
pub const MIN_BALANCE: i64 = 1000;

/// Lowest (negative) balance a current account may be overdrawn to.
pub const OVERDRAFT_LIMIT: i64 = -5000;

/// Account variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    /// Must keep at least [`MIN_BALANCE`].
    Savings,

    /// May be overdrawn down to [`OVERDRAFT_LIMIT`].
    Current,
}

impl AccountKind {
    /// The floor a withdrawal must not take the balance below.
    pub fn floor(&self) -> Money {
        match self {
            AccountKind::Savings => Money::from(MIN_BALANCE),
            AccountKind::Current => Money::from(OVERDRAFT_LIMIT),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Savings => f.write_str("savings"),
            AccountKind::Current => f.write_str("current"),
        }
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Ok(AccountKind::Savings),
            "current" => Ok(AccountKind::Current),
            other => Err(format!("unknown account kind '{other}'")),
        }
    }
}

/// A single account with its balance and transaction history.
///
/// # Invariants
///
/// - `history` only grows, in the order operations were accepted
/// - every accepted operation appends exactly one transaction
/// - a rejected operation leaves `balance` and `history` untouched
/// - after an accepted withdrawal, `balance >= kind.floor()`
///
/// The opening balance is taken as given and is not checked against the
/// floor.
pub struct Account {
    account_number: String,
    holder_name: String,
    kind: AccountKind,
    balance: Money,
    history: Vec<Transaction>,
    ids: Box<dyn IdGenerator>,
}

impl Account {
    /// Opens an account with an empty history and random transaction ids.
    pub fn new(
        kind: AccountKind,
        account_number: impl Into<String>,
        holder_name: impl Into<String>,
        initial_balance: Money,
    ) -> Self {
        Account {
            account_number: account_number.into(),
            holder_name: holder_name.into(),
            kind,
            balance: initial_balance,
            history: Vec::new(),
            ids: Box::new(RandomIds),
        }
    }

    /// Opens a savings account.
    pub fn savings(
        account_number: impl Into<String>,
        holder_name: impl Into<String>,
        initial_balance: Money,
    ) -> Self {
        Self::new(AccountKind::Savings, account_number, holder_name, initial_balance)
    }

    /// Opens a current account.
    pub fn current(
        account_number: impl Into<String>,
        holder_name: impl Into<String>,
        initial_balance: Money,
    ) -> Self {
        Self::new(AccountKind::Current, account_number, holder_name, initial_balance)
    }

    /// Replaces the transaction id source.
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// All accepted transactions, oldest first.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    /// The most recently accepted transaction.
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.history.last()
    }

    /// Deposits funds and returns the new balance.
    ///
    /// Fails with [`LedgerError::InvalidAmount`] if `amount` is not positive,
    /// or [`LedgerError::BalanceOverflow`] if the new balance cannot be
    /// represented.
    pub fn deposit(&mut self, amount: Money) -> Result<Money> {
        ensure_positive(amount)?;

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow {
                balance: self.balance,
                requested: amount,
            })?;
        self.record(amount, TxKind::Deposit);
        Ok(self.balance)
    }

    /// Withdraws funds and returns the new balance.
    ///
    /// The withdrawal is rejected with [`LedgerError::InsufficientFunds`] only
    /// if the resulting balance would fall strictly below the floor; landing
    /// exactly on it is allowed. A result below the decimal range breaches
    /// every floor and is rejected the same way.
    pub fn withdraw(&mut self, amount: Money) -> Result<Money> {
        ensure_positive(amount)?;

        let floor = self.kind.floor();
        let projected = match self.balance.checked_sub(amount) {
            Some(projected) if projected >= floor => projected,
            _ => {
                return Err(LedgerError::InsufficientFunds {
                    kind: self.kind,
                    balance: self.balance,
                    requested: amount,
                    floor,
                })
            }
        };

        self.balance = projected;
        self.record(amount, TxKind::Withdraw);
        Ok(self.balance)
    }

    /// Renders each transaction on its own line, oldest first.
    pub fn statement(&self) -> Vec<String> {
        self.history.iter().map(ToString::to_string).collect()
    }

    fn record(&mut self, amount: Money, kind: TxKind) {
        let txn = Transaction::new(self.ids.as_mut(), amount, kind);
        self.history.push(txn);
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("account_number", &self.account_number)
            .field("holder_name", &self.holder_name)
            .field("kind", &self.kind)
            .field("balance", &self.balance)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

fn ensure_positive(amount: Money) -> Result<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount { amount })
    }
}
