//! Scripted sessions: open accounts and run deposits/withdrawals through a
//! terminal, reading operations from CSV.
//!
//! Script format (header required, whitespace trimmed):
//!
//! ```text
//! op,account,holder,amount
//! savings,SA123,Amit,5000
//! deposit,SA123,,2000
//! withdraw,SA123,,3000
//! ```

use crate::account::{Account, AccountKind};
use crate::decimal::Money;
use crate::error::{LedgerError, Result};
use crate::logger::RecordLogger;
use crate::terminal::Terminal;
use crate::transaction::{IdGenerator, RandomIds, SequentialIds};
use csv::{ReaderBuilder, Trim};
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::str::FromStr;

/// Raw script row as read from CSV.
#[derive(Debug, Deserialize)]
pub struct ScriptRecord {
    pub op: String,
    pub account: String,
    pub holder: Option<String>,
    pub amount: Option<String>,
}

/// A validated script step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Open {
        kind: AccountKind,
        account: String,
        holder: String,
        balance: Money,
    },
    Deposit { account: String, amount: Money },
    Withdraw { account: String, amount: Money },
}

impl ScriptRecord {
    /// Validates the row into a [`Step`]. `row` is only used for error context.
    pub fn parse(&self, row: usize) -> Result<Step> {
        let invalid = |message: String| LedgerError::InvalidRecord { row, message };

        let account = self.account.trim();
        if account.is_empty() {
            return Err(invalid("missing account number".to_string()));
        }
        let account = account.to_string();

        match self.op.trim().to_lowercase().as_str() {
            "deposit" => Ok(Step::Deposit {
                account,
                amount: self.parse_amount(row)?,
            }),
            "withdraw" | "withdrawal" => Ok(Step::Withdraw {
                account,
                amount: self.parse_amount(row)?,
            }),
            other => {
                let kind = AccountKind::from_str(other)
                    .map_err(|_| invalid(format!("unknown operation '{other}'")))?;
                let holder = self
                    .holder
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .ok_or_else(|| invalid("missing holder name".to_string()))?;
                Ok(Step::Open {
                    kind,
                    account,
                    holder: holder.to_string(),
                    balance: self.parse_amount(row)?,
                })
            }
        }
    }

    fn parse_amount(&self, row: usize) -> Result<Money> {
        let raw = self
            .amount
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| LedgerError::InvalidRecord {
                row,
                message: "missing amount".to_string(),
            })?;
        Money::from_str(raw).map_err(|e| LedgerError::InvalidRecord {
            row,
            message: format!("invalid amount '{raw}': {e}"),
        })
    }
}

/// A set of accounts served by one terminal.
///
/// Accounts are kept sorted by account number so output is deterministic.
pub struct Ledger {
    accounts: BTreeMap<String, Account>,
    terminal: Terminal,
    sequential_ids: bool,
}

impl Ledger {
    /// Creates a ledger whose terminal logs accepted transactions through
    /// the `log` facade.
    pub fn new(mut terminal: Terminal) -> Self {
        terminal.register_logger(Box::new(RecordLogger));
        Ledger {
            accounts: BTreeMap::new(),
            terminal,
            sequential_ids: false,
        }
    }

    /// Use per-account counters (`<account>-000001`) instead of UUIDs.
    pub fn with_sequential_ids(mut self, sequential: bool) -> Self {
        self.sequential_ids = sequential;
        self
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal {
        &mut self.terminal
    }

    pub fn account(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Opens a new account.
    pub fn open(
        &mut self,
        kind: AccountKind,
        number: &str,
        holder: &str,
        balance: Money,
        row: usize,
    ) -> Result<&Account> {
        if self.accounts.contains_key(number) {
            return Err(LedgerError::DuplicateAccount {
                row,
                account: number.to_string(),
            });
        }
        let ids: Box<dyn IdGenerator> = if self.sequential_ids {
            Box::new(SequentialIds::new(number))
        } else {
            Box::new(RandomIds)
        };
        let account = Account::new(kind, number, holder, balance).with_id_generator(ids);
        Ok(self.accounts.entry(number.to_string()).or_insert(account))
    }

    /// Applies one step. Rejections are returned as errors.
    pub fn apply(&mut self, step: Step, row: usize) -> Result<()> {
        match step {
            Step::Open {
                kind,
                account,
                holder,
                balance,
            } => {
                self.open(kind, &account, &holder, balance, row)?;
            }
            Step::Deposit { account, amount } => {
                let target = Self::lookup(&mut self.accounts, &account, row)?;
                self.terminal.request_deposit(target, amount)?;
            }
            Step::Withdraw { account, amount } => {
                let target = Self::lookup(&mut self.accounts, &account, row)?;
                self.terminal.request_withdraw(target, amount)?;
            }
        }
        Ok(())
    }

    fn lookup<'a>(
        accounts: &'a mut BTreeMap<String, Account>,
        number: &str,
        row: usize,
    ) -> Result<&'a mut Account> {
        accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::UnknownAccount {
                row,
                account: number.to_string(),
            })
    }

    /// Runs a CSV script.
    ///
    /// Bad rows and rejected operations are logged at warn level and skipped.
    pub fn run_script<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<ScriptRecord>().enumerate() {
            let row = row_idx + 2; // 1-indexed, accounting for header row

            let outcome = result
                .map_err(LedgerError::from)
                .and_then(|record| record.parse(row))
                .and_then(|step| self.apply(step, row));

            if let Err(e) = outcome {
                warn!("Row {}: {}", row, e);
            }
        }

        Ok(())
    }

    /// Replays the classic walkthrough: one savings and one current account
    /// at a Delhi terminal, including one rejected savings withdrawal.
    pub fn run_demo(&mut self) -> Result<()> {
        let script = "\
op,account,holder,amount
savings,SA123,Amit,5000
current,CA456,Rahul,2000
deposit,SA123,,2000
withdraw,SA123,,3000
withdraw,SA123,,4000
deposit,CA456,,1000
withdraw,CA456,,7000
withdraw,CA456,,1000
";
        self.run_script(script.as_bytes())
    }

    /// Writes one CSV row per account, sorted by account number.
    pub fn write_summary<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["account", "holder", "kind", "balance", "transactions"])?;
        for account in self.accounts.values() {
            csv_writer.write_record([
                account.account_number().to_string(),
                account.holder_name().to_string(),
                account.kind().to_string(),
                account.balance().to_string(),
                account.history().len().to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes every transaction, grouped by account and in history order.
    pub fn write_history<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["account", "id", "timestamp", "amount", "kind"])?;
        for account in self.accounts.values() {
            for txn in account.history() {
                csv_writer.write_record([
                    account.account_number().to_string(),
                    txn.id().to_string(),
                    txn.timestamp_rfc3339(),
                    txn.amount().to_string(),
                    txn.kind().to_string(),
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}
