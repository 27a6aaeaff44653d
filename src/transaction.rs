//! Transaction records and the id generators used to stamp them.

use crate::decimal::Money;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TxKind {
    /// Credit to the account.
    Deposit,

    /// Debit from the account.
    Withdraw,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Deposit => f.write_str("Deposit"),
            TxKind::Withdraw => f.write_str("Withdraw"),
        }
    }
}

/// Source of unique transaction ids.
pub trait IdGenerator {
    /// Returns an id never handed out before by this generator.
    fn next_id(&mut self) -> String;
}

/// Counter-based ids, `TXN-000001`, `TXN-000002`, ...
///
/// Deterministic, so tests and replayed scripts produce stable output.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("TXN")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{:06}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// An accepted deposit or withdrawal.
///
/// `amount` is always the positive magnitude of the movement; the direction
/// lives in `kind`. There are no mutators: a transaction is fixed once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: String,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
    amount: Money,
    kind: TxKind,
}

impl Transaction {
    /// Builds a transaction stamped with the current time.
    ///
    /// Callers only construct transactions for operations they have already
    /// accepted, so `amount` is expected to be positive.
    pub fn new(ids: &mut dyn IdGenerator, amount: Money, kind: TxKind) -> Self {
        Self::with_timestamp(ids, amount, kind, Utc::now())
    }

    /// Builds a transaction with an explicit timestamp.
    pub fn with_timestamp(
        ids: &mut dyn IdGenerator,
        amount: Money,
        kind: TxKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        debug_assert!(amount.is_positive(), "transaction amount must be positive");
        Transaction {
            id: ids.next_id(),
            timestamp,
            amount,
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The timestamp as every output renders it: RFC 3339, whole seconds, `Z`.
    pub fn timestamp_rfc3339(&self) -> String {
        rfc3339_secs(&self.timestamp)
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TxnID: {}, Date: {}, Amount: {}, Type: {}",
            self.id,
            self.timestamp_rfc3339(),
            self.amount,
            self.kind
        )
    }
}

fn rfc3339_secs(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&rfc3339_secs(timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sequential_ids_are_padded_and_increasing() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(), "TXN-000001");
        assert_eq!(ids.next_id(), "TXN-000002");

        let mut other = SequentialIds::new("SA123");
        assert_eq!(other.next_id(), "SA123-000001");
    }

    #[test]
    fn test_random_ids_are_unique_uuids() {
        let mut ids = RandomIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_new_transaction_takes_id_from_generator() {
        let mut ids = SequentialIds::default();
        let before = Utc::now();
        let txn = Transaction::new(&mut ids, Money::from(2000), TxKind::Deposit);

        assert_eq!(txn.id(), "TXN-000001");
        assert_eq!(txn.amount(), Money::from(2000));
        assert_eq!(txn.kind(), TxKind::Deposit);
        assert!(txn.timestamp() >= before);
    }

    #[test]
    fn test_timestamp_drops_sub_seconds() {
        let mut ids = SequentialIds::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let txn = Transaction::with_timestamp(&mut ids, Money::from(1), TxKind::Deposit, at);

        assert_eq!(txn.timestamp_rfc3339(), "2024-03-01T09:30:00Z");
    }

    #[test]
    fn test_display_matches_record_line() {
        let mut ids = SequentialIds::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let txn = Transaction::with_timestamp(&mut ids, Money::from(3000), TxKind::Withdraw, at);

        assert_eq!(
            txn.to_string(),
            "TxnID: TXN-000001, Date: 2024-03-01T09:30:00Z, Amount: 3000.00, Type: Withdraw"
        );
    }
}
