use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque user identifier handed to us by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user balance record. Exactly one per `UserId`, created on first
/// contact and kept for the lifetime of the process.
///
/// The balance is a plain signed integer. It is non-negative by convention
/// only; the ledger enforces no floor, that policy belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub user: UserId,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(user: UserId, balance: i64) -> Self {
        Self {
            user,
            balance,
            created_at: Utc::now(),
        }
    }
}
