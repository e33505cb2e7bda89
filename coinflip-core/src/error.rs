use crate::types::UserId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// No account record for this user. Recoverable: create the account
    /// first, then retry.
    #[error("Unknown user: {user}")]
    UnknownUser { user: UserId },
}

impl LedgerError {
    pub fn unknown_user(user: UserId) -> Self {
        Self::UnknownUser { user }
    }
}
