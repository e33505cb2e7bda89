use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Ledger(#[from] coinflip_core::LedgerError),

    #[error("Insufficient funds: balance is {balance}")]
    InsufficientFunds { balance: i64 },

    #[error("Invalid bet: wagered {amount} with balance {balance}")]
    InvalidBet { amount: i64, balance: i64 },

    #[error("Unknown coin side: {0}")]
    UnknownSide(String),
}
