//! coinflip-core - Account ledger for the coin-flip betting game
//!
//! This library owns the mapping from user identifier to point balance and
//! nothing else. Game rules live in `coinflip-game`; the chat/CLI transport
//! sits above both.

pub mod error;
pub mod ledger;
pub mod types;

pub use error::{LedgerError, Result};
pub use ledger::{BalanceStore, InMemoryStore, Ledger};
pub use types::{Account, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_lifecycle() {
        let ledger = Ledger::in_memory();
        let user = UserId(1);

        ledger.create_account(user, 1000);
        ledger.set_balance(user, 900).unwrap();
        assert_eq!(ledger.adjust(user, 900).unwrap(), 1800);
    }
}
