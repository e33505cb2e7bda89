//! coinflip-game - Heads-or-tails betting on top of the coinflip ledger
//!
//! A player flips a virtual coin, wagers points on the outcome, and the
//! table settles the bet: a win pays double the stake, a loss forfeits it.
//! All state lives in the injected ledger; the engine itself is stateless.

pub mod bet;
pub mod coin;
pub mod engine;
pub mod error;
pub mod game;

pub use bet::{suggested_amounts, Bet, BET_MENU};
pub use coin::{Coin, CoinSide, FairCoin, SequenceCoin};
pub use engine::{settle, BetOutcome};
pub use error::{GameError, Result};
pub use game::{FlipGame, GameConfig, STARTING_BALANCE};

use coinflip_core::Ledger;

/// Open a fresh table over an in-memory ledger with default rules.
pub fn open_table() -> FlipGame {
    FlipGame::new(Ledger::in_memory())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinflip_core::UserId;

    #[test]
    fn test_open_table_seats_a_new_player() {
        let game = open_table();
        assert_eq!(game.ensure_account(UserId(1)), STARTING_BALANCE);
    }
}
