use crate::bet::{suggested_amounts, Bet, BET_MENU};
use crate::coin::{Coin, CoinSide, FairCoin};
use crate::engine::{settle, BetOutcome};
use crate::error::{GameError, Result};
use coinflip_core::{Ledger, UserId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Points granted to new accounts and to broke players on reset.
pub const STARTING_BALANCE: i64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_balance: i64,
    pub bet_menu: Vec<i64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            bet_menu: BET_MENU.to_vec(),
        }
    }
}

/// The table the transport layer plays against.
///
/// Owns the ledger and the coin, and serializes each user's bet resolution
/// behind a per-account lock so overlapping requests from the transport
/// cannot produce lost balance updates.
pub struct FlipGame {
    ledger: Ledger,
    config: GameConfig,
    coin: Mutex<Box<dyn Coin>>,
    account_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl FlipGame {
    /// Table with a fair coin and the default config.
    pub fn new(ledger: Ledger) -> Self {
        Self::with_coin(ledger, GameConfig::default(), Box::new(FairCoin))
    }

    pub fn with_config(ledger: Ledger, config: GameConfig) -> Self {
        Self::with_coin(ledger, config, Box::new(FairCoin))
    }

    /// Table with an injected coin, for deterministic play.
    pub fn with_coin(ledger: Ledger, config: GameConfig, coin: Box<dyn Coin>) -> Self {
        Self {
            ledger,
            config,
            coin: Mutex::new(coin),
            account_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Creates the account with the starting balance if the user is new,
    /// then returns the current balance. Idempotent.
    pub fn ensure_account(&self, user: UserId) -> i64 {
        self.ledger
            .create_account(user, self.config.starting_balance);
        self.ledger.balance_or_zero(user)
    }

    pub fn balance(&self, user: UserId) -> Result<i64> {
        Ok(self.ledger.balance(user)?)
    }

    /// Gate for a new flip: reports the balance the bet will run against.
    ///
    /// A broke player is refused with `InsufficientFunds`, but their account
    /// is reset to the starting balance in the same breath, so the next
    /// attempt goes through. The reset happens only here, never right after
    /// a losing bet drains the account.
    pub fn start_flip(&self, user: UserId) -> Result<i64> {
        let guard = self.account_lock(user);
        let _held = guard.lock();

        let balance = self.ledger.balance(user)?;
        if balance <= 0 {
            self.ledger
                .set_balance(user, self.config.starting_balance)?;
            tracing::info!(
                "User {} is out of points, balance reset to {}",
                user,
                self.config.starting_balance
            );
            return Err(GameError::InsufficientFunds { balance });
        }

        Ok(balance)
    }

    /// Pure selection step: no state changes, just the stakes the player
    /// can afford for the side they picked.
    pub fn choose_side(&self, user: UserId, side: CoinSide) -> Result<Vec<i64>> {
        let balance = self.ledger.balance(user)?;
        if balance <= 0 {
            return Err(GameError::InsufficientFunds { balance });
        }

        tracing::debug!("User {} picked {}", user, side);
        Ok(suggested_amounts(&self.config.bet_menu, balance))
    }

    /// Resolves one bet: read balance, validate, toss, settle, write back.
    /// The whole sequence runs under the user's account lock.
    pub fn place_bet(&self, user: UserId, side: CoinSide, amount: i64) -> Result<BetOutcome> {
        let guard = self.account_lock(user);
        let _held = guard.lock();

        let balance = self.ledger.balance(user)?;
        let bet = Bet::new(side, amount);
        bet.validate(balance)?;

        // reject before tossing so an illegal bet never consumes a draw
        let drawn = self.coin.lock().toss();
        let outcome = settle(balance, bet, drawn)?;
        self.ledger.set_balance(user, outcome.new_balance)?;

        tracing::info!(
            "User {} bet {} on {}: coin landed {}, {} (balance {} -> {})",
            user,
            amount,
            side,
            drawn,
            if outcome.won { "won" } else { "lost" },
            balance,
            outcome.new_balance
        );

        Ok(outcome)
    }

    fn account_lock(&self, user: UserId) -> Arc<Mutex<()>> {
        self.account_locks.lock().entry(user).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::SequenceCoin;

    fn scripted_game(script: Vec<CoinSide>) -> FlipGame {
        FlipGame::with_coin(
            Ledger::in_memory(),
            GameConfig::default(),
            Box::new(SequenceCoin::new(script)),
        )
    }

    #[test]
    fn test_ensure_account_is_idempotent() {
        let game = FlipGame::new(Ledger::in_memory());
        let user = UserId(1);

        assert_eq!(game.ensure_account(user), 1000);
        game.ledger().set_balance(user, 400).unwrap();
        assert_eq!(game.ensure_account(user), 400);
    }

    #[test]
    fn test_start_flip_requires_known_user() {
        let game = FlipGame::new(Ledger::in_memory());
        assert!(matches!(
            game.start_flip(UserId(99)),
            Err(GameError::Ledger(_))
        ));
    }

    #[test]
    fn test_losing_streak_then_comeback() {
        // new user: 1000 -> bet 100 on heads, coin says tails -> 900
        // -> bet 900 on tails, coin says tails -> 1800
        let game = scripted_game(vec![CoinSide::Tails, CoinSide::Tails]);
        let user = UserId(7);

        assert_eq!(game.ensure_account(user), 1000);
        assert_eq!(game.start_flip(user).unwrap(), 1000);

        let first = game.place_bet(user, CoinSide::Heads, 100).unwrap();
        assert!(!first.won);
        assert_eq!(first.outcome, CoinSide::Tails);
        assert_eq!(first.new_balance, 900);

        let second = game.place_bet(user, CoinSide::Tails, 900).unwrap();
        assert!(second.won);
        assert_eq!(second.new_balance, 1800);
        assert_eq!(game.balance(user).unwrap(), 1800);
    }

    #[test]
    fn test_broke_player_is_refused_then_reset() {
        let game = scripted_game(vec![CoinSide::Heads]);
        let user = UserId(3);

        game.ensure_account(user);
        game.ledger().set_balance(user, 0).unwrap();

        assert_eq!(
            game.start_flip(user),
            Err(GameError::InsufficientFunds { balance: 0 })
        );
        // the refusal doubles as the comeback: balance is back to start
        assert_eq!(game.balance(user).unwrap(), 1000);
        assert_eq!(game.start_flip(user).unwrap(), 1000);
    }

    #[test]
    fn test_reset_is_lazy_after_losing_everything() {
        let game = scripted_game(vec![CoinSide::Tails]);
        let user = UserId(4);

        game.ensure_account(user);
        let outcome = game.place_bet(user, CoinSide::Heads, 1000).unwrap();
        assert!(!outcome.won);

        // losing it all does not reset by itself
        assert_eq!(game.balance(user).unwrap(), 0);
        assert!(game.start_flip(user).is_err());
        assert_eq!(game.balance(user).unwrap(), 1000);
    }

    #[test]
    fn test_invalid_bets_leave_balance_unchanged() {
        let game = scripted_game(vec![CoinSide::Heads]);
        let user = UserId(5);
        game.ensure_account(user);

        assert_eq!(
            game.place_bet(user, CoinSide::Heads, 1001),
            Err(GameError::InvalidBet {
                amount: 1001,
                balance: 1000
            })
        );
        assert!(game.place_bet(user, CoinSide::Heads, 0).is_err());
        assert!(game.place_bet(user, CoinSide::Heads, -20).is_err());
        assert_eq!(game.balance(user).unwrap(), 1000);
    }

    #[test]
    fn test_choose_side_filters_the_menu() {
        let game = scripted_game(vec![CoinSide::Heads]);
        let user = UserId(6);
        game.ensure_account(user);

        assert_eq!(
            game.choose_side(user, CoinSide::Heads).unwrap(),
            vec![10, 50, 100, 500, 1000]
        );

        game.ledger().set_balance(user, 60).unwrap();
        assert_eq!(game.choose_side(user, CoinSide::Tails).unwrap(), vec![10, 50]);

        // short stack: the only offer is everything they have
        game.ledger().set_balance(user, 3).unwrap();
        assert_eq!(game.choose_side(user, CoinSide::Tails).unwrap(), vec![3]);

        game.ledger().set_balance(user, 0).unwrap();
        assert!(matches!(
            game.choose_side(user, CoinSide::Tails),
            Err(GameError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn test_off_menu_amounts_are_accepted() {
        let game = scripted_game(vec![CoinSide::Heads]);
        let user = UserId(8);
        game.ensure_account(user);

        let outcome = game.place_bet(user, CoinSide::Heads, 123).unwrap();
        assert!(outcome.won);
        assert_eq!(outcome.new_balance, 1123);
    }

    #[test]
    fn test_concurrent_bets_never_lose_updates() {
        // every toss lands heads and every bet is 1 point on heads, so the
        // final balance is exact iff no read-decide-write interleaved
        let game = Arc::new(scripted_game(vec![CoinSide::Heads]));
        let user = UserId(10);
        game.ensure_account(user);

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let game = Arc::clone(&game);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        game.place_bet(user, CoinSide::Heads, 1).unwrap();
                    }
                })
            })
            .collect();
        for handle in threads {
            handle.join().unwrap();
        }

        assert_eq!(game.balance(user).unwrap(), 1000 + 800);
    }
}
