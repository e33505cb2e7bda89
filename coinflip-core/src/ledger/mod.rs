pub mod memory;

pub use memory::InMemoryStore;

use crate::error::{LedgerError, Result};
use crate::types::{Account, UserId};

/// Storage interface behind the ledger.
///
/// The only implementation today is [`InMemoryStore`]; the trait exists so a
/// durable backend can be swapped in without touching game logic. Primitives
/// return plain `bool`/`Option` and leave error shaping to the [`Ledger`].
pub trait BalanceStore: Send + Sync {
    /// True iff a record exists for `user`.
    fn contains(&self, user: UserId) -> bool;

    /// Inserts a new account. No-op returning `false` if one already exists.
    fn insert(&self, account: Account) -> bool;

    fn get(&self, user: UserId) -> Option<Account>;

    /// Overwrites the balance. Returns `false` if no account exists.
    fn set_balance(&self, user: UserId, balance: i64) -> bool;

    /// Adds a signed delta to the balance, returning the new value, or
    /// `None` if no account exists.
    fn adjust(&self, user: UserId, delta: i64) -> Option<i64>;
}

/// Single source of truth for account balances during process lifetime.
///
/// Unknown users surface as [`LedgerError::UnknownUser`] rather than a
/// silent zero; [`Ledger::balance_or_zero`] preserves the zero-default
/// behavior for callers that cannot tell a new user from a broke one.
pub struct Ledger {
    store: Box<dyn BalanceStore>,
}

impl Ledger {
    pub fn new(store: Box<dyn BalanceStore>) -> Self {
        Self { store }
    }

    /// Ledger over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemoryStore::new()))
    }

    pub fn exists(&self, user: UserId) -> bool {
        self.store.contains(user)
    }

    /// Creates the account with `starting_balance` if it does not exist yet.
    /// Idempotent: a second call is a no-op and the first balance wins.
    /// Returns whether a record was actually created.
    pub fn create_account(&self, user: UserId, starting_balance: i64) -> bool {
        let created = self.store.insert(Account::new(user, starting_balance));
        if created {
            tracing::info!("Created account for user {} with balance {}", user, starting_balance);
        }
        created
    }

    pub fn account(&self, user: UserId) -> Result<Account> {
        self.store
            .get(user)
            .ok_or(LedgerError::unknown_user(user))
    }

    pub fn balance(&self, user: UserId) -> Result<i64> {
        Ok(self.account(user)?.balance)
    }

    /// Compatibility shim: reports 0 for users never seen, conflating
    /// "new user" with "zero balance". Callers that need the distinction
    /// use [`Ledger::balance`] instead.
    pub fn balance_or_zero(&self, user: UserId) -> i64 {
        self.store.get(user).map_or(0, |account| account.balance)
    }

    /// Overwrites the balance, returning the value written.
    pub fn set_balance(&self, user: UserId, new_balance: i64) -> Result<i64> {
        if !self.store.set_balance(user, new_balance) {
            return Err(LedgerError::UnknownUser { user });
        }
        tracing::debug!("Balance for user {} set to {}", user, new_balance);
        Ok(new_balance)
    }

    /// Adds a signed delta to the balance, returning the new value.
    pub fn adjust(&self, user: UserId, delta: i64) -> Result<i64> {
        let new_balance = self
            .store
            .adjust(user, delta)
            .ok_or(LedgerError::UnknownUser { user })?;
        tracing::debug!("Adjusted user {} by {} to {}", user, delta, new_balance);
        Ok(new_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_before_create() {
        let ledger = Ledger::in_memory();
        let user = UserId(42);

        assert!(!ledger.exists(user));
        assert_eq!(
            ledger.balance(user),
            Err(LedgerError::unknown_user(user))
        );
        assert_eq!(ledger.balance_or_zero(user), 0);
    }

    #[test]
    fn test_create_account_is_idempotent() {
        let ledger = Ledger::in_memory();
        let user = UserId(42);

        assert!(ledger.create_account(user, 1000));
        assert!(ledger.exists(user));
        assert_eq!(ledger.balance(user), Ok(1000));

        // second call with a different starting balance changes nothing
        assert!(!ledger.create_account(user, 9999));
        assert_eq!(ledger.balance(user), Ok(1000));
    }

    #[test]
    fn test_set_balance_requires_account() {
        let ledger = Ledger::in_memory();
        let user = UserId(5);

        assert!(ledger.set_balance(user, 300).is_err());

        ledger.create_account(user, 1000);
        assert_eq!(ledger.set_balance(user, 300), Ok(300));
        assert_eq!(ledger.balance(user), Ok(300));
    }

    #[test]
    fn test_adjust_applies_signed_delta() {
        let ledger = Ledger::in_memory();
        let user = UserId(5);

        assert!(ledger.adjust(user, 10).is_err());

        ledger.create_account(user, 100);
        assert_eq!(ledger.adjust(user, 50), Ok(150));
        assert_eq!(ledger.adjust(user, -150), Ok(0));
        // no floor is enforced here; that policy belongs to the game
        assert_eq!(ledger.adjust(user, -10), Ok(-10));
    }
}
