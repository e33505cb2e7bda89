use crate::types::{Account, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;

use super::BalanceStore;

/// Process-lifetime balance store backed by a `HashMap`.
///
/// Every operation takes the map lock, so each primitive is atomic on its
/// own. Callers that need a multi-step read-decide-write (the game engine's
/// bet settlement) must serialize per user on top of this.
#[derive(Default)]
pub struct InMemoryStore {
    accounts: RwLock<HashMap<UserId, Account>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl BalanceStore for InMemoryStore {
    fn contains(&self, user: UserId) -> bool {
        self.accounts.read().contains_key(&user)
    }

    fn insert(&self, account: Account) -> bool {
        let mut accounts = self.accounts.write();
        if accounts.contains_key(&account.user) {
            return false;
        }
        accounts.insert(account.user, account);
        true
    }

    fn get(&self, user: UserId) -> Option<Account> {
        self.accounts.read().get(&user).cloned()
    }

    fn set_balance(&self, user: UserId, balance: i64) -> bool {
        let mut accounts = self.accounts.write();
        match accounts.get_mut(&user) {
            Some(account) => {
                account.balance = balance;
                true
            }
            None => false,
        }
    }

    fn adjust(&self, user: UserId, delta: i64) -> Option<i64> {
        let mut accounts = self.accounts.write();
        let account = accounts.get_mut(&user)?;
        account.balance += delta;
        Some(account.balance)
    }
}
