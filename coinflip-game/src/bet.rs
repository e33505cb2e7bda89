use crate::coin::CoinSide;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Wager menu offered to players, largest stakes last.
pub const BET_MENU: [i64; 5] = [10, 50, 100, 500, 1000];

/// A chosen side plus a wagered amount, resolved once and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    pub side: CoinSide,
    pub amount: i64,
}

impl Bet {
    pub fn new(side: CoinSide, amount: i64) -> Self {
        Self { side, amount }
    }

    /// A bet is legal iff `0 < amount <= balance`. The menu is a suggestion
    /// only; any positive amount within the balance is accepted.
    pub fn validate(&self, balance: i64) -> Result<()> {
        if self.amount <= 0 || self.amount > balance {
            return Err(GameError::InvalidBet {
                amount: self.amount,
                balance,
            });
        }
        Ok(())
    }
}

/// Menu stakes the player can afford. Falls back to the entire balance when
/// even the smallest menu entry is out of reach, so a short stack can still
/// go all-in.
pub fn suggested_amounts(menu: &[i64], balance: i64) -> Vec<i64> {
    let affordable: Vec<i64> = menu
        .iter()
        .copied()
        .filter(|&amount| amount <= balance)
        .collect();

    if affordable.is_empty() {
        vec![balance]
    } else {
        affordable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        let bet = Bet::new(CoinSide::Heads, 100);
        assert!(bet.validate(100).is_ok());
        assert!(bet.validate(1000).is_ok());
        assert_eq!(
            bet.validate(99),
            Err(GameError::InvalidBet {
                amount: 100,
                balance: 99
            })
        );

        assert!(Bet::new(CoinSide::Tails, 0).validate(1000).is_err());
        assert!(Bet::new(CoinSide::Tails, -5).validate(1000).is_err());
    }

    #[test]
    fn test_menu_filtering() {
        assert_eq!(
            suggested_amounts(&BET_MENU, 1000),
            vec![10, 50, 100, 500, 1000]
        );
        assert_eq!(suggested_amounts(&BET_MENU, 499), vec![10, 50, 100]);
        assert_eq!(suggested_amounts(&BET_MENU, 10), vec![10]);
    }

    #[test]
    fn test_menu_falls_back_to_whole_balance() {
        assert_eq!(suggested_amounts(&BET_MENU, 7), vec![7]);
    }
}
