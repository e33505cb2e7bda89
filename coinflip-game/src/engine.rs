use crate::bet::Bet;
use crate::coin::CoinSide;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Result of one settled bet, handed back to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetOutcome {
    /// Side the coin actually landed on.
    pub outcome: CoinSide,
    pub won: bool,
    /// Amount that was wagered.
    pub amount: i64,
    pub new_balance: i64,
}

/// Settles a bet against a drawn outcome.
///
/// Stateless: reads a balance, never a ledger. A win pays double the stake
/// (net gain = amount), a loss forfeits the stake (net loss = amount).
pub fn settle(balance: i64, bet: Bet, outcome: CoinSide) -> Result<BetOutcome> {
    bet.validate(balance)?;

    let won = outcome == bet.side;
    let new_balance = if won {
        balance + bet.amount
    } else {
        balance - bet.amount
    };

    Ok(BetOutcome {
        outcome,
        won,
        amount: bet.amount,
        new_balance,
    })
}
