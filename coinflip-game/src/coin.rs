use crate::error::GameError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The two faces of the coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    pub fn other(self) -> Self {
        match self {
            Self::Heads => Self::Tails,
            Self::Tails => Self::Heads,
        }
    }
}

impl std::fmt::Display for CoinSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heads => write!(f, "heads"),
            Self::Tails => write!(f, "tails"),
        }
    }
}

impl std::str::FromStr for CoinSide {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heads" | "h" => Ok(Self::Heads),
            "tails" | "t" => Ok(Self::Tails),
            other => Err(GameError::UnknownSide(other.to_string())),
        }
    }
}

/// Source of coin tosses. The seam that lets tests script outcomes while
/// production play stays on a fair random coin.
pub trait Coin: Send {
    fn toss(&mut self) -> CoinSide;
}

/// Uniform independent draw per toss. No seeding or reproducibility
/// contract; each call hits the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct FairCoin;

impl Coin for FairCoin {
    fn toss(&mut self) -> CoinSide {
        if rand::thread_rng().gen_bool(0.5) {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }
}

/// Deterministic coin that replays a fixed script, cycling when exhausted.
/// Used by tests and demos that need known outcomes.
#[derive(Debug, Clone)]
pub struct SequenceCoin {
    script: Vec<CoinSide>,
    next: usize,
}

impl SequenceCoin {
    pub fn new(script: Vec<CoinSide>) -> Self {
        assert!(!script.is_empty(), "SequenceCoin needs at least one side");
        Self { script, next: 0 }
    }
}

impl Coin for SequenceCoin {
    fn toss(&mut self) -> CoinSide {
        let side = self.script[self.next % self.script.len()];
        self.next += 1;
        side
    }
}
