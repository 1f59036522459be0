use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::odds::AmericanOdds;

pub type Stake = Decimal;

/// Identifies a market outcome a user can put on the slip, e.g. `g1-ml1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectionId(String);

impl SelectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifies a placed bet in the history log. Never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BetId(String);

impl BetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketType {
    Spread,
    Moneyline,
    Total,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetType {
    Spread,
    Moneyline,
    Total,
    Parlay,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Active,
    Won,
    Lost,
}
/// Result reported by the external settlement event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetMode {
    #[default]
    Straight,
    Parlay,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    Active,
    Settled,
    Won,
    Lost,
}

/// A proposed wager sitting on the bet slip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetCandidate {
    pub id: SelectionId,
    pub game: String,
    pub market: MarketType,
    pub selection: String,
    pub odds: AmericanOdds,
    pub amount: Stake,
}

impl BetCandidate {
    pub fn new(
        id: SelectionId,
        game: impl Into<String>,
        market: MarketType,
        selection: impl Into<String>,
        odds: AmericanOdds,
    ) -> Self {
        Self {
            id,
            game: game.into(),
            market,
            selection: selection.into(),
            odds,
            amount: Decimal::ZERO,
        }
    }
    pub fn with_amount(mut self, amount: Stake) -> Self {
        self.amount = amount;
        self
    }
    pub fn is_qualifying(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParlayLeg {
    pub game: String,
    pub selection: String,
    pub odds: AmericanOdds,
    pub stake: Stake,
}

/// History entry. Everything but the settlement fields is frozen at placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBet {
    pub id: BetId,
    pub game: String,
    pub bet_type: BetType,
    pub selection: String,
    pub odds: String,
    pub amount: Stake,
    pub status: BetStatus,
    pub placed_at: DateTime<Utc>,
    pub potential_win: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub legs: Vec<ParlayLeg>,
}

impl PlacedBet {
    pub fn is_settled(&self) -> bool {
        self.status != BetStatus::Active
    }
}
