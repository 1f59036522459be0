use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::*;
use crate::odds::AmericanOdds;
use crate::payout::ParlayOdds;

/// Derived figures the front end renders next to the slip.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct SlipQuote {
    pub legs: Vec<LegQuote>,
    pub has_valid_bets: bool,
    pub parlay: Option<ParlayQuote>,
}
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct LegQuote {
    pub id: SelectionId,
    pub game: String,
    pub selection: String,
    pub odds: AmericanOdds,
    pub amount: Stake,
    /// Only present once the leg carries a positive stake.
    pub to_win: Option<Decimal>,
}
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct ParlayQuote {
    pub legs: usize,
    pub multiplier: Decimal,
    pub odds: ParlayOdds,
    pub total_stake: Stake,
    pub payout: Decimal,
}
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Default)]
pub struct HistorySummary {
    pub bets: usize,
    pub active: usize,
    pub won: usize,
    pub lost: usize,
    pub total_staked: Decimal,
    pub total_returned: Decimal,
    pub net_profit: Decimal,
}
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub score: Decimal,
}
