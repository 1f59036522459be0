//! Straight and parlay payout figures derived from the slip.
//!
//! Stakes are unbounded, so every product and sum here is checked and a
//! figure too large for a `Decimal` comes back as [`PayoutError::Overflow`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::trace;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::api::{cents, BetCandidate, LegQuote, ParlayQuote, SlipQuote, Stake};
use crate::error::PayoutError;
use crate::odds::AmericanOdds;
use crate::slip::BetSlip;

/// Minimum number of staked legs before a parlay is offered.
pub const MIN_PARLAY_LEGS: usize = 2;

/// Combined parlay odds as shown to the user: `(multiplier - 1) * 100`.
///
/// Always rendered with a leading `+`, even when the combined line would be a
/// favourite in real American notation. Serializes as that rendered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParlayOdds(Decimal);

impl ParlayOdds {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Display for ParlayOdds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "+{}", whole)
    }
}

impl TryFrom<String> for ParlayOdds {
    type Error = rust_decimal::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.trim();
        let digits = digits.strip_prefix('+').unwrap_or(digits);
        Ok(Self(Decimal::from_str(digits)?))
    }
}

impl From<ParlayOdds> for String {
    fn from(odds: ParlayOdds) -> Self {
        odds.to_string()
    }
}

fn checked_sum(mut amounts: impl Iterator<Item = Stake>) -> Result<Stake, PayoutError> {
    amounts
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or(PayoutError::Overflow)
}

/// To-win amount for a single bet, in cents.
pub fn straight_payout(amount: Stake, odds: &AmericanOdds) -> Result<Decimal, PayoutError> {
    amount
        .checked_mul(odds.multiplier())
        .map(cents)
        .ok_or(PayoutError::Overflow)
}

/// Product of `1 + multiplier` over the staked entries, or `None` while fewer
/// than [`MIN_PARLAY_LEGS`] entries carry a stake.
pub fn parlay_multiplier(entries: &[BetCandidate]) -> Result<Option<Decimal>, PayoutError> {
    let legs: Vec<&BetCandidate> = entries.iter().filter(|e| e.is_qualifying()).collect();
    if legs.len() < MIN_PARLAY_LEGS {
        return Ok(None);
    }
    let multiplier = legs
        .iter()
        .try_fold(Decimal::ONE, |acc, leg| acc.checked_mul(leg.odds.decimal_odds()))
        .ok_or(PayoutError::Overflow)?;
    trace!("Parlay multiplier over {} legs: {}", legs.len(), multiplier);
    Ok(Some(multiplier))
}

/// Sum of every amount on the slip; unstaked entries add nothing.
pub fn parlay_total_stake(entries: &[BetCandidate]) -> Result<Stake, PayoutError> {
    checked_sum(entries.iter().map(|e| e.amount))
}

/// Sum of the stakes that qualify for placement.
pub fn qualifying_stake(entries: &[&BetCandidate]) -> Result<Stake, PayoutError> {
    checked_sum(entries.iter().map(|e| e.amount))
}

pub fn parlay_payout(entries: &[BetCandidate]) -> Result<Option<Decimal>, PayoutError> {
    let Some(multiplier) = parlay_multiplier(entries)? else {
        return Ok(None);
    };
    parlay_total_stake(entries)?
        .checked_mul(multiplier)
        .map(|payout| Some(cents(payout)))
        .ok_or(PayoutError::Overflow)
}

pub fn implied_parlay_odds(multiplier: Decimal) -> Result<ParlayOdds, PayoutError> {
    (multiplier - Decimal::ONE)
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(ParlayOdds)
        .ok_or(PayoutError::Overflow)
}

/// Stake plus winnings, what a won bet returns.
pub fn total_return(amount: Stake, potential_win: Decimal) -> Result<Decimal, PayoutError> {
    amount
        .checked_add(potential_win)
        .map(cents)
        .ok_or(PayoutError::Overflow)
}

pub fn has_valid_bets(entries: &[BetCandidate]) -> bool {
    entries.iter().any(|e| e.is_qualifying())
}

pub fn qualifying_count(entries: &[BetCandidate]) -> usize {
    entries.iter().filter(|e| e.is_qualifying()).count()
}

/// Everything the front end shows beside the slip.
pub fn quote(slip: &BetSlip) -> Result<SlipQuote, PayoutError> {
    let entries = slip.entries();
    let legs = entries
        .iter()
        .map(|entry| -> Result<LegQuote, PayoutError> {
            let to_win = if entry.is_qualifying() {
                Some(straight_payout(entry.amount, &entry.odds)?)
            } else {
                None
            };
            Ok(LegQuote {
                id: entry.id.clone(),
                game: entry.game.clone(),
                selection: entry.selection.clone(),
                odds: entry.odds,
                amount: entry.amount,
                to_win,
            })
        })
        .collect::<Result<Vec<_>, PayoutError>>()?;
    let parlay = match parlay_multiplier(entries)? {
        Some(multiplier) => {
            let total_stake = parlay_total_stake(entries)?;
            let payout = total_stake
                .checked_mul(multiplier)
                .ok_or(PayoutError::Overflow)?;
            Some(ParlayQuote {
                legs: qualifying_count(entries),
                multiplier,
                odds: implied_parlay_odds(multiplier)?,
                total_stake,
                payout: cents(payout),
            })
        }
        None => None,
    };
    Ok(SlipQuote {
        legs,
        has_valid_bets: has_valid_bets(entries),
        parlay,
    })
}
