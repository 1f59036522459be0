use std::collections::HashSet;

use chrono::Utc;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::api::*;
use crate::error::{HistoryError, PayoutError, PlacementError};
use crate::history::{summary, BetLog, MemoryBetLog};
use crate::payout::{
    self, implied_parlay_odds, parlay_multiplier, qualifying_stake, straight_payout, total_return,
    MIN_PARLAY_LEGS,
};
use crate::slip::BetSlip;

/// One user's betting session: the slip being built, the panel it is shown
/// in, and the log of everything placed so far.
///
/// All writes go through `&mut self` methods.
pub struct Sportsbook {
    slip: BetSlip,
    history: Box<dyn BetLog>,
    slip_open: bool,
}

impl Default for Sportsbook {
    fn default() -> Self {
        Self::new(Box::new(MemoryBetLog::new()))
    }
}

impl Sportsbook {
    pub fn new(history: Box<dyn BetLog>) -> Self {
        Self {
            slip: BetSlip::new(),
            history,
            slip_open: false,
        }
    }

    pub fn slip(&self) -> &BetSlip {
        &self.slip
    }
    pub fn history(&self) -> &dyn BetLog {
        self.history.as_ref()
    }
    pub fn is_slip_open(&self) -> bool {
        self.slip_open
    }
    pub fn open_slip(&mut self) {
        self.slip_open = true;
    }
    /// Hides the slip panel; the slip itself is kept.
    pub fn close_slip(&mut self) {
        self.slip_open = false;
    }

    pub fn add(&mut self, candidate: BetCandidate) -> bool {
        self.slip.add(candidate)
    }
    /// Selecting an outcome that is already on the slip deselects it.
    pub fn select(&mut self, candidate: BetCandidate) -> bool {
        self.slip.toggle(candidate)
    }
    pub fn update_amount(&mut self, id: &SelectionId, amount: Stake) {
        self.slip.update_amount(id, amount)
    }
    pub fn set_parlay_stake(&mut self, total: Stake) {
        self.slip.split_total_stake(total)
    }
    pub fn remove(&mut self, id: &SelectionId) {
        self.slip.remove(id)
    }
    pub fn clear_slip(&mut self) {
        self.slip.clear()
    }
    pub fn quote(&self) -> Result<SlipQuote, PayoutError> {
        payout::quote(&self.slip)
    }

    /// Turns the staked part of the slip into history entries.
    ///
    /// Either every staked entry is placed and the slip is cleared, or the
    /// call fails and nothing changes.
    pub fn place(&mut self, mode: BetMode) -> Result<Vec<BetId>, PlacementError> {
        let qualifying: Vec<&BetCandidate> = self.slip.qualifying().collect();
        if qualifying.is_empty() {
            warn!("Rejected {} placement: no staked bets on the slip", mode);
            return Err(PlacementError::NoQualifyingBets);
        }
        let staked = qualifying_stake(&qualifying)?;
        let placed = match mode {
            BetMode::Straight => self.straight_bets(&qualifying)?,
            BetMode::Parlay => {
                let Some(multiplier) = parlay_multiplier(self.slip.entries())? else {
                    warn!(
                        "Rejected parlay placement: {} staked legs, {} needed",
                        qualifying.len(),
                        MIN_PARLAY_LEGS
                    );
                    return Err(PlacementError::ParlayUnavailable {
                        qualifying: qualifying.len(),
                    });
                };
                vec![self.parlay_bet(&qualifying, staked, multiplier)?]
            }
        };
        // A bet must be settleable as won before it goes into the log.
        for bet in &placed {
            total_return(bet.amount, bet.potential_win)?;
        }
        let ids: Vec<BetId> = placed.iter().map(|bet| bet.id.clone()).collect();
        info!(
            "Placed {} {} bet(s), staking {}",
            placed.len(),
            mode,
            staked
        );
        self.history.prepend(placed);
        self.slip.clear();
        self.slip_open = false;
        Ok(ids)
    }

    fn straight_bets(&self, qualifying: &[&BetCandidate]) -> Result<Vec<PlacedBet>, PayoutError> {
        let placed_at = Utc::now();
        let mut issued = HashSet::new();
        qualifying
            .iter()
            .map(|entry| -> Result<PlacedBet, PayoutError> {
                Ok(PlacedBet {
                    id: self.next_bet_id(&mut issued),
                    game: entry.game.clone(),
                    bet_type: entry.market.into(),
                    selection: entry.selection.clone(),
                    odds: entry.odds.to_string(),
                    amount: entry.amount,
                    status: BetStatus::Active,
                    placed_at,
                    potential_win: straight_payout(entry.amount, &entry.odds)?,
                    result: None,
                    legs: vec![],
                })
            })
            .collect()
    }

    fn parlay_bet(
        &self,
        qualifying: &[&BetCandidate],
        amount: Stake,
        multiplier: Decimal,
    ) -> Result<PlacedBet, PayoutError> {
        let potential_win = amount
            .checked_mul(multiplier - Decimal::ONE)
            .ok_or(PayoutError::Overflow)?;
        let legs: Vec<ParlayLeg> = qualifying
            .iter()
            .map(|leg| ParlayLeg {
                game: leg.game.clone(),
                selection: leg.selection.clone(),
                odds: leg.odds,
                stake: leg.amount,
            })
            .collect();
        let game = legs
            .iter()
            .map(|leg| leg.game.as_str())
            .collect::<Vec<_>>()
            .join(" / ");
        debug!("Building {} leg parlay at {}", legs.len(), multiplier);
        Ok(PlacedBet {
            id: self.next_bet_id(&mut HashSet::new()),
            game,
            bet_type: BetType::Parlay,
            selection: format!("{} leg parlay", legs.len()),
            odds: implied_parlay_odds(multiplier)?.to_string(),
            amount,
            status: BetStatus::Active,
            placed_at: Utc::now(),
            potential_win: cents(potential_win),
            result: None,
            legs,
        })
    }

    /// Draws ids until one is unused by both the log and the current batch.
    fn next_bet_id(&self, issued: &mut HashSet<BetId>) -> BetId {
        loop {
            let id = BetId::new(format!("bet-{}", Uuid::new_v4().simple()));
            if !self.history.contains(&id) && issued.insert(id.clone()) {
                return id;
            }
            warn!("Bet id {} collided, drawing another", id);
        }
    }

    pub fn filter_history(&self, filter: HistoryFilter) -> Vec<&PlacedBet> {
        self.history.filter(filter)
    }
    /// Applies an externally reported result to an active bet.
    pub fn record_settlement(
        &mut self,
        id: &BetId,
        outcome: Outcome,
    ) -> Result<&PlacedBet, HistoryError> {
        self.history.record_settlement(id, outcome)
    }
    pub fn summary(&self) -> Result<HistorySummary, PayoutError> {
        summary(self.history.as_ref())
    }
}
