use log::{debug, info};
use rust_decimal::Decimal;

use crate::api::{BetId, BetStatus, HistoryFilter, HistorySummary, Outcome, PlacedBet};
use crate::error::{HistoryError, PayoutError};
use crate::payout::total_return;

/// Storage for placed bets, newest first.
///
/// Entries are only ever added at the front; the settlement fields are the
/// only part of an entry that changes afterwards.
pub trait BetLog {
    /// Puts `bets` ahead of every existing entry, keeping their given order.
    fn prepend(&mut self, bets: Vec<PlacedBet>);
    fn bets(&self) -> &[PlacedBet];
    fn record_settlement(
        &mut self,
        id: &BetId,
        outcome: Outcome,
    ) -> Result<&PlacedBet, HistoryError>;

    fn get(&self, id: &BetId) -> Option<&PlacedBet> {
        self.bets().iter().find(|bet| bet.id == *id)
    }
    fn contains(&self, id: &BetId) -> bool {
        self.get(id).is_some()
    }
    fn len(&self) -> usize {
        self.bets().len()
    }
    fn is_empty(&self) -> bool {
        self.bets().is_empty()
    }
    fn filter(&self, filter: HistoryFilter) -> Vec<&PlacedBet> {
        self.bets()
            .iter()
            .filter(|bet| filter.matches(bet.status))
            .collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBetLog {
    bets: Vec<PlacedBet>,
}

impl MemoryBetLog {
    pub fn new() -> Self {
        Self::default()
    }
    /// Starts from existing entries, which must already be newest first.
    pub fn with_bets(bets: Vec<PlacedBet>) -> Self {
        Self { bets }
    }
}

impl BetLog for MemoryBetLog {
    fn prepend(&mut self, bets: Vec<PlacedBet>) {
        debug!(
            "Prepending {} bets to a history of {}",
            bets.len(),
            self.bets.len()
        );
        self.bets.splice(0..0, bets);
    }
    fn bets(&self) -> &[PlacedBet] {
        &self.bets
    }
    fn record_settlement(
        &mut self,
        id: &BetId,
        outcome: Outcome,
    ) -> Result<&PlacedBet, HistoryError> {
        let bet = self
            .bets
            .iter_mut()
            .find(|bet| bet.id == *id)
            .ok_or_else(|| HistoryError::UnknownBet(id.clone()))?;
        if bet.is_settled() {
            return Err(HistoryError::AlreadySettled {
                id: id.clone(),
                status: bet.status,
            });
        }
        let (status, result) = match outcome {
            Outcome::Won => (BetStatus::Won, total_return(bet.amount, bet.potential_win)?),
            Outcome::Lost => (BetStatus::Lost, Decimal::ZERO),
        };
        bet.status = status;
        bet.result = Some(result);
        info!("Bet {} settled as {}, result {:?}", bet.id, bet.status, bet.result);
        Ok(bet)
    }
}

fn add(total: Decimal, amount: Decimal) -> Result<Decimal, PayoutError> {
    total.checked_add(amount).ok_or(PayoutError::Overflow)
}

/// Counts and money totals over a log. Profit only counts settled bets.
pub fn summary(log: &dyn BetLog) -> Result<HistorySummary, PayoutError> {
    let mut summary = HistorySummary::default();
    for bet in log.bets() {
        summary.bets += 1;
        summary.total_staked = add(summary.total_staked, bet.amount)?;
        match bet.status {
            BetStatus::Active => summary.active += 1,
            BetStatus::Won => summary.won += 1,
            BetStatus::Lost => summary.lost += 1,
        }
        if let Some(result) = bet.result {
            let profit = result
                .checked_sub(bet.amount)
                .ok_or(PayoutError::Overflow)?;
            summary.total_returned = add(summary.total_returned, result)?;
            summary.net_profit = add(summary.net_profit, profit)?;
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::BetType;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn bet(id: &str, amount: Decimal, potential_win: Decimal) -> PlacedBet {
        PlacedBet {
            id: BetId::new(id),
            game: "Los Angeles Lakers vs Boston Celtics".into(),
            bet_type: BetType::Spread,
            selection: "LAL +4.5".into(),
            odds: "-110".into(),
            amount,
            status: BetStatus::Active,
            placed_at: Utc::now(),
            potential_win,
            result: None,
            legs: vec![],
        }
    }

    #[test]
    fn prepend_keeps_newest_first() {
        let mut log = MemoryBetLog::with_bets(vec![bet("old", dec!(5), dec!(4.55))]);
        log.prepend(vec![
            bet("new1", dec!(10), dec!(9.09)),
            bet("new2", dec!(20), dec!(18.18)),
        ]);
        let ids: Vec<_> = log.bets().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["new1", "new2", "old"]);
        assert_eq!(log.len(), 3);
        assert!(log.contains(&"old".into()));
    }

    #[test]
    fn winning_settlement_returns_stake_plus_winnings() {
        let mut log = MemoryBetLog::new();
        log.prepend(vec![bet("bet2", dec!(25), dec!(22.73))]);
        let settled = log.record_settlement(&"bet2".into(), Outcome::Won).unwrap();
        assert_eq!(settled.status, BetStatus::Won);
        assert_eq!(settled.result, Some(dec!(47.73)));
    }

    #[test]
    fn losing_settlement_returns_nothing() {
        let mut log = MemoryBetLog::new();
        log.prepend(vec![bet("bet3", dec!(20), dec!(57))]);
        let settled = log.record_settlement(&"bet3".into(), Outcome::Lost).unwrap();
        assert_eq!(settled.status, BetStatus::Lost);
        assert_eq!(settled.result, Some(Decimal::ZERO));
    }

    #[test]
    fn settlement_happens_once() {
        let mut log = MemoryBetLog::new();
        log.prepend(vec![bet("bet1", dec!(50), dec!(38.46))]);
        log.record_settlement(&"bet1".into(), Outcome::Lost).unwrap();
        assert_eq!(
            log.record_settlement(&"bet1".into(), Outcome::Won),
            Err(HistoryError::AlreadySettled {
                id: "bet1".into(),
                status: BetStatus::Lost
            })
        );
        assert_eq!(
            log.record_settlement(&"missing".into(), Outcome::Won),
            Err(HistoryError::UnknownBet("missing".into()))
        );
    }

    #[test]
    fn filters_by_status_category() {
        let mut log = MemoryBetLog::new();
        log.prepend(vec![
            bet("a", dec!(10), dec!(9.09)),
            bet("b", dec!(10), dec!(9.09)),
            bet("c", dec!(10), dec!(9.09)),
        ]);
        log.record_settlement(&"b".into(), Outcome::Won).unwrap();
        log.record_settlement(&"c".into(), Outcome::Lost).unwrap();

        let ids = |filter| -> Vec<String> {
            log.filter(filter)
                .iter()
                .map(|b| b.id.to_string())
                .collect()
        };
        assert_eq!(ids(HistoryFilter::All), vec!["a", "b", "c"]);
        assert_eq!(ids(HistoryFilter::Active), vec!["a"]);
        assert_eq!(ids(HistoryFilter::Settled), vec!["b", "c"]);
        assert_eq!(ids(HistoryFilter::Won), vec!["b"]);
        assert_eq!(ids(HistoryFilter::Lost), vec!["c"]);
    }

    #[test]
    fn summary_counts_profit_from_settled_bets_only() {
        let mut log = MemoryBetLog::new();
        log.prepend(vec![
            bet("active", dec!(50), dec!(38.46)),
            bet("won", dec!(25), dec!(22.73)),
            bet("lost", dec!(20), dec!(57)),
        ]);
        log.record_settlement(&"won".into(), Outcome::Won).unwrap();
        log.record_settlement(&"lost".into(), Outcome::Lost).unwrap();

        let summary = summary(&log).unwrap();
        assert_eq!(summary.bets, 3);
        assert_eq!((summary.active, summary.won, summary.lost), (1, 1, 1));
        assert_eq!(summary.total_staked, dec!(95));
        assert_eq!(summary.total_returned, dec!(47.73));
        assert_eq!(summary.net_profit, dec!(2.73));
    }

    #[test]
    fn oversized_settlement_leaves_the_bet_active() {
        let mut log = MemoryBetLog::with_bets(vec![bet("huge", Decimal::MAX, dec!(1))]);
        assert_eq!(
            log.record_settlement(&"huge".into(), Outcome::Won),
            Err(HistoryError::Payout(PayoutError::Overflow))
        );
        let bet = log.get(&"huge".into()).unwrap();
        assert_eq!(bet.status, BetStatus::Active);
        assert_eq!(bet.result, None);

        let settled = log.record_settlement(&"huge".into(), Outcome::Lost).unwrap();
        assert_eq!(settled.result, Some(Decimal::ZERO));
    }

    #[test]
    fn summary_overflow_is_an_error() {
        let log = MemoryBetLog::with_bets(vec![
            bet("a", Decimal::MAX, dec!(1)),
            bet("b", Decimal::MAX, dec!(1)),
        ]);
        assert_eq!(summary(&log), Err(PayoutError::Overflow));
    }
}
