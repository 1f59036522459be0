use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::{BetCandidate, SelectionId, Stake};

/// The candidates a user is currently staging, in the order they were picked.
///
/// Ids are unique: every write path checks for an existing entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetSlip {
    entries: Vec<BetCandidate>,
}

impl BetSlip {
    pub fn new() -> Self {
        Self::default()
    }
    /// Appends the candidate unless its id is already on the slip.
    pub fn add(&mut self, candidate: BetCandidate) -> bool {
        if self.contains(&candidate.id) {
            trace!("{} is already on the slip", candidate.id);
            return false;
        }
        debug!("Adding {} ({}) to the slip", candidate.id, candidate.selection);
        self.entries.push(candidate);
        true
    }
    /// Removes the candidate if present, otherwise adds it. Returns whether
    /// the candidate ends up on the slip.
    pub fn toggle(&mut self, candidate: BetCandidate) -> bool {
        if self.contains(&candidate.id) {
            self.remove(&candidate.id);
            false
        } else {
            self.add(candidate)
        }
    }
    /// The amount is stored as given; stakes are validated at placement.
    pub fn update_amount(&mut self, id: &SelectionId, amount: Stake) {
        match self.entries.iter_mut().find(|entry| entry.id == *id) {
            Some(entry) => {
                debug!("Stake on {} set to {}", id, amount);
                entry.amount = amount;
            }
            None => trace!("Ignoring stake update for {} which isn't on the slip", id),
        }
    }
    pub fn remove(&mut self, id: &SelectionId) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != *id);
        if self.entries.len() != before {
            debug!("Removed {} from the slip", id);
        }
    }
    pub fn clear(&mut self) {
        debug!("Clearing {} bets from the slip", self.entries.len());
        self.entries.clear();
    }
    pub fn set_all_amounts(&mut self, per_bet: Stake) {
        for entry in self.entries.iter_mut() {
            entry.amount = per_bet;
        }
    }
    /// Spreads one total stake evenly over every entry, as the parlay stake
    /// field does.
    pub fn split_total_stake(&mut self, total: Stake) {
        if self.entries.is_empty() {
            return;
        }
        let per_bet = total / Decimal::from(self.entries.len());
        debug!(
            "Splitting {} over {} legs ({} each)",
            total,
            self.entries.len(),
            per_bet
        );
        self.set_all_amounts(per_bet);
    }

    pub fn get(&self, id: &SelectionId) -> Option<&BetCandidate> {
        self.entries.iter().find(|entry| entry.id == *id)
    }
    pub fn contains(&self, id: &SelectionId) -> bool {
        self.get(id).is_some()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &BetCandidate> {
        self.entries.iter()
    }
    pub fn entries(&self) -> &[BetCandidate] {
        &self.entries
    }
    /// Entries with a stake above zero.
    pub fn qualifying(&self) -> impl Iterator<Item = &BetCandidate> {
        self.entries.iter().filter(|entry| entry.is_qualifying())
    }
    pub fn has_valid_bets(&self) -> bool {
        self.qualifying().next().is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::MarketType;
    use rust_decimal_macros::dec;

    fn candidate(id: &str, odds: &str) -> BetCandidate {
        BetCandidate::new(
            SelectionId::new(id),
            "Kansas City Chiefs vs Buffalo Bills",
            MarketType::Moneyline,
            format!("pick {}", id),
            odds.parse().unwrap(),
        )
    }

    #[test]
    fn add_is_idempotent() {
        let mut slip = BetSlip::new();
        assert!(slip.add(candidate("g1-ml1", "-130")));
        assert!(!slip.add(candidate("g1-ml1", "-130").with_amount(dec!(5))));
        assert_eq!(slip.len(), 1);
        assert_eq!(slip.entries()[0].amount, Decimal::ZERO);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut slip = BetSlip::new();
        slip.add(candidate("g2-ml2", "-175"));
        slip.add(candidate("g1-ml1", "-130"));
        slip.add(candidate("g3-over", "-110"));
        let ids: Vec<_> = slip.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["g2-ml2", "g1-ml1", "g3-over"]);
    }

    #[test]
    fn toggle_twice_restores_the_slip() {
        let mut slip = BetSlip::new();
        slip.add(candidate("g1-sp1", "-110"));
        let before = slip.clone();

        assert!(slip.toggle(candidate("g1-ml1", "-130")));
        assert_eq!(slip.len(), 2);
        assert!(!slip.toggle(candidate("g1-ml1", "-130")));
        assert_eq!(slip, before);
    }

    #[test]
    fn toggle_deselects_a_staked_pick() {
        let mut slip = BetSlip::new();
        slip.add(candidate("g1-ml1", "-130").with_amount(dec!(50)));
        assert!(!slip.toggle(candidate("g1-ml1", "-130")));
        assert!(slip.is_empty());
    }

    #[test]
    fn update_amount_does_not_clamp() {
        let mut slip = BetSlip::new();
        slip.add(candidate("g1-ml1", "-130"));
        slip.update_amount(&"g1-ml1".into(), dec!(-5));
        assert_eq!(slip.get(&"g1-ml1".into()).unwrap().amount, dec!(-5));
        assert!(!slip.has_valid_bets());

        slip.update_amount(&"nope".into(), dec!(10));
        assert_eq!(slip.len(), 1);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut slip = BetSlip::new();
        slip.add(candidate("g1-ml1", "-130").with_amount(dec!(50)));
        let before = slip.clone();
        slip.remove(&"g9-ml1".into());
        assert_eq!(slip, before);
        slip.remove(&"g1-ml1".into());
        assert!(slip.is_empty());
    }

    #[test]
    fn split_total_stake_divides_evenly() {
        let mut slip = BetSlip::new();
        slip.add(candidate("g1-ml1", "-130"));
        slip.add(candidate("g2-ml1", "+150"));
        slip.add(candidate("g3-ml1", "+165"));
        slip.split_total_stake(dec!(30));
        assert!(slip.iter().all(|c| c.amount == dec!(10)));

        slip.set_all_amounts(Decimal::ZERO);
        assert!(!slip.has_valid_bets());

        let mut empty = BetSlip::new();
        empty.split_total_stake(dec!(30));
        assert!(empty.is_empty());
    }

    #[test]
    fn qualifying_skips_unstaked_entries() {
        let mut slip = BetSlip::new();
        slip.add(candidate("g1-ml1", "-130").with_amount(dec!(50)));
        slip.add(candidate("g2-ml1", "+150"));
        let ids: Vec<_> = slip.qualifying().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["g1-ml1"]);
        assert!(slip.has_valid_bets());

        slip.clear();
        assert!(slip.is_empty());
        assert!(!slip.has_valid_bets());
    }
}
