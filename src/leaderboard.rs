use rust_decimal::Decimal;

use crate::api::Standing;

const DEMO_PLAYERS: [(&str, i64); 5] = [
    ("Player One", 2450),
    ("Player Two", 2380),
    ("Player Three", 2320),
    ("Player Four", 2290),
    ("Player Five", 2250),
];

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    players: Vec<(String, Decimal)>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn demo() -> Self {
        let mut board = Self::new();
        for (name, score) in DEMO_PLAYERS {
            board.insert(name, Decimal::from(score));
        }
        board
    }
    /// Adds a player or replaces their score.
    pub fn insert(&mut self, name: impl Into<String>, score: Decimal) {
        let name = name.into();
        match self.players.iter_mut().find(|(player, _)| *player == name) {
            Some(entry) => entry.1 = score,
            None => self.players.push((name, score)),
        }
    }
    /// Highest score first. Equal scores share a rank and keep insertion
    /// order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut sorted: Vec<&(String, Decimal)> = self.players.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        let mut standings: Vec<Standing> = Vec::with_capacity(sorted.len());
        for (position, (name, score)) in sorted.into_iter().enumerate() {
            let rank = match standings.last() {
                Some(prev) if prev.score == *score => prev.rank,
                _ => position + 1,
            };
            standings.push(Standing {
                rank,
                name: name.clone(),
                score: *score,
            });
        }
        standings
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn demo_board_is_ranked() {
        let standings = Leaderboard::demo().standings();
        assert_eq!(standings.len(), 5);
        assert_eq!(standings[0].name, "Player One");
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[4].rank, 5);
    }

    #[test]
    fn inserted_player_takes_their_place() {
        let mut board = Leaderboard::demo();
        board.insert("You", dec!(2400));
        let standings = board.standings();
        assert_eq!(standings[1].name, "You");
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[2].name, "Player Two");

        board.insert("You", dec!(-10));
        let standings = board.standings();
        assert_eq!(standings.len(), 6);
        assert_eq!(standings[5].name, "You");
    }

    #[test]
    fn ties_share_a_rank() {
        let mut board = Leaderboard::new();
        board.insert("a", dec!(10));
        board.insert("b", dec!(20));
        board.insert("c", dec!(10));
        let ranks: Vec<_> = board
            .standings()
            .into_iter()
            .map(|s| (s.name, s.rank))
            .collect();
        assert_eq!(
            ranks,
            vec![("b".to_string(), 1), ("a".to_string(), 2), ("c".to_string(), 2)]
        );
    }
}
