use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use super::*;
use crate::error::ParseLabelError;

impl Display for SelectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl From<&str> for SelectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
impl Display for BetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl From<&str> for BetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
impl Display for MarketType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Spread => "Spread",
            Self::Moneyline => "Moneyline",
            Self::Total => "Total",
        };
        write!(f, "{}", output)
    }
}
impl From<MarketType> for BetType {
    fn from(market: MarketType) -> Self {
        match market {
            MarketType::Spread => Self::Spread,
            MarketType::Moneyline => Self::Moneyline,
            MarketType::Total => Self::Total,
        }
    }
}
impl Display for BetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Spread => "Spread",
            Self::Moneyline => "Moneyline",
            Self::Total => "Total",
            Self::Parlay => "Parlay",
        };
        write!(f, "{}", output)
    }
}
impl Display for BetStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{}", output)
    }
}
impl FromStr for BetStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            e => Err(ParseLabelError::new("bet status", e)),
        }
    }
}
impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{}", output)
    }
}
impl FromStr for Outcome {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "won" | "win" => Ok(Self::Won),
            "lost" | "loss" => Ok(Self::Lost),
            e => Err(ParseLabelError::new("outcome", e)),
        }
    }
}
impl Display for BetMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::Straight => "straight",
            Self::Parlay => "parlay",
        };
        write!(f, "{}", output)
    }
}
impl FromStr for BetMode {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(Self::Straight),
            "parlay" => Ok(Self::Parlay),
            e => Err(ParseLabelError::new("bet mode", e)),
        }
    }
}
impl Display for HistoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let output = match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Settled => "settled",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{}", output)
    }
}
impl FromStr for HistoryFilter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "settled" => Ok(Self::Settled),
            "won" => Ok(Self::Won),
            "lost" => Ok(Self::Lost),
            e => Err(ParseLabelError::new("history filter", e)),
        }
    }
}
impl HistoryFilter {
    pub fn matches(&self, status: BetStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == BetStatus::Active,
            Self::Settled => status != BetStatus::Active,
            Self::Won => status == BetStatus::Won,
            Self::Lost => status == BetStatus::Lost,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn labels_round_trip_through_display() {
        for mode in [BetMode::Straight, BetMode::Parlay] {
            assert_eq!(BetMode::from_str(&mode.to_string()).unwrap(), mode);
        }
        assert_eq!(Outcome::from_str("WIN").unwrap(), Outcome::Won);
        assert!(HistoryFilter::from_str("pending").is_err());
    }

    #[test]
    fn ids_display_as_their_string() {
        assert_eq!(SelectionId::from("g1-ml1").to_string(), "g1-ml1");
        assert_eq!(BetId::new("bet1").to_string(), "bet1");
        assert_eq!(format!("[{}]", BetId::from("bet-7")), "[bet-7]");
    }

    #[test]
    fn settled_filter_excludes_active() {
        assert!(!HistoryFilter::Settled.matches(BetStatus::Active));
        assert!(HistoryFilter::Settled.matches(BetStatus::Won));
        assert!(HistoryFilter::Settled.matches(BetStatus::Lost));
        assert!(HistoryFilter::All.matches(BetStatus::Active));
        assert!(!HistoryFilter::Won.matches(BetStatus::Lost));
    }
}
