//! The read-only game/odds table the slip picks from.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::{BetCandidate, MarketType, PlacedBet, SelectionId};
use crate::error::{CatalogError, ParseLabelError};
use crate::odds::AmericanOdds;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");
const SAMPLE_HISTORY: &str = include_str!("../data/sample_history.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadSide {
    pub team: String,
    pub line: String,
    pub odds: AmericanOdds,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneylineSide {
    pub team: String,
    pub odds: AmericanOdds,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalLine {
    pub over: AmericanOdds,
    pub under: AmericanOdds,
    pub points: String,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: u32,
    pub team1: String,
    pub team2: String,
    pub time: String,
    pub spread1: SpreadSide,
    pub spread2: SpreadSide,
    pub moneyline1: MoneylineSide,
    pub moneyline2: MoneylineSide,
    pub total: TotalLine,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sport {
    pub name: String,
    pub icon: String,
    pub games: Vec<Game>,
}

/// One selectable outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pick {
    Spread1,
    Spread2,
    Moneyline1,
    Moneyline2,
    Over,
    Under,
}

impl Pick {
    pub const ALL: [Pick; 6] = [
        Pick::Spread1,
        Pick::Spread2,
        Pick::Moneyline1,
        Pick::Moneyline2,
        Pick::Over,
        Pick::Under,
    ];
    pub fn key(&self) -> &'static str {
        match self {
            Self::Spread1 => "sp1",
            Self::Spread2 => "sp2",
            Self::Moneyline1 => "ml1",
            Self::Moneyline2 => "ml2",
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}
impl Display for Pick {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
impl FromStr for Pick {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pick| pick.key() == s)
            .ok_or_else(|| ParseLabelError::new("pick", s))
    }
}

impl Game {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.team1, self.team2)
    }
    pub fn selection_id(&self, pick: Pick) -> SelectionId {
        SelectionId::new(format!("g{}-{}", self.id, pick.key()))
    }
    pub fn odds(&self, pick: Pick) -> AmericanOdds {
        match pick {
            Pick::Spread1 => self.spread1.odds,
            Pick::Spread2 => self.spread2.odds,
            Pick::Moneyline1 => self.moneyline1.odds,
            Pick::Moneyline2 => self.moneyline2.odds,
            Pick::Over => self.total.over,
            Pick::Under => self.total.under,
        }
    }
    /// Builds the slip entry for `pick`, stake zero.
    pub fn candidate(&self, pick: Pick) -> BetCandidate {
        let (market, selection) = match pick {
            Pick::Spread1 => (
                MarketType::Spread,
                format!("{} {}", self.spread1.team, self.spread1.line),
            ),
            Pick::Spread2 => (
                MarketType::Spread,
                format!("{} {}", self.spread2.team, self.spread2.line),
            ),
            Pick::Moneyline1 => (MarketType::Moneyline, self.team1.clone()),
            Pick::Moneyline2 => (MarketType::Moneyline, self.team2.clone()),
            Pick::Over => (MarketType::Total, format!("Over {}", self.total.points)),
            Pick::Under => (MarketType::Total, format!("Under {}", self.total.points)),
        };
        BetCandidate::new(
            self.selection_id(pick),
            self.label(),
            market,
            selection,
            self.odds(pick),
        )
    }
}

/// Sport key (`nfl`, `nba`, ...) to its games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    sports: BTreeMap<String, Sport>,
}

impl Catalog {
    /// The demo table compiled into the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        debug!(
            "Loaded catalog with {} sports and {} games",
            catalog.sports.len(),
            catalog.games().count()
        );
        Ok(catalog)
    }
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
    pub fn sports(&self) -> impl Iterator<Item = (&str, &Sport)> {
        self.sports.iter().map(|(key, sport)| (key.as_str(), sport))
    }
    pub fn sport(&self, key: &str) -> Option<&Sport> {
        self.sports.get(key)
    }
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.sports.values().flat_map(|sport| sport.games.iter())
    }
    pub fn game(&self, id: u32) -> Option<&Game> {
        self.games().find(|game| game.id == id)
    }
    /// Resolves an id of the form `g<game>-<pick>` into a fresh candidate.
    pub fn candidate(&self, id: &str) -> Result<BetCandidate, CatalogError> {
        let unknown = || CatalogError::UnknownSelection(id.to_string());
        let (game, pick) = id
            .strip_prefix('g')
            .and_then(|rest| rest.split_once('-'))
            .ok_or_else(unknown)?;
        let game = game.parse::<u32>().map_err(|_| unknown())?;
        let pick = pick.parse::<Pick>().map_err(|_| unknown())?;
        let game = self.game(game).ok_or_else(unknown)?;
        Ok(game.candidate(pick))
    }
}

/// The demo bet history, newest first.
pub fn sample_history() -> Result<Vec<PlacedBet>, CatalogError> {
    Ok(serde_json::from_str(SAMPLE_HISTORY)?)
}
