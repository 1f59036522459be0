use std::path::PathBuf;

use thiserror::Error;

use crate::api::{BetId, BetStatus};

/// Rejections raised while parsing an American-odds string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OddsError {
    #[error("odds string is empty")]
    Empty,

    #[error("odds '{0}' must start with '+' or '-'")]
    MissingSign(String),

    #[error("odds '{0}' must be a sign followed by digits")]
    InvalidDigits(String),

    #[error("odds '{0}' are out of range")]
    Overflow(String),

    #[error("odds '{0}' have a zero magnitude")]
    ZeroMagnitude(String),
}

/// A money figure left the range a `Decimal` can hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("amount is too large to calculate a payout")]
    Overflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no bet on the slip carries a stake above zero")]
    NoQualifyingBets,

    #[error("a parlay needs at least 2 staked legs, the slip has {qualifying}")]
    ParlayUnavailable { qualifying: usize },

    #[error(transparent)]
    Payout(#[from] PayoutError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no bet with id {0} in the history")]
    UnknownBet(BetId),

    #[error("bet {id} was already settled as {status}")]
    AlreadySettled { id: BetId, status: BetStatus },

    #[error(transparent)]
    Payout(#[from] PayoutError),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown selection '{0}'")]
    UnknownSelection(String),
}

/// A label that doesn't name any variant of the enum it was parsed into.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {kind}")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl ParseLabelError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
