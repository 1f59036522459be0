//! American odds and their conversion into a profit multiplier.
//!
//! The multiplier returned here is the *net profit* per unit staked, not a
//! decimal-odds total: `+150` pays 1.5 per unit, `-130` pays 100/130.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OddsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Plus,
    Minus,
}

/// A parsed `[+-]<digits>` odds line with a non-zero magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AmericanOdds {
    sign: Sign,
    magnitude: u32,
}

impl AmericanOdds {
    pub fn new(sign: Sign, magnitude: u32) -> Result<Self, OddsError> {
        if magnitude == 0 {
            let sign = if sign == Sign::Plus { '+' } else { '-' };
            return Err(OddsError::ZeroMagnitude(format!("{}0", sign)));
        }
        Ok(Self { sign, magnitude })
    }
    pub fn sign(&self) -> Sign {
        self.sign
    }
    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }
    pub fn is_underdog(&self) -> bool {
        self.sign == Sign::Plus
    }
    /// Net profit per unit staked.
    pub fn multiplier(&self) -> Decimal {
        let magnitude = Decimal::from(self.magnitude);
        match self.sign {
            Sign::Plus => magnitude / Decimal::ONE_HUNDRED,
            Sign::Minus => Decimal::ONE_HUNDRED / magnitude,
        }
    }
    /// Total returned per unit staked, stake included.
    pub fn decimal_odds(&self) -> Decimal {
        Decimal::ONE + self.multiplier()
    }
}

impl FromStr for AmericanOdds {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let sign = match chars.next() {
            None => return Err(OddsError::Empty),
            Some('+') => Sign::Plus,
            Some('-') => Sign::Minus,
            Some(_) => return Err(OddsError::MissingSign(s.to_string())),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OddsError::InvalidDigits(s.to_string()));
        }
        let magnitude = digits
            .parse::<u32>()
            .map_err(|_| OddsError::Overflow(s.to_string()))?;
        if magnitude == 0 {
            return Err(OddsError::ZeroMagnitude(s.to_string()));
        }
        Ok(Self { sign, magnitude })
    }
}

impl Display for AmericanOdds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.sign {
            Sign::Plus => write!(f, "+{}", self.magnitude),
            Sign::Minus => write!(f, "-{}", self.magnitude),
        }
    }
}

impl TryFrom<String> for AmericanOdds {
    type Error = OddsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AmericanOdds> for String {
    fn from(odds: AmericanOdds) -> Self {
        odds.to_string()
    }
}

/// Converts an odds string straight into its profit multiplier.
pub fn decimal_multiplier(american_odds: &str) -> Result<Decimal, OddsError> {
    Ok(american_odds.parse::<AmericanOdds>()?.multiplier())
}
