//! Core value types for the river-crossing search.
//!
//! Every type here is a small `Copy` value so states and operators can be
//! hashed, compared and stored in the search arena without allocation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Side of the river currently holding the boat.
///
/// Deserializes through the same lenient text rule as `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Margin {
    Left,
    Right,
}

impl Margin {
    /// The other side of the river
    pub fn opposite(self) -> Margin {
        match self {
            Margin::Left => Margin::Right,
            Margin::Right => Margin::Left,
        }
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Margin::Left => f.write_str("left"),
            Margin::Right => f.write_str("right"),
        }
    }
}

/// Lenient parse: any text mentioning "esquerda"/"left" or "direita"/"right",
/// ignoring case. Anything else is rejected so the caller can decide whether
/// to fall back.
impl FromStr for Margin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        if lowered.contains("esquerda") || lowered.contains("left") {
            Ok(Margin::Left)
        } else if lowered.contains("direita") || lowered.contains("right") {
            Ok(Margin::Right)
        } else {
            Err(ConfigError::UnknownMargin(s.to_string()))
        }
    }
}

impl TryFrom<String> for Margin {
    type Error = ConfigError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

/// Population of one river bank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bank {
    pub missionaries: u32,
    pub cannibals: u32,
}

impl Bank {
    pub const EMPTY: Bank = Bank {
        missionaries: 0,
        cannibals: 0,
    };

    pub fn new(missionaries: u32, cannibals: u32) -> Self {
        Self {
            missionaries,
            cannibals,
        }
    }

    /// A bank is safe when it has no missionaries or they are not outnumbered
    pub fn is_safe(&self) -> bool {
        self.missionaries == 0 || self.missionaries >= self.cannibals
    }

    /// Whether this bank can supply the passengers of `operator`
    pub fn can_supply(&self, operator: Operator) -> bool {
        operator.missionaries <= self.missionaries && operator.cannibals <= self.cannibals
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.missionaries, self.cannibals)
    }
}

/// A full snapshot of the puzzle: both banks plus the boat position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub left_bank: Bank,
    pub right_bank: Bank,
    pub margin: Margin,
}

impl State {
    pub fn new(left_bank: Bank, right_bank: Bank, margin: Margin) -> Self {
        Self {
            left_bank,
            right_bank,
            margin,
        }
    }

    /// Bank the boat is currently moored at
    pub fn boat_bank(&self) -> &Bank {
        match self.margin {
            Margin::Left => &self.left_bank,
            Margin::Right => &self.right_bank,
        }
    }

    /// Both banks satisfy the safety rule
    pub fn is_safe(&self) -> bool {
        self.left_bank.is_safe() && self.right_bank.is_safe()
    }

    /// Population totals are `(missionaries, cannibals)` across both banks
    pub fn conserves(&self, missionaries: u32, cannibals: u32) -> bool {
        u64::from(self.left_bank.missionaries) + u64::from(self.right_bank.missionaries)
            == u64::from(missionaries)
            && u64::from(self.left_bank.cannibals) + u64::from(self.right_bank.cannibals)
                == u64::from(cannibals)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left={} right={} boat={}",
            self.left_bank, self.right_bank, self.margin
        )
    }
}

/// One boat trip: how many of each group cross together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Operator {
    pub missionaries: u32,
    pub cannibals: u32,
}

impl Operator {
    pub fn new(missionaries: u32, cannibals: u32) -> Self {
        Self {
            missionaries,
            cannibals,
        }
    }

    /// Number of passengers on the boat, widened so any pair of counts fits
    pub fn passengers(&self) -> u64 {
        u64::from(self.missionaries) + u64::from(self.cannibals)
    }

    /// The boat itself never holds outnumbered missionaries
    pub fn is_safe_load(&self) -> bool {
        self.missionaries == 0 || self.cannibals <= self.missionaries
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.missionaries, self.cannibals)
    }
}

/// Ordered operators leading from the initial state to the goal
pub type Plan = Vec<Operator>;
