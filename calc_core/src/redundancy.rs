//! # Redundancy Resolver
//!
//! Maps an infrastructure redundancy tier to the numeric duplication factor
//! applied to installed capacity (generators, UPS, single-feed transformers,
//! cooling plant).
//!
//! | Tier  | Factor |
//! |-------|--------|
//! | N     | 1.00   |
//! | N+1   | 1.25   |
//! | 2N    | 2.00   |
//! | 2N+1  | 2.25   |
//!
//! Labels that do not name a tier, including unknown labels in parameter
//! JSON, resolve to [`RedundancyTier::Unrecognized`] and a factor of 1.0
//! rather than failing.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::redundancy::{RedundancyTable, RedundancyTier};
//!
//! let table = RedundancyTable::default();
//! assert_eq!(table.factor(RedundancyTier::TwoN), 2.0);
//! assert_eq!(table.factor_for_label("N+1"), 1.25);
//! assert_eq!(table.factor_for_label("3N"), 1.0);
//! ```

use serde::{Deserialize, Serialize};

/// Redundancy tier of an infrastructure system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RedundancyTier {
    /// No redundancy
    #[default]
    #[serde(rename = "N")]
    N,
    /// One spare unit per group
    #[serde(rename = "N+1")]
    NPlusOne,
    /// Fully duplicated
    #[serde(rename = "2N")]
    TwoN,
    /// Fully duplicated plus one spare
    #[serde(rename = "2N+1")]
    TwoNPlusOne,
    /// Any label outside the known tiers; sized as N
    #[serde(rename = "unrecognized", other)]
    Unrecognized,
}

impl RedundancyTier {
    /// All tiers for UI selection
    pub const ALL: [RedundancyTier; 4] = [
        RedundancyTier::N,
        RedundancyTier::NPlusOne,
        RedundancyTier::TwoN,
        RedundancyTier::TwoNPlusOne,
    ];

    /// Parse a tier label ("N", "N+1", "2N", "2N+1"); surrounding whitespace is ignored
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "N" => Some(RedundancyTier::N),
            "N+1" => Some(RedundancyTier::NPlusOne),
            "2N" => Some(RedundancyTier::TwoN),
            "2N+1" => Some(RedundancyTier::TwoNPlusOne),
            _ => None,
        }
    }

    /// Parse a label, mapping anything unknown to [`RedundancyTier::Unrecognized`]
    pub fn from_label_lenient(label: &str) -> Self {
        Self::from_label(label).unwrap_or(RedundancyTier::Unrecognized)
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RedundancyTier::N => "N",
            RedundancyTier::NPlusOne => "N+1",
            RedundancyTier::TwoN => "2N",
            RedundancyTier::TwoNPlusOne => "2N+1",
            RedundancyTier::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for RedundancyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Duplication factor per tier.
///
/// Part of the injectable [`Catalog`](crate::catalog::Catalog) so that
/// alternate redundancy policies can be tested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedundancyTable {
    pub n: f64,
    pub n_plus_one: f64,
    pub two_n: f64,
    pub two_n_plus_one: f64,
}

impl Default for RedundancyTable {
    fn default() -> Self {
        RedundancyTable {
            n: 1.0,
            n_plus_one: 1.25,
            two_n: 2.0,
            two_n_plus_one: 2.25,
        }
    }
}

impl RedundancyTable {
    /// Duplication factor for a tier
    pub fn factor(&self, tier: RedundancyTier) -> f64 {
        match tier {
            RedundancyTier::N => self.n,
            RedundancyTier::NPlusOne => self.n_plus_one,
            RedundancyTier::TwoN => self.two_n,
            RedundancyTier::TwoNPlusOne => self.two_n_plus_one,
            RedundancyTier::Unrecognized => 1.0,
        }
    }

    /// Duplication factor for a free-form label; unknown labels yield 1.0
    pub fn factor_for_label(&self, label: &str) -> f64 {
        self.factor(RedundancyTier::from_label_lenient(label))
    }
}
