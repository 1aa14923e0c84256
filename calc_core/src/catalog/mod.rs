//! # Reference Catalogs
//!
//! Read-only configuration data the sizers and the budget draw on: unit
//! prices, standard equipment ratings, nominal pipe sizes and redundancy
//! factors. A [`Catalog`] is passed into every calculation so alternate
//! catalogs can be injected; [`Catalog::builtin`] returns the process-wide
//! default, built once on first use.
//!
//! ## Overrides
//!
//! A JSON document may override any part of a catalog. Price entries are
//! merged one by one; rating tables, pipe sizes and redundancy factors are
//! replaced field-wise.
//!
//! ```rust
//! use calc_core::catalog::{Catalog, PriceItem};
//!
//! let catalog = Catalog::builtin()
//!     .with_overrides_json(r#"{ "prices": { "Chiller": 180.0 } }"#)
//!     .unwrap();
//! assert_eq!(catalog.prices.price(PriceItem::Chiller).unwrap(), 180.0);
//! assert_eq!(catalog.prices.price(PriceItem::CrahUnit).unwrap(), 18000.0);
//! ```

pub mod prices;
pub mod ratings;

pub use prices::{PriceCatalog, PriceItem, Unit};
pub use ratings::{default_pipe_sizes, PipeMaterial, PipeSize, RatingTables};

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::redundancy::RedundancyTable;

static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(Catalog::default);

/// Complete set of reference data for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub prices: PriceCatalog,
    pub ratings: RatingTables,
    /// Nominal pipe sizes, smallest first
    pub pipes: Vec<PipeSize>,
    pub redundancy: RedundancyTable,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            prices: PriceCatalog::default(),
            ratings: RatingTables::default(),
            pipes: default_pipe_sizes(),
            redundancy: RedundancyTable::default(),
        }
    }
}

/// Partial catalog read from an override file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CatalogOverrides {
    prices: BTreeMap<PriceItem, f64>,
    ratings: Option<RatingTables>,
    pipes: Option<Vec<PipeSize>>,
    redundancy: Option<RedundancyTable>,
}

impl Catalog {
    /// The built-in catalog, shared by the whole process
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    /// Copy of this catalog with the overrides in `json` applied
    pub fn with_overrides_json(&self, json: &str) -> CalcResult<Catalog> {
        let overrides: CatalogOverrides = serde_json::from_str(json)?;
        let mut catalog = self.clone();
        catalog.prices.merge(overrides.prices);
        if let Some(ratings) = overrides.ratings {
            catalog.ratings = ratings;
        }
        if let Some(pipes) = overrides.pipes {
            catalog.pipes = pipes;
        }
        if let Some(redundancy) = overrides.redundancy {
            catalog.redundancy = redundancy;
        }
        Ok(catalog)
    }
}

/// Outcome of snapping a requirement to a standard rating list.
///
/// `Overflow` means no listed rating covers the requirement; `fallback` is
/// the value reported in its place and should be flagged to the user as a
/// custom / non-standard specification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RatingSelection {
    Standard { rating: f64 },
    Overflow { required: f64, fallback: f64 },
}

impl RatingSelection {
    /// Smallest rating ≥ `required`; overflow reports the raw requirement
    pub fn select(ratings: &[f64], required: f64) -> Self {
        Self::select_with_fallback(ratings, required, required)
    }

    /// Smallest rating ≥ `required`; overflow reports `fallback`
    pub fn select_with_fallback(ratings: &[f64], required: f64, fallback: f64) -> Self {
        let rating = ratings
            .iter()
            .copied()
            .filter(|&r| r >= required)
            .min_by(f64::total_cmp);
        match rating {
            Some(rating) => RatingSelection::Standard { rating },
            None => {
                tracing::warn!(required, fallback, "requirement exceeds every standard rating");
                RatingSelection::Overflow { required, fallback }
            }
        }
    }

    /// Selected rating, or the fallback on overflow
    pub fn value(&self) -> f64 {
        match self {
            RatingSelection::Standard { rating } => *rating,
            RatingSelection::Overflow { fallback, .. } => *fallback,
        }
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, RatingSelection::Overflow { .. })
    }
}
