//! # Electrical System Sizer
//!
//! Sizes the MV/LV chain from the total facility demand.
//!
//! ## Method
//!
//! 1. Apparent power S = P_total / 0.9
//! 2. Per-side requirement: S for dual feed (each side carries the full
//!    load), S × electrical redundancy factor for a single feed
//! 3. Transformer: smallest standard kVA rating ≥ per-side requirement
//! 4. MV cells: 2 incomers + one per side
//! 5. LV panel current I = S_rated / (√3 · 400 V); busway snapped up to a
//!    standard rating
//! 6. Rack circuit: rack current × 1.25 snapped up to a standard breaker
//!
//! When a requirement exceeds every standard rating the selection is an
//! [`RatingSelection::Overflow`]; transformer and busway report the raw
//! requirement, the rack breaker reports 32 A.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{electrical, loads};
//! use calc_core::catalog::Catalog;
//! use calc_core::parameters::DesignParameters;
//!
//! let params = DesignParameters::default();
//! let profile = loads::calculate(&params).unwrap();
//! let sizing = electrical::calculate(&params, &profile, Catalog::builtin());
//!
//! assert_eq!(sizing.rated_capacity_kva(), 630.0);
//! assert_eq!(sizing.mv_cell_count, 4);
//! ```

use serde::{Deserialize, Serialize};

use super::loads::LoadProfile;
use crate::catalog::{Catalog, RatingSelection};
use crate::parameters::{DesignParameters, SupplyTopology};
use crate::units::{Kilowatts, KiloVoltAmperes, Watts};

/// Fixed facility power factor
pub const POWER_FACTOR: f64 = 0.9;
/// LV line-to-line voltage (V)
pub const LV_LINE_VOLTAGE_V: f64 = 400.0;
/// Safety margin on rack current before snapping to a breaker rating
pub const RACK_BREAKER_MARGIN: f64 = 1.25;
/// Breaker reported when the rack current exceeds every standard rating (A)
pub const RACK_BREAKER_FALLBACK_A: f64 = 32.0;
/// MV incomer/metering cells present regardless of topology
const MV_BASE_CELLS: u32 = 2;

/// Results from electrical sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricalSizing {
    /// Apparent power of the whole facility at N (kVA)
    pub total_apparent_kva: f64,
    /// Apparent power each supply side must carry (kVA)
    pub required_per_side_kva: f64,
    /// Transformer rating per side (kVA)
    pub transformer: RatingSelection,
    /// Independent supply sides (one transformer and LV board each)
    pub side_count: u32,
    pub mv_cell_count: u32,
    /// Main LV panel current at the rated transformer capacity (A)
    pub panel_current_a: f64,
    /// Busway rating (A)
    pub busway: RatingSelection,
    /// Rack circuit current before margin (A)
    pub rack_current_a: f64,
    /// Rack circuit breaker rating (A)
    pub rack_breaker: RatingSelection,
}

impl ElectricalSizing {
    /// Rated transformer capacity (kVA); the raw requirement on overflow
    pub fn rated_capacity_kva(&self) -> f64 {
        self.transformer.value()
    }

    /// Busway rating (A); the panel current on overflow
    pub fn busway_current_a(&self) -> f64 {
        self.busway.value()
    }

    /// Rack breaker rating (A)
    pub fn rack_circuit_current_a(&self) -> f64 {
        self.rack_breaker.value()
    }

    /// True if any selection fell outside its standard rating list
    pub fn has_overflow(&self) -> bool {
        self.transformer.is_overflow() || self.busway.is_overflow() || self.rack_breaker.is_overflow()
    }
}

/// Apparent power for an active power at the facility power factor
pub fn apparent_power(total: Watts) -> KiloVoltAmperes {
    Kilowatts::from(total).to_apparent(POWER_FACTOR)
}

/// Size the electrical system.
///
/// # Arguments
///
/// * `params` - Topology, redundancy and rack configuration
/// * `loads` - Aggregated facility demand
/// * `catalog` - Standard rating lists and redundancy factors
pub fn calculate(params: &DesignParameters, loads: &LoadProfile, catalog: &Catalog) -> ElectricalSizing {
    let total_apparent = apparent_power(Watts(loads.total_w));
    let side_count = params.supply_topology.side_count();
    let required_per_side = match params.supply_topology {
        SupplyTopology::DualFeed => total_apparent,
        SupplyTopology::SingleFeed => total_apparent * catalog.redundancy.factor(params.electrical_redundancy),
    };

    let transformer = RatingSelection::select(&catalog.ratings.transformer_kva, required_per_side.0);
    let panel_current = KiloVoltAmperes(transformer.value()).three_phase_current(LV_LINE_VOLTAGE_V);
    let busway = RatingSelection::select(&catalog.ratings.busway_a, panel_current.0);

    // Rack circuits are rated on nameplate power, unity power factor
    let rack_current = KiloVoltAmperes(Kilowatts::from(Watts(params.rack_power_w())).0)
        .three_phase_current(LV_LINE_VOLTAGE_V);
    let rack_breaker = RatingSelection::select_with_fallback(
        &catalog.ratings.rack_breaker_a,
        rack_current.0 * RACK_BREAKER_MARGIN,
        RACK_BREAKER_FALLBACK_A,
    );

    tracing::debug!(
        total_apparent_kva = total_apparent.0,
        required_per_side_kva = required_per_side.0,
        transformer_kva = transformer.value(),
        busway_a = busway.value(),
        rack_breaker_a = rack_breaker.value(),
        "electrical system sized"
    );

    ElectricalSizing {
        total_apparent_kva: total_apparent.0,
        required_per_side_kva: required_per_side.0,
        transformer,
        side_count,
        mv_cell_count: MV_BASE_CELLS + side_count,
        panel_current_a: panel_current.0,
        busway,
        rack_current_a: rack_current.0,
        rack_breaker,
    }
}
