//! # HVAC System Sizer
//!
//! Sizes the air-side cooling plant and its chilled-water loops.
//!
//! - Design capacity = (P_IT − DLC-captured heat) × containment factor
//! - Installed capacity = design × HVAC redundancy factor
//! - Unit class: 100 kW units up to 1000 kW installed, 500 kW units above
//! - Primary loop at ΔT 5 °C, secondary loop at ΔT 6 °C, both carrying the
//!   installed capacity

use serde::{Deserialize, Serialize};

use super::cooling::dlc_captured_heat_w;
use super::hydraulic::{size_loop, LoopSizing, PipeRunGeometry};
use super::loads::it_power_w;
use crate::catalog::Catalog;
use crate::errors::CalcResult;
use crate::parameters::DesignParameters;
use crate::units::{Kilowatts, Watts};

/// Primary chilled-water loop differential (°C)
pub const PRIMARY_DELTA_T_C: f64 = 5.0;
/// Secondary chilled-water loop differential (°C)
pub const SECONDARY_DELTA_T_C: f64 = 6.0;

/// Installed capacity up to which small units are used (kW)
const UNIT_CLASS_THRESHOLD_KW: f64 = 1000.0;
const SMALL_UNIT_KW: f64 = 100.0;
const LARGE_UNIT_KW: f64 = 500.0;

/// Results from HVAC sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HvacSizing {
    /// IT heat handled by DLC instead of air (kW)
    pub dlc_captured_kw: f64,
    /// Air-side cooling load including containment losses (kW)
    pub design_capacity_kw: f64,
    /// Design capacity × redundancy (kW)
    pub installed_capacity_kw: f64,
    /// Capacity class of one production unit (kW)
    pub unit_capacity_kw: f64,
    pub primary: LoopSizing,
    pub secondary: LoopSizing,
}

impl HvacSizing {
    /// Production units of the selected class needed for the installed capacity
    pub fn unit_count(&self) -> u32 {
        if self.unit_capacity_kw > 0.0 {
            (self.installed_capacity_kw / self.unit_capacity_kw).ceil().max(0.0) as u32
        } else {
            1
        }
    }

    /// Combined pipe length of both loops (m)
    pub fn pipe_length_m(&self) -> f64 {
        self.primary.length_m() + self.secondary.length_m()
    }
}

/// Production unit class for an installed capacity (kW)
pub fn unit_capacity_class_kw(installed_kw: f64) -> f64 {
    if installed_kw <= UNIT_CLASS_THRESHOLD_KW {
        SMALL_UNIT_KW
    } else {
        LARGE_UNIT_KW
    }
}

/// Size the HVAC plant.
///
/// # Errors
///
/// * `CalcError::Configuration` - zero enclosures
pub fn calculate(params: &DesignParameters, catalog: &Catalog) -> CalcResult<HvacSizing> {
    let it_kw = Kilowatts::from(Watts(it_power_w(params)));
    let captured_kw = Kilowatts::from(Watts(dlc_captured_heat_w(params, it_power_w(params))?));

    let design = (it_kw - captured_kw) * params.containment.inefficiency_factor();
    let installed = design * catalog.redundancy.factor(params.hvac_redundancy);

    let geometry = PipeRunGeometry::from_params(params);
    let primary = size_loop(installed, PRIMARY_DELTA_T_C, &geometry, &catalog.pipes);
    let secondary = size_loop(installed, SECONDARY_DELTA_T_C, &geometry, &catalog.pipes);

    tracing::debug!(
        design_kw = design.0,
        installed_kw = installed.0,
        "HVAC plant sized"
    );

    Ok(HvacSizing {
        dlc_captured_kw: captured_kw.0,
        design_capacity_kw: design.0,
        installed_capacity_kw: installed.0,
        unit_capacity_kw: unit_capacity_class_kw(installed.0),
        primary,
        secondary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::hydraulic::MAX_VELOCITY_MS;
    use crate::redundancy::RedundancyTier;

    #[test]
    fn test_default_plant() {
        let sizing = calculate(&DesignParameters::default(), Catalog::builtin()).unwrap();
        // 240 kW × 1.05
        assert!((sizing.design_capacity_kw - 252.0).abs() < 1e-9);
        // × 1.25 for N+1
        assert!((sizing.installed_capacity_kw - 315.0).abs() < 1e-9);
        assert_eq!(sizing.unit_capacity_kw, 100.0);
        assert_eq!(sizing.unit_count(), 4);

        let primary = sizing.primary.circuit();
        assert_eq!(primary.diameter_mm, 100.0);
        assert_eq!(primary.circuit_count, 1);
        assert!(sizing.secondary.circuit().velocity_ms <= MAX_VELOCITY_MS);
    }

    #[test]
    fn test_secondary_flow_is_lower() {
        let sizing = calculate(&DesignParameters::default(), Catalog::builtin()).unwrap();
        let ratio = sizing.secondary.circuit().flow_m3h / sizing.primary.circuit().flow_m3h;
        assert!((ratio - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_plant_uses_500kw_units() {
        let params = DesignParameters {
            enclosure_count: 20,
            hvac_redundancy: RedundancyTier::TwoN,
            ..DesignParameters::default()
        };
        let sizing = calculate(&params, Catalog::builtin()).unwrap();
        // 1200 kW × 1.05 × 2 = 2520 kW
        assert!((sizing.installed_capacity_kw - 2520.0).abs() < 1e-9);
        assert_eq!(sizing.unit_capacity_kw, 500.0);
        assert_eq!(sizing.unit_count(), 6);
    }

    #[test]
    fn test_dlc_reduces_air_load() {
        let params = DesignParameters {
            dlc_enclosures: 4,
            dlc_capture_efficiency: 1.0,
            ..DesignParameters::default()
        };
        let sizing = calculate(&params, Catalog::builtin()).unwrap();
        assert!(sizing.installed_capacity_kw.abs() < 1e-9);
        assert!(sizing.primary.is_degenerate());
        assert_eq!(sizing.pipe_length_m(), 0.0);
    }

    #[test]
    fn test_unit_class_boundary() {
        assert_eq!(unit_capacity_class_kw(1000.0), 100.0);
        assert_eq!(unit_capacity_class_kw(1000.1), 500.0);
    }
}
