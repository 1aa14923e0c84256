//! # Cooling Load Partition
//!
//! Splits the IT heat between direct-liquid-cooling capture and the
//! air-cooled remainder, and converts each share into electrical demand.
//!
//! ```text
//! Q_dlc   = P_IT × (dlc_enclosures / enclosures) × capture_efficiency
//! P_dlc   = Q_dlc / COP_dlc + dlc_enclosures × aux_per_enclosure
//! Q_air   = (P_IT − Q_dlc) × containment_factor
//! P_hvac  = Q_air / COP_hvac
//! ```
//!
//! A COP ≤ 0 contributes zero demand rather than failing.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::parameters::DesignParameters;

/// Heat and power split between liquid and air cooling (W)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoolingPartition {
    /// IT heat removed by the liquid loop
    pub dlc_captured_w: f64,
    /// IT heat left to the air side, before containment losses
    pub air_remainder_w: f64,
    /// Air-side heat including mixing losses
    pub air_cooling_load_w: f64,
    pub dlc_demand_w: f64,
    pub hvac_demand_w: f64,
}

impl CoolingPartition {
    /// Partition `it_w` watts of IT heat.
    ///
    /// # Errors
    ///
    /// * `CalcError::Configuration` - zero enclosures (the DLC share is undefined)
    pub fn calculate(params: &DesignParameters, it_w: f64) -> CalcResult<Self> {
        let dlc_captured_w = dlc_captured_heat_w(params, it_w)?;

        let dlc_generation_w = if params.dlc_generation_cop > 0.0 {
            dlc_captured_w / params.dlc_generation_cop
        } else {
            0.0
        };
        let dlc_demand_w =
            dlc_generation_w + f64::from(params.dlc_enclosures) * params.dlc_aux_power_per_enclosure_w;

        let air_remainder_w = it_w - dlc_captured_w;
        let air_cooling_load_w = air_remainder_w * params.containment.inefficiency_factor();
        let hvac_demand_w = if params.hvac_cop > 0.0 {
            air_cooling_load_w / params.hvac_cop
        } else {
            0.0
        };

        Ok(CoolingPartition {
            dlc_captured_w,
            air_remainder_w,
            air_cooling_load_w,
            dlc_demand_w,
            hvac_demand_w,
        })
    }
}

/// Heat captured by DLC (W).
///
/// # Errors
///
/// * `CalcError::Configuration` - `enclosure_count` is zero
pub fn dlc_captured_heat_w(params: &DesignParameters, it_w: f64) -> CalcResult<f64> {
    if params.enclosure_count == 0 {
        return Err(CalcError::configuration(
            "enclosure_count",
            "cannot apportion DLC capture across zero enclosures",
        ));
    }
    let dlc_share = f64::from(params.dlc_enclosures) / f64::from(params.enclosure_count);
    Ok(it_w * dlc_share * params.dlc_capture_efficiency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Containment;

    #[test]
    fn test_air_only_cold_aisle() {
        // 240 kW IT, no DLC, cold aisle, COP 3.5 -> 240 000 × 1.05 / 3.5
        let params = DesignParameters::default();
        let part = CoolingPartition::calculate(&params, 240_000.0).unwrap();
        assert_eq!(part.dlc_captured_w, 0.0);
        assert_eq!(part.dlc_demand_w, 0.0);
        assert!((part.hvac_demand_w - 72_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_dlc_split() {
        let params = DesignParameters {
            dlc_enclosures: 2,
            dlc_capture_efficiency: 0.8,
            dlc_generation_cop: 10.0,
            dlc_aux_power_per_enclosure_w: 500.0,
            containment: Containment::HotAisle,
            ..DesignParameters::default()
        };
        let part = CoolingPartition::calculate(&params, 240_000.0).unwrap();
        // 240 000 × 2/4 × 0.8
        assert!((part.dlc_captured_w - 96_000.0).abs() < 1e-6);
        // 96 000 / 10 + 2 × 500
        assert!((part.dlc_demand_w - 10_600.0).abs() < 1e-6);
        // (240 000 − 96 000) × 1.25 / 3.5
        assert!((part.hvac_demand_w - 51_428.571).abs() < 0.01);
    }

    #[test]
    fn test_zero_cop_gives_zero_demand() {
        let params = DesignParameters {
            dlc_enclosures: 1,
            dlc_generation_cop: 0.0,
            hvac_cop: 0.0,
            ..DesignParameters::default()
        };
        let part = CoolingPartition::calculate(&params, 240_000.0).unwrap();
        assert_eq!(part.hvac_demand_w, 0.0);
        // Only the per-enclosure auxiliary draw remains
        assert_eq!(part.dlc_demand_w, 500.0);
    }

    #[test]
    fn test_zero_enclosures_is_configuration_error() {
        let params = DesignParameters {
            enclosure_count: 0,
            ..DesignParameters::default()
        };
        let err = CoolingPartition::calculate(&params, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
