//! # Load Aggregator
//!
//! Builds the facility electrical demand from the parameter snapshot:
//!
//! - IT: total servers × maximum server draw
//! - Fire/life-safety: pump groups × 20 kW + fire panels × 500 W
//! - Control: cameras × 100 W + access points × 50 W + detection units × 150 W
//! - Auxiliary: lighting + other small power + fire/life-safety + control
//! - Cooling (HVAC and DLC) from the [`cooling`](super::cooling) partition
//!
//! The per-unit coefficients are fixed domain constants.

use serde::{Deserialize, Serialize};

use super::cooling::CoolingPartition;
use crate::errors::CalcResult;
use crate::parameters::DesignParameters;

/// Draw of one fire pump group (W)
pub const FIRE_PUMP_GROUP_W: f64 = 20_000.0;
/// Draw of one fire alarm panel (W)
pub const FIRE_PANEL_W: f64 = 500.0;
/// Draw of one CCTV camera (W)
pub const CAMERA_W: f64 = 100.0;
/// Draw of one access control point (W)
pub const ACCESS_POINT_W: f64 = 50.0;
/// Draw of one aspirating detection unit (W)
pub const DETECTION_UNIT_W: f64 = 150.0;

/// Shares below this are dropped from the consumption breakdown (W)
const BREAKDOWN_THRESHOLD_W: f64 = 1e-3;

/// Facility electrical demand, all in watts.
///
/// `total_w` is always `it_w + hvac_w + dlc_w + aux_w`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadProfile {
    pub it_w: f64,
    pub hvac_w: f64,
    pub dlc_w: f64,
    /// Lighting + other + fire/life-safety + control
    pub aux_w: f64,
    pub total_w: f64,

    pub lighting_w: f64,
    pub other_w: f64,
    pub fire_safety_w: f64,
    pub control_w: f64,
}

impl LoadProfile {
    /// Total demand in kilowatts
    pub fn total_kw(&self) -> f64 {
        self.total_w / 1000.0
    }

    /// IT demand in kilowatts
    pub fn it_kw(&self) -> f64 {
        self.it_w / 1000.0
    }

    /// Labeled demand shares for charting, skipping negligible entries.
    ///
    /// Fire/life-safety is folded into the "Aux" share together with other
    /// small power.
    pub fn breakdown(&self) -> Vec<(&'static str, f64)> {
        [
            ("IT", self.it_w),
            ("HVAC", self.hvac_w),
            ("DLC", self.dlc_w),
            ("Lighting", self.lighting_w),
            ("Control", self.control_w),
            ("Aux", self.other_w + self.fire_safety_w),
        ]
        .into_iter()
        .filter(|(_, w)| *w > BREAKDOWN_THRESHOLD_W)
        .collect()
    }
}

/// IT demand: total servers × maximum server draw (W)
pub fn it_power_w(params: &DesignParameters) -> f64 {
    params.total_servers() as f64 * params.server_max_power_w
}

/// Fire and life-safety demand (W)
pub fn fire_safety_power_w(params: &DesignParameters) -> f64 {
    f64::from(params.fire_pump_groups) * FIRE_PUMP_GROUP_W + f64::from(params.fire_panels) * FIRE_PANEL_W
}

/// Security and control demand (W)
pub fn control_power_w(params: &DesignParameters) -> f64 {
    f64::from(params.cameras) * CAMERA_W
        + f64::from(params.access_points) * ACCESS_POINT_W
        + f64::from(params.detection_units) * DETECTION_UNIT_W
}

/// Aggregate the facility load profile.
///
/// # Errors
///
/// * `CalcError::Configuration` - zero enclosures (from the cooling partition)
pub fn calculate(params: &DesignParameters) -> CalcResult<LoadProfile> {
    let it_w = it_power_w(params);
    let cooling = CoolingPartition::calculate(params, it_w)?;
    Ok(assemble(params, it_w, &cooling))
}

/// Combine the IT load and a cooling partition into a load profile
pub(crate) fn assemble(params: &DesignParameters, it_w: f64, cooling: &CoolingPartition) -> LoadProfile {
    let fire_safety_w = fire_safety_power_w(params);
    let control_w = control_power_w(params);
    let aux_w = params.lighting_power_w + params.other_power_w + fire_safety_w + control_w;

    let profile = LoadProfile {
        it_w,
        hvac_w: cooling.hvac_demand_w,
        dlc_w: cooling.dlc_demand_w,
        aux_w,
        total_w: it_w + cooling.hvac_demand_w + cooling.dlc_demand_w + aux_w,
        lighting_w: params.lighting_power_w,
        other_w: params.other_power_w,
        fire_safety_w,
        control_w,
    };

    tracing::debug!(
        it_w = profile.it_w,
        hvac_w = profile.hvac_w,
        dlc_w = profile.dlc_w,
        aux_w = profile.aux_w,
        total_w = profile.total_w,
        "load profile aggregated"
    );
    profile
}
