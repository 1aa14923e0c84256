//! # DLC Hydraulic Sizer
//!
//! Sizes the direct-liquid-cooling loops for the heat captured at the racks:
//! facility-side primary loop at ΔT 5 °C, technology cooling (rack-side)
//! secondary loop at ΔT 8 °C.

use serde::{Deserialize, Serialize};

use super::cooling::dlc_captured_heat_w;
use super::hydraulic::{size_loop, LoopSizing, PipeRunGeometry};
use super::loads::it_power_w;
use crate::catalog::Catalog;
use crate::errors::CalcResult;
use crate::parameters::DesignParameters;
use crate::units::{Kilowatts, Watts};

/// Facility-side loop differential (°C)
pub const PRIMARY_DELTA_T_C: f64 = 5.0;
/// Rack-side loop differential (°C)
pub const SECONDARY_DELTA_T_C: f64 = 8.0;

/// Results from DLC hydraulic sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DlcSizing {
    /// Heat captured by the liquid loop (kW)
    pub captured_kw: f64,
    pub primary: LoopSizing,
    pub secondary: LoopSizing,
}

impl DlcSizing {
    /// Combined pipe length of both loops (m)
    pub fn pipe_length_m(&self) -> f64 {
        self.primary.length_m() + self.secondary.length_m()
    }
}

/// Size the DLC loops.
///
/// With no DLC enclosures the captured heat is zero and both loops come back
/// degenerate.
///
/// # Errors
///
/// * `CalcError::Configuration` - zero enclosures
pub fn calculate(params: &DesignParameters, catalog: &Catalog) -> CalcResult<DlcSizing> {
    let captured = Kilowatts::from(Watts(dlc_captured_heat_w(params, it_power_w(params))?));
    let geometry = PipeRunGeometry::from_params(params);

    Ok(DlcSizing {
        captured_kw: captured.0,
        primary: size_loop(captured, PRIMARY_DELTA_T_C, &geometry, &catalog.pipes),
        secondary: size_loop(captured, SECONDARY_DELTA_T_C, &geometry, &catalog.pipes),
    })
}
