//! # Facility KPIs
//!
//! Density figures per unit of floor area and the PUE/WUE/CUE efficiency
//! ratios.
//!
//! | KPI | Formula | Unit |
//! |-----|---------|------|
//! | IT density | P_IT / IT area | kW/m² |
//! | Electrical density | S / total built area | kVA/m² |
//! | Thermal density | installed HVAC / IT area | kW/m² |
//! | Rack density | racks / IT area | racks/m² |
//! | PUE | P_total / P_IT | - |
//! | WUE | (P_HVAC / P_IT) × water consumption ratio | - |
//! | CUE | PUE × carbon emission factor | - |

use serde::{Deserialize, Serialize};

use super::electrical::ElectricalSizing;
use super::hvac::HvacSizing;
use super::loads::LoadProfile;
use crate::parameters::DesignParameters;

// ============================================================================
// Density
// ============================================================================

/// Area-normalised facility densities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityKpis {
    /// kW of IT per m² of IT room
    pub it_density_kw_m2: f64,
    /// kVA of facility demand per m² of built area
    pub electrical_density_kva_m2: f64,
    /// kW of installed cooling per m² of IT room
    pub thermal_density_kw_m2: f64,
    /// Racks per m² of IT room
    pub rack_density_per_m2: f64,
}

impl DensityKpis {
    /// Compute densities, or `None` if the IT room or built area is not positive.
    pub fn calculate(
        params: &DesignParameters,
        loads: &LoadProfile,
        electrical: &ElectricalSizing,
        hvac: &HvacSizing,
    ) -> Option<Self> {
        let it_area = params.it_room_area_m2;
        let built_area = params.total_built_area_m2();
        if it_area <= 0.0 || built_area <= 0.0 {
            tracing::warn!(it_area, built_area, "density KPIs skipped, area is not positive");
            return None;
        }

        Some(DensityKpis {
            it_density_kw_m2: loads.it_kw() / it_area,
            electrical_density_kva_m2: electrical.total_apparent_kva / built_area,
            thermal_density_kw_m2: hvac.installed_capacity_kw / it_area,
            rack_density_per_m2: params.total_racks() as f64 / it_area,
        })
    }

    /// Labeled rows for tabular output
    pub fn entries(&self) -> [(&'static str, f64, &'static str); 4] {
        [
            ("IT density", self.it_density_kw_m2, "kW/m²"),
            ("Electrical density", self.electrical_density_kva_m2, "kVA/m²"),
            ("Thermal density", self.thermal_density_kw_m2, "kW/m²"),
            ("Rack density", self.rack_density_per_m2, "racks/m²"),
        ]
    }
}

// ============================================================================
// Efficiency
// ============================================================================

/// Power, water and carbon usage effectiveness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    pub pue: f64,
    pub wue: f64,
    pub cue: f64,
}

impl Default for EfficiencyMetrics {
    /// The ideal facility, reported when there is no IT load
    fn default() -> Self {
        EfficiencyMetrics {
            pue: 1.0,
            wue: 0.0,
            cue: 0.0,
        }
    }
}

impl EfficiencyMetrics {
    pub fn calculate(params: &DesignParameters, loads: &LoadProfile) -> Self {
        if loads.it_w <= 0.0 {
            return EfficiencyMetrics::default();
        }
        let pue = loads.total_w / loads.it_w;
        EfficiencyMetrics {
            pue,
            wue: loads.hvac_w / loads.it_w * params.water_consumption_ratio,
            cue: pue * params.carbon_emission_factor,
        }
    }
}
