//! # Facility Sizing Calculations
//!
//! Each sizer is a stateless function over the immutable
//! [`DesignParameters`] snapshot and a read-only [`Catalog`]:
//!
//! - [`loads`] - Facility demand aggregation
//! - [`cooling`] - DLC / air split of the IT heat
//! - [`electrical`] - Transformer, LV panel, busway and rack breaker sizing
//! - [`hvac`] - Air-side plant capacity and chilled-water loops
//! - [`dlc`] - Direct-liquid-cooling loops
//! - [`hydraulic`] - Pipe diameter / circuit count search shared by both
//! - [`metrics`] - Density KPIs and PUE/WUE/CUE
//!
//! [`calculate`] runs them all in dependency order and bundles the results
//! into a [`FacilitySizing`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations;
//! use calc_core::catalog::Catalog;
//! use calc_core::parameters::DesignParameters;
//!
//! let sizing = calculations::calculate(&DesignParameters::default(), Catalog::builtin()).unwrap();
//!
//! assert!((sizing.loads.total_kw() - 341.1).abs() < 1e-9);
//! assert_eq!(sizing.electrical.rated_capacity_kva(), 630.0);
//! assert!(sizing.density.is_some());
//! ```

pub mod cooling;
pub mod dlc;
pub mod electrical;
pub mod hvac;
pub mod hydraulic;
pub mod loads;
pub mod metrics;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::errors::CalcResult;
use crate::parameters::DesignParameters;

// Re-export commonly used types
pub use cooling::CoolingPartition;
pub use dlc::DlcSizing;
pub use electrical::ElectricalSizing;
pub use hvac::HvacSizing;
pub use hydraulic::{DegenerateReason, HydraulicCircuit, LoopSizing};
pub use loads::LoadProfile;
pub use metrics::{DensityKpis, EfficiencyMetrics};

/// Every sizing result for one parameter snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacilitySizing {
    pub loads: LoadProfile,
    pub cooling: CoolingPartition,
    pub electrical: ElectricalSizing,
    pub hvac: HvacSizing,
    pub dlc: DlcSizing,
    /// Absent when the IT room or built area is not positive
    pub density: Option<DensityKpis>,
    pub efficiency: EfficiencyMetrics,
}

/// Size the whole facility.
///
/// # Errors
///
/// * `CalcError::Configuration` - zero enclosures
pub fn calculate(params: &DesignParameters, catalog: &Catalog) -> CalcResult<FacilitySizing> {
    params.validate()?;

    let it_w = loads::it_power_w(params);
    let cooling = CoolingPartition::calculate(params, it_w)?;
    let loads = loads::assemble(params, it_w, &cooling);

    let electrical = electrical::calculate(params, &loads, catalog);
    let hvac = hvac::calculate(params, catalog)?;
    let dlc = dlc::calculate(params, catalog)?;

    let density = DensityKpis::calculate(params, &loads, &electrical, &hvac);
    let efficiency = EfficiencyMetrics::calculate(params, &loads);

    tracing::info!(
        total_kw = loads.total_kw(),
        transformer_kva = electrical.rated_capacity_kva(),
        installed_cooling_kw = hvac.installed_capacity_kw,
        pue = efficiency.pue,
        "facility sized"
    );

    Ok(FacilitySizing {
        loads,
        cooling,
        electrical,
        hvac,
        dlc,
        density,
        efficiency,
    })
}
