//! # Calculation Report
//!
//! Bundles one complete run: metadata, the parameter snapshot, every sizing
//! result, the budget, the equipment schedule and a list of advisories.
//! Report writers (PDF, spreadsheet) consume the JSON form of
//! [`CalculationReport`].
//!
//! ## Structure
//!
//! ```text
//! CalculationReport
//! ├── meta: ReportMetadata (version, run id, timestamp, engineer/job/client)
//! ├── parameters: DesignParameters
//! ├── sizing: FacilitySizing
//! ├── consumption: Vec<ConsumptionShare>
//! ├── budget: Budget
//! ├── schedule: Vec<ScheduleRow>
//! └── advisories: Vec<Advisory>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::catalog::Catalog;
//! use calc_core::parameters::DesignParameters;
//! use calc_core::report::{self, ReportMetadata};
//!
//! let meta = ReportMetadata::new("Jane Engineer", "26-014", "ACME Hosting");
//! let report = report::run(&DesignParameters::default(), Catalog::builtin(), meta).unwrap();
//!
//! assert!(report.advisories.is_empty());
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("ACME Hosting"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::budget::{self, Budget};
use crate::calculations::{self, DegenerateReason, FacilitySizing, LoopSizing};
use crate::catalog::{Catalog, RatingSelection};
use crate::errors::CalcResult;
use crate::parameters::DesignParameters;
use crate::schedule::{self, ScheduleRow};

/// Current schema version of the report JSON
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Who ran the calculation, for whom, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report schema version
    pub version: String,
    /// Unique id of this run
    pub run_id: Uuid,
    pub generated: DateTime<Utc>,
    pub engineer: String,
    /// Job/project number (e.g., "26-014")
    pub job_id: String,
    pub client: String,
}

impl ReportMetadata {
    /// Metadata stamped with a fresh run id and the current time
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        ReportMetadata {
            version: SCHEMA_VERSION.to_string(),
            run_id: Uuid::new_v4(),
            generated: Utc::now(),
            engineer: engineer.into(),
            job_id: job_id.into(),
            client: client.into(),
        }
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        ReportMetadata::new("", "", "")
    }
}

/// Condition the user should review; never aborts the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// A requirement exceeded every standard rating
    CapacityOverflow {
        equipment: String,
        required: f64,
        reported: f64,
    },
    /// A hydraulic loop could not be sized
    DegenerateLoop {
        loop_name: String,
        reason: DegenerateReason,
    },
    /// IT room or built area is not positive
    MissingDensityKpis,
    /// An input outside its physical range was sized as given
    InputOutOfRange {
        field: String,
        value: f64,
        expected: String,
    },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::CapacityOverflow {
                equipment,
                required,
                reported,
            } => write!(
                f,
                "{}: requirement {:.1} exceeds the standard range, reported as {:.1} (custom specification)",
                equipment, required, reported
            ),
            Advisory::DegenerateLoop { loop_name, reason } => {
                write!(f, "{} not sized: {}", loop_name, reason)
            }
            Advisory::MissingDensityKpis => {
                write!(f, "density KPIs unavailable: IT room or built area is not positive")
            }
            Advisory::InputOutOfRange { field, value, expected } => {
                write!(f, "{} = {} is outside {}; sized as given", field, value, expected)
            }
        }
    }
}

/// One labeled share of the facility demand (W)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionShare {
    pub label: String,
    pub watts: f64,
}

/// Everything produced by one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub meta: ReportMetadata,
    pub parameters: DesignParameters,
    pub sizing: FacilitySizing,
    pub consumption: Vec<ConsumptionShare>,
    pub budget: Budget,
    pub schedule: Vec<ScheduleRow>,
    pub advisories: Vec<Advisory>,
}

/// Run a full calculation and assemble its report.
///
/// # Errors
///
/// * `CalcError::Configuration` - invalid enclosure configuration
/// * `CalcError::CatalogEntryNotFound` - the price catalog lacks an entry
pub fn run(params: &DesignParameters, catalog: &Catalog, meta: ReportMetadata) -> CalcResult<CalculationReport> {
    let sizing = calculations::calculate(params, catalog)?;
    let budget = budget::build(params, &sizing, catalog)?;
    let schedule = schedule::build(params, &sizing);
    let consumption = sizing
        .loads
        .breakdown()
        .into_iter()
        .map(|(label, watts)| ConsumptionShare {
            label: label.to_string(),
            watts,
        })
        .collect();
    let advisories = collect_advisories(params, &sizing);

    for advisory in &advisories {
        tracing::warn!(%advisory, "calculation advisory");
    }
    tracing::info!(
        run_id = %meta.run_id,
        grand_total = budget.grand_total,
        advisories = advisories.len(),
        "report assembled"
    );

    Ok(CalculationReport {
        meta,
        parameters: params.clone(),
        sizing,
        consumption,
        budget,
        schedule,
        advisories,
    })
}

/// Collect the advisories for a completed sizing
pub fn collect_advisories(params: &DesignParameters, sizing: &FacilitySizing) -> Vec<Advisory> {
    let mut out = Vec::new();

    if params.dlc_enclosures > params.enclosure_count {
        out.push(Advisory::InputOutOfRange {
            field: "dlc_enclosures".to_string(),
            value: f64::from(params.dlc_enclosures),
            expected: format!("0..={} (enclosure_count)", params.enclosure_count),
        });
    }
    if !(0.0..=1.0).contains(&params.dlc_capture_efficiency) {
        out.push(Advisory::InputOutOfRange {
            field: "dlc_capture_efficiency".to_string(),
            value: params.dlc_capture_efficiency,
            expected: "0..=1".to_string(),
        });
    }

    let elec = &sizing.electrical;
    for (equipment, selection) in [
        ("Transformer (kVA)", elec.transformer),
        ("Busway (A)", elec.busway),
        ("Rack breaker (A)", elec.rack_breaker),
    ] {
        if let RatingSelection::Overflow { required, fallback } = selection {
            out.push(Advisory::CapacityOverflow {
                equipment: equipment.to_string(),
                required,
                reported: fallback,
            });
        }
    }

    let mut loops = vec![
        ("HVAC primary loop", sizing.hvac.primary),
        ("HVAC secondary loop", sizing.hvac.secondary),
    ];
    // Without DLC enclosures the DLC loops are expected to be empty
    if params.dlc_enclosures > 0 {
        loops.push(("DLC primary loop", sizing.dlc.primary));
        loops.push(("DLC secondary loop", sizing.dlc.secondary));
    }
    for (loop_name, result) in loops {
        if let LoopSizing::Degenerate(reason) = result {
            out.push(Advisory::DegenerateLoop {
                loop_name: loop_name.to_string(),
                reason,
            });
        }
    }

    if sizing.density.is_none() {
        out.push(Advisory::MissingDensityKpis);
    }
    out
}
