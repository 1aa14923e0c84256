//! # calc_core - Data-Center Facility Sizing Engine
//!
//! `calc_core` is the computational heart of Datahall. From one snapshot of
//! design parameters it derives the facility demand, the MV/LV electrical
//! chain, the air and liquid cooling plants with their hydraulic loops,
//! density and efficiency KPIs, and an itemised capital budget. All inputs
//! and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from an immutable parameter snapshot
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Injectable catalogs**: Prices, ratings and pipe sizes are data
//! - **Tagged results**: Overflow and degenerate outcomes are variants, not sentinels
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::catalog::Catalog;
//! use calc_core::parameters::DesignParameters;
//! use calc_core::report::{self, ReportMetadata};
//!
//! let params = DesignParameters {
//!     enclosure_count: 6,
//!     ..DesignParameters::default()
//! };
//! let report = report::run(&params, Catalog::builtin(), ReportMetadata::new("J. Doe", "26-001", "Client")).unwrap();
//!
//! println!("Transformer: {} kVA", report.sizing.electrical.rated_capacity_kva());
//! println!("CAPEX: {:.0}", report.budget.grand_total);
//! ```
//!
//! ## Modules
//!
//! - [`parameters`] - Design parameter snapshot
//! - [`calculations`] - Load, cooling, electrical, HVAC, DLC and KPI sizers
//! - [`budget`] - Priced line items and grand total
//! - [`schedule`] - Equipment schedule rows
//! - [`report`] - Full run with metadata and advisories
//! - [`catalog`] - Reference prices, ratings and pipe sizes
//! - [`redundancy`] - Redundancy tiers and factors
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod budget;
pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod parameters;
pub mod redundancy;
pub mod report;
pub mod schedule;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use budget::{Budget, BudgetCategory, BudgetLineItem};
pub use calculations::FacilitySizing;
pub use catalog::Catalog;
pub use errors::{CalcError, CalcResult};
pub use parameters::DesignParameters;
pub use redundancy::RedundancyTier;
pub use report::{Advisory, CalculationReport, ReportMetadata};
