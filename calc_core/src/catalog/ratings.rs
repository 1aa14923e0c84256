//! Standard Equipment Ratings
//!
//! Nominal rating lists the sizers snap to: transformer kVA, rack breaker
//! amperes, busway amperes and nominal pipe diameters.

use serde::{Deserialize, Serialize};

/// Standard rating lists for electrical equipment.
///
/// Lists are expected in ascending order; selection picks the smallest
/// entry that covers the requirement regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingTables {
    /// Transformer nominal ratings (kVA)
    pub transformer_kva: Vec<f64>,
    /// Rack circuit breaker ratings (A)
    pub rack_breaker_a: Vec<f64>,
    /// Busway ratings (A)
    pub busway_a: Vec<f64>,
}

impl Default for RatingTables {
    fn default() -> Self {
        RatingTables {
            transformer_kva: vec![630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0],
            rack_breaker_a: vec![16.0, 32.0, 63.0, 125.0],
            busway_a: vec![250.0, 400.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2500.0, 4000.0],
        }
    }
}

/// Pipe material for a hydraulic loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PipeMaterial {
    /// Copper or PPR, small bore
    CopperPpr,
    /// Carbon steel
    CarbonSteel,
    /// No pipe sized (degenerate loop)
    #[default]
    #[serde(rename = "-")]
    Unsized,
}

impl PipeMaterial {
    pub fn display_name(&self) -> &'static str {
        match self {
            PipeMaterial::CopperPpr => "Copper/PPR",
            PipeMaterial::CarbonSteel => "Carbon steel",
            PipeMaterial::Unsized => "-",
        }
    }
}

impl std::fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Nominal pipe size available to the hydraulic sizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSize {
    /// Nominal diameter DN (mm)
    pub diameter_mm: f64,
    pub material: PipeMaterial,
}

impl PipeSize {
    pub const fn new(diameter_mm: f64, material: PipeMaterial) -> Self {
        PipeSize { diameter_mm, material }
    }
}

/// Default nominal diameter series, DN50 to DN300
pub fn default_pipe_sizes() -> Vec<PipeSize> {
    vec![
        PipeSize::new(50.0, PipeMaterial::CopperPpr),
        PipeSize::new(65.0, PipeMaterial::CarbonSteel),
        PipeSize::new(80.0, PipeMaterial::CarbonSteel),
        PipeSize::new(100.0, PipeMaterial::CarbonSteel),
        PipeSize::new(125.0, PipeMaterial::CarbonSteel),
        PipeSize::new(150.0, PipeMaterial::CarbonSteel),
        PipeSize::new(200.0, PipeMaterial::CarbonSteel),
        PipeSize::new(250.0, PipeMaterial::CarbonSteel),
        PipeSize::new(300.0, PipeMaterial::CarbonSteel),
    ]
}
