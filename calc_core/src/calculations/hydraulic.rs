//! # Hydraulic Network Sizer
//!
//! Sizes a chilled-water (or DLC coolant) loop for a thermal load and a loop
//! temperature differential. Shared by the HVAC and DLC sizers.
//!
//! ## Method
//!
//! 1. Mass flow ṁ = Q / (c_p · ΔT) with c_p = 4.18 kJ/(kg·K), ρ = 1000 kg/m³
//! 2. Starting with one circuit, split the flow evenly across circuits and
//!    pick the smallest nominal diameter whose velocity stays ≤ 2.5 m/s
//! 3. If no diameter passes, add a circuit and retry (at most 50 circuits)
//!
//! Adding circuits only lowers the per-circuit flow, so the search is
//! monotone and the first passing circuit count is the minimum.
//!
//! ## Pipe Run
//!
//! ```text
//! horizontal = √(floor_area) × 1.5
//! vertical   = floor_height × floor_count
//! length     = (horizontal + vertical) × 2 × circuit_count
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::hydraulic::{size_loop, PipeRunGeometry};
//! use calc_core::catalog::default_pipe_sizes;
//! use calc_core::units::Kilowatts;
//!
//! let geometry = PipeRunGeometry { floor_area_m2: 500.0, floor_height_m: 4.5, floor_count: 2 };
//! let sizing = size_loop(Kilowatts(500.0), 5.0, &geometry, &default_pipe_sizes());
//! let circuit = sizing.circuit();
//! assert_eq!(circuit.diameter_mm, 125.0);
//! assert_eq!(circuit.circuit_count, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{PipeMaterial, PipeSize};
use crate::parameters::DesignParameters;
use crate::units::{pipe_bore_area, CubicMetersPerHour, CubicMetersPerSecond, Kilowatts, Meters, SquareMeters};

/// Specific heat of water, kJ/(kg·K)
pub const WATER_CP_KJ_PER_KG_K: f64 = 4.18;
/// Density of water, kg/m³
pub const WATER_DENSITY_KG_PER_M3: f64 = 1000.0;
/// Velocity limit for a selected diameter (m/s)
pub const MAX_VELOCITY_MS: f64 = 2.5;
/// Circuit count at which the search gives up
pub const MAX_CIRCUITS: u32 = 50;
/// Loads at or below this are not sized (kW)
pub const MIN_SIZED_LOAD_KW: f64 = 0.1;

/// Horizontal run allowance relative to the floor plate side
const HORIZONTAL_RUN_FACTOR: f64 = 1.5;

/// Building geometry that sets the pipe run length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeRunGeometry {
    /// Gross area of one floor (m²)
    pub floor_area_m2: f64,
    /// Floor-to-floor height (m)
    pub floor_height_m: f64,
    pub floor_count: u32,
}

impl PipeRunGeometry {
    pub fn from_params(params: &DesignParameters) -> Self {
        PipeRunGeometry {
            floor_area_m2: params.floor_area_m2,
            floor_height_m: params.floor_height_m,
            floor_count: params.floor_count,
        }
    }

    /// Supply-and-return run for one circuit
    pub fn circuit_run(&self) -> Meters {
        let horizontal = SquareMeters(self.floor_area_m2).side() * HORIZONTAL_RUN_FACTOR;
        let vertical = Meters(self.floor_height_m * f64::from(self.floor_count));
        (horizontal + vertical) * 2.0
    }
}

/// A sized hydraulic loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydraulicCircuit {
    /// Total loop flow (m³/h)
    pub flow_m3h: f64,
    /// Nominal diameter of each circuit (mm)
    pub diameter_mm: f64,
    /// Velocity in each circuit (m/s)
    pub velocity_ms: f64,
    pub material: PipeMaterial,
    pub circuit_count: u32,
    /// Total pipe length across all circuits (m)
    pub length_m: f64,
}

impl HydraulicCircuit {
    /// The all-zero record reported for loops that were not sized
    pub fn null() -> Self {
        HydraulicCircuit {
            flow_m3h: 0.0,
            diameter_mm: 0.0,
            velocity_ms: 0.0,
            material: PipeMaterial::Unsized,
            circuit_count: 0,
            length_m: 0.0,
        }
    }
}

/// Why a loop was not sized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DegenerateReason {
    /// Thermal load ≤ 0.1 kW
    NegligibleLoad { load_kw: f64 },
    /// ΔT ≤ 0 gives no finite flow
    NonPositiveDeltaT { delta_t_c: f64 },
    /// More than 50 circuits would be needed
    CircuitLimitExceeded { flow_m3h: f64 },
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateReason::NegligibleLoad { load_kw } => {
                write!(f, "load of {:.3} kW is too small to size", load_kw)
            }
            DegenerateReason::NonPositiveDeltaT { delta_t_c } => {
                write!(f, "temperature differential {} °C is not positive", delta_t_c)
            }
            DegenerateReason::CircuitLimitExceeded { flow_m3h } => write!(
                f,
                "{:.1} m³/h needs more than {} circuits of the largest pipe",
                flow_m3h, MAX_CIRCUITS
            ),
        }
    }
}

/// Outcome of sizing one loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum LoopSizing {
    Sized(HydraulicCircuit),
    Degenerate(DegenerateReason),
}

impl LoopSizing {
    /// The sized circuit, or the null record
    pub fn circuit(&self) -> HydraulicCircuit {
        match self {
            LoopSizing::Sized(circuit) => *circuit,
            LoopSizing::Degenerate(_) => HydraulicCircuit::null(),
        }
    }

    /// Total pipe length, zero when not sized
    pub fn length_m(&self) -> f64 {
        self.circuit().length_m
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, LoopSizing::Degenerate(_))
    }

    pub fn degenerate_reason(&self) -> Option<DegenerateReason> {
        match self {
            LoopSizing::Sized(_) => None,
            LoopSizing::Degenerate(reason) => Some(*reason),
        }
    }
}

/// Volumetric flow carrying `load` at `delta_t_c` (m³/s)
pub fn volumetric_flow(load: Kilowatts, delta_t_c: f64) -> CubicMetersPerSecond {
    let mass_flow_kg_s = load.0 / (WATER_CP_KJ_PER_KG_K * delta_t_c);
    CubicMetersPerSecond(mass_flow_kg_s / WATER_DENSITY_KG_PER_M3)
}

/// Size a hydraulic loop.
///
/// # Arguments
///
/// * `load` - Thermal load carried by the loop
/// * `delta_t_c` - Supply/return temperature differential (°C)
/// * `geometry` - Building geometry for the run length
/// * `pipes` - Available nominal sizes
pub fn size_loop(load: Kilowatts, delta_t_c: f64, geometry: &PipeRunGeometry, pipes: &[PipeSize]) -> LoopSizing {
    if load.0 <= MIN_SIZED_LOAD_KW {
        return LoopSizing::Degenerate(DegenerateReason::NegligibleLoad { load_kw: load.0 });
    }
    if delta_t_c <= 0.0 {
        return LoopSizing::Degenerate(DegenerateReason::NonPositiveDeltaT { delta_t_c });
    }

    let flow = volumetric_flow(load, delta_t_c);
    let flow_m3h = CubicMetersPerHour::from(flow).0;
    let circuit_run = geometry.circuit_run();

    for circuit_count in 1..=MAX_CIRCUITS {
        let per_circuit = flow / f64::from(circuit_count);
        let selection = pipes
            .iter()
            .map(|pipe| (pipe, per_circuit.0 / pipe_bore_area(pipe.diameter_mm).0))
            .filter(|(_, velocity)| *velocity <= MAX_VELOCITY_MS)
            .min_by(|(a, _), (b, _)| a.diameter_mm.total_cmp(&b.diameter_mm));

        if let Some((pipe, velocity_ms)) = selection {
            tracing::debug!(
                load_kw = load.0,
                delta_t_c,
                flow_m3h,
                diameter_mm = pipe.diameter_mm,
                circuit_count,
                "hydraulic loop sized"
            );
            return LoopSizing::Sized(HydraulicCircuit {
                flow_m3h,
                diameter_mm: pipe.diameter_mm,
                velocity_ms,
                material: pipe.material,
                circuit_count,
                length_m: (circuit_run * f64::from(circuit_count)).0,
            });
        }
        tracing::trace!(circuit_count, "no pipe size within velocity limit, adding a circuit");
    }

    tracing::warn!(load_kw = load.0, flow_m3h, "hydraulic loop exceeds circuit limit");
    LoopSizing::Degenerate(DegenerateReason::CircuitLimitExceeded { flow_m3h })
}
