//! # Unit Types
//!
//! Type-safe wrappers for the quantities the sizing engine converts between.
//! These stay lightweight (just f64 wrappers) and serialize as bare numbers.
//!
//! ## SI Units
//!
//! - Power: watts (W), kilowatts (kW), apparent power in kilovolt-amperes (kVA)
//! - Current: amperes (A)
//! - Flow: cubic metres per second (m³/s) and per hour (m³/h)
//! - Geometry: metres (m), square metres (m²)
//!
//! Result records keep raw `f64` fields with a unit suffix (`it_w`,
//! `flow_m3h`); the wrappers are used where a conversion happens.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Kilowatts, Watts};
//!
//! let it_load = Watts(240_000.0);
//! let it_kw: Kilowatts = it_load.into();
//! assert_eq!(it_kw.0, 240.0);
//!
//! let apparent = it_kw.to_apparent(0.9);
//! assert!((apparent.0 - 266.67).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Power Units
// ============================================================================

/// Active power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Active power (or thermal load) in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

/// Apparent power in kilovolt-amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloVoltAmperes(pub f64);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

impl Kilowatts {
    /// Apparent power drawn at the given power factor
    pub fn to_apparent(self, power_factor: f64) -> KiloVoltAmperes {
        KiloVoltAmperes(self.0 / power_factor)
    }
}

impl KiloVoltAmperes {
    /// Line current of a balanced three-phase load: I = S / (√3 · V_LL)
    pub fn three_phase_current(self, line_voltage_v: f64) -> Amperes {
        Amperes(self.0 * 1000.0 / (line_voltage_v * 3f64.sqrt()))
    }
}

// ============================================================================
// Current
// ============================================================================

/// Electric current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amperes(pub f64);

// ============================================================================
// Flow Units
// ============================================================================

/// Volumetric flow in cubic metres per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

/// Volumetric flow in cubic metres per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerHour(pub f64);

impl From<CubicMetersPerSecond> for CubicMetersPerHour {
    fn from(q: CubicMetersPerSecond) -> Self {
        CubicMetersPerHour(q.0 * 3600.0)
    }
}

impl From<CubicMetersPerHour> for CubicMetersPerSecond {
    fn from(q: CubicMetersPerHour) -> Self {
        CubicMetersPerSecond(q.0 / 3600.0)
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl SquareMeters {
    /// Side of a square floor plate with this area
    pub fn side(self) -> Meters {
        Meters(self.0.sqrt())
    }
}

/// Internal bore area of a pipe with the given nominal diameter in millimetres
pub fn pipe_bore_area(diameter_mm: f64) -> SquareMeters {
    let d_m = diameter_mm / 1000.0;
    SquareMeters(std::f64::consts::PI * d_m * d_m / 4.0)
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(KiloVoltAmperes);
impl_arithmetic!(Amperes);
impl_arithmetic!(CubicMetersPerSecond);
impl_arithmetic!(CubicMetersPerHour);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
