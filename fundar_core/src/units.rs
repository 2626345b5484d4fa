//! # Unit Types
//!
//! Type-safe wrappers for the SI units used throughout the engine, plus the
//! decimeter-grid helpers the search optimizer depends on.
//!
//! ## Design Philosophy
//!
//! Simple newtype wrappers rather than a full units library:
//! - Foundation design uses a small, consistent set of SI units
//! - JSON serialization stays clean (just numbers)
//! - Minimal runtime overhead
//!
//! Calculation modules follow the convention of unit-suffixed `f64` fields
//! (`width_m`, `load_kn`, `pressure_kpa`); the wrappers are for API
//! boundaries where the extra type safety pays for itself.
//!
//! ## Units
//!
//! - Length: meters (m)
//! - Force: kilonewtons (kN)
//! - Pressure/stress: kilopascals (kPa = kN/m²)
//! - Unit weight: kilonewtons per cubic meter (kN/m³)
//! - Volume: cubic meters (m³)

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Unit weight of water (kN/m³), used for every buoyancy correction.
pub const GAMMA_WATER: f64 = 9.81;

/// Tolerance for decimeter-grid comparisons.
const GRID_EPS: f64 = 1e-9;

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

/// Pressure in kilopascals (kN/m²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

/// Unit weight in kilonewtons per cubic meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnPerM3(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

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

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(Kilopascals);
impl_arithmetic!(KnPerM3);
impl_arithmetic!(CubicMeters);

/// Round a dimension up to the decimeter grid: `ceil(x·10)/10`.
///
/// Values already on the grid are returned unchanged (an epsilon guard keeps
/// float noise such as `3.1000000000000005` from being pushed to 3.2).
pub fn ceil_to_decimeter(x: f64) -> f64 {
    let scaled = x * 10.0;
    let snapped = if (scaled - scaled.round()).abs() <= GRID_EPS * 10.0 {
        scaled.round()
    } else {
        scaled.ceil()
    };
    snapped / 10.0
}

/// Ascending arithmetic series from `start` by `step`.
///
/// Includes `end` when `step` evenly divides the range; otherwise the series
/// stops strictly before overshooting. An empty series is returned when
/// `end < start`.
pub fn decimeter_series(start: f64, end: f64, step: f64) -> Vec<f64> {
    let mut values = Vec::new();
    if step <= 0.0 {
        return values;
    }
    let mut i = 0usize;
    loop {
        let v = start + step * i as f64;
        if v > end + GRID_EPS {
            break;
        }
        // Re-anchor on the grid so accumulated float error cannot leak into
        // candidate geometry.
        values.push((v * 1e6).round() / 1e6);
        i += 1;
    }
    values
}
