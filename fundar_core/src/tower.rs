//! # Tower Site Data
//!
//! Per-tower geometry the optimizer needs: stub dimensions for pedestal
//! sizing and clearance, plus site-specific overrides (minimum depth,
//! non-standard pedestal heights).

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::units::ceil_to_decimeter;

/// One transmission-tower site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    /// Tower designation (e.g. "T-104")
    pub name: String,

    /// Side of the square stub cross-section (m)
    pub stub_side_m: f64,

    /// Length of the stub below the pedestal top (m)
    pub stub_depth_m: f64,

    /// Stub rake from vertical (degrees); the pedestal is cast at the same tilt
    #[serde(default)]
    pub stub_tilt_deg: f64,

    /// Site-specific minimum footing depth (m), when the route survey
    /// dictates one
    pub min_depth_m: Option<f64>,

    /// Non-standard pedestal heights required at this site (m), merged with
    /// the configured standard list
    pub extra_pedestal_heights_m: Vec<f64>,
}

impl Tower {
    /// Create a tower with no site overrides.
    pub fn new(name: impl Into<String>, stub_side_m: f64, stub_depth_m: f64) -> Self {
        Tower {
            name: name.into(),
            stub_side_m,
            stub_depth_m,
            stub_tilt_deg: 0.0,
            min_depth_m: None,
            extra_pedestal_heights_m: Vec::new(),
        }
    }

    /// Set the stub rake angle (builder pattern)
    pub fn with_stub_tilt(mut self, stub_tilt_deg: f64) -> Self {
        self.stub_tilt_deg = stub_tilt_deg;
        self
    }

    /// Set the site minimum depth (builder pattern)
    pub fn with_min_depth(mut self, min_depth_m: f64) -> Self {
        self.min_depth_m = Some(min_depth_m);
        self
    }

    /// Add a non-standard pedestal height (builder pattern)
    pub fn with_extra_pedestal_height(mut self, height_m: f64) -> Self {
        self.extra_pedestal_heights_m.push(height_m);
        self
    }

    /// Validate the tower record.
    pub fn validate(&self) -> DesignResult<()> {
        if self.stub_side_m <= 0.0 {
            return Err(DesignError::invalid_input(
                "stub_side_m",
                self.stub_side_m.to_string(),
                "Stub side must be positive",
            ));
        }
        if self.stub_depth_m <= 0.0 {
            return Err(DesignError::invalid_input(
                "stub_depth_m",
                self.stub_depth_m.to_string(),
                "Stub depth must be positive",
            ));
        }
        for h in &self.extra_pedestal_heights_m {
            if *h < 0.0 {
                return Err(DesignError::invalid_input(
                    "extra_pedestal_heights_m",
                    h.to_string(),
                    "Pedestal heights cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Minimum pedestal-crossbeam side TP (m): the stub diagonal plus
    /// reinforcement cover on both faces, rounded up to the decimeter grid.
    pub fn pedestal_side_m(&self, rebar_cover_m: f64) -> f64 {
        ceil_to_decimeter(self.stub_side_m * std::f64::consts::SQRT_2 + 2.0 * rebar_cover_m)
    }
}
