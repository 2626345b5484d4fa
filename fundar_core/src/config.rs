//! # Search Configuration
//!
//! One explicit, typed configuration struct for the whole design search:
//! geometry ranges and steps, safety factors, settlement limits, rock
//! penetration rules and the candidate retention policy. Every field has a
//! compile-time-checked default.
//!
//! ## Example
//!
//! ```rust
//! use fundar_core::config::{RetentionPolicy, SearchConfig};
//!
//! let config = SearchConfig {
//!     b_min_m: 2.0,
//!     b_max_m: 4.5,
//!     retention: RetentionPolicy::TopN(5),
//!     ..SearchConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Standard pedestal heights evaluated for every footing (m).
///
/// Tower-specific non-standard heights are merged on top of this list.
pub static STANDARD_PEDESTAL_HEIGHTS_M: Lazy<Vec<f64>> =
    Lazy::new(|| vec![0.3, 0.6, 1.0, 1.5, 2.0]);

/// How evaluated candidates are retained in the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetentionPolicy {
    /// At most one candidate per distinct depth; a newcomer replaces an
    /// existing same-depth candidate only when strictly better
    #[default]
    BestPerDepth,
    /// Keep the N best candidates overall; a full set only accepts a
    /// newcomer that beats the current worst
    TopN(usize),
}

/// Full configuration of the foundation design search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum footing width B (m)
    pub b_min_m: f64,

    /// Maximum footing width B (m); the search may continue past it while no
    /// compliant candidate exists (see `b_extra_m`)
    pub b_max_m: f64,

    /// Absolute fallback width ceiling (m); None disables the extension
    pub b_extra_m: Option<f64>,

    /// Width step (m)
    pub b_step_m: f64,

    /// Minimum footing depth D (m); raised to a tower's site minimum when one
    /// is configured
    pub d_min_m: f64,

    /// Maximum footing depth D (m)
    pub d_max_m: f64,

    /// Depth step (m)
    pub d_step_m: f64,

    /// Footing slab thickness H (m)
    pub thickness_m: f64,

    /// Take `thickness_m` verbatim instead of max(thickness, TP/2)
    pub use_configured_thickness: bool,

    /// Pedestal-crossbeam side TP (m); None computes it from the stub geometry
    pub pedestal_side_m: Option<f64>,

    /// Reinforcement cover used when computing TP from the stub (m)
    pub rebar_cover_m: f64,

    /// Pedestal heights HG evaluated per footing (m)
    pub pedestal_heights_m: Vec<f64>,

    /// Unit weight of the foundation concrete (kN/m³); buoyancy-corrected
    /// below the water level
    pub unit_weight_concrete_kn_m3: f64,

    /// Base inclination (degrees)
    pub base_tilt_deg: f64,

    /// Terrain inclination at the site (degrees)
    pub terrain_tilt_deg: f64,

    /// Required factor of safety against bearing failure (FSC)
    pub fsc: f64,

    /// Required uplift factor of safety over granular columns (FST)
    pub fst_granular: f64,

    /// Required uplift factor of safety over cohesive columns (FST)
    pub fst_cohesive: f64,

    /// Required overturning factor of safety (FSV)
    pub fsv: f64,

    /// Required sliding factor of safety (FSL)
    pub fsl: f64,

    /// Stratum subdivision count for the settlement stress integration
    pub settlement_segments: u32,

    /// Secondary-compression horizon for consolidation settlement (years)
    pub creep_years: f64,

    /// Admissible settlement over granular columns (m)
    pub s_max_granular_m: f64,

    /// Admissible settlement over cohesive columns (m)
    pub s_max_cohesive_m: f64,

    /// Minimum controlled penetration when a footing enters rock (m)
    pub rock_min_penetration_m: f64,

    /// Maximum allowed penetration into rock (m)
    pub rock_max_penetration_m: f64,

    /// Band below the rock contact within which a base is pulled to the
    /// minimum penetration (m)
    pub rock_attraction_m: f64,

    /// Minimum concrete cover below the stub tip (m)
    pub stub_cover_min_m: f64,

    /// Candidate retention policy
    pub retention: RetentionPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            b_min_m: 1.5,
            b_max_m: 4.0,
            b_extra_m: None,
            b_step_m: 0.1,
            d_min_m: 1.5,
            d_max_m: 4.0,
            d_step_m: 0.1,
            thickness_m: 0.4,
            use_configured_thickness: false,
            pedestal_side_m: None,
            rebar_cover_m: 0.05,
            pedestal_heights_m: STANDARD_PEDESTAL_HEIGHTS_M.clone(),
            unit_weight_concrete_kn_m3: 24.0,
            base_tilt_deg: 0.0,
            terrain_tilt_deg: 0.0,
            fsc: 3.0,
            fst_granular: 1.5,
            fst_cohesive: 2.0,
            fsv: 1.5,
            fsl: 1.5,
            settlement_segments: 80,
            creep_years: 20.0,
            s_max_granular_m: 0.05,
            s_max_cohesive_m: 0.10,
            rock_min_penetration_m: 0.2,
            rock_max_penetration_m: 1.0,
            rock_attraction_m: 0.5,
            stub_cover_min_m: 0.15,
            retention: RetentionPolicy::BestPerDepth,
        }
    }
}

impl SearchConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> DesignResult<()> {
        for (field, value) in [
            ("b_min_m", self.b_min_m),
            ("b_max_m", self.b_max_m),
            ("b_step_m", self.b_step_m),
            ("d_min_m", self.d_min_m),
            ("d_max_m", self.d_max_m),
            ("d_step_m", self.d_step_m),
            ("thickness_m", self.thickness_m),
            ("unit_weight_concrete_kn_m3", self.unit_weight_concrete_kn_m3),
        ] {
            if value <= 0.0 {
                return Err(DesignError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        for (field, value) in [
            ("fsc", self.fsc),
            ("fst_granular", self.fst_granular),
            ("fst_cohesive", self.fst_cohesive),
            ("fsv", self.fsv),
            ("fsl", self.fsl),
        ] {
            if value < 1.0 {
                return Err(DesignError::invalid_input(
                    field,
                    value.to_string(),
                    "Safety factors below 1.0 are not meaningful",
                ));
            }
        }
        if self.b_max_m < self.b_min_m {
            return Err(DesignError::invalid_input(
                "b_max_m",
                self.b_max_m.to_string(),
                "Maximum width below minimum width",
            ));
        }
        if let Some(extra) = self.b_extra_m {
            if extra < self.b_max_m {
                return Err(DesignError::invalid_input(
                    "b_extra_m",
                    extra.to_string(),
                    "Fallback ceiling must not be below b_max_m",
                ));
            }
        }
        if self.pedestal_heights_m.is_empty() {
            return Err(DesignError::invalid_input(
                "pedestal_heights_m",
                "[]",
                "At least one pedestal height is required",
            ));
        }
        if self.rock_min_penetration_m > self.rock_max_penetration_m {
            return Err(DesignError::invalid_input(
                "rock_min_penetration_m",
                self.rock_min_penetration_m.to_string(),
                "Minimum rock penetration exceeds the maximum",
            ));
        }
        if self.settlement_segments == 0 {
            return Err(DesignError::invalid_input(
                "settlement_segments",
                "0",
                "Settlement integration needs at least one segment",
            ));
        }
        if let RetentionPolicy::TopN(n) = self.retention {
            if n == 0 {
                return Err(DesignError::invalid_input(
                    "retention",
                    "TopN(0)",
                    "Top-N retention needs N >= 1",
                ));
            }
        }
        Ok(())
    }
}
