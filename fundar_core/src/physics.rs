//! # Foundation Physics Interface
//!
//! The geotechnical equations (bearing capacity, stress distribution,
//! settlement, overturning, sliding, uplift) live behind the
//! [`FoundationPhysics`] trait. The evaluator and optimizer consume this
//! interface only; implementations plug in the equation set of choice.
//!
//! Every operation returns its numeric result together with an opaque
//! [`Trace`] map that is forwarded unmodified into report output.
//!
//! ## Example
//!
//! ```rust
//! use fundar_core::physics::FootingGeometry;
//!
//! let footing = FootingGeometry {
//!     width_m: 3.8,
//!     length_m: 3.8,
//!     depth_m: 4.0,
//!     thickness_m: 0.4,
//!     embedment_m: 4.6,
//!     pedestal_side_m: 0.8,
//!     pedestal_tilt_deg: 6.807,
//!     unit_weight_concrete_kn_m3: 14.19,
//!     base_tilt_deg: 0.0,
//!     terrain_tilt_deg: 0.0,
//! };
//! assert!(footing.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::soil::Profile;

/// Opaque per-operation calculation trace, forwarded into report output.
pub type Trace = serde_json::Map<String, serde_json::Value>;

/// Fully specified spread-footing geometry.
///
/// The concrete unit weight is the effective (possibly buoyant) value the
/// caller wants the physics to use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootingGeometry {
    /// Footing width B (m)
    pub width_m: f64,

    /// Footing length L (m); square footings use L = B
    pub length_m: f64,

    /// Depth of the footing base below grade D (m)
    pub depth_m: f64,

    /// Footing slab thickness H (m)
    pub thickness_m: f64,

    /// Embedment C = D + HG - H, footing top to pedestal top (m)
    pub embedment_m: f64,

    /// Pedestal-crossbeam side TP (m)
    pub pedestal_side_m: f64,

    /// Pedestal tilt from vertical θ (degrees), matching the stub rake
    pub pedestal_tilt_deg: f64,

    /// Effective unit weight of the concrete (kN/m³)
    pub unit_weight_concrete_kn_m3: f64,

    /// Base inclination (degrees)
    pub base_tilt_deg: f64,

    /// Terrain inclination at the site (degrees)
    pub terrain_tilt_deg: f64,
}

impl FootingGeometry {
    /// Validate the geometry.
    pub fn validate(&self) -> DesignResult<()> {
        for (field, value) in [
            ("width_m", self.width_m),
            ("length_m", self.length_m),
            ("depth_m", self.depth_m),
            ("thickness_m", self.thickness_m),
            ("pedestal_side_m", self.pedestal_side_m),
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
        if self.thickness_m > self.depth_m {
            return Err(DesignError::invalid_input(
                "thickness_m",
                self.thickness_m.to_string(),
                "Slab thickness cannot exceed the footing depth",
            ));
        }
        if self.embedment_m < 0.0 {
            return Err(DesignError::invalid_input(
                "embedment_m",
                self.embedment_m.to_string(),
                "Embedment cannot be negative",
            ));
        }
        Ok(())
    }

    /// Pedestal height above grade HG = C + H - D (m)
    pub fn pedestal_height_m(&self) -> f64 {
        self.embedment_m + self.thickness_m - self.depth_m
    }
}

/// Ultimate net bearing pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingCapacityOutput {
    /// Ultimate net pressure q_ult (kPa)
    pub q_ult_net_kpa: f64,
    /// Calculation trace
    pub trace: Trace,
}

/// Extreme base pressures under an eccentric load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilStressOutput {
    /// Maximum base pressure Q_max (kPa)
    pub q_max_kpa: f64,
    /// Minimum base pressure Q_min (kPa); negative means base lift-off
    pub q_min_kpa: f64,
    /// Calculation trace
    pub trace: Trace,
}

/// Immediate and long-term settlement components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementOutput {
    /// Immediate (elastic) settlement (m)
    pub elastic_m: f64,
    /// Consolidation settlement including creep (m)
    pub consolidation_m: f64,
    /// Elastic calculation trace
    pub trace_elastic: Trace,
    /// Consolidation calculation trace
    pub trace_consolidation: Trace,
}

/// Driving vs resisting overturning moments about the base edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverturningOutput {
    /// Destabilizing moment (kN·m)
    pub driving_kn_m: f64,
    /// Resisting moment (kN·m)
    pub resisting_kn_m: f64,
    /// Calculation trace
    pub trace: Trace,
}

/// Lateral (sliding) capacity at the base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlidingOutput {
    /// Lateral capacity Q_L (kN)
    pub lateral_kn: f64,
    /// Calculation trace
    pub trace: Trace,
}

/// Uplift (tension) capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionOutput {
    /// Ultimate uplift capacity T_u (kN)
    pub ultimate_kn: f64,
    /// Calculation trace
    pub trace: Trace,
}

/// The external physics oracle for one (footing, profile) pair.
///
/// One instance is constructed per evaluation; implementations may cache
/// whatever intermediate quantities they like.
pub trait FoundationPhysics {
    /// Ultimate net bearing pressure under inclined loading.
    fn bearing_capacity(
        &self,
        horizontal_kn: f64,
        vertical_kn: f64,
    ) -> DesignResult<BearingCapacityOutput>;

    /// Extreme base pressures for a force triple (longitudinal, transversal,
    /// vertical).
    fn soil_stress(&self, fx_kn: f64, fy_kn: f64, fz_kn: f64) -> DesignResult<SoilStressOutput>;

    /// Immediate plus consolidation settlement.
    ///
    /// `segments` is the stratum subdivision count for the stress integration;
    /// `creep_years` the secondary-compression horizon.
    fn settlement(
        &self,
        segments: u32,
        f_working_kn: f64,
        f_sustained_kn: f64,
        creep_years: f64,
    ) -> DesignResult<SettlementOutput>;

    /// Driving vs resisting overturning moments. `t_uplift_kn` is the uplift
    /// capacity credited to the resisting side.
    fn overturning(
        &self,
        fz_kn: f64,
        f_horizontal_kn: f64,
        t_uplift_kn: f64,
    ) -> DesignResult<OverturningOutput>;

    /// Lateral capacity against the resultant horizontal load.
    fn sliding(&self, fz_kn: f64, f_horizontal_kn: f64) -> DesignResult<SlidingOutput>;

    /// Ultimate uplift capacity given the admissible bearing pressure.
    fn tension(&self, q_admissible_kpa: f64) -> DesignResult<TensionOutput>;

    /// Concrete volume of footing plus pedestal (m³)
    fn volume_m3(&self) -> f64;

    /// Volume of backfill above the footing (m³)
    fn backfill_volume_m3(&self) -> f64;
}

/// Constructs a physics oracle per candidate evaluation.
pub trait PhysicsFactory {
    /// Build an oracle for a footing resting in `profile`.
    fn build(
        &self,
        footing: &FootingGeometry,
        profile: &Profile,
    ) -> DesignResult<Box<dyn FoundationPhysics>>;
}
