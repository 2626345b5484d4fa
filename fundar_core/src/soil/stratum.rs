//! # Stratum
//!
//! One horizontal soil or rock layer with uniform physical properties, as
//! reported by the site investigation. Depth placement (`top_m`/`bottom_m`)
//! belongs to the owning [`Profile`](crate::soil::Profile) and is recomputed
//! whenever a stratum is inserted into one.
//!
//! ## Example
//!
//! ```rust
//! use fundar_core::soil::Stratum;
//!
//! // 3 m of soft clay, saturated below the water table
//! let clay = Stratum::cohesive(3.0, 17.5, 4_500.0, 35.0, 110.0)
//!     .with_saturation(true);
//! assert!(clay.validate().is_ok());
//! assert!(clay.effective_unit_weight_kn_m3() < 17.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::units::GAMMA_WATER;

/// Soil/rock material classification.
///
/// The enumeration order (cohesive, granular, rock) is normative: ties in
/// predominance queries resolve to the earliest variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialClass {
    /// Fine-grained soils whose short-term strength is undrained cohesion
    Cohesive,
    /// Coarse-grained soils whose strength is frictional
    Granular,
    /// Rock mass
    Rock,
}

impl MaterialClass {
    /// All classes, in tie-break order
    pub const ALL: [MaterialClass; 3] = [
        MaterialClass::Cohesive,
        MaterialClass::Granular,
        MaterialClass::Rock,
    ];

    /// Short lowercase code
    pub fn code(&self) -> &'static str {
        match self {
            MaterialClass::Cohesive => "cohesive",
            MaterialClass::Granular => "granular",
            MaterialClass::Rock => "rock",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialClass::Cohesive => "Cohesive soil",
            MaterialClass::Granular => "Granular soil",
            MaterialClass::Rock => "Rock",
        }
    }
}

impl std::fmt::Display for MaterialClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One horizontal layer of the soil column.
///
/// Strength and consolidation parameters are class-specific: cohesive strata
/// carry undrained cohesion and a preconsolidation stress, granular strata
/// carry a friction angle and no consolidation parameters, rock strata carry
/// RQD and unconfined compressive strength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stratum {
    /// Layer thickness (m)
    pub thickness_m: f64,

    /// Material classification
    pub material: MaterialClass,

    /// Dry unit weight (kN/m³)
    pub unit_weight_dry_kn_m3: f64,

    /// Total (moist/saturated) unit weight (kN/m³)
    pub unit_weight_total_kn_m3: f64,

    /// Young's modulus (kPa)
    pub young_modulus_kpa: f64,

    /// Undrained cohesion c_u (kPa); cohesive strata only
    pub undrained_cohesion_kpa: Option<f64>,

    /// Effective friction angle φ' (degrees)
    pub friction_angle_deg: Option<f64>,

    /// Below the water table (field measurement or flood-risk override)
    pub saturated: bool,

    /// Compression index C_c; cohesive strata only
    pub compression_index: Option<f64>,

    /// Initial void ratio e_0; cohesive strata only
    pub void_ratio: Option<f64>,

    /// Preconsolidation stress σ'_p (kPa); cohesive strata only
    pub preconsolidation_kpa: Option<f64>,

    /// Rock quality designation (%); rock strata only
    pub rqd_percent: Option<f64>,

    /// Unconfined compressive strength (kPa); rock strata only
    pub ucs_kpa: Option<f64>,

    /// Depth of the layer top (m), assigned by the owning profile
    #[serde(default)]
    pub top_m: f64,

    /// Depth of the layer bottom (m), assigned by the owning profile
    #[serde(default)]
    pub bottom_m: f64,
}

impl Stratum {
    /// Create a cohesive stratum.
    ///
    /// Dry unit weight defaults to the total value; refine with
    /// [`with_dry_unit_weight`](Self::with_dry_unit_weight).
    pub fn cohesive(
        thickness_m: f64,
        unit_weight_total_kn_m3: f64,
        young_modulus_kpa: f64,
        undrained_cohesion_kpa: f64,
        preconsolidation_kpa: f64,
    ) -> Self {
        Stratum {
            thickness_m,
            material: MaterialClass::Cohesive,
            unit_weight_dry_kn_m3: unit_weight_total_kn_m3,
            unit_weight_total_kn_m3,
            young_modulus_kpa,
            undrained_cohesion_kpa: Some(undrained_cohesion_kpa),
            friction_angle_deg: None,
            saturated: false,
            compression_index: None,
            void_ratio: None,
            preconsolidation_kpa: Some(preconsolidation_kpa),
            rqd_percent: None,
            ucs_kpa: None,
            top_m: 0.0,
            bottom_m: 0.0,
        }
    }

    /// Create a granular stratum.
    pub fn granular(
        thickness_m: f64,
        unit_weight_total_kn_m3: f64,
        young_modulus_kpa: f64,
        friction_angle_deg: f64,
    ) -> Self {
        Stratum {
            thickness_m,
            material: MaterialClass::Granular,
            unit_weight_dry_kn_m3: unit_weight_total_kn_m3,
            unit_weight_total_kn_m3,
            young_modulus_kpa,
            undrained_cohesion_kpa: None,
            friction_angle_deg: Some(friction_angle_deg),
            saturated: false,
            compression_index: None,
            void_ratio: None,
            preconsolidation_kpa: None,
            rqd_percent: None,
            ucs_kpa: None,
            top_m: 0.0,
            bottom_m: 0.0,
        }
    }

    /// Create a rock stratum.
    pub fn rock(
        thickness_m: f64,
        unit_weight_total_kn_m3: f64,
        young_modulus_kpa: f64,
        rqd_percent: f64,
        ucs_kpa: f64,
    ) -> Self {
        Stratum {
            thickness_m,
            material: MaterialClass::Rock,
            unit_weight_dry_kn_m3: unit_weight_total_kn_m3,
            unit_weight_total_kn_m3,
            young_modulus_kpa,
            undrained_cohesion_kpa: None,
            friction_angle_deg: None,
            saturated: false,
            compression_index: None,
            void_ratio: None,
            preconsolidation_kpa: None,
            rqd_percent: Some(rqd_percent),
            ucs_kpa: Some(ucs_kpa),
            top_m: 0.0,
            bottom_m: 0.0,
        }
    }

    /// Set the dry unit weight (builder pattern)
    pub fn with_dry_unit_weight(mut self, unit_weight_dry_kn_m3: f64) -> Self {
        self.unit_weight_dry_kn_m3 = unit_weight_dry_kn_m3;
        self
    }

    /// Set the saturation flag (builder pattern)
    pub fn with_saturation(mut self, saturated: bool) -> Self {
        self.saturated = saturated;
        self
    }

    /// Set the friction angle (builder pattern)
    pub fn with_friction_angle(mut self, friction_angle_deg: f64) -> Self {
        self.friction_angle_deg = Some(friction_angle_deg);
        self
    }

    /// Set the consolidation parameters C_c and e_0 (builder pattern)
    pub fn with_consolidation(mut self, compression_index: f64, void_ratio: f64) -> Self {
        self.compression_index = Some(compression_index);
        self.void_ratio = Some(void_ratio);
        self
    }

    /// Validate the stratum record.
    pub fn validate(&self) -> DesignResult<()> {
        if self.thickness_m <= 0.0 {
            return Err(DesignError::invalid_input(
                "thickness_m",
                self.thickness_m.to_string(),
                "Stratum thickness must be positive",
            ));
        }
        if self.unit_weight_total_kn_m3 <= 0.0 {
            return Err(DesignError::invalid_input(
                "unit_weight_total_kn_m3",
                self.unit_weight_total_kn_m3.to_string(),
                "Unit weight must be positive",
            ));
        }
        if self.young_modulus_kpa <= 0.0 {
            return Err(DesignError::invalid_input(
                "young_modulus_kpa",
                self.young_modulus_kpa.to_string(),
                "Young's modulus must be positive",
            ));
        }
        match self.material {
            MaterialClass::Cohesive => {
                if self.undrained_cohesion_kpa.is_none() {
                    return Err(DesignError::invalid_input(
                        "undrained_cohesion_kpa",
                        "none",
                        "Cohesive strata require an undrained cohesion",
                    ));
                }
                if self.preconsolidation_kpa.is_none() {
                    return Err(DesignError::invalid_input(
                        "preconsolidation_kpa",
                        "none",
                        "Cohesive strata require a preconsolidation stress",
                    ));
                }
            }
            MaterialClass::Granular => {
                if self.compression_index.is_some()
                    || self.void_ratio.is_some()
                    || self.preconsolidation_kpa.is_some()
                {
                    return Err(DesignError::invalid_input(
                        "consolidation",
                        "set",
                        "Granular strata carry no consolidation parameters",
                    ));
                }
            }
            MaterialClass::Rock => {}
        }
        if self.material != MaterialClass::Rock
            && (self.rqd_percent.is_some() || self.ucs_kpa.is_some())
        {
            return Err(DesignError::invalid_input(
                "rock_parameters",
                "set",
                "RQD and UCS apply to rock strata only",
            ));
        }
        Ok(())
    }

    /// Effective unit weight (kN/m³): buoyant when saturated.
    pub fn effective_unit_weight_kn_m3(&self) -> f64 {
        if self.saturated {
            self.unit_weight_total_kn_m3 - GAMMA_WATER
        } else {
            self.unit_weight_total_kn_m3
        }
    }

    /// Thickness of the intersection between this stratum and `[d1, d2]` (m).
    pub fn overlap_m(&self, d1: f64, d2: f64) -> f64 {
        (self.bottom_m.min(d2) - self.top_m.max(d1)).max(0.0)
    }

    /// Copy of this stratum marked saturated.
    pub fn saturate(&self) -> Self {
        let mut s = self.clone();
        s.saturated = true;
        s
    }
}
