//! # Soil Profile
//!
//! The full layered soil column at a tower site: an ordered sequence of
//! [`Stratum`] records with assigned depths, a water table, and the
//! aggregate queries the stability checks and the search optimizer consume.
//!
//! A profile is immutable after construction except for two owner-exclusive
//! operations: [`Profile::clone_saturated`] yields a new, fully saturated
//! profile, and [`Profile::extend_into_rock`] mutates layer boundaries in
//! place on a private copy held by the optimizer's inner loop.
//!
//! ## Example
//!
//! ```rust
//! use fundar_core::soil::{Profile, Stratum};
//!
//! let profile = Profile::new(
//!     vec![
//!         Stratum::granular(2.0, 18.0, 20_000.0, 30.0),
//!         Stratum::cohesive(4.0, 17.5, 4_500.0, 35.0, 110.0),
//!     ],
//!     Some(2.0),
//!     18.0,
//! ).unwrap();
//!
//! assert_eq!(profile.total_depth_m(), 6.0);
//! assert_eq!(profile.water_table_m(), Some(2.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::soil::stratum::{MaterialClass, Stratum};
use crate::units::GAMMA_WATER;

/// Depth comparisons tolerate this much float noise (m).
const DEPTH_EPS: f64 = 1e-9;

/// Rock share at or above which excavated material re-compacts as rock fill (%).
const ROCK_BACKFILL_THRESHOLD_PERCENT: f64 = 70.0;

/// Cohesive share of the soil fraction at or above which fill behaves cohesive (%).
const COHESIVE_BACKFILL_THRESHOLD_PERCENT: f64 = 30.0;

/// Friction angle assigned to rock-like backfill (degrees).
const ROCK_BACKFILL_FRICTION_DEG: f64 = 27.0;

/// Undrained cohesion assigned to rock-like backfill (kPa).
const ROCK_BACKFILL_COHESION_KPA: f64 = 20.0;

/// Friction angle assigned to granular backfill (degrees).
const GRANULAR_BACKFILL_FRICTION_DEG: f64 = 23.0;

/// Per-class share of a depth window, normalized to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPercentages {
    /// Cohesive share (%)
    pub cohesive: f64,
    /// Granular share (%)
    pub granular: f64,
    /// Rock share (%)
    pub rock: f64,
}

impl MaterialPercentages {
    /// Share of one class (%)
    pub fn of(&self, class: MaterialClass) -> f64 {
        match class {
            MaterialClass::Cohesive => self.cohesive,
            MaterialClass::Granular => self.granular,
            MaterialClass::Rock => self.rock,
        }
    }

    /// Sum across the three classes (%)
    pub fn total(&self) -> f64 {
        self.cohesive + self.granular + self.rock
    }

    /// Cohesive share of the soil (cohesive + granular) fraction (%).
    ///
    /// 0 when the window holds no soil at all.
    pub fn cohesive_soil_fraction(&self) -> f64 {
        let soil = self.cohesive + self.granular;
        if soil <= DEPTH_EPS {
            0.0
        } else {
            self.cohesive / soil * 100.0
        }
    }
}

/// Derived properties of the excavation backfill above a footing.
///
/// Backfill is not measured directly; it is classified from the excavated
/// column and assigned fixed strength parameters per class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackfillMaterial {
    /// Classification of the re-compacted fill
    pub material: MaterialClass,
    /// Friction angle (degrees), when the fill behaves frictionally
    pub friction_angle_deg: Option<f64>,
    /// Undrained cohesion (kPa), when the fill behaves cohesively
    pub undrained_cohesion_kpa: Option<f64>,
    /// Unit weight of the compacted fill (kN/m³), buoyant below the water level
    pub unit_weight_kn_m3: f64,
}

/// Ordered sequence of strata plus aggregate queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Strata ordered top-down; depths assigned on construction
    strata: Vec<Stratum>,

    /// Water table depth measured in the field (m)
    field_water_table_m: Option<f64>,

    /// Unit weight of the site's compacted backfill material (kN/m³)
    backfill_unit_weight_kn_m3: f64,
}

impl Profile {
    /// Build a profile from site-investigation strata.
    ///
    /// Depths are assigned cumulatively from the surface. Strata at or below
    /// the field water table are marked saturated; strata already flagged
    /// saturated (flood-risk override) stay saturated even above it.
    pub fn new(
        strata: Vec<Stratum>,
        field_water_table_m: Option<f64>,
        backfill_unit_weight_kn_m3: f64,
    ) -> DesignResult<Self> {
        if strata.is_empty() {
            return Err(DesignError::invalid_input(
                "strata",
                "[]",
                "A profile requires at least one stratum",
            ));
        }
        if backfill_unit_weight_kn_m3 <= 0.0 {
            return Err(DesignError::invalid_input(
                "backfill_unit_weight_kn_m3",
                backfill_unit_weight_kn_m3.to_string(),
                "Backfill unit weight must be positive",
            ));
        }
        if let Some(wt) = field_water_table_m {
            if wt < 0.0 {
                return Err(DesignError::invalid_input(
                    "field_water_table_m",
                    wt.to_string(),
                    "Water table depth cannot be negative",
                ));
            }
        }
        for stratum in &strata {
            stratum.validate()?;
        }

        let mut profile = Profile {
            strata,
            field_water_table_m,
            backfill_unit_weight_kn_m3,
        };
        profile.assign_depths();
        if let Some(wt) = field_water_table_m {
            for s in &mut profile.strata {
                if s.top_m >= wt - DEPTH_EPS {
                    s.saturated = true;
                }
            }
        }
        Ok(profile)
    }

    fn assign_depths(&mut self) {
        let mut depth = 0.0;
        for s in &mut self.strata {
            s.top_m = depth;
            depth += s.thickness_m;
            s.bottom_m = depth;
        }
    }

    /// The strata, top-down
    pub fn strata(&self) -> &[Stratum] {
        &self.strata
    }

    /// Total profile depth (m)
    pub fn total_depth_m(&self) -> f64 {
        self.strata.last().map(|s| s.bottom_m).unwrap_or(0.0)
    }

    /// Water table depth measured in the field (m)
    pub fn field_water_table_m(&self) -> Option<f64> {
        self.field_water_table_m
    }

    /// Unit weight of the site's compacted backfill (kN/m³)
    pub fn backfill_unit_weight_kn_m3(&self) -> f64 {
        self.backfill_unit_weight_kn_m3
    }

    /// Shallowest saturated depth (m), or None when nothing is saturated.
    pub fn water_table_m(&self) -> Option<f64> {
        self.strata.iter().find(|s| s.saturated).map(|s| s.top_m)
    }

    /// The depth from which buoyancy applies (m): cumulative thickness of the
    /// leading unsaturated run. May sit above the field measurement when a
    /// flood-risk override saturates shallow strata. None when the whole
    /// column is dry.
    pub fn water_level_m(&self) -> Option<f64> {
        let mut depth = 0.0;
        for s in &self.strata {
            if s.saturated {
                return Some(depth);
            }
            depth += s.thickness_m;
        }
        None
    }

    fn check_range(&self, depth_start_m: f64, depth_end_m: f64) -> DesignResult<()> {
        if depth_start_m < -DEPTH_EPS || depth_end_m < depth_start_m {
            return Err(DesignError::invalid_input(
                "depth_range",
                format!("[{depth_start_m}, {depth_end_m}]"),
                "Depth range must be non-negative and ordered",
            ));
        }
        let total = self.total_depth_m();
        if depth_end_m > total + DEPTH_EPS {
            return Err(DesignError::insufficient_depth(depth_end_m, total));
        }
        Ok(())
    }

    /// Thickness-weighted average of an attribute over `[depth_start_m, depth_end_m]`.
    ///
    /// Strata whose attribute is `None` are skipped entirely (their overlap
    /// does not enter the weight). `material_filter` restricts the average to
    /// one class. Returns `Ok(None)` when no weight remains.
    pub fn average_over(
        &self,
        depth_start_m: f64,
        depth_end_m: f64,
        attribute: impl Fn(&Stratum) -> Option<f64>,
        material_filter: Option<MaterialClass>,
    ) -> DesignResult<Option<f64>> {
        self.check_range(depth_start_m, depth_end_m)?;

        let mut weight = 0.0;
        let mut weighted_sum = 0.0;
        for s in &self.strata {
            if let Some(filter) = material_filter {
                if s.material != filter {
                    continue;
                }
            }
            let overlap = s.overlap_m(depth_start_m, depth_end_m);
            if overlap <= DEPTH_EPS {
                continue;
            }
            if let Some(value) = attribute(s) {
                weight += overlap;
                weighted_sum += overlap * value;
            }
        }
        if weight <= DEPTH_EPS {
            Ok(None)
        } else {
            Ok(Some(weighted_sum / weight))
        }
    }

    /// Thickness-weighted average undrained cohesion over a window (kPa).
    pub fn average_undrained_cohesion_kpa(
        &self,
        depth_start_m: f64,
        depth_end_m: f64,
    ) -> DesignResult<Option<f64>> {
        self.average_over(
            depth_start_m,
            depth_end_m,
            |s| s.undrained_cohesion_kpa,
            None,
        )
    }

    /// Thickness-weighted average effective unit weight over a window (kN/m³).
    pub fn average_effective_unit_weight_kn_m3(
        &self,
        depth_start_m: f64,
        depth_end_m: f64,
    ) -> DesignResult<Option<f64>> {
        self.average_over(
            depth_start_m,
            depth_end_m,
            |s| Some(s.effective_unit_weight_kn_m3()),
            None,
        )
    }

    fn overlaps_by_class(&self, depth_start_m: f64, depth_end_m: f64) -> [f64; 3] {
        let mut overlaps = [0.0; 3];
        for s in &self.strata {
            let overlap = s.overlap_m(depth_start_m, depth_end_m);
            if overlap <= 0.0 {
                continue;
            }
            let idx = match s.material {
                MaterialClass::Cohesive => 0,
                MaterialClass::Granular => 1,
                MaterialClass::Rock => 2,
            };
            overlaps[idx] += overlap;
        }
        overlaps
    }

    /// Material class with the greatest overlapping thickness in a window.
    ///
    /// Ties resolve in enumeration order (cohesive, granular, rock).
    pub fn predominant_material(
        &self,
        depth_start_m: f64,
        depth_end_m: f64,
    ) -> DesignResult<MaterialClass> {
        self.check_range(depth_start_m, depth_end_m)?;
        let overlaps = self.overlaps_by_class(depth_start_m, depth_end_m);
        let total: f64 = overlaps.iter().sum();
        if total <= DEPTH_EPS {
            return Err(DesignError::invalid_input(
                "depth_range",
                format!("[{depth_start_m}, {depth_end_m}]"),
                "Window has zero thickness",
            ));
        }
        let mut best = MaterialClass::ALL[0];
        let mut best_overlap = overlaps[0];
        for (class, overlap) in MaterialClass::ALL.iter().zip(overlaps.iter()).skip(1) {
            if *overlap > best_overlap {
                best = *class;
                best_overlap = *overlap;
            }
        }
        Ok(best)
    }

    /// Per-class percentage of a window's thickness, normalized to 100.
    pub fn material_percentages(
        &self,
        depth_start_m: f64,
        depth_end_m: f64,
    ) -> DesignResult<MaterialPercentages> {
        self.check_range(depth_start_m, depth_end_m)?;
        let overlaps = self.overlaps_by_class(depth_start_m, depth_end_m);
        let total: f64 = overlaps.iter().sum();
        if total <= DEPTH_EPS {
            return Err(DesignError::invalid_input(
                "depth_range",
                format!("[{depth_start_m}, {depth_end_m}]"),
                "Window has zero thickness",
            ));
        }
        Ok(MaterialPercentages {
            cohesive: overlaps[0] / total * 100.0,
            granular: overlaps[1] / total * 100.0,
            rock: overlaps[2] / total * 100.0,
        })
    }

    /// Depth of the soil/rock contact (m): cumulative thickness of the
    /// leading non-rock run. None when the column holds no rock.
    pub fn rock_depth_m(&self) -> Option<f64> {
        if !self.strata.iter().any(|s| s.material == MaterialClass::Rock) {
            return None;
        }
        let mut depth = 0.0;
        for s in &self.strata {
            if s.material == MaterialClass::Rock {
                break;
            }
            depth += s.thickness_m;
        }
        Some(depth)
    }

    /// The stratum containing `depth_m` (the bottom stratum owns the exact
    /// profile bottom).
    pub fn stratum_at(&self, depth_m: f64) -> DesignResult<&Stratum> {
        self.check_range(depth_m, depth_m)?;
        self.strata
            .iter()
            .find(|s| depth_m < s.bottom_m + DEPTH_EPS)
            .ok_or_else(|| DesignError::insufficient_depth(depth_m, self.total_depth_m()))
    }

    /// Derive the backfill placed above a footing base at `depth_m`.
    ///
    /// The excavated column over `[0, depth_m]` is classified by thresholds:
    /// a mostly-rock cut re-compacts as rock fill with fixed strength, a
    /// sufficiently cohesive soil cut keeps half its averaged undrained
    /// cohesion, anything else behaves as clean granular fill. The unit
    /// weight is the site backfill value, buoyant when the water level sits
    /// above the footing base.
    pub fn backfill_material(&self, depth_m: f64) -> DesignResult<BackfillMaterial> {
        let percentages = self.material_percentages(0.0, depth_m)?;

        let submerged = self
            .water_level_m()
            .map(|level| level < depth_m - DEPTH_EPS)
            .unwrap_or(false);
        let unit_weight_kn_m3 = if submerged {
            self.backfill_unit_weight_kn_m3 - GAMMA_WATER
        } else {
            self.backfill_unit_weight_kn_m3
        };

        if percentages.rock >= ROCK_BACKFILL_THRESHOLD_PERCENT {
            return Ok(BackfillMaterial {
                material: MaterialClass::Rock,
                friction_angle_deg: Some(ROCK_BACKFILL_FRICTION_DEG),
                undrained_cohesion_kpa: Some(ROCK_BACKFILL_COHESION_KPA),
                unit_weight_kn_m3,
            });
        }

        if percentages.cohesive_soil_fraction() >= COHESIVE_BACKFILL_THRESHOLD_PERCENT {
            let averaged = self
                .average_undrained_cohesion_kpa(0.0, depth_m)?
                .unwrap_or(0.0);
            return Ok(BackfillMaterial {
                material: MaterialClass::Cohesive,
                friction_angle_deg: None,
                undrained_cohesion_kpa: Some(averaged / 2.0),
                unit_weight_kn_m3,
            });
        }

        Ok(BackfillMaterial {
            material: MaterialClass::Granular,
            friction_angle_deg: Some(GRANULAR_BACKFILL_FRICTION_DEG),
            undrained_cohesion_kpa: None,
            unit_weight_kn_m3,
        })
    }

    /// New profile with every stratum saturated and buoyant unit weights
    /// recomputed. Non-destructive.
    pub fn clone_saturated(&self) -> Profile {
        let mut clone = Profile {
            strata: self.strata.iter().map(Stratum::saturate).collect(),
            field_water_table_m: self.field_water_table_m,
            backfill_unit_weight_kn_m3: self.backfill_unit_weight_kn_m3,
        };
        clone.assign_depths();
        clone
    }

    /// Grow the last soil stratum above the rock contact by `extension_m`,
    /// shrinking the rock below it by the same amount.
    ///
    /// Models controlled footing penetration into rock: the penetrated band
    /// is treated as soil by every stability calculation except bearing
    /// capacity. Rock strata exhausted by the extension are removed. The
    /// total profile depth never changes.
    ///
    /// In-place, owner-only: callers operate on a private copy.
    pub fn extend_into_rock(&mut self, extension_m: f64) -> DesignResult<()> {
        if extension_m <= 0.0 {
            return Err(DesignError::invalid_input(
                "extension_m",
                extension_m.to_string(),
                "Rock extension must be positive",
            ));
        }
        let contact_idx = self
            .strata
            .iter()
            .position(|s| s.material == MaterialClass::Rock)
            .ok_or_else(|| {
                DesignError::invalid_input(
                    "profile",
                    "no rock",
                    "Cannot extend into rock: profile has no rock stratum",
                )
            })?;
        if contact_idx == 0 {
            return Err(DesignError::invalid_input(
                "profile",
                "rock at surface",
                "Cannot extend into rock: no soil stratum above the contact",
            ));
        }

        let available_m: f64 = self.strata[contact_idx..]
            .iter()
            .take_while(|s| s.material == MaterialClass::Rock)
            .map(|s| s.thickness_m)
            .sum();
        if extension_m > available_m + DEPTH_EPS {
            return Err(DesignError::invalid_input(
                "extension_m",
                extension_m.to_string(),
                "Rock extension exceeds the rock thickness at the contact",
            ));
        }

        // Consume the extension from the consecutive rock strata at the contact.
        let mut remaining = extension_m;
        let mut idx = contact_idx;
        while remaining > DEPTH_EPS && idx < self.strata.len() {
            let take = remaining.min(self.strata[idx].thickness_m);
            self.strata[idx].thickness_m -= take;
            remaining -= take;
            if self.strata[idx].thickness_m <= DEPTH_EPS {
                self.strata.remove(idx);
            } else {
                idx += 1;
            }
        }

        self.strata[contact_idx - 1].thickness_m += extension_m;
        self.assign_depths();
        Ok(())
    }

    /// Value-semantics variant of [`extend_into_rock`](Self::extend_into_rock):
    /// returns a new profile with the boundary shifted, leaving `self`
    /// untouched. The search optimizer holds exactly one such profile per
    /// iteration.
    pub fn with_rock_extension(&self, extension_m: f64) -> DesignResult<Profile> {
        let mut extended = self.clone();
        extended.extend_into_rock(extension_m)?;
        Ok(extended)
    }

    /// One-line-per-stratum summary for terminal output.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (i, s) in self.strata.iter().enumerate() {
            out.push_str(&format!(
                "{}. {:.2}-{:.2} m  {:<9} γ={:.1} kN/m³{}\n",
                i + 1,
                s.top_m,
                s.bottom_m,
                s.material.code(),
                s.unit_weight_total_kn_m3,
                if s.saturated { "  (saturated)" } else { "" },
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mixed five-stratum column with rock at 7 m and water at 2 m.
    fn mixed_profile() -> Profile {
        Profile::new(
            vec![
                Stratum::granular(2.0, 18.0, 20_000.0, 30.0),
                Stratum::cohesive(3.0, 17.5, 4_500.0, 35.0, 110.0),
                Stratum::granular(2.0, 19.0, 30_000.0, 34.0),
                Stratum::rock(4.0, 24.0, 900_000.0, 70.0, 25_000.0),
                Stratum::rock(5.0, 25.0, 1_200_000.0, 85.0, 40_000.0),
            ],
            Some(2.0),
            18.0,
        )
        .unwrap()
    }

    #[test]
    fn test_depths_assigned_cumulatively() {
        let p = mixed_profile();
        let tops: Vec<f64> = p.strata().iter().map(|s| s.top_m).collect();
        assert_eq!(tops, vec![0.0, 2.0, 5.0, 7.0, 11.0]);
        assert_eq!(p.total_depth_m(), 16.0);
    }

    #[test]
    fn test_water_table_from_field_measurement() {
        let p = mixed_profile();
        assert_eq!(p.water_table_m(), Some(2.0));
        assert_eq!(p.water_level_m(), Some(2.0));
        assert!(!p.strata()[0].saturated);
        assert!(p.strata()[1].saturated);
    }

    #[test]
    fn test_flood_override_raises_water_level() {
        let p = Profile::new(
            vec![
                Stratum::granular(2.0, 18.0, 20_000.0, 30.0).with_saturation(true),
                Stratum::cohesive(4.0, 17.5, 4_500.0, 35.0, 110.0),
            ],
            Some(6.0),
            18.0,
        )
        .unwrap();
        // flood risk saturates the surface layer even though the field
        // measurement sits at the profile bottom
        assert_eq!(p.water_level_m(), Some(0.0));
        assert_eq!(p.water_table_m(), Some(0.0));
    }

    #[test]
    fn test_dry_profile_has_no_water() {
        let p = Profile::new(
            vec![Stratum::granular(5.0, 18.0, 20_000.0, 30.0)],
            None,
            18.0,
        )
        .unwrap();
        assert_eq!(p.water_table_m(), None);
        assert_eq!(p.water_level_m(), None);
    }

    #[test]
    fn test_water_invariant_table_equals_level() {
        let p = mixed_profile();
        assert_eq!(p.water_table_m(), p.water_level_m());
    }

    #[test]
    fn test_average_skips_missing_attributes() {
        let p = mixed_profile();
        // only the cohesive stratum (2-5 m) defines c_u; weight is its
        // overlap alone, not zero-padded by neighbours
        let avg = p.average_undrained_cohesion_kpa(0.0, 7.0).unwrap();
        assert_eq!(avg, Some(35.0));
    }

    #[test]
    fn test_average_weights_by_overlap() {
        let p = mixed_profile();
        let avg = p
            .average_over(1.0, 4.0, |s| Some(s.unit_weight_total_kn_m3), None)
            .unwrap()
            .unwrap();
        // 1 m of γ=18 + 2 m of γ=17.5
        assert!((avg - (18.0 + 17.5 * 2.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_with_material_filter() {
        let p = mixed_profile();
        let avg = p
            .average_over(
                0.0,
                7.0,
                |s| Some(s.unit_weight_total_kn_m3),
                Some(MaterialClass::Granular),
            )
            .unwrap()
            .unwrap();
        // 2 m of γ=18 + 2 m of γ=19
        assert!((avg - 18.5).abs() < 1e-9);
    }

    #[test]
    fn test_average_none_when_no_weight() {
        let p = mixed_profile();
        let avg = p
            .average_over(0.0, 2.0, |s| s.undrained_cohesion_kpa, None)
            .unwrap();
        assert_eq!(avg, None);
    }

    #[test]
    fn test_range_past_bottom_fails() {
        let p = mixed_profile();
        let err = p.average_undrained_cohesion_kpa(0.0, 20.0).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DEPTH");
    }

    #[test]
    fn test_predominant_material() {
        let p = mixed_profile();
        assert_eq!(
            p.predominant_material(0.0, 7.0).unwrap(),
            MaterialClass::Granular
        );
        assert_eq!(
            p.predominant_material(2.0, 5.0).unwrap(),
            MaterialClass::Cohesive
        );
        assert_eq!(
            p.predominant_material(5.0, 16.0).unwrap(),
            MaterialClass::Rock
        );
    }

    #[test]
    fn test_predominant_tie_resolves_in_enum_order() {
        let p = mixed_profile();
        // [0,4]: 2 m granular vs 2 m cohesive; cohesive enumerates first
        assert_eq!(
            p.predominant_material(0.0, 4.0).unwrap(),
            MaterialClass::Cohesive
        );
    }

    #[test]
    fn test_percentage_law() {
        let p = mixed_profile();
        for (d1, d2) in [(0.0, 16.0), (1.5, 8.25), (6.9, 7.1), (0.0, 0.5)] {
            let pct = p.material_percentages(d1, d2).unwrap();
            assert!((pct.total() - 100.0).abs() < 1e-6, "window [{d1},{d2}]");
        }
    }

    #[test]
    fn test_percentages_zero_window_fails() {
        let p = mixed_profile();
        assert!(p.material_percentages(3.0, 3.0).is_err());
    }

    #[test]
    fn test_rock_depth() {
        let p = mixed_profile();
        assert_eq!(p.rock_depth_m(), Some(7.0));

        let no_rock = Profile::new(
            vec![Stratum::granular(5.0, 18.0, 20_000.0, 30.0)],
            None,
            18.0,
        )
        .unwrap();
        assert_eq!(no_rock.rock_depth_m(), None);
    }

    #[test]
    fn test_stratum_at() {
        let p = mixed_profile();
        assert_eq!(p.stratum_at(0.0).unwrap().material, MaterialClass::Granular);
        assert_eq!(
            p.stratum_at(3.5).unwrap().material,
            MaterialClass::Cohesive
        );
        assert_eq!(p.stratum_at(16.0).unwrap().material, MaterialClass::Rock);
        assert!(p.stratum_at(17.0).is_err());
    }

    #[test]
    fn test_backfill_cohesive_branch() {
        let p = mixed_profile();
        // [0,5]: 2 m granular, 3 m cohesive -> cohesive fraction 60%
        let fill = p.backfill_material(5.0).unwrap();
        assert_eq!(fill.material, MaterialClass::Cohesive);
        assert_eq!(fill.undrained_cohesion_kpa, Some(17.5));
        assert_eq!(fill.friction_angle_deg, None);
        // water level at 2 m sits above the base: buoyant fill
        assert!((fill.unit_weight_kn_m3 - (18.0 - GAMMA_WATER)).abs() < 1e-9);
    }

    #[test]
    fn test_backfill_granular_branch() {
        let p = Profile::new(
            vec![
                Stratum::granular(4.0, 19.0, 25_000.0, 32.0),
                Stratum::cohesive(1.0, 17.5, 4_500.0, 35.0, 110.0),
            ],
            None,
            19.0,
        )
        .unwrap();
        // cohesive fraction 20% of the soil: granular fill, dry site
        let fill = p.backfill_material(5.0).unwrap();
        assert_eq!(fill.material, MaterialClass::Granular);
        assert_eq!(fill.friction_angle_deg, Some(23.0));
        assert_eq!(fill.undrained_cohesion_kpa, None);
        assert_eq!(fill.unit_weight_kn_m3, 19.0);
    }

    #[test]
    fn test_backfill_rock_branch() {
        let p = Profile::new(
            vec![
                Stratum::granular(1.0, 18.0, 20_000.0, 30.0),
                Stratum::rock(4.0, 24.0, 900_000.0, 80.0, 30_000.0),
            ],
            None,
            20.0,
        )
        .unwrap();
        // rock share 80% over [0,5]
        let fill = p.backfill_material(5.0).unwrap();
        assert_eq!(fill.material, MaterialClass::Rock);
        assert_eq!(fill.friction_angle_deg, Some(27.0));
        assert_eq!(fill.undrained_cohesion_kpa, Some(20.0));
    }

    #[test]
    fn test_clone_saturated() {
        let p = mixed_profile();
        let wet = p.clone_saturated();
        assert!(wet.strata().iter().all(|s| s.saturated));
        assert_eq!(wet.water_level_m(), Some(0.0));
        // original untouched
        assert!(!p.strata()[0].saturated);
    }

    #[test]
    fn test_clone_saturated_round_trip() {
        let p = mixed_profile();
        let once = p.clone_saturated();
        let twice = once.clone_saturated();
        assert_eq!(once, twice);
        let weights_once: Vec<f64> = once
            .strata()
            .iter()
            .map(|s| s.effective_unit_weight_kn_m3())
            .collect();
        let weights_twice: Vec<f64> = twice
            .strata()
            .iter()
            .map(|s| s.effective_unit_weight_kn_m3())
            .collect();
        assert_eq!(weights_once, weights_twice);
    }

    #[test]
    fn test_extend_into_rock_shifts_boundary() {
        let mut p = mixed_profile();
        let total_before = p.total_depth_m();
        p.extend_into_rock(0.5).unwrap();

        // soil above the contact grew, first rock stratum shrank
        assert_eq!(p.strata()[2].thickness_m, 2.5);
        assert_eq!(p.strata()[3].thickness_m, 3.5);
        assert_eq!(p.rock_depth_m(), Some(7.5));
        assert_eq!(p.total_depth_m(), total_before);
    }

    #[test]
    fn test_extend_into_rock_removes_exhausted_stratum() {
        let mut p = mixed_profile();
        p.extend_into_rock(4.0).unwrap();

        // the 4 m rock stratum is gone, its neighbour is untouched
        assert_eq!(p.strata().len(), 4);
        assert_eq!(p.strata()[2].thickness_m, 6.0);
        assert_eq!(p.strata()[3].thickness_m, 5.0);
        assert_eq!(p.rock_depth_m(), Some(11.0));
        assert_eq!(p.total_depth_m(), 16.0);
    }

    #[test]
    fn test_extend_into_rock_spanning_two_strata() {
        let mut p = mixed_profile();
        p.extend_into_rock(5.5).unwrap();
        assert_eq!(p.strata().len(), 4);
        assert_eq!(p.rock_depth_m(), Some(12.5));
        assert!((p.strata()[3].thickness_m - 3.5).abs() < 1e-9);
        assert_eq!(p.total_depth_m(), 16.0);
    }

    #[test]
    fn test_with_rock_extension_leaves_original_untouched() {
        let p = mixed_profile();
        let extended = p.with_rock_extension(0.5).unwrap();
        assert_eq!(extended.rock_depth_m(), Some(7.5));
        assert_eq!(p.rock_depth_m(), Some(7.0));
        assert_eq!(extended.total_depth_m(), p.total_depth_m());
    }

    #[test]
    fn test_extend_into_rock_errors() {
        let mut no_rock = Profile::new(
            vec![Stratum::granular(5.0, 18.0, 20_000.0, 30.0)],
            None,
            18.0,
        )
        .unwrap();
        assert!(no_rock.extend_into_rock(0.5).is_err());

        let mut p = mixed_profile();
        assert!(p.extend_into_rock(-0.1).is_err());
        assert!(p.extend_into_rock(20.0).is_err());
    }

    #[test]
    fn test_profile_serialization() {
        let p = mixed_profile();
        let json = serde_json::to_string(&p).unwrap();
        let roundtrip: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, roundtrip);
    }
}
