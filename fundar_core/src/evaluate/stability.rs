//! # Stability Evaluator
//!
//! Orchestrates the physics oracle across load cases into the fixed
//! five-check battery. Checks run in dependency order: the minimum ultimate
//! bearing pressure feeds the uplift check, and the uplift capacity feeds
//! the overturning resisting moment.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::SearchConfig;
use crate::errors::{DesignError, DesignResult};
use crate::evaluate::{
    fs_snap, CheckId, CheckOutcome, BEARING_SNAP_TOL, OVERTURNING_SNAP_TOL, SLIDING_SNAP_TOL,
    UPLIFT_SNAP_TOL,
};
use crate::loads::{LoadCaseName, LoadKind, LoadProvider};
use crate::physics::{FootingGeometry, FoundationPhysics, Trace};
use crate::soil::{BackfillMaterial, MaterialClass, Profile};

/// Rock share above which a settlement window counts as pure rock (%).
const ROCK_WINDOW_THRESHOLD_PERCENT: f64 = 99.9;

/// Cohesive soil share selecting the cohesive settlement limit (%).
const COHESIVE_WINDOW_THRESHOLD_PERCENT: f64 = 30.0;

/// Load cases driving the bearing-capacity check.
const BEARING_CASES: [LoadCaseName; 3] = [
    LoadCaseName::MaxCompression,
    LoadCaseName::MaxLongitudinal,
    LoadCaseName::MaxTransversal,
];

/// Load cases driving the overturning check.
const OVERTURNING_CASES: [LoadCaseName; 3] = [
    LoadCaseName::MaxTension,
    LoadCaseName::MaxLongitudinal,
    LoadCaseName::MaxTransversal,
];

/// Load cases driving the sliding check.
const SLIDING_CASES: [LoadCaseName; 2] =
    [LoadCaseName::MaxLongitudinal, LoadCaseName::MaxTransversal];

/// Full outcome of the check battery for one footing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityReport {
    /// Per-check outcomes, indexed by [`CheckId::index`]
    pub(crate) outcomes: [CheckOutcome; CheckId::COUNT],

    /// Concrete volume of footing plus pedestal (m³)
    pub volume_m3: f64,

    /// Backfill volume above the footing (m³)
    pub backfill_volume_m3: f64,

    /// Whether the footing base sits below the water level
    pub saturated: bool,

    /// Total (elastic + consolidation) settlement (m)
    pub total_settlement_m: f64,

    /// Derived backfill composition above the footing
    pub backfill: BackfillMaterial,
}

impl StabilityReport {
    /// Outcome of one check
    pub fn get(&self, check: CheckId) -> &CheckOutcome {
        &self.outcomes[check.index()]
    }

    /// Iterate outcomes in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (CheckId, &CheckOutcome)> {
        CheckId::ALL.iter().map(|id| (*id, self.get(*id)))
    }

    /// Whether every check passes
    pub fn compliant(&self) -> bool {
        self.outcomes.iter().all(|o| o.compliant)
    }

    /// Number of failing checks
    pub fn failing_count(&self) -> u32 {
        self.outcomes.iter().filter(|o| !o.compliant).count() as u32
    }

    /// Euclidean norm of the failing checks' negative deviations
    pub fn deviation_norm(&self) -> f64 {
        self.outcomes
            .iter()
            .filter(|o| !o.compliant)
            .map(|o| o.deviation.min(0.0).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Concrete plus backfill volume (m³), the material take-off metric
    pub fn weighted_volume_m3(&self) -> f64 {
        self.volume_m3 + self.backfill_volume_m3
    }
}

/// Runs the fixed check battery for one fully specified footing.
pub struct StabilityEvaluator<'a> {
    config: &'a SearchConfig,
}

impl<'a> StabilityEvaluator<'a> {
    /// Create an evaluator borrowing the search configuration.
    pub fn new(config: &'a SearchConfig) -> Self {
        StabilityEvaluator { config }
    }

    /// Evaluate a footing resting in `profile` under the tower's loads.
    ///
    /// `profile` must already carry the rock and saturation adjustments for
    /// this candidate; the evaluator does not modify it.
    pub fn evaluate(
        &self,
        physics: &dyn FoundationPhysics,
        profile: &Profile,
        footing: &FootingGeometry,
        loads: &dyn LoadProvider,
    ) -> DesignResult<StabilityReport> {
        footing.validate()?;

        let (bearing, min_q_ult) = self.run_bearing(physics, loads)?;
        let (uplift, t_uplift_kn) =
            self.run_uplift(physics, profile, footing, loads, min_q_ult)?;
        let (settlement, total_settlement_m) =
            self.run_settlement(physics, profile, footing, loads)?;
        let overturning = self.run_overturning(physics, loads, t_uplift_kn)?;
        let sliding = self.run_sliding(physics, loads)?;

        let saturated = profile
            .water_level_m()
            .map(|level| level < footing.depth_m)
            .unwrap_or(false);
        let backfill = profile.backfill_material(footing.depth_m)?;

        Ok(StabilityReport {
            outcomes: [bearing, uplift, settlement, overturning, sliding],
            volume_m3: physics.volume_m3(),
            backfill_volume_m3: physics.backfill_volume_m3(),
            saturated,
            total_settlement_m,
            backfill,
        })
    }

    /// Bearing capacity over the three compression/horizontal cases.
    ///
    /// Also returns the minimum ultimate pressure across the cases, which
    /// sets the admissible pressure for the uplift check.
    fn run_bearing(
        &self,
        physics: &dyn FoundationPhysics,
        loads: &dyn LoadProvider,
    ) -> DesignResult<(CheckOutcome, Option<f64>)> {
        let fsc = self.config.fsc;
        let mut worst: Option<CheckOutcome> = None;
        let mut all_compliant = true;
        let mut min_q_ult: Option<f64> = None;
        let mut trace = Trace::new();

        for case in BEARING_CASES {
            let triple = loads.loads(LoadKind::Working, case)?;
            let capacity =
                physics.bearing_capacity(triple.resultant_horizontal_kn(), triple.vertical_kn)?;
            let stress = physics.soil_stress(
                triple.longitudinal_kn,
                triple.transversal_kn,
                triple.vertical_kn,
            )?;

            min_q_ult = Some(match min_q_ult {
                Some(q) => q.min(capacity.q_ult_net_kpa),
                None => capacity.q_ult_net_kpa,
            });

            let fs_raw = if stress.q_max_kpa > 0.0 {
                capacity.q_ult_net_kpa / stress.q_max_kpa
            } else {
                f64::INFINITY
            };
            let fs = fs_snap(fs_raw, fsc, BEARING_SNAP_TOL);
            let compliant = stress.q_min_kpa >= 0.0 && fs >= fsc;
            all_compliant &= compliant;

            trace.insert(
                case.code().to_string(),
                json!({
                    "q_ult_net_kpa": capacity.q_ult_net_kpa,
                    "q_max_kpa": stress.q_max_kpa,
                    "q_min_kpa": stress.q_min_kpa,
                    "fs": fs,
                    "capacity": capacity.trace,
                    "stress": stress.trace,
                }),
            );

            let case_outcome = CheckOutcome {
                factor_of_safety: Some(fs),
                compliant,
                deviation: (fs - fsc) / fsc,
                trace: Trace::new(),
            };
            worst = Some(match worst {
                Some(w) if !case_outcome.less_favorable_than(&w) => w,
                _ => case_outcome,
            });
        }

        let mut outcome = worst.ok_or_else(|| DesignError::Internal {
            message: "Bearing check ran no load cases".to_string(),
        })?;
        outcome.compliant = all_compliant;
        outcome.trace = trace;
        Ok((outcome, min_q_ult))
    }

    /// Uplift capacity for the maximum-tension case.
    ///
    /// Returns the ultimate uplift capacity for reuse by the overturning
    /// check.
    fn run_uplift(
        &self,
        physics: &dyn FoundationPhysics,
        profile: &Profile,
        footing: &FootingGeometry,
        loads: &dyn LoadProvider,
        min_q_ult: Option<f64>,
    ) -> DesignResult<(CheckOutcome, f64)> {
        let q_ult = min_q_ult.ok_or_else(|| DesignError::Internal {
            message: "Uplift check requires the bearing pressures".to_string(),
        })?;
        let q_admissible_kpa = q_ult / self.config.fsc;
        let tension = physics.tension(q_admissible_kpa)?;
        let triple = loads.loads(LoadKind::Working, LoadCaseName::MaxTension)?;

        let threshold = match profile.predominant_material(0.0, footing.depth_m)? {
            MaterialClass::Cohesive => self.config.fst_cohesive,
            MaterialClass::Granular | MaterialClass::Rock => self.config.fst_granular,
        };

        let fs_raw = if triple.vertical_kn > 0.0 {
            tension.ultimate_kn / triple.vertical_kn
        } else {
            f64::INFINITY
        };
        let fs = fs_snap(fs_raw, threshold, UPLIFT_SNAP_TOL);

        let mut trace = Trace::new();
        trace.insert("q_admissible_kpa".to_string(), json!(q_admissible_kpa));
        trace.insert("t_ultimate_kn".to_string(), json!(tension.ultimate_kn));
        trace.insert("tension_kn".to_string(), json!(triple.vertical_kn));
        trace.insert("fs_threshold".to_string(), json!(threshold));
        trace.insert("capacity".to_string(), json!(tension.trace));

        let outcome = CheckOutcome {
            factor_of_safety: Some(fs),
            compliant: fs >= threshold,
            deviation: (fs - threshold) / threshold,
            trace,
        };
        Ok((outcome, tension.ultimate_kn))
    }

    /// Immediate plus consolidation settlement under working and sustained
    /// loads.
    fn run_settlement(
        &self,
        physics: &dyn FoundationPhysics,
        profile: &Profile,
        footing: &FootingGeometry,
        loads: &dyn LoadProvider,
    ) -> DesignResult<(CheckOutcome, f64)> {
        let f_working = loads
            .loads(LoadKind::Working, LoadCaseName::MaxCompression)?
            .vertical_kn;
        let f_sustained = loads
            .loads(LoadKind::Working, LoadCaseName::MaxCompressionSustained)?
            .vertical_kn;

        let result = physics.settlement(
            self.config.settlement_segments,
            f_working,
            f_sustained,
            self.config.creep_years,
        )?;
        let total_m = result.elastic_m + result.consolidation_m;

        // Influence zone of two footing widths below the base.
        let window_end = footing.depth_m + 2.0 * footing.width_m;
        let composition = profile.material_percentages(footing.depth_m, window_end)?;
        let admissible_m = if composition.rock >= ROCK_WINDOW_THRESHOLD_PERCENT {
            self.config.s_max_granular_m
        } else if composition.cohesive_soil_fraction() >= COHESIVE_WINDOW_THRESHOLD_PERCENT {
            self.config.s_max_cohesive_m
        } else {
            self.config.s_max_granular_m
        };

        let compliant = admissible_m - total_m >= 0.0;
        let deviation = if compliant {
            0.0
        } else {
            (admissible_m - total_m) / admissible_m
        };

        let mut trace = Trace::new();
        trace.insert("elastic_m".to_string(), json!(result.elastic_m));
        trace.insert(
            "consolidation_m".to_string(),
            json!(result.consolidation_m),
        );
        trace.insert("total_m".to_string(), json!(total_m));
        trace.insert("admissible_m".to_string(), json!(admissible_m));
        trace.insert("elastic".to_string(), json!(result.trace_elastic));
        trace.insert(
            "consolidation".to_string(),
            json!(result.trace_consolidation),
        );

        let outcome = CheckOutcome {
            factor_of_safety: None,
            compliant,
            deviation,
            trace,
        };
        Ok((outcome, total_m))
    }

    /// Overturning over tension and the two horizontal cases; the uplift
    /// capacity is credited to the resisting moment.
    fn run_overturning(
        &self,
        physics: &dyn FoundationPhysics,
        loads: &dyn LoadProvider,
        t_uplift_kn: f64,
    ) -> DesignResult<CheckOutcome> {
        let fsv = self.config.fsv;
        let mut worst: Option<CheckOutcome> = None;
        let mut all_compliant = true;
        let mut trace = Trace::new();

        for case in OVERTURNING_CASES {
            let triple = loads.loads(LoadKind::Working, case)?;
            let moments = physics.overturning(
                triple.vertical_kn,
                triple.resultant_horizontal_kn(),
                t_uplift_kn,
            )?;

            let fs_raw = if moments.driving_kn_m > 0.0 {
                moments.resisting_kn_m / moments.driving_kn_m
            } else {
                f64::INFINITY
            };
            let fs = fs_snap(fs_raw, fsv, OVERTURNING_SNAP_TOL);
            let compliant = fs >= fsv;
            all_compliant &= compliant;

            trace.insert(
                case.code().to_string(),
                json!({
                    "driving_kn_m": moments.driving_kn_m,
                    "resisting_kn_m": moments.resisting_kn_m,
                    "fs": fs,
                    "detail": moments.trace,
                }),
            );

            let case_outcome = CheckOutcome {
                factor_of_safety: Some(fs),
                compliant,
                deviation: (fs - fsv) / fsv,
                trace: Trace::new(),
            };
            worst = Some(match worst {
                Some(w) if !case_outcome.less_favorable_than(&w) => w,
                _ => case_outcome,
            });
        }

        let mut outcome = worst.ok_or_else(|| DesignError::Internal {
            message: "Overturning check ran no load cases".to_string(),
        })?;
        outcome.compliant = all_compliant;
        outcome.trace = trace;
        Ok(outcome)
    }

    /// Sliding over the two horizontal cases.
    fn run_sliding(
        &self,
        physics: &dyn FoundationPhysics,
        loads: &dyn LoadProvider,
    ) -> DesignResult<CheckOutcome> {
        let fsl = self.config.fsl;
        let mut worst: Option<CheckOutcome> = None;
        let mut all_compliant = true;
        let mut trace = Trace::new();

        for case in SLIDING_CASES {
            let triple = loads.loads(LoadKind::Working, case)?;
            let h_kn = triple.resultant_horizontal_kn();
            let capacity = physics.sliding(triple.vertical_kn, h_kn)?;

            let fs_raw = if h_kn > 0.0 {
                capacity.lateral_kn / h_kn
            } else {
                f64::INFINITY
            };
            let fs = fs_snap(fs_raw, fsl, SLIDING_SNAP_TOL);
            let compliant = fs >= fsl;
            all_compliant &= compliant;

            trace.insert(
                case.code().to_string(),
                json!({
                    "lateral_kn": capacity.lateral_kn,
                    "horizontal_kn": h_kn,
                    "fs": fs,
                    "detail": capacity.trace,
                }),
            );

            let case_outcome = CheckOutcome {
                factor_of_safety: Some(fs),
                compliant,
                deviation: (fs - fsl) / fsl,
                trace: Trace::new(),
            };
            worst = Some(match worst {
                Some(w) if !case_outcome.less_favorable_than(&w) => w,
                _ => case_outcome,
            });
        }

        let mut outcome = worst.ok_or_else(|| DesignError::Internal {
            message: "Sliding check ran no load cases".to_string(),
        })?;
        outcome.compliant = all_compliant;
        outcome.trace = trace;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{LoadTable, LoadTriple};
    use crate::physics::{
        BearingCapacityOutput, OverturningOutput, SettlementOutput, SlidingOutput, TensionOutput,
        SoilStressOutput,
    };
    use crate::soil::Stratum;
    use std::cell::Cell;

    /// Physics oracle replaying fixed values, recording the admissible
    /// pressure handed to the tension call.
    struct ScriptedPhysics {
        q_ult_net_kpa: f64,
        q_max_kpa: f64,
        q_min_kpa: f64,
        elastic_m: f64,
        consolidation_m: f64,
        driving_kn_m: f64,
        resisting_kn_m: f64,
        lateral_kn: f64,
        t_ultimate_kn: f64,
        volume_m3: f64,
        backfill_volume_m3: f64,
        seen_q_admissible: Cell<Option<f64>>,
    }

    impl FoundationPhysics for ScriptedPhysics {
        fn bearing_capacity(&self, _h: f64, _v: f64) -> DesignResult<BearingCapacityOutput> {
            Ok(BearingCapacityOutput {
                q_ult_net_kpa: self.q_ult_net_kpa,
                trace: Trace::new(),
            })
        }

        fn soil_stress(&self, _fx: f64, _fy: f64, _fz: f64) -> DesignResult<SoilStressOutput> {
            Ok(SoilStressOutput {
                q_max_kpa: self.q_max_kpa,
                q_min_kpa: self.q_min_kpa,
                trace: Trace::new(),
            })
        }

        fn settlement(
            &self,
            _segments: u32,
            _fw: f64,
            _fs: f64,
            _years: f64,
        ) -> DesignResult<SettlementOutput> {
            Ok(SettlementOutput {
                elastic_m: self.elastic_m,
                consolidation_m: self.consolidation_m,
                trace_elastic: Trace::new(),
                trace_consolidation: Trace::new(),
            })
        }

        fn overturning(&self, _fz: f64, _fh: f64, _t: f64) -> DesignResult<OverturningOutput> {
            Ok(OverturningOutput {
                driving_kn_m: self.driving_kn_m,
                resisting_kn_m: self.resisting_kn_m,
                trace: Trace::new(),
            })
        }

        fn sliding(&self, _fz: f64, _fh: f64) -> DesignResult<SlidingOutput> {
            Ok(SlidingOutput {
                lateral_kn: self.lateral_kn,
                trace: Trace::new(),
            })
        }

        fn tension(&self, q_admissible_kpa: f64) -> DesignResult<TensionOutput> {
            self.seen_q_admissible.set(Some(q_admissible_kpa));
            Ok(TensionOutput {
                ultimate_kn: self.t_ultimate_kn,
                trace: Trace::new(),
            })
        }

        fn volume_m3(&self) -> f64 {
            self.volume_m3
        }

        fn backfill_volume_m3(&self) -> f64 {
            self.backfill_volume_m3
        }
    }

    fn reference_config() -> SearchConfig {
        SearchConfig {
            fsc: 3.0,
            fst_granular: 1.5,
            fst_cohesive: 2.0,
            fsv: 1.5,
            fsl: 1.5,
            settlement_segments: 80,
            creep_years: 20.0,
            s_max_granular_m: 0.05,
            s_max_cohesive_m: 0.10,
            ..SearchConfig::default()
        }
    }

    /// Five-stratum column, water table at the surface.
    fn wet_profile() -> Profile {
        Profile::new(
            vec![
                Stratum::cohesive(1.5, 17.0, 4_000.0, 40.0, 120.0),
                Stratum::granular(1.5, 19.0, 25_000.0, 32.0),
                Stratum::cohesive(2.0, 17.5, 4_500.0, 35.0, 110.0),
                Stratum::granular(3.0, 19.5, 30_000.0, 34.0),
                Stratum::cohesive(4.0, 18.0, 6_000.0, 50.0, 150.0),
            ],
            Some(0.0),
            18.0,
        )
        .unwrap()
    }

    /// Three granular strata, fully dry.
    fn dry_profile() -> Profile {
        Profile::new(
            vec![
                Stratum::granular(2.0, 18.5, 22_000.0, 31.0),
                Stratum::granular(3.0, 19.0, 28_000.0, 33.0),
                Stratum::granular(5.0, 19.5, 35_000.0, 35.0),
            ],
            None,
            19.0,
        )
        .unwrap()
    }

    fn wet_fixture_footing() -> FootingGeometry {
        FootingGeometry {
            width_m: 3.8,
            length_m: 3.8,
            depth_m: 4.0,
            thickness_m: 0.4,
            embedment_m: 4.6,
            pedestal_side_m: 0.8,
            pedestal_tilt_deg: 6.80729388,
            unit_weight_concrete_kn_m3: 14.19,
            base_tilt_deg: 0.0,
            terrain_tilt_deg: 0.0,
        }
    }

    fn wet_fixture_loads() -> LoadTable {
        LoadTable::new()
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxCompression,
                LoadTriple::new(800.0, 40.0, 30.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxCompressionSustained,
                LoadTriple::new(500.0, 0.0, 0.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxTension,
                LoadTriple::new(200.0, 30.0, 20.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxLongitudinal,
                LoadTriple::new(300.0, 164.40, 0.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxTransversal,
                LoadTriple::new(300.0, 0.0, 164.40),
            )
    }

    #[test]
    fn test_wet_reference_fixture() {
        let config = reference_config();
        let profile = wet_profile();
        let footing = wet_fixture_footing();
        let loads = wet_fixture_loads();
        let physics = ScriptedPhysics {
            q_ult_net_kpa: 622.11,
            q_max_kpa: 140.12,
            q_min_kpa: 5.0,
            elastic_m: 0.02,
            consolidation_m: 0.05,
            driving_kn_m: 1623.5,
            resisting_kn_m: 1818.32,
            lateral_kn: 948.62,
            t_ultimate_kn: 246.0,
            volume_m3: 25.0,
            backfill_volume_m3: 40.0,
            seen_q_admissible: Cell::new(None),
        };

        let evaluator = StabilityEvaluator::new(&config);
        let report = evaluator
            .evaluate(&physics, &profile, &footing, &loads)
            .unwrap();

        // bearing: fs = 622.11 / 140.12
        let bearing = report.get(CheckId::Bearing);
        assert!((bearing.factor_of_safety.unwrap() - 4.44).abs() < 0.005);
        assert!(bearing.compliant);

        // uplift: q_adm = 622.11 / 3.0 handed to the oracle, fs = 246/200
        assert!((physics.seen_q_admissible.get().unwrap() - 207.37).abs() < 0.005);
        let uplift = report.get(CheckId::Uplift);
        assert!((uplift.factor_of_safety.unwrap() - 1.23).abs() < 0.005);
        // predominant material over [0,4] is cohesive: threshold 2.0
        assert!(!uplift.compliant);
        assert!((uplift.deviation - (1.23 - 2.0) / 2.0).abs() < 0.005);

        // settlement: 0.07 m against the cohesive 0.10 m limit
        let settlement = report.get(CheckId::Settlement);
        assert!(settlement.compliant);
        assert_eq!(settlement.deviation, 0.0);
        assert!((report.total_settlement_m - 0.07).abs() < 1e-12);

        // overturning: fs = 1818.32 / 1623.5
        let overturning = report.get(CheckId::Overturning);
        assert!((overturning.factor_of_safety.unwrap() - 1.12).abs() < 0.005);
        assert!(!overturning.compliant);

        // sliding: fs = 948.62 / 164.40
        let sliding = report.get(CheckId::Sliding);
        assert!((sliding.factor_of_safety.unwrap() - 5.77).abs() < 0.005);
        assert!(sliding.compliant);

        assert!(!report.compliant());
        assert_eq!(report.failing_count(), 2);
        assert!(report.saturated);
        assert_eq!(report.weighted_volume_m3(), 65.0);
    }

    #[test]
    fn test_dry_reference_fixture() {
        let config = reference_config();
        let profile = dry_profile();
        let footing = FootingGeometry {
            width_m: 3.0,
            length_m: 3.0,
            depth_m: 3.5,
            thickness_m: 0.4,
            embedment_m: 3.6,
            pedestal_side_m: 0.7,
            pedestal_tilt_deg: 5.90689248,
            unit_weight_concrete_kn_m3: 24.0,
            base_tilt_deg: 0.0,
            terrain_tilt_deg: 0.0,
        };
        let loads = LoadTable::new()
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxCompression,
                LoadTriple::new(600.0, 30.0, 25.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxCompressionSustained,
                LoadTriple::new(380.0, 0.0, 0.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxTension,
                LoadTriple::new(100.0, 20.0, 15.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxLongitudinal,
                LoadTriple::new(250.0, 88.62, 0.0),
            )
            .with_case(
                LoadKind::Working,
                LoadCaseName::MaxTransversal,
                LoadTriple::new(250.0, 0.0, 88.62),
            );
        let physics = ScriptedPhysics {
            q_ult_net_kpa: 1263.38,
            q_max_kpa: 188.56,
            q_min_kpa: 20.0,
            elastic_m: 0.01,
            consolidation_m: 0.02,
            driving_kn_m: 1099.3,
            resisting_kn_m: 2726.29,
            lateral_kn: 1507.46,
            t_ultimate_kn: 358.0,
            volume_m3: 14.0,
            backfill_volume_m3: 22.0,
            seen_q_admissible: Cell::new(None),
        };

        let evaluator = StabilityEvaluator::new(&config);
        let report = evaluator
            .evaluate(&physics, &profile, &footing, &loads)
            .unwrap();

        let bearing = report.get(CheckId::Bearing);
        assert!((bearing.factor_of_safety.unwrap() - 6.70).abs() < 0.005);

        let uplift = report.get(CheckId::Uplift);
        assert!((uplift.factor_of_safety.unwrap() - 3.58).abs() < 0.005);
        // granular column: threshold 1.5
        assert!(uplift.compliant);

        let sliding = report.get(CheckId::Sliding);
        assert!((sliding.factor_of_safety.unwrap() - 17.01).abs() < 0.005);

        let overturning = report.get(CheckId::Overturning);
        assert!((overturning.factor_of_safety.unwrap() - 2.48).abs() < 0.005);

        assert!(report.compliant());
        assert_eq!(report.failing_count(), 0);
        assert_eq!(report.deviation_norm(), 0.0);
        assert!(!report.saturated);
    }

    #[test]
    fn test_bearing_snap_rescues_borderline_case() {
        let config = reference_config();
        let profile = dry_profile();
        let mut footing = wet_fixture_footing();
        footing.width_m = 3.0;
        footing.length_m = 3.0;
        footing.depth_m = 3.0;
        footing.embedment_m = 3.0;
        let loads = wet_fixture_loads();
        // fs_raw = 296/100 = 2.96, inside the 0.05 snap band below 3.0
        let physics = ScriptedPhysics {
            q_ult_net_kpa: 296.0,
            q_max_kpa: 100.0,
            q_min_kpa: 1.0,
            elastic_m: 0.001,
            consolidation_m: 0.001,
            driving_kn_m: 100.0,
            resisting_kn_m: 400.0,
            lateral_kn: 900.0,
            t_ultimate_kn: 400.0,
            volume_m3: 10.0,
            backfill_volume_m3: 10.0,
            seen_q_admissible: Cell::new(None),
        };

        let evaluator = StabilityEvaluator::new(&config);
        let report = evaluator
            .evaluate(&physics, &profile, &footing, &loads)
            .unwrap();

        let bearing = report.get(CheckId::Bearing);
        assert_eq!(bearing.factor_of_safety.unwrap(), 3.0);
        assert!(bearing.compliant);
        assert_eq!(bearing.deviation, 0.0);
    }

    #[test]
    fn test_base_lift_off_fails_bearing_despite_margin() {
        let config = reference_config();
        let profile = dry_profile();
        let mut footing = wet_fixture_footing();
        footing.width_m = 3.0;
        footing.length_m = 3.0;
        footing.depth_m = 3.0;
        footing.embedment_m = 3.0;
        let loads = wet_fixture_loads();
        let physics = ScriptedPhysics {
            q_ult_net_kpa: 900.0,
            q_max_kpa: 100.0,
            q_min_kpa: -4.0,
            elastic_m: 0.001,
            consolidation_m: 0.001,
            driving_kn_m: 100.0,
            resisting_kn_m: 400.0,
            lateral_kn: 900.0,
            t_ultimate_kn: 400.0,
            volume_m3: 10.0,
            backfill_volume_m3: 10.0,
            seen_q_admissible: Cell::new(None),
        };

        let evaluator = StabilityEvaluator::new(&config);
        let report = evaluator
            .evaluate(&physics, &profile, &footing, &loads)
            .unwrap();

        let bearing = report.get(CheckId::Bearing);
        assert!(bearing.factor_of_safety.unwrap() > config.fsc);
        assert!(!bearing.compliant);
        // a failing check with positive margin contributes nothing to the norm
        assert_eq!(report.deviation_norm(), 0.0);
        assert_eq!(report.failing_count(), 1);
    }

    #[test]
    fn test_settlement_over_limit_fails_with_negative_deviation() {
        let config = reference_config();
        let profile = dry_profile();
        let mut footing = wet_fixture_footing();
        footing.width_m = 3.0;
        footing.length_m = 3.0;
        footing.depth_m = 3.0;
        footing.embedment_m = 3.0;
        let loads = wet_fixture_loads();
        // granular window: limit 0.05 m, total 0.08 m
        let physics = ScriptedPhysics {
            q_ult_net_kpa: 900.0,
            q_max_kpa: 100.0,
            q_min_kpa: 10.0,
            elastic_m: 0.03,
            consolidation_m: 0.05,
            driving_kn_m: 100.0,
            resisting_kn_m: 400.0,
            lateral_kn: 900.0,
            t_ultimate_kn: 400.0,
            volume_m3: 10.0,
            backfill_volume_m3: 10.0,
            seen_q_admissible: Cell::new(None),
        };

        let evaluator = StabilityEvaluator::new(&config);
        let report = evaluator
            .evaluate(&physics, &profile, &footing, &loads)
            .unwrap();

        let settlement = report.get(CheckId::Settlement);
        assert!(!settlement.compliant);
        assert!((settlement.deviation - (0.05 - 0.08) / 0.05).abs() < 1e-9);
        assert!(report.deviation_norm() > 0.0);
    }

    #[test]
    fn test_settlement_window_past_profile_bottom_is_fatal() {
        let config = reference_config();
        let profile = dry_profile(); // 10 m deep
        let mut footing = wet_fixture_footing();
        footing.depth_m = 4.0;
        footing.width_m = 3.8; // window [4, 11.6] exceeds the column
        let loads = wet_fixture_loads();
        let physics = ScriptedPhysics {
            q_ult_net_kpa: 900.0,
            q_max_kpa: 100.0,
            q_min_kpa: 10.0,
            elastic_m: 0.01,
            consolidation_m: 0.01,
            driving_kn_m: 100.0,
            resisting_kn_m: 400.0,
            lateral_kn: 900.0,
            t_ultimate_kn: 400.0,
            volume_m3: 10.0,
            backfill_volume_m3: 10.0,
            seen_q_admissible: Cell::new(None),
        };

        let evaluator = StabilityEvaluator::new(&config);
        let err = evaluator
            .evaluate(&physics, &profile, &footing, &loads)
            .unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DEPTH");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_report_serialization() {
        let config = reference_config();
        let profile = dry_profile();
        let mut footing = wet_fixture_footing();
        footing.depth_m = 3.0;
        footing.embedment_m = 3.0;
        footing.width_m = 3.0;
        let loads = wet_fixture_loads();
        let physics = ScriptedPhysics {
            q_ult_net_kpa: 900.0,
            q_max_kpa: 100.0,
            q_min_kpa: 10.0,
            elastic_m: 0.01,
            consolidation_m: 0.01,
            driving_kn_m: 100.0,
            resisting_kn_m: 400.0,
            lateral_kn: 900.0,
            t_ultimate_kn: 400.0,
            volume_m3: 10.0,
            backfill_volume_m3: 10.0,
            seen_q_admissible: Cell::new(None),
        };

        let evaluator = StabilityEvaluator::new(&config);
        let report = evaluator
            .evaluate(&physics, &profile, &footing, &loads)
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let roundtrip: StabilityReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, roundtrip);
    }
}
