//! # Search Optimizer
//!
//! Enumerates footing (width, depth) pairs on the decimeter grid, adjusts
//! each candidate for rock intrusion and water saturation, evaluates every
//! configured pedestal height, aggregates pessimistically and retains the
//! ranked result set.
//!
//! Each (B, D) iteration owns a private copy of the soil profile, so the
//! in-place rock extension never aliases state across iterations.

use crate::config::SearchConfig;
use crate::errors::{DesignError, DesignResult};
use crate::evaluate::{CheckId, StabilityEvaluator, StabilityReport};
use crate::loads::LoadProvider;
use crate::physics::{FootingGeometry, PhysicsFactory};
use crate::search::candidate::{classify, CandidateSolution, Score};
use crate::soil::Profile;
use crate::tower::Tower;
use crate::units::{ceil_to_decimeter, decimeter_series, GAMMA_WATER};

/// Grid comparison tolerance (m).
const EPS: f64 = 1e-9;

/// Grid-search optimizer for spread-footing geometry.
pub struct Optimizer<'a> {
    config: &'a SearchConfig,
}

impl<'a> Optimizer<'a> {
    /// Create an optimizer borrowing the search configuration.
    pub fn new(config: &'a SearchConfig) -> Self {
        Optimizer { config }
    }

    /// Find admissible (or least-non-compliant) footing geometries for one
    /// tower.
    ///
    /// Returns the ranked candidate list, best first. An empty depth window
    /// yields a single degraded candidate rather than an error; only
    /// malformed inputs and profile-depth exhaustion abort the run.
    pub fn search(
        &self,
        tower: &Tower,
        profile: &Profile,
        loads: &dyn LoadProvider,
        physics: &dyn PhysicsFactory,
    ) -> DesignResult<Vec<CandidateSolution>> {
        let config = self.config;
        config.validate()?;
        tower.validate()?;

        let tp_m = config
            .pedestal_side_m
            .unwrap_or_else(|| tower.pedestal_side_m(config.rebar_cover_m));
        let thickness_m = if config.use_configured_thickness {
            config.thickness_m
        } else {
            config.thickness_m.max(tp_m / 2.0)
        };

        let b_min = ceil_to_decimeter(config.b_min_m);
        let b_max = ceil_to_decimeter(config.b_max_m);
        let b_ceiling = config.b_extra_m.map(ceil_to_decimeter).unwrap_or(b_max);

        let d_min_site = match tower.min_depth_m {
            Some(site_min) => config.d_min_m.max(site_min),
            None => config.d_min_m,
        };
        let d_min = ceil_to_decimeter(d_min_site);
        let d_max = ceil_to_decimeter(config.d_max_m);
        if d_min > d_max + EPS {
            let err = DesignError::infeasible_range(d_min, d_max);
            return Ok(vec![CandidateSolution::degraded(
                b_min,
                d_min,
                Vec::new(),
                err.to_string(),
            )]);
        }

        let pedestal_heights = merged_pedestal_heights(
            &config.pedestal_heights_m,
            &tower.extra_pedestal_heights_m,
        );
        let rock_contact_m = profile.rock_depth_m();
        let evaluator = StabilityEvaluator::new(config);

        let mut candidates: Vec<CandidateSolution> = Vec::new();
        let mut found_compliant = false;

        let mut step_index = 0usize;
        loop {
            let b = on_grid(b_min + config.b_step_m * step_index as f64);
            step_index += 1;
            if b > b_ceiling + EPS || (b > b_max + EPS && found_compliant) {
                break;
            }

            for d in decimeter_series(d_min, d_max, config.d_step_m) {
                let mut depth_m = d;
                let mut working = profile.clone();
                let mut rock_entered = false;

                if let Some(contact) = rock_contact_m {
                    let penetration = d - contact;
                    if penetration > config.rock_max_penetration_m + EPS {
                        let err = DesignError::rock_penetration(
                            penetration,
                            config.rock_max_penetration_m,
                        );
                        candidates = classify(
                            candidates,
                            CandidateSolution::degraded(
                                b,
                                d,
                                pedestal_heights.clone(),
                                err.to_string(),
                            ),
                            config.retention,
                        );
                        break;
                    }
                    if penetration > EPS {
                        let effective = if penetration <= config.rock_attraction_m + EPS {
                            penetration.max(config.rock_min_penetration_m)
                        } else {
                            penetration
                        };
                        depth_m = contact + effective;
                        working = working.with_rock_extension(effective)?;
                        rock_entered = true;
                    }
                }

                if working
                    .water_level_m()
                    .map(|level| level < depth_m - EPS)
                    .unwrap_or(false)
                {
                    working = working.clone_saturated();
                }
                let submerged = working
                    .water_level_m()
                    .map(|level| level < depth_m - EPS)
                    .unwrap_or(false);
                let concrete_kn_m3 = if submerged {
                    config.unit_weight_concrete_kn_m3 - GAMMA_WATER
                } else {
                    config.unit_weight_concrete_kn_m3
                };

                let mut reports: Vec<StabilityReport> = Vec::new();
                let mut errors: Vec<String> = Vec::new();
                for &hg in &pedestal_heights {
                    let embedment_m = depth_m + hg - thickness_m;
                    let cover_m = embedment_m - tower.stub_depth_m;
                    if cover_m < config.stub_cover_min_m - EPS {
                        let err = DesignError::stub_clearance(cover_m, config.stub_cover_min_m);
                        errors.push(format!("HG {hg:.2}: {err}"));
                        continue;
                    }

                    let footing = FootingGeometry {
                        width_m: b,
                        length_m: b,
                        depth_m,
                        thickness_m,
                        embedment_m,
                        pedestal_side_m: tp_m,
                        pedestal_tilt_deg: tower.stub_tilt_deg,
                        unit_weight_concrete_kn_m3: concrete_kn_m3,
                        base_tilt_deg: config.base_tilt_deg,
                        terrain_tilt_deg: config.terrain_tilt_deg,
                    };
                    let outcome = physics.build(&footing, &working).and_then(|oracle| {
                        evaluator.evaluate(oracle.as_ref(), &working, &footing, loads)
                    });
                    match outcome {
                        Ok(report) => reports.push(report),
                        Err(err @ DesignError::InsufficientDepth { .. }) => return Err(err),
                        Err(err) => errors.push(format!("HG {hg:.2}: {err}")),
                    }
                }

                let candidate =
                    aggregate_candidate(b, depth_m, &pedestal_heights, reports, errors);
                found_compliant |= candidate.compliant;
                candidates = classify(candidates, candidate, config.retention);

                // all deeper bases for this width sit further into rock
                if rock_entered {
                    break;
                }
            }
        }

        Ok(candidates)
    }
}

/// Re-anchor an accumulated step value on the micro grid.
fn on_grid(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Merge the configured pedestal heights with a tower's non-standard ones,
/// de-duplicated and sorted ascending.
fn merged_pedestal_heights(standard: &[f64], extra: &[f64]) -> Vec<f64> {
    let mut merged: Vec<f64> = Vec::with_capacity(standard.len() + extra.len());
    for &hg in standard.iter().chain(extra.iter()) {
        if !merged.iter().any(|&seen| (seen - hg).abs() < EPS) {
            merged.push(hg);
        }
    }
    merged.sort_by(f64::total_cmp);
    merged
}

/// Pessimistic union across pedestal heights.
///
/// Per check the least favorable outcome wins; volumes take the worst-case
/// maximum; saturation, settlement metrics and backfill composition are
/// geometry-invariant across pedestal heights and come from the first
/// evaluated one. Any per-height error degrades the whole aggregate.
fn aggregate_candidate(
    width_m: f64,
    depth_m: f64,
    pedestal_heights_m: &[f64],
    reports: Vec<StabilityReport>,
    errors: Vec<String>,
) -> CandidateSolution {
    let error = !errors.is_empty();
    let error_message = if error {
        Some(errors.join("; "))
    } else {
        None
    };

    let mut iter = reports.into_iter();
    let Some(mut aggregate) = iter.next() else {
        return CandidateSolution::degraded(
            width_m,
            depth_m,
            pedestal_heights_m.to_vec(),
            error_message.unwrap_or_else(|| "No pedestal height could be evaluated".to_string()),
        );
    };

    for report in iter {
        for id in CheckId::ALL {
            if report.get(id).less_favorable_than(aggregate.get(id)) {
                aggregate.outcomes[id.index()] = report.get(id).clone();
            }
        }
        aggregate.volume_m3 = aggregate.volume_m3.max(report.volume_m3);
        aggregate.backfill_volume_m3 =
            aggregate.backfill_volume_m3.max(report.backfill_volume_m3);
    }

    let compliant = aggregate.compliant() && !error;
    let score = if error {
        Score::worst()
    } else if aggregate.failing_count() > 0 {
        Score::non_compliant(aggregate.failing_count(), aggregate.deviation_norm())
    } else {
        Score::compliant(aggregate.weighted_volume_m3())
    };

    CandidateSolution {
        width_m,
        depth_m,
        pedestal_heights_m: pedestal_heights_m.to_vec(),
        report: Some(aggregate),
        error,
        error_message,
        compliant,
        score,
    }
}
