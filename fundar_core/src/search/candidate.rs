//! # Ranked Candidates
//!
//! One evaluated (width, depth) pair becomes a [`CandidateSolution`] with a
//! lexicographic [`Score`], and candidates enter the result set through the
//! pure [`classify`] function so the ranking invariant is testable on its
//! own.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::RetentionPolicy;
use crate::evaluate::StabilityReport;

/// Depth identity tolerance for the best-per-depth policy (m).
const DEPTH_EPS: f64 = 1e-9;

/// Lexicographic ranking key: failing check count first, then a magnitude.
///
/// For a non-compliant candidate the magnitude is the Euclidean norm of the
/// failing deviations; for a compliant one it is the caller-supplied
/// weighting metric (material take-off volume). A compliant candidate
/// (failing = 0) therefore never ranks behind a non-compliant one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Score {
    /// Number of failing checks (u32::MAX for error candidates)
    pub failing: u32,
    /// Deviation norm, or the weighting metric when nothing fails
    pub magnitude: f64,
}

impl Score {
    /// Score of a fully compliant candidate
    pub fn compliant(metric: f64) -> Self {
        Score {
            failing: 0,
            magnitude: metric,
        }
    }

    /// Score of a candidate failing `failing` checks
    pub fn non_compliant(failing: u32, deviation_norm: f64) -> Self {
        Score {
            failing,
            magnitude: deviation_norm,
        }
    }

    /// Score ranking strictly behind every evaluated candidate.
    ///
    /// `f64::MAX` rather than infinity keeps the score JSON-representable.
    pub fn worst() -> Self {
        Score {
            failing: u32::MAX,
            magnitude: f64::MAX,
        }
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.failing
            .cmp(&other.failing)
            .then_with(|| self.magnitude.total_cmp(&other.magnitude))
    }
}

/// One ranked entry of the search result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSolution {
    /// Footing width B (m)
    pub width_m: f64,

    /// Footing depth D (m), after any rock attraction raise
    pub depth_m: f64,

    /// Pedestal heights evaluated for this footing (m)
    pub pedestal_heights_m: Vec<f64>,

    /// Aggregated check outcomes; None when no pedestal height evaluated
    pub report: Option<StabilityReport>,

    /// Whether any pedestal height ended in an error
    pub error: bool,

    /// Joined error messages, when degraded
    pub error_message: Option<String>,

    /// Every check passes and no error occurred
    pub compliant: bool,

    /// Ranking key
    pub score: Score,
}

impl CandidateSolution {
    /// Build a degraded candidate carrying only an error message.
    pub fn degraded(
        width_m: f64,
        depth_m: f64,
        pedestal_heights_m: Vec<f64>,
        message: impl Into<String>,
    ) -> Self {
        CandidateSolution {
            width_m,
            depth_m,
            pedestal_heights_m,
            report: None,
            error: true,
            error_message: Some(message.into()),
            compliant: false,
            score: Score::worst(),
        }
    }
}

/// Insert a candidate into an ordered result set under a retention policy.
///
/// The input must be sorted ascending by score; the output is too. Equal
/// scores keep their insertion order.
pub fn classify(
    mut candidates: Vec<CandidateSolution>,
    candidate: CandidateSolution,
    policy: RetentionPolicy,
) -> Vec<CandidateSolution> {
    match policy {
        RetentionPolicy::BestPerDepth => {
            if let Some(pos) = candidates
                .iter()
                .position(|c| (c.depth_m - candidate.depth_m).abs() < DEPTH_EPS)
            {
                if candidate.score < candidates[pos].score {
                    candidates.remove(pos);
                } else {
                    return candidates;
                }
            }
            insert_sorted(&mut candidates, candidate);
        }
        RetentionPolicy::TopN(n) => {
            if candidates.len() >= n {
                match candidates.last() {
                    Some(worst) if candidate.score < worst.score => {
                        candidates.pop();
                        insert_sorted(&mut candidates, candidate);
                    }
                    _ => {}
                }
            } else {
                insert_sorted(&mut candidates, candidate);
            }
        }
    }
    candidates
}

fn insert_sorted(candidates: &mut Vec<CandidateSolution>, candidate: CandidateSolution) {
    let pos = candidates
        .partition_point(|c| c.score <= candidate.score);
    candidates.insert(pos, candidate);
}
