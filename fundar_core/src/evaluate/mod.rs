//! # Stability Checks
//!
//! The fixed battery of geotechnical checks a candidate footing must pass:
//! bearing capacity, uplift, settlement, overturning and sliding. Checks are
//! identified by the closed [`CheckId`] enum and their outcomes live in a
//! fixed-size array inside [`StabilityReport`](stability::StabilityReport),
//! so a missing or misspelled check is a compile error rather than a failed
//! map lookup.
//!
//! Factor-of-safety values sitting a rounding error below their threshold
//! are snapped up by [`fs_snap`]; the tolerance is check-specific.

pub mod stability;

use serde::{Deserialize, Serialize};

use crate::physics::Trace;

pub use stability::{StabilityEvaluator, StabilityReport};

/// Snap tolerance for the bearing-capacity factor of safety.
pub const BEARING_SNAP_TOL: f64 = 0.05;

/// Snap tolerance for the uplift factor of safety.
pub const UPLIFT_SNAP_TOL: f64 = 0.01;

/// Snap tolerance for the overturning factor of safety.
pub const OVERTURNING_SNAP_TOL: f64 = 0.02;

/// Snap tolerance for the sliding factor of safety.
pub const SLIDING_SNAP_TOL: f64 = 0.01;

/// Identifier of one stability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckId {
    /// Ultimate bearing capacity and base pressure distribution
    Bearing,
    /// Uplift (tension) capacity
    Uplift,
    /// Immediate plus consolidation settlement
    Settlement,
    /// Overturning about the base edge
    Overturning,
    /// Sliding along the base
    Sliding,
}

impl CheckId {
    /// Number of checks in the battery
    pub const COUNT: usize = 5;

    /// All checks, in evaluation order
    pub const ALL: [CheckId; CheckId::COUNT] = [
        CheckId::Bearing,
        CheckId::Uplift,
        CheckId::Settlement,
        CheckId::Overturning,
        CheckId::Sliding,
    ];

    /// Position in the outcome array
    pub fn index(&self) -> usize {
        match self {
            CheckId::Bearing => 0,
            CheckId::Uplift => 1,
            CheckId::Settlement => 2,
            CheckId::Overturning => 3,
            CheckId::Sliding => 4,
        }
    }

    /// Short lowercase code
    pub fn code(&self) -> &'static str {
        match self {
            CheckId::Bearing => "bearing",
            CheckId::Uplift => "uplift",
            CheckId::Settlement => "settlement",
            CheckId::Overturning => "overturning",
            CheckId::Sliding => "sliding",
        }
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Outcome of one stability check.
///
/// `deviation` is the normalized signed distance from the compliance
/// threshold: 0 means exactly at the threshold, negative means the check
/// fails. Settlement carries no factor of safety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Factor of safety after snapping, when the check defines one
    pub factor_of_safety: Option<f64>,

    /// Whether the check passes
    pub compliant: bool,

    /// Normalized signed distance from the threshold
    pub deviation: f64,

    /// Opaque calculation trace for reporting
    pub trace: Trace,
}

impl CheckOutcome {
    /// Whether this outcome ranks as less favorable than `other`.
    ///
    /// Smaller deviation loses; on equal deviation a non-compliant outcome
    /// dominates a compliant one.
    pub fn less_favorable_than(&self, other: &CheckOutcome) -> bool {
        if self.deviation != other.deviation {
            self.deviation < other.deviation
        } else {
            !self.compliant && other.compliant
        }
    }
}

/// Snap a factor of safety sitting just below its threshold up to the
/// threshold: `threshold if 0 < threshold - fs <= tolerance else fs`.
///
/// Absorbs floating-point noise that would otherwise flip a borderline
/// pass into a fail. Idempotent.
pub fn fs_snap(fs: f64, threshold: f64, tolerance: f64) -> f64 {
    let gap = threshold - fs;
    if gap > 0.0 && gap <= tolerance {
        threshold
    } else {
        fs
    }
}
