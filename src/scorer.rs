//! Confidence scoring
//!
//! Reduces an accepted-run population to a single bounded score. The
//! weighted sum intentionally exceeds 1.0 before clamping (weights total
//! 1.3); the score is a saturating heuristic, not a probability.

use crate::detector::PatternKind;
use crate::types::RunSet;

/// Weight of the accepted-gap density term
pub const DENSITY_WEIGHT: f64 = 0.3;
/// Weight of the large-run fraction term
pub const LARGE_RUN_WEIGHT: f64 = 0.4;
/// Weight of the normalized mean run length term
pub const MEAN_LENGTH_WEIGHT: f64 = 0.3;
/// Weight of the normalized max run length term
pub const MAX_LENGTH_WEIGHT: f64 = 0.3;

/// Normalization constants for run-length terms, per pattern kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreNorms {
    pub mean_norm: f64,
    pub max_norm: f64,
}

impl ScoreNorms {
    pub fn for_kind(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Jump => Self { mean_norm: 7.0, max_norm: 8.0 },
            PatternKind::Stream => Self { mean_norm: 7.0, max_norm: 13.0 },
        }
    }
}

/// Run-population to confidence-score reducer
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Accepted-gap density: sum of accepted run lengths over the map's
    /// hit object count. Zero for an empty map, never a division fault.
    pub fn density(runs: &RunSet, hit_object_count: usize) -> f64 {
        if hit_object_count == 0 {
            0.0
        } else {
            runs.total_gaps() as f64 / hit_object_count as f64
        }
    }

    /// Clamped confidence score for one pattern kind.
    ///
    /// All terms are non-negative, so only the upper bound needs clamping.
    pub fn confidence(runs: &RunSet, hit_object_count: usize, kind: PatternKind) -> f64 {
        if hit_object_count == 0 {
            return 0.0;
        }

        let norms = ScoreNorms::for_kind(kind);
        let density = Self::density(runs, hit_object_count);
        let large_fraction = if runs.accepted() == 0 {
            0.0
        } else {
            f64::from(runs.large_runs) / runs.accepted() as f64
        };
        let mean_term = (runs.mean_length() / norms.mean_norm).min(1.0);
        let max_term = (f64::from(runs.max_length()) / norms.max_norm).min(1.0);

        let score = density * DENSITY_WEIGHT
            + large_fraction * LARGE_RUN_WEIGHT
            + mean_term * MEAN_LENGTH_WEIGHT
            + max_term * MAX_LENGTH_WEIGHT;

        score.min(1.0)
    }
}
