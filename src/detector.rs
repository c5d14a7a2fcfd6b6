//! Pattern run detection
//!
//! Two independent linear scans over the same gap sequence, one per pattern
//! kind. Each scan is a streaming run-length encoder: a counter of
//! consecutive predicate-satisfying gaps, closed on the first failing gap or
//! at end of sequence, with a minimum-length acceptance gate and a size
//! classification table. Runs below the minimum are discarded entirely.

use serde::{Deserialize, Serialize};

use crate::types::{Gap, RunClass, RunSet};

/// Minimum spatial distance for a gap to read as a jump (playfield units)
pub const JUMP_DISTANCE_THRESHOLD: f64 = 120.0;
/// A jump gap must land within this many beats
pub const JUMP_BEAT_THRESHOLD: f64 = 1.0;
/// A stream gap must land within this many beats (16th notes)
pub const STREAM_BEAT_THRESHOLD: f64 = 0.25;

/// The two pattern kinds the detector scans for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Jump,
    Stream,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Jump => "jump",
            PatternKind::Stream => "stream",
        }
    }

    /// Shortest run the scan accepts.
    pub fn min_run_length(&self) -> u32 {
        match self {
            PatternKind::Jump => 4,
            PatternKind::Stream => 3,
        }
    }

    /// Size class of a closed run, `None` when it falls below the
    /// acceptance gate. Cutoffs are exact lower bounds.
    pub fn classify(&self, length: u32) -> Option<RunClass> {
        match self {
            PatternKind::Jump => match length {
                l if l >= 12 => Some(RunClass::Large),
                l if l >= 8 => Some(RunClass::Medium),
                l if l >= 4 => Some(RunClass::Small),
                _ => None,
            },
            PatternKind::Stream => match length {
                l if l >= 19 => Some(RunClass::Large),
                l if l >= 13 => Some(RunClass::Medium),
                l if l >= 7 => Some(RunClass::Small),
                l if l >= 3 => Some(RunClass::Mini),
                _ => None,
            },
        }
    }

    /// Whether a gap satisfies this kind's predicate. A gap with no
    /// resolved beat length never matches; a tempo-less map reports zero
    /// pattern confidence.
    pub fn matches(&self, gap: &Gap) -> bool {
        let Some(beat_length) = gap.beat_length else {
            return false;
        };
        match self {
            PatternKind::Jump => {
                gap.distance > JUMP_DISTANCE_THRESHOLD
                    && gap.time_delta < JUMP_BEAT_THRESHOLD * beat_length
            }
            PatternKind::Stream => gap.time_delta < STREAM_BEAT_THRESHOLD * beat_length,
        }
    }
}

/// Run-length scanner over a gap sequence
pub struct PatternDetector;

impl PatternDetector {
    /// Scan the gap sequence for one pattern kind.
    pub fn scan(gaps: &[Gap], kind: PatternKind) -> RunSet {
        let mut runs = RunSet::default();
        let mut current: u32 = 0;

        for gap in gaps {
            if kind.matches(gap) {
                current += 1;
            } else {
                close_run(&mut runs, kind, current);
                current = 0;
            }
        }
        // A run still open at the end closes exactly like an interior one.
        close_run(&mut runs, kind, current);

        runs
    }

    pub fn scan_jumps(gaps: &[Gap]) -> RunSet {
        Self::scan(gaps, PatternKind::Jump)
    }

    pub fn scan_streams(gaps: &[Gap]) -> RunSet {
        Self::scan(gaps, PatternKind::Stream)
    }
}

fn close_run(runs: &mut RunSet, kind: PatternKind, length: u32) {
    if let Some(class) = kind.classify(length) {
        runs.add(length, class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jump_gap() -> Gap {
        Gap { distance: 200.0, time_delta: 300.0, beat_length: Some(400.0) }
    }

    fn quiet_gap() -> Gap {
        Gap { distance: 10.0, time_delta: 900.0, beat_length: Some(400.0) }
    }

    fn stream_gap() -> Gap {
        Gap { distance: 20.0, time_delta: 90.0, beat_length: Some(400.0) }
    }

    #[test]
    fn test_four_jump_gaps_then_break_yield_one_small_run() {
        let mut gaps = vec![jump_gap(); 4];
        gaps.push(quiet_gap());

        let runs = PatternDetector::scan_jumps(&gaps);
        assert_eq!(runs.lengths, vec![4]);
        assert_eq!(runs.small_runs, 1);
        assert_eq!(runs.medium_runs, 0);
    }

    #[test]
    fn test_three_jump_gaps_are_discarded() {
        let mut gaps = vec![jump_gap(); 3];
        gaps.push(quiet_gap());

        let runs = PatternDetector::scan_jumps(&gaps);
        assert_eq!(runs.accepted(), 0);
        assert_eq!(runs.total_gaps(), 0);
    }

    #[test]
    fn test_run_open_at_end_of_sequence_is_closed() {
        let gaps = vec![jump_gap(); 9];
        let runs = PatternDetector::scan_jumps(&gaps);
        assert_eq!(runs.lengths, vec![9]);
        assert_eq!(runs.medium_runs, 1);
    }

    #[test]
    fn test_two_separate_runs() {
        let mut gaps = vec![jump_gap(); 12];
        gaps.push(quiet_gap());
        gaps.extend(vec![jump_gap(); 5]);

        let runs = PatternDetector::scan_jumps(&gaps);
        assert_eq!(runs.lengths, vec![12, 5]);
        assert_eq!(runs.large_runs, 1);
        assert_eq!(runs.small_runs, 1);
    }

    #[test]
    fn test_jump_requires_distance() {
        // Fast but close together: a stream, not a jump.
        let gaps = vec![Gap { distance: 50.0, time_delta: 90.0, beat_length: Some(400.0) }; 6];
        assert_eq!(PatternDetector::scan_jumps(&gaps).accepted(), 0);
        assert_eq!(PatternDetector::scan_streams(&gaps).lengths, vec![6]);
    }

    #[test]
    fn test_stream_threshold_is_strict() {
        // beat_length 40 => stream threshold exactly 10 ms; a delta equal to
        // the threshold fails the `<` predicate, so no gap ever matches.
        let gaps: Vec<Gap> = [10.0, 10.0, 10.0, 10.0, 10.0, 400.0]
            .iter()
            .map(|&dt| Gap { distance: 5.0, time_delta: dt, beat_length: Some(40.0) })
            .collect();

        let runs = PatternDetector::scan_streams(&gaps);
        assert_eq!(runs.accepted(), 0);
    }

    #[test]
    fn test_stream_just_under_threshold_matches() {
        let mut gaps = vec![Gap { distance: 5.0, time_delta: 9.9, beat_length: Some(40.0) }; 5];
        gaps.push(Gap { distance: 5.0, time_delta: 400.0, beat_length: Some(40.0) });

        let runs = PatternDetector::scan_streams(&gaps);
        assert_eq!(runs.lengths, vec![5]);
        assert_eq!(runs.mini_runs, 1);
    }

    #[test]
    fn test_unresolved_beat_length_never_matches() {
        let gaps = vec![Gap { distance: 300.0, time_delta: 1.0, beat_length: None }; 20];
        assert_eq!(PatternDetector::scan_jumps(&gaps).accepted(), 0);
        assert_eq!(PatternDetector::scan_streams(&gaps).accepted(), 0);
    }

    #[test]
    fn test_jump_classification_table() {
        let kind = PatternKind::Jump;
        assert_eq!(kind.classify(3), None);
        assert_eq!(kind.classify(4), Some(RunClass::Small));
        assert_eq!(kind.classify(7), Some(RunClass::Small));
        assert_eq!(kind.classify(8), Some(RunClass::Medium));
        assert_eq!(kind.classify(11), Some(RunClass::Medium));
        assert_eq!(kind.classify(12), Some(RunClass::Large));
    }

    #[test]
    fn test_stream_classification_table() {
        let kind = PatternKind::Stream;
        assert_eq!(kind.classify(2), None);
        assert_eq!(kind.classify(3), Some(RunClass::Mini));
        assert_eq!(kind.classify(6), Some(RunClass::Mini));
        assert_eq!(kind.classify(7), Some(RunClass::Small));
        assert_eq!(kind.classify(12), Some(RunClass::Small));
        assert_eq!(kind.classify(13), Some(RunClass::Medium));
        assert_eq!(kind.classify(18), Some(RunClass::Medium));
        assert_eq!(kind.classify(19), Some(RunClass::Large));
    }

    #[test]
    fn test_empty_gap_sequence() {
        let runs = PatternDetector::scan(&[], PatternKind::Jump);
        assert_eq!(runs, RunSet::default());
    }
}
