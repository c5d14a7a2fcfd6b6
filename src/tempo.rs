//! Tempo resolution
//!
//! For every gap between adjacent hit objects, resolves the single beat
//! length that governs timing judgments at that gap. Inherited timing points
//! (non-positive beat length) carry no tempo of their own and are excluded.
//!
//! Resolution rule, per gap i: the earliest tempo-defining point strictly
//! after `hit_objects[i].time` governs the gap; if the object occurs after
//! all tempo-defining points, the last one in the file governs; if the map
//! has no tempo-defining point at all, the gap is unresolved and every
//! pattern predicate over it is false.

use crate::types::{Gap, HitObject, TimingPoint};

/// Tempo resolver over the time-sorted timing point and hit object sequences
pub struct TempoTrack;

impl TempoTrack {
    /// Resolve the governing beat length for each of the `N-1` gaps.
    ///
    /// Both inputs are time-sorted, so the lookup is a single linear merge:
    /// the candidate index only ever moves forward as gaps advance.
    pub fn resolve(timing_points: &[TimingPoint], hit_objects: &[HitObject]) -> Vec<Option<f64>> {
        let gap_count = hit_objects.len().saturating_sub(1);

        let tempo_points: Vec<&TimingPoint> = timing_points
            .iter()
            .filter(|t| t.is_tempo_defining())
            .collect();

        let Some(last) = tempo_points.last() else {
            return vec![None; gap_count];
        };
        let fallback = last.beat_length;

        let mut resolved = Vec::with_capacity(gap_count);
        let mut next = 0;

        for obj in &hit_objects[..gap_count] {
            while next < tempo_points.len() && tempo_points[next].time <= obj.time as f64 {
                next += 1;
            }
            let beat_length = match tempo_points.get(next) {
                Some(t) => t.beat_length,
                None => fallback,
            };
            resolved.push(Some(beat_length));
        }

        resolved
    }

    /// Build the gap sequence, pairing each adjacent hit object pair with
    /// its resolved beat length.
    pub fn gaps(timing_points: &[TimingPoint], hit_objects: &[HitObject]) -> Vec<Gap> {
        let beat_lengths = Self::resolve(timing_points, hit_objects);

        hit_objects
            .windows(2)
            .zip(beat_lengths)
            .map(|(pair, beat_length)| Gap::between(&pair[0], &pair[1], beat_length))
            .collect()
    }
}
