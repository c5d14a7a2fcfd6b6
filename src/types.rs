//! Core types for the mapscope pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: parsed beatmap entities, inter-note gaps, pattern run sets, and
//! the final feature record.

use serde::{Deserialize, Serialize};

/// Sentinel for a difficulty attribute absent from the file
pub const ABSENT_ATTRIBUTE: f64 = -1.0;

/// A tempo/meter declaration effective from `time` forward.
///
/// A positive `beat_length` defines a tempo (milliseconds per beat). A
/// non-positive `beat_length` marks an inherited point, which carries no
/// independent tempo and is excluded from tempo resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    /// Effective time (ms)
    pub time: f64,
    /// Milliseconds per beat; non-positive = inherited
    pub beat_length: f64,
    /// Beats per measure
    pub meter: i32,
}

impl TimingPoint {
    /// Whether this point defines a tempo of its own.
    pub fn is_tempo_defining(&self) -> bool {
        self.beat_length > 0.0
    }
}

/// Difficulty settings parsed from the `[Difficulty]` section.
///
/// Every attribute falls back to [`ABSENT_ATTRIBUTE`] when its key is
/// missing; absence is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAttributes {
    pub hp_drain: f64,
    pub circle_size: f64,
    pub overall_difficulty: f64,
    pub approach_rate: f64,
    pub slider_multiplier: f64,
    pub slider_tick_rate: f64,
}

impl Default for DifficultyAttributes {
    fn default() -> Self {
        Self {
            hp_drain: ABSENT_ATTRIBUTE,
            circle_size: ABSENT_ATTRIBUTE,
            overall_difficulty: ABSENT_ATTRIBUTE,
            approach_rate: ABSENT_ATTRIBUTE,
            slider_multiplier: ABSENT_ATTRIBUTE,
            slider_tick_rate: ABSENT_ATTRIBUTE,
        }
    }
}

/// Object type bit: hit circle
pub const TYPE_HIT_CIRCLE: u32 = 1 << 0;
/// Object type bit: slider
pub const TYPE_SLIDER: u32 = 1 << 1;
/// Object type bit: spinner
pub const TYPE_SPINNER: u32 = 1 << 3;

/// A single timed, positioned gameplay target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitObject {
    /// Playfield x coordinate
    pub x: i32,
    /// Playfield y coordinate
    pub y: i32,
    /// Hit time (ms)
    pub time: i64,
    /// Type bitmask
    pub object_type: u32,
}

impl HitObject {
    pub fn is_hit_circle(&self) -> bool {
        self.object_type & TYPE_HIT_CIRCLE != 0
    }

    pub fn is_slider(&self) -> bool {
        self.object_type & TYPE_SLIDER != 0
    }

    pub fn is_spinner(&self) -> bool {
        self.object_type & TYPE_SPINNER != 0
    }
}

/// The interval between two time-adjacent hit objects.
///
/// `beat_length` is the tempo governing this gap as resolved by the tempo
/// track; `None` means no tempo could be resolved, in which case every
/// pattern predicate over the gap evaluates false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    /// Euclidean distance between the two objects (playfield units)
    pub distance: f64,
    /// Time between the two objects (ms)
    pub time_delta: f64,
    /// Governing beat length (ms per beat), if resolvable
    pub beat_length: Option<f64>,
}

impl Gap {
    /// Build the gap from `a` to the object that follows it.
    pub fn between(a: &HitObject, b: &HitObject, beat_length: Option<f64>) -> Self {
        let dx = (a.x - b.x) as f64;
        let dy = (a.y - b.y) as f64;
        Self {
            distance: (dx * dx + dy * dy).sqrt(),
            time_delta: (b.time - a.time) as f64,
            beat_length,
        }
    }
}

/// Size class of an accepted pattern run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunClass {
    Mini,
    Small,
    Medium,
    Large,
}

/// Accepted runs from one pattern scan.
///
/// Only runs that met the scan's minimum length appear here; shorter runs
/// are discarded entirely and contribute to no count or statistic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSet {
    /// Lengths of accepted runs, in scan order
    pub lengths: Vec<u32>,
    pub mini_runs: u32,
    pub small_runs: u32,
    pub medium_runs: u32,
    pub large_runs: u32,
}

impl RunSet {
    /// Record an accepted run of the given length and class.
    pub fn add(&mut self, length: u32, class: RunClass) {
        self.lengths.push(length);
        match class {
            RunClass::Mini => self.mini_runs += 1,
            RunClass::Small => self.small_runs += 1,
            RunClass::Medium => self.medium_runs += 1,
            RunClass::Large => self.large_runs += 1,
        }
    }

    /// Number of accepted runs.
    pub fn accepted(&self) -> usize {
        self.lengths.len()
    }

    /// Sum of accepted run lengths.
    pub fn total_gaps(&self) -> u64 {
        self.lengths.iter().map(|&l| u64::from(l)).sum()
    }

    /// Mean accepted run length, 0 when empty.
    pub fn mean_length(&self) -> f64 {
        if self.lengths.is_empty() {
            0.0
        } else {
            self.total_gaps() as f64 / self.lengths.len() as f64
        }
    }

    /// Longest accepted run, 0 when empty.
    pub fn max_length(&self) -> u32 {
        self.lengths.iter().copied().max().unwrap_or(0)
    }
}

/// Output of the beatmap parser: the three ordered structures the rest of
/// the pipeline consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedBeatmap {
    pub timing_points: Vec<TimingPoint>,
    pub difficulty: DifficultyAttributes,
    pub hit_objects: Vec<HitObject>,
}

/// One output row: the per-map feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub map_id: String,
    /// Jump pattern confidence, always in [0, 1]
    pub jump_confidence: f64,
    /// Stream pattern confidence, always in [0, 1]
    pub stream_confidence: f64,
    pub overall_difficulty: f64,
}

/// Per-pattern scan outcome retained for inspection and extended export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    pub runs: RunSet,
    /// Accepted-gap density: sum of accepted run lengths / hit object count
    pub density: f64,
    /// Clamped confidence score, always in [0, 1]
    pub confidence: f64,
}

/// Full analysis of one map: the feature record plus the intermediate
/// populations it was compressed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAnalysis {
    pub record: FeatureRecord,
    pub hit_object_count: usize,
    pub timing_point_count: usize,
    /// Timing points that define a tempo (positive beat length)
    pub tempo_point_count: usize,
    pub difficulty: DifficultyAttributes,
    pub jump: PatternStats,
    pub stream: PatternStats,
}
