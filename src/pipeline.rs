//! Pipeline orchestration
//!
//! This module provides the public per-map API: the full text of one
//! beatmap file goes in, one feature record comes out. Extraction is a pure
//! function of the file content; no state survives between maps.
//!
//! Pipeline stages:
//! 1. BeatmapParser - timing points, difficulty attributes, hit objects
//! 2. TempoTrack - governing beat length per inter-note gap
//! 3. PatternDetector - jump and stream run-length scans
//! 4. ConfidenceScorer - bounded confidence per pattern kind

use std::path::Path;

use crate::detector::{PatternDetector, PatternKind};
use crate::error::Result;
use crate::parser::BeatmapParser;
use crate::scorer::ConfidenceScorer;
use crate::tempo::TempoTrack;
use crate::types::{FeatureRecord, MapAnalysis, PatternStats, RunSet};

/// Run the full pipeline over one map, keeping the intermediate run
/// populations alongside the record.
pub fn analyze(content: &str, map_id: &str) -> Result<MapAnalysis> {
    let parsed = BeatmapParser::parse(content, map_id)?;
    let hit_object_count = parsed.hit_objects.len();

    let gaps = TempoTrack::gaps(&parsed.timing_points, &parsed.hit_objects);

    let jump = pattern_stats(
        PatternDetector::scan_jumps(&gaps),
        hit_object_count,
        PatternKind::Jump,
    );
    let stream = pattern_stats(
        PatternDetector::scan_streams(&gaps),
        hit_object_count,
        PatternKind::Stream,
    );

    let record = FeatureRecord {
        map_id: map_id.to_string(),
        jump_confidence: jump.confidence,
        stream_confidence: stream.confidence,
        overall_difficulty: parsed.difficulty.overall_difficulty,
    };

    Ok(MapAnalysis {
        record,
        hit_object_count,
        timing_point_count: parsed.timing_points.len(),
        tempo_point_count: parsed
            .timing_points
            .iter()
            .filter(|t| t.is_tempo_defining())
            .count(),
        difficulty: parsed.difficulty,
        jump,
        stream,
    })
}

/// Extract the feature record from one map's file content.
pub fn extract(content: &str, map_id: &str) -> Result<FeatureRecord> {
    Ok(analyze(content, map_id)?.record)
}

/// Read and analyze the map at `path`. The map id is the file name as
/// listed, kept verbatim.
pub fn analyze_path(path: &Path) -> Result<MapAnalysis> {
    let map_id = map_id_from_path(path);
    let content = std::fs::read_to_string(path)?;
    analyze(&content, &map_id)
}

/// Read and extract the map at `path`.
pub fn extract_path(path: &Path) -> Result<FeatureRecord> {
    Ok(analyze_path(path)?.record)
}

fn pattern_stats(runs: RunSet, hit_object_count: usize, kind: PatternKind) -> PatternStats {
    let density = ConfidenceScorer::density(&runs, hit_object_count);
    let confidence = ConfidenceScorer::confidence(&runs, hit_object_count, kind);
    PatternStats { runs, density, confidence }
}

fn map_id_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
