//! Beatmap file parser
//!
//! Parses the line-oriented beatmap format into the three ordered structures
//! the pipeline consumes: timing points, difficulty attributes, and hit
//! objects. A section begins at a line exactly matching its bracketed header
//! and ends at the next bracketed header or a blank line.

use std::str::FromStr;

use crate::error::{ExtractError, Result};
use crate::types::{DifficultyAttributes, HitObject, ParsedBeatmap, TimingPoint, ABSENT_ATTRIBUTE};

/// Beatmap text parser
pub struct BeatmapParser;

impl BeatmapParser {
    /// Parse the full text of one beatmap file.
    ///
    /// Missing sections yield empty collections, not an error; the pipeline
    /// degrades such maps to a zero-valued record downstream.
    pub fn parse(content: &str, map_id: &str) -> Result<ParsedBeatmap> {
        let timing_points = section_lines(content, "[TimingPoints]")
            .into_iter()
            .map(|line| parse_timing_point(line, map_id))
            .collect::<Result<Vec<_>>>()?;

        let difficulty = parse_difficulty(&section_lines(content, "[Difficulty]"), map_id)?;

        let hit_objects = section_lines(content, "[HitObjects]")
            .into_iter()
            .map(|line| parse_hit_object(line, map_id))
            .collect::<Result<Vec<_>>>()?;

        Ok(ParsedBeatmap {
            timing_points,
            difficulty,
            hit_objects,
        })
    }
}

/// Collect the lines of the first section starting at `header`.
///
/// The section runs until the next line starting with `[` or a blank
/// (whitespace-only) line. Lines keep their content verbatim apart from a
/// trailing `\r`.
fn section_lines<'a>(content: &'a str, header: &str) -> Vec<&'a str> {
    let mut lines = Vec::new();
    let mut in_section = false;

    for raw in content.lines() {
        let line = raw.trim_end_matches('\r');

        if in_section {
            if line.starts_with('[') || line.trim().is_empty() {
                break;
            }
            lines.push(line);
        } else if line == header {
            in_section = true;
        }
    }

    lines
}

fn parse_timing_point(line: &str, map_id: &str) -> Result<TimingPoint> {
    let fields: Vec<&str> = line.split(',').collect();
    Ok(TimingPoint {
        time: numeric_field(&fields, 0, "TimingPoints", line, map_id)?,
        beat_length: numeric_field(&fields, 1, "TimingPoints", line, map_id)?,
        meter: numeric_field(&fields, 2, "TimingPoints", line, map_id)?,
    })
}

fn parse_hit_object(line: &str, map_id: &str) -> Result<HitObject> {
    let fields: Vec<&str> = line.split(',').collect();
    Ok(HitObject {
        x: numeric_field(&fields, 0, "HitObjects", line, map_id)?,
        y: numeric_field(&fields, 1, "HitObjects", line, map_id)?,
        time: numeric_field(&fields, 2, "HitObjects", line, map_id)?,
        object_type: numeric_field(&fields, 3, "HitObjects", line, map_id)?,
    })
}

fn parse_difficulty(lines: &[&str], map_id: &str) -> Result<DifficultyAttributes> {
    let mut attributes = DifficultyAttributes::default();

    for line in lines {
        let (key, value) = line.split_once(':').ok_or_else(|| ExtractError::Parse {
            map: map_id.to_string(),
            section: "Difficulty".to_string(),
            line: line.to_string(),
            message: "expected `Key:Value`".to_string(),
        })?;
        let value = value.trim();

        let slot = match key {
            "HPDrainRate" => &mut attributes.hp_drain,
            "CircleSize" => &mut attributes.circle_size,
            "OverallDifficulty" => &mut attributes.overall_difficulty,
            "ApproachRate" => &mut attributes.approach_rate,
            "SliderMultiplier" => &mut attributes.slider_multiplier,
            "SliderTickRate" => &mut attributes.slider_tick_rate,
            _ => continue,
        };

        *slot = value
            .parse::<f64>()
            .map_err(|_| ExtractError::BadDifficultyValue {
                map: map_id.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            })?;
    }

    Ok(attributes)
}

/// Parse comma field `index` of a consumed line, failing with the file and
/// offending line on a missing or malformed field.
fn numeric_field<T>(fields: &[&str], index: usize, section: &str, line: &str, map_id: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let field = fields.get(index).ok_or_else(|| ExtractError::Parse {
        map: map_id.to_string(),
        section: section.to_string(),
        line: line.to_string(),
        message: format!("missing field {}", index),
    })?;

    field.trim().parse::<T>().map_err(|e| ExtractError::Parse {
        map: map_id.to_string(),
        section: section.to_string(),
        line: line.to_string(),
        message: e.to_string(),
    })
}

/// Whether the attribute is present (not the absence sentinel).
pub fn attribute_present(value: f64) -> bool {
    value != ABSENT_ATTRIBUTE
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "osu file format v14\n\
\n\
[Difficulty]\n\
HPDrainRate:5\n\
CircleSize:4\n\
OverallDifficulty:8.5\n\
ApproachRate:9\n\
SliderMultiplier:1.8\n\
SliderTickRate:1\n\
\n\
[TimingPoints]\n\
0,400,4,2,0,100,1,0\n\
8000,-100,4,2,0,100,0,0\n\
16000,300,4,2,0,100,1,0\n\
\n\
[HitObjects]\n\
64,80,1000,1,0,0:0:0:0:\n\
200,120,1400,5,0,0:0:0:0:\n\
320,240,1800,2,0,L|400:240,1,70\n";

    #[test]
    fn test_parse_full_map() {
        let map = BeatmapParser::parse(SAMPLE, "sample.osu").unwrap();

        assert_eq!(map.timing_points.len(), 3);
        assert_eq!(map.timing_points[0].time, 0.0);
        assert_eq!(map.timing_points[0].beat_length, 400.0);
        assert_eq!(map.timing_points[0].meter, 4);
        assert!(!map.timing_points[1].is_tempo_defining());

        assert_eq!(map.difficulty.overall_difficulty, 8.5);
        assert_eq!(map.difficulty.slider_multiplier, 1.8);

        assert_eq!(map.hit_objects.len(), 3);
        assert_eq!(map.hit_objects[0].x, 64);
        assert_eq!(map.hit_objects[0].time, 1000);
        assert!(map.hit_objects[0].is_hit_circle());
        assert!(map.hit_objects[2].is_slider());
    }

    #[test]
    fn test_section_ends_at_blank_line() {
        let content = "[TimingPoints]\n0,400,4\n\n100,200,4\n";
        let map = BeatmapParser::parse(content, "m").unwrap();
        assert_eq!(map.timing_points.len(), 1);
    }

    #[test]
    fn test_section_ends_at_next_header() {
        let content = "[TimingPoints]\n0,400,4\n[HitObjects]\n10,20,30,1\n";
        let map = BeatmapParser::parse(content, "m").unwrap();
        assert_eq!(map.timing_points.len(), 1);
        assert_eq!(map.hit_objects.len(), 1);
    }

    #[test]
    fn test_whitespace_only_line_terminates_section() {
        let content = "[HitObjects]\n10,20,30,1\n \n40,50,60,1\n";
        let map = BeatmapParser::parse(content, "m").unwrap();
        assert_eq!(map.hit_objects.len(), 1);
    }

    #[test]
    fn test_crlf_lines() {
        let content = "[TimingPoints]\r\n0,400,4,2,0,100,1,0\r\n\r\n";
        let map = BeatmapParser::parse(content, "m").unwrap();
        assert_eq!(map.timing_points.len(), 1);
    }

    #[test]
    fn test_missing_sections_yield_empty_map() {
        let map = BeatmapParser::parse("osu file format v14\n", "m").unwrap();
        assert!(map.timing_points.is_empty());
        assert!(map.hit_objects.is_empty());
        assert_eq!(map.difficulty, DifficultyAttributes::default());
    }

    #[test]
    fn test_malformed_timing_point_is_parse_error() {
        let content = "[TimingPoints]\n0,bogus,4\n";
        let err = BeatmapParser::parse(content, "bad.osu").unwrap_err();
        match err {
            ExtractError::Parse { map, section, .. } => {
                assert_eq!(map, "bad.osu");
                assert_eq!(section, "TimingPoints");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_hit_object_line_is_parse_error() {
        let content = "[HitObjects]\n10,20,30\n";
        let err = BeatmapParser::parse(content, "short.osu").unwrap_err();
        assert_eq!(err.map_id(), Some("short.osu"));
    }

    #[test]
    fn test_difficulty_value_is_trimmed() {
        let content = "[Difficulty]\nOverallDifficulty: 7 \n";
        let map = BeatmapParser::parse(content, "m").unwrap();
        assert_eq!(map.difficulty.overall_difficulty, 7.0);
    }

    #[test]
    fn test_difficulty_line_without_colon_is_parse_error() {
        let content = "[Difficulty]\nOverallDifficulty=7\n";
        assert!(BeatmapParser::parse(content, "m").is_err());
    }

    #[test]
    fn test_unknown_difficulty_key_is_ignored() {
        let content = "[Difficulty]\nStackLeniency:0.7\nOverallDifficulty:6\n";
        let map = BeatmapParser::parse(content, "m").unwrap();
        assert_eq!(map.difficulty.overall_difficulty, 6.0);
        assert_eq!(map.difficulty.hp_drain, ABSENT_ATTRIBUTE);
    }

    #[test]
    fn test_attribute_present() {
        assert!(attribute_present(0.0));
        assert!(!attribute_present(ABSENT_ATTRIBUTE));
    }
}
