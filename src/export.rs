//! Tabular feature export
//!
//! Renders extracted map analyses into a CSV table with a header row and a
//! fixed column order. The column set is chosen once per run: the default
//! preset is the compact feature vector, the extended preset adds the
//! per-class run counts, densities, and the full difficulty block.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::types::MapAnalysis;

/// One exportable column of the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    MapId,
    JumpConfidence,
    JumpRuns,
    SmallJumps,
    MediumJumps,
    LargeJumps,
    JumpDensity,
    StreamConfidence,
    StreamRuns,
    MiniStreams,
    SmallStreams,
    MediumStreams,
    LargeStreams,
    StreamDensity,
    HpDrain,
    CircleSize,
    OverallDifficulty,
    ApproachRate,
    SliderMultiplier,
    SliderTickRate,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::MapId => "map_id",
            Column::JumpConfidence => "jump_confidence",
            Column::JumpRuns => "jump_runs",
            Column::SmallJumps => "small_jumps",
            Column::MediumJumps => "medium_jumps",
            Column::LargeJumps => "large_jumps",
            Column::JumpDensity => "jump_density",
            Column::StreamConfidence => "stream_confidence",
            Column::StreamRuns => "stream_runs",
            Column::MiniStreams => "mini_streams",
            Column::SmallStreams => "small_streams",
            Column::MediumStreams => "medium_streams",
            Column::LargeStreams => "large_streams",
            Column::StreamDensity => "stream_density",
            Column::HpDrain => "hp_drain",
            Column::CircleSize => "circle_size",
            Column::OverallDifficulty => "overall_difficulty",
            Column::ApproachRate => "approach_rate",
            Column::SliderMultiplier => "slider_multiplier",
            Column::SliderTickRate => "slider_tick_rate",
        }
    }

    fn value(&self, analysis: &MapAnalysis) -> String {
        match self {
            Column::MapId => analysis.record.map_id.clone(),
            Column::JumpConfidence => analysis.record.jump_confidence.to_string(),
            Column::JumpRuns => analysis.jump.runs.accepted().to_string(),
            Column::SmallJumps => analysis.jump.runs.small_runs.to_string(),
            Column::MediumJumps => analysis.jump.runs.medium_runs.to_string(),
            Column::LargeJumps => analysis.jump.runs.large_runs.to_string(),
            Column::JumpDensity => analysis.jump.density.to_string(),
            Column::StreamConfidence => analysis.record.stream_confidence.to_string(),
            Column::StreamRuns => analysis.stream.runs.accepted().to_string(),
            Column::MiniStreams => analysis.stream.runs.mini_runs.to_string(),
            Column::SmallStreams => analysis.stream.runs.small_runs.to_string(),
            Column::MediumStreams => analysis.stream.runs.medium_runs.to_string(),
            Column::LargeStreams => analysis.stream.runs.large_runs.to_string(),
            Column::StreamDensity => analysis.stream.density.to_string(),
            Column::HpDrain => analysis.difficulty.hp_drain.to_string(),
            Column::CircleSize => analysis.difficulty.circle_size.to_string(),
            Column::OverallDifficulty => analysis.difficulty.overall_difficulty.to_string(),
            Column::ApproachRate => analysis.difficulty.approach_rate.to_string(),
            Column::SliderMultiplier => analysis.difficulty.slider_multiplier.to_string(),
            Column::SliderTickRate => analysis.difficulty.slider_tick_rate.to_string(),
        }
    }
}

/// Compact column preset: the per-map feature vector.
pub const DEFAULT_COLUMNS: &[Column] = &[
    Column::MapId,
    Column::JumpConfidence,
    Column::StreamConfidence,
    Column::OverallDifficulty,
];

/// Extended column preset: run populations and the full difficulty block.
pub const EXTENDED_COLUMNS: &[Column] = &[
    Column::MapId,
    Column::JumpConfidence,
    Column::JumpRuns,
    Column::SmallJumps,
    Column::MediumJumps,
    Column::LargeJumps,
    Column::JumpDensity,
    Column::StreamConfidence,
    Column::StreamRuns,
    Column::MiniStreams,
    Column::SmallStreams,
    Column::MediumStreams,
    Column::LargeStreams,
    Column::StreamDensity,
    Column::HpDrain,
    Column::CircleSize,
    Column::OverallDifficulty,
    Column::ApproachRate,
    Column::SliderMultiplier,
    Column::SliderTickRate,
];

/// CSV exporter with a column set fixed at construction
#[derive(Debug, Clone)]
pub struct CsvExporter {
    columns: Vec<Column>,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporter {
    /// Exporter over the default column preset.
    pub fn new() -> Self {
        Self::with_columns(DEFAULT_COLUMNS.to_vec())
    }

    /// Exporter over the extended column preset.
    pub fn extended() -> Self {
        Self::with_columns(EXTENDED_COLUMNS.to_vec())
    }

    /// Exporter over an arbitrary column order.
    pub fn with_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn header(&self) -> String {
        self.columns
            .iter()
            .map(Column::name)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn format_row(&self, analysis: &MapAnalysis) -> String {
        self.columns
            .iter()
            .map(|c| c.value(analysis))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Render the full table: header row plus one row per analysis.
    pub fn render(&self, analyses: &[MapAnalysis]) -> String {
        let mut out = self.header();
        out.push('\n');
        for analysis in analyses {
            out.push_str(&self.format_row(analysis));
            out.push('\n');
        }
        out
    }

    /// Render and persist the table in one write.
    pub fn write(&self, analyses: &[MapAnalysis], path: &Path) -> Result<()> {
        fs::write(path, self.render(analyses))?;
        Ok(())
    }
}
