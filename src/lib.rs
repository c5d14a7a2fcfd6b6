//! mapscope - Pattern-intensity feature extraction engine for rhythm-game beatmaps
//!
//! mapscope turns beatmap files into quantitative pattern features through a
//! deterministic per-file pipeline: section parsing → tempo resolution →
//! run-length pattern detection → confidence scoring → tabular export.
//!
//! ## Modules
//!
//! - **parser**: beatmap text → timing points, difficulty, hit objects
//! - **tempo**: governing beat length per inter-note gap
//! - **detector**: jump/stream run-length scans with acceptance gates
//! - **scorer**: run populations → clamped confidence scores
//! - **pipeline**: per-map orchestration (`extract`, `analyze`)
//! - **export** / **batch**: fixed-column CSV table over an input directory

pub mod batch;
pub mod detector;
pub mod error;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod scorer;
pub mod tempo;
pub mod types;

pub use batch::{extract_directory, extract_directory_with, BatchReport, SkippedMap};
pub use detector::{PatternDetector, PatternKind};
pub use error::{ExtractError, Result};
pub use export::{Column, CsvExporter, DEFAULT_COLUMNS, EXTENDED_COLUMNS};
pub use parser::BeatmapParser;
pub use pipeline::{analyze, analyze_path, extract, extract_path};
pub use scorer::ConfidenceScorer;
pub use tempo::TempoTrack;
pub use types::{FeatureRecord, MapAnalysis};

/// mapscope version embedded in CLI output
pub const MAPSCOPE_VERSION: &str = env!("CARGO_PKG_VERSION");
