//! mapscope CLI - Command-line interface for mapscope
//!
//! Commands:
//! - extract: batch-extract features from a directory of beatmaps into a CSV table
//! - inspect: analyze a single beatmap and print its pattern breakdown

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mapscope::batch::{self, BatchReport};
use mapscope::export::CsvExporter;
use mapscope::parser::attribute_present;
use mapscope::types::PatternStats;
use mapscope::MAPSCOPE_VERSION;

/// mapscope - Pattern-intensity feature extraction for rhythm-game beatmaps
#[derive(Parser)]
#[command(name = "mapscope")]
#[command(version = MAPSCOPE_VERSION)]
#[command(about = "Extract pattern-intensity features from beatmaps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract features from every beatmap in a directory (batch mode)
    Extract {
        /// Input directory of beatmap files
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Column preset for the output table
        #[arg(long, value_enum, default_value = "compact")]
        columns: ColumnPreset,
    },

    /// Analyze a single beatmap and print its pattern breakdown
    Inspect {
        /// Beatmap file path
        file: PathBuf,

        /// Output the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColumnPreset {
    /// map_id, both confidences, overall difficulty
    Compact,
    /// Adds run counts, densities, and the full difficulty block
    Extended,
}

impl ColumnPreset {
    fn exporter(self) -> CsvExporter {
        match self {
            ColumnPreset::Compact => CsvExporter::new(),
            ColumnPreset::Extended => CsvExporter::extended(),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> mapscope::Result<()> {
    match cli.command {
        Commands::Extract { input, output, columns } => cmd_extract(&input, &output, columns),
        Commands::Inspect { file, json } => cmd_inspect(&file, json),
    }
}

fn cmd_extract(input: &Path, output: &Path, columns: ColumnPreset) -> mapscope::Result<()> {
    let report = batch::extract_directory_with(input, output, &columns.exporter())?;
    print_batch_report(&report, output);
    Ok(())
}

fn print_batch_report(report: &BatchReport, output: &Path) {
    let elapsed_ms = (report.finished_at - report.started_at).num_milliseconds();

    println!("Extraction Report");
    println!("=================");
    println!("Processed: {}", report.processed);
    println!("Skipped:   {}", report.skipped.len());
    println!("Elapsed:   {} ms", elapsed_ms);
    println!("Output:    {}", output.display());

    if !report.skipped.is_empty() {
        println!("\nSkipped files:");
        for skip in &report.skipped {
            println!("  - {}: {}", skip.file, skip.reason);
        }
    }
}

fn cmd_inspect(file: &Path, json: bool) -> mapscope::Result<()> {
    let analysis = mapscope::analyze_path(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("Map {}", analysis.record.map_id);
    println!(
        "  hit objects:   {}  (timing points: {}, tempo-defining: {})",
        analysis.hit_object_count, analysis.timing_point_count, analysis.tempo_point_count
    );
    println!(
        "  difficulty:    OD {}  HP {}  CS {}  AR {}",
        fmt_attribute(analysis.difficulty.overall_difficulty),
        fmt_attribute(analysis.difficulty.hp_drain),
        fmt_attribute(analysis.difficulty.circle_size),
        fmt_attribute(analysis.difficulty.approach_rate),
    );

    print_pattern("jumps", &analysis.jump);
    print_pattern("streams", &analysis.stream);
    Ok(())
}

fn print_pattern(label: &str, stats: &PatternStats) {
    println!("  {label}:");
    println!("    confidence:  {:.4}", stats.confidence);
    println!("    density:     {:.4}", stats.density);
    println!(
        "    runs:        {} (mini {}, small {}, medium {}, large {})",
        stats.runs.accepted(),
        stats.runs.mini_runs,
        stats.runs.small_runs,
        stats.runs.medium_runs,
        stats.runs.large_runs
    );
    if stats.runs.accepted() > 0 {
        println!(
            "    run lengths: mean {:.2}, max {}",
            stats.runs.mean_length(),
            stats.runs.max_length()
        );
    }
}

fn fmt_attribute(value: f64) -> String {
    if attribute_present(value) {
        value.to_string()
    } else {
        "-".to_string()
    }
}
