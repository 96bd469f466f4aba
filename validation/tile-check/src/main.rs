//! Rendering check CLI for the grid tile renderer.

use clap::{Parser, Subcommand};
use grid_common::{ClassifierConfig, ColorizerKind, InterpolatorKind};
use std::path::PathBuf;
use tile_check::{Pattern, ResultsReport, ScenarioConfig, TileRunner};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "tile-check")]
#[command(about = "Render synthetic grids into tiles and report timings", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file
    Run {
        /// Path to scenario YAML file
        #[arg(short, long)]
        config: PathBuf,

        /// Directory to write rendered tiles into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Override renders per tile
        #[arg(short, long)]
        repeat: Option<u32>,
    },

    /// Render a synthetic grid with one classifier/interpolator/colorizer combination
    Quick {
        /// Grid pattern (ramp, modulo, checker, gaussian, random)
        #[arg(short, long, default_value = "gaussian")]
        pattern: Pattern,

        /// Tile zoom minus grid zoom
        #[arg(short, long, default_value = "2", allow_negative_numbers = true)]
        zoom_diff: i32,

        /// Interpolator (nearest, bilinear, bicubic, spline)
        #[arg(short, long, default_value = "bicubic")]
        interpolator: InterpolatorKind,

        /// Colorizer (stepped, gradient, dot, dithered)
        #[arg(short, long, default_value = "stepped")]
        colorizer: ColorizerKind,

        /// Number of classes
        #[arg(long, default_value = "5")]
        classes: usize,

        /// Grid width and height in cells
        #[arg(short, long, default_value = "128")]
        size: usize,

        /// Directory to write rendered tiles into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List classifiers, interpolators, colorizers, patterns and scenarios
    List {
        /// Scenarios directory
        #[arg(short, long, default_value = "scenarios")]
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            config,
            output,
            json,
            repeat,
        } => {
            println!("Loading scenario: {}", config.display());

            let mut scenario = ScenarioConfig::from_file(&config)?;
            if let Some(r) = repeat {
                scenario.repeat = r;
            }
            scenario.validate()?;

            println!("✓ Configuration loaded successfully");
            println!("  Name: {}", scenario.name);
            println!("  Description: {}", scenario.description);
            println!("  Renderer: {}", scenario.renderer);
            println!();

            let results = TileRunner::new(scenario).run(output.as_deref())?;
            if json {
                println!("{}", ResultsReport::format_json(&results)?);
            } else {
                println!("{}", ResultsReport::format_table(&results));
            }
            Ok(())
        }
        Commands::Quick {
            pattern,
            zoom_diff,
            interpolator,
            colorizer,
            classes,
            size,
            output,
        } => {
            let mut scenario =
                ScenarioConfig::quick(pattern, zoom_diff, interpolator, colorizer, classes);
            scenario.grid.width = size;
            scenario.grid.height = size;
            scenario.validate()?;

            println!("Running quick check:");
            println!("  Pattern: {:?}", pattern);
            println!("  Zoom diff: {}", zoom_diff);
            println!("  Interpolator: {:?}", interpolator);
            println!("  Colorizer: {:?}", colorizer);
            println!();

            let results = TileRunner::new(scenario).run(output.as_deref())?;
            println!("{}", ResultsReport::format_table(&results));
            Ok(())
        }
        Commands::List { dir } => {
            println!("Classifiers:   {}", ClassifierConfig::NAMES.join(", "));
            println!("Interpolators: {}", InterpolatorKind::NAMES.join(", "));
            println!("Colorizers:    {}", ColorizerKind::NAMES.join(", "));
            println!("Patterns:      {}", Pattern::NAMES.join(", "));
            println!();
            println!("Available scenarios in {}:", dir.display());
            println!();

            match std::fs::read_dir(&dir) {
                Ok(entries) => {
                    let mut scenarios = Vec::new();
                    for entry in entries.flatten() {
                        let path = entry.path();
                        if path.extension().and_then(|s| s.to_str()) != Some("yaml") {
                            continue;
                        }
                        if let Ok(config) = ScenarioConfig::from_file(&path) {
                            let file = entry.file_name().to_string_lossy().to_string();
                            scenarios.push((file, config.name, config.description));
                        }
                    }
                    scenarios.sort_by(|a, b| a.0.cmp(&b.0));

                    if scenarios.is_empty() {
                        println!("No scenario files found");
                    } else {
                        for (filename, name, desc) in scenarios {
                            println!("  {} - {}", filename, name);
                            println!("    {}", desc);
                            println!();
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Error reading directory: {}", e);
                    eprintln!("Make sure the directory exists and is readable");
                }
            }
            Ok(())
        }
    }
}
