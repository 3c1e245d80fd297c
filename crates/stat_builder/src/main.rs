//! Stat Builder CLI
//!
//! Events (CSV / JSON) → aggregate records (JSON) → shot charts (PNG / JPEG / BMP)

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "stat_builder", version = hoops_core::VERSION)]
#[command(about = "Build basketball stat records and shot charts from play-by-play files", long_about = None)]
struct Cli {
    /// Engine config (YAML, or JSON by extension); defaults to the preset
    /// named by HOOPS_RENDER_PROFILE
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the zone and point value of a court location
    Classify {
        /// Lateral position in court units (tenths of a foot)
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Distance from the hoop in court units
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },

    /// Aggregate one player's game, season or career from an event file
    Aggregate {
        /// Event file (.csv or .json)
        #[arg(long)]
        events: PathBuf,

        /// Player id; omit with --roster
        #[arg(long)]
        player: Option<u64>,

        #[arg(long)]
        game: Option<u64>,

        #[arg(long)]
        season: Option<u64>,

        /// Build a game record for every player in the file
        #[arg(long, default_value = "false")]
        roster: bool,

        /// Output record JSON
        #[arg(long)]
        out: PathBuf,

        /// Also render the record's zone chart here
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Fold stored game records into a season, or season records into a career
    Rollup {
        /// JSON file with an array of child records
        #[arg(long)]
        records: PathBuf,

        #[arg(long)]
        player: u64,

        /// Season to build; omit to build the career from season records
        #[arg(long)]
        season: Option<u64>,

        #[arg(long)]
        out: PathBuf,
    },

    /// Render a zone chart from a record, or a density chart from events
    Render {
        /// Record JSON to draw as a zone chart
        #[arg(long, conflicts_with = "events", required_unless_present = "events")]
        record: Option<PathBuf>,

        /// Event file to draw as a shot-density chart
        #[arg(long)]
        events: Option<PathBuf>,

        /// Only this player's shots (density chart)
        #[arg(long)]
        player: Option<u64>,

        /// png, jpeg or bmp; overrides the config
        #[arg(long)]
        format: Option<hoops_core::RenderFormat>,

        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    FmtSubscriber::builder()
        .with_max_level(
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = stat_builder::load_config(cli.config.as_deref())?;
    let classifier = config.classifier()?;

    match cli.command {
        Commands::Classify { x, y } => {
            let shot = stat_builder::classify_point(&classifier, x, y)?;
            println!("{} ({} pts)", shot.zone, shot.value);
        }

        Commands::Aggregate { events, player, game, season, roster, out, chart } => {
            println!("Aggregating events...");
            println!("   Input:  {}", events.display());
            println!("   Output: {}", out.display());

            if roster {
                let (Some(game), Some(season)) = (game, season) else {
                    anyhow::bail!("--roster needs --game and --season");
                };
                let reports = stat_builder::build_game_roster(&events, game, season, &classifier, &out)?;
                println!("\nBuilt {} game records", reports.len());
                for report in &reports {
                    print_skips(&report.record.scope.to_string(), report.skipped_count());
                }
                return Ok(());
            }

            let Some(player) = player else {
                anyhow::bail!("--player is required without --roster");
            };
            let scope = stat_builder::scope_for(player, game, season)?;
            let (report, summary) = stat_builder::build_record(&events, scope, &classifier, &out)?;
            print_summary(&summary);
            print_totals(&report.record);

            if let Some(chart) = chart {
                let image = stat_builder::render_record_file(&config.renderer()?, &out, &chart)?;
                println!("   Chart:   {} ({}x{}, {})", chart.display(), image.width, image.height, image.mime_type());
            }
        }

        Commands::Rollup { records, player, season, out } => {
            println!("Rolling up records...");
            println!("   Input:  {}", records.display());
            let (report, summary) = stat_builder::build_rollup(&records, player, season, &classifier, &out)?;
            print_summary(&summary);
            print_totals(&report.record);
        }

        Commands::Render { record, events, player, format, out } => {
            if let Some(format) = format {
                config.render.format = format;
            }
            let renderer = config.renderer()?;
            let image = match (record, events) {
                (Some(record), _) => stat_builder::render_record_file(&renderer, &record, &out)?,
                (None, Some(events)) => stat_builder::render_events_file(&renderer, &events, player, &out)?,
                (None, None) => anyhow::bail!("give --record or --events"),
            };
            println!(
                "Rendered {} ({}x{}, {} bytes, {})",
                out.display(),
                image.width,
                image.height,
                image.bytes.len(),
                image.mime_type()
            );
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(summary: &stat_builder::BuildSummary) {
    println!("\nRecord built: {}", summary.scope);
    println!("   Inputs:   {}", summary.inputs);
    print_skips(&summary.scope, summary.skipped);
    if summary.value_mismatches > 0 {
        println!("   Declared value overridden by zone: {}", summary.value_mismatches);
    }
    println!("   Output:   {}", summary.output);
    println!("   Created:  {}", summary.created_at);
}

#[cfg(feature = "cli")]
fn print_skips(scope: &str, skipped: usize) {
    if skipped > 0 {
        println!("   {scope}: skipped {skipped} input(s), see warnings above");
    }
}

#[cfg(feature = "cli")]
fn print_totals(record: &hoops_core::AggregateRecord) {
    let t = &record.totals;
    let fg = record.field_goals();
    println!(
        "   PTS {}  AST {}  REB {}  STL {}  BLK {}  TOV {}  GP {}",
        t.points,
        t.assists,
        t.rebounds(),
        t.steals,
        t.blocks,
        t.turnovers,
        record.games_played
    );
    match fg.percentage() {
        Some(pct) => println!("   FG {}/{} ({:.1}%)", fg.makes, fg.attempts, pct * 100.0),
        None => println!("   FG 0/0"),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("stat_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
