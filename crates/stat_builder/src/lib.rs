//! Stat Builder Library
//!
//! File-level pipeline around `hoops_core`:
//! CSV / JSON events → aggregate records (JSON) → shot chart images.

pub mod event_csv;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hoops_core::aggregate::{aggregate_game_roster, CareerAggregator, SeasonAggregator};
use hoops_core::models::{CareerKey, Event, GameId, GameKey, PlayerId, Scope, SeasonId, SeasonKey};
use hoops_core::{
    aggregate, AggregateRecord, AggregateReport, CourtRenderer, EngineConfig, RenderInput,
    RenderedImage, Zone, ZoneClassifier,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use event_csv::{load_events_csv, LoadStats};

/// What one build wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    /// Scope label, e.g. `season(player=23, season=2025)`
    pub scope: String,
    pub inputs: usize,
    pub skipped: usize,
    pub value_mismatches: u32,
    pub output: String,
    /// RFC3339
    pub created_at: String,
}

impl BuildSummary {
    fn new(scope: String, inputs: usize, report: &AggregateReport, output: &Path) -> Self {
        Self {
            scope,
            inputs,
            skipped: report.skipped_count(),
            value_mismatches: report.diagnostics.value_mismatches,
            output: output.display().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Environment variable selecting a render preset when no config file is given.
pub const RENDER_PROFILE_ENV: &str = "HOOPS_RENDER_PROFILE";

/// Engine config from `path`, or the preset named by `HOOPS_RENDER_PROFILE`.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(preset_config(std::env::var(RENDER_PROFILE_ENV).ok().as_deref())),
    }
}

/// Preset by name (`thumbnail`, `print`); anything else is the standard one.
pub fn preset_config(profile: Option<&str>) -> EngineConfig {
    match profile.map(str::to_lowercase).as_deref() {
        Some("thumbnail") => EngineConfig::thumbnail(),
        Some("print") => EngineConfig::print(),
        Some("") | Some("standard") | None => EngineConfig::standard(),
        Some(other) => {
            warn!(profile = other, "unknown render profile, using standard");
            EngineConfig::standard()
        }
    }
}

/// Load events from a `.json` array or a CSV file.
pub fn load_events(path: &Path) -> Result<(Vec<Event>, LoadStats)> {
    if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
        let events: Vec<Event> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse events JSON: {}", path.display()))?;
        let n = events.len() as u32;
        return Ok((events, LoadStats { total_rows: n, parsed: n, failed: 0 }));
    }
    load_events_csv(path)
}

/// Load stored records: a JSON array, or a single record.
pub fn load_records(path: &Path) -> Result<Vec<AggregateRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    let records = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|record| vec![record])
    };
    records.with_context(|| format!("Not an aggregate record file: {}", path.display()))
}

/// Scope from CLI-style ids: game needs a season, season alone is a
/// season, neither is a career.
pub fn scope_for(player: u64, game: Option<u64>, season: Option<u64>) -> Result<Scope> {
    let player_id = PlayerId(player);
    Ok(match (game, season) {
        (Some(game), Some(season)) => {
            Scope::Game(GameKey::new(player_id, GameId(game), SeasonId(season)))
        }
        (Some(_), None) => bail!("a game scope also needs --season"),
        (None, Some(season)) => Scope::Season(SeasonKey::new(player_id, SeasonId(season))),
        (None, None) => Scope::Career(CareerKey::new(player_id)),
    })
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    write_bytes(path, json.as_bytes())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// Aggregate one scope from an event file and write the record JSON.
pub fn build_record(
    events_path: &Path,
    scope: Scope,
    classifier: &ZoneClassifier,
    out: &Path,
) -> Result<(AggregateReport, BuildSummary)> {
    let (events, stats) = load_events(events_path)?;
    info!(file = %events_path.display(), parsed = stats.parsed, failed = stats.failed, "events loaded");

    let report = aggregate(&events, scope, classifier);
    write_json(out, &report.record)?;
    let summary = BuildSummary::new(scope.to_string(), events.len(), &report, out);
    Ok((report, summary))
}

/// Game records for every player in an event file.
pub fn build_game_roster(
    events_path: &Path,
    game: u64,
    season: u64,
    classifier: &ZoneClassifier,
    out: &Path,
) -> Result<Vec<AggregateReport>> {
    let (events, _) = load_events(events_path)?;
    let reports = aggregate_game_roster(GameId(game), SeasonId(season), &events, classifier);
    let records: Vec<&AggregateRecord> = reports.iter().map(|r| &r.record).collect();
    write_json(out, &records)?;
    Ok(reports)
}

/// Fold stored child records one level up: games into a season when
/// `season` is given, seasons into a career otherwise.
pub fn build_rollup(
    records_path: &Path,
    player: u64,
    season: Option<u64>,
    classifier: &ZoneClassifier,
    out: &Path,
) -> Result<(AggregateReport, BuildSummary)> {
    let records = load_records(records_path)?;
    let report = match season {
        Some(season) => {
            SeasonAggregator::new(SeasonKey::new(PlayerId(player), SeasonId(season)), classifier)
                .fold(&records)
        }
        None => CareerAggregator::new(CareerKey::new(PlayerId(player)), classifier).fold(&records),
    };
    write_json(out, &report.record)?;
    let summary = BuildSummary::new(report.record.scope.to_string(), records.len(), &report, out);
    Ok((report, summary))
}

/// Render a zone chart for a stored record.
pub fn render_record_file(renderer: &CourtRenderer, record_path: &Path, out: &Path) -> Result<RenderedImage> {
    let records = load_records(record_path)?;
    let record = match records.as_slice() {
        [record] => record,
        [] => bail!("No record in {}", record_path.display()),
        _ => bail!(
            "{} holds {} records; render takes a single record",
            record_path.display(),
            records.len()
        ),
    };
    let image = renderer.render(RenderInput::Zones(&record.zones))?;
    write_bytes(out, &image.bytes)?;
    Ok(image)
}

/// Render a shot-density chart from an event file, optionally for one player.
pub fn render_events_file(
    renderer: &CourtRenderer,
    events_path: &Path,
    player: Option<u64>,
    out: &Path,
) -> Result<RenderedImage> {
    let (mut events, _) = load_events(events_path)?;
    if let Some(player) = player {
        events.retain(|e| e.player_id == PlayerId(player));
    }
    let image = renderer.render(RenderInput::Shots(&events))?;
    write_bytes(out, &image.bytes)?;
    Ok(image)
}

/// Zone and point value of a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classified {
    pub x: f64,
    pub y: f64,
    pub zone: Zone,
    pub value: u32,
}

pub fn classify_point(classifier: &ZoneClassifier, x: f64, y: f64) -> Result<Classified> {
    let zone = classifier.try_classify(x, y)?;
    Ok(Classified { x, y, zone, value: zone.shot_value() })
}
