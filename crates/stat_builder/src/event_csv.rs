//! Play-by-play CSV loading.
//!
//! Expected columns, header row first:
//!
//! ```text
//! player_id,game_id,season_id,action,x,y,timestamp
//! 23,1,2025,made_three,-225,20,2025-01-14T19:32:10Z
//! 23,1,2025,assist,,,2025-01-14T19:33:02Z
//! ```
//!
//! `x` / `y` are court units and may be empty for non-shot actions. Rows that
//! do not parse are counted and skipped; they never abort the load.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::StringRecord;
use hoops_core::models::{Action, CourtPoint, Event, GameId, PlayerId, SeasonId};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const COLUMNS: [&str; 7] = ["player_id", "game_id", "season_id", "action", "x", "y", "timestamp"];

/// Row counts from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

impl LoadStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            return 1.0;
        }
        self.parsed as f64 / self.total_rows as f64
    }
}

/// Read every event row from `csv_path`.
pub fn load_events_csv(csv_path: &Path) -> Result<(Vec<Event>, LoadStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut events = Vec::new();
    let mut stats = LoadStats::default();

    for result in reader.records() {
        stats.total_rows += 1;
        // 1-based data row, header excluded
        let row = stats.total_rows;

        let parsed = result
            .map_err(|e| e.to_string())
            .and_then(|record| parse_row(&record));
        match parsed {
            Ok(event) => {
                stats.parsed += 1;
                events.push(event);
            }
            Err(reason) => {
                stats.failed += 1;
                warn!(row, %reason, file = %csv_path.display(), "skipping CSV row");
            }
        }
    }

    Ok((events, stats))
}

fn parse_row(record: &StringRecord) -> std::result::Result<Event, String> {
    if record.len() < COLUMNS.len() {
        return Err(format!("{} fields, expected {}", record.len(), COLUMNS.len()));
    }

    let id = |idx: usize| -> std::result::Result<u64, String> {
        record[idx]
            .parse::<u64>()
            .map_err(|_| format!("invalid {}: '{}'", COLUMNS[idx], &record[idx]))
    };
    let coord = |idx: usize| -> std::result::Result<Option<f64>, String> {
        if record[idx].is_empty() {
            return Ok(None);
        }
        record[idx]
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("invalid {}: '{}'", COLUMNS[idx], &record[idx]))
    };

    let player_id = PlayerId(id(0)?);
    let game_id = GameId(id(1)?);
    let season_id = SeasonId(id(2)?);
    let action = Action::parse(&record[3]).ok_or_else(|| format!("unknown action: '{}'", &record[3]))?;

    let location = match (coord(4)?, coord(5)?) {
        (Some(x), Some(y)) => Some(CourtPoint::new(x, y)),
        (None, None) => None,
        _ => return Err("only one of x / y given".to_string()),
    };

    let timestamp = DateTime::parse_from_rfc3339(&record[6])
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{}': {e}", &record[6]))?;

    Ok(Event::new(player_id, game_id, season_id, action, location, timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(body: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", COLUMNS.join(","))?;
        file.write_all(body.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_load_valid_rows() -> Result<()> {
        let file = write_csv(
            "23,1,2025,made_three,-225,20,2025-01-14T19:32:10Z\n\
             23,1,2025,def_reb,,,2025-01-14T19:33:02Z\n\
             23,1,2025, missed_shot , 0 , 300 ,2025-01-14T19:34:00+01:00\n",
        )?;
        let (events, stats) = load_events_csv(file.path())?;

        assert_eq!(stats, LoadStats { total_rows: 3, parsed: 3, failed: 0 });
        assert_eq!(events[0].action, Action::MadeThree);
        assert_eq!(events[0].location, Some(CourtPoint::new(-225.0, 20.0)));
        assert_eq!(events[1].action, Action::DefensiveRebound);
        assert_eq!(events[1].location, None);
        assert_eq!(events[2].action, Action::MissedShot);
        assert_eq!(events[2].timestamp.to_rfc3339(), "2025-01-14T18:34:00+00:00");
        Ok(())
    }

    #[test]
    fn test_bad_rows_counted_not_fatal() -> Result<()> {
        let file = write_csv(
            "x,1,2025,assist,,,2025-01-14T19:32:10Z\n\
             23,1,2025,dunk,,,2025-01-14T19:32:10Z\n\
             23,1,2025,made_shot,10,,2025-01-14T19:32:10Z\n\
             23,1,2025,steal,,,yesterday\n\
             23,1\n\
             23,1,2025,block,,,2025-01-14T19:32:10Z\n",
        )?;
        let (events, stats) = load_events_csv(file.path())?;
        assert_eq!(stats.total_rows, 6);
        assert_eq!(stats.parsed, 1);
        assert_eq!(stats.failed, 5);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, Action::Block);
        assert!((stats.success_rate() - 1.0 / 6.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_events_csv(Path::new("/nonexistent/events.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
