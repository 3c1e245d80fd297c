//! Aggregate records (game / season / career)
//!
//! Records are immutable values. Recomputing a scope builds a fresh record
//! and replaces the old one wholesale.

use serde::{Deserialize, Serialize};

use super::box_score::BoxScore;
use super::diagnostics::Diagnostics;
use super::zone_table::{ShotLine, ZoneStatsTable};
use crate::models::{PlayerId, Scope};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub scope: Scope,
    pub totals: BoxScore,
    /// 1 for a game record; distinct games folded for season / career.
    pub games_played: u32,
    pub zones: ZoneStatsTable,
    /// Where the rendered shot chart lives, filled in by the storage layer.
    #[serde(default)]
    pub image_ref: Option<String>,
}

/// Per-game averages. Derived from totals on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerGameAverages {
    pub points: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub offensive_rebounds: f64,
    pub defensive_rebounds: f64,
    pub rebounds: f64,
    pub turnovers: f64,
    pub field_goal_attempts: f64,
}

impl AggregateRecord {
    pub fn new(scope: Scope, totals: BoxScore, games_played: u32, zones: ZoneStatsTable) -> Self {
        Self { scope, totals, games_played, zones, image_ref: None }
    }

    /// All-zero record for a scope with no input.
    pub fn empty(scope: Scope, games_played: u32) -> Self {
        Self::new(scope, BoxScore::default(), games_played, ZoneStatsTable::new())
    }

    pub fn player_id(&self) -> PlayerId {
        self.scope.player_id()
    }

    /// Copy of this record pointing at a stored image.
    pub fn with_image_ref(&self, image_ref: impl Into<String>) -> Self {
        Self { image_ref: Some(image_ref.into()), ..self.clone() }
    }

    pub fn field_goals(&self) -> ShotLine {
        self.zones.field_goals()
    }

    pub fn threes(&self) -> ShotLine {
        self.zones.threes()
    }

    pub fn twos(&self) -> ShotLine {
        self.zones.twos()
    }

    /// Per-game averages; `None` when no games were played.
    pub fn per_game(&self) -> Option<PerGameAverages> {
        if self.games_played == 0 {
            return None;
        }
        let gp = self.games_played as f64;
        let t = &self.totals;
        Some(PerGameAverages {
            points: t.points as f64 / gp,
            assists: t.assists as f64 / gp,
            steals: t.steals as f64 / gp,
            blocks: t.blocks as f64 / gp,
            offensive_rebounds: t.offensive_rebounds as f64 / gp,
            defensive_rebounds: t.defensive_rebounds as f64 / gp,
            rebounds: t.rebounds() as f64 / gp,
            turnovers: t.turnovers as f64 / gp,
            field_goal_attempts: self.zones.total_attempts() as f64 / gp,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Result of one aggregation call: the record plus what was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub record: AggregateRecord,
    pub diagnostics: Diagnostics,
}

impl AggregateReport {
    pub fn skipped_count(&self) -> usize {
        self.diagnostics.skipped_count()
    }

    pub fn into_record(self) -> AggregateRecord {
        self.record
    }
}
