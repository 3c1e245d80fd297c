//! Play-by-play event model
//!
//! Events arrive already validated and persisted; the engine only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// Caller-supplied game identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

/// Caller-supplied season identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonId(pub u64);

/// Shot value as declared by the recording client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotValue {
    Two,
    Three,
}

impl ShotValue {
    pub fn points(&self) -> u32 {
        match self {
            ShotValue::Two => 2,
            ShotValue::Three => 3,
        }
    }
}

/// Recorded action kind.
///
/// `MadeShot` / `MissedShot` are shots recorded without a declared value.
/// For every shot the scored value comes from the classified zone, never
/// from the declared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MadeTwo,
    MadeThree,
    MissedTwo,
    MissedThree,
    MadeShot,
    MissedShot,
    #[serde(alias = "off_reb")]
    OffensiveRebound,
    #[serde(alias = "def_reb")]
    DefensiveRebound,
    Steal,
    Assist,
    Block,
    Turnover,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::MadeTwo,
        Action::MadeThree,
        Action::MissedTwo,
        Action::MissedThree,
        Action::MadeShot,
        Action::MissedShot,
        Action::OffensiveRebound,
        Action::DefensiveRebound,
        Action::Steal,
        Action::Assist,
        Action::Block,
        Action::Turnover,
    ];

    pub fn is_shot(&self) -> bool {
        self.shot_made().is_some()
    }

    /// `Some(made)` for shot actions, `None` otherwise.
    pub fn shot_made(&self) -> Option<bool> {
        match self {
            Action::MadeTwo | Action::MadeThree | Action::MadeShot => Some(true),
            Action::MissedTwo | Action::MissedThree | Action::MissedShot => Some(false),
            _ => None,
        }
    }

    /// Value the client claimed for the shot, if any.
    pub fn declared_value(&self) -> Option<ShotValue> {
        match self {
            Action::MadeTwo | Action::MissedTwo => Some(ShotValue::Two),
            Action::MadeThree | Action::MissedThree => Some(ShotValue::Three),
            _ => None,
        }
    }

    /// Wire name (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MadeTwo => "made_two",
            Action::MadeThree => "made_three",
            Action::MissedTwo => "missed_two",
            Action::MissedThree => "missed_three",
            Action::MadeShot => "made_shot",
            Action::MissedShot => "missed_shot",
            Action::OffensiveRebound => "offensive_rebound",
            Action::DefensiveRebound => "defensive_rebound",
            Action::Steal => "steal",
            Action::Assist => "assist",
            Action::Block => "block",
            Action::Turnover => "turnover",
        }
    }

    /// Parse a wire name, accepting the short rebound aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "off_reb" => Some(Action::OffensiveRebound),
            "def_reb" => Some(Action::DefensiveRebound),
            other => Action::ALL.iter().copied().find(|a| a.as_str() == other),
        }
    }
}

/// Court position in court units (tenths of a foot, hoop-centered).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtPoint {
    pub x: f64,
    pub y: f64,
}

impl CourtPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance_to_hoop(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// One play-by-play event. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub season_id: SeasonId,
    pub action: Action,
    /// Required for shots; ignored for every other action.
    #[serde(default)]
    pub location: Option<CourtPoint>,
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn new(
        player_id: PlayerId,
        game_id: GameId,
        season_id: SeasonId,
        action: Action,
        location: Option<CourtPoint>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self { player_id, game_id, season_id, action, location, timestamp }
    }

    /// Shot event at a location.
    pub fn shot(
        player_id: PlayerId,
        game_id: GameId,
        season_id: SeasonId,
        made: bool,
        x: f64,
        y: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let action = if made { Action::MadeShot } else { Action::MissedShot };
        Self::new(
            player_id,
            game_id,
            season_id,
            action,
            Some(CourtPoint::new(x, y)),
            timestamp,
        )
    }

    pub fn is_shot(&self) -> bool {
        self.action.is_shot()
    }
}
