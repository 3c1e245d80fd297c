//! Aggregation scopes (game / season / career)

use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::{Event, GameId, PlayerId, SeasonId};

/// Owner of a game record. Identity is (player, game); `season_id` is the
/// parent link used to check season folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameKey {
    pub player_id: PlayerId,
    pub game_id: GameId,
    pub season_id: SeasonId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonKey {
    pub player_id: PlayerId,
    pub season_id: SeasonId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CareerKey {
    pub player_id: PlayerId,
}

impl GameKey {
    pub fn new(player_id: PlayerId, game_id: GameId, season_id: SeasonId) -> Self {
        Self { player_id, game_id, season_id }
    }

    pub fn season(&self) -> SeasonKey {
        SeasonKey::new(self.player_id, self.season_id)
    }

    pub fn matches(&self, event: &Event) -> bool {
        event.player_id == self.player_id
            && event.game_id == self.game_id
            && event.season_id == self.season_id
    }
}

impl SeasonKey {
    pub fn new(player_id: PlayerId, season_id: SeasonId) -> Self {
        Self { player_id, season_id }
    }

    pub fn career(&self) -> CareerKey {
        CareerKey::new(self.player_id)
    }

    pub fn matches(&self, event: &Event) -> bool {
        event.player_id == self.player_id && event.season_id == self.season_id
    }
}

impl CareerKey {
    pub fn new(player_id: PlayerId) -> Self {
        Self { player_id }
    }

    pub fn matches(&self, event: &Event) -> bool {
        event.player_id == self.player_id
    }
}

/// Aggregation granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum Scope {
    Game(GameKey),
    Season(SeasonKey),
    Career(CareerKey),
}

/// Scope level without the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeLevel {
    Game,
    Season,
    Career,
}

impl Scope {
    pub fn player_id(&self) -> PlayerId {
        match self {
            Scope::Game(key) => key.player_id,
            Scope::Season(key) => key.player_id,
            Scope::Career(key) => key.player_id,
        }
    }

    pub fn level(&self) -> ScopeLevel {
        match self {
            Scope::Game(_) => ScopeLevel::Game,
            Scope::Season(_) => ScopeLevel::Season,
            Scope::Career(_) => ScopeLevel::Career,
        }
    }

    /// Does this event belong to the scope?
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Scope::Game(key) => key.matches(event),
            Scope::Season(key) => key.matches(event),
            Scope::Career(key) => key.matches(event),
        }
    }
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScopeLevel::Game => write!(f, "game"),
            ScopeLevel::Season => write!(f, "season"),
            ScopeLevel::Career => write!(f, "career"),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scope::Game(key) => write!(
                f,
                "game(player={}, game={}, season={})",
                key.player_id.0, key.game_id.0, key.season_id.0
            ),
            Scope::Season(key) => {
                write!(f, "season(player={}, season={})", key.player_id.0, key.season_id.0)
            }
            Scope::Career(key) => write!(f, "career(player={})", key.player_id.0),
        }
    }
}
