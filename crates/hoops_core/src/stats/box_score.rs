use serde::{Deserialize, Serialize};

use crate::models::Action;

/// Counting stats for one player over some scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxScore {
    pub points: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub turnovers: u32,
}

impl BoxScore {
    /// Count a non-shot action. Shot actions are scored by the game
    /// aggregator from the classified zone and are ignored here.
    pub fn record_action(&mut self, action: Action) {
        let counter = match action {
            Action::Assist => &mut self.assists,
            Action::Steal => &mut self.steals,
            Action::Block => &mut self.blocks,
            Action::OffensiveRebound => &mut self.offensive_rebounds,
            Action::DefensiveRebound => &mut self.defensive_rebounds,
            Action::Turnover => &mut self.turnovers,
            Action::MadeTwo
            | Action::MadeThree
            | Action::MissedTwo
            | Action::MissedThree
            | Action::MadeShot
            | Action::MissedShot => return,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    pub fn add(&mut self, other: &BoxScore) {
        self.points = self.points.saturating_add(other.points);
        self.assists = self.assists.saturating_add(other.assists);
        self.steals = self.steals.saturating_add(other.steals);
        self.blocks = self.blocks.saturating_add(other.blocks);
        self.offensive_rebounds = self.offensive_rebounds.saturating_add(other.offensive_rebounds);
        self.defensive_rebounds = self.defensive_rebounds.saturating_add(other.defensive_rebounds);
        self.turnovers = self.turnovers.saturating_add(other.turnovers);
    }

    pub fn rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }
}
