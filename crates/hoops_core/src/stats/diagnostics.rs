//! Per-event / per-record problems recovered during aggregation.
//!
//! A skipped input never aborts the batch; the skip is logged and reported
//! here next to the successful result.

use serde::{Deserialize, Serialize};

use crate::models::{GameId, PlayerId, Scope, ScopeLevel, SeasonId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Shot event without a location
    MissingCoordinate,
    /// Shot event with a non-finite location
    InvalidCoordinate { x: f64, y: f64 },
    /// Event belongs to another player / game / season
    ScopeMismatch {
        player_id: PlayerId,
        game_id: GameId,
        season_id: SeasonId,
    },
    /// Record of the wrong level handed to a fold
    WrongScopeLevel { expected: ScopeLevel, found: ScopeLevel },
    /// Record of the right level but another owner
    RecordOutOfScope { found: Scope },
    /// Second record for a game / season already folded
    DuplicateRecord { found: Scope },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skipped {
    /// Position of the input in the slice handed to the aggregator
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub skipped: Vec<Skipped>,
    /// Shots whose declared value (2 / 3) disagrees with the classified zone.
    /// They are kept and scored by zone.
    pub value_mismatches: u32,
}

impl Diagnostics {
    pub fn skip(&mut self, index: usize, reason: SkipReason) {
        self.skipped.push(Skipped { index, reason });
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.value_mismatches == 0
    }

    /// Fold the diagnostics of a lower stage in. Indices of `other` refer to
    /// its own input and are kept as they are.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.skipped.extend(other.skipped);
        self.value_mismatches = self.value_mismatches.saturating_add(other.value_mismatches);
    }

    pub fn count_where(&self, pred: impl Fn(&SkipReason) -> bool) -> usize {
        self.skipped.iter().filter(|s| pred(&s.reason)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_and_count() {
        let mut diag = Diagnostics::default();
        assert!(diag.is_clean());
        diag.skip(3, SkipReason::MissingCoordinate);
        diag.skip(5, SkipReason::InvalidCoordinate { x: f64::NAN, y: 1.0 });
        assert_eq!(diag.skipped_count(), 2);
        assert_eq!(diag.count_where(|r| matches!(r, SkipReason::MissingCoordinate)), 1);
        assert!(!diag.is_clean());
    }

    #[test]
    fn test_absorb() {
        let mut a = Diagnostics { value_mismatches: 1, ..Default::default() };
        let mut b = Diagnostics { value_mismatches: 2, ..Default::default() };
        b.skip(0, SkipReason::MissingCoordinate);
        a.absorb(b);
        assert_eq!(a.value_mismatches, 3);
        assert_eq!(a.skipped_count(), 1);
    }

    #[test]
    fn test_reason_serde_is_tagged() {
        let reason = SkipReason::WrongScopeLevel {
            expected: ScopeLevel::Game,
            found: ScopeLevel::Season,
        };
        let value = serde_json::to_value(&reason).unwrap();
        assert_eq!(value["kind"], "wrong_scope_level");
        assert_eq!(value["expected"], "game");
    }
}
