//! Game Aggregator
//!
//! Folds one game's events for one player into a game record. Shots are
//! classified and scored by zone; every other action bumps its box-score
//! counter.

use tracing::{debug, warn};

use crate::court::ZoneClassifier;
use crate::models::{Event, GameKey, Scope};
use crate::stats::{AggregateRecord, AggregateReport, BoxScore, Diagnostics, SkipReason, ZoneStatsTable};

pub struct GameAggregator<'a> {
    key: GameKey,
    classifier: &'a ZoneClassifier,
}

impl<'a> GameAggregator<'a> {
    pub fn new(key: GameKey, classifier: &'a ZoneClassifier) -> Self {
        Self { key, classifier }
    }

    pub fn key(&self) -> GameKey {
        self.key
    }

    /// Aggregate a game. Event order does not matter and the same events
    /// always produce the same record.
    pub fn aggregate(&self, events: &[Event]) -> AggregateReport {
        self.aggregate_indexed(events.iter().enumerate())
    }

    /// Aggregate events tagged with their position in the caller's input, so
    /// diagnostics point back at it.
    pub(crate) fn aggregate_indexed<'e>(
        &self,
        events: impl IntoIterator<Item = (usize, &'e Event)>,
    ) -> AggregateReport {
        let mut totals = BoxScore::default();
        let mut zones = ZoneStatsTable::new();
        let mut diagnostics = Diagnostics::default();
        let mut seen = 0usize;

        for (index, event) in events {
            seen += 1;

            if !self.key.matches(event) {
                warn!(
                    index,
                    player = event.player_id.0,
                    game = event.game_id.0,
                    season = event.season_id.0,
                    "skipping event outside game scope"
                );
                diagnostics.skip(
                    index,
                    SkipReason::ScopeMismatch {
                        player_id: event.player_id,
                        game_id: event.game_id,
                        season_id: event.season_id,
                    },
                );
                continue;
            }

            let Some(made) = event.action.shot_made() else {
                totals.record_action(event.action);
                continue;
            };

            let point = match event.location {
                None => {
                    warn!(index, action = event.action.as_str(), "skipping shot without location");
                    diagnostics.skip(index, SkipReason::MissingCoordinate);
                    continue;
                }
                Some(point) if !point.is_finite() => {
                    warn!(index, x = point.x, y = point.y, "skipping shot with non-finite location");
                    diagnostics.skip(index, SkipReason::InvalidCoordinate { x: point.x, y: point.y });
                    continue;
                }
                Some(point) => point,
            };

            let zone = self.classifier.classify(point.x, point.y);
            zones.record_attempt(zone, made);
            if made {
                totals.add_points(zone.shot_value());
            }

            if let Some(declared) = event.action.declared_value() {
                if declared.points() != zone.shot_value() {
                    debug!(
                        index,
                        declared = declared.points(),
                        zone = zone.label(),
                        "declared shot value disagrees with zone; scoring by zone"
                    );
                    diagnostics.value_mismatches += 1;
                }
            }
        }

        debug!(
            scope = %Scope::Game(self.key),
            events = seen,
            skipped = diagnostics.skipped_count(),
            points = totals.points,
            "game aggregated"
        );

        AggregateReport {
            record: AggregateRecord::new(Scope::Game(self.key), totals, 1, zones),
            diagnostics,
        }
    }
}
