//! Event aggregation at game, season and career level.
//!
//! ```
//! use hoops_core::aggregate::aggregate;
//! use hoops_core::court::ZoneClassifier;
//! use hoops_core::models::{CareerKey, PlayerId, Scope};
//!
//! let classifier = ZoneClassifier::standard();
//! let report = aggregate(&[], Scope::Career(CareerKey::new(PlayerId(1))), &classifier);
//! assert_eq!(report.record.games_played, 0);
//! ```

pub mod batch;
pub mod game;
pub mod rollup;

pub use batch::{aggregate_game_roster, aggregate_season_roster};
pub use game::GameAggregator;
pub use rollup::{CareerAggregator, SeasonAggregator};

use crate::court::ZoneClassifier;
use crate::models::{Event, Scope};
use crate::stats::AggregateReport;

/// Aggregate `events` for one scope. Events outside the scope are skipped
/// and reported; they never fail the call.
pub fn aggregate(events: &[Event], scope: Scope, classifier: &ZoneClassifier) -> AggregateReport {
    match scope {
        Scope::Game(key) => GameAggregator::new(key, classifier).aggregate(events),
        Scope::Season(key) => SeasonAggregator::new(key, classifier).aggregate_events(events),
        Scope::Career(key) => CareerAggregator::new(key, classifier).aggregate_events(events),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, CourtPoint, GameId, GameKey, PlayerId, SeasonId, SeasonKey};
    use chrono::{TimeZone, Utc};
    use sha2::{Digest, Sha256};

    fn events() -> Vec<Event> {
        let ts = Utc.with_ymd_and_hms(2025, 2, 14, 18, 0, 0).unwrap();
        let shot = |game: u64, made: bool, x: f64, y: f64| {
            Event::shot(PlayerId(1), GameId(game), SeasonId(1), made, x, y, ts)
        };
        vec![
            shot(1, true, 0.0, 0.0),
            shot(1, false, 0.0, 300.0),
            shot(2, true, 200.0, 200.0),
            Event::new(PlayerId(1), GameId(2), SeasonId(1), Action::Assist, None, ts),
            Event::new(
                PlayerId(1),
                GameId(2),
                SeasonId(1),
                Action::MadeTwo,
                Some(CourtPoint::new(-60.0, 120.0)),
                ts,
            ),
        ]
    }

    fn digest(report: &AggregateReport) -> String {
        let json = report.record.to_json().unwrap();
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    #[test]
    fn test_dispatch_by_scope() {
        let classifier = ZoneClassifier::standard();
        let events = events();

        let game = aggregate(
            &events,
            Scope::Game(GameKey::new(PlayerId(1), GameId(1), SeasonId(1))),
            &classifier,
        );
        assert_eq!(game.record.totals.points, 2);
        assert_eq!(game.skipped_count(), 3);

        let season = aggregate(
            &events,
            Scope::Season(SeasonKey::new(PlayerId(1), SeasonId(1))),
            &classifier,
        );
        assert_eq!(season.record.games_played, 2);
        assert_eq!(season.record.totals.points, 2 + 3 + 2);
        assert_eq!(season.skipped_count(), 0);
    }

    #[test]
    fn test_reaggregation_is_byte_identical() {
        let classifier = ZoneClassifier::standard();
        let events = events();
        for scope in [
            Scope::Game(GameKey::new(PlayerId(1), GameId(2), SeasonId(1))),
            Scope::Season(SeasonKey::new(PlayerId(1), SeasonId(1))),
            Scope::Career(crate::models::CareerKey::new(PlayerId(1))),
        ] {
            let first = aggregate(&events, scope, &classifier);
            let second = aggregate(&events, scope, &classifier);
            assert_eq!(first.record.to_json().unwrap(), second.record.to_json().unwrap());
            assert_eq!(digest(&first), digest(&second));
        }
    }
}
