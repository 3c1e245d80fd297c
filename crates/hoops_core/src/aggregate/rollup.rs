//! Season / Career Rollups
//!
//! Both levels fold finished child records (games into a season, seasons
//! into a career) by summing box scores and merging zone tables. Folding raw
//! events goes through the same path: events are grouped into games, games
//! into seasons, and the resulting records are folded, so every route to a
//! total produces the same numbers.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::game::GameAggregator;
use crate::court::ZoneClassifier;
use crate::models::{
    CareerKey, Event, GameId, GameKey, Scope, ScopeLevel, SeasonId, SeasonKey,
};
use crate::stats::{AggregateRecord, AggregateReport, BoxScore, Diagnostics, SkipReason, ZoneStatsTable};

type IndexedEvents<'e> = Vec<(usize, &'e Event)>;

/// Running sum of child records.
#[derive(Default)]
struct Rollup {
    totals: BoxScore,
    zones: ZoneStatsTable,
    games_played: u32,
    diagnostics: Diagnostics,
}

impl Rollup {
    /// A game record counts as one game whatever its stored `games_played`;
    /// season records carry their own count.
    fn add(&mut self, record: &AggregateRecord, child_level: ScopeLevel) {
        self.totals.add(&record.totals);
        self.zones.merge(&record.zones);
        let games = match child_level {
            ScopeLevel::Game => 1,
            _ => record.games_played,
        };
        self.games_played = self.games_played.saturating_add(games);
    }

    /// Fold `records` of `child_level`. `child_id` returns the child's id
    /// within the parent, or `None` when the record belongs to someone else.
    fn fold(
        &mut self,
        records: &[AggregateRecord],
        child_level: ScopeLevel,
        child_id: impl Fn(&Scope) -> Option<u64>,
    ) {
        let mut seen = BTreeSet::new();
        for (index, record) in records.iter().enumerate() {
            let found = record.scope.level();
            if found != child_level {
                warn!(index, expected = %child_level, found = %found, "skipping record of wrong level");
                self.diagnostics.skip(
                    index,
                    SkipReason::WrongScopeLevel { expected: child_level, found },
                );
                continue;
            }

            let Some(id) = child_id(&record.scope) else {
                warn!(index, scope = %record.scope, "skipping record outside rollup scope");
                self.diagnostics
                    .skip(index, SkipReason::RecordOutOfScope { found: record.scope });
                continue;
            };

            if !seen.insert(id) {
                warn!(index, scope = %record.scope, "skipping duplicate record");
                self.diagnostics
                    .skip(index, SkipReason::DuplicateRecord { found: record.scope });
                continue;
            }

            self.add(record, child_level);
        }
    }

    fn finish(self, scope: Scope) -> AggregateReport {
        debug!(
            scope = %scope,
            games = self.games_played,
            skipped = self.diagnostics.skipped_count(),
            points = self.totals.points,
            "rollup finished"
        );
        AggregateReport {
            record: AggregateRecord::new(scope, self.totals, self.games_played, self.zones),
            diagnostics: self.diagnostics,
        }
    }
}

/// Drop events outside `scope`, recording each as a scope mismatch.
fn partition_in_scope<'e>(
    events: impl IntoIterator<Item = (usize, &'e Event)>,
    scope: &Scope,
    diagnostics: &mut Diagnostics,
) -> IndexedEvents<'e> {
    let mut kept = Vec::new();
    for (index, event) in events {
        if scope.matches(event) {
            kept.push((index, event));
        } else {
            warn!(index, scope = %scope, "skipping event outside rollup scope");
            diagnostics.skip(
                index,
                SkipReason::ScopeMismatch {
                    player_id: event.player_id,
                    game_id: event.game_id,
                    season_id: event.season_id,
                },
            );
        }
    }
    kept
}

pub struct SeasonAggregator<'a> {
    key: SeasonKey,
    classifier: &'a ZoneClassifier,
}

impl<'a> SeasonAggregator<'a> {
    pub fn new(key: SeasonKey, classifier: &'a ZoneClassifier) -> Self {
        Self { key, classifier }
    }

    pub fn key(&self) -> SeasonKey {
        self.key
    }

    /// Fold game records of this player and season. Records of another
    /// level, owner or season, and repeated games, are skipped.
    pub fn fold(&self, games: &[AggregateRecord]) -> AggregateReport {
        let key = self.key;
        let mut rollup = Rollup::default();
        rollup.fold(games, ScopeLevel::Game, |scope| match scope {
            Scope::Game(g) if g.player_id == key.player_id && g.season_id == key.season_id => {
                Some(g.game_id.0)
            }
            _ => None,
        });
        rollup.finish(Scope::Season(key))
    }

    /// Aggregate the season straight from events.
    ///
    /// Every game id with an in-scope event counts as played, even when all
    /// of that game's events were skipped, so this agrees with folding the
    /// game records built from the same events.
    pub fn aggregate_events(&self, events: &[Event]) -> AggregateReport {
        self.aggregate_indexed(events.iter().enumerate())
    }

    pub(crate) fn aggregate_indexed<'e>(
        &self,
        events: impl IntoIterator<Item = (usize, &'e Event)>,
    ) -> AggregateReport {
        let mut diagnostics = Diagnostics::default();
        let kept = partition_in_scope(events, &Scope::Season(self.key), &mut diagnostics);

        let mut by_game: BTreeMap<GameId, IndexedEvents<'e>> = BTreeMap::new();
        for (index, event) in kept {
            by_game.entry(event.game_id).or_default().push((index, event));
        }

        let mut games = Vec::with_capacity(by_game.len());
        for (game_id, group) in by_game {
            let key = GameKey::new(self.key.player_id, game_id, self.key.season_id);
            let report = GameAggregator::new(key, self.classifier).aggregate_indexed(group);
            diagnostics.absorb(report.diagnostics);
            games.push(report.record);
        }

        let mut report = self.fold(&games);
        diagnostics.absorb(report.diagnostics);
        report.diagnostics = diagnostics;
        report
    }
}

pub struct CareerAggregator<'a> {
    key: CareerKey,
    classifier: &'a ZoneClassifier,
}

impl<'a> CareerAggregator<'a> {
    pub fn new(key: CareerKey, classifier: &'a ZoneClassifier) -> Self {
        Self { key, classifier }
    }

    pub fn key(&self) -> CareerKey {
        self.key
    }

    /// Fold season records of this player. Repeated seasons are skipped.
    pub fn fold(&self, seasons: &[AggregateRecord]) -> AggregateReport {
        let key = self.key;
        let mut rollup = Rollup::default();
        rollup.fold(seasons, ScopeLevel::Season, |scope| match scope {
            Scope::Season(s) if s.player_id == key.player_id => Some(s.season_id.0),
            _ => None,
        });
        rollup.finish(Scope::Career(key))
    }

    /// Aggregate the career straight from events. Games count as played
    /// under the same rule as [`SeasonAggregator::aggregate_events`].
    pub fn aggregate_events(&self, events: &[Event]) -> AggregateReport {
        let mut diagnostics = Diagnostics::default();
        let kept = partition_in_scope(
            events.iter().enumerate(),
            &Scope::Career(self.key),
            &mut diagnostics,
        );

        let mut by_season: BTreeMap<SeasonId, IndexedEvents<'_>> = BTreeMap::new();
        for (index, event) in kept {
            by_season.entry(event.season_id).or_default().push((index, event));
        }

        let mut seasons = Vec::with_capacity(by_season.len());
        for (season_id, group) in by_season {
            let key = SeasonKey::new(self.key.player_id, season_id);
            let report = SeasonAggregator::new(key, self.classifier).aggregate_indexed(group);
            diagnostics.absorb(report.diagnostics);
            seasons.push(report.record);
        }

        let mut report = self.fold(&seasons);
        diagnostics.absorb(report.diagnostics);
        report.diagnostics = diagnostics;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::Zone;
    use crate::models::{Action, CourtPoint, PlayerId};
    use crate::stats::ShotLine;
    use chrono::{TimeZone, Utc};

    const PLAYER: PlayerId = PlayerId(11);

    fn ev(game: u64, season: u64, action: Action, at: Option<(f64, f64)>) -> Event {
        Event::new(
            PLAYER,
            GameId(game),
            SeasonId(season),
            action,
            at.map(|(x, y)| CourtPoint::new(x, y)),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(game as i64),
        )
    }

    fn season_events() -> Vec<Event> {
        vec![
            ev(1, 2024, Action::MadeShot, Some((0.0, 10.0))),
            ev(1, 2024, Action::MissedShot, Some((0.0, 300.0))),
            ev(1, 2024, Action::Assist, None),
            ev(2, 2024, Action::MadeShot, Some((-230.0, 30.0))),
            ev(2, 2024, Action::Steal, None),
            ev(2, 2024, Action::DefensiveRebound, None),
            ev(3, 2024, Action::MadeShot, Some((150.0, 100.0))),
            ev(3, 2024, Action::MadeShot, Some((0.0, 300.0))),
            ev(3, 2024, Action::Turnover, None),
        ]
    }

    fn game_records(classifier: &ZoneClassifier, events: &[Event]) -> Vec<AggregateRecord> {
        let mut ids: Vec<(GameId, SeasonId)> =
            events.iter().map(|e| (e.game_id, e.season_id)).collect();
        ids.sort();
        ids.dedup();
        ids.into_iter()
            .map(|(game, season)| {
                let key = GameKey::new(PLAYER, game, season);
                GameAggregator::new(key, classifier).aggregate(events).record
            })
            .collect()
    }

    #[test]
    fn test_season_fold_sums_games() {
        let classifier = ZoneClassifier::standard();
        let events = season_events();
        let games = game_records(&classifier, &events);
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);
        let report = season.fold(&games);
        let record = &report.record;

        assert_eq!(record.games_played, 3);
        assert_eq!(record.totals.points, 2 + 3 + 2 + 3);
        assert_eq!(record.totals.assists, 1);
        assert_eq!(record.totals.steals, 1);
        assert_eq!(record.totals.turnovers, 1);
        assert_eq!(record.zones.line(Zone::ThreeC), ShotLine::new(2, 1));
        assert_eq!(record.zones.line(Zone::ThreeL), ShotLine::new(1, 1));
        assert_eq!(record.zones.points(), record.totals.points);
        assert!(report.diagnostics.is_clean());
    }

    #[test]
    fn test_season_from_events_equals_fold_of_games() {
        let classifier = ZoneClassifier::standard();
        let events = season_events();
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);

        let folded = season.fold(&game_records(&classifier, &events)).record;
        let direct = season.aggregate_events(&events).record;
        assert_eq!(folded, direct);
    }

    #[test]
    fn test_fold_order_does_not_matter() {
        let classifier = ZoneClassifier::standard();
        let mut games = game_records(&classifier, &season_events());
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);
        let forward = season.fold(&games).record;
        games.reverse();
        let backward = season.fold(&games).record;
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_duplicate_game_is_not_double_counted() {
        let classifier = ZoneClassifier::standard();
        let mut games = game_records(&classifier, &season_events());
        games.push(games[0].clone());
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);
        let report = season.fold(&games);

        assert_eq!(report.record.games_played, 3);
        assert_eq!(report.record.totals.points, 10);
        assert_eq!(report.skipped_count(), 1);
        assert!(matches!(
            report.diagnostics.skipped[0].reason,
            SkipReason::DuplicateRecord { .. }
        ));
        assert_eq!(report.diagnostics.skipped[0].index, 3);
    }

    #[test]
    fn test_stored_game_count_is_ignored_by_season_fold() {
        let classifier = ZoneClassifier::standard();
        let mut stored = game_records(&classifier, &season_events());
        let mut json = serde_json::to_value(&stored[0]).unwrap();
        json["games_played"] = serde_json::json!(7);
        stored[0] = serde_json::from_value(json).unwrap();
        assert_eq!(stored[0].games_played, 7);
        stored[1].games_played = 0;

        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);
        let report = season.fold(&stored);
        assert_eq!(report.record.games_played, 3);
        assert_eq!(report.record, season.aggregate_events(&season_events()).record);
    }

    #[test]
    fn test_season_fold_skips_foreign_records() {
        let classifier = ZoneClassifier::standard();
        let games = game_records(&classifier, &season_events());
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);

        let mut inputs = games.clone();
        // Another season's game
        let other = GameKey::new(PLAYER, GameId(50), SeasonId(2023));
        inputs.push(AggregateRecord::empty(Scope::Game(other), 1));
        // A season record handed to a season fold
        inputs.push(season.fold(&games).record);

        let report = season.fold(&inputs);
        assert_eq!(report.record.games_played, 3);
        assert_eq!(report.skipped_count(), 2);
        assert!(matches!(
            report.diagnostics.skipped[0].reason,
            SkipReason::RecordOutOfScope { .. }
        ));
        assert!(matches!(
            report.diagnostics.skipped[1].reason,
            SkipReason::WrongScopeLevel { expected: ScopeLevel::Game, found: ScopeLevel::Season }
        ));
    }

    #[test]
    fn test_empty_season() {
        let classifier = ZoneClassifier::standard();
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);
        let report = season.aggregate_events(&[]);
        assert_eq!(report.record.games_played, 0);
        assert_eq!(report.record.totals, BoxScore::default());
        assert!(report.record.zones.is_empty());
        assert_eq!(report.record.per_game(), None);
    }

    #[test]
    fn test_season_events_skip_other_seasons() {
        let classifier = ZoneClassifier::standard();
        let mut events = season_events();
        events.push(ev(9, 2023, Action::MadeShot, Some((0.0, 0.0))));
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier);
        let report = season.aggregate_events(&events);
        assert_eq!(report.record.games_played, 3);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.diagnostics.skipped[0].index, events.len() - 1);
    }

    #[test]
    fn test_event_diagnostics_keep_original_indices() {
        let classifier = ZoneClassifier::standard();
        let events = vec![
            ev(1, 2024, Action::Assist, None),
            ev(2, 2024, Action::MadeShot, None),
            ev(1, 2024, Action::MissedShot, Some((f64::INFINITY, 0.0))),
        ];
        let career = CareerAggregator::new(CareerKey::new(PLAYER), &classifier);
        let report = career.aggregate_events(&events);
        let mut indices: Vec<usize> = report.diagnostics.skipped.iter().map(|s| s.index).collect();
        indices.sort();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(report.record.totals.assists, 1);
        // Games with only skipped events still count as played
        assert_eq!(report.record.games_played, 2);
    }

    #[test]
    fn test_career_paths_agree() {
        let classifier = ZoneClassifier::standard();
        let mut events = season_events();
        events.extend([
            ev(10, 2025, Action::MadeShot, Some((0.0, 0.0))),
            ev(10, 2025, Action::MadeShot, Some((225.0, 100.0))),
            ev(11, 2025, Action::MissedShot, Some((-70.0, 100.0))),
            ev(11, 2025, Action::Block, None),
        ]);

        let games = game_records(&classifier, &events);
        let seasons: Vec<AggregateRecord> = [2024, 2025]
            .into_iter()
            .map(|s| {
                SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(s)), &classifier)
                    .fold(&games)
                    .record
            })
            .collect();

        let career = CareerAggregator::new(CareerKey::new(PLAYER), &classifier);
        let from_seasons = career.fold(&seasons).record;
        let from_events = career.aggregate_events(&events).record;
        assert_eq!(from_seasons, from_events);

        // Folding every game directly gives the same totals
        let mut totals = BoxScore::default();
        let mut zones = ZoneStatsTable::new();
        for game in &games {
            totals.add(&game.totals);
            zones.merge(&game.zones);
        }
        assert_eq!(from_seasons.totals, totals);
        assert_eq!(from_seasons.zones, zones);
        assert_eq!(from_seasons.games_played, games.len() as u32);
        assert_eq!(from_seasons.totals.points, 10 + 2 + 3);
    }

    #[test]
    fn test_career_skips_duplicate_seasons() {
        let classifier = ZoneClassifier::standard();
        let games = game_records(&classifier, &season_events());
        let season = SeasonAggregator::new(SeasonKey::new(PLAYER, SeasonId(2024)), &classifier)
            .fold(&games)
            .record;
        let career = CareerAggregator::new(CareerKey::new(PLAYER), &classifier);
        let report = career.fold(&[season.clone(), season]);
        assert_eq!(report.record.games_played, 3);
        assert_eq!(report.skipped_count(), 1);
    }
}
