//! Batch recomputation for every player of a game or season.
//!
//! Each player's aggregate is independent, so larger rosters are spread over
//! the rayon pool. Output is ordered by player id whatever the input order.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use super::game::GameAggregator;
use super::rollup::SeasonAggregator;
use crate::court::ZoneClassifier;
use crate::models::{Event, GameId, GameKey, PlayerId, SeasonId, SeasonKey};
use crate::stats::{AggregateRecord, AggregateReport};

/// Rosters up to this size are aggregated on the calling thread.
const PARALLEL_MIN_PLAYERS: usize = 8;

/// One game record per player appearing in `events`.
///
/// Events of another game or season stay in their player's batch and come
/// back as scope-mismatch diagnostics.
pub fn aggregate_game_roster(
    game_id: GameId,
    season_id: SeasonId,
    events: &[Event],
    classifier: &ZoneClassifier,
) -> Vec<AggregateReport> {
    let mut by_player: BTreeMap<PlayerId, Vec<(usize, &Event)>> = BTreeMap::new();
    for (index, event) in events.iter().enumerate() {
        by_player.entry(event.player_id).or_default().push((index, event));
    }
    debug!(game = game_id.0, players = by_player.len(), "aggregating game roster");

    let run = |(player_id, group): (PlayerId, Vec<(usize, &Event)>)| {
        let key = GameKey::new(player_id, game_id, season_id);
        GameAggregator::new(key, classifier).aggregate_indexed(group)
    };
    if by_player.len() > PARALLEL_MIN_PLAYERS {
        by_player.into_iter().collect::<Vec<_>>().into_par_iter().map(run).collect()
    } else {
        by_player.into_iter().map(run).collect()
    }
}

/// One season record per player appearing in `games`.
pub fn aggregate_season_roster(
    season_id: SeasonId,
    games: &[AggregateRecord],
    classifier: &ZoneClassifier,
) -> Vec<AggregateReport> {
    let mut by_player: BTreeMap<PlayerId, Vec<AggregateRecord>> = BTreeMap::new();
    for record in games {
        by_player.entry(record.player_id()).or_default().push(record.clone());
    }
    debug!(season = season_id.0, players = by_player.len(), "aggregating season roster");

    let run = |(player_id, records): (PlayerId, Vec<AggregateRecord>)| {
        SeasonAggregator::new(SeasonKey::new(player_id, season_id), classifier).fold(&records)
    };
    if by_player.len() > PARALLEL_MIN_PLAYERS {
        by_player.into_iter().collect::<Vec<_>>().into_par_iter().map(run).collect()
    } else {
        by_player.into_iter().map(run).collect()
    }
}
