//! Input data model: events, identifiers and aggregation scopes.

pub mod event;
pub mod scope;

pub use event::{Action, CourtPoint, Event, GameId, PlayerId, SeasonId, ShotValue};
pub use scope::{CareerKey, GameKey, Scope, ScopeLevel, SeasonKey};
