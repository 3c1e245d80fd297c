//! # hoops_core - Shot-Zone Classification & Statistical Aggregation Engine
//!
//! Turns basketball play-by-play events into per-game, per-season and career
//! statistics, including a spatial shooting profile over 14 named court
//! zones, and renders that profile as a court image.
//!
//! ## Features
//! - One shared [`CourtGeometry`] for classification and drawing
//! - Deterministic aggregation: same events, byte-identical records
//! - Season and career totals from stored child records or raw events
//! - Per-event problems reported as diagnostics, never as failures
//! - PNG / JPEG / BMP court heatmaps
//!
//! ```rust
//! use hoops_core::{aggregate, classify_shot, Scope, Zone, ZoneClassifier};
//! use hoops_core::models::{Event, GameId, GameKey, PlayerId, SeasonId};
//! use chrono::Utc;
//!
//! assert_eq!(classify_shot(0.0, 300.0), Zone::ThreeC);
//!
//! let key = GameKey::new(PlayerId(23), GameId(1), SeasonId(2025));
//! let events = [Event::shot(PlayerId(23), GameId(1), SeasonId(2025), true, -225.0, 20.0, Utc::now())];
//! let report = aggregate(&events, Scope::Game(key), &ZoneClassifier::standard());
//! assert_eq!(report.record.totals.points, 3);
//! ```

pub mod aggregate;
pub mod config;
pub mod court;
pub mod error;
pub mod models;
pub mod render;
pub mod stats;

pub use aggregate::aggregate;
pub use config::EngineConfig;
pub use court::{classify_shot, CourtGeometry, Zone, ZoneClassifier};
pub use error::{RenderError, Result, StatsError};
pub use models::{Action, Event, Scope};
pub use render::{CourtRenderer, RenderConfig, RenderFormat, RenderInput, RenderedImage};
pub use stats::{AggregateRecord, AggregateReport, ZoneStatsTable};

/// Crate version, stamped into CLI output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
