//! Statistics value types: zone tables, box scores, records and diagnostics.

pub mod box_score;
pub mod diagnostics;
pub mod record;
pub mod zone_table;

pub use box_score::BoxScore;
pub use diagnostics::{Diagnostics, SkipReason, Skipped};
pub use record::{AggregateRecord, AggregateReport, PerGameAverages};
pub use zone_table::{ShotLine, ZoneStatsTable};
