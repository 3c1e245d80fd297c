//! Half-court geometry and shot-zone classification.

pub mod geometry;
pub mod zone;

pub use geometry::{CourtGeometry, UNITS_PER_FOOT};
pub use zone::{classify_shot, Band, Side, Zone, ZoneClassifier};
