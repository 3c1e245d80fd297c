use thiserror::Error;

use crate::court::Zone;

/// Structural failures. These abort the whole call; per-event problems are
/// reported through [`crate::stats::Diagnostics`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Invalid court geometry: {name} = {value}")]
    InvalidGeometry { name: &'static str, value: f64 },

    #[error("Invalid coordinate: ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    #[error("Zone table is missing zones: {}", missing.join(", "))]
    IncompleteZoneTable { missing: Vec<&'static str> },

    #[error("Zone {zone} has {makes} makes but only {attempts} attempts")]
    InconsistentZoneLine { zone: Zone, makes: u32, attempts: u32 },

    #[error("Unknown zone label: {0}")]
    UnknownZone(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl StatsError {
    /// Geometry and table-shape errors point at a bug upstream; a bad
    /// coordinate is the caller's input problem.
    pub fn is_structural(&self) -> bool {
        !matches!(self, StatsError::InvalidCoordinate { .. })
    }
}

impl From<serde_yaml::Error> for StatsError {
    fn from(err: serde_yaml::Error) -> Self {
        StatsError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::Config(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Geometry(#[from] StatsError),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, StatsError>;
