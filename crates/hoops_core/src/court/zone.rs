//! Shot Zone Definitions
//!
//! The 14 closed shot zones and the classifier that maps a court coordinate
//! onto them.
//!
//! ## Layout
//! - Restricted area: circle of `restricted_radius` around the hoop
//! - Paint: L / C / R strips of the key, up to the free-throw line
//! - Mid-range: L / LC / C / RC / R angle buckets inside the arc
//! - Three: L / LC / C / RC / R angle buckets on or beyond the arc, plus the
//!   corners

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::CourtGeometry;
use crate::error::{Result, StatsError};

/// Shot zone identifier (14 zones)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "MID_L")]
    MidL,
    #[serde(rename = "MID_LC")]
    MidLc,
    #[serde(rename = "MID_C")]
    MidC,
    #[serde(rename = "MID_RC")]
    MidRc,
    #[serde(rename = "MID_R")]
    MidR,
    #[serde(rename = "THREE_L")]
    ThreeL,
    #[serde(rename = "THREE_LC")]
    ThreeLc,
    #[serde(rename = "THREE_C")]
    ThreeC,
    #[serde(rename = "THREE_RC")]
    ThreeRc,
    #[serde(rename = "THREE_R")]
    ThreeR,
    #[serde(rename = "REST_AREA")]
    RestArea,
    #[serde(rename = "PAINT_L")]
    PaintL,
    #[serde(rename = "PAINT_C")]
    PaintC,
    #[serde(rename = "PAINT_R")]
    PaintR,
}

/// Distance band of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Restricted,
    Paint,
    Mid,
    Three,
}

/// Angle bucket, left to right when facing the basket from the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    LeftCenter,
    Center,
    RightCenter,
    Right,
}

impl Side {
    pub const ALL: [Side; 5] = [
        Side::Left,
        Side::LeftCenter,
        Side::Center,
        Side::RightCenter,
        Side::Right,
    ];

    pub fn index(&self) -> usize {
        match self {
            Side::Left => 0,
            Side::LeftCenter => 1,
            Side::Center => 2,
            Side::RightCenter => 3,
            Side::Right => 4,
        }
    }

    /// Bucket an angle in degrees measured from the axis pointing away from
    /// the basket (positive = right).
    ///
    /// Bounds: `< -wing` L, `[-wing, -center)` LC, `[-center, center]` C,
    /// `(center, wing]` RC, `> wing` R.
    pub fn from_angle(theta_deg: f64, geometry: &CourtGeometry) -> Side {
        let center = geometry.center_angle_deg;
        let wing = geometry.wing_angle_deg;
        if theta_deg < -wing {
            Side::Left
        } else if theta_deg < -center {
            Side::LeftCenter
        } else if theta_deg <= center {
            Side::Center
        } else if theta_deg <= wing {
            Side::RightCenter
        } else {
            Side::Right
        }
    }

    /// Mirror side (left <-> right)
    pub fn mirror(&self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::LeftCenter => Side::RightCenter,
            Side::Center => Side::Center,
            Side::RightCenter => Side::LeftCenter,
            Side::Right => Side::Left,
        }
    }
}

/// (band, side) dispatch for the arc-bucketed zones. Row 0 = mid, row 1 = three.
const ARC_ZONES: [[Zone; 5]; 2] = [
    [Zone::MidL, Zone::MidLc, Zone::MidC, Zone::MidRc, Zone::MidR],
    [Zone::ThreeL, Zone::ThreeLc, Zone::ThreeC, Zone::ThreeRc, Zone::ThreeR],
];

impl Zone {
    /// All zones in table order
    pub const ALL: [Zone; 14] = [
        Zone::MidL,
        Zone::MidLc,
        Zone::MidC,
        Zone::MidRc,
        Zone::MidR,
        Zone::ThreeL,
        Zone::ThreeLc,
        Zone::ThreeC,
        Zone::ThreeRc,
        Zone::ThreeR,
        Zone::RestArea,
        Zone::PaintL,
        Zone::PaintC,
        Zone::PaintR,
    ];

    pub const COUNT: usize = 14;

    /// Get zone index (0-13)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Mid-range or three-point zone for an angle bucket.
    pub fn arc_zone(side: Side, is_three: bool) -> Zone {
        ARC_ZONES[usize::from(is_three)][side.index()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zone::MidL => "MID_L",
            Zone::MidLc => "MID_LC",
            Zone::MidC => "MID_C",
            Zone::MidRc => "MID_RC",
            Zone::MidR => "MID_R",
            Zone::ThreeL => "THREE_L",
            Zone::ThreeLc => "THREE_LC",
            Zone::ThreeC => "THREE_C",
            Zone::ThreeRc => "THREE_RC",
            Zone::ThreeR => "THREE_R",
            Zone::RestArea => "REST_AREA",
            Zone::PaintL => "PAINT_L",
            Zone::PaintC => "PAINT_C",
            Zone::PaintR => "PAINT_R",
        }
    }

    pub fn band(&self) -> Band {
        match self {
            Zone::MidL | Zone::MidLc | Zone::MidC | Zone::MidRc | Zone::MidR => Band::Mid,
            Zone::ThreeL | Zone::ThreeLc | Zone::ThreeC | Zone::ThreeRc | Zone::ThreeR => {
                Band::Three
            }
            Zone::RestArea => Band::Restricted,
            Zone::PaintL | Zone::PaintC | Zone::PaintR => Band::Paint,
        }
    }

    /// Angle bucket, or `None` for the restricted area. Paint strips map to
    /// L / C / R.
    pub fn side(&self) -> Option<Side> {
        match self {
            Zone::MidL | Zone::ThreeL | Zone::PaintL => Some(Side::Left),
            Zone::MidLc | Zone::ThreeLc => Some(Side::LeftCenter),
            Zone::MidC | Zone::ThreeC | Zone::PaintC => Some(Side::Center),
            Zone::MidRc | Zone::ThreeRc => Some(Side::RightCenter),
            Zone::MidR | Zone::ThreeR | Zone::PaintR => Some(Side::Right),
            Zone::RestArea => None,
        }
    }

    pub fn is_three(&self) -> bool {
        self.band() == Band::Three
    }

    /// Points a made shot from this zone is worth.
    pub fn shot_value(&self) -> u32 {
        if self.is_three() {
            3
        } else {
            2
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Zone {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Zone::ALL
            .iter()
            .copied()
            .find(|zone| zone.label() == s)
            .ok_or_else(|| StatsError::UnknownZone(s.to_string()))
    }
}

/// Maps court coordinates to zones for one fixed geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneClassifier {
    geometry: CourtGeometry,
}

impl Default for ZoneClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl ZoneClassifier {
    /// Classifier over the canonical court.
    pub const fn standard() -> Self {
        Self { geometry: CourtGeometry::standard() }
    }

    /// Classifier over custom measurements; rejects unusable geometry.
    pub fn new(geometry: CourtGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Self { geometry })
    }

    pub fn geometry(&self) -> &CourtGeometry {
        &self.geometry
    }

    /// Classify a shot location. Total over finite input and never panics.
    ///
    /// Non-finite coordinates are a caller contract violation; they still
    /// return a zone but the result carries no meaning.
    pub fn classify(&self, x: f64, y: f64) -> Zone {
        let g = &self.geometry;
        let r = x.hypot(y);

        if r <= g.restricted_radius {
            return Zone::RestArea;
        }

        if y <= g.paint_depth && x.abs() <= g.paint_outer_half_width {
            if x.abs() <= g.paint_inner_half_width {
                return Zone::PaintC;
            }
            return if x < 0.0 { Zone::PaintL } else { Zone::PaintR };
        }

        // On the arc counts as a three.
        let is_three = r >= g.three_point_radius;

        // Corner lines run parallel to the sideline, so these are threes even
        // inside the arc radius.
        if x.abs() >= g.corner_three_x && y <= g.corner_three_depth {
            return if x < 0.0 { Zone::ThreeL } else { Zone::ThreeR };
        }

        let theta = x.atan2(y).to_degrees();
        Zone::arc_zone(Side::from_angle(theta, g), is_three)
    }

    /// Like [`classify`](Self::classify) but rejects non-finite input.
    pub fn try_classify(&self, x: f64, y: f64) -> Result<Zone> {
        if !x.is_finite() || !y.is_finite() {
            return Err(StatsError::InvalidCoordinate { x, y });
        }
        Ok(self.classify(x, y))
    }
}

/// Classify a shot on the canonical court.
pub fn classify_shot(x: f64, y: f64) -> Zone {
    ZoneClassifier::standard().classify(x, y)
}
