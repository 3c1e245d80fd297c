//! Court Geometry (SSOT)
//!
//! One set of half-court measurements shared by the zone classifier and the
//! court renderer, so the drawn lines and the statistical buckets can never
//! drift apart.
//!
//! Units are court units: tenths of a foot, origin at the center of the hoop,
//! `x` lateral (negative = left when facing the basket from the floor), `y`
//! increasing away from the basket.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Court units per foot.
pub const UNITS_PER_FOOT: f64 = 10.0;

/// Half-court measurements in court units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtGeometry {
    // Classification
    /// Restricted-area arc radius (4 ft)
    pub restricted_radius: f64,
    /// Half width of the outer paint box (16 ft box)
    pub paint_outer_half_width: f64,
    /// Half width of the inner paint box (12 ft box)
    pub paint_inner_half_width: f64,
    /// Distance from the hoop to the free-throw line
    pub paint_depth: f64,
    /// Three-point arc radius (23 ft 9 in)
    pub three_point_radius: f64,
    /// Lateral offset of the corner three-point lines
    pub corner_three_x: f64,
    /// Depth up to which a corner shot is always a three
    pub corner_three_depth: f64,
    /// |angle| up to which a shot is central (degrees)
    pub center_angle_deg: f64,
    /// |angle| up to which a shot is a center-wing shot (degrees)
    pub wing_angle_deg: f64,

    // Drawing only
    pub hoop_radius: f64,
    pub backboard_half_width: f64,
    pub backboard_offset: f64,
    /// Baseline position (negative, behind the hoop)
    pub baseline_y: f64,
    pub half_court_y: f64,
    pub sideline_x: f64,
    pub free_throw_circle_radius: f64,
    pub center_circle_outer_radius: f64,
    pub center_circle_inner_radius: f64,
}

impl Default for CourtGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CourtGeometry {
    /// Canonical measurements.
    ///
    /// The corner override uses `corner_three_depth = 140` (14 ft). Shorter
    /// corner depths (92.5, 100) are deliberately not used.
    pub const fn standard() -> Self {
        Self {
            restricted_radius: 40.0,
            paint_outer_half_width: 80.0,
            paint_inner_half_width: 60.0,
            paint_depth: 142.5,
            three_point_radius: 237.5,
            corner_three_x: 220.0,
            corner_three_depth: 140.0,
            center_angle_deg: 10.0,
            wing_angle_deg: 30.0,

            hoop_radius: 7.5,
            backboard_half_width: 30.0,
            backboard_offset: -7.5,
            baseline_y: -47.5,
            half_court_y: 422.5,
            sideline_x: 250.0,
            free_throw_circle_radius: 60.0,
            center_circle_outer_radius: 60.0,
            center_circle_inner_radius: 20.0,
        }
    }

    /// Check that every constant is usable.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("restricted_radius", self.restricted_radius),
            ("paint_outer_half_width", self.paint_outer_half_width),
            ("paint_inner_half_width", self.paint_inner_half_width),
            ("paint_depth", self.paint_depth),
            ("three_point_radius", self.three_point_radius),
            ("corner_three_x", self.corner_three_x),
            ("corner_three_depth", self.corner_three_depth),
            ("center_angle_deg", self.center_angle_deg),
            ("wing_angle_deg", self.wing_angle_deg),
            ("hoop_radius", self.hoop_radius),
            ("backboard_half_width", self.backboard_half_width),
            ("half_court_y", self.half_court_y),
            ("sideline_x", self.sideline_x),
            ("free_throw_circle_radius", self.free_throw_circle_radius),
            ("center_circle_outer_radius", self.center_circle_outer_radius),
            ("center_circle_inner_radius", self.center_circle_inner_radius),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(StatsError::InvalidGeometry { name, value });
            }
        }

        for (name, value) in [
            ("backboard_offset", self.backboard_offset),
            ("baseline_y", self.baseline_y),
        ] {
            if !value.is_finite() || value > 0.0 {
                return Err(StatsError::InvalidGeometry { name, value });
            }
        }

        if self.paint_inner_half_width > self.paint_outer_half_width {
            return Err(StatsError::InvalidGeometry {
                name: "paint_inner_half_width",
                value: self.paint_inner_half_width,
            });
        }
        if self.restricted_radius >= self.three_point_radius {
            return Err(StatsError::InvalidGeometry {
                name: "restricted_radius",
                value: self.restricted_radius,
            });
        }
        if self.center_angle_deg >= self.wing_angle_deg || self.wing_angle_deg >= 90.0 {
            return Err(StatsError::InvalidGeometry {
                name: "wing_angle_deg",
                value: self.wing_angle_deg,
            });
        }
        if self.half_court_y <= self.three_point_radius {
            return Err(StatsError::InvalidGeometry {
                name: "half_court_y",
                value: self.half_court_y,
            });
        }
        Ok(())
    }

    /// Height at which the three-point arc meets the corner lines.
    pub fn arc_break_y(&self) -> f64 {
        let r = self.three_point_radius;
        let x = self.corner_three_x.min(r);
        (r * r - x * x).sqrt()
    }

    /// Drawable court extent: (x_min, x_max, y_min, y_max).
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        (-self.sideline_x, self.sideline_x, self.baseline_y, self.half_court_y)
    }

    pub fn width(&self) -> f64 {
        2.0 * self.sideline_x
    }

    pub fn length(&self) -> f64 {
        self.half_court_y - self.baseline_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_geometry_is_valid() {
        assert!(CourtGeometry::standard().validate().is_ok());
        assert_eq!(CourtGeometry::default(), CourtGeometry::standard());
    }

    #[test]
    fn test_non_finite_constant_rejected() {
        let mut geometry = CourtGeometry::standard();
        geometry.three_point_radius = f64::NAN;
        let err = geometry.validate().unwrap_err();
        assert!(matches!(
            err,
            StatsError::InvalidGeometry { name: "three_point_radius", .. }
        ));
        assert!(err.is_structural());
    }

    #[test]
    fn test_inverted_paint_rejected() {
        let mut geometry = CourtGeometry::standard();
        geometry.paint_inner_half_width = 90.0;
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_unordered_angle_buckets_rejected() {
        let mut geometry = CourtGeometry::standard();
        geometry.center_angle_deg = 35.0;
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_arc_break_height() {
        let geometry = CourtGeometry::standard();
        // sqrt(237.5^2 - 220^2) ~= 89.47
        assert!((geometry.arc_break_y() - 89.47).abs() < 0.01);
        assert!(geometry.arc_break_y() < geometry.corner_three_depth);
    }

    #[test]
    fn test_extent_matches_court_size() {
        let geometry = CourtGeometry::standard();
        assert_eq!(geometry.width(), 500.0);
        assert_eq!(geometry.length(), 470.0);
        assert_eq!(geometry.extent(), (-250.0, 250.0, -47.5, 422.5));
    }
}
