//! RGB canvas addressed in court units.
//!
//! The hoop sits near the bottom edge: image row 0 is the half-court line and
//! the last row is the baseline.

use image::{Rgb, RgbImage};

use super::color;
use crate::court::CourtGeometry;

/// Segments per full circle when tracing arcs.
const ARC_SEGMENTS: f64 = 720.0;
/// Dash and gap length for dashed strokes, in court units.
const DASH_UNITS: f64 = 8.0;

pub struct Canvas {
    image: RgbImage,
    left_x: f64,
    top_y: f64,
    scale: f64,
}

impl Canvas {
    /// Blank canvas covering the court extent at `scale` pixels per unit.
    pub fn new(geometry: &CourtGeometry, scale: f64) -> Self {
        let (width, height) = pixel_size(geometry, scale);
        Self {
            image: RgbImage::from_pixel(width, height, color::BACKGROUND),
            left_x: -geometry.sideline_x,
            top_y: geometry.half_court_y,
            scale,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Court coordinates of a pixel center.
    pub fn to_court(&self, px: u32, py: u32) -> (f64, f64) {
        let x = self.left_x + (px as f64 + 0.5) / self.scale;
        let y = self.top_y - (py as f64 + 0.5) / self.scale;
        (x, y)
    }

    /// Fractional pixel position of a court point.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.left_x) * self.scale, (self.top_y - y) * self.scale)
    }

    pub fn pixel(&self, px: u32, py: u32) -> Rgb<u8> {
        *self.image.get_pixel(px, py)
    }

    /// Composite `color` over one pixel; out-of-bounds pixels are ignored.
    pub fn blend_pixel(&mut self, px: i64, py: i64, color: Rgb<u8>, alpha: f64) {
        if px < 0 || py < 0 || px >= self.width() as i64 || py >= self.height() as i64 {
            return;
        }
        let (px, py) = (px as u32, py as u32);
        let base = *self.image.get_pixel(px, py);
        self.image.put_pixel(px, py, color::blend(base, color, alpha));
    }

    /// Composite `color` over a pixel rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, px0: i64, py0: i64, px1: i64, py1: i64, color: Rgb<u8>, alpha: f64) {
        for py in py0.max(0)..py1.min(self.height() as i64) {
            for px in px0.max(0)..px1.min(self.width() as i64) {
                self.blend_pixel(px, py, color, alpha);
            }
        }
    }

    /// Straight stroke between two court points.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
        let (x0, y0) = self.to_pixel(from.0, from.1);
        let (x1, y1) = self.to_pixel(to.0, to.1);
        self.bresenham(x0.round() as i64, y0.round() as i64, x1.round() as i64, y1.round() as i64, color);
    }

    /// Dashed stroke between two court points.
    pub fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = dx.hypot(dy);
        if length == 0.0 {
            return;
        }
        let mut start = 0.0;
        while start < length {
            let end = (start + DASH_UNITS).min(length);
            let a = (from.0 + dx * start / length, from.1 + dy * start / length);
            let b = (from.0 + dx * end / length, from.1 + dy * end / length);
            self.line(a, b, color);
            start += 2.0 * DASH_UNITS;
        }
    }

    /// Axis-aligned rectangle outline; `corner` is the lower-left court point.
    pub fn rect(&mut self, corner: (f64, f64), width: f64, height: f64, color: Rgb<u8>) {
        let (x0, y0) = corner;
        let (x1, y1) = (x0 + width, y0 + height);
        self.line((x0, y0), (x1, y0), color);
        self.line((x1, y0), (x1, y1), color);
        self.line((x1, y1), (x0, y1), color);
        self.line((x0, y1), (x0, y0), color);
    }

    /// Circular arc from `start_deg` to `end_deg`, counter-clockwise from +x.
    pub fn arc(
        &mut self,
        center: (f64, f64),
        radius: f64,
        start_deg: f64,
        end_deg: f64,
        color: Rgb<u8>,
        dashed: bool,
    ) {
        let sweep = end_deg - start_deg;
        let steps = ((sweep.abs() / 360.0) * ARC_SEGMENTS).ceil().max(1.0) as usize;
        let point = |deg: f64| {
            let t = deg.to_radians();
            (center.0 + radius * t.cos(), center.1 + radius * t.sin())
        };

        // Dashes alternate on arc length, measured in segments.
        let segment_len = radius * sweep.abs().to_radians() / steps as f64;
        let dash_steps = if segment_len > 0.0 {
            ((DASH_UNITS / segment_len).round() as usize).max(1)
        } else {
            1
        };

        let mut prev = point(start_deg);
        for i in 1..=steps {
            let next = point(start_deg + sweep * i as f64 / steps as f64);
            if !dashed || ((i - 1) / dash_steps) % 2 == 0 {
                self.line(prev, next, color);
            }
            prev = next;
        }
    }

    pub fn circle(&mut self, center: (f64, f64), radius: f64, color: Rgb<u8>) {
        self.arc(center, radius, 0.0, 360.0, color, false);
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn bresenham(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.blend_pixel(x, y, color, 1.0);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Image size for a geometry at `scale` pixels per unit.
pub fn pixel_size(geometry: &CourtGeometry, scale: f64) -> (u32, u32) {
    let width = (geometry.width() * scale).round().max(1.0) as u32;
    let height = (geometry.length() * scale).round().max(1.0) as u32;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_follows_geometry() {
        let canvas = Canvas::new(&CourtGeometry::standard(), 1.0);
        assert_eq!((canvas.width(), canvas.height()), (500, 470));
        let canvas = Canvas::new(&CourtGeometry::standard(), 0.5);
        assert_eq!((canvas.width(), canvas.height()), (250, 235));
    }

    #[test]
    fn test_hoop_maps_near_bottom_center() {
        let canvas = Canvas::new(&CourtGeometry::standard(), 1.0);
        let (px, py) = canvas.to_pixel(0.0, 0.0);
        assert_eq!(px, 250.0);
        assert_eq!(py, 422.5);
        let (x, y) = canvas.to_court(250, 422);
        assert!((x - 0.5).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_clips_outside_canvas() {
        let mut canvas = Canvas::new(&CourtGeometry::standard(), 1.0);
        canvas.line((-1000.0, 0.0), (1000.0, 0.0), color::COURT_LINE);
        // y = 0 lands on row 422.5, rounded to 423
        assert_eq!(canvas.pixel(0, 423), color::COURT_LINE);
        assert_eq!(canvas.pixel(499, 423), color::COURT_LINE);
        assert_eq!(canvas.pixel(0, 0), color::BACKGROUND);
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let mut canvas = Canvas::new(&CourtGeometry::standard(), 1.0);
        canvas.dashed_line((-200.0, 100.0), (200.0, 100.0), color::COURT_LINE);
        let row = 323;
        let inked = (0..canvas.width()).filter(|&px| canvas.pixel(px, row) == color::COURT_LINE).count();
        assert!(inked > 150 && inked < 300, "inked = {inked}");
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = Canvas::new(&CourtGeometry::standard(), 1.0);
        canvas.fill_rect(-10, -10, 5, 5, color::HOT, 1.0);
        assert_eq!(canvas.pixel(0, 0), color::HOT);
        assert_eq!(canvas.pixel(4, 4), color::HOT);
        assert_eq!(canvas.pixel(5, 5), color::BACKGROUND);
    }
}
