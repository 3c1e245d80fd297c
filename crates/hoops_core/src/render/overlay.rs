//! Statistical overlays: per-zone tint and shot-density grid.

use tracing::debug;

use super::canvas::Canvas;
use super::color::{self, Ramp};
use super::RenderConfig;
use crate::court::{Zone, ZoneClassifier};
use crate::models::Event;
use crate::stats::ZoneStatsTable;

/// Tint every pixel by the shooting percentage of the zone it falls in.
///
/// Pixels are classified with the same classifier that bucketed the shots,
/// so the colored regions line up with the statistics. Zones without an
/// attempt stay untinted.
pub fn paint_zones(
    canvas: &mut Canvas,
    classifier: &ZoneClassifier,
    zones: &ZoneStatsTable,
    config: &RenderConfig,
) {
    let mut tints = [None; Zone::COUNT];
    for (zone, line) in zones.iter() {
        tints[zone.index()] = line
            .percentage()
            .map(|pct| color::zone_tint(pct, config.cold_below, config.hot_above));
    }
    if tints.iter().all(Option::is_none) {
        return;
    }

    for py in 0..canvas.height() {
        for px in 0..canvas.width() {
            let (x, y) = canvas.to_court(px, py);
            if let Some(tint) = tints[classifier.classify(x, y).index()] {
                canvas.blend_pixel(px as i64, py as i64, tint, config.overlay_alpha);
            }
        }
    }
}

/// Shot counts on a square grid spanning the court.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    columns: usize,
    rows: usize,
    cell_units: f64,
    left_x: f64,
    top_y: f64,
    makes: Vec<u32>,
    misses: Vec<u32>,
}

impl DensityGrid {
    /// Bin shot events into `columns` cells across the court width.
    ///
    /// Non-shot events, shots without a finite location and shots off the
    /// drawn court are left out.
    pub fn from_events(classifier: &ZoneClassifier, events: &[Event], columns: u32) -> Self {
        let g = classifier.geometry();
        let columns = columns.max(1) as usize;
        let cell_units = g.width() / columns as f64;
        let rows = (g.length() / cell_units).ceil().max(1.0) as usize;
        let mut grid = Self {
            columns,
            rows,
            cell_units,
            left_x: -g.sideline_x,
            top_y: g.half_court_y,
            makes: vec![0; columns * rows],
            misses: vec![0; columns * rows],
        };

        let mut dropped = 0usize;
        for event in events {
            let (Some(made), Some(point)) = (event.action.shot_made(), event.location) else {
                continue;
            };
            match grid.cell_of(point.x, point.y) {
                Some(cell) if made => grid.makes[cell] += 1,
                Some(cell) => grid.misses[cell] += 1,
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, "shots outside the drawable court left out of density grid");
        }
        grid
    }

    fn cell_of(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let col = ((x - self.left_x) / self.cell_units).floor();
        let row = ((self.top_y - y) / self.cell_units).floor();
        if col < 0.0 || row < 0.0 || col >= self.columns as f64 || row >= self.rows as f64 {
            return None;
        }
        Some(row as usize * self.columns + col as usize)
    }

    pub fn makes(&self) -> u32 {
        self.makes.iter().sum()
    }

    pub fn misses(&self) -> u32 {
        self.misses.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.makes() == 0 && self.misses() == 0
    }

    /// Draw makes, then misses on top of them.
    pub fn paint(&self, canvas: &mut Canvas, config: &RenderConfig) {
        self.paint_layer(canvas, &self.makes, Ramp::Reds, config);
        self.paint_layer(canvas, &self.misses, Ramp::Blues, config);
    }

    fn paint_layer(&self, canvas: &mut Canvas, counts: &[u32], ramp: Ramp, config: &RenderConfig) {
        let threshold = config.min_count.max(1);
        let Some(&max) = counts.iter().max() else {
            return;
        };
        if max < threshold {
            return;
        }

        let scale = canvas.scale();
        for (cell, &count) in counts.iter().enumerate() {
            if count < threshold {
                continue;
            }
            let (row, col) = (cell / self.columns, cell % self.columns);
            let px0 = (col as f64 * self.cell_units * scale).round() as i64;
            let py0 = (row as f64 * self.cell_units * scale).round() as i64;
            let px1 = ((col + 1) as f64 * self.cell_units * scale).round() as i64;
            let py1 = ((row + 1) as f64 * self.cell_units * scale).round() as i64;
            let intensity = count as f64 / max as f64;
            canvas.fill_rect(px0, py0, px1, py1, ramp.sample(intensity), config.overlay_alpha);
        }
    }
}
