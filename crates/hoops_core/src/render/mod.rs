//! Court Renderer
//!
//! Draws a half court from the classifier's own [`CourtGeometry`] and
//! overlays either a per-zone percentage tint or a shot-density grid, then
//! encodes the result with the `image` crate.
//!
//! [`CourtGeometry`]: crate::court::CourtGeometry

pub mod canvas;
pub mod color;
pub mod outline;
pub mod overlay;

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::{DynamicImage, ImageFormat};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::court::{CourtGeometry, ZoneClassifier};
use crate::error::RenderError;
use crate::models::Event;
use crate::stats::{AggregateRecord, ZoneStatsTable};

pub use canvas::Canvas;
pub use overlay::DensityGrid;

/// Largest accepted scale; the standard court is then 10000 px wide.
const MAX_PIXELS_PER_UNIT: f64 = 20.0;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    Png,
    Jpeg,
    Bmp,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 3] = [RenderFormat::Png, RenderFormat::Jpeg, RenderFormat::Bmp];

    pub fn image_format(&self) -> ImageFormat {
        match self {
            RenderFormat::Png => ImageFormat::Png,
            RenderFormat::Jpeg => ImageFormat::Jpeg,
            RenderFormat::Bmp => ImageFormat::Bmp,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            RenderFormat::Png => "image/png",
            RenderFormat::Jpeg => "image/jpeg",
            RenderFormat::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            RenderFormat::Png => "png",
            RenderFormat::Jpeg => "jpg",
            RenderFormat::Bmp => "bmp",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for RenderFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(RenderFormat::Png),
            "jpg" | "jpeg" => Ok(RenderFormat::Jpeg),
            "bmp" => Ok(RenderFormat::Bmp),
            other => Err(RenderError::InvalidConfig(format!("unsupported image format: {other}"))),
        }
    }
}

/// Rendering knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub format: RenderFormat,
    /// Output pixels per court unit
    pub pixels_per_unit: f64,
    /// Density cells across the court width
    pub grid_size: u32,
    /// Density cells with fewer shots are not drawn
    pub min_count: u32,
    pub overlay_alpha: f64,
    /// Zone percentages below this are drawn cold
    pub cold_below: f64,
    /// Zone percentages above this are drawn hot
    pub hot_above: f64,
    /// Draw sidelines, baseline and half-court line
    pub draw_outer_lines: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::Png,
            pixels_per_unit: 1.0,
            grid_size: 30,
            min_count: 1,
            overlay_alpha: 0.6,
            cold_below: 0.35,
            hot_above: 0.5,
            draw_outer_lines: false,
        }
    }
}

impl RenderConfig {
    /// Small JPEG for list views.
    pub fn thumbnail() -> Self {
        Self { format: RenderFormat::Jpeg, pixels_per_unit: 0.4, ..Self::default() }
    }

    /// Large PNG with the full court boundary.
    pub fn print() -> Self {
        Self { pixels_per_unit: 3.0, draw_outer_lines: true, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.pixels_per_unit.is_finite()
            || self.pixels_per_unit <= 0.0
            || self.pixels_per_unit > MAX_PIXELS_PER_UNIT
        {
            return Err(RenderError::InvalidConfig(format!(
                "pixels_per_unit must be in (0, {MAX_PIXELS_PER_UNIT}], got {}",
                self.pixels_per_unit
            )));
        }
        if self.grid_size == 0 {
            return Err(RenderError::InvalidConfig("grid_size must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(RenderError::InvalidConfig(format!(
                "overlay_alpha must be in [0, 1], got {}",
                self.overlay_alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.cold_below)
            || !(0.0..=1.0).contains(&self.hot_above)
            || self.cold_below > self.hot_above
        {
            return Err(RenderError::InvalidConfig(format!(
                "need 0 <= cold_below ({}) <= hot_above ({}) <= 1",
                self.cold_below, self.hot_above
            )));
        }
        Ok(())
    }
}

/// What to draw over the court.
#[derive(Debug, Clone, Copy)]
pub enum RenderInput<'a> {
    /// Tint each zone by its shooting percentage
    Zones(&'a ZoneStatsTable),
    /// Density of individual makes and misses
    Shots(&'a [Event]),
}

/// An encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub format: RenderFormat,
    pub width: u32,
    pub height: u32,
}

impl RenderedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Renders court images with a fixed classifier and config.
#[derive(Debug, Clone)]
pub struct CourtRenderer {
    classifier: ZoneClassifier,
    config: RenderConfig,
}

impl Default for CourtRenderer {
    fn default() -> Self {
        Self { classifier: ZoneClassifier::standard(), config: RenderConfig::default() }
    }
}

impl CourtRenderer {
    pub fn new(classifier: ZoneClassifier, config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self { classifier, config })
    }

    /// Renderer over custom measurements; the geometry is validated too.
    pub fn with_geometry(geometry: CourtGeometry, config: RenderConfig) -> Result<Self, RenderError> {
        Self::new(ZoneClassifier::new(geometry)?, config)
    }

    pub fn classifier(&self) -> &ZoneClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw and encode. Empty input still yields a valid court image.
    pub fn render(&self, input: RenderInput<'_>) -> Result<RenderedImage, RenderError> {
        let geometry = self.classifier.geometry();
        let mut canvas = Canvas::new(geometry, self.config.pixels_per_unit);

        match input {
            RenderInput::Zones(zones) => {
                overlay::paint_zones(&mut canvas, &self.classifier, zones, &self.config);
            }
            RenderInput::Shots(events) => {
                let grid = DensityGrid::from_events(&self.classifier, events, self.config.grid_size);
                grid.paint(&mut canvas, &self.config);
            }
        }
        outline::draw_court(&mut canvas, geometry, self.config.draw_outer_lines, color::COURT_LINE);

        let (width, height) = (canvas.width(), canvas.height());
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(canvas.into_image())
            .write_to(&mut Cursor::new(&mut bytes), self.config.format.image_format())?;

        debug!(width, height, format = %self.config.format, bytes = bytes.len(), "court rendered");
        Ok(RenderedImage { bytes, format: self.config.format, width, height })
    }

    /// Zone heatmap of one aggregate record.
    pub fn render_record(&self, record: &AggregateRecord) -> Result<RenderedImage, RenderError> {
        self.render(RenderInput::Zones(&record.zones))
    }
}

/// Render many records on the rayon pool; output order follows input order.
pub fn render_records(
    renderer: &CourtRenderer,
    records: &[AggregateRecord],
) -> Vec<Result<RenderedImage, RenderError>> {
    records.par_iter().map(|record| renderer.render_record(record)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::Zone;
    use crate::error::StatsError;
    use crate::models::{GameId, PlayerId, SeasonId};
    use chrono::Utc;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn rest_area_only() -> ZoneStatsTable {
        let mut zones = ZoneStatsTable::new();
        zones.record_attempt(Zone::RestArea, true);
        zones
    }

    fn renderer(format: RenderFormat) -> CourtRenderer {
        let config = RenderConfig { format, pixels_per_unit: 0.5, ..RenderConfig::default() };
        CourtRenderer::new(ZoneClassifier::standard(), config).unwrap()
    }

    #[test]
    fn test_rest_area_render_has_format_magic() {
        let zones = rest_area_only();
        for format in RenderFormat::ALL {
            let image = renderer(format).render(RenderInput::Zones(&zones)).unwrap();
            assert!(!image.bytes.is_empty());
            assert_eq!((image.width, image.height), (250, 235));
            match format {
                RenderFormat::Png => assert_eq!(&image.bytes[..8], &PNG_MAGIC),
                RenderFormat::Jpeg => assert_eq!(&image.bytes[..2], &[0xFF, 0xD8]),
                RenderFormat::Bmp => assert_eq!(&image.bytes[..2], b"BM"),
            }
            assert_eq!(image.mime_type(), format.mime_type());
        }
    }

    #[test]
    fn test_empty_inputs_render_bare_court() {
        let renderer = renderer(RenderFormat::Png);
        let empty_zones = renderer.render(RenderInput::Zones(&ZoneStatsTable::new())).unwrap();
        let empty_shots = renderer.render(RenderInput::Shots(&[])).unwrap();
        assert_eq!(&empty_zones.bytes[..8], &PNG_MAGIC);
        // Neither overlay draws anything, so both are the bare court
        assert_eq!(empty_zones.bytes, empty_shots.bytes);
    }

    #[test]
    fn test_overlay_changes_output() {
        let renderer = renderer(RenderFormat::Png);
        let bare = renderer.render(RenderInput::Zones(&ZoneStatsTable::new())).unwrap();
        let tinted = renderer.render(RenderInput::Zones(&rest_area_only())).unwrap();
        assert_ne!(bare.bytes, tinted.bytes);

        let shots = vec![Event::shot(PlayerId(1), GameId(1), SeasonId(1), false, 0.0, 250.0, Utc::now())];
        let density = renderer.render(RenderInput::Shots(&shots)).unwrap();
        assert_ne!(bare.bytes, density.bytes);
    }

    #[test]
    fn test_invalid_config_rejected() {
        for config in [
            RenderConfig { pixels_per_unit: 0.0, ..RenderConfig::default() },
            RenderConfig { pixels_per_unit: f64::NAN, ..RenderConfig::default() },
            RenderConfig { grid_size: 0, ..RenderConfig::default() },
            RenderConfig { overlay_alpha: 1.5, ..RenderConfig::default() },
            RenderConfig { cold_below: 0.6, hot_above: 0.4, ..RenderConfig::default() },
        ] {
            let err = CourtRenderer::new(ZoneClassifier::standard(), config).unwrap_err();
            assert!(matches!(err, RenderError::InvalidConfig(_)));
        }
        assert!(RenderConfig::thumbnail().validate().is_ok());
        assert!(RenderConfig::print().validate().is_ok());
    }

    #[test]
    fn test_invalid_geometry_surfaces_as_geometry_error() {
        let mut geometry = CourtGeometry::standard();
        geometry.sideline_x = -1.0;
        let err = CourtRenderer::with_geometry(geometry, RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Geometry(StatsError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<RenderFormat>().unwrap(), RenderFormat::Png);
        assert_eq!("jpg".parse::<RenderFormat>().unwrap(), RenderFormat::Jpeg);
        assert_eq!(RenderFormat::Jpeg.extension(), "jpg");
        assert!("gif".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_render_records_keeps_order() {
        let renderer = renderer(RenderFormat::Bmp);
        let mut zones = ZoneStatsTable::new();
        zones.record_attempt(Zone::ThreeC, false);
        let records = vec![
            AggregateRecord::new(
                crate::models::Scope::Career(crate::models::CareerKey::new(PlayerId(1))),
                Default::default(),
                0,
                rest_area_only(),
            ),
            AggregateRecord::new(
                crate::models::Scope::Career(crate::models::CareerKey::new(PlayerId(2))),
                Default::default(),
                0,
                zones,
            ),
        ];
        let images = render_records(&renderer, &records);
        assert_eq!(images.len(), 2);
        let first = images[0].as_ref().unwrap();
        assert_eq!(first, &renderer.render_record(&records[0]).unwrap());
    }
}
