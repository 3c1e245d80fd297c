//! # Engine Configuration
//!
//! Court geometry and render settings in one serde document, loadable from
//! YAML or JSON. Every field has a default, so a config file only names what
//! it changes.
//!
//! ```rust
//! use hoops_core::config::EngineConfig;
//!
//! let config = EngineConfig::from_yaml_str("render:\n  format: bmp\n").unwrap();
//! assert_eq!(config.render.format.extension(), "bmp");
//! assert_eq!(config.geometry.three_point_radius, 237.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::court::{CourtGeometry, ZoneClassifier};
use crate::error::{RenderError, Result, StatsError};
use crate::render::{CourtRenderer, RenderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub geometry: CourtGeometry,
    pub render: RenderConfig,
}

impl EngineConfig {
    /// Canonical court, default PNG rendering
    pub fn standard() -> Self {
        Self::default()
    }

    /// Small JPEG output for list views
    pub fn thumbnail() -> Self {
        Self { render: RenderConfig::thumbnail(), ..Self::default() }
    }

    /// Large PNG output with the full court boundary
    pub fn print() -> Self {
        Self { render: RenderConfig::print(), ..Self::default() }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a `.json` file as JSON and anything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StatsError::Config(format!("{}: {e}", path.display())))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Classifier over the configured geometry.
    pub fn classifier(&self) -> Result<ZoneClassifier> {
        ZoneClassifier::new(self.geometry)
    }

    /// Renderer over the configured geometry and render settings.
    pub fn renderer(&self) -> std::result::Result<CourtRenderer, RenderError> {
        CourtRenderer::with_geometry(self.geometry, self.render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderFormat;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.geometry, CourtGeometry::standard());
        assert_eq!(cfg.render.format, RenderFormat::Png);
        assert!(cfg.classifier().is_ok());
        assert!(cfg.renderer().is_ok());
    }

    #[test]
    fn test_presets_differ_in_output_size() {
        let thumb = EngineConfig::thumbnail();
        let print = EngineConfig::print();
        assert!(thumb.render.pixels_per_unit < print.render.pixels_per_unit);
        assert_eq!(thumb.render.format, RenderFormat::Jpeg);
        assert!(print.render.draw_outer_lines);
        assert_eq!(thumb.geometry, print.geometry);
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut cfg = EngineConfig::print();
        cfg.geometry.corner_three_depth = 120.0;
        let yaml = cfg.to_yaml().unwrap();
        let parsed = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{"geometry": {"wing_angle_deg": 35.0}}"#).unwrap();
        assert_eq!(cfg.geometry.wing_angle_deg, 35.0);
        assert_eq!(cfg.geometry.center_angle_deg, 10.0);
        assert_eq!(cfg.render, RenderConfig::default());
    }

    #[test]
    fn test_malformed_document_is_config_error() {
        let err = EngineConfig::from_yaml_str("render: [1, 2").unwrap_err();
        assert!(matches!(err, StatsError::Config(_)));
        let err = EngineConfig::from_json_str(r#"{"render": {"format": "gif"}}"#).unwrap_err();
        assert!(matches!(err, StatsError::Config(_)));
    }

    #[test]
    fn test_bad_geometry_fails_at_classifier() {
        let cfg = EngineConfig::from_yaml_str("geometry:\n  restricted_radius: 300\n").unwrap();
        assert!(matches!(
            cfg.classifier(),
            Err(StatsError::InvalidGeometry { name: "restricted_radius", .. })
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = EngineConfig::from_path(Path::new("/nonexistent/hoops.yaml")).unwrap_err();
        assert!(matches!(err, StatsError::Config(_)));
    }
}
