// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anchora_core::math::LinearRgba;
use anchora_lanes::placement_lane::DEFAULT_MAX_PLACEMENTS;
use anchora_lanes::plane_lane::{
    DEFAULT_FADE_RADIUS, DEFAULT_GRID_CONTROL, DOTS_PER_METER, INITIAL_BUFFER_BOUNDARY_VERTS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error produced while loading or checking a [`SceneConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The RON text could not be parsed.
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The config could not be written as RON.
    #[error("failed to serialize scene config: {0}")]
    Serialize(#[from] ron::Error),
    /// A value is out of its allowed range.
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

/// Tunables of the [`SceneAgent`](super::SceneAgent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// How many anchored objects may be alive at once.
    pub max_placements: usize,
    /// Width of the alpha fade band along a plane's boundary, in meters.
    pub fade_radius: f32,
    /// Boundary vertex count the mesh buffers are sized for up front.
    pub initial_boundary_vertices: usize,
    /// Dot threshold, line threshold, line fade shrink, occlusion shrink.
    pub grid_control: LinearRgba,
    /// Density of the decorative dot grid.
    pub dots_per_meter: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_placements: DEFAULT_MAX_PLACEMENTS,
            fade_radius: DEFAULT_FADE_RADIUS,
            initial_boundary_vertices: INITIAL_BUFFER_BOUNDARY_VERTS,
            grid_control: DEFAULT_GRID_CONTROL,
            dots_per_meter: DOTS_PER_METER,
        }
    }
}

impl SceneConfig {
    /// Parses and validates a config from RON text. Missing fields take their
    /// default values.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty_config)?)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_placements == 0 {
            return Err(ConfigError::Invalid(
                "max_placements must be at least 1".to_string(),
            ));
        }
        if !self.fade_radius.is_finite() || self.fade_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fade_radius must be a positive number, got {}",
                self.fade_radius
            )));
        }
        if self.initial_boundary_vertices == 0 {
            return Err(ConfigError::Invalid(
                "initial_boundary_vertices must be at least 1".to_string(),
            ));
        }
        if !self.dots_per_meter.is_finite() || self.dots_per_meter <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dots_per_meter must be a positive number, got {}",
                self.dots_per_meter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_matches_reference_values() {
        let config = SceneConfig::default();
        assert_eq!(config.max_placements, 16);
        assert_relative_eq!(config.fade_radius, 0.25);
        assert_eq!(config.initial_boundary_vertices, 64);
        assert_eq!(config.grid_control, LinearRgba::new(0.2, 0.4, 2.0, 1.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = SceneConfig::from_ron_str("(max_placements: 4, fade_radius: 0.1)").unwrap();
        assert_eq!(config.max_placements, 4);
        assert_relative_eq!(config.fade_radius, 0.1);
        assert_eq!(config.initial_boundary_vertices, 64);
        assert_relative_eq!(config.dots_per_meter, 10.0);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SceneConfig {
            max_placements: 3,
            ..Default::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(SceneConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            SceneConfig::from_ron_str("(max_placements: 0)"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SceneConfig::from_ron_str("(fade_radius: -1.0)"),
            Err(ConfigError::Invalid(_))
        ));
        let config = SceneConfig {
            initial_boundary_vertices: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_ron_is_a_parse_error() {
        assert!(matches!(
            SceneConfig::from_ron_str("(max_placements: "),
            Err(ConfigError::Parse(_))
        ));
    }
}
