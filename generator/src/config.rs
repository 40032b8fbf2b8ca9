use std::path::Path;

use heatfx::{Gradient, GradientError};
use log::debug;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    CannotReadFile(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    #[error("Invalid gradient: {0}")]
    InvalidGradient(#[from] GradientError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub gradient: Gradient,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            opacity: default_opacity(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(config: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(config)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Replaces the color map size and opacity with the ones given,
    /// keeping the configured values where `None` is passed.
    pub fn with_overrides(
        self,
        color_map_size: Option<usize>,
        opacity: Option<f64>,
    ) -> Result<Self, ConfigError> {
        let gradient = match color_map_size {
            Some(size) => {
                debug!("Overriding color map size with {}", size);
                Gradient::with_color_map_size(
                    self.gradient.colors(),
                    self.gradient.start_points(),
                    size,
                )?
            }
            None => self.gradient,
        };

        Ok(Self {
            gradient,
            opacity: opacity.unwrap_or(self.opacity),
        })
    }
}

#[cfg(test)]
mod tests {
    use heatfx::Color;

    use super::*;

    #[test]
    fn parses_full_config() {
        let config = GeneratorConfig::from_toml_str(
            r##"
            opacity = 0.6

            [gradient]
            colors = ["#0000ff", "#8000ff00", "#f00"]
            start_points = [0.0, 0.5, 1.0]
            color_map_size = 256
            "##,
        )
        .unwrap();

        assert_eq!(config.opacity, 0.6);
        assert_eq!(
            config.gradient.colors(),
            &[Color::BLUE, Color::argb(0x80, 0, 255, 0), Color::RED]
        );
        assert_eq!(config.gradient.start_points(), &[0.0, 0.5, 1.0]);
        assert_eq!(config.gradient.color_map_size(), 256);
    }

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(
            GeneratorConfig::from_toml_str("").unwrap(),
            GeneratorConfig::default()
        );

        let config = GeneratorConfig::from_toml_str(
            r##"
            [gradient]
            colors = ["#ff0000"]
            start_points = [0.5]
            "##,
        )
        .unwrap();
        assert_eq!(config.opacity, 1.0);
        assert_eq!(
            config.gradient.color_map_size(),
            heatfx::DEFAULT_COLOR_MAP_SIZE
        );
    }

    #[test]
    fn rejects_invalid_gradient() {
        let result = GeneratorConfig::from_toml_str(
            r##"
            [gradient]
            colors = ["#ff0000", "#00ff00"]
            start_points = [0.5, 0.3]
            "##,
        );
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));

        let result = GeneratorConfig::from_toml_str(
            r##"
            [gradient]
            colors = ["red"]
            start_points = [0.5]
            "##,
        );
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_replace_configured_values() {
        let config = GeneratorConfig::default()
            .with_overrides(Some(16), Some(0.25))
            .unwrap();
        assert_eq!(config.gradient.color_map_size(), 16);
        assert_eq!(config.gradient.colors(), Gradient::default().colors());
        assert_eq!(config.opacity, 0.25);

        let config = GeneratorConfig::default().with_overrides(None, None).unwrap();
        assert_eq!(config, GeneratorConfig::default());

        assert!(matches!(
            GeneratorConfig::default().with_overrides(Some(0), None),
            Err(ConfigError::InvalidGradient(GradientError::EmptyColorMap))
        ));
    }

    #[test]
    fn loads_bundled_gradient() {
        let config = GeneratorConfig::from_path(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/gradients/rainbow.toml"
        ))
        .unwrap();

        assert_eq!(config.opacity, 0.7);
        assert_eq!(config.gradient.colors().len(), 5);
        assert_eq!(config.gradient.color_map_size(), 256);
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            GeneratorConfig::from_path("does/not/exist.toml"),
            Err(ConfigError::CannotReadFile(_))
        ));
    }
}
