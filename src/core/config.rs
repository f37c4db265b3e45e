use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::error::ConfigError;
use crate::core::experiment::{BALL_COUNT, ExperimentConfig};

impl ExperimentConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded experiment config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for ball in 0..BALL_COUNT {
            self.simulation_config(ball)
                .validate()
                .map_err(|source| ConfigError::Invalid { ball: ball + 1, source })?;
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::experiment::{CelestialBody, MotionKind};

    #[test]
    fn empty_document_gives_defaults() {
        let config = ExperimentConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn parses_partial_document() {
        let text = r#"
            body = "moon"
            air_resistance = true
            motion = "horizontal-launch"
            initial_height_m = 35.0

            [[balls]]
            mass_kg = 0.5
            horizontal_velocity_mps = 4.0

            [[balls]]
            mass_kg = 3.0
        "#;
        let config = ExperimentConfig::from_toml_str(text).expect("config should parse");

        assert_eq!(config.body, CelestialBody::Moon);
        assert!(config.air_resistance);
        assert_eq!(config.motion, MotionKind::HorizontalLaunch);
        assert_eq!(config.initial_height_m, 35.0);
        assert_eq!(config.balls[0].horizontal_velocity_mps, 4.0);
        assert_eq!(config.balls[1].mass_kg, 3.0);
        assert_eq!(config.balls[1].horizontal_velocity_mps, 0.0);
        assert_eq!(config.time_step_s, 0.05);
    }

    #[test]
    fn rejects_massless_ball_under_drag() {
        let text = r#"
            air_resistance = true

            [[balls]]
            mass_kg = 1.0

            [[balls]]
            mass_kg = 0.0
        "#;
        let err = ExperimentConfig::from_toml_str(text).expect_err("config should be rejected");
        assert!(matches!(err, ConfigError::Invalid { ball: 2, .. }));
        assert!(err.to_string().contains("ball 2"));
    }

    #[test]
    fn single_ball_table_keeps_second_default() {
        let text = r#"
            [[balls]]
            mass_kg = 5.0
        "#;
        let config = ExperimentConfig::from_toml_str(text).expect("config should parse");
        assert_eq!(config.balls[0].mass_kg, 5.0);
        assert_eq!(config.balls[1], ExperimentConfig::default().balls[1]);
    }

    #[test]
    fn rejects_more_than_two_ball_tables() {
        let text = "[[balls]]\n[[balls]]\n[[balls]]\n";
        let err = ExperimentConfig::from_toml_str(text).expect_err("three balls");
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("at most 2 [[balls]] tables"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = ExperimentConfig::from_toml_str("body = ").expect_err("should not parse");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = ExperimentConfig::load(Path::new("/definitely/not/here.toml"))
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = ExperimentConfig {
            body: CelestialBody::Moon,
            ..ExperimentConfig::default()
        };
        let text = config.to_toml_string().expect("config should serialize");
        assert_eq!(
            ExperimentConfig::from_toml_str(&text).expect("config should parse"),
            config
        );
    }
}
