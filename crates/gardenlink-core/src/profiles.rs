//! Pre-configured profiles for different deployment scenarios
//!
//! - Development: Verbose logging, sequential graph derivation for readable logs
//! - Production: Parallel graph derivation, info logging
//! - Minimal: Warnings only, single-hop traversal

use crate::config::GardenConfig;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Profile selector for pre-configured deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Development: debug logging, deterministic sequential builds
    Development,
    /// Production: parallel builds, info logging
    Production,
    /// Minimal: bare essentials only
    Minimal,
}

impl ConfigProfile {
    /// Create a GardenConfig from this profile
    pub fn create_config(self) -> GardenConfig {
        let mut config = GardenConfig::new();
        config.profile = self.name().to_string();

        match self {
            Self::Development => {
                config.log_level = "DEBUG".to_string();
                config.parallel_graph = false;
                config.default_max_depth = 2;
            }

            Self::Production => {
                config.log_level = "INFO".to_string();
                config.parallel_graph = true;
                config.default_max_depth = 1;
            }

            Self::Minimal => {
                config.log_level = "WARN".to_string();
                config.parallel_graph = false;
                config.default_max_depth = 1;
            }
        }

        config
    }

    /// Recommend a profile based on corpus size
    pub fn recommend(note_count: usize) -> Self {
        match note_count {
            0..=50 => Self::Minimal,
            51..=500 => Self::Development,
            _ => Self::Production,
        }
    }

    /// Get profile name
    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Minimal => "minimal",
        }
    }

    /// Get profile description
    pub fn description(self) -> &'static str {
        match self {
            Self::Development => "Verbose logging, sequential graph derivation",
            Self::Production => "Parallel graph derivation for large gardens",
            Self::Minimal => "Bare essentials only",
        }
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "minimal" => Ok(Self::Minimal),
            other => Err(Error::config_error(format!("Unknown profile: {}", other))),
        }
    }
}

impl std::fmt::Display for ConfigProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_profile() {
        let config = ConfigProfile::Development.create_config();
        assert_eq!(config.log_level, "DEBUG");
        assert!(!config.parallel_graph);
        assert_eq!(config.profile, "development");
    }

    #[test]
    fn test_production_profile() {
        let config = ConfigProfile::Production.create_config();
        assert_eq!(config.log_level, "INFO");
        assert!(config.parallel_graph);
    }

    #[test]
    fn test_profiles_produce_valid_configs() {
        for profile in [
            ConfigProfile::Development,
            ConfigProfile::Production,
            ConfigProfile::Minimal,
        ] {
            assert!(profile.create_config().validate().is_ok());
            assert!(!profile.description().is_empty());
        }
    }

    #[test]
    fn test_recommend() {
        assert_eq!(ConfigProfile::recommend(10), ConfigProfile::Minimal);
        assert_eq!(ConfigProfile::recommend(200), ConfigProfile::Development);
        assert_eq!(ConfigProfile::recommend(5000), ConfigProfile::Production);
    }

    #[test]
    fn test_parse_profile_names() {
        assert_eq!("prod".parse::<ConfigProfile>().unwrap(), ConfigProfile::Production);
        assert_eq!(
            ConfigProfile::Minimal.name().parse::<ConfigProfile>().unwrap(),
            ConfigProfile::Minimal
        );
        assert!("read-only".parse::<ConfigProfile>().is_err());
    }
}
