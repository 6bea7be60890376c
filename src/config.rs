//! Demo configuration
//!
//! Plain structs with builder-style setters. Values are checked once with
//! [`DemoConfig::validate`] before the scene is built.

use thiserror::Error;

/// Environment variable overriding [`DemoConfig::seed`]
pub const SEED_ENV_VAR: &str = "LEAFFALL_SEED";

/// Invalid configuration value
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} has an invalid range ({min}, {max})")]
    Range {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("unsupported MSAA sample count {0} (expected 1 or 4)")]
    SampleCount(u32),
    #[error("window size must be non-zero, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },
    #[error("LEAFFALL_SEED is not a valid u64: {0:?}")]
    Seed(String),
}

/// Controls how the random outdoor scene is laid out
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationConfig {
    pub tree_count: usize,
    pub rock_count: usize,
    pub leaf_pile_count: usize,
    /// Leaves lying on the ground around each tree
    pub litter_per_tree: usize,
    /// Upper bound (inclusive) of falling leaves per tree in one wave
    pub max_falling_leaves_per_tree: usize,
    /// Trees, rocks and piles are placed within [-extent, extent] on X and Z
    pub object_extent: f32,
    /// (inner, outer) radius of the litter ring around a tree
    pub litter_ring: (f32, f32),
    /// (inner, outer) radius of the ring falling leaves start in
    pub fall_ring: (f32, f32),
    /// (min, max) starting height of falling leaves
    pub fall_height: (f32, f32),
    /// Chance per frame of releasing another wave of leaves
    pub leaf_spawn_probability: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            tree_count: 10,
            rock_count: 8,
            leaf_pile_count: 6,
            litter_per_tree: 30,
            max_falling_leaves_per_tree: 3,
            object_extent: 5.0,
            litter_ring: (0.1, 0.4),
            fall_ring: (0.1, 1.0),
            fall_height: (3.0, 6.0),
            leaf_spawn_probability: 0.01,
        }
    }
}

impl PopulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.leaf_spawn_probability) {
            return Err(ConfigError::Probability {
                name: "leaf_spawn_probability",
                value: self.leaf_spawn_probability,
            });
        }
        if self.object_extent <= 0.0 || !self.object_extent.is_finite() {
            return Err(ConfigError::NonPositive {
                name: "object_extent",
                value: self.object_extent,
            });
        }
        check_ring("litter_ring", self.litter_ring)?;
        check_ring("fall_ring", self.fall_ring)?;

        let (min, max) = self.fall_height;
        if !(min > 0.0 && min <= max) {
            return Err(ConfigError::Range {
                name: "fall_height",
                min,
                max,
            });
        }
        Ok(())
    }
}

fn check_ring(name: &'static str, (inner, outer): (f32, f32)) -> Result<(), ConfigError> {
    if inner >= 0.0 && inner < outer && outer.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Range {
            name,
            min: inner,
            max: outer,
        })
    }
}

/// Top-level configuration of the demo application
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Seed of the shared random generator; the whole scene is reproducible from it
    pub seed: u64,
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub msaa_samples: u32,
    pub population: PopulationConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            title: "Leaf Fall".to_string(),
            window_width: 1200,
            window_height: 800,
            msaa_samples: 4,
            population: PopulationConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Default configuration with overrides taken from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            config.seed = parse_seed(&raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_msaa_samples(mut self, samples: u32) -> Self {
        self.msaa_samples = samples;
        self
    }

    pub fn with_population(mut self, population: PopulationConfig) -> Self {
        self.population = population;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.msaa_samples, 1 | 4) {
            return Err(ConfigError::SampleCount(self.msaa_samples));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::WindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        self.population.validate()
    }
}

fn parse_seed(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Seed(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(DemoConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_builder_setters() {
        let config = DemoConfig::default()
            .with_seed(7)
            .with_window_size(640, 480)
            .with_msaa_samples(1);
        assert_eq!(config.seed, 7);
        assert_eq!((config.window_width, config.window_height), (640, 480));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_sample_count() {
        let config = DemoConfig::default().with_msaa_samples(3);
        assert_eq!(config.validate(), Err(ConfigError::SampleCount(3)));
    }

    #[test]
    fn test_rejects_zero_window() {
        let config = DemoConfig::default().with_window_size(0, 600);
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::WindowSize { .. })));
    }

    fn range_name(result: Result<(), ConfigError>) -> Option<&'static str> {
        match result {
            Err(ConfigError::Range { name, .. }) => Some(name),
            _ => None,
        }
    }

    #[test]
    fn test_rejects_bad_population_values() {
        let probability = PopulationConfig {
            leaf_spawn_probability: 1.5,
            ..PopulationConfig::default()
        };
        let result = probability.validate();
        assert!(matches!(result, Err(ConfigError::Probability { .. })));

        let ring = PopulationConfig {
            litter_ring: (0.5, 0.4),
            ..PopulationConfig::default()
        };
        assert_eq!(range_name(ring.validate()), Some("litter_ring"));

        let extent = PopulationConfig {
            object_extent: 0.0,
            ..PopulationConfig::default()
        };
        let result = extent.validate();
        assert!(matches!(result, Err(ConfigError::NonPositive { .. })));

        let height = PopulationConfig {
            fall_height: (6.0, 3.0),
            ..PopulationConfig::default()
        };
        assert_eq!(range_name(height.validate()), Some("fall_height"));
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed(" 1234 "), Ok(1234));
        assert!(matches!(parse_seed("leaves"), Err(ConfigError::Seed(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::SampleCount(2).to_string(),
            "unsupported MSAA sample count 2 (expected 1 or 4)"
        );
        assert_eq!(
            ConfigError::Seed("x".to_string()).to_string(),
            "LEAFFALL_SEED is not a valid u64: \"x\""
        );
    }
}
