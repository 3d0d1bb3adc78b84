//! Configuration with YAML schema and validation.
//!
//! Every field defaults to the fixed KAM experiment (ε = 0.3, seed 2,
//! 50 orbits). A YAML file only needs to name the seed; anything else it
//! sets is checked twice: structurally by `validator`, then semantically.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{TwistError, TwistResult};
use crate::twist::map::{DEFAULT_EPSILON, DEFAULT_STEPS_PER_UNIT, MAX_STEPS_PER_UNIT};
use crate::twist::orbit::DEFAULT_RADIUS_OFFSET;

/// Top-level experiment configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TwistConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Experiment metadata.
    #[serde(default)]
    pub simulation: SimulationMeta,

    /// Reproducibility settings.
    #[validate(nested)]
    pub reproducibility: ReproducibilityConfig,

    /// Twist-map parameters.
    #[validate(nested)]
    #[serde(default)]
    pub map: MapConfig,

    /// Figure settings.
    #[validate(nested)]
    #[serde(default)]
    pub plot: PlotConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl TwistConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> TwistResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> TwistResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Run structural and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn check(&self) -> TwistResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> TwistConfigBuilder {
        TwistConfigBuilder::default()
    }

    /// Constraints serde and validator cannot express.
    fn validate_semantic(&self) -> TwistResult<()> {
        let map = &self.map;
        if !map.epsilon.is_finite() {
            return Err(TwistError::config(format!(
                "map.epsilon must be finite, got {}",
                map.epsilon
            )));
        }
        if !(map.steps_per_unit > 0.0 && map.steps_per_unit <= MAX_STEPS_PER_UNIT) {
            return Err(TwistError::config(format!(
                "map.steps_per_unit must be in (0, {MAX_STEPS_PER_UNIT}], got {}",
                map.steps_per_unit
            )));
        }
        if !map.radius_offset.is_finite() {
            return Err(TwistError::config("map.radius_offset must be finite"));
        }
        if self.plot.output.as_os_str().is_empty() {
            return Err(TwistError::config("plot.output must not be empty"));
        }
        Ok(())
    }

    /// Figure title, defaulting to one that names ε.
    #[must_use]
    pub fn title(&self) -> String {
        self.plot
            .title
            .clone()
            .unwrap_or_else(|| format!("KAM Twist Map for ε = {}", self.map.epsilon))
    }
}

impl Default for TwistConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            simulation: SimulationMeta::default(),
            reproducibility: ReproducibilityConfig::default(),
            map: MapConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct TwistConfigBuilder {
    seed: Option<u64>,
    epsilon: Option<f64>,
    orbits: Option<usize>,
    output: Option<PathBuf>,
    projection: Option<Projection>,
}

impl TwistConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the perturbation strength.
    #[must_use]
    pub const fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Set the number of orbits.
    #[must_use]
    pub const fn orbits(mut self, orbits: usize) -> Self {
        self.orbits = Some(orbits);
        self
    }

    /// Set the figure output path.
    #[must_use]
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the plot projection.
    #[must_use]
    pub const fn projection(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TwistConfig {
        let mut config = TwistConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(epsilon) = self.epsilon {
            config.map.epsilon = epsilon;
        }
        if let Some(orbits) = self.orbits {
            config.map.orbits = orbits;
        }
        if let Some(output) = self.output {
            config.plot.output = output;
        }
        if let Some(projection) = self.projection {
            config.plot.projection = projection;
        }

        config
    }
}

/// Experiment metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMeta {
    /// Experiment name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

fn default_name() -> String {
    "kam-twist".to_string()
}

impl Default for SimulationMeta {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: String::new(),
        }
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReproducibilityConfig {
    /// Master seed for the single PRNG stream.
    pub seed: u64,
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self { seed: 2 }
    }
}

/// Twist-map parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MapConfig {
    /// Perturbation strength ε.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Number of initial conditions drawn.
    #[validate(range(min = 1, max = 100_000))]
    #[serde(default = "default_orbits")]
    pub orbits: usize,
    /// Iterations per unit of shifted action.
    #[serde(default = "default_steps_per_unit")]
    pub steps_per_unit: f64,
    /// Radial offset of the Cartesian projection.
    #[serde(default = "default_radius_offset")]
    pub radius_offset: f64,
}

const fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

const fn default_orbits() -> usize {
    50
}

const fn default_steps_per_unit() -> f64 {
    DEFAULT_STEPS_PER_UNIT
}

const fn default_radius_offset() -> f64 {
    DEFAULT_RADIUS_OFFSET
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            orbits: default_orbits(),
            steps_per_unit: default_steps_per_unit(),
            radius_offset: default_radius_offset(),
        }
    }
}

/// Which coordinates the figure shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Projection {
    /// Polar embedding: `r = J + π + offset`, plotted as (x, y).
    #[default]
    Cartesian,
    /// Raw phase plane: action against signed angle.
    Phase,
}

/// Figure settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlotConfig {
    /// SVG file to write.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Figure width in pixels.
    #[validate(range(min = 100, max = 10_000))]
    #[serde(default = "default_size")]
    pub width: u32,
    /// Figure height in pixels.
    #[validate(range(min = 100, max = 10_000))]
    #[serde(default = "default_size")]
    pub height: u32,
    /// Marker radius in pixels.
    #[validate(range(min = 1, max = 20))]
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,
    /// Coordinates to plot.
    #[serde(default)]
    pub projection: Projection,
    /// Title override.
    #[serde(default)]
    pub title: Option<String>,
    /// X axis label.
    #[serde(default = "default_x_label")]
    pub x_label: String,
    /// Y axis label.
    #[serde(default = "default_y_label")]
    pub y_label: String,
}

fn default_output() -> PathBuf {
    PathBuf::from("kam_twist.svg")
}

const fn default_size() -> u32 {
    1000
}

const fn default_marker_size() -> u32 {
    1
}

fn default_x_label() -> String {
    "J".to_string()
}

fn default_y_label() -> String {
    "θ".to_string()
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            width: default_size(),
            height: default_size(),
            marker_size: default_marker_size(),
            projection: Projection::default(),
            title: None,
            x_label: default_x_label(),
            y_label: default_y_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_match_experiment() {
        let config = TwistConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.reproducibility.seed, 2);
        assert!((config.map.epsilon - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.map.orbits, 50);
        assert!((config.map.steps_per_unit - 200.0).abs() < f64::EPSILON);
        assert!((config.map.radius_offset - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.plot.projection, Projection::Cartesian);
        assert_eq!(config.plot.x_label, "J");
        assert_eq!(config.plot.y_label, "θ");
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_default_title_names_epsilon() {
        let config = TwistConfig::default();
        assert_eq!(config.title(), "KAM Twist Map for ε = 0.3");
    }

    #[test]
    fn test_title_override() {
        let mut config = TwistConfig::default();
        config.plot.title = Some("Custom".to_string());
        assert_eq!(config.title(), "Custom");
    }

    #[test]
    fn test_config_builder() {
        let config = TwistConfig::builder()
            .seed(12345)
            .epsilon(0.9)
            .orbits(10)
            .output("out.svg")
            .projection(Projection::Phase)
            .build();

        assert_eq!(config.reproducibility.seed, 12345);
        assert!((config.map.epsilon - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.map.orbits, 10);
        assert_eq!(config.plot.output, PathBuf::from("out.svg"));
        assert_eq!(config.plot.projection, Projection::Phase);
    }

    #[test]
    fn test_config_yaml_minimal() {
        let yaml = r"
reproducibility:
  seed: 2
";
        let config = TwistConfig::from_yaml(yaml).ok();
        assert!(config.is_some());
        assert_eq!(config.as_ref().map(|c| c.map.orbits), Some(50));
    }

    #[test]
    fn test_config_yaml_full() {
        let yaml = r"
schema_version: '1.0'
simulation:
  name: strong-kick
  description: Mostly chaotic sea
reproducibility:
  seed: 7
map:
  epsilon: 0.97
  orbits: 20
plot:
  output: strong.svg
  projection: phase
  marker_size: 2
";
        let config = TwistConfig::from_yaml(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok();
        assert_eq!(
            config.as_ref().map(|c| c.simulation.name.as_str()),
            Some("strong-kick")
        );
        assert_eq!(config.as_ref().map(|c| c.plot.projection), Some(Projection::Phase));
        assert_eq!(config.as_ref().map(|c| c.map.orbits), Some(20));
    }

    #[test]
    fn test_config_requires_seed() {
        let yaml = r"
map:
  epsilon: 0.3
";
        assert!(TwistConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let yaml = r"
reproducibility:
  seed: 2
threads: 8
";
        let result = TwistConfig::from_yaml(yaml);
        assert!(matches!(result, Err(TwistError::YamlParse(_))));
    }

    #[test]
    fn test_config_rejects_zero_orbits() {
        let yaml = r"
reproducibility:
  seed: 2
map:
  orbits: 0
";
        let result = TwistConfig::from_yaml(yaml);
        assert!(matches!(result, Err(TwistError::Validation(_))));
    }

    #[test]
    fn test_config_rejects_tiny_figure() {
        let yaml = r"
reproducibility:
  seed: 2
plot:
  width: 10
";
        assert!(matches!(
            TwistConfig::from_yaml(yaml),
            Err(TwistError::Validation(_))
        ));
    }

    #[test]
    fn test_config_rejects_non_finite_epsilon() {
        let config = TwistConfig::builder().epsilon(f64::NAN).build();
        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("epsilon"));
    }

    #[test]
    fn test_config_rejects_non_positive_steps() {
        let mut config = TwistConfig::default();
        config.map.steps_per_unit = 0.0;
        assert!(matches!(config.check(), Err(TwistError::Config { .. })));
    }

    #[test]
    fn test_config_rejects_huge_steps_per_unit() {
        let yaml = r"
reproducibility:
  seed: 2
map:
  orbits: 1
  steps_per_unit: 1.0e300
";
        let err = TwistConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, TwistError::Config { .. }));
        assert!(err.to_string().contains("steps_per_unit"));
    }

    #[test]
    fn test_config_accepts_largest_steps_per_unit() {
        let mut config = TwistConfig::default();
        config.map.steps_per_unit = MAX_STEPS_PER_UNIT;
        assert!(config.check().is_ok());
        config.map.steps_per_unit = f64::INFINITY;
        assert!(config.check().is_err());
    }

    #[test]
    fn test_config_rejects_empty_output() {
        let config = TwistConfig::builder().output("").build();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = TwistConfig::load("/nonexistent/kam.yaml");
        assert!(matches!(result, Err(TwistError::Io(_))));
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().ok();
        let path = dir.as_ref().map(|d| d.path().join("kam.yaml"));
        let Some(path) = path else { return };
        std::fs::write(&path, "reproducibility:\n  seed: 99\n").ok();
        let config = TwistConfig::load(&path).ok();
        assert_eq!(config.map(|c| c.reproducibility.seed), Some(99));
    }

    #[test]
    fn test_config_yaml_roundtrip_through_serde() {
        let config = TwistConfig::builder().seed(5).build();
        let yaml = serde_yaml::to_string(&config).ok();
        let back = yaml.and_then(|y| TwistConfig::from_yaml(&y).ok());
        assert_eq!(back.map(|c| c.reproducibility.seed), Some(5));
    }
}
