//! Analysis configuration via TOML files.
//!
//! Every knob of the clustering pipeline that is not a per-call parameter
//! lives here, including the fixed seed and restart count that make
//! clustering reproducible.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Sequence clustering configuration loaded from the `[analysis]` table.
///
/// # Examples
///
/// ```
/// use matriz_core::AnalysisConfig;
///
/// let config = AnalysisConfig::load_from_file("config/matriz.toml")
///     .unwrap_or_else(|_| AnalysisConfig::default());
///
/// println!("k = {}, seed = {}", config.default_k, config.seed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Cluster count used when the caller does not supply one
    pub default_k: usize,
    /// Seed for centroid initialization
    pub seed: u64,
    /// Independent k-means runs; the lowest inertia run is kept
    pub restarts: usize,
    /// Lloyd iteration cap per run
    pub max_iterations: usize,
    /// Relative centroid shift under which a run is considered converged
    pub tolerance: f64,
    /// Maximum number of word terms kept as binary features
    pub vocabulary_size: usize,
    /// Names listed per cluster summary
    pub top_colors: usize,
    /// Sequences returned by the momentum ranking
    pub top_sequences: usize,
    /// Separator between color names inside a sequence cell
    pub sequence_delimiter: char,
    /// Name of the free-text word association column
    pub word_column: String,
    /// Whether the 2-component projection is computed
    pub compute_projection: bool,
}

impl AnalysisConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    /// Parse the `[analysis]` table; a missing table yields defaults.
    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfigFile =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        Self::try_from(raw.analysis)
    }

    fn try_from(raw: RawAnalysisConfig) -> Result<Self, ConfigError> {
        if raw.default_k == 0 {
            return Err(ConfigError::Parse("analysis.default_k must be ≥ 1".into()));
        }
        if raw.restarts == 0 {
            return Err(ConfigError::Parse("analysis.restarts must be ≥ 1".into()));
        }
        if raw.max_iterations == 0 {
            return Err(ConfigError::Parse(
                "analysis.max_iterations must be ≥ 1".into(),
            ));
        }
        if !raw.tolerance.is_finite() || raw.tolerance < 0.0 {
            return Err(ConfigError::Parse("analysis.tolerance must be ≥ 0".into()));
        }

        let mut delimiter = raw.sequence_delimiter.chars();
        let sequence_delimiter = match (delimiter.next(), delimiter.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(ConfigError::Parse(
                    "analysis.sequence_delimiter must be a single character".into(),
                ))
            }
        };

        if raw.word_column.trim().is_empty() {
            return Err(ConfigError::Parse(
                "analysis.word_column must not be empty".into(),
            ));
        }

        Ok(Self {
            default_k: raw.default_k,
            seed: raw.seed,
            restarts: raw.restarts,
            max_iterations: raw.max_iterations,
            tolerance: raw.tolerance,
            vocabulary_size: raw.vocabulary_size,
            top_colors: raw.top_colors,
            top_sequences: raw.top_sequences,
            sequence_delimiter,
            word_column: raw.word_column,
            compute_projection: raw.compute_projection,
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            seed: default_seed(),
            restarts: default_restarts(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            vocabulary_size: default_vocabulary_size(),
            top_colors: default_top_colors(),
            top_sequences: default_top_sequences(),
            sequence_delimiter: ',',
            word_column: default_word_column(),
            compute_projection: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfigFile {
    #[serde(default)]
    analysis: RawAnalysisConfig,
}

#[derive(Debug, Deserialize)]
struct RawAnalysisConfig {
    #[serde(default = "default_k")]
    default_k: usize,
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default = "default_restarts")]
    restarts: usize,
    #[serde(default = "default_max_iterations")]
    max_iterations: usize,
    #[serde(default = "default_tolerance")]
    tolerance: f64,
    #[serde(default = "default_vocabulary_size")]
    vocabulary_size: usize,
    #[serde(default = "default_top_colors")]
    top_colors: usize,
    #[serde(default = "default_top_sequences")]
    top_sequences: usize,
    #[serde(default = "default_sequence_delimiter")]
    sequence_delimiter: String,
    #[serde(default = "default_word_column")]
    word_column: String,
    #[serde(default = "default_compute_projection")]
    compute_projection: bool,
}

impl Default for RawAnalysisConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            seed: default_seed(),
            restarts: default_restarts(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            vocabulary_size: default_vocabulary_size(),
            top_colors: default_top_colors(),
            top_sequences: default_top_sequences(),
            sequence_delimiter: default_sequence_delimiter(),
            word_column: default_word_column(),
            compute_projection: default_compute_projection(),
        }
    }
}

fn default_k() -> usize {
    5
}

fn default_seed() -> u64 {
    42
}

fn default_restarts() -> usize {
    10
}

fn default_max_iterations() -> usize {
    300
}

fn default_tolerance() -> f64 {
    1.0e-4
}

fn default_vocabulary_size() -> usize {
    100
}

fn default_top_colors() -> usize {
    5
}

fn default_top_sequences() -> usize {
    5
}

fn default_sequence_delimiter() -> String {
    ",".to_string()
}

fn default_word_column() -> String {
    "english-words".to_string()
}

fn default_compute_projection() -> bool {
    true
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}
