//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Pathweaver configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub clustering: ClusteringConfig,
    pub layout: LayoutConfig,
    pub journey: JourneyConfig,
    pub storage: StorageConfig,
}

/// Thresholds used when ranking and merging concepts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Noun phrases longer than this many words are dropped
    pub max_phrase_words: usize,
    /// How many of the most frequent noun phrases are considered
    pub phrase_candidates: usize,
    pub min_phrase_frequency: usize,
    /// How many of the most frequent single-word terms are considered
    pub term_candidates: usize,
    pub min_term_frequency: usize,
    /// Terms need at least this many characters
    pub min_term_chars: usize,
    /// Fixed importance given to named entities
    pub entity_importance: f64,
    pub max_concepts: usize,
    pub max_roots: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_phrase_words: 5,
            phrase_candidates: 50,
            min_phrase_frequency: 2,
            term_candidates: 30,
            min_term_frequency: 3,
            min_term_chars: 3,
            entity_importance: 0.8,
            max_concepts: 100,
            max_roots: 5,
        }
    }
}

/// Community detection algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringAlgorithm {
    /// Louvain modularity optimization
    #[default]
    Modularity,
    /// Plain connected components
    ConnectedComponents,
}

impl ClusteringAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modularity => "modularity",
            Self::ConnectedComponents => "connected_components",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "modularity" | "louvain" => Some(Self::Modularity),
            "connected_components" | "components" => Some(Self::ConnectedComponents),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub algorithm: ClusteringAlgorithm,
    /// Modularity resolution (higher = more, smaller communities)
    pub resolution: f64,
    pub seed: Option<u64>,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            algorithm: ClusteringAlgorithm::Modularity,
            resolution: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub iterations: usize,
    /// Optimal distance between nodes in the spring model
    pub optimal_distance: f64,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 50,
            optimal_distance: 0.3,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the data directory: `PATHWEAVER_DATA_DIR`, then config, then platform default
    pub fn resolved_data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Ok(custom_dir) = env::var("PATHWEAVER_DATA_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        Ok(dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?
            .join("pathweaver"))
    }
}

const KEYS: &[&str] = &[
    "extraction.max_phrase_words",
    "extraction.phrase_candidates",
    "extraction.min_phrase_frequency",
    "extraction.term_candidates",
    "extraction.min_term_frequency",
    "extraction.min_term_chars",
    "extraction.entity_importance",
    "extraction.max_concepts",
    "extraction.max_roots",
    "clustering.algorithm",
    "clustering.resolution",
    "clustering.seed",
    "layout.iterations",
    "layout.optimal_distance",
    "layout.seed",
    "journey.seed",
    "storage.data_dir",
];

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("PATHWEAVER_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("pathweaver")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or return defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config = Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let ex = &self.extraction;
        if ex.max_phrase_words == 0 {
            return Err(anyhow!("extraction.max_phrase_words must be at least 1"));
        }
        if ex.min_phrase_frequency == 0 || ex.min_term_frequency == 0 {
            return Err(anyhow!("Minimum frequencies must be at least 1"));
        }
        if ex.max_concepts == 0 {
            return Err(anyhow!("extraction.max_concepts must be at least 1"));
        }
        if !ex.entity_importance.is_finite() || ex.entity_importance < 0.0 {
            return Err(anyhow!("extraction.entity_importance must be a non-negative number"));
        }
        if !self.clustering.resolution.is_finite() || self.clustering.resolution <= 0.0 {
            return Err(anyhow!("clustering.resolution must be positive"));
        }
        if self.layout.iterations == 0 {
            return Err(anyhow!("layout.iterations must be at least 1"));
        }
        if !self.layout.optimal_distance.is_finite() || self.layout.optimal_distance <= 0.0 {
            return Err(anyhow!("layout.optimal_distance must be positive"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        let ex = &self.extraction;
        match key {
            "extraction.max_phrase_words" => Ok(ex.max_phrase_words.to_string()),
            "extraction.phrase_candidates" => Ok(ex.phrase_candidates.to_string()),
            "extraction.min_phrase_frequency" => Ok(ex.min_phrase_frequency.to_string()),
            "extraction.term_candidates" => Ok(ex.term_candidates.to_string()),
            "extraction.min_term_frequency" => Ok(ex.min_term_frequency.to_string()),
            "extraction.min_term_chars" => Ok(ex.min_term_chars.to_string()),
            "extraction.entity_importance" => Ok(ex.entity_importance.to_string()),
            "extraction.max_concepts" => Ok(ex.max_concepts.to_string()),
            "extraction.max_roots" => Ok(ex.max_roots.to_string()),

            "clustering.algorithm" => Ok(self.clustering.algorithm.as_str().to_string()),
            "clustering.resolution" => Ok(self.clustering.resolution.to_string()),
            "clustering.seed" => Ok(format_seed(self.clustering.seed)),

            "layout.iterations" => Ok(self.layout.iterations.to_string()),
            "layout.optimal_distance" => Ok(self.layout.optimal_distance.to_string()),
            "layout.seed" => Ok(format_seed(self.layout.seed)),

            "journey.seed" => Ok(format_seed(self.journey.seed)),

            "storage.data_dir" => Ok(self.storage.resolved_data_dir()?.display().to_string()),

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `pathweaver config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let ex = &mut self.extraction;
        match key {
            "extraction.max_phrase_words" => ex.max_phrase_words = parse_usize(key, value)?,
            "extraction.phrase_candidates" => ex.phrase_candidates = parse_usize(key, value)?,
            "extraction.min_phrase_frequency" => {
                ex.min_phrase_frequency = parse_usize(key, value)?
            }
            "extraction.term_candidates" => ex.term_candidates = parse_usize(key, value)?,
            "extraction.min_term_frequency" => ex.min_term_frequency = parse_usize(key, value)?,
            "extraction.min_term_chars" => ex.min_term_chars = parse_usize(key, value)?,
            "extraction.entity_importance" => {
                ex.entity_importance = value
                    .parse()
                    .with_context(|| format!("Invalid entity_importance value: {}", value))?;
            }
            "extraction.max_concepts" => ex.max_concepts = parse_usize(key, value)?,
            "extraction.max_roots" => ex.max_roots = parse_usize(key, value)?,

            "clustering.algorithm" => {
                self.clustering.algorithm = ClusteringAlgorithm::parse(value).ok_or_else(|| {
                    anyhow!(
                        "Invalid clustering algorithm: {}. Valid options: modularity, connected_components",
                        value
                    )
                })?;
            }
            "clustering.resolution" => {
                self.clustering.resolution = value
                    .parse()
                    .with_context(|| format!("Invalid resolution value: {}", value))?;
            }
            "clustering.seed" => self.clustering.seed = parse_seed(value)?,

            "layout.iterations" => self.layout.iterations = parse_usize(key, value)?,
            "layout.optimal_distance" => {
                self.layout.optimal_distance = value
                    .parse()
                    .with_context(|| format!("Invalid optimal_distance value: {}", value))?;
            }
            "layout.seed" => self.layout.seed = parse_seed(value)?,

            "journey.seed" => self.journey.seed = parse_seed(value)?,

            "storage.data_dir" => {
                self.storage.data_dir = if value.is_empty() || value == "default" {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `pathweaver config list` to see available keys.",
                    key
                ));
            }
        }
        self.validate()
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        KEYS.iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

fn parse_usize(key: &str, value: &str) -> anyhow::Result<usize> {
    value
        .parse()
        .with_context(|| format!("Invalid value for {}: {}", key, value))
}

fn parse_seed(value: &str) -> anyhow::Result<Option<u64>> {
    match value {
        "" | "none" | "random" => Ok(None),
        v => Ok(Some(
            v.parse()
                .with_context(|| format!("Invalid seed value: {}", v))?,
        )),
    }
}

fn format_seed(seed: Option<u64>) -> String {
    seed.map(|s| s.to_string())
        .unwrap_or_else(|| "random".to_string())
}
