use std::path::Path;

use serde::Deserialize;

use crate::cache::CacheConfig;

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server and dictionary settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_address")]
    pub address: String,

    /// Line-oriented word list loaded at startup, one word per line.
    #[serde(default = "default_dict_file")]
    pub dict_file: String,

    /// Dictionary lines longer than this many characters are skipped.
    #[serde(default = "default_max_word_len")]
    pub max_word_len: usize,
}

fn default_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_dict_file() -> String {
    "data/words_alpha.txt".to_string()
}

fn default_max_word_len() -> usize {
    64
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            dict_file: default_dict_file(),
            max_word_len: default_max_word_len(),
        }
    }
}

/// Seed scores for the two insertion paths.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Popularity seeded for words loaded from the dictionary file.
    #[serde(default = "default_bulk_insert_score")]
    pub bulk_insert_score: u32,

    /// Popularity seeded for words added interactively over the wire.
    #[serde(default = "default_insert_score")]
    pub insert_score: u32,
}

fn default_bulk_insert_score() -> u32 {
    100
}

fn default_insert_score() -> u32 {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bulk_insert_score: default_bulk_insert_score(),
            insert_score: default_insert_score(),
        }
    }
}

/// Generate sample config file.
pub fn generate_sample(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        return Err("config file already exists".into());
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Load configuration from a given TOML file.
pub fn read_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Merge the given src config into the dest config struct.
pub fn merge(dest: &mut Config, src: Config) {
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.dict_file.is_empty() {
        dest.app.dict_file = src.app.dict_file;
    }
    if src.app.max_word_len > 0 {
        dest.app.max_word_len = src.app.max_word_len;
    }

    if src.engine.bulk_insert_score > 0 {
        dest.engine.bulk_insert_score = src.engine.bulk_insert_score;
    }
    if src.engine.insert_score > 0 {
        dest.engine.insert_score = src.engine.insert_score;
    }

    dest.cache.enabled = src.cache.enabled;
    if src.cache.capacity > 0 {
        dest.cache.capacity = src.cache.capacity;
    }
}
