use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Explicit configuration for one pipeline invocation.
///
/// Every path the pipeline touches lives here; there is no process-wide
/// path state. The whole struct can be loaded from a TOML file, and any
/// omitted field falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw card dataset (CSV with JSON-encoded nested cells).
    pub raw_cards_path: PathBuf,
    /// Ability side-table artifact written by the flattener.
    pub abilities_path: PathBuf,
    /// Attack side-table artifact written by the flattener.
    pub attacks_path: PathBuf,
    /// Energy companion-table artifact.
    pub energy_path: PathBuf,
    /// Trainer tag-table artifact.
    pub trainers_path: PathBuf,
    /// Final feature-table artifact; also the result-cache location.
    pub output_path: PathBuf,
    /// Legality format whose status must be "Legal" (e.g. "standard").
    pub legal_format: String,
    /// Minimum regulation marker, compared lexicographically.
    pub min_regulation_mark: String,
    /// Supertype the pipeline keeps (e.g. "Pokémon").
    pub target_supertype: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_cards_path: PathBuf::from("data/cards.csv"),
            abilities_path: PathBuf::from("data/pokemon_abilities.csv"),
            attacks_path: PathBuf::from("data/pokemon_attacks.csv"),
            energy_path: PathBuf::from("data/energy_cleaned.csv"),
            trainers_path: PathBuf::from("data/trainer_tags.csv"),
            output_path: PathBuf::from("data/pokemon_features.csv"),
            legal_format: "standard".to_string(),
            min_regulation_mark: "G".to_string(),
            target_supertype: "Pokémon".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read config {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_data_dir() {
        let config = PipelineConfig::default();
        assert_eq!(config.raw_cards_path, PathBuf::from("data/cards.csv"));
        assert_eq!(config.min_regulation_mark, "G");
        assert_eq!(config.target_supertype, "Pokémon");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: PipelineConfig =
            toml::from_str("raw_cards_path = \"elsewhere/cards.csv\"").unwrap();
        assert_eq!(config.raw_cards_path, PathBuf::from("elsewhere/cards.csv"));
        assert_eq!(config.legal_format, "standard");
    }
}
