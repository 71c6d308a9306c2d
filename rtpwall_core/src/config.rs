use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;

use crate::multipliers::{MultiplierEntry, MultiplierTable};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("rtp range is empty: min {min} > max {max}")]
    EmptyRange { min: u32, max: u32 },
    #[error("multiplier table has no entries")]
    EmptyMultiplierTable,
    #[error("multiplier entry {index} has a blank label")]
    BlankLabel { index: usize },
    #[error("mode label is blank")]
    BlankModeLabel,
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RtpRange {
    pub min: u32,
    pub max: u32,
}

impl RtpRange {
    pub fn contains(&self, rtp: u32) -> bool {
        (self.min..=self.max).contains(&rtp)
    }
}

/// Manual/auto badge next to the multiplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModePolicy {
    /// Drawn from the base seed times 11, mapped to {0, 1}.
    Seeded { when_zero: String, when_one: String },
    Fixed(String),
}

impl Default for ModePolicy {
    fn default() -> Self {
        ModePolicy::Seeded {
            when_zero: "Manual".into(),
            when_one: "Auto".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    rtp: RtpRange,
    multipliers: Vec<MultiplierEntry>,
    #[serde(default)]
    mode: ModePolicy,
}

/// Process-wide, read-only display configuration. Only constructible in a
/// valid state, so the generator never has to guard its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile", into = "ConfigFile")]
pub struct GalleryConfig {
    rtp: RtpRange,
    multipliers: MultiplierTable,
    mode: ModePolicy,
}

impl GalleryConfig {
    pub fn new(
        rtp: RtpRange,
        multipliers: MultiplierTable,
        mode: ModePolicy,
    ) -> Result<Self, ConfigError> {
        if rtp.min > rtp.max {
            return Err(ConfigError::EmptyRange {
                min: rtp.min,
                max: rtp.max,
            });
        }
        if multipliers.is_empty() {
            return Err(ConfigError::EmptyMultiplierTable);
        }
        if let Some(index) = multipliers.iter().position(|e| e.label.trim().is_empty()) {
            return Err(ConfigError::BlankLabel { index });
        }
        let blank_mode = match &mode {
            ModePolicy::Seeded {
                when_zero,
                when_one,
            } => when_zero.trim().is_empty() || when_one.trim().is_empty(),
            ModePolicy::Fixed(label) => label.trim().is_empty(),
        };
        if blank_mode {
            return Err(ConfigError::BlankModeLabel);
        }
        debug!(
            min = rtp.min,
            max = rtp.max,
            multipliers = multipliers.len(),
            "gallery config accepted"
        );
        Ok(Self {
            rtp,
            multipliers,
            mode,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn rtp(&self) -> RtpRange {
        self.rtp
    }

    pub fn multipliers(&self) -> &MultiplierTable {
        &self.multipliers
    }

    pub fn mode(&self) -> &ModePolicy {
        &self.mode
    }

    /// SHA-256 over the canonical JSON form. Two clients show the same values
    /// for the same minute only if their fingerprints match.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(&ConfigFile::from(self.clone()))
            .expect("config serializes to json");
        hex::encode(Sha256::digest(&canonical))
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            rtp: RtpRange { min: 30, max: 99 },
            multipliers: MultiplierTable::standard(),
            mode: ModePolicy::default(),
        }
    }
}

impl TryFrom<ConfigFile> for GalleryConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        Self::new(file.rtp, MultiplierTable(file.multipliers), file.mode)
    }
}

impl From<GalleryConfig> for ConfigFile {
    fn from(config: GalleryConfig) -> Self {
        Self {
            rtp: config.rtp,
            multipliers: config.multipliers.0,
            mode: config.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multipliers::Tier;

    const SAMPLE: &str = r#"{
        "rtp": {"min": 40, "max": 97},
        "multipliers": [
            {"label": "2X", "tier": "low"},
            {"label": "50X", "tier": "high"}
        ],
        "mode": {"fixed": "Auto"}
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = GalleryConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(config.rtp(), RtpRange { min: 40, max: 97 });
        assert_eq!(config.multipliers().len(), 2);
        assert_eq!(config.multipliers().get(1).unwrap().tier, Tier::High);
        assert_eq!(config.mode(), &ModePolicy::Fixed("Auto".into()));
    }

    #[test]
    fn test_mode_defaults_to_seeded() {
        let json = r#"{
            "rtp": {"min": 30, "max": 99},
            "multipliers": [{"label": "3X", "tier": "low"}]
        }"#;
        let config = GalleryConfig::from_json_str(json).unwrap();
        assert_eq!(config.mode(), &ModePolicy::default());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = GalleryConfig::new(
            RtpRange { min: 99, max: 30 },
            MultiplierTable::standard(),
            ModePolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRange { min: 99, max: 30 }));
    }

    #[test]
    fn test_rejects_empty_table_from_json() {
        let json = r#"{"rtp": {"min": 30, "max": 99}, "multipliers": []}"#;
        let err = GalleryConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("no entries"));
    }

    #[test]
    fn test_rejects_blank_labels() {
        let table = MultiplierTable(vec![
            MultiplierEntry::new("3X", Tier::Low),
            MultiplierEntry::new("  ", Tier::High),
        ]);
        let err = GalleryConfig::new(RtpRange { min: 30, max: 99 }, table, ModePolicy::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::BlankLabel { index: 1 }));

        let err = GalleryConfig::new(
            RtpRange { min: 30, max: 99 },
            MultiplierTable::standard(),
            ModePolicy::Fixed(String::new()),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::BlankModeLabel));
    }

    #[test]
    fn test_json_roundtrip_keeps_fingerprint() {
        let config = GalleryConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = GalleryConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.fingerprint(), config.fingerprint());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let base = GalleryConfig::default();
        let narrowed = GalleryConfig::new(
            RtpRange { min: 30, max: 98 },
            MultiplierTable::standard(),
            ModePolicy::default(),
        )
        .unwrap();
        assert_eq!(base.fingerprint().len(), 64);
        assert_ne!(base.fingerprint(), narrowed.fingerprint());
    }
}
