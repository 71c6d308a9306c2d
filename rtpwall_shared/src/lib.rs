use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of game discovery: image files grouped by provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CatalogManifest {
    pub providers: Vec<ProviderGroup>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProviderGroup {
    pub name: String,
    pub games: Vec<ManifestGame>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManifestGame {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl CatalogManifest {
    pub fn from_json_str(json: &str) -> ManifestResult<Self> {
        let manifest: Self =
            serde_json::from_str(json).map_err(|e| ManifestError::Invalid(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> ManifestResult<()> {
        let mut seen = HashSet::new();
        for group in &self.providers {
            if group.name.trim().is_empty() {
                return Err(ManifestError::Invalid("blank provider name".into()));
            }
            for game in &group.games {
                if game.image.trim().is_empty() {
                    return Err(ManifestError::Invalid(format!(
                        "blank image in provider {}",
                        group.name
                    )));
                }
                let id = format!("{}/{}", group.name, game.image);
                if !seen.insert(id.clone()) {
                    return Err(ManifestError::DuplicateGame(id));
                }
            }
        }
        Ok(())
    }
}

/// One rendered card. Tiers travel as lowercase strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameCard {
    pub game_id: String,
    pub provider: String,
    pub image: String,
    pub rtp: u32,
    pub rtp_tier: String,
    pub multiplier: String,
    pub multiplier_tier: String,
    pub mode: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub rendered_at: NaiveDateTime, // local calendar time
    pub epoch_minute: i64,
    pub refresh_in_ms: u32,
    pub filter: String,
    pub cards: Vec<GameCard>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ManifestError {
    #[error("invalid manifest: {0}")]
    Invalid(String),
    #[error("duplicate game: {0}")]
    DuplicateGame(String),
}

pub type ManifestResult<T> = Result<T, ManifestError>;
