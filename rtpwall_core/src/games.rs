use serde::{Deserialize, Serialize};

use rtpwall_shared::{CatalogManifest, ManifestResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Game {
    pub provider: String,
    pub image: String,
    pub priority: i32, // sort order only
}

impl Game {
    pub fn new(provider: impl Into<String>, image: impl Into<String>, priority: i32) -> Self {
        Self {
            provider: provider.into(),
            image: image.into(),
            priority,
        }
    }

    /// Opaque identifier fed to the hasher.
    pub fn id(&self) -> String {
        format!("{}/{}", self.provider, self.image)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFilter {
    #[default]
    All,
    Provider(String),
}

impl ProviderFilter {
    pub fn matches(&self, game: &Game) -> bool {
        match self {
            ProviderFilter::All => true,
            ProviderFilter::Provider(name) => game.provider == *name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ProviderFilter::All => "all",
            ProviderFilter::Provider(name) => name,
        }
    }
}

/// Absent selection shows every game; any name, including "all", is a provider.
impl From<Option<String>> for ProviderFilter {
    fn from(provider: Option<String>) -> Self {
        match provider {
            Some(name) => ProviderFilter::Provider(name),
            None => ProviderFilter::All,
        }
    }
}

/// Immutable game list for one load; rebuilt from scratch on each discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    games: Vec<Game>,
}

impl Catalog {
    pub fn new(mut games: Vec<Game>) -> Self {
        // stable: equal priorities keep discovery order
        games.sort_by_key(|g| g.priority);
        Self { games }
    }

    /// Games without an explicit priority rank by their position in the group.
    pub fn from_manifest(manifest: &CatalogManifest) -> ManifestResult<Self> {
        manifest.validate()?;
        let games = manifest
            .providers
            .iter()
            .flat_map(|group| {
                group.games.iter().enumerate().map(|(pos, g)| {
                    Game::new(&group.name, &g.image, g.priority.unwrap_or(pos as i32))
                })
            })
            .collect();
        Ok(Self::new(games))
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Provider names in first-seen order.
    pub fn providers(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for g in &self.games {
            if !out.contains(&g.provider.as_str()) {
                out.push(&g.provider);
            }
        }
        out
    }

    pub fn visible<'a>(&'a self, filter: &'a ProviderFilter) -> impl Iterator<Item = &'a Game> {
        self.games.iter().filter(move |g| filter.matches(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtpwall_shared::{ManifestGame, ProviderGroup};

    fn manifest() -> CatalogManifest {
        CatalogManifest {
            providers: vec![
                ProviderGroup {
                    name: "pgsoft".into(),
                    games: vec![
                        ManifestGame {
                            image: "fortune-tiger.webp".into(),
                            priority: None,
                        },
                        ManifestGame {
                            image: "mahjong-ways.webp".into(),
                            priority: None,
                        },
                    ],
                },
                ProviderGroup {
                    name: "pragmatic".into(),
                    games: vec![ManifestGame {
                        image: "gates-of-olympus.webp".into(),
                        priority: Some(-1),
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_game_id() {
        let game = Game::new("pragmatic", "gates-of-olympus", 0);
        assert_eq!(game.id(), "pragmatic/gates-of-olympus");
    }

    #[test]
    fn test_catalog_sorted_by_priority() {
        let catalog = Catalog::from_manifest(&manifest()).unwrap();
        let ids: Vec<String> = catalog.games().iter().map(Game::id).collect();
        assert_eq!(
            ids,
            [
                "pragmatic/gates-of-olympus.webp",
                "pgsoft/fortune-tiger.webp",
                "pgsoft/mahjong-ways.webp"
            ]
        );
        assert_eq!(catalog.providers(), ["pragmatic", "pgsoft"]);
    }

    #[test]
    fn test_filter() {
        let catalog = Catalog::from_manifest(&manifest()).unwrap();
        let pg = ProviderFilter::Provider("pgsoft".into());
        assert_eq!(catalog.visible(&pg).count(), 2);
        assert_eq!(catalog.visible(&ProviderFilter::All).count(), 3);
        let none = ProviderFilter::Provider("netent".into());
        assert_eq!(catalog.visible(&none).count(), 0);
    }

    #[test]
    fn test_provider_named_all_is_selectable() {
        let catalog = Catalog::new(vec![
            Game::new("all", "everything.webp", 0),
            Game::new("pgsoft", "fortune-ox.webp", 0),
        ]);
        let filter = ProviderFilter::from(Some("all".to_string()));
        let ids: Vec<String> = catalog.visible(&filter).map(Game::id).collect();
        assert_eq!(ids, ["all/everything.webp"]);
    }

    #[test]
    fn test_filter_from_option() {
        assert_eq!(ProviderFilter::from(None), ProviderFilter::All);
        assert_eq!(
            ProviderFilter::from(Some("all".to_string())),
            ProviderFilter::Provider("all".into())
        );
        assert_eq!(
            ProviderFilter::from(Some("pgsoft".to_string())),
            ProviderFilter::Provider("pgsoft".into())
        );
    }
}
