use chrono::NaiveDateTime;
use tracing::debug;

use rtpwall_shared::{BoardSnapshot, GameCard};

use crate::{
    clock::{epoch_minute, millis_until_next_minute},
    config::GalleryConfig,
    engine::compute_display,
    games::{Catalog, Game, ProviderFilter},
};

/// The gallery's only mutable state: which games are loaded and which
/// provider tab is selected. Owned by the caller and passed to each render.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    catalog: Catalog,
    filter: ProviderFilter,
}

impl BoardState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            filter: ProviderFilter::All,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &ProviderFilter {
        &self.filter
    }

    pub fn select(&mut self, filter: ProviderFilter) {
        self.filter = filter;
    }

    /// Swap in a freshly discovered catalog. An active provider filter that
    /// no longer exists falls back to all games.
    pub fn reload(&mut self, catalog: Catalog) {
        if let ProviderFilter::Provider(name) = &self.filter {
            if !catalog.providers().contains(&name.as_str()) {
                self.filter = ProviderFilter::All;
            }
        }
        self.catalog = catalog;
    }

    pub fn render(&self, config: &GalleryConfig, now: NaiveDateTime) -> BoardSnapshot {
        render_board(config, &self.catalog, &self.filter, now)
    }
}

pub fn render_card(config: &GalleryConfig, game: &Game, now: NaiveDateTime) -> GameCard {
    let game_id = game.id();
    let value = compute_display(config, &game_id, now);
    GameCard {
        game_id,
        provider: game.provider.clone(),
        image: game.image.clone(),
        rtp: value.rtp,
        rtp_tier: value.rtp_tier.to_string(),
        multiplier: value.multiplier.label,
        multiplier_tier: value.multiplier.tier.to_string(),
        mode: value.mode,
    }
}

/// One render pass: every visible game evaluated against the same minute.
pub fn render_board(
    config: &GalleryConfig,
    catalog: &Catalog,
    filter: &ProviderFilter,
    now: NaiveDateTime,
) -> BoardSnapshot {
    let cards: Vec<GameCard> = catalog
        .visible(filter)
        .map(|game| render_card(config, game, now))
        .collect();
    let minute = epoch_minute(now);
    debug!(
        epoch_minute = minute,
        cards = cards.len(),
        filter = filter.label(),
        "rendered board"
    );
    BoardSnapshot {
        rendered_at: now,
        epoch_minute: minute,
        refresh_in_ms: millis_until_next_minute(now),
        filter: filter.label().to_string(),
        cards,
    }
}
