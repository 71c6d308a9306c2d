use chrono::Local;
use rtpwall_core::{BoardState, Catalog, GalleryConfig, Game};

fn main() {
    // Example render pass for a tiny gallery
    let config = GalleryConfig::default();
    let state = BoardState::new(Catalog::new(vec![
        Game::new("pragmatic", "gates-of-olympus.webp", 0),
        Game::new("pgsoft", "fortune-tiger.webp", 1),
    ]));
    let snapshot = state.render(&config, Local::now().naive_local());
    for card in &snapshot.cards {
        println!(
            "{:<36} rtp={}% ({}) {} {}",
            card.game_id, card.rtp, card.rtp_tier, card.multiplier, card.mode
        );
    }
    println!(
        "config={} next refresh in {}ms",
        config.fingerprint(),
        snapshot.refresh_in_ms
    );
}
