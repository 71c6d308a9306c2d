pub mod board;
pub mod clock;
pub mod config;
pub mod engine;
pub mod games;
pub mod multipliers;
pub mod rng;

pub use crate::board::{render_board, render_card, BoardState};
pub use crate::clock::{epoch_minute, millis_until_next_minute, same_window};
pub use crate::config::{ConfigError, GalleryConfig, ModePolicy, RtpRange};
pub use crate::engine::{
    compose_seed, compute_display, compute_mode, compute_multiplier, compute_rtp, verify_display,
    DisplayValue,
};
pub use crate::games::{Catalog, Game, ProviderFilter};
pub use crate::multipliers::{MultiplierEntry, MultiplierTable, Tier};
pub use crate::rng::{hash_id, lcg_scramble, mulberry32, rng_value, seeded_int};
