use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    clock::epoch_minute,
    config::{GalleryConfig, ModePolicy},
    multipliers::{MultiplierEntry, Tier},
    rng::{hash_id, seeded_int},
};

const TIME_WEIGHT: i64 = 1_000;
const MULTIPLIER_SALT: i64 = 7;
const MODE_SALT: i64 = 11;

/// Everything a game card shows for one (game, minute) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayValue {
    pub rtp: u32,
    pub rtp_tier: Tier,
    pub multiplier: MultiplierEntry,
    pub mode: String,
}

/// Base seed for a game in the minute containing `now`.
pub fn compose_seed(game_id: &str, now: NaiveDateTime) -> i64 {
    epoch_minute(now) * TIME_WEIGHT + hash_id(game_id) as i64
}

pub fn compute_rtp(config: &GalleryConfig, game_id: &str, now: NaiveDateTime) -> u32 {
    let range = config.rtp();
    seeded_int(compose_seed(game_id, now), range.min as i64, range.max as i64) as u32
}

pub fn compute_multiplier<'a>(
    config: &'a GalleryConfig,
    game_id: &str,
    now: NaiveDateTime,
) -> &'a MultiplierEntry {
    let table = config.multipliers();
    let seed = compose_seed(game_id, now) * MULTIPLIER_SALT;
    let index = seeded_int(seed, 0, table.len() as i64 - 1) as usize;
    // config construction rejects empty tables
    &table.0[index]
}

pub fn compute_mode<'a>(
    config: &'a GalleryConfig,
    game_id: &str,
    now: NaiveDateTime,
) -> &'a str {
    match config.mode() {
        ModePolicy::Fixed(label) => label.as_str(),
        ModePolicy::Seeded {
            when_zero,
            when_one,
        } => {
            let seed = compose_seed(game_id, now) * MODE_SALT;
            if seeded_int(seed, 0, 1) == 0 {
                when_zero.as_str()
            } else {
                when_one.as_str()
            }
        }
    }
}

pub fn compute_display(config: &GalleryConfig, game_id: &str, now: NaiveDateTime) -> DisplayValue {
    let rtp = compute_rtp(config, game_id, now);
    DisplayValue {
        rtp,
        rtp_tier: Tier::from_rtp(rtp),
        multiplier: compute_multiplier(config, game_id, now).clone(),
        mode: compute_mode(config, game_id, now).to_string(),
    }
}

/// Check a value shown by another client against a local recomputation.
pub fn verify_display(
    config: &GalleryConfig,
    game_id: &str,
    now: NaiveDateTime,
    shown: &DisplayValue,
) -> bool {
    compute_display(config, game_id, now) == *shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_compose_seed() {
        let seed = compose_seed("pragmatic/gates-of-olympus", at(10, 30, 0));
        assert_eq!(seed, 1_063_836_630 * 1_000 + 158_173_359);
    }

    #[test]
    fn test_display_deterministic() {
        let config = GalleryConfig::default();
        let a = compute_display(&config, "pgsoft/fortune-tiger.webp", at(9, 5, 1));
        let b = compute_display(&config, "pgsoft/fortune-tiger.webp", at(9, 5, 58));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_mode_ignores_seed() {
        let config = GalleryConfig::new(
            config_rtp(),
            crate::multipliers::MultiplierTable::standard(),
            ModePolicy::Fixed("Auto".into()),
        )
        .unwrap();
        for minute in 0..60 {
            let mode = compute_mode(&config, "habanero/koi-gate", at(12, minute, 0));
            assert_eq!(mode, "Auto");
        }
    }

    #[test]
    fn test_single_entry_table() {
        let table =
            crate::multipliers::MultiplierTable(vec![MultiplierEntry::new("100X", Tier::High)]);
        let config = GalleryConfig::new(config_rtp(), table, ModePolicy::default()).unwrap();
        let entry = compute_multiplier(&config, "any/game", at(0, 0, 0));
        assert_eq!(entry.label, "100X");
    }

    #[test]
    fn test_verify_rejects_tampered_rtp() {
        let config = GalleryConfig::default();
        let now = at(18, 44, 10);
        let mut shown = compute_display(&config, "spribe/aviator", now);
        assert!(verify_display(&config, "spribe/aviator", now, &shown));
        shown.rtp = if shown.rtp == 99 { 30 } else { shown.rtp + 1 };
        assert!(!verify_display(&config, "spribe/aviator", now, &shown));
    }

    fn config_rtp() -> crate::config::RtpRange {
        crate::config::RtpRange { min: 30, max: 99 }
    }
}
