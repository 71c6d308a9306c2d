use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use tracing::info;

use rtpwall_core::{
    compute_display, epoch_minute, millis_until_next_minute, same_window, verify_display,
    BoardState, Catalog, DisplayValue, GalleryConfig, ProviderFilter, Tier,
};
use rtpwall_shared::{BoardSnapshot, CatalogManifest};

#[derive(Parser)]
#[command(name = "rtpwall", about = "Inspect and export gallery RTP badges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// JSON display config; built-in defaults when absent
    #[arg(long, value_parser, env = "RTPWALL_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the display value of one game
    Show {
        game_id: String,
        /// Local time, YYYY-MM-DDTHH:MM:SS (default: now)
        #[arg(long, value_parser = parse_local)]
        at: Option<NaiveDateTime>,
    },
    /// Render every visible game in a manifest
    Board {
        manifest: PathBuf,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long, value_parser = parse_local)]
        at: Option<NaiveDateTime>,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a rendered board to CSV path
    ExportCsv {
        manifest: PathBuf,
        path: PathBuf,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long, value_parser = parse_local)]
        at: Option<NaiveDateTime>,
    },
    /// Check a badge seen on another client against a local recomputation
    Verify {
        game_id: String,
        #[arg(long)]
        rtp: u32,
        #[arg(long)]
        multiplier: String,
        #[arg(long)]
        mode: String,
        #[arg(long, value_parser = parse_local)]
        at: Option<NaiveDateTime>,
    },
    /// Print the config fingerprint
    Fingerprint,
    /// Re-render at every minute boundary
    Watch {
        manifest: PathBuf,
        #[arg(long)]
        provider: Option<String>,
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
}

fn parse_local(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map_err(|e| e.to_string())
}

/// Rebuild the value a client displayed; the multiplier tier comes from the
/// config table, so an unknown label yields `None`.
fn shown_value(
    config: &GalleryConfig,
    rtp: u32,
    multiplier: &str,
    mode: &str,
) -> Option<DisplayValue> {
    let entry = config.multipliers().iter().find(|e| e.label == multiplier)?;
    Some(DisplayValue {
        rtp,
        rtp_tier: Tier::from_rtp(rtp),
        multiplier: entry.clone(),
        mode: mode.to_string(),
    })
}

/// A tick renders only once the minute has moved on since the last render.
fn due_for_refresh(last: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    last.map_or(true, |prev| !same_window(prev, now))
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GalleryConfig> {
    match path {
        Some(p) => GalleryConfig::from_path(p)
            .with_context(|| format!("loading config {}", p.display())),
        None => Ok(GalleryConfig::default()),
    }
}

fn load_board(path: &Path, provider: Option<String>) -> anyhow::Result<BoardState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let manifest = CatalogManifest::from_json_str(&raw)?;
    let mut state = BoardState::new(Catalog::from_manifest(&manifest)?);
    state.select(ProviderFilter::from(provider));
    Ok(state)
}

fn print_board(snapshot: &BoardSnapshot) {
    println!(
        "{} minute={} filter={} cards={}",
        snapshot.rendered_at,
        snapshot.epoch_minute,
        snapshot.filter,
        snapshot.cards.len()
    );
    for card in &snapshot.cards {
        println!(
            "{:<40} rtp={:>2}% {:<6} {:>4} {:<6} {}",
            card.game_id, card.rtp, card.rtp_tier, card.multiplier, card.multiplier_tier, card.mode
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Show { game_id, at } => {
            let now = at.unwrap_or_else(now_local);
            let value = compute_display(&config, &game_id, now);
            println!(
                "{} minute={} rtp={}% ({}) multiplier={} ({}) mode={}",
                game_id,
                epoch_minute(now),
                value.rtp,
                value.rtp_tier,
                value.multiplier.label,
                value.multiplier.tier,
                value.mode
            );
        }
        Commands::Board {
            manifest,
            provider,
            at,
            json,
        } => {
            let state = load_board(&manifest, provider)?;
            let snapshot = state.render(&config, at.unwrap_or_else(now_local));
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_board(&snapshot);
            }
        }
        Commands::ExportCsv {
            manifest,
            path,
            provider,
            at,
        } => {
            let state = load_board(&manifest, provider)?;
            let snapshot = state.render(&config, at.unwrap_or_else(now_local));
            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record([
                "epoch_minute",
                "game_id",
                "provider",
                "image",
                "rtp",
                "rtp_tier",
                "multiplier",
                "multiplier_tier",
                "mode",
            ])?;
            for card in &snapshot.cards {
                wtr.write_record(&[
                    snapshot.epoch_minute.to_string(),
                    card.game_id.clone(),
                    card.provider.clone(),
                    card.image.clone(),
                    card.rtp.to_string(),
                    card.rtp_tier.clone(),
                    card.multiplier.clone(),
                    card.multiplier_tier.clone(),
                    card.mode.clone(),
                ])?;
            }
            wtr.flush()?;
            println!("Exported {} rows to {}", snapshot.cards.len(), path.display());
        }
        Commands::Verify {
            game_id,
            rtp,
            multiplier,
            mode,
            at,
        } => {
            let now = at.unwrap_or_else(now_local);
            let matches = shown_value(&config, rtp, &multiplier, &mode)
                .is_some_and(|shown| verify_display(&config, &game_id, now, &shown));
            if !matches {
                let expected = compute_display(&config, &game_id, now);
                anyhow::bail!(
                    "{} at minute {}: expected rtp={}% multiplier={} mode={}",
                    game_id,
                    epoch_minute(now),
                    expected.rtp,
                    expected.multiplier.label,
                    expected.mode
                );
            }
            println!("{} ok at minute {}", game_id, epoch_minute(now));
        }
        Commands::Fingerprint => {
            println!("{}", config.fingerprint());
        }
        Commands::Watch {
            manifest,
            provider,
            ticks,
        } => {
            let state = load_board(&manifest, provider)?;
            let mut rendered = 0u64;
            let mut last = None;
            loop {
                let now = now_local();
                if !due_for_refresh(last, now) {
                    // timer fired before the boundary
                    let wait = millis_until_next_minute(now) as u64;
                    tokio::time::sleep(Duration::from_millis(wait)).await;
                    continue;
                }
                let snapshot = state.render(&config, now);
                print_board(&snapshot);
                last = Some(now);
                rendered += 1;
                if ticks.is_some_and(|max| rendered >= max) {
                    break;
                }
                info!(
                    minute = snapshot.epoch_minute,
                    sleep_ms = snapshot.refresh_in_ms,
                    "waiting for next minute"
                );
                tokio::time::sleep(Duration::from_millis(snapshot.refresh_in_ms as u64)).await;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_timestamp() {
        let t = parse_local("2024-01-15T10:30:45").unwrap();
        assert_eq!(t.to_string(), "2024-01-15 10:30:45");
        assert!(parse_local("15/01/2024").is_err());
    }

    #[test]
    fn shown_value_checks_against_recomputation() {
        let config = GalleryConfig::default();
        let now = parse_local("2024-01-15T10:30:12").unwrap();
        let id = "pragmatic/gates-of-olympus";

        let shown = shown_value(&config, 35, "7X", "Manual").unwrap();
        assert!(verify_display(&config, id, now, &shown));

        let wrong_mode = shown_value(&config, 35, "7X", "Auto").unwrap();
        assert!(!verify_display(&config, id, now, &wrong_mode));
        assert!(shown_value(&config, 35, "8X", "Manual").is_none());
    }

    #[test]
    fn refresh_waits_for_minute_boundary() {
        let rendered = parse_local("2024-01-15T10:30:00").unwrap();
        let early = parse_local("2024-01-15T10:30:59").unwrap();
        let next = parse_local("2024-01-15T10:31:00").unwrap();
        assert!(due_for_refresh(None, early));
        assert!(!due_for_refresh(Some(rendered), early));
        assert!(due_for_refresh(Some(rendered), next));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
