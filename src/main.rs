//! Arena Sim - headless team deathmatch simulation
//!
//! This is the entry point for the simulation binary. It wires up:
//! - The arena task running the authoritative frame loop
//! - The auto-fire timer feeding the command channel
//! - A broadcast consumer that logs match events and the final summary
//!
//! Rendering, HUD and input-device wiring are external collaborators:
//! they attach through the same `ArenaHandle` used here.

use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_sim::config::Config;
use arena_sim::game::arena::spawn_auto_fire;
use arena_sim::game::events::SimMsg;
use arena_sim::game::{Arena, ArenaCommand};
use arena_sim::util::geom::Extent;
use arena_sim::util::time::Timer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting arena simulation");
    let uptime = Timer::new();

    let bounds = Extent::new(config.arena_width, config.arena_height);
    let seed = rand::random::<u64>();
    let (arena, handle) = Arena::new(bounds, seed);

    let mut messages = handle.messages.subscribe();
    let auto_fire = spawn_auto_fire(handle.commands.clone(), handle.input.clone());
    let arena_task = tokio::spawn(arena.run());

    loop {
        tokio::select! {
            msg = messages.recv() => match msg {
                Ok(SimMsg::MatchEnd { winner, summary }) => {
                    info!(
                        winner = winner.label(),
                        player_kills = summary.player_kills,
                        team_kills = summary.team_kills,
                        team_score = summary.team_score,
                        enemy_score = summary.enemy_score,
                        accuracy_pct = summary.accuracy_pct,
                        duration_secs = summary.duration_secs,
                        "Match complete"
                    );
                    break;
                }
                // Per-frame snapshots are consumed by a renderer when one
                // is attached; the headless binary only watches for the end
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(lagged = n, "Event consumer lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = shutdown_signal() => {
                info!("Shutdown requested, stopping arena");
                let _ = handle.commands.send(ArenaCommand::Stop).await;
                break;
            }
        }
    }

    auto_fire.abort();
    arena_task.await?;

    info!(uptime_ms = uptime.elapsed_ms(), "Shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
