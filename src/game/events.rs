//! Wire types exposed to the rendering/UI collaborator.
//!
//! Everything here is serde-serializable so a presentation layer can
//! consume frames as JSON without touching simulation internals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::geom::{Extent, Rect};

use super::combatant::Team;
use super::scoreboard::Scoreboard;
use super::tuning::Color;

/// Discrete events raised during a frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Damage registered on a combatant
    Hit {
        /// Unresolved when the stamped shooter no longer exists
        shooter_id: Option<Uuid>,
        target_id: Uuid,
        damage: i32,
        x: f32,
        y: f32,
    },

    /// A combatant dropped to zero health (and respawned)
    Kill { killer: String, victim: String },
}

/// Combatant state as seen by the HUD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub id: Uuid,
    pub name: String,
    pub team: Team,
    pub x: f32,
    pub y: f32,
    /// Facing in radians
    pub angle: f32,
    pub health: i32,
    pub ammo: u32,
    pub reloading: bool,
    pub kills: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub team: Team,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub x: f32,
    pub y: f32,
    pub color: Color,
    /// Fade factor, 1.0 fresh to 0.0 expired
    pub alpha: f32,
    pub size: f32,
}

/// Kill-feed entry with its display age
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    pub killer: String,
    pub victim: String,
    pub age_ms: u64,
}

/// End-of-match statistics for the game-over screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchSummary {
    pub duration_secs: u32,
    pub player_kills: u32,
    pub team_kills: u32,
    pub team_score: u32,
    pub enemy_score: u32,
    /// Player hits over shots fired, rounded percent; 0 with no shots
    pub accuracy_pct: u32,
}

/// Messages published on the arena's broadcast channel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimMsg {
    /// Sent once when the loop starts, carries session-fixed geometry
    MatchStarted {
        seed: u64,
        bounds: Extent,
        blue_zone: Rect,
        red_zone: Rect,
    },

    /// Per-frame read-only state snapshot
    Snapshot {
        tick: u64,
        player: CombatantSnapshot,
        bots: Vec<CombatantSnapshot>,
        projectiles: Vec<ProjectileSnapshot>,
        particles: Vec<ParticleSnapshot>,
        feed: Vec<NotificationSnapshot>,
        score: Scoreboard,
        /// Events raised during this frame
        events: Vec<GameEvent>,
    },

    /// Terminal message, sent exactly once
    MatchEnd { winner: Team, summary: MatchSummary },
}
