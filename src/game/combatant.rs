//! Combatant state machine shared by the human avatar and the bots.
//!
//! One struct owns position, facing, health, ammo and the reload timer;
//! the control source is a discriminant: human movement comes from the
//! frame's input snapshot, bot movement from [`super::bot`]. Death never
//! destroys a combatant — it respawns in place inside its team zone.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::geom::{bearing, Rect};

use super::bot::BotBrain;
use super::effects::EffectSink;
use super::projectile::Projectile;
use super::tuning::{CLIP_SIZE, COMBATANT_RADIUS, MAX_HEALTH, PLAYER_SPEED, RELOAD_MS};
use super::FrameCtx;

/// Team assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub fn opposes(self, other: Team) -> bool {
        self != other
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }
}

/// Control source for a combatant
#[derive(Debug, Clone)]
pub enum Controller {
    /// Driven by the input snapshot
    Human,
    /// Driven by the per-frame AI decision pass
    Bot(BotBrain),
}

/// Read-only roster entry collected once per frame so AI and collision
/// passes can scan everyone while a single combatant is borrowed mutably
#[derive(Debug, Clone, Copy)]
pub struct CombatantView {
    pub id: Uuid,
    pub team: Team,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// A player or bot in the arena
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: Uuid,
    pub name: String,
    pub team: Team,
    pub x: f32,
    pub y: f32,
    /// Facing angle in radians
    pub angle: f32,
    pub health: i32,
    pub ammo: u32,
    pub radius: f32,
    /// Reload start time; `None` when not reloading
    pub reload: Option<u64>,
    pub last_shot: u64,
    pub spawn_zone: Rect,
    pub controller: Controller,

    // Per-match stats
    pub kills: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
}

impl Combatant {
    /// The human avatar, placed at a random point in the blue zone
    pub fn new_player(zone: Rect, rng: &mut ChaCha8Rng) -> Self {
        let (x, y) = zone.random_point(rng);
        Self {
            id: Uuid::new_v4(),
            name: "ADMIN".to_string(),
            team: Team::Blue,
            x,
            y,
            angle: 0.0,
            health: MAX_HEALTH,
            ammo: CLIP_SIZE,
            radius: COMBATANT_RADIUS,
            reload: None,
            last_shot: 0,
            spawn_zone: zone,
            controller: Controller::Human,
            kills: 0,
            shots_fired: 0,
            shots_hit: 0,
        }
    }

    /// An AI combatant; `index` keeps the display name stable across respawns
    pub fn new_bot(team: Team, index: usize, zone: Rect, brain: BotBrain, rng: &mut ChaCha8Rng) -> Self {
        let (x, y) = zone.random_point(rng);
        let name = match team {
            Team::Blue => format!("PLAYER-{}", index + 1),
            Team::Red => format!("ENEMY-{}", index + 1),
        };
        Self {
            id: Uuid::new_v4(),
            name,
            team,
            x,
            y,
            angle: 0.0,
            health: MAX_HEALTH,
            ammo: CLIP_SIZE,
            radius: COMBATANT_RADIUS,
            reload: None,
            last_shot: 0,
            spawn_zone: zone,
            controller: Controller::Bot(brain),
            kills: 0,
            shots_fired: 0,
            shots_hit: 0,
        }
    }

    pub fn view(&self) -> CombatantView {
        CombatantView {
            id: self.id,
            team: self.team,
            x: self.x,
            y: self.y,
            radius: self.radius,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }

    pub fn reloading(&self) -> bool {
        self.reload.is_some()
    }

    /// One frame of human control: WASD-style movement with normalized
    /// diagonals, bounds clamp, cursor aim, reload completion
    pub fn advance_human(&mut self, ctx: &FrameCtx) {
        let input = &ctx.input;
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.up {
            dy -= PLAYER_SPEED;
        }
        if input.down {
            dy += PLAYER_SPEED;
        }
        if input.left {
            dx -= PLAYER_SPEED;
        }
        if input.right {
            dx += PLAYER_SPEED;
        }

        // Diagonal speed must equal axis speed
        if dx != 0.0 && dy != 0.0 {
            dx *= std::f32::consts::FRAC_1_SQRT_2;
            dy *= std::f32::consts::FRAC_1_SQRT_2;
        }

        self.x += dx;
        self.y += dy;
        let (x, y) = ctx.bounds.clamp_circle(self.x, self.y, self.radius);
        self.x = x;
        self.y = y;

        self.angle = bearing(self.x, self.y, input.cursor_x, input.cursor_y);

        self.finish_reload(ctx.now);
    }

    /// Restore the clip once the reload duration has fully elapsed
    pub fn finish_reload(&mut self, now: u64) {
        if let Some(start) = self.reload {
            if now.saturating_sub(start) > RELOAD_MS {
                self.ammo = CLIP_SIZE;
                self.reload = None;
            }
        }
    }

    /// Begin a reload; no-op while reloading or with a full clip
    pub fn start_reload(&mut self, now: u64) {
        if self.reload.is_none() && self.ammo < CLIP_SIZE {
            self.reload = Some(now);
        }
    }

    /// Fire one projectile from the muzzle point.
    ///
    /// No-op while reloading, with an empty clip, or inside `cooldown_ms`
    /// of the previous shot (100ms for the player, 200ms for bots).
    /// Emptying the clip auto-starts a reload.
    pub fn shoot(
        &mut self,
        now: u64,
        cooldown_ms: u64,
        projectiles: &mut Vec<Projectile>,
        rng: &mut ChaCha8Rng,
        effects: &mut dyn EffectSink,
    ) -> bool {
        if self.reload.is_some()
            || self.ammo == 0
            || now.saturating_sub(self.last_shot) < cooldown_ms
        {
            return false;
        }

        let mx = self.x + self.angle.cos() * self.radius;
        let my = self.y + self.angle.sin() * self.radius;
        projectiles.push(Projectile::spawn(self.id, self.team, mx, my, self.angle));

        self.ammo -= 1;
        self.last_shot = now;
        self.shots_fired += 1;
        effects.muzzle_flash(rng, mx, my, self.angle, self.team);

        if self.ammo == 0 {
            self.start_reload(now);
        }
        true
    }

    /// Subtract damage, clamped at zero. Returns true when this killed.
    /// The caller handles scoring, notification and respawn.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        self.health == 0
    }

    /// The sole death pathway: reset in place inside the team zone
    pub fn respawn(&mut self, rng: &mut ChaCha8Rng) {
        let (x, y) = self.spawn_zone.random_point(rng);
        self.x = x;
        self.y = y;
        self.health = MAX_HEALTH;
        self.ammo = CLIP_SIZE;
        self.reload = None;
    }
}
