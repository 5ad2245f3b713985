//! Projectile motion and hit detection

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::geom::{distance_sq, Extent};

use super::combatant::{CombatantView, Team};
use super::tuning::{BULLET_LIFETIME_TICKS, BULLET_SPEED};

/// An in-flight bullet, stamped with its shooter's id at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: Uuid,
    pub shooter: Uuid,
    pub team: Team,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    /// Remaining lifetime in ticks
    pub life: u32,
}

impl Projectile {
    pub fn spawn(shooter: Uuid, team: Team, x: f32, y: f32, angle: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            shooter,
            team,
            x,
            y,
            angle,
            life: BULLET_LIFETIME_TICKS,
        }
    }

    /// Advance one tick along the fixed angle
    pub fn advance(&mut self) {
        self.x += self.angle.cos() * BULLET_SPEED;
        self.y += self.angle.sin() * BULLET_SPEED;
        self.life = self.life.saturating_sub(1);
    }

    /// Circle containment against a combatant (strictly inside the radius)
    pub fn check_hit(&self, target: &CombatantView) -> bool {
        distance_sq(self.x, self.y, target.x, target.y) < target.radius * target.radius
    }

    /// Expired through lifetime or by leaving the arena
    pub fn expired(&self, bounds: Extent) -> bool {
        self.life == 0 || !bounds.contains(self.x, self.y)
    }
}

/// A resolved collision, applied by the frame loop after the sweep
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub shooter: Uuid,
    pub team: Team,
    pub target: Uuid,
    pub x: f32,
    pub y: f32,
}

/// Advance every projectile and resolve first hits against the roster.
///
/// The roster is scanned in order (player first, then bots), only against
/// opposing teams. A projectile is removed on its first hit, when it
/// leaves the bounds, or when its lifetime runs out.
pub fn sweep(
    projectiles: &mut Vec<Projectile>,
    roster: &[CombatantView],
    bounds: Extent,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    projectiles.retain_mut(|p| {
        p.advance();

        for target in roster {
            if p.team.opposes(target.team) && p.check_hit(target) {
                hits.push(Hit {
                    shooter: p.shooter,
                    team: p.team,
                    target: target.id,
                    x: p.x,
                    y: p.y,
                });
                return false;
            }
        }

        !p.expired(bounds)
    });

    hits
}
