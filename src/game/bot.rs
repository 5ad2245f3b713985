//! Bot decision pass: target acquisition, steering, fire control.
//!
//! Runs once per bot per frame against a roster view collected at the top
//! of the frame. All timers are wall-clock gated; there are no explicit
//! state-machine enter/exit hooks — a bot is "targeting" exactly when its
//! resolved target is inside engagement range, and patrolling otherwise.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::util::geom::{bearing, distance, Extent};

use super::combatant::{Combatant, CombatantView, Controller};
use super::effects::EffectSink;
use super::projectile::Projectile;
use super::tuning::{
    BOT_ACCURACY, BOT_ACCURACY_JITTER, BOT_ADVANCE_FACTOR, BOT_ADVANCE_STRAFE_RAD,
    BOT_AIM_ERROR_RAD, BOT_CLOSE_IN_RANGE, BOT_DODGE_CHANCE, BOT_DODGE_COOLDOWN_MS,
    BOT_ENGAGE_RANGE, BOT_FIRE_INTERVAL_MS, BOT_REACTION_MS, BOT_RETREAT_FACTOR,
    BOT_RETREAT_RANGE, BOT_RETREAT_STRAFE_RAD, BOT_SPEED, BOT_STRAFE_SPEED, BOT_WAYPOINT_MS,
};
use super::FrameCtx;

/// AI state carried by a bot between frames
#[derive(Debug, Clone)]
pub struct BotBrain {
    /// Current target by stable id; resolved against the roster each frame
    pub target: Option<Uuid>,
    pub last_scan: u64,
    /// Patrol destination
    pub waypoint: (f32, f32),
    pub last_waypoint: u64,
    /// Lateral direction while engaged, +1 or -1
    pub strafe_dir: f32,
    pub last_dodge: u64,
    /// Per-instance hit probability, also scales the aim error
    pub accuracy: f32,
}

impl BotBrain {
    pub fn new(bounds: Extent, rng: &mut ChaCha8Rng) -> Self {
        Self {
            target: None,
            last_scan: 0,
            waypoint: bounds.random_point(rng),
            last_waypoint: 0,
            strafe_dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            last_dodge: 0,
            accuracy: BOT_ACCURACY + (rng.gen::<f32>() - 0.5) * BOT_ACCURACY_JITTER,
        }
    }
}

/// Nearest opposing combatant within engagement range; strict less-than,
/// so ties go to scan order (the roster lists the player first)
fn acquire_target(me: &CombatantView, roster: &[CombatantView]) -> Option<Uuid> {
    let mut best = None;
    let mut best_dist = f32::INFINITY;

    for other in roster {
        if other.id == me.id || !me.team.opposes(other.team) {
            continue;
        }
        let dist = distance(me.x, me.y, other.x, other.y);
        if dist < best_dist && dist < BOT_ENGAGE_RANGE {
            best_dist = dist;
            best = Some(other.id);
        }
    }
    best
}

struct Decision {
    face: f32,
    dx: f32,
    dy: f32,
    fire: bool,
}

/// One frame of AI control for a single bot
pub fn drive_bot(
    bot: &mut Combatant,
    ctx: &FrameCtx,
    roster: &[CombatantView],
    rng: &mut ChaCha8Rng,
    projectiles: &mut Vec<Projectile>,
    effects: &mut dyn EffectSink,
) {
    let now = ctx.now;
    let me = bot.view();

    let decision = {
        let Controller::Bot(brain) = &mut bot.controller else {
            return;
        };

        if now.saturating_sub(brain.last_scan) > BOT_REACTION_MS {
            brain.target = acquire_target(&me, roster);
            brain.last_scan = now;
        }

        if now.saturating_sub(brain.last_waypoint) > BOT_WAYPOINT_MS {
            brain.waypoint = ctx.bounds.random_point(rng);
            brain.last_waypoint = now;
        }

        let target = brain
            .target
            .and_then(|id| roster.iter().find(|v| v.id == id).copied());

        match target {
            Some(t) if distance(me.x, me.y, t.x, t.y) < BOT_ENGAGE_RANGE => {
                let dist = distance(me.x, me.y, t.x, t.y);
                let aim = bearing(me.x, me.y, t.x, t.y);
                let aim_error =
                    (1.0 - brain.accuracy) * (rng.gen::<f32>() - 0.5) * BOT_AIM_ERROR_RAD;

                let (dx, dy) = if dist > BOT_CLOSE_IN_RANGE {
                    // Close the gap, drifting sideways while advancing
                    let heading = aim + brain.strafe_dir * BOT_ADVANCE_STRAFE_RAD;
                    (
                        heading.cos() * BOT_SPEED * BOT_ADVANCE_FACTOR,
                        heading.sin() * BOT_SPEED * BOT_ADVANCE_FACTOR,
                    )
                } else if dist < BOT_RETREAT_RANGE {
                    // Too close, back away
                    let heading = aim
                        + std::f32::consts::PI
                        + brain.strafe_dir * BOT_RETREAT_STRAFE_RAD;
                    (
                        heading.cos() * BOT_SPEED * BOT_RETREAT_FACTOR,
                        heading.sin() * BOT_SPEED * BOT_RETREAT_FACTOR,
                    )
                } else {
                    // Hold the range band, strafe perpendicular to the target
                    let heading = aim + std::f32::consts::FRAC_PI_2 * brain.strafe_dir;
                    (
                        heading.cos() * BOT_STRAFE_SPEED,
                        heading.sin() * BOT_STRAFE_SPEED,
                    )
                };

                if rng.gen::<f32>() < BOT_DODGE_CHANCE
                    && now.saturating_sub(brain.last_dodge) > BOT_DODGE_COOLDOWN_MS
                {
                    brain.strafe_dir = -brain.strafe_dir;
                    brain.last_dodge = now;
                }

                let gates_open = now.saturating_sub(bot.last_shot) > BOT_FIRE_INTERVAL_MS
                    && bot.reload.is_none()
                    && bot.ammo > 0;
                let fire = gates_open && rng.gen::<f32>() < brain.accuracy;

                Decision {
                    face: aim + aim_error,
                    dx,
                    dy,
                    fire,
                }
            }
            _ => {
                // Patrol straight toward the waypoint; facing is left alone
                let heading = bearing(me.x, me.y, brain.waypoint.0, brain.waypoint.1);
                Decision {
                    face: bot.angle,
                    dx: heading.cos() * BOT_SPEED,
                    dy: heading.sin() * BOT_SPEED,
                    fire: false,
                }
            }
        }
    };

    bot.x += decision.dx;
    bot.y += decision.dy;
    let (x, y) = ctx.bounds.clamp_circle(bot.x, bot.y, bot.radius);
    bot.x = x;
    bot.y = y;
    bot.angle = decision.face;

    bot.finish_reload(now);
    if bot.ammo == 0 && bot.reload.is_none() {
        bot.start_reload(now);
    }

    if decision.fire {
        bot.shoot(now, BOT_FIRE_INTERVAL_MS, projectiles, rng, effects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combatant::Team;
    use crate::game::InputState;
    use crate::util::geom::{Extent, Rect};
    use rand::SeedableRng;

    const BOUNDS: Extent = Extent {
        width: 1920.0,
        height: 1080.0,
    };

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    fn ctx(now: u64) -> FrameCtx {
        FrameCtx {
            now,
            bounds: BOUNDS,
            input: InputState::default(),
        }
    }

    fn bot_at(team: Team, x: f32, y: f32, rng: &mut ChaCha8Rng) -> Combatant {
        let zone = Rect::from_center(960.0, 540.0, 300.0, 400.0);
        let brain = BotBrain::new(BOUNDS, rng);
        let mut bot = Combatant::new_bot(team, 0, zone, brain, rng);
        bot.x = x;
        bot.y = y;
        bot
    }

    fn enemy_view(x: f32, y: f32) -> CombatantView {
        CombatantView {
            id: Uuid::new_v4(),
            team: Team::Blue,
            x,
            y,
            radius: 25.0,
        }
    }

    fn brain(bot: &Combatant) -> &BotBrain {
        match &bot.controller {
            Controller::Bot(b) => b,
            Controller::Human => panic!("not a bot"),
        }
    }

    #[test]
    fn test_acquires_nearest_opponent() {
        let mut rng = rng();
        let me = bot_at(Team::Red, 500.0, 500.0, &mut rng).view();
        let near = enemy_view(550.0, 500.0); // 50 away
        let far = enemy_view(620.0, 500.0); // 120 away

        let picked = acquire_target(&me, &[far, near]);
        assert_eq!(picked, Some(near.id));
    }

    #[test]
    fn test_ignores_targets_beyond_engagement_range() {
        let mut rng = rng();
        let me = bot_at(Team::Red, 500.0, 500.0, &mut rng).view();
        let out_of_range = enemy_view(900.0, 500.0);

        assert_eq!(acquire_target(&me, &[out_of_range]), None);
    }

    #[test]
    fn test_ignores_teammates_and_self() {
        let mut rng = rng();
        let me = bot_at(Team::Red, 500.0, 500.0, &mut rng).view();
        let teammate = CombatantView {
            team: Team::Red,
            ..enemy_view(520.0, 500.0)
        };

        assert_eq!(acquire_target(&me, &[me, teammate]), None);
    }

    #[test]
    fn test_patrol_moves_toward_waypoint_without_turning() {
        let mut rng = rng();
        let mut bot = bot_at(Team::Red, 500.0, 500.0, &mut rng);
        if let Controller::Bot(b) = &mut bot.controller {
            b.waypoint = (800.0, 500.0);
            b.last_waypoint = 10_000;
            b.last_scan = 10_000;
        }
        bot.angle = 1.5;
        let mut projectiles = Vec::new();

        drive_bot(&mut bot, &ctx(10_050), &[], &mut rng, &mut projectiles, &mut ());

        assert_eq!(bot.x, 500.0 + BOT_SPEED);
        assert_eq!(bot.y, 500.0);
        assert_eq!(bot.angle, 1.5, "patrol leaves the facing alone");
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_waypoint_rerolls_after_interval() {
        let mut rng = rng();
        let mut bot = bot_at(Team::Red, 500.0, 500.0, &mut rng);
        if let Controller::Bot(b) = &mut bot.controller {
            b.waypoint = (800.0, 500.0);
            b.last_waypoint = 10_000;
        }
        let mut projectiles = Vec::new();

        drive_bot(&mut bot, &ctx(11_000), &[], &mut rng, &mut projectiles, &mut ());
        assert_eq!(brain(&bot).waypoint, (800.0, 500.0));
        assert_eq!(brain(&bot).last_waypoint, 10_000);

        drive_bot(
            &mut bot,
            &ctx(10_000 + BOT_WAYPOINT_MS + 1),
            &[],
            &mut rng,
            &mut projectiles,
            &mut (),
        );
        assert_ne!(brain(&bot).waypoint, (800.0, 500.0));
        assert_eq!(brain(&bot).last_waypoint, 10_000 + BOT_WAYPOINT_MS + 1);
    }

    #[test]
    fn test_target_scan_is_rate_limited() {
        let mut rng = rng();
        let mut bot = bot_at(Team::Red, 500.0, 500.0, &mut rng);
        let first = enemy_view(550.0, 500.0);
        let closer = enemy_view(510.0, 500.0);
        let mut projectiles = Vec::new();

        drive_bot(
            &mut bot,
            &ctx(10_000),
            &[first],
            &mut rng,
            &mut projectiles,
            &mut (),
        );
        assert_eq!(brain(&bot).target, Some(first.id));

        // A closer opponent appears, but the reaction window has not elapsed
        drive_bot(
            &mut bot,
            &ctx(10_050),
            &[first, closer],
            &mut rng,
            &mut projectiles,
            &mut (),
        );
        assert_eq!(brain(&bot).target, Some(first.id));

        drive_bot(
            &mut bot,
            &ctx(10_000 + BOT_REACTION_MS + 1),
            &[first, closer],
            &mut rng,
            &mut projectiles,
            &mut (),
        );
        assert_eq!(brain(&bot).target, Some(closer.id));
    }

    #[test]
    fn test_advances_when_far_retreats_when_close() {
        let mut rng = rng();
        let enemy = enemy_view(700.0, 500.0);
        let mut projectiles = Vec::new();

        // 200 away: outside the close-in band, closes the gap
        let mut far_bot = bot_at(Team::Red, 500.0, 500.0, &mut rng);
        drive_bot(
            &mut far_bot,
            &ctx(10_000),
            &[enemy],
            &mut rng,
            &mut projectiles,
            &mut (),
        );
        assert!(distance(far_bot.x, far_bot.y, enemy.x, enemy.y) < 200.0);

        // 20 away: inside the retreat band, opens the gap
        let mut close_bot = bot_at(Team::Red, 680.0, 500.0, &mut rng);
        drive_bot(
            &mut close_bot,
            &ctx(10_000),
            &[enemy],
            &mut rng,
            &mut projectiles,
            &mut (),
        );
        assert!(distance(close_bot.x, close_bot.y, enemy.x, enemy.y) > 20.0);
    }

    #[test]
    fn test_holds_range_by_strafing() {
        let mut rng = rng();
        let enemy = enemy_view(560.0, 500.0); // 60 away, inside the hold band
        let mut bot = bot_at(Team::Red, 500.0, 500.0, &mut rng);
        let mut projectiles = Vec::new();

        drive_bot(
            &mut bot,
            &ctx(10_000),
            &[enemy],
            &mut rng,
            &mut projectiles,
            &mut (),
        );

        let dist = distance(bot.x, bot.y, enemy.x, enemy.y);
        assert!(bot.y != 500.0, "perpendicular strafe moves off the axis");
        assert!((dist - 60.0).abs() < 1.0, "range stays roughly constant");
    }

    #[test]
    fn test_engaged_bot_eventually_fires_with_bounded_aim_error() {
        let mut rng = rng();
        let mut bot = bot_at(Team::Red, 500.0, 500.0, &mut rng);
        let enemy = enemy_view(560.0, 500.0);
        let mut projectiles = Vec::new();

        let mut now = 10_000;
        for _ in 0..20 {
            now += 250;
            drive_bot(
                &mut bot,
                &ctx(now),
                &[enemy],
                &mut rng,
                &mut projectiles,
                &mut (),
            );
        }

        assert!(!projectiles.is_empty(), "an engaged bot fires within 5s");
        // Accuracy is at least 0.75, so the angular error stays under
        // 0.25 * 0.5 * 0.5 rad even before strafing shifts the bearing
        let aim = bearing(bot.x, bot.y, enemy.x, enemy.y);
        assert!((bot.angle - aim).abs() < 0.2);
    }

    #[test]
    fn test_empty_clip_triggers_auto_reload() {
        let mut rng = rng();
        let mut bot = bot_at(Team::Red, 500.0, 500.0, &mut rng);
        bot.ammo = 0;
        let mut projectiles = Vec::new();

        drive_bot(&mut bot, &ctx(10_000), &[], &mut rng, &mut projectiles, &mut ());
        assert_eq!(bot.reload, Some(10_000));

        // Reload completes through the same per-frame path as the player
        drive_bot(
            &mut bot,
            &ctx(10_000 + 2001),
            &[],
            &mut rng,
            &mut projectiles,
            &mut (),
        );
        assert!(!bot.reloading());
        assert_eq!(bot.ammo, 30);
    }
}
