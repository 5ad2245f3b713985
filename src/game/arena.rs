//! Arena state and the authoritative frame loop.
//!
//! The loop is the single writer: commands are drained at the top of each
//! frame, every entity is advanced synchronously in a fixed order, and a
//! read-only snapshot is published at the end. The held-trigger auto-fire
//! timer runs on its own cadence and feeds the same command channel, so
//! repeat fire is not locked to the frame rate.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::util::geom::{Extent, Rect};
use crate::util::time::{unix_millis, TICK_DURATION_MICROS};

use super::bot::{drive_bot, BotBrain};
use super::combatant::{Combatant, CombatantView, Team};
use super::effects::{EffectSink, ParticleField};
use super::events::{GameEvent, SimMsg};
use super::projectile::{self, Hit, Projectile};
use super::scoreboard::{KillFeed, Scoreboard};
use super::snapshot::{build_snapshot, build_summary};
use super::tuning::{
    self, AUTO_FIRE_INTERVAL_MS, BLUE_BOT_COUNT, GAME_OVER_BURST_COUNT, PLAYER_FIRE_INTERVAL_MS,
    RED_BOT_COUNT, SPAWN_EDGE_OFFSET, SPAWN_HEIGHT, SPAWN_WIDTH, WEAPON_DAMAGE,
};
use super::{ArenaCommand, FrameCtx, InputHandle, InputState};

/// Find a combatant by id without borrowing the rest of the state
fn find_mut<'a>(
    player: &'a mut Combatant,
    bots: &'a mut [Combatant],
    id: Uuid,
) -> Option<&'a mut Combatant> {
    if player.id == id {
        return Some(player);
    }
    bots.iter_mut().find(|b| b.id == id)
}

fn find<'a>(player: &'a Combatant, bots: &'a [Combatant], id: Uuid) -> Option<&'a Combatant> {
    if player.id == id {
        return Some(player);
    }
    bots.iter().find(|b| b.id == id)
}

/// All mutable simulation state, owned by the arena task
pub struct ArenaState {
    pub bounds: Extent,
    pub seed: u64,
    pub blue_zone: Rect,
    pub red_zone: Rect,
    pub player: Combatant,
    pub bots: Vec<Combatant>,
    pub projectiles: Vec<Projectile>,
    pub particles: ParticleField,
    pub feed: KillFeed,
    pub score: Scoreboard,
    pub tick: u64,
    pub running: bool,
    pub start_time: u64,
    pub rng: ChaCha8Rng,
}

impl ArenaState {
    pub fn new(bounds: Extent, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let blue_zone = Rect::from_center(
            SPAWN_EDGE_OFFSET,
            bounds.height / 2.0,
            SPAWN_WIDTH,
            SPAWN_HEIGHT,
        );
        let red_zone = Rect::from_center(
            bounds.width - SPAWN_EDGE_OFFSET,
            bounds.height / 2.0,
            SPAWN_WIDTH,
            SPAWN_HEIGHT,
        );

        let player = Combatant::new_player(blue_zone, &mut rng);

        let mut bots = Vec::with_capacity(BLUE_BOT_COUNT + RED_BOT_COUNT);
        for i in 0..BLUE_BOT_COUNT {
            let brain = BotBrain::new(bounds, &mut rng);
            bots.push(Combatant::new_bot(Team::Blue, i, blue_zone, brain, &mut rng));
        }
        for i in 0..RED_BOT_COUNT {
            let brain = BotBrain::new(bounds, &mut rng);
            bots.push(Combatant::new_bot(Team::Red, i, red_zone, brain, &mut rng));
        }

        Self {
            bounds,
            seed,
            blue_zone,
            red_zone,
            player,
            bots,
            projectiles: Vec::new(),
            particles: ParticleField::new(),
            feed: KillFeed::new(),
            score: Scoreboard::default(),
            tick: 0,
            running: true,
            start_time: unix_millis(),
            rng,
        }
    }

    /// Roster view in scan order: player first, then bots in spawn order
    fn roster(&self) -> Vec<CombatantView> {
        let mut views = Vec::with_capacity(1 + self.bots.len());
        views.push(self.player.view());
        views.extend(self.bots.iter().map(Combatant::view));
        views
    }

    /// Advance one frame. Side-effect ordering within the frame is the
    /// iteration order below; there is no concurrency between entities.
    pub fn step(&mut self, now: u64, input: InputState) -> Vec<GameEvent> {
        let ctx = FrameCtx {
            now,
            bounds: self.bounds,
            input,
        };

        // Player: movement, aim, reload completion
        self.player.advance_human(&ctx);

        // Bots: each sees the roster as already moved this frame
        for i in 0..self.bots.len() {
            let roster = self.roster();
            drive_bot(
                &mut self.bots[i],
                &ctx,
                &roster,
                &mut self.rng,
                &mut self.projectiles,
                &mut self.particles,
            );
        }

        // Projectiles: motion, first-hit collision, pruning
        let roster = self.roster();
        let hits = projectile::sweep(&mut self.projectiles, &roster, self.bounds);

        let mut events = Vec::with_capacity(hits.len());
        for hit in hits {
            self.apply_hit(hit, now, &mut events);
        }

        // Cosmetics
        self.particles.update();
        self.feed.prune(now);

        self.tick += 1;

        // Win check runs after every other update this frame
        if self.running && self.score.winner().is_some() {
            self.running = false;
            self.spawn_celebration();
        }

        events
    }

    /// Resolve one projectile hit: damage, effects, attribution, scoring,
    /// notification and the in-place respawn
    fn apply_hit(&mut self, hit: Hit, now: u64, events: &mut Vec<GameEvent>) {
        let shooter = find(&self.player, &self.bots, hit.shooter)
            .map(|s| (s.name.clone(), s.team, s.is_player()));

        let (died, victim_name, victim_x, victim_y) = {
            let Some(target) = find_mut(&mut self.player, &mut self.bots, hit.target) else {
                return;
            };
            let died = target.apply_damage(WEAPON_DAMAGE);
            (died, target.name.clone(), target.x, target.y)
        };

        self.particles
            .blood_splatter(&mut self.rng, victim_x, victim_y, 1.0);

        if shooter.is_some() {
            if let Some(s) = find_mut(&mut self.player, &mut self.bots, hit.shooter) {
                s.shots_hit += 1;
                if died {
                    s.kills += 1;
                }
            }
        }

        events.push(GameEvent::Hit {
            shooter_id: shooter.as_ref().map(|_| hit.shooter),
            target_id: hit.target,
            damage: WEAPON_DAMAGE,
            x: hit.x,
            y: hit.y,
        });
        debug!(victim = %victim_name, damage = WEAPON_DAMAGE, "Hit registered");

        if died {
            // Attribution is best-effort: an unresolved shooter still
            // killed, but credits no one
            let killer_name = shooter
                .as_ref()
                .map(|(name, _, _)| name.clone())
                .unwrap_or_else(|| "UNKNOWN".to_string());

            self.feed.push(killer_name.clone(), victim_name.clone(), now);
            if let Some((_, team, is_player)) = shooter {
                self.score.record_kill(team, is_player);
            }

            info!(killer = %killer_name, victim = %victim_name, "Kill");
            events.push(GameEvent::Kill {
                killer: killer_name,
                victim: victim_name,
            });

            if let Some(target) = find_mut(&mut self.player, &mut self.bots, hit.target) {
                target.respawn(&mut self.rng);
            }
        }
    }

    /// One-shot celebration burst around the arena center on match end
    fn spawn_celebration(&mut self) {
        let cx = self.bounds.width / 2.0;
        let cy = self.bounds.height / 2.0;
        for _ in 0..GAME_OVER_BURST_COUNT {
            let x = cx + self.rng.gen_range(-100.0..100.0);
            let y = cy + self.rng.gen_range(-100.0..100.0);
            let color = if self.rng.gen_bool(0.5) {
                tuning::EXPLOSION_ORANGE
            } else {
                tuning::EXPLOSION_YELLOW
            };
            self.particles.burst(&mut self.rng, x, y, color, 1, 300, 800);
        }
    }
}

/// Handle held by the outside world: command sender, message broadcast,
/// shared input state
#[derive(Clone)]
pub struct ArenaHandle {
    pub commands: mpsc::Sender<ArenaCommand>,
    pub messages: broadcast::Sender<SimMsg>,
    pub input: InputHandle,
}

/// The simulation task
pub struct Arena {
    state: ArenaState,
    commands: mpsc::Receiver<ArenaCommand>,
    input: InputHandle,
    msg_tx: broadcast::Sender<SimMsg>,
}

impl Arena {
    pub fn new(bounds: Extent, seed: u64) -> (Self, ArenaHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(256);
        let (msg_tx, _) = broadcast::channel(64);
        let input = InputHandle::new();

        let handle = ArenaHandle {
            commands: cmd_tx,
            messages: msg_tx.clone(),
            input: input.clone(),
        };

        let arena = Self {
            state: ArenaState::new(bounds, seed),
            commands: cmd_rx,
            input,
            msg_tx,
        };

        (arena, handle)
    }

    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    /// Drain all pending commands without blocking
    fn drain_commands(&mut self, now: u64) {
        while let Ok(cmd) = self.commands.try_recv() {
            match cmd {
                ArenaCommand::Fire => {
                    let state = &mut self.state;
                    state.player.shoot(
                        now,
                        PLAYER_FIRE_INTERVAL_MS,
                        &mut state.projectiles,
                        &mut state.rng,
                        &mut state.particles,
                    );
                }
                ArenaCommand::Reload => {
                    self.state.player.start_reload(now);
                }
                ArenaCommand::Stop => {
                    info!("Stop requested");
                    self.state.running = false;
                }
            }
        }
    }

    /// Run the frame loop until the match ends or a stop is requested
    pub async fn run(mut self) {
        info!(
            seed = self.state.seed,
            bounds = ?self.state.bounds,
            "Arena started"
        );

        let _ = self.msg_tx.send(SimMsg::MatchStarted {
            seed: self.state.seed,
            bounds: self.state.bounds,
            blue_zone: self.state.blue_zone,
            red_zone: self.state.red_zone,
        });

        let mut ticker = interval(Duration::from_micros(TICK_DURATION_MICROS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let now = unix_millis();
            self.drain_commands(now);

            if !self.state.running {
                info!(tick = self.state.tick, "Arena stopped");
                break;
            }

            let events = self.state.step(now, self.input.snapshot());

            // Subscribers may come and go; a send with no receivers is fine
            let _ = self.msg_tx.send(build_snapshot(&self.state, now, events));

            if let Some(winner) = self.state.score.winner() {
                let summary = build_summary(&self.state, now);
                info!(
                    winner = winner.label(),
                    team_score = summary.team_score,
                    enemy_score = summary.enemy_score,
                    duration_secs = summary.duration_secs,
                    "Match ended"
                );
                let _ = self.msg_tx.send(SimMsg::MatchEnd { winner, summary });
                break;
            }
        }
    }
}

/// Repeat-fire timer: while the fire button is held, request a shot every
/// 100ms. Deliberately independent of the frame cadence.
pub fn spawn_auto_fire(
    commands: mpsc::Sender<ArenaCommand>,
    input: InputHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(AUTO_FIRE_INTERVAL_MS));
        loop {
            ticker.tick().await;
            if commands.is_closed() {
                break;
            }
            if input.snapshot().fire_held && commands.send(ArenaCommand::Fire).await.is_err() {
                break;
            }
        }
    })
}
