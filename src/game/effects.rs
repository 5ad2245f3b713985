//! Cosmetic particle effects.
//!
//! Combat code talks to an [`EffectSink`]; the trait's default methods are
//! no-ops, so a unit sink `()` can stand in wherever visual feedback is
//! absent (headless runs, unit tests). [`ParticleField`] is the concrete
//! in-core implementation. Particles never feed back into gameplay.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::combatant::Team;
use super::tuning::{
    self, Color, BLOOD_BASE_COUNT, EXPLOSION_COUNT, MUZZLE_FLASH_COUNT, PARTICLE_FRICTION,
};

/// Named spawn operations for the effect kinds the simulation raises
pub trait EffectSink {
    /// Directional, team-colored flash at the muzzle point
    fn muzzle_flash(&mut self, _rng: &mut ChaCha8Rng, _x: f32, _y: f32, _angle: f32, _team: Team) {}

    /// Omnidirectional red splatter; `intensity` scales the particle count
    fn blood_splatter(&mut self, _rng: &mut ChaCha8Rng, _x: f32, _y: f32, _intensity: f32) {}

    /// Radial burst with a caller-chosen color
    fn explosion(&mut self, _rng: &mut ChaCha8Rng, _x: f32, _y: f32, _color: Color) {}

    /// Generic point emission
    fn burst(
        &mut self,
        _rng: &mut ChaCha8Rng,
        _x: f32,
        _y: f32,
        _color: Color,
        _count: u32,
        _min_life: u32,
        _max_life: u32,
    ) {
    }
}

/// No-op sink for headless or test use
impl EffectSink for () {}

/// A single short-lived particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Color,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    pub fn new(rng: &mut ChaCha8Rng, x: f32, y: f32, color: Color, life: u32) -> Self {
        Self {
            x,
            y,
            vx: rng.gen_range(-5.0..5.0),
            vy: rng.gen_range(-5.0..5.0),
            color,
            life,
            max_life: life,
            size: rng.gen_range(2.0..6.0),
        }
    }

    /// Advance one tick, returns false once expired
    pub fn advance(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vx *= PARTICLE_FRICTION;
        self.vy *= PARTICLE_FRICTION;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    /// Fade factor for the renderer, 1.0 fresh to 0.0 expired
    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }
}

/// Concrete particle collection and fallback effect implementation
#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all particles and drop the expired ones
    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::advance);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl EffectSink for ParticleField {
    fn muzzle_flash(&mut self, rng: &mut ChaCha8Rng, x: f32, y: f32, angle: f32, team: Team) {
        let color = match team {
            Team::Blue => tuning::FLASH_BLUE,
            Team::Red => tuning::FLASH_RED,
        };
        for _ in 0..MUZZLE_FLASH_COUNT {
            let spread = angle + rng.gen_range(-0.25..0.25);
            let life = rng.gen_range(50..150);
            self.particles.push(Particle::new(
                rng,
                x + spread.cos() * 30.0,
                y + spread.sin() * 30.0,
                color,
                life,
            ));
        }
    }

    fn blood_splatter(&mut self, rng: &mut ChaCha8Rng, x: f32, y: f32, intensity: f32) {
        let count = (BLOOD_BASE_COUNT as f32 * intensity).round() as u32;
        for _ in 0..count {
            let px = x + rng.gen_range(-10.0..10.0);
            let py = y + rng.gen_range(-10.0..10.0);
            let life = rng.gen_range(200..600);
            self.particles
                .push(Particle::new(rng, px, py, tuning::BLOOD_RED, life));
        }
    }

    fn explosion(&mut self, rng: &mut ChaCha8Rng, x: f32, y: f32, color: Color) {
        for i in 0..EXPLOSION_COUNT {
            let ring = std::f32::consts::TAU * i as f32 / EXPLOSION_COUNT as f32;
            let radius = rng.gen_range(0.0..50.0);
            let life = rng.gen_range(200..500);
            self.particles.push(Particle::new(
                rng,
                x + ring.cos() * radius,
                y + ring.sin() * radius,
                color,
                life,
            ));
        }
    }

    fn burst(
        &mut self,
        rng: &mut ChaCha8Rng,
        x: f32,
        y: f32,
        color: Color,
        count: u32,
        min_life: u32,
        max_life: u32,
    ) {
        for _ in 0..count {
            let life = rng.gen_range(min_life..max_life);
            self.particles.push(Particle::new(rng, x, y, color, life));
        }
    }
}
