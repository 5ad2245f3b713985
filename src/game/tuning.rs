//! Gameplay tuning.
//!
//! Keep this separate from runtime/session configuration (log level,
//! arena extent). Everything here is fixed at compile time; movement
//! speeds and projectile motion are expressed per simulation tick,
//! timers in wall-clock milliseconds.

/// Shared color triple for particles and team tints
pub type Color = (u8, u8, u8);

// --- Combatants ---

/// Player movement speed in pixels per tick
pub const PLAYER_SPEED: f32 = 5.0;
/// Bot movement speed in pixels per tick
pub const BOT_SPEED: f32 = 3.0;
/// Lateral speed while a bot holds the optimal range band
pub const BOT_STRAFE_SPEED: f32 = 2.0;
/// Collision radius for every combatant
pub const COMBATANT_RADIUS: f32 = 25.0;
/// Maximum (and respawn) health
pub const MAX_HEALTH: i32 = 100;
/// Rounds held before a reload is required
pub const CLIP_SIZE: u32 = 30;
/// Time for a reload to complete
pub const RELOAD_MS: u64 = 2000;
/// Minimum interval between two player shots
pub const PLAYER_FIRE_INTERVAL_MS: u64 = 100;

// --- Weapons / projectiles ---

/// Damage per projectile hit
pub const WEAPON_DAMAGE: i32 = 25;
/// Projectile speed in pixels per tick
pub const BULLET_SPEED: f32 = 15.0;
/// Projectile lifetime in ticks
pub const BULLET_LIFETIME_TICKS: u32 = 100;

// --- Bot AI ---

/// Base hit probability; per-instance accuracy jitters around this
pub const BOT_ACCURACY: f32 = 0.85;
/// Half-width of the per-instance accuracy jitter band
pub const BOT_ACCURACY_JITTER: f32 = 0.2;
/// Minimum interval between target-acquisition scans
pub const BOT_REACTION_MS: u64 = 150;
/// Minimum interval between two bot shots
pub const BOT_FIRE_INTERVAL_MS: u64 = 200;
/// Per-frame probability of flipping the strafe direction
pub const BOT_DODGE_CHANCE: f32 = 0.3;
/// Minimum interval between strafe-direction flips
pub const BOT_DODGE_COOLDOWN_MS: u64 = 1000;
/// Interval between patrol waypoint re-rolls
pub const BOT_WAYPOINT_MS: u64 = 2000;
/// Maximum distance at which a bot acquires and fights a target
pub const BOT_ENGAGE_RANGE: f32 = 300.0;
/// Beyond this distance the bot closes in on its target
pub const BOT_CLOSE_IN_RANGE: f32 = 80.0;
/// Under this distance the bot backs away
pub const BOT_RETREAT_RANGE: f32 = 40.0;
/// Speed factor while advancing on a target
pub const BOT_ADVANCE_FACTOR: f32 = 0.8;
/// Speed factor while retreating from a target
pub const BOT_RETREAT_FACTOR: f32 = 0.6;
/// Angular strafe offset mixed into the advance heading
pub const BOT_ADVANCE_STRAFE_RAD: f32 = 0.5;
/// Angular strafe offset mixed into the retreat heading
pub const BOT_RETREAT_STRAFE_RAD: f32 = 0.3;
/// Scale of the aim error applied against (1 - accuracy)
pub const BOT_AIM_ERROR_RAD: f32 = 0.5;

// --- Match ---

/// Score a team needs to win the match
pub const WIN_SCORE: u32 = 25;
/// Teammate bots on the player's (blue) team
pub const BLUE_BOT_COUNT: usize = 3;
/// Opposing (red) bots
pub const RED_BOT_COUNT: usize = 4;
/// Kill notifications stay visible this long
pub const KILL_FEED_MS: u64 = 3000;
/// Cadence of the held-trigger auto-fire timer
pub const AUTO_FIRE_INTERVAL_MS: u64 = 100;

// --- Spawn zones ---

/// Spawn-zone center offset from the owning team's arena edge
pub const SPAWN_EDGE_OFFSET: f32 = 200.0;
/// Spawn-zone width
pub const SPAWN_WIDTH: f32 = 300.0;
/// Spawn-zone height
pub const SPAWN_HEIGHT: f32 = 400.0;

// --- Particles ---

/// Per-frame velocity decay applied to every particle
pub const PARTICLE_FRICTION: f32 = 0.98;
/// Muzzle flash particle count
pub const MUZZLE_FLASH_COUNT: u32 = 8;
/// Blood splatter particle count at intensity 1.0
pub const BLOOD_BASE_COUNT: u32 = 15;
/// Explosion particle count
pub const EXPLOSION_COUNT: u32 = 20;
/// Match-end celebration particle count
pub const GAME_OVER_BURST_COUNT: u32 = 50;

pub const FLASH_BLUE: Color = (0, 255, 255);
pub const FLASH_RED: Color = (255, 136, 0);
pub const BLOOD_RED: Color = (255, 0, 0);
pub const EXPLOSION_ORANGE: Color = (255, 102, 0);
pub const EXPLOSION_YELLOW: Color = (255, 255, 0);
