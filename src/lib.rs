//! Headless simulation core for a top-down team deathmatch arena.
//!
//! One human-controlled avatar, AI teammates and opponents, projectile
//! combat and score bookkeeping, all advanced in lockstep by a single
//! authoritative frame loop. Presentation layers attach through
//! [`game::ArenaHandle`]: they write the shared input state, send
//! commands, and consume per-frame snapshots and match events from the
//! broadcast channel.

pub mod config;
pub mod game;
pub mod util;
