//! Game simulation modules

pub mod arena;
pub mod bot;
pub mod combatant;
pub mod effects;
pub mod events;
pub mod projectile;
pub mod scoreboard;
pub mod snapshot;
pub mod tuning;

pub use arena::{Arena, ArenaHandle};

use std::sync::Arc;

use parking_lot::RwLock;

use crate::util::geom::Extent;

/// Per-frame read-only context threaded through every update call.
///
/// The frame loop samples the wall clock and the input state exactly once
/// per frame and owns the only copy.
#[derive(Debug, Clone, Copy)]
pub struct FrameCtx {
    /// Wall-clock milliseconds for this frame
    pub now: u64,
    /// Arena bounds, fixed for the session
    pub bounds: Extent,
    /// Latest input snapshot
    pub input: InputState,
}

/// Latest input state produced by the (external) input-wiring collaborator.
///
/// The collaborator writes it asynchronously; the simulation reads one
/// snapshot per frame and never writes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Cursor position in arena coordinates
    pub cursor_x: f32,
    pub cursor_y: f32,
    /// Fire button currently held
    pub fire_held: bool,
}

/// Shared handle to the input state
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    inner: Arc<RwLock<InputState>>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot, copied out so the lock is never held across a frame
    pub fn snapshot(&self) -> InputState {
        *self.inner.read()
    }

    /// Mutate the shared state (input-wiring side)
    pub fn modify(&self, f: impl FnOnce(&mut InputState)) {
        f(&mut self.inner.write());
    }
}

/// Discrete commands drained by the arena at the top of each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaCommand {
    /// Fire the player's weapon (mouse press, or the auto-fire timer)
    Fire,
    /// Start a manual reload
    Reload,
    /// Halt the simulation loop without a match result
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_handle_roundtrip() {
        let handle = InputHandle::new();
        handle.modify(|s| {
            s.up = true;
            s.cursor_x = 320.0;
            s.fire_held = true;
        });

        let snap = handle.snapshot();
        assert!(snap.up && snap.fire_held);
        assert_eq!(snap.cursor_x, 320.0);
        assert!(!snap.down);
    }
}
