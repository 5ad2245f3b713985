//! Maps live arena state onto the wire types, once per frame

use super::arena::ArenaState;
use super::combatant::Combatant;
use super::events::{
    CombatantSnapshot, GameEvent, MatchSummary, NotificationSnapshot, ParticleSnapshot,
    ProjectileSnapshot, SimMsg,
};

fn combatant_snapshot(c: &Combatant) -> CombatantSnapshot {
    CombatantSnapshot {
        id: c.id,
        name: c.name.clone(),
        team: c.team,
        x: c.x,
        y: c.y,
        angle: c.angle,
        health: c.health,
        ammo: c.ammo,
        reloading: c.reloading(),
        kills: c.kills,
    }
}

/// Build the per-frame snapshot message
pub fn build_snapshot(state: &ArenaState, now: u64, events: Vec<GameEvent>) -> SimMsg {
    SimMsg::Snapshot {
        tick: state.tick,
        player: combatant_snapshot(&state.player),
        bots: state.bots.iter().map(combatant_snapshot).collect(),
        projectiles: state
            .projectiles
            .iter()
            .map(|p| ProjectileSnapshot {
                x: p.x,
                y: p.y,
                angle: p.angle,
                team: p.team,
            })
            .collect(),
        particles: state
            .particles
            .particles()
            .iter()
            .map(|p| ParticleSnapshot {
                x: p.x,
                y: p.y,
                color: p.color,
                alpha: p.alpha(),
                size: p.size,
            })
            .collect(),
        feed: state
            .feed
            .active()
            .iter()
            .map(|n| NotificationSnapshot {
                killer: n.killer.clone(),
                victim: n.victim.clone(),
                age_ms: n.age_ms(now),
            })
            .collect(),
        score: state.score,
        events,
    }
}

/// Build the end-of-match summary for the game-over screen
pub fn build_summary(state: &ArenaState, now: u64) -> MatchSummary {
    let accuracy_pct = if state.player.shots_fired > 0 {
        ((state.player.shots_hit as f32 / state.player.shots_fired as f32) * 100.0).round() as u32
    } else {
        0
    };

    MatchSummary {
        duration_secs: (now.saturating_sub(state.start_time) / 1000) as u32,
        player_kills: state.score.player_kills,
        team_kills: state.score.team_kills,
        team_score: state.score.team_score,
        enemy_score: state.score.enemy_score,
        accuracy_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tuning::{BLUE_BOT_COUNT, RED_BOT_COUNT};
    use crate::util::geom::Extent;

    fn state() -> ArenaState {
        ArenaState::new(Extent::new(1920.0, 1080.0), 5)
    }

    #[test]
    fn test_snapshot_covers_full_roster() {
        let state = state();
        let msg = build_snapshot(&state, 10_000, Vec::new());

        match msg {
            SimMsg::Snapshot {
                player,
                bots,
                projectiles,
                score,
                ..
            } => {
                assert_eq!(player.name, "ADMIN");
                assert_eq!(bots.len(), BLUE_BOT_COUNT + RED_BOT_COUNT);
                assert!(projectiles.is_empty());
                assert_eq!(score.team_score, 0);
            }
            _ => panic!("expected a snapshot"),
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = state();
        let msg = build_snapshot(&state, 10_000, Vec::new());
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"snapshot\""));
        assert!(json.contains("ADMIN"));
    }

    #[test]
    fn test_summary_accuracy_rounds() {
        let mut state = state();
        state.player.shots_fired = 3;
        state.player.shots_hit = 2;
        state.start_time = 10_000;

        let summary = build_summary(&state, 95_000);
        assert_eq!(summary.accuracy_pct, 67);
        assert_eq!(summary.duration_secs, 85);
    }

    #[test]
    fn test_summary_accuracy_zero_without_shots() {
        let state = state();
        let summary = build_summary(&state, 10_000);
        assert_eq!(summary.accuracy_pct, 0);
    }
}
