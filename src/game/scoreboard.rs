//! Score bookkeeping and the kill-notification feed

use serde::{Deserialize, Serialize};

use super::combatant::Team;
use super::tuning::{KILL_FEED_MS, WIN_SCORE};

/// The four match counters.
///
/// Team and enemy score drive the win condition; the player/teammate kill
/// counts are informational and shown on the HUD and the final summary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Kills by the human player
    pub player_kills: u32,
    /// Kills by the player's bot teammates
    pub team_kills: u32,
    /// Blue team total
    pub team_score: u32,
    /// Red team total
    pub enemy_score: u32,
}

impl Scoreboard {
    /// Credit a kill to the shooter's side
    pub fn record_kill(&mut self, shooter_team: Team, shooter_is_player: bool) {
        match shooter_team {
            Team::Blue => {
                self.team_score += 1;
                if shooter_is_player {
                    self.player_kills += 1;
                } else {
                    self.team_kills += 1;
                }
            }
            Team::Red => {
                self.enemy_score += 1;
            }
        }
    }

    /// Win check, evaluated once per frame after all updates.
    ///
    /// Strict-greater comparison: an exact tie at the threshold reports
    /// red. Unreachable under single-increment scoring, kept as documented
    /// behavior.
    pub fn winner(&self) -> Option<Team> {
        if self.team_score >= WIN_SCORE || self.enemy_score >= WIN_SCORE {
            Some(if self.team_score > self.enemy_score {
                Team::Blue
            } else {
                Team::Red
            })
        } else {
            None
        }
    }
}

/// One entry in the kill feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillNotification {
    pub killer: String,
    pub victim: String,
    /// Creation time, drives expiry and the HUD fade
    pub at: u64,
}

impl KillNotification {
    pub fn expired(&self, now: u64) -> bool {
        now.saturating_sub(self.at) > KILL_FEED_MS
    }

    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.at)
    }
}

/// Creation-ordered feed of recent kills, pruned by wall-clock expiry
#[derive(Debug, Default)]
pub struct KillFeed {
    entries: Vec<KillNotification>,
}

impl KillFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, killer: impl Into<String>, victim: impl Into<String>, now: u64) {
        self.entries.push(KillNotification {
            killer: killer.into(),
            victim: victim.into(),
            at: now,
        });
    }

    /// Drop entries past their display duration
    pub fn prune(&mut self, now: u64) {
        self.entries.retain(|n| !n.expired(now));
    }

    pub fn active(&self) -> &[KillNotification] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_kill_counts_twice() {
        let mut score = Scoreboard::default();
        score.record_kill(Team::Blue, true);
        assert_eq!(score.player_kills, 1);
        assert_eq!(score.team_score, 1);
        assert_eq!(score.team_kills, 0);
    }

    #[test]
    fn test_teammate_kill_is_kept_separate() {
        let mut score = Scoreboard::default();
        score.record_kill(Team::Blue, false);
        assert_eq!(score.team_kills, 1);
        assert_eq!(score.team_score, 1);
        assert_eq!(score.player_kills, 0);
    }

    #[test]
    fn test_enemy_kill_raises_enemy_score_only() {
        let mut score = Scoreboard::default();
        score.record_kill(Team::Red, false);
        assert_eq!(score.enemy_score, 1);
        assert_eq!(score.team_score, 0);
    }

    #[test]
    fn test_win_condition_both_ways() {
        let mut score = Scoreboard::default();
        assert_eq!(score.winner(), None);

        score.team_score = WIN_SCORE;
        score.enemy_score = 10;
        assert_eq!(score.winner(), Some(Team::Blue));

        let flipped = Scoreboard {
            team_score: 10,
            enemy_score: WIN_SCORE,
            ..Default::default()
        };
        assert_eq!(flipped.winner(), Some(Team::Red));
    }

    #[test]
    fn test_threshold_tie_reports_red() {
        let score = Scoreboard {
            team_score: WIN_SCORE,
            enemy_score: WIN_SCORE,
            ..Default::default()
        };
        assert_eq!(score.winner(), Some(Team::Red));
    }

    #[test]
    fn test_notification_expiry_boundary() {
        let mut feed = KillFeed::new();
        feed.push("ENEMY-2", "ADMIN", 10_000);

        feed.prune(10_000 + 2999);
        assert_eq!(feed.active().len(), 1);

        feed.prune(10_000 + 3001);
        assert!(feed.active().is_empty());
    }

    #[test]
    fn test_feed_keeps_creation_order() {
        let mut feed = KillFeed::new();
        feed.push("A", "B", 10_000);
        feed.push("C", "D", 10_001);
        assert_eq!(feed.active()[0].killer, "A");
        assert_eq!(feed.active()[1].killer, "C");
        assert_eq!(feed.active()[1].age_ms(10_101), 100);
    }
}
