use glam::Vec2;
use rand::Rng;
use std::time::Duration;

use crate::config::GameConfig;
use crate::entities::Enemy;

/// Playfield edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Creates an enemy on a uniformly random edge. The fixed axis sits exactly
/// on the edge; the other axis is a uniformly random whole unit along it,
/// so both corners of a whole-unit playfield are reachable.
pub fn spawn_enemy<R: Rng>(rng: &mut R, config: &GameConfig) -> Enemy {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let (width, height) = (config.width, config.height);

    let (x, y) = match edge {
        Edge::Top => (along_edge(rng, width), 0.0),
        Edge::Bottom => (along_edge(rng, width), height),
        Edge::Left => (0.0, along_edge(rng, height)),
        Edge::Right => (width, along_edge(rng, height)),
    };

    tracing::debug!(?edge, x, y, "enemy spawned");
    Enemy::new(Vec2::new(x, y), config)
}

/// Whole-unit offset in `[0, length]`
fn along_edge<R: Rng>(rng: &mut R, length: f32) -> f32 {
    let last = length.floor() as u32;
    rng.random_range(0..=last) as f32
}

/// Wall-clock spawn cadence. Timestamps are offsets from a monotonic origin
/// (the session start), so frame rate has no effect on how often it fires.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval: Duration,
    last_spawn: Duration,
}

impl SpawnTimer {
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            last_spawn: now,
        }
    }

    /// Returns true and restarts the interval once strictly more than
    /// `interval` has passed since the previous spawn.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_spawn) > self.interval {
            self.last_spawn = now;
            true
        } else {
            false
        }
    }
}
