use glam::Vec2;

use crate::config::GameConfig;
use crate::geometry::Footprint;

/// Snapshot of the four directional keys for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub size: f32,
    pub speed: f32,
    pub lives: u32,
}

impl Player {
    pub fn new(position: Vec2, config: &GameConfig) -> Self {
        Self {
            position,
            size: config.player_size,
            speed: config.player_speed,
            lives: config.starting_lives,
        }
    }

    /// Each held key contributes a full step on its axis. Diagonals are not
    /// normalized and opposite keys cancel out. No clamping to the playfield.
    pub fn apply_movement(&mut self, keys: &HeldKeys) {
        if keys.up {
            self.position.y -= self.speed;
        }
        if keys.down {
            self.position.y += self.speed;
        }
        if keys.left {
            self.position.x -= self.speed;
        }
        if keys.right {
            self.position.x += self.speed;
        }
    }

    /// Removes one life and returns how many remain.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.size)
    }
}
