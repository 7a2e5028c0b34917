use glam::Vec2;

use crate::config::GameConfig;
use crate::geometry::Footprint;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec2,
    /// Unit heading, fixed when the projectile is fired
    direction: Vec2,
    pub speed: f32,
    pub size: f32,
}

impl Projectile {
    pub fn new(position: Vec2, direction: Vec2, config: &GameConfig) -> Self {
        Self {
            position,
            direction,
            speed: config.projectile_speed,
            size: config.projectile_size,
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn update(&mut self) {
        self.position += self.direction * self.speed;
    }

    /// True once the center has left the `[0, width] x [0, height]` playfield.
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        !(0.0..=width).contains(&self.position.x) || !(0.0..=height).contains(&self.position.y)
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.size)
    }
}
