use glam::Vec2;

use crate::config::GameConfig;
use crate::geometry::Footprint;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub position: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(position: Vec2, config: &GameConfig) -> Self {
        Self {
            position,
            size: config.enemy_size,
            speed: config.enemy_speed,
        }
    }

    /// Steps straight toward `target`. The heading is recomputed from scratch
    /// every call, so there is no inertia to carry between frames.
    pub fn update(&mut self, target: Vec2) {
        let heading = (target - self.position).normalize_or_zero();
        self.position += heading * self.speed;
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), &GameConfig::default())
    }

    #[test]
    fn test_enemy_new() {
        let enemy = enemy_at(0.0, 120.0);
        assert_eq!(enemy.position, Vec2::new(0.0, 120.0));
        assert_eq!(enemy.size, 30.0);
        assert_eq!(enemy.speed, 2.0);
    }

    #[test]
    fn test_enemy_moves_straight_down_toward_player() {
        let mut enemy = enemy_at(400.0, 0.0);
        enemy.update(Vec2::new(400.0, 300.0));
        assert_eq!(enemy.position, Vec2::new(400.0, 2.0));
    }

    #[test]
    fn test_enemy_moves_diagonally() {
        let mut enemy = enemy_at(0.0, 0.0);
        enemy.update(Vec2::new(300.0, 400.0));
        // 3-4-5 triangle scaled to speed 2
        assert!((enemy.position - Vec2::new(1.2, 1.6)).length() < 1e-5);
    }

    #[test]
    fn test_enemy_on_target_stays_put() {
        let mut enemy = enemy_at(400.0, 300.0);
        enemy.update(Vec2::new(400.0, 300.0));
        assert_eq!(enemy.position, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_enemy_retargets_every_frame() {
        let mut enemy = enemy_at(100.0, 100.0);
        enemy.update(Vec2::new(200.0, 100.0));
        assert_eq!(enemy.position, Vec2::new(102.0, 100.0));

        // Target jumps behind it; no leftover momentum
        enemy.update(Vec2::new(0.0, 100.0));
        assert_eq!(enemy.position, Vec2::new(100.0, 100.0));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_never_moves_away_from_target(
                ex in 0.0f32..800.0,
                ey in 0.0f32..600.0,
                tx in 0.0f32..800.0,
                ty in 0.0f32..600.0,
            ) {
                let target = Vec2::new(tx, ty);
                let mut enemy = enemy_at(ex, ey);
                let before = enemy.position.distance(target);
                enemy.update(target);
                let after = enemy.position.distance(target);
                prop_assert!(after <= before + 1e-3);
            }

            #[test]
            fn test_enemy_step_length_is_bounded_by_speed(
                ex in 0.0f32..800.0,
                ey in 0.0f32..600.0,
                tx in 0.0f32..800.0,
                ty in 0.0f32..600.0,
            ) {
                let mut enemy = enemy_at(ex, ey);
                let start = enemy.position;
                enemy.update(Vec2::new(tx, ty));
                prop_assert!(start.distance(enemy.position) <= enemy.speed + 1e-3);
            }
        }
    }
}
