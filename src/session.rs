use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, HeldKeys, Player, Projectile};
use crate::geometry::{angle_to_target, direction_from_angle};
use crate::spawner::{SpawnTimer, spawn_enemy};

/// Everything the simulation needs from the input backend for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub held: HeldKeys,
    /// Pointer position in world coordinates
    pub pointer: Vec2,
}

/// What happened during a single [`Session::step`], mostly for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub spawned: bool,
    pub lives_lost: u32,
    pub kills: u32,
    pub projectiles_expired: u32,
}

/// One playthrough: the player, every live enemy and projectile, score and
/// the spawn clock. Owns all mutable game state.
pub struct Session {
    config: GameConfig,
    game_state: GameState,
    player: Player,
    /// Oldest spawn first; projectile hits resolve in this order
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    score: u32,
    /// Facing in degrees, recomputed from the pointer each frame
    facing: f32,
    spawn_timer: SpawnTimer,
    rng: StdRng,
}

impl Session {
    /// Starts a session with an OS-seeded RNG. `now` is the monotonic
    /// timestamp the spawn timer counts from.
    pub fn new(config: GameConfig, now: Duration) -> Self {
        Self::with_rng(config, now, StdRng::from_os_rng())
    }

    /// Deterministic session for replays and tests
    pub fn with_seed(config: GameConfig, now: Duration, seed: u64) -> Self {
        Self::with_rng(config, now, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, now: Duration, rng: StdRng) -> Self {
        let center = Vec2::new(config.width / 2.0, config.height / 2.0);
        Self {
            config,
            game_state: GameState::Playing,
            player: Player::new(center, &config),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            facing: 0.0,
            spawn_timer: SpawnTimer::new(config.enemy_spawn_interval, now),
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.player.lives
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Direct access for scripted setups in tests and demos
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn push_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Launches a projectile from the player toward `pointer`. Ignored once
    /// the game is over.
    pub fn fire(&mut self, pointer: Vec2) -> bool {
        if !self.game_state.is_playing() {
            return false;
        }

        let angle = angle_to_target(self.player.position, pointer);
        let direction = direction_from_angle(angle);
        self.projectiles
            .push(Projectile::new(self.player.position, direction, &self.config));
        tracing::debug!(angle, "projectile fired");
        true
    }

    /// Advances the simulation by one frame. Does nothing after game over.
    pub fn step(&mut self, input: &FrameInput, now: Duration) -> StepReport {
        let mut report = StepReport::default();
        if !self.game_state.is_playing() {
            return report;
        }

        self.player.apply_movement(&input.held);
        self.facing = angle_to_target(self.player.position, input.pointer);

        if self.spawn_timer.poll(now) {
            let enemy = spawn_enemy(&mut self.rng, &self.config);
            self.enemies.push(enemy);
            report.spawned = true;
        }

        if self.update_enemies(&mut report) {
            return report;
        }
        self.update_projectiles(&mut report);

        report
    }

    /// Moves every enemy and resolves contact with the player. Returns true if
    /// the player ran out of lives, in which case the rest of the frame is
    /// skipped.
    fn update_enemies(&mut self, report: &mut StepReport) -> bool {
        let target = self.player.position;
        let player_box = self.player.footprint();
        let mut hit = vec![false; self.enemies.len()];
        let mut game_over = false;

        for (idx, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.update(target);

            if player_box.overlaps(&enemy.footprint()) {
                hit[idx] = true;
                report.lives_lost += 1;
                let remaining = self.player.lose_life();
                tracing::info!(remaining, "player hit");

                if !self.player.is_alive() {
                    self.game_state = GameState::GameOver;
                    tracing::info!(score = self.score, "game over");
                    game_over = true;
                    break;
                }
            }
        }

        let mut flags = hit.into_iter();
        self.enemies.retain(|_| !flags.next().unwrap_or(false));
        game_over
    }

    /// Moves projectiles, drops the ones that left the playfield, then lets
    /// each survivor destroy at most one enemy.
    fn update_projectiles(&mut self, report: &mut StepReport) {
        let (width, height) = (self.config.width, self.config.height);
        let before = self.projectiles.len();
        for projectile in &mut self.projectiles {
            projectile.update();
        }
        self.projectiles
            .retain(|p| !p.is_out_of_bounds(width, height));
        report.projectiles_expired = (before - self.projectiles.len()) as u32;

        let mut spent = vec![false; self.projectiles.len()];
        let mut killed = vec![false; self.enemies.len()];

        for (p_idx, projectile) in self.projectiles.iter().enumerate() {
            let bullet_box = projectile.footprint();
            let target = self
                .enemies
                .iter()
                .enumerate()
                .find(|(e_idx, enemy)| !killed[*e_idx] && bullet_box.overlaps(&enemy.footprint()));

            if let Some((e_idx, enemy)) = target {
                killed[e_idx] = true;
                spent[p_idx] = true;
                self.score += 1;
                report.kills += 1;
                tracing::debug!(x = enemy.position.x, y = enemy.position.y, score = self.score, "enemy destroyed");
            }
        }

        let mut flags = spent.into_iter();
        self.projectiles.retain(|_| !flags.next().unwrap_or(false));
        let mut flags = killed.into_iter();
        self.enemies.retain(|_| !flags.next().unwrap_or(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::with_seed(GameConfig::default(), Duration::ZERO, 1)
    }

    fn idle_input(pointer: Vec2) -> FrameInput {
        FrameInput {
            held: HeldKeys::default(),
            pointer,
        }
    }

    #[test]
    fn test_new_session_starts_centered_and_playing() {
        let s = session();
        assert_eq!(s.player().position, Vec2::new(400.0, 300.0));
        assert_eq!(s.lives(), 3);
        assert_eq!(s.score(), 0);
        assert_eq!(s.game_state(), GameState::Playing);
        assert!(s.enemies().is_empty());
        assert!(s.projectiles().is_empty());
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let mut s = session();
        let report = s.step(&idle_input(Vec2::ZERO), Duration::from_millis(500));
        assert!(!report.spawned);
        assert!(s.enemies().is_empty());
    }

    #[test]
    fn test_spawn_after_interval() {
        let mut s = session();
        let report = s.step(&idle_input(Vec2::ZERO), Duration::from_millis(501));
        assert!(report.spawned);
        assert_eq!(s.enemies().len(), 1);
    }

    #[test]
    fn test_facing_follows_pointer() {
        let mut s = session();
        s.step(&idle_input(Vec2::new(400.0, 100.0)), Duration::ZERO);
        assert!((s.facing() - 90.0).abs() < 1e-4);

        s.step(&idle_input(Vec2::new(0.0, 300.0)), Duration::ZERO);
        assert!((s.facing().abs() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_fire_spawns_projectile_at_player() {
        let mut s = session();
        assert!(s.fire(Vec2::new(800.0, 300.0)));
        assert_eq!(s.projectiles().len(), 1);
        let p = &s.projectiles()[0];
        assert_eq!(p.position, Vec2::new(400.0, 300.0));
        assert!((p.direction() - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn test_projectile_direction_is_frozen() {
        let mut s = session();
        s.fire(Vec2::new(800.0, 300.0));
        let input = FrameInput {
            held: HeldKeys {
                down: true,
                ..HeldKeys::default()
            },
            pointer: Vec2::new(400.0, 600.0),
        };
        s.step(&input, Duration::ZERO);
        let p = &s.projectiles()[0];
        assert!((p.position - Vec2::new(410.0, 300.0)).length() < 1e-4);
        assert!((p.direction() - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn test_enemy_contact_costs_a_life() {
        let mut s = session();
        let config = *s.config();
        s.push_enemy(Enemy::new(Vec2::new(420.0, 300.0), &config));
        let report = s.step(&idle_input(Vec2::ZERO), Duration::ZERO);
        assert_eq!(report.lives_lost, 1);
        assert_eq!(s.lives(), 2);
        assert!(s.enemies().is_empty());
        assert_eq!(s.game_state(), GameState::Playing);
    }

    #[test]
    fn test_last_life_ends_game_and_freezes_simulation() {
        let mut s = session();
        let config = *s.config();
        s.player_mut().lives = 1;
        s.push_enemy(Enemy::new(Vec2::new(400.0, 310.0), &config));
        s.push_enemy(Enemy::new(Vec2::new(0.0, 0.0), &config));
        s.push_projectile(Projectile::new(Vec2::new(100.0, 100.0), Vec2::X, &config));

        s.step(&idle_input(Vec2::ZERO), Duration::ZERO);
        assert_eq!(s.lives(), 0);
        assert_eq!(s.game_state(), GameState::GameOver);
        // Remaining enemy never moved, projectile never moved
        assert_eq!(s.enemies().len(), 1);
        assert_eq!(s.enemies()[0].position, Vec2::ZERO);
        assert_eq!(s.projectiles()[0].position, Vec2::new(100.0, 100.0));

        let report = s.step(&idle_input(Vec2::ZERO), Duration::from_secs(10));
        assert_eq!(report, StepReport::default());
        assert_eq!(s.game_state(), GameState::GameOver);
        assert!(!s.fire(Vec2::ZERO));
    }

    #[test]
    fn test_projectile_kill_scores() {
        let mut s = session();
        let config = *s.config();
        s.push_enemy(Enemy::new(Vec2::new(600.0, 300.0), &config));
        s.push_projectile(Projectile::new(Vec2::new(580.0, 300.0), Vec2::X, &config));

        let report = s.step(&idle_input(Vec2::ZERO), Duration::ZERO);
        assert_eq!(report.kills, 1);
        assert_eq!(s.score(), 1);
        assert!(s.enemies().is_empty());
        assert!(s.projectiles().is_empty());
    }

    #[test]
    fn test_two_projectiles_cannot_share_one_kill() {
        let mut s = session();
        let config = *s.config();
        s.push_enemy(Enemy::new(Vec2::new(600.0, 300.0), &config));
        s.push_projectile(Projectile::new(Vec2::new(580.0, 300.0), Vec2::X, &config));
        s.push_projectile(Projectile::new(Vec2::new(585.0, 300.0), Vec2::X, &config));

        s.step(&idle_input(Vec2::ZERO), Duration::ZERO);
        assert_eq!(s.score(), 1);
        assert!(s.enemies().is_empty());
        // Second projectile found nothing left to hit and keeps flying
        assert_eq!(s.projectiles().len(), 1);
        assert!((s.projectiles()[0].position - Vec2::new(595.0, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_projectile_leaving_playfield_is_dropped_before_hits() {
        let mut s = session();
        let config = *s.config();
        // Enemy hugging the right edge, projectile about to exit past it
        s.push_enemy(Enemy::new(Vec2::new(800.0, 100.0), &config));
        s.push_projectile(Projectile::new(Vec2::new(795.0, 100.0), Vec2::X, &config));

        let report = s.step(&idle_input(Vec2::ZERO), Duration::ZERO);
        assert_eq!(report.projectiles_expired, 1);
        assert_eq!(report.kills, 0);
        assert_eq!(s.enemies().len(), 1);
    }
}
