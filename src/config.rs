use std::time::Duration;

/// Fixed gameplay tuning. Everything is compiled in; there is no file or
/// environment override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Playfield width in world units
    pub width: f32,
    /// Playfield height in world units
    pub height: f32,
    pub fps: u32,
    pub player_size: f32,
    /// Distance moved per frame for each held movement key
    pub player_speed: f32,
    pub starting_lives: u32,
    pub enemy_size: f32,
    pub enemy_speed: f32,
    /// Time that must pass (strictly) between two enemy spawns
    pub enemy_spawn_interval: Duration,
    pub projectile_size: f32,
    pub projectile_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            fps: 60,
            player_size: 40.0,
            player_speed: 5.0,
            starting_lives: 3,
            enemy_size: 30.0,
            enemy_speed: 2.0,
            enemy_spawn_interval: Duration::from_millis(500),
            projectile_size: 10.0,
            projectile_speed: 10.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err("width must be finite and > 0".to_string());
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err("height must be finite and > 0".to_string());
        }
        if self.fps == 0 {
            return Err("fps must be > 0".to_string());
        }
        for (name, value) in [
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("enemy_size", self.enemy_size),
            ("enemy_speed", self.enemy_speed),
            ("projectile_size", self.projectile_size),
            ("projectile_speed", self.projectile_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be finite and > 0"));
            }
        }
        if self.starting_lives == 0 {
            return Err("starting_lives must be > 0".to_string());
        }
        if self.enemy_spawn_interval.is_zero() {
            return Err("enemy_spawn_interval must be > 0".to_string());
        }
        Ok(())
    }

    /// Target duration of one frame at the configured rate
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_frame_duration() {
        let config = GameConfig::default();
        assert_eq!(config.frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_rejects_zero_lives() {
        let config = GameConfig {
            starting_lives: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = GameConfig {
            enemy_speed: -2.0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("enemy_speed"));
    }

    #[test]
    fn test_rejects_nan_width() {
        let config = GameConfig {
            width: f32::NAN,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
