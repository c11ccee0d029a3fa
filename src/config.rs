use crate::error::ConfigError;

/// Smallest grid both snakes can start on without touching the border.
pub const MIN_GRID: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    SinglePlayer,
    Multiplayer,
}

impl GameMode {
    pub fn from_players(players: u8) -> Result<Self, ConfigError> {
        match players {
            1 => Ok(GameMode::SinglePlayer),
            2 => Ok(GameMode::Multiplayer),
            n => Err(ConfigError::Players(n)),
        }
    }

    pub fn players(self) -> u8 {
        match self {
            GameMode::SinglePlayer => 1,
            GameMode::Multiplayer => 2,
        }
    }
}

/// Configuration for one game
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Width of the grid in cells
    pub width: i32,
    /// Height of the grid in cells
    pub height: i32,
    pub mode: GameMode,
    /// Steps per second before the length-based speed-up
    pub base_fps: u32,
    /// Upper bound for the speed-up factor
    pub max_speedup: f64,
    /// Length every snake starts with
    pub initial_length: usize,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 24,
            mode: GameMode::SinglePlayer,
            base_fps: 10,
            max_speedup: 3.0,
            initial_length: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(width: i32, height: i32, mode: GameMode) -> Self {
        Self {
            width,
            height,
            mode,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID || self.height < MIN_GRID {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GRID,
            });
        }

        if self.initial_length == 0 || self.initial_length as i32 > self.width / 2 {
            return Err(ConfigError::SnakeLength { length: self.initial_length, width: self.width });
        }

        if self.base_fps == 0 {
            return Err(ConfigError::ZeroFps);
        }

        Ok(())
    }

    /// Speed-up grows with the longest snake: 10% per cell, capped.
    pub fn speed_factor(&self, longest: usize) -> f64 {
        (1.0 + 0.1 * longest as f64).min(self.max_speedup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 24);
        assert_eq!(config.mode, GameMode::SinglePlayer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grid_too_small() {
        let config = GameConfig::new(5, 20, GameMode::SinglePlayer);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall { width: 5, height: 20, min: MIN_GRID })
        );
    }

    #[test]
    fn test_zero_fps() {
        let config = GameConfig { base_fps: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFps));
    }

    #[test]
    fn test_snake_must_fit() {
        let config = GameConfig { initial_length: 5, ..GameConfig::new(8, 8, GameMode::Multiplayer) };
        assert_eq!(config.validate(), Err(ConfigError::SnakeLength { length: 5, width: 8 }));

        let config = GameConfig { initial_length: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_players() {
        assert_eq!(GameMode::from_players(1), Ok(GameMode::SinglePlayer));
        assert_eq!(GameMode::from_players(2), Ok(GameMode::Multiplayer));
        assert_eq!(GameMode::from_players(3), Err(ConfigError::Players(3)));
        assert_eq!(GameMode::Multiplayer.players(), 2);
    }

    #[test]
    fn test_speed_factor_is_capped() {
        let config = GameConfig::default();
        assert!((config.speed_factor(3) - 1.3).abs() < 1e-9);
        assert!((config.speed_factor(50) - 3.0).abs() < 1e-9);
    }
}
