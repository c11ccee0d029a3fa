use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorldError {
    /// The board is saturated: no random cell was free.
    #[error("failed to put food into empty space after {attempts} attempts")]
    NoFreeCell { attempts: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    GridTooSmall { width: i32, height: i32, min: i32 },
    #[error("unsupported number of players: {0} (expected 1 or 2)")]
    Players(u8),
    #[error("initial snake length {length} does not fit a grid {width} cells wide")]
    SnakeLength { length: usize, width: i32 },
    #[error("frame rate must be positive")]
    ZeroFps,
    #[error("terminal of {cols}x{rows} is too small for a {width}x{height} grid")]
    TerminalTooSmall { cols: u16, rows: u16, width: i32, height: i32 },
}
