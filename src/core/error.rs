use serde::Serialize;
use thiserror::Error;

use crate::core::types::Position;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid maze dimensions {width}x{height}: both must be odd and at least 3")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Placement failed: {0}")]
    Placement(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Rejected player movement. Recoverable: the simulation carries on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveError {
    #[error("Move out of bounds: {0:?}")]
    OutOfBoundsMove(Position),

    #[error("Move blocked by wall at {0:?}")]
    BlockedMove(Position),
}

pub type Result<T> = std::result::Result<T, MazeError>;
