use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop the game from starting
///
/// Everything here is fatal: the simulation itself never fails once the
/// assets and settings are in memory.
#[derive(Debug, Error)]
pub enum GameError {
    /// An image could not be read or decoded
    #[error("Failed to load {}: {reason}", path.display())]
    AssetLoad { path: PathBuf, reason: String },

    /// The explosion animation directory had no usable frames
    #[error("No animation frames found in {}", path.display())]
    EmptyAnimation { path: PathBuf },

    /// A settings file exists but could not be parsed
    #[error("Invalid settings file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// SDL subsystem failure (window, canvas, event pump)
    #[error("SDL error: {0}")]
    Sdl(String),
}

impl GameError {
    pub fn asset(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        GameError::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<GameError> for String {
    fn from(error: GameError) -> Self {
        error.to_string()
    }
}
