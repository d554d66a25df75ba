// Shared enums and small value types used by the game loop

use std::fmt;

/// Which screen the loop is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    Running,
}

/// Final result once the ship has no lives left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
}

impl fmt::Display for GameOver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Game over\nScore: {}", self.score)
    }
}

/// What a simulation step decided about the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    GameOver(GameOver),
}

/// Hits resolved during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Asteroids that hit the ship (one life each)
    pub ship_hits: usize,
    /// Asteroids destroyed by lasers (one point each)
    pub asteroids_shot: usize,
}
