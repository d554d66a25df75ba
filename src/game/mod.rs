// Game module - simulation state and the per-frame loop pieces
//
// - world.rs: GameWorld, owns every object and applies collisions/spawning
// - types.rs: game state, outcomes and collision reports
// - rendering.rs: Renderable wrapper and the world draw pass
// - clock.rs: fixed-rate frame pacing

pub mod clock;
pub mod rendering;
pub mod types;
pub mod world;

pub use clock::FrameClock;
pub use types::*;
pub use world::GameWorld;
