//! Screen-space GUI
//!
//! Elements here are drawn in fixed screen coordinates on top of the world:
//!
//! - [`Button`] - clickable image, used for the main menu start button
//! - [`Hud`] - score and lives read-out while the game runs
//! - [`ScrollingBackground`] - two-layer backdrop shared by menu and game

pub mod background;
pub mod button;
pub mod hud;

pub use background::ScrollingBackground;
pub use button::Button;
pub use hud::Hud;
