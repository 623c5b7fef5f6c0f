// Library exports for the gamma game engine
// This allows the batch binary and other front ends to use the core game logic

pub mod batch;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod error;
pub mod grid;
pub mod oracle;
pub mod render;
pub mod session;
pub mod types;

pub use engine::{Game, PlayerRecord};
pub use error::{MoveError, RenderError, SetupError};
pub use types::{Coord, PlayerId};
