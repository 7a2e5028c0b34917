// Library exports for testing
pub use config::GameConfig;
pub use entities::{Enemy, GameState, HeldKeys, Player, Projectile};
pub use session::{FrameInput, Session, StepReport};

pub mod app;
pub mod clock;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod spawner;
pub mod tui;
