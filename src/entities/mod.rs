mod enemy;
mod game_state;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::Enemy;
pub use game_state::GameState;
pub use player::{HeldKeys, Player};
pub use projectile::Projectile;
