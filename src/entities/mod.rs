mod enemy;
mod game_state;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::Enemy;
pub use game_state::GameState;
pub use player::Player;
pub use projectile::Projectile;

/// Which sprite image an entity is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Enemy,
    Projectile,
}

/// Anything positioned on the field that the renderer can draw.
///
/// Movement is kind-specific (the player is steered, the spider patrols,
/// projectiles climb), so each entity exposes its own update method and this
/// trait only covers what drawing needs.
pub trait Entity {
    /// Top-left corner in field units
    fn position(&self) -> (i32, i32);

    fn sprite(&self) -> SpriteKind;
}
