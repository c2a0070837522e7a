use super::projectile::Projectile;
use super::{Entity, SpriteKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
}

impl Player {
    pub fn new(x: i32, y: i32, speed: i32) -> Self {
        Self { x, y, speed }
    }

    /// Moves one step in `direction` (-1 left, +1 right).
    ///
    /// A step that would leave `0..=max_x` is dropped entirely rather than
    /// clipped, so the wizard can stop short of the edge.
    pub fn move_by(&mut self, direction: i32, max_x: i32) {
        let new_x = self.x + direction * self.speed;
        if (0..=max_x).contains(&new_x) {
            self.x = new_x;
        }
    }

    pub fn move_left(&mut self, max_x: i32) {
        self.move_by(-1, max_x);
    }

    pub fn move_right(&mut self, max_x: i32) {
        self.move_by(1, max_x);
    }

    /// Spawns a projectile at the muzzle, `muzzle_offset` right of the player's x
    pub fn fire(&self, muzzle_offset: i32, projectile_speed: i32) -> Projectile {
        Projectile::new(self.x + muzzle_offset, self.y, projectile_speed)
    }
}

impl Entity for Player {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> SpriteKind {
        SpriteKind::Player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_new() {
        let player = Player::new(400, 570, 5);
        assert_eq!(player.x, 400);
        assert_eq!(player.y, 570);
        assert_eq!(player.speed, 5);
    }

    #[test]
    fn test_player_movement_left() {
        let mut player = Player::new(400, 570, 5);
        player.move_left(770);
        assert_eq!(player.x, 395);

        // Test boundary
        player.x = 0;
        player.move_left(770);
        assert_eq!(player.x, 0);
    }

    #[test]
    fn test_player_movement_right() {
        let mut player = Player::new(400, 570, 5);
        player.move_right(770);
        assert_eq!(player.x, 405);

        // Test boundary
        player.x = 770;
        player.move_right(770);
        assert_eq!(player.x, 770);
    }

    #[test]
    fn test_partial_step_is_dropped_not_clipped() {
        let mut player = Player::new(3, 570, 5);
        player.move_left(770);
        assert_eq!(player.x, 3);

        player.x = 767;
        player.move_right(770);
        assert_eq!(player.x, 767);
    }

    #[test]
    fn test_player_fire_spawns_at_muzzle() {
        let player = Player::new(400, 570, 5);
        let projectile = player.fire(15, 17);
        assert_eq!(projectile.x, 415);
        assert_eq!(projectile.y, 570);
        assert_eq!(projectile.speed, 17);
    }

    #[test]
    fn test_player_sprite() {
        let player = Player::new(12, 34, 5);
        assert_eq!(player.position(), (12, 34));
        assert_eq!(player.sprite(), SpriteKind::Player);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_bounds_x(
                initial_x in 0i32..=770,
                speed in 1i32..40,
                moves in prop::collection::vec(prop::bool::ANY, 0..300)
            ) {
                let mut player = Player::new(initial_x, 570, speed);
                for move_right in moves {
                    if move_right {
                        player.move_right(770);
                    } else {
                        player.move_left(770);
                    }
                    prop_assert!((0..=770).contains(&player.x));
                }
            }
        }
    }
}
