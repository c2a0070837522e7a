use rand::Rng;

use super::{Entity, SpriteKind};

/// The spider: drifts right at a constant speed and respawns at the left edge
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
}

impl Enemy {
    pub fn new(x: i32, y: i32, speed: i32) -> Self {
        Self { x, y, speed }
    }

    /// Creates a spider already placed at a random height on the left edge
    pub fn spawn<R: Rng>(speed: i32, field_height: i32, rng: &mut R) -> Self {
        let mut enemy = Self::new(0, 0, speed);
        enemy.reset(field_height, rng);
        enemy
    }

    /// Drifts right, wrapping back to the left edge once past `field_width`
    pub fn update<R: Rng>(&mut self, field_width: i32, field_height: i32, rng: &mut R) {
        self.x += self.speed;
        if self.x > field_width {
            self.reset(field_height, rng);
        }
    }

    /// Moves back to the left edge at a height in `0..=field_height / 2`
    pub fn reset<R: Rng>(&mut self, field_height: i32, rng: &mut R) {
        self.x = 0;
        self.y = rng.random_range(0..=field_height / 2);
    }

    /// True when the spider has reached the far edge without being hit
    pub fn has_crossed(&self, field_width: i32) -> bool {
        self.x >= field_width
    }

    /// Strict containment test of a point against the spider's square sprite.
    ///
    /// A point lying exactly on an edge is not inside.
    pub fn contains(&self, x: i32, y: i32, size: i32) -> bool {
        self.x < x && x < self.x + size && self.y < y && y < self.y + size
    }
}

impl Entity for Enemy {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> SpriteKind {
        SpriteKind::Enemy
    }
}
