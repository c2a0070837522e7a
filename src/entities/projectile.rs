use super::{Entity, SpriteKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
}

impl Projectile {
    pub fn new(x: i32, y: i32, speed: i32) -> Self {
        Self { x, y, speed }
    }

    /// Projectiles only ever climb
    pub fn update(&mut self) {
        self.y -= self.speed;
    }

    /// True once the projectile has passed the top edge
    pub fn is_off_field(&self) -> bool {
        self.y < 0
    }
}

impl Entity for Projectile {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> SpriteKind {
        SpriteKind::Projectile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_new() {
        let projectile = Projectile::new(415, 570, 17);
        assert_eq!(projectile.x, 415);
        assert_eq!(projectile.y, 570);
        assert_eq!(projectile.speed, 17);
    }

    #[test]
    fn test_projectile_moves_up() {
        let mut projectile = Projectile::new(415, 570, 17);
        projectile.update();
        assert_eq!(projectile.y, 553);
        assert_eq!(projectile.x, 415);
    }

    #[test]
    fn test_projectile_off_field_only_above_top_edge() {
        let mut projectile = Projectile::new(10, 17, 17);
        projectile.update();
        assert_eq!(projectile.y, 0);
        assert!(!projectile.is_off_field());

        projectile.update();
        assert!(projectile.is_off_field());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_projectile_leaves_field_in_bounded_ticks(
                initial_y in 0i32..600,
                speed in 1i32..40
            ) {
                let mut projectile = Projectile::new(100, initial_y, speed);
                let mut ticks = 0;
                while !projectile.is_off_field() {
                    projectile.update();
                    ticks += 1;
                }
                prop_assert!(ticks <= initial_y / speed + 1);
            }
        }
    }
}
