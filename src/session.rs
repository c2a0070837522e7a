use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Enemy, Player, Projectile};
use crate::input::InputAction;

/// Sound effects the simulation asks the presentation layer to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A projectile hit the spider
    Hit,
    /// The spider reached the far edge
    Miss,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub credited_hit: bool,
    pub boundary_miss: bool,
    /// Health ran out this tick
    pub terminated: bool,
    pub cues: Vec<SoundCue>,
}

/// All mutable state of one game session.
///
/// Created when play begins and dropped when it ends, so every run starts
/// from full health and zero score.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: GameConfig,
    pub player: Player,
    pub enemy: Enemy,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub health: i32,
    pub ticks: u64,
}

impl Session {
    pub fn new<R: Rng>(config: GameConfig, rng: &mut R) -> Self {
        let (player_x, player_y) = config.player_start();
        let player = Player::new(player_x, player_y, config.player_speed);
        let enemy = Enemy::spawn(config.enemy_speed, config.field_height, rng);

        Self {
            health: config.starting_health,
            config,
            player,
            enemy,
            projectiles: Vec::new(),
            score: 0,
            ticks: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.health <= 0
    }

    /// Runs one simulation tick: input, movement, then collision passes
    pub fn step<R: Rng>(&mut self, actions: &[InputAction], rng: &mut R) -> TickReport {
        let mut report = TickReport::default();
        self.ticks += 1;

        for action in actions {
            self.apply(*action);
        }

        self.update_entities(rng);
        self.cull_projectiles();

        if self.resolve_hit(rng) {
            report.credited_hit = true;
            report.cues.push(SoundCue::Hit);
        }

        if self.check_boundary(rng) {
            report.boundary_miss = true;
            report.cues.push(SoundCue::Miss);
            report.terminated = self.is_over();
        }

        report
    }

    /// Applies one player action; actions with no effect in play are ignored
    pub fn apply(&mut self, action: InputAction) {
        let max_x = self.config.player_max_x();
        match action {
            InputAction::MoveLeft => self.player.move_left(max_x),
            InputAction::MoveRight => self.player.move_right(max_x),
            InputAction::Fire => {
                let projectile = self
                    .player
                    .fire(self.config.muzzle_offset, self.config.projectile_speed);
                self.projectiles.push(projectile);
            }
            InputAction::Start | InputAction::Quit => {}
        }
    }

    /// Moves the spider and every projectile exactly once
    pub fn update_entities<R: Rng>(&mut self, rng: &mut R) {
        self.enemy
            .update(self.config.field_width, self.config.field_height, rng);
        for projectile in &mut self.projectiles {
            projectile.update();
        }
    }

    /// Drops projectiles that have left the top of the field
    pub fn cull_projectiles(&mut self) {
        self.projectiles.retain(|p| !p.is_off_field());
    }

    /// Credits at most one hit: the first projectile inside the spider's box
    /// is consumed, the spider respawns and the score grows by the reward.
    pub fn resolve_hit<R: Rng>(&mut self, rng: &mut R) -> bool {
        let size = self.config.sprite_size;
        let Some(hit_idx) = self
            .projectiles
            .iter()
            .position(|p| self.enemy.contains(p.x, p.y, size))
        else {
            return false;
        };

        self.projectiles.remove(hit_idx);
        self.enemy.reset(self.config.field_height, rng);
        self.score += self.config.hit_reward;
        debug!(score = self.score, tick = self.ticks, "spider hit");
        true
    }

    /// Charges one health point if the spider reached the far edge
    pub fn check_boundary<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !self.enemy.has_crossed(self.config.field_width) {
            return false;
        }

        self.enemy.reset(self.config.field_height, rng);
        self.health -= 1;
        debug!(health = self.health, tick = self.ticks, "spider escaped");
        true
    }
}
