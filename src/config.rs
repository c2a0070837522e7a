use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::{Result, eyre::ensure};

/// Command line options for the game binary
#[derive(Debug, Clone, Parser)]
#[command(name = "shoot-the-spider")]
#[command(about = "Shoot the spider before it crawls off the edge of the screen")]
pub struct Cli {
    /// Directory holding Start.png, wizard.png, spider.png, bullet.png, beep.wav and drum.wav
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Seed for spider placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without opening an audio device
    #[arg(long)]
    pub mute: bool,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 30)]
    pub tick_rate: u32,

    /// Health the wizard starts the session with
    #[arg(long, default_value_t = 5)]
    pub starting_health: i32,

    /// Where log output is written while the terminal is in use
    #[arg(long, default_value = "shoot-the-spider.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// Builds and validates the game configuration described by these options
    pub fn game_config(&self) -> Result<GameConfig> {
        let config = GameConfig {
            tick_rate: self.tick_rate,
            starting_health: self.starting_health,
            ..GameConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// Read-only game tuning, shared by every part of a session.
///
/// All distances are in field units (the original game's pixels).
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub field_width: i32,
    pub field_height: i32,
    /// Player and enemy sprites are square
    pub sprite_size: i32,
    pub projectile_width: i32,
    pub projectile_height: i32,
    pub player_speed: i32,
    pub enemy_speed: i32,
    pub projectile_speed: i32,
    /// Horizontal offset from the player's x where projectiles spawn
    pub muzzle_offset: i32,
    pub starting_health: i32,
    pub hit_reward: u32,
    pub tick_rate: u32,
    pub start_screen_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800,
            field_height: 600,
            sprite_size: 30,
            projectile_width: 10,
            projectile_height: 20,
            player_speed: 5,
            enemy_speed: 2,
            projectile_speed: 17,
            muzzle_offset: 15,
            starting_health: 5,
            hit_reward: 10,
            tick_rate: 30,
            start_screen_delay: Duration::from_millis(100),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.field_width > 0 && self.field_height > 0,
            "field must have a positive size, got {}x{}",
            self.field_width,
            self.field_height
        );
        ensure!(
            self.sprite_size > 0
                && self.sprite_size <= self.field_width
                && self.sprite_size <= self.field_height,
            "sprite size {} does not fit a {}x{} field",
            self.sprite_size,
            self.field_width,
            self.field_height
        );
        let (start_x, _) = self.player_start();
        ensure!(
            (0..=self.player_max_x()).contains(&start_x),
            "player start x {} is outside the reachable range 0..={}",
            start_x,
            self.player_max_x()
        );
        ensure!(
            self.projectile_width > 0 && self.projectile_height > 0,
            "projectile sprite must have a positive size"
        );
        ensure!(
            self.player_speed > 0 && self.enemy_speed > 0 && self.projectile_speed > 0,
            "speeds must be positive"
        );
        // The spider has to land exactly on the far edge or it wraps without costing health
        ensure!(
            self.field_width % self.enemy_speed == 0,
            "enemy speed {} must evenly divide the field width {}",
            self.enemy_speed,
            self.field_width
        );
        ensure!(self.tick_rate > 0, "tick rate must be at least 1");
        ensure!(
            self.starting_health > 0,
            "starting health must be positive, got {}",
            self.starting_health
        );
        Ok(())
    }

    /// Duration of one simulation tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    /// Largest x the player may occupy
    pub fn player_max_x(&self) -> i32 {
        self.field_width - self.sprite_size
    }

    pub fn player_start(&self) -> (i32, i32) {
        (self.field_width / 2, self.field_height - self.sprite_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_game() {
        let config = GameConfig::default();
        assert_eq!(config.field_width, 800);
        assert_eq!(config.field_height, 600);
        assert_eq!(config.player_start(), (400, 570));
        assert_eq!(config.player_max_x(), 770);
        assert_eq!(config.starting_health, 5);
        assert_eq!(config.hit_reward, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tick_duration() {
        let config = GameConfig::default();
        assert_eq!(config.tick_duration(), Duration::from_nanos(33_333_333));
    }

    #[test]
    fn test_enemy_speed_must_divide_field_width() {
        let config = GameConfig {
            enemy_speed: 3,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_health_and_zero_tick_rate() {
        let config = GameConfig {
            starting_health: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            tick_rate: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_sprite() {
        let config = GameConfig {
            sprite_size: 700,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_sprite_wider_than_half_the_field() {
        // Fits the field, but the centred start would sit past the right clamp
        let config = GameConfig {
            sprite_size: 500,
            ..GameConfig::default()
        };
        assert_eq!(config.player_start().0, 400);
        assert_eq!(config.player_max_x(), 300);
        assert!(config.validate().is_err());

        let config = GameConfig {
            sprite_size: 400,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["shoot-the-spider"]);
        assert_eq!(cli.assets, PathBuf::from("assets"));
        assert_eq!(cli.seed, None);
        assert!(!cli.mute);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "shoot-the-spider",
            "--seed",
            "7",
            "--mute",
            "--tick-rate",
            "60",
            "--starting-health",
            "3",
        ]);
        assert_eq!(cli.seed, Some(7));
        assert!(cli.mute);
        let config = cli.game_config().unwrap();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.starting_health, 3);
    }

    #[test]
    fn test_cli_rejects_invalid_health() {
        let cli = Cli::parse_from(["shoot-the-spider", "--starting-health", "0"]);
        assert!(cli.game_config().is_err());
    }
}
