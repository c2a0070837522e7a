use std::path::{Path, PathBuf};

use color_eyre::{
    Result,
    eyre::{WrapErr, ensure},
};
use image::{DynamicImage, RgbaImage, imageops::FilterType};
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::SpriteKind;

pub const BACKGROUND_FILE: &str = "Start.png";
pub const PLAYER_FILE: &str = "wizard.png";
pub const ENEMY_FILE: &str = "spider.png";
pub const PROJECTILE_FILE: &str = "bullet.png";
pub const HIT_SOUND_FILE: &str = "beep.wav";
pub const MISS_SOUND_FILE: &str = "drum.wav";

/// Loads an image and scales it to exactly `width` x `height`
pub fn load_scaled_image(path: &Path, width: u32, height: u32) -> Result<DynamicImage> {
    let image = image::open(path)
        .wrap_err_with(|| format!("failed to load image {}", path.display()))?;
    debug!(path = %path.display(), width, height, "loaded image");
    Ok(image.resize_exact(width, height, FilterType::Triangle))
}

/// Entity sprites, already scaled to their size in field units
#[derive(Debug, Clone)]
pub struct Sprites {
    pub player: RgbaImage,
    pub enemy: RgbaImage,
    pub projectile: RgbaImage,
}

impl Sprites {
    pub fn get(&self, kind: SpriteKind) -> &RgbaImage {
        match kind {
            SpriteKind::Player => &self.player,
            SpriteKind::Enemy => &self.enemy,
            SpriteKind::Projectile => &self.projectile,
        }
    }
}

/// Everything loaded from the asset directory at startup
pub struct Assets {
    pub background: DynamicImage,
    pub sprites: Sprites,
    pub hit_sound: PathBuf,
    pub miss_sound: PathBuf,
}

impl Assets {
    /// Loads every image and checks both sounds exist.
    ///
    /// Any missing or unreadable file is a fatal startup error.
    pub fn load(dir: &Path, config: &GameConfig) -> Result<Self> {
        let sprite = config.sprite_size as u32;
        let background = load_scaled_image(
            &dir.join(BACKGROUND_FILE),
            config.field_width as u32,
            config.field_height as u32,
        )?;
        let sprites = Sprites {
            player: load_scaled_image(&dir.join(PLAYER_FILE), sprite, sprite)?.to_rgba8(),
            enemy: load_scaled_image(&dir.join(ENEMY_FILE), sprite, sprite)?.to_rgba8(),
            projectile: load_scaled_image(
                &dir.join(PROJECTILE_FILE),
                config.projectile_width as u32,
                config.projectile_height as u32,
            )?
            .to_rgba8(),
        };

        let hit_sound = dir.join(HIT_SOUND_FILE);
        let miss_sound = dir.join(MISS_SOUND_FILE);
        for sound in [&hit_sound, &miss_sound] {
            ensure!(sound.is_file(), "missing sound file {}", sound.display());
        }

        Ok(Self {
            background,
            sprites,
            hit_sound,
            miss_sound,
        })
    }
}
