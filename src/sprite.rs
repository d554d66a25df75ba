//! Sprite textures and the collision masks derived from them
//!
//! Every image is decoded once into a surface. The surface's alpha channel
//! becomes the collision mask and the surface itself is uploaded as a texture.

use crate::asteroid::AsteroidVariant;
use crate::config::GameSettings;
use crate::error::GameError;
use crate::mask::{Mask, MaskSet};
use sdl2::image::LoadSurface;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{Window, WindowContext};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const SHIP_IMAGE: &str = "spaceship.png";
pub const SHIP_ACCELERATING_IMAGE: &str = "spaceship_accelerating.png";
pub const LASER_IMAGE: &str = "laser.png";
pub const ASTEROID_IMAGES: [&str; 3] = ["asteroid_1.png", "asteroid_2.png", "asteroid_3.png"];
pub const EXPLOSION_DIR: &str = "explosion";
pub const BACKGROUND_IMAGE: &str = "background.png";
pub const BACKGROUND_ASTEROIDS_IMAGE: &str = "background_asteroids.png";
pub const START_BUTTON_IMAGE: &str = "start_button.png";

/// Which texture an object is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Ship,
    ShipAccelerating,
    Laser,
    Asteroid(AsteroidVariant),
    ExplosionFrame(usize),
}

pub struct SpriteAtlas<'a> {
    ship: Texture<'a>,
    ship_accelerating: Texture<'a>,
    laser: Texture<'a>,
    asteroids: [Texture<'a>; 3],
    explosion: Vec<Texture<'a>>,
    pub background: Texture<'a>,
    pub background_asteroids: Texture<'a>,
    pub start_button: Texture<'a>,
}

impl<'a> SpriteAtlas<'a> {
    /// Load every game image; any missing file is fatal
    pub fn load(
        texture_creator: &'a TextureCreator<WindowContext>,
        settings: &GameSettings,
    ) -> Result<(Self, MaskSet), GameError> {
        let image = |name: &str| settings.asset_path(name);

        let ship_surface = load_surface(&image(SHIP_IMAGE))?;
        let laser_surface = load_surface(&image(LASER_IMAGE))?;
        let asteroid_surfaces = [
            load_surface(&image(ASTEROID_IMAGES[0]))?,
            load_surface(&image(ASTEROID_IMAGES[1]))?,
            load_surface(&image(ASTEROID_IMAGES[2]))?,
        ];

        let ship = &settings.ship;
        let laser = &settings.laser;
        let rocks = &settings.asteroids;
        let masks = MaskSet {
            ship: Rc::new(surface_mask(&ship_surface, ship.width, ship.height)?),
            laser: Rc::new(surface_mask(&laser_surface, laser.width, laser.height)?),
            asteroids: [
                Rc::new(surface_mask(&asteroid_surfaces[0], rocks.width, rocks.height)?),
                Rc::new(surface_mask(&asteroid_surfaces[1], rocks.width, rocks.height)?),
                Rc::new(surface_mask(&asteroid_surfaces[2], rocks.width, rocks.height)?),
            ],
        };

        let [rock_1, rock_2, rock_3] = asteroid_surfaces;
        let atlas = SpriteAtlas {
            ship: to_texture(texture_creator, ship_surface, &image(SHIP_IMAGE))?,
            ship_accelerating: load_texture(texture_creator, &image(SHIP_ACCELERATING_IMAGE))?,
            laser: to_texture(texture_creator, laser_surface, &image(LASER_IMAGE))?,
            asteroids: [
                to_texture(texture_creator, rock_1, &image(ASTEROID_IMAGES[0]))?,
                to_texture(texture_creator, rock_2, &image(ASTEROID_IMAGES[1]))?,
                to_texture(texture_creator, rock_3, &image(ASTEROID_IMAGES[2]))?,
            ],
            explosion: load_animation(texture_creator, &image(EXPLOSION_DIR))?,
            background: load_texture(texture_creator, &image(BACKGROUND_IMAGE))?,
            background_asteroids: load_texture(texture_creator, &image(BACKGROUND_ASTEROIDS_IMAGE))?,
            start_button: load_texture(texture_creator, &image(START_BUTTON_IMAGE))?,
        };

        log::info!(
            "Loaded sprites from {} ({} explosion frames)",
            settings.assets_dir.display(),
            atlas.explosion.len()
        );
        Ok((atlas, masks))
    }

    pub fn explosion_frame_count(&self) -> usize {
        self.explosion.len()
    }

    pub fn texture(&self, sprite: SpriteId) -> Option<&Texture<'a>> {
        match sprite {
            SpriteId::Ship => Some(&self.ship),
            SpriteId::ShipAccelerating => Some(&self.ship_accelerating),
            SpriteId::Laser => Some(&self.laser),
            SpriteId::Asteroid(variant) => Some(&self.asteroids[variant.index()]),
            SpriteId::ExplosionFrame(index) => self.explosion.get(index),
        }
    }

    /// Draw a sprite scaled to `width` x `height`, centred on `center` and
    /// turned counter-clockwise by `direction` degrees
    pub fn render_rotated(
        &self,
        canvas: &mut Canvas<Window>,
        sprite: SpriteId,
        center: (f32, f32),
        size: (u32, u32),
        direction: f32,
    ) -> Result<(), String> {
        let Some(texture) = self.texture(sprite) else {
            return Ok(());
        };

        let mut dest = Rect::new(0, 0, size.0, size.1);
        dest.center_on((center.0.round() as i32, center.1.round() as i32));

        // SDL turns clockwise for positive angles
        canvas.copy_ex(texture, None, Some(dest), -direction as f64, None, false, false)
    }
}

fn load_surface(path: &Path) -> Result<Surface<'static>, GameError> {
    Surface::from_file(path).map_err(|e| GameError::asset(path, e))
}

fn to_texture<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    surface: Surface,
    path: &Path,
) -> Result<Texture<'a>, GameError> {
    texture_creator
        .create_texture_from_surface(&surface)
        .map_err(|e| GameError::asset(path, e))
}

fn load_texture<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    path: &Path,
) -> Result<Texture<'a>, GameError> {
    to_texture(texture_creator, load_surface(path)?, path)
}

/// Frames of an animation directory, ordered by file name
fn load_animation<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    dir: &Path,
) -> Result<Vec<Texture<'a>>, GameError> {
    let entries = std::fs::read_dir(dir).map_err(|e| GameError::asset(dir, e))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(GameError::EmptyAnimation {
            path: dir.to_path_buf(),
        });
    }

    paths
        .iter()
        .map(|path| load_texture(texture_creator, path))
        .collect()
}

/// Collision mask from a surface's alpha channel, scaled to the drawn size
fn surface_mask(surface: &Surface, width: u32, height: u32) -> Result<Mask, GameError> {
    let argb = surface
        .convert_format(PixelFormatEnum::ARGB8888)
        .map_err(GameError::Sdl)?;
    let (w, h) = (argb.width(), argb.height());
    let pitch = argb.pitch() as usize;

    let alpha = argb.with_lock(|pixels: &[u8]| {
        let mut alpha = Vec::with_capacity((w * h) as usize);
        for row in 0..h as usize {
            let line = &pixels[row * pitch..row * pitch + w as usize * 4];
            // Packed 32-bit pixels keep alpha in the top byte
            alpha.extend(
                line.chunks_exact(4)
                    .map(|px| (u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) >> 24) as u8),
            );
        }
        alpha
    });

    Ok(Mask::from_alpha(w, h, &alpha).scaled(width, height))
}
