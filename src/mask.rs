//! Pixel collision masks
//!
//! A mask is a bitmap of opaque pixels taken from a sprite's alpha channel.
//! Masks are scaled and rotated the same way the sprite is drawn, so two
//! objects only collide when their visible pixels touch.

use std::rc::Rc;

/// Alpha values above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// A fully opaque mask
    pub fn solid(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask from one alpha byte per pixel, row-major
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Self {
        let bits = alpha
            .iter()
            .take((width * height) as usize)
            .map(|&a| a > ALPHA_THRESHOLD)
            .collect::<Vec<_>>();
        let mut mask = Mask {
            width,
            height,
            bits,
        };
        mask.bits.resize((width * height) as usize, false);
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Number of solid pixels
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Nearest-neighbour resize
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }

        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let src_y = if height == 0 { 0 } else { y * self.height / height };
            for x in 0..width {
                let src_x = if width == 0 { 0 } else { x * self.width / width };
                bits.push(self.get(src_x, src_y));
            }
        }

        Mask {
            width,
            height,
            bits,
        }
    }

    /// Rotate counter-clockwise (as seen on screen) by `degrees`
    ///
    /// The result grows to the bounding box of the rotated image, matching
    /// how the sprite itself is drawn around its centre.
    pub fn rotated(&self, degrees: f32) -> Self {
        let (width, height) = rotated_extent(self.width, self.height, degrees);
        let (sin, cos) = degrees.to_radians().sin_cos();

        let src_cx = self.width as f32 / 2.0;
        let src_cy = self.height as f32 / 2.0;
        let dst_cx = width as f32 / 2.0;
        let dst_cy = height as f32 / 2.0;

        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let v = y as f32 + 0.5 - dst_cy;
            for x in 0..width {
                let u = x as f32 + 0.5 - dst_cx;
                // Inverse of the screen-space CCW rotation
                let src_x = u * cos - v * sin + src_cx;
                let src_y = u * sin + v * cos + src_cy;
                let solid = src_x >= 0.0
                    && src_y >= 0.0
                    && self.get(src_x.floor() as u32, src_y.floor() as u32);
                bits.push(solid);
            }
        }

        Mask {
            width,
            height,
            bits,
        }
    }

    /// True when any solid pixel of `other`, placed at `offset` relative to
    /// this mask's top-left corner, lands on a solid pixel of this mask
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (ox, oy) = offset;
        let x_start = ox.max(0);
        let y_start = oy.max(0);
        let x_end = (self.width as i32).min(ox + other.width as i32);
        let y_end = (self.height as i32).min(oy + other.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as u32, y as u32) && other.get((x - ox) as u32, (y - oy) as u32) {
                    return true;
                }
            }
        }
        false
    }
}

/// Size of the axis-aligned box enclosing a `width` x `height` image rotated
/// by `degrees`
pub fn rotated_extent(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let w = width as f32 * cos + height as f32 * sin;
    let h = width as f32 * sin + height as f32 * cos;
    // Trim float noise so 90-degree turns stay exact
    let fit = |v: f32| ((v - 1e-3).ceil().max(1.0)) as u32;
    (fit(w), fit(h))
}

/// Shared collision masks for every sprite the simulation spawns
#[derive(Debug, Clone)]
pub struct MaskSet {
    pub ship: Rc<Mask>,
    pub laser: Rc<Mask>,
    pub asteroids: [Rc<Mask>; 3],
}

impl MaskSet {
    /// Rectangular masks sized from the settings
    #[cfg(test)]
    pub fn solid(settings: &crate::config::GameSettings) -> Self {
        let asteroid = Rc::new(Mask::solid(
            settings.asteroids.width,
            settings.asteroids.height,
        ));
        MaskSet {
            ship: Rc::new(Mask::solid(settings.ship.width, settings.ship.height)),
            laser: Rc::new(Mask::solid(settings.laser.width, settings.laser.height)),
            asteroids: [asteroid.clone(), asteroid.clone(), asteroid],
        }
    }
}
