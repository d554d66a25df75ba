use crate::sprite::SpriteAtlas;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Milliseconds per pixel of asteroid-layer drift
const SCROLL_INTERVAL_MS: u64 = 100;

/// Static backdrop with an asteroid layer sliding slowly to the right
pub struct ScrollingBackground {
    width: u32,
    height: u32,
}

impl ScrollingBackground {
    pub fn new(width: u32, height: u32) -> Self {
        ScrollingBackground { width, height }
    }

    /// Horizontal offset of the asteroid layer at `ticks` milliseconds
    pub fn offset(&self, ticks: u64) -> i32 {
        (ticks / SCROLL_INTERVAL_MS % self.width.max(1) as u64) as i32
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, atlas: &SpriteAtlas, ticks: u64) -> Result<(), String> {
        let full = Rect::new(0, 0, self.width, self.height);
        canvas.copy(&atlas.background, None, Some(full))?;

        // Two copies side by side so the layer wraps without a gap
        let offset = self.offset(ticks);
        for x in [offset, offset - self.width as i32] {
            let dest = Rect::new(x, 0, self.width, self.height);
            canvas.copy(&atlas.background_asteroids, None, Some(dest))?;
        }
        Ok(())
    }
}
