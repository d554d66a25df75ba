use crate::text::draw_text_centered;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Score and lives read-out along the top of the screen
pub struct Hud {
    pub color: Color,
    pub scale: u32,
    /// Vertical centre of both lines
    pub baseline: i32,
    /// Horizontal centre of the lives counter
    pub lives_x: i32,
}

impl Hud {
    pub fn new() -> Self {
        Hud {
            color: Color::RGB(255, 255, 255),
            scale: 3,
            baseline: 25,
            lives_x: 70,
        }
    }

    pub fn score_text(score: u32) -> String {
        format!("SCORE: {}", score)
    }

    pub fn lives_text(lives: u32) -> String {
        format!("LIVES: {}", lives)
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, score: u32, lives: u32) -> Result<(), String> {
        let (screen_width, _) = canvas.output_size()?;
        draw_text_centered(
            canvas,
            &Self::score_text(score),
            (screen_width as i32 / 2, self.baseline),
            self.color,
            self.scale,
        )?;
        draw_text_centered(
            canvas,
            &Self::lives_text(lives),
            (self.lives_x, self.baseline),
            self.color,
            self.scale,
        )
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}
