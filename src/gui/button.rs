use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// An image that reacts to mouse clicks inside its rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    rect: Rect,
}

impl Button {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Button {
            rect: Rect::new(x, y, width, height),
        }
    }

    /// Button of the given size centred on a screen of `screen` size
    pub fn centered(screen: (u32, u32), width: u32, height: u32) -> Self {
        let x = screen.0 as i32 / 2 - width as i32 / 2;
        let y = screen.1 as i32 / 2 - height as i32 / 2;
        Self::new(x, y, width, height)
    }

    #[cfg(test)]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether a click at (x, y) lands on the button, edges included
    pub fn is_clicked(&self, x: i32, y: i32) -> bool {
        self.rect.left() <= x
            && x <= self.rect.right()
            && self.rect.top() <= y
            && y <= self.rect.bottom()
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, texture: &Texture) -> Result<(), String> {
        canvas.copy(texture, None, Some(self.rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_button() {
        let button = Button::centered((800, 600), 200, 80);
        assert_eq!(button.rect(), Rect::new(300, 260, 200, 80));
    }

    #[test]
    fn test_click_inside_and_on_edges() {
        let button = Button::new(100, 100, 50, 20);
        assert!(button.is_clicked(125, 110));
        assert!(button.is_clicked(100, 100));
        assert!(button.is_clicked(150, 120));
    }

    #[test]
    fn test_click_outside() {
        let button = Button::new(100, 100, 50, 20);
        assert!(!button.is_clicked(99, 110));
        assert!(!button.is_clicked(151, 110));
        assert!(!button.is_clicked(125, 121));
    }
}
