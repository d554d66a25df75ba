//! Shared motion primitive for everything that moves on screen
//!
//! Positions are the centre of the sprite. Directions are in degrees, 0 points
//! up the screen and positive angles turn counter-clockwise.

use crate::mask::{Mask, rotated_extent};
use sdl2::rect::Rect;
use std::rc::Rc;

/// Visible screen plus the off-screen margin objects may drift into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        PlayArea {
            width,
            height,
            margin,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn contains_x(&self, x: f32) -> bool {
        -self.margin <= x && x < self.width + self.margin
    }

    pub fn contains_y(&self, y: f32) -> bool {
        -self.margin <= y && y < self.height + self.margin
    }
}

/// Keep a direction inside `[0, 360)`
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Screen-space unit vector for a direction (0 degrees = up)
pub fn heading(degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (-sin, -cos)
}

pub struct Entity {
    x: f32,
    y: f32,
    direction: f32,
    width: u32,
    height: u32,
    base_mask: Rc<Mask>,
    mask: Mask,
    bounds: Rect,
}

impl Entity {
    /// Create an entity whose unrotated size is the size of `base_mask`
    pub fn new(x: f32, y: f32, direction: f32, base_mask: Rc<Mask>) -> Self {
        let mut entity = Entity {
            x,
            y,
            direction: normalize_degrees(direction),
            width: base_mask.width(),
            height: base_mask.height(),
            mask: Mask::solid(0, 0),
            base_mask,
            bounds: Rect::new(0, 0, 1, 1),
        };
        entity.refresh_orientation();
        entity
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn direction_degrees(&self) -> f32 {
        self.direction
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rotated bounding box, centred on the position
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Collision mask matching the current rotation
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Translate, mirroring any axis that leaves the play area
    ///
    /// The mirror is `dimension - coordinate`, which can land outside the
    /// area again; callers that care check `in_bounds` on the next frame.
    pub fn move_by(&mut self, dx: f32, dy: f32, area: &PlayArea) {
        self.x += dx;
        self.y += dy;
        if !self.in_horizontal_bounds(area) {
            self.x = area.width - self.x;
        }
        if !self.in_vertical_bounds(area) {
            self.y = area.height - self.y;
        }
        self.bounds.center_on(self.center_point());
    }

    pub fn rotate(&mut self, angle: f32) {
        self.direction = normalize_degrees(self.direction + angle);
        self.refresh_orientation();
    }

    /// Teleport to a new pose
    pub fn place(&mut self, x: f32, y: f32, direction: f32) {
        self.x = x;
        self.y = y;
        let direction = normalize_degrees(direction);
        if direction != self.direction {
            self.direction = direction;
            self.refresh_orientation();
        } else {
            self.bounds.center_on(self.center_point());
        }
    }

    pub fn in_horizontal_bounds(&self, area: &PlayArea) -> bool {
        area.contains_x(self.x)
    }

    pub fn in_vertical_bounds(&self, area: &PlayArea) -> bool {
        area.contains_y(self.y)
    }

    pub fn in_bounds(&self, area: &PlayArea) -> bool {
        self.in_horizontal_bounds(area) && self.in_vertical_bounds(area)
    }

    fn center_point(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    fn refresh_orientation(&mut self) {
        self.mask = self.base_mask.rotated(self.direction);
        let (width, height) = rotated_extent(self.width, self.height, self.direction);
        let mut bounds = Rect::new(0, 0, width, height);
        bounds.center_on(self.center_point());
        self.bounds = bounds;
    }
}
