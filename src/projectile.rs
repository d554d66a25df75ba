use crate::collision::Collidable;
use crate::entity::{Entity, PlayArea, heading};
use crate::mask::Mask;
use sdl2::rect::Rect;
use std::rc::Rc;

slotmap::new_key_type! {
    /// Stable handle to a live laser shot
    pub struct ProjectileKey;
}

/// A laser shot travelling in a straight line
pub struct Projectile {
    pub entity: Entity,
    speed: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, direction: f32, speed: f32, mask: Rc<Mask>) -> Self {
        Projectile {
            entity: Entity::new(x, y, direction, mask),
            speed,
        }
    }

    /// Advance one frame; returns false once the shot has left the play area
    pub fn update(&mut self, area: &PlayArea) -> bool {
        if !self.entity.in_bounds(area) {
            return false;
        }

        let (hx, hy) = heading(self.entity.direction_degrees());
        self.entity.move_by(hx * self.speed, hy * self.speed, area);
        true
    }
}

impl Collidable for Projectile {
    fn get_bounds(&self) -> Rect {
        self.entity.bounds()
    }

    fn get_mask(&self) -> &Mask {
        self.entity.mask()
    }
}
