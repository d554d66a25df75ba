use crate::collision::Collidable;
use crate::config::{LaserSettings, ShipSettings};
use crate::entity::{Entity, PlayArea, heading};
use crate::input_system::{EdgeTrigger, ShipControls};
use crate::mask::Mask;
use crate::projectile::{Projectile, ProjectileKey};
use sdl2::rect::Rect;
use slotmap::SlotMap;
use std::rc::Rc;

/// Fraction of each velocity component lost per frame without thrust
const FRICTION: f32 = 0.1;

/// The player's ship
///
/// Velocity is kept in screen space: positive y moves down the screen.
pub struct Player {
    pub entity: Entity,
    pub projectiles: SlotMap<ProjectileKey, Projectile>,
    lives: u32,
    score: u32,
    velocity: (f32, f32),
    thrust: EdgeTrigger,
    fire: EdgeTrigger,
    ship: ShipSettings,
    laser: LaserSettings,
    laser_mask: Rc<Mask>,
    spawn_point: (f32, f32),
}

impl Player {
    pub fn new(
        area: &PlayArea,
        ship: ShipSettings,
        laser: LaserSettings,
        ship_mask: Rc<Mask>,
        laser_mask: Rc<Mask>,
    ) -> Self {
        let spawn_point = area.center();
        Player {
            entity: Entity::new(spawn_point.0, spawn_point.1, 0.0, ship_mask),
            projectiles: SlotMap::with_key(),
            lives: ship.lives,
            score: 0,
            velocity: (0.0, 0.0),
            thrust: EdgeTrigger::default(),
            fire: EdgeTrigger::default(),
            ship,
            laser,
            laser_mask,
            spawn_point,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    pub fn velocity(&self) -> (f32, f32) {
        self.velocity
    }

    pub fn velocity_squared(&self) -> f32 {
        self.velocity.0 * self.velocity.0 + self.velocity.1 * self.velocity.1
    }

    /// Thrust key held this frame, drawn with the flame sprite
    pub fn is_accelerating(&self) -> bool {
        self.thrust.is_held()
    }

    pub fn increase_score(&mut self) {
        self.score += 1;
    }

    /// Back to the centre, facing up and at rest, one life fewer
    pub fn respawn(&mut self) {
        let (x, y) = self.spawn_point;
        self.entity.place(x, y, 0.0);
        self.velocity = (0.0, 0.0);
        self.lives = self.lives.saturating_sub(1);
    }

    /// Apply one frame of input, then move
    pub fn update(&mut self, controls: ShipControls, area: &PlayArea) {
        self.steer(controls);
        let (dx, dy) = self.velocity;
        self.entity.move_by(dx, dy, area);
    }

    fn steer(&mut self, controls: ShipControls) {
        self.thrust.update(controls.thrust);
        if self.thrust.just_pressed() {
            log::trace!("Thrust engaged");
        }

        if self.thrust.is_held() {
            self.accelerate();
        } else {
            self.apply_friction();
        }

        if controls.rotate_left {
            self.entity.rotate(self.ship.rotation_speed);
        }
        if controls.rotate_right {
            self.entity.rotate(-self.ship.rotation_speed);
        }

        self.fire.update(controls.fire);
        if self.fire.just_released() {
            self.fire_laser();
        }
    }

    fn accelerate(&mut self) {
        let max_squared = self.ship.max_speed_squared;
        if self.velocity_squared() >= max_squared {
            return;
        }

        let (hx, hy) = heading(self.entity.direction_degrees());
        self.velocity.0 += self.ship.acceleration * hx;
        self.velocity.1 += self.ship.acceleration * hy;

        let speed_squared = self.velocity_squared();
        if speed_squared > max_squared {
            let scale = (max_squared / speed_squared).sqrt();
            self.velocity.0 *= scale;
            self.velocity.1 *= scale;
        }
    }

    fn apply_friction(&mut self) {
        for v in [&mut self.velocity.0, &mut self.velocity.1] {
            if *v != 0.0 {
                let decay = v.signum() * v.abs() * FRICTION;
                *v -= decay;
            }
        }
    }

    fn fire_laser(&mut self) {
        let (x, y) = self.entity.position();
        let direction = self.entity.direction_degrees();
        let laser = Projectile::new(x, y, direction, self.laser.speed, self.laser_mask.clone());
        self.projectiles.insert(laser);
        log::debug!("Laser fired at ({:.0}, {:.0}) heading {:.0}", x, y, direction);
    }

    /// Advance every live shot, dropping those that left the play area
    pub fn update_projectiles(&mut self, area: &PlayArea) {
        self.projectiles.retain(|_, projectile| projectile.update(area));
    }
}

impl Collidable for Player {
    fn get_bounds(&self) -> Rect {
        self.entity.bounds()
    }

    fn get_mask(&self) -> &Mask {
        self.entity.mask()
    }
}
