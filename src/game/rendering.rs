// Drawing the world
//
// Every visible object is wrapped in a `Renderable` so the draw pass handles
// ships, asteroids, lasers and explosions the same way: look up the sprite,
// draw it scaled and rotated around the object's position.

use crate::asteroid::Asteroid;
use crate::entity::Entity;
use crate::explosion::Explosion;
use crate::player::Player;
use crate::projectile::Projectile;
use crate::sprite::{SpriteAtlas, SpriteId};
use sdl2::render::Canvas;
use sdl2::video::Window;

use super::GameWorld;

pub enum Renderable<'w> {
    Ship(&'w Player),
    Asteroid(&'w Asteroid),
    Projectile(&'w Projectile),
    /// Explosion together with the animation frame to show
    Explosion(&'w Explosion, usize),
}

/// Where and how a sprite is drawn: centre, unrotated size, direction
pub type Pose = ((f32, f32), (u32, u32), f32);

fn entity_pose(entity: &Entity) -> Pose {
    (
        entity.position(),
        (entity.width(), entity.height()),
        entity.direction_degrees(),
    )
}

impl<'w> Renderable<'w> {
    pub fn pose(&self) -> Pose {
        match *self {
            Renderable::Ship(player) => entity_pose(&player.entity),
            Renderable::Asteroid(asteroid) => entity_pose(&asteroid.entity),
            Renderable::Projectile(projectile) => entity_pose(&projectile.entity),
            Renderable::Explosion(explosion, _) => (
                explosion.position(),
                explosion.size(),
                explosion.direction_degrees(),
            ),
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match *self {
            Renderable::Ship(player) if player.is_accelerating() => SpriteId::ShipAccelerating,
            Renderable::Ship(_) => SpriteId::Ship,
            Renderable::Asteroid(asteroid) => SpriteId::Asteroid(asteroid.variant),
            Renderable::Projectile(_) => SpriteId::Laser,
            Renderable::Explosion(_, frame) => SpriteId::ExplosionFrame(frame),
        }
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, atlas: &SpriteAtlas) -> Result<(), String> {
        let (center, size, direction) = self.pose();
        atlas.render_rotated(canvas, self.sprite(), center, size, direction)
    }
}

impl GameWorld {
    /// Everything to draw at `now`, back to front
    pub fn renderables(&self, now: u64) -> Vec<Renderable<'_>> {
        let mut renderables = Vec::with_capacity(
            self.asteroids.len() + self.explosions.len() + self.player.projectiles.len() + 1,
        );

        renderables.extend(self.asteroids.values().map(Renderable::Asteroid));
        renderables.extend(self.explosions.iter().filter_map(|explosion| {
            explosion
                .current_frame(now)
                .map(|frame| Renderable::Explosion(explosion, frame))
        }));
        renderables.extend(self.player.projectiles.values().map(Renderable::Projectile));
        renderables.push(Renderable::Ship(&self.player));
        renderables
    }

    pub fn render(&self, canvas: &mut Canvas<Window>, atlas: &SpriteAtlas, now: u64) -> Result<(), String> {
        for renderable in self.renderables(now) {
            renderable.render(canvas, atlas)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::input_system::ShipControls;
    use crate::mask::MaskSet;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world() -> GameWorld {
        let mut settings = GameSettings::default();
        settings.asteroids.initial_count = 3;
        let masks = MaskSet::solid(&settings);
        GameWorld::new(settings, masks, 5, StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_ship_drawn_last() {
        let world = world();
        let renderables = world.renderables(0);

        assert_eq!(renderables.len(), 4);
        assert_eq!(renderables.last().map(|r| r.sprite()), Some(SpriteId::Ship));
        assert!(renderables[..3]
            .iter()
            .all(|r| matches!(r.sprite(), SpriteId::Asteroid(_))));
    }

    #[test]
    fn test_accelerating_ship_sprite() {
        let mut world = world();
        let thrust = ShipControls {
            thrust: true,
            ..ShipControls::idle()
        };
        world.update(thrust, 0);

        let sprite = world.renderables(0).last().map(|r| r.sprite());
        assert_eq!(sprite, Some(SpriteId::ShipAccelerating));
    }

    #[test]
    fn test_explosion_frame_follows_clock() {
        let mut world = world();
        world.asteroids.clear();
        world.explosions.push(Explosion::new((50.0, 50.0), 0.0, (60, 60), 0, 5, 500));

        let frame_at = |now| {
            world
                .renderables(now)
                .iter()
                .find_map(|r| match r.sprite() {
                    SpriteId::ExplosionFrame(frame) => Some(frame),
                    _ => None,
                })
        };

        assert_eq!(frame_at(0), Some(0));
        assert_eq!(frame_at(250), Some(2));
        assert_eq!(frame_at(500), None);
    }

    #[test]
    fn test_explosion_drawn_at_destroyed_pose() {
        let mut world = world();
        world.asteroids.clear();
        world.explosions.push(Explosion::new((40.0, 70.0), 45.0, (30, 20), 0, 5, 500));

        let pose = world
            .renderables(0)
            .iter()
            .find(|r| matches!(r, Renderable::Explosion(..)))
            .map(|r| r.pose());
        assert_eq!(pose, Some(((40.0, 70.0), (30, 20), 45.0)));
    }
}
