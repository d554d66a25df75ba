// GameWorld: owns every simulated object and runs the per-frame rules
//
// Frame order: game-over check, collision resolution, then updates for
// lasers, ship, asteroids and explosions. Collisions are collected before any
// object is removed so arena iteration is never disturbed.

use crate::asteroid::{Asteroid, AsteroidKey};
use crate::collision::colliding_keys;
use crate::config::GameSettings;
use crate::entity::PlayArea;
use crate::explosion::Explosion;
use crate::input_system::ShipControls;
use crate::mask::MaskSet;
use crate::player::Player;
use crate::projectile::ProjectileKey;
use rand::SeedableRng;
use rand::rngs::StdRng;
use slotmap::SlotMap;

use super::{CollisionReport, FrameOutcome, GameOver};

pub struct GameWorld {
    pub player: Player,
    pub asteroids: SlotMap<AsteroidKey, Asteroid>,
    pub explosions: Vec<Explosion>,
    area: PlayArea,
    settings: GameSettings,
    masks: MaskSet,
    explosion_frames: usize,
    rng: StdRng,
}

impl GameWorld {
    /// Build the world with its starting asteroid field
    pub fn new(settings: GameSettings, masks: MaskSet, explosion_frames: usize, rng: StdRng) -> Self {
        let area = settings.play_area();
        let player = Player::new(
            &area,
            settings.ship.clone(),
            settings.laser.clone(),
            masks.ship.clone(),
            masks.laser.clone(),
        );

        let mut world = GameWorld {
            player,
            asteroids: SlotMap::with_key(),
            explosions: Vec::new(),
            area,
            settings,
            masks,
            explosion_frames,
            rng,
        };

        for _ in 0..world.settings.asteroids.initial_count {
            world.spawn_asteroid();
        }
        world
    }

    /// Seed from the settings when a seed is given, from entropy otherwise
    pub fn from_settings(settings: GameSettings, masks: MaskSet, explosion_frames: usize) -> Self {
        let rng = match settings.seed {
            Some(seed) => {
                log::info!("Using fixed asteroid seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::new(settings, masks, explosion_frames, rng)
    }

    #[cfg(test)]
    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    /// Add a fresh random asteroid to the field
    pub fn spawn_asteroid(&mut self) -> AsteroidKey {
        let masks = &self.masks;
        let asteroid = Asteroid::spawn(
            &mut self.rng,
            &self.area,
            &self.settings.asteroids,
            |variant| masks.asteroids[variant.index()].clone(),
        );
        self.asteroids.insert(asteroid)
    }

    fn explode(&mut self, asteroid: &Asteroid, now: u64) {
        let entity = &asteroid.entity;
        self.explosions.push(Explosion::new(
            entity.position(),
            entity.direction_degrees(),
            (entity.width(), entity.height()),
            now,
            self.explosion_frames,
            self.settings.explosion.duration_ms,
        ));
    }

    /// Set when the ship has run out of lives
    pub fn game_over(&self) -> Option<GameOver> {
        (self.player.lives() == 0).then(|| GameOver {
            score: self.player.score(),
        })
    }

    /// Apply ship and laser hits
    ///
    /// Every asteroid touching the ship costs a life, so several asteroids in
    /// the same frame cost several lives.
    pub fn resolve_collisions(&mut self, now: u64) -> CollisionReport {
        let mut report = CollisionReport::default();

        let ship_hits = colliding_keys(&self.player, &self.asteroids);
        for key in ship_hits {
            if let Some(asteroid) = self.asteroids.remove(key) {
                log::debug!(
                    "Ship hit by asteroid at ({:.0}, {:.0})",
                    asteroid.entity.x(),
                    asteroid.entity.y()
                );
                self.explode(&asteroid, now);
                self.spawn_asteroid();
                self.player.respawn();
                report.ship_hits += 1;
            }
        }

        if report.ship_hits > 0 {
            log::debug!("Ship destroyed, {} lives left", self.player.lives());
        }

        let mut shot_asteroids: Vec<AsteroidKey> = Vec::new();
        let mut spent_lasers: Vec<ProjectileKey> = Vec::new();
        for (key, asteroid) in &self.asteroids {
            // A laser is spent by the first asteroid it hits
            let hits: Vec<ProjectileKey> = colliding_keys(asteroid, &self.player.projectiles)
                .into_iter()
                .filter(|laser| !spent_lasers.contains(laser))
                .collect();
            if !hits.is_empty() {
                shot_asteroids.push(key);
                spent_lasers.extend(hits);
            }
        }

        for key in spent_lasers {
            self.player.projectiles.remove(key);
        }
        for key in shot_asteroids {
            if let Some(asteroid) = self.asteroids.remove(key) {
                self.explode(&asteroid, now);
                self.spawn_asteroid();
                self.player.increase_score();
                report.asteroids_shot += 1;
            }
        }

        if report.asteroids_shot > 0 {
            log::debug!(
                "{} asteroid(s) destroyed, score {}",
                report.asteroids_shot,
                self.player.score()
            );
        }
        report
    }

    /// Move everything by one frame
    pub fn update(&mut self, controls: ShipControls, now: u64) {
        // Lasers fired this frame start moving next frame
        self.player.update_projectiles(&self.area);
        self.player.update(controls, &self.area);

        for (key, asteroid) in self.asteroids.iter_mut() {
            if asteroid.update(&mut self.rng, &self.area, &self.settings.asteroids) {
                log::trace!("Recycled asteroid {:?}", key);
            }
        }

        self.explosions.retain(|explosion| !explosion.is_finished(now));
    }

    /// One full simulation frame
    pub fn step(&mut self, controls: ShipControls, now: u64) -> FrameOutcome {
        if let Some(over) = self.game_over() {
            return FrameOutcome::GameOver(over);
        }

        self.resolve_collisions(now);
        self.update(controls, now);
        FrameOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asteroid::{AsteroidVariant, Launch};
    use crate::mask::Mask;
    use crate::projectile::Projectile;
    use std::rc::Rc;

    const EXPLOSION_FRAMES: usize = 4;

    fn settings() -> GameSettings {
        let mut settings = GameSettings::default();
        settings.window.width = 800;
        settings.window.height = 600;
        settings.asteroids.initial_count = 5;
        settings.explosion.duration_ms = 400;
        settings
    }

    fn world_with(settings: GameSettings) -> GameWorld {
        let masks = MaskSet::solid(&settings);
        GameWorld::new(settings, masks, EXPLOSION_FRAMES, StdRng::seed_from_u64(11))
    }

    /// World with no random asteroids
    fn empty_world(settings: GameSettings) -> GameWorld {
        let mut world = world_with(settings);
        world.asteroids.clear();
        world
    }

    fn still_asteroid(x: f32, y: f32) -> Asteroid {
        let launch = Launch { x, y, dx: 0.0, dy: 0.0 };
        Asteroid::new(launch, 0.0, AsteroidVariant::Small, Rc::new(Mask::solid(60, 60)))
    }

    fn laser_at(x: f32, y: f32) -> Projectile {
        Projectile::new(x, y, 0.0, 12.0, Rc::new(Mask::solid(6, 24)))
    }

    #[test]
    fn test_starts_with_configured_field() {
        let world = world_with(settings());
        assert_eq!(world.asteroids.len(), 5);
        assert_eq!(world.player.lives(), 3);
        assert!(world.explosions.is_empty());
        assert!(world.game_over().is_none());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = world_with(settings());
        let b = world_with(settings());
        let positions = |world: &GameWorld| {
            world
                .asteroids
                .values()
                .map(|a| a.entity.position())
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_laser_destroys_asteroid() {
        let mut world = empty_world(settings());
        let target = world.asteroids.insert(still_asteroid(100.0, 100.0));
        world.player.projectiles.insert(laser_at(100.0, 110.0));

        let report = world.resolve_collisions(1_000);

        assert_eq!(report.asteroids_shot, 1);
        assert_eq!(report.ship_hits, 0);
        assert!(!world.asteroids.contains_key(target));
        assert!(world.player.projectiles.is_empty());
        assert_eq!(world.asteroids.len(), 1, "replacement spawned");
        assert_eq!(world.explosions.len(), 1);
        assert_eq!(world.explosions[0].position(), (100.0, 100.0));
        assert_eq!(world.player.score(), 1);
    }

    #[test]
    fn test_one_laser_destroys_only_one_of_two_asteroids() {
        let mut world = empty_world(settings());
        let first = world.asteroids.insert(still_asteroid(100.0, 100.0));
        let second = world.asteroids.insert(still_asteroid(100.0, 150.0));
        world.player.projectiles.insert(laser_at(100.0, 125.0));

        let report = world.resolve_collisions(0);

        assert_eq!(report.asteroids_shot, 1);
        assert_eq!(world.player.score(), 1);
        assert_eq!(world.explosions.len(), 1);
        assert!(world.player.projectiles.is_empty());
        // One survivor plus one replacement
        assert_eq!(world.asteroids.len(), 2);
        assert_ne!(
            world.asteroids.contains_key(first),
            world.asteroids.contains_key(second)
        );
    }

    #[test]
    fn test_two_lasers_in_one_asteroid_are_both_spent() {
        let mut world = empty_world(settings());
        world.asteroids.insert(still_asteroid(100.0, 100.0));
        world.player.projectiles.insert(laser_at(95.0, 100.0));
        world.player.projectiles.insert(laser_at(105.0, 100.0));

        let report = world.resolve_collisions(0);

        assert_eq!(report.asteroids_shot, 1);
        assert_eq!(world.player.score(), 1);
        assert!(world.player.projectiles.is_empty());
    }

    #[test]
    fn test_missed_laser_survives() {
        let mut world = empty_world(settings());
        world.asteroids.insert(still_asteroid(100.0, 100.0));
        world.player.projectiles.insert(laser_at(600.0, 100.0));

        let report = world.resolve_collisions(0);

        assert_eq!(report, CollisionReport::default());
        assert_eq!(world.player.projectiles.len(), 1);
        assert_eq!(world.player.score(), 0);
    }

    #[test]
    fn test_ship_collision_respawns_and_costs_a_life() {
        let mut world = empty_world(settings());
        let area = *world.area();
        world.player.update(
            ShipControls {
                thrust: true,
                ..ShipControls::idle()
            },
            &area,
        );
        let (x, y) = world.player.entity.position();
        world.asteroids.insert(still_asteroid(x, y));

        let report = world.resolve_collisions(0);

        assert_eq!(report.ship_hits, 1);
        assert_eq!(world.player.lives(), 2);
        assert_eq!(world.player.entity.position(), (400.0, 300.0));
        assert_eq!(world.player.velocity(), (0.0, 0.0));
        assert_eq!(world.explosions.len(), 1);
        assert_eq!(world.asteroids.len(), 1);
    }

    #[test]
    fn test_two_asteroids_in_one_frame_cost_two_lives() {
        let mut world = empty_world(settings());
        world.asteroids.insert(still_asteroid(390.0, 300.0));
        world.asteroids.insert(still_asteroid(410.0, 300.0));

        let report = world.resolve_collisions(0);

        assert_eq!(report.ship_hits, 2);
        assert_eq!(world.player.lives(), 1);
        assert_eq!(world.explosions.len(), 2);
    }

    #[test]
    fn test_last_life_ends_game_next_frame() {
        let mut config = settings();
        config.ship.lives = 1;
        let mut world = empty_world(config);
        world.player.projectiles.insert(laser_at(100.0, 100.0));
        world.asteroids.insert(still_asteroid(100.0, 100.0));
        world.asteroids.insert(still_asteroid(400.0, 300.0));

        assert_eq!(world.step(ShipControls::idle(), 0), FrameOutcome::Continue);
        assert_eq!(world.player.lives(), 0);

        match world.step(ShipControls::idle(), 16) {
            FrameOutcome::GameOver(over) => {
                assert_eq!(over.score, 1);
                assert!(over.to_string().contains("Score: 1"));
            }
            FrameOutcome::Continue => panic!("game should be over"),
        }
    }

    #[test]
    fn test_recycled_asteroid_keeps_its_key() {
        let mut world = empty_world(settings());
        let key = world.asteroids.insert(still_asteroid(900.0, 300.0));

        world.update(ShipControls::idle(), 0);

        assert!(world.asteroids.contains_key(key));
        assert_eq!(world.asteroids.len(), 1);
        assert_ne!(world.asteroids[key].velocity, (0.0, 0.0));
    }

    #[test]
    fn test_explosions_expire() {
        let mut world = empty_world(settings());
        world.asteroids.insert(still_asteroid(100.0, 100.0));
        world.player.projectiles.insert(laser_at(100.0, 100.0));
        world.resolve_collisions(1_000);
        world.asteroids.clear();

        // 4 frames of 100 ms
        world.update(ShipControls::idle(), 1_399);
        assert_eq!(world.explosions.len(), 1);
        world.update(ShipControls::idle(), 1_400);
        assert!(world.explosions.is_empty());
    }

    #[test]
    fn test_fired_laser_moves_from_next_frame() {
        let mut world = empty_world(settings());
        let fire = ShipControls {
            fire: true,
            ..ShipControls::idle()
        };

        world.update(fire, 0);
        world.update(ShipControls::idle(), 16);
        let (_, laser) = world.player.projectiles.iter().next().expect("laser fired");
        assert_eq!(laser.entity.position(), (400.0, 300.0));

        world.update(ShipControls::idle(), 32);
        let (_, laser) = world.player.projectiles.iter().next().expect("laser alive");
        assert_eq!(laser.entity.position(), (400.0, 288.0));
    }
}
