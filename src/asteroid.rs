use crate::collision::Collidable;
use crate::config::AsteroidSettings;
use crate::entity::{Entity, PlayArea};
use crate::mask::Mask;
use rand::Rng;
use sdl2::rect::Rect;
use std::rc::Rc;

slotmap::new_key_type! {
    /// Stable handle to an asteroid in the world arena
    pub struct AsteroidKey;
}

/// Stand-in for a coordinate that came out exactly zero
const ZERO_COORDINATE: f32 = 0.1;

/// Velocity divisor applied to the offset toward the centre area
const DRIFT_DIVISOR: f32 = 2000.0;

/// The three asteroid sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidVariant {
    Small,
    Medium,
    Large,
}

impl AsteroidVariant {
    pub const ALL: [AsteroidVariant; 3] = [
        AsteroidVariant::Small,
        AsteroidVariant::Medium,
        AsteroidVariant::Large,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn index(self) -> usize {
        match self {
            AsteroidVariant::Small => 0,
            AsteroidVariant::Medium => 1,
            AsteroidVariant::Large => 2,
        }
    }
}

/// Strip just outside the visible area where asteroids enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeBand {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgeBand {
    const ALL: [EdgeBand; 4] = [EdgeBand::Top, EdgeBand::Bottom, EdgeBand::Left, EdgeBand::Right];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Integer ranges `(x, y)` covered by the band
    fn ranges(self, area: &PlayArea) -> ((i32, i32), (i32, i32)) {
        let margin = area.margin as i32;
        let width = area.width as i32;
        let height = area.height as i32;
        let across = (-margin, width + margin);
        let down = (-margin, height + margin);

        match self {
            EdgeBand::Top => (across, (-margin, -margin + 1)),
            EdgeBand::Bottom => (across, (height + margin, height + margin + 1)),
            EdgeBand::Left => ((-margin, -margin + 1), down),
            EdgeBand::Right => ((width + margin, width + margin + 1), down),
        }
    }
}

/// Position and velocity drawn for a fresh asteroid pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Launch {
    /// Pick a point on a random edge band, aimed at a random point of the
    /// centre disk, with a random 1x to 3x speed multiplier per axis
    pub fn random(rng: &mut impl Rng, area: &PlayArea, settings: &AsteroidSettings) -> Self {
        let ((x_lo, x_hi), (y_lo, y_hi)) = EdgeBand::random(rng).ranges(area);
        let x = non_zero(rng.gen_range(x_lo..x_hi) as f32);
        let y = non_zero(rng.gen_range(y_lo..y_hi) as f32);

        let (cx, cy) = area.center();
        let radius = settings.center_area_radius.max(1);
        let target_x = rng.gen_range(cx as i32 - radius..cx as i32 + radius) as f32;
        let dx = (target_x - x) / DRIFT_DIVISOR * rng.gen_range(1..=3) as f32;
        let target_y = rng.gen_range(cy as i32 - radius..cy as i32 + radius) as f32;
        let dy = (target_y - y) / DRIFT_DIVISOR * rng.gen_range(1..=3) as f32;

        Launch { x, y, dx, dy }
    }
}

fn non_zero(value: f32) -> f32 {
    if value == 0.0 { ZERO_COORDINATE } else { value }
}

pub struct Asteroid {
    pub entity: Entity,
    pub velocity: (f32, f32),
    pub rotation_speed: f32,
    pub variant: AsteroidVariant,
}

impl Asteroid {
    pub fn new(launch: Launch, rotation_speed: f32, variant: AsteroidVariant, mask: Rc<Mask>) -> Self {
        Asteroid {
            entity: Entity::new(launch.x, launch.y, 0.0, mask),
            velocity: (launch.dx, launch.dy),
            rotation_speed,
            variant,
        }
    }

    /// Random asteroid; `mask_for` supplies the collision mask of the drawn variant
    pub fn spawn(
        rng: &mut impl Rng,
        area: &PlayArea,
        settings: &AsteroidSettings,
        mask_for: impl Fn(AsteroidVariant) -> Rc<Mask>,
    ) -> Self {
        let launch = Launch::random(rng, area, settings);
        let variant = AsteroidVariant::random(rng);
        let max_spin = settings.max_rotation_speed.max(1);
        let rotation_speed = rng.gen_range(-max_spin..max_spin) as f32;
        Asteroid::new(launch, rotation_speed, variant, mask_for(variant))
    }

    /// Restart from a new launch point, keeping identity, sprite and spin
    pub fn recycle(&mut self, launch: Launch) {
        let direction = self.entity.direction_degrees();
        self.entity.place(launch.x, launch.y, direction);
        self.velocity = (launch.dx, launch.dy);
    }

    /// Advance one frame, recycling first if the asteroid has drifted away
    ///
    /// Returns true when the asteroid was recycled this frame.
    pub fn update(
        &mut self,
        rng: &mut impl Rng,
        area: &PlayArea,
        settings: &AsteroidSettings,
    ) -> bool {
        let recycled = !self.entity.in_bounds(area);
        if recycled {
            self.recycle(Launch::random(rng, area, settings));
        }

        let (dx, dy) = self.velocity;
        self.entity.move_by(dx, dy, area);
        self.entity.rotate(self.rotation_speed);
        recycled
    }
}

impl Collidable for Asteroid {
    fn get_bounds(&self) -> Rect {
        self.entity.bounds()
    }

    fn get_mask(&self) -> &Mask {
        self.entity.mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn area() -> PlayArea {
        PlayArea::new(800.0, 600.0, 50.0)
    }

    fn settings() -> AsteroidSettings {
        AsteroidSettings {
            center_area_radius: 100,
            max_rotation_speed: 3,
            ..AsteroidSettings::default()
        }
    }

    fn solid(_: AsteroidVariant) -> Rc<Mask> {
        Rc::new(Mask::solid(40, 40))
    }

    fn on_edge_band(launch: &Launch) -> bool {
        let area = area();
        launch.y == -area.margin
            || launch.y == area.height + area.margin
            || launch.x == -area.margin
            || launch.x == area.width + area.margin
    }

    #[test]
    fn test_launch_starts_on_edge_band() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let launch = Launch::random(&mut rng, &area(), &settings());
            assert!(on_edge_band(&launch), "{launch:?}");
            assert!(launch.x != 0.0 && launch.y != 0.0);
        }
    }

    #[test]
    fn test_launch_drifts_toward_center() {
        let mut rng = StdRng::seed_from_u64(2);
        let area = area();
        let (cx, cy) = area.center();
        let radius = settings().center_area_radius as f32;

        for _ in 0..200 {
            let launch = Launch::random(&mut rng, &area, &settings());
            // Some multiplier in 1..=3 must map the velocity back onto the centre area
            for (pos, vel, c) in [(launch.x, launch.dx, cx), (launch.y, launch.dy, cy)] {
                let aimed_at_center = (1..=3).any(|k| {
                    let target = pos + vel * DRIFT_DIVISOR / k as f32;
                    target >= c - radius - 0.01 && target <= c + radius + 0.01
                });
                assert!(aimed_at_center, "{launch:?}");
            }
        }
    }

    #[test]
    fn test_rotation_speed_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let asteroid = Asteroid::spawn(&mut rng, &area(), &settings(), solid);
            assert!((-3.0..3.0).contains(&asteroid.rotation_speed));
            assert_eq!(asteroid.rotation_speed.fract(), 0.0);
        }
    }

    #[test]
    fn test_update_moves_and_spins() {
        let mut rng = StdRng::seed_from_u64(4);
        let launch = Launch { x: 100.0, y: 100.0, dx: 1.5, dy: -0.5 };
        let mut asteroid = Asteroid::new(launch, 2.0, AsteroidVariant::Medium, solid(AsteroidVariant::Medium));

        let recycled = asteroid.update(&mut rng, &area(), &settings());

        assert!(!recycled);
        assert_relative_eq!(asteroid.entity.x(), 101.5);
        assert_relative_eq!(asteroid.entity.y(), 99.5);
        assert_relative_eq!(asteroid.entity.direction_degrees(), 2.0);
    }

    #[test]
    fn test_out_of_bounds_recycles_in_place() {
        let mut rng = StdRng::seed_from_u64(5);
        let launch = Launch { x: 900.0, y: 300.0, dx: 1.0, dy: 0.0 };
        let mut asteroid = Asteroid::new(launch, 1.0, AsteroidVariant::Large, solid(AsteroidVariant::Large));

        let recycled = asteroid.update(&mut rng, &area(), &settings());

        assert!(recycled);
        assert_eq!(asteroid.variant, AsteroidVariant::Large);
        assert_relative_eq!(asteroid.rotation_speed, 1.0);
        assert_ne!(asteroid.velocity, (1.0, 0.0));
    }
}
