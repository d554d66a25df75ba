/// Collision detection for ships, asteroids and lasers
///
/// Detection runs in two phases:
///
/// - **Broad phase**: axis-aligned bounding box test on the rotated sprite boxes
/// - **Narrow phase**: pixel mask overlap, using the offset between the two
///   boxes' top-left corners
///
/// Both are pure functions over the `Collidable` trait so the simulation can
/// be tested without a window.
use crate::entity::Entity;
use crate::mask::Mask;
use sdl2::rect::Rect;
use slotmap::{Key, SlotMap};

/// Anything with a screen box and a pixel mask aligned to that box
pub trait Collidable {
    fn get_bounds(&self) -> Rect;

    fn get_mask(&self) -> &Mask;
}

impl Collidable for Entity {
    fn get_bounds(&self) -> Rect {
        self.bounds()
    }

    fn get_mask(&self) -> &Mask {
        self.mask()
    }
}

/// Checks if two axis-aligned bounding boxes intersect.
///
/// Touching edges do not count: SDL2 rects have exclusive upper bounds.
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.x() < b.x() + b.width() as i32 && a.x() + a.width() as i32 > b.x();
    let y_overlap = a.y() < b.y() + b.height() as i32 && a.y() + a.height() as i32 > b.y();

    x_overlap && y_overlap
}

/// Pixel-perfect collision between two objects
pub fn collide_mask(a: &impl Collidable, b: &impl Collidable) -> bool {
    let a_bounds = a.get_bounds();
    let b_bounds = b.get_bounds();

    if !aabb_intersect(&a_bounds, &b_bounds) {
        return false;
    }

    let offset = (b_bounds.x() - a_bounds.x(), b_bounds.y() - a_bounds.y());
    a.get_mask().overlaps(b.get_mask(), offset)
}

/// Keys of every object in `others` that collides with `entity`
///
/// Keys come back in arena iteration order; nothing is removed here so the
/// caller can apply all removals afterwards.
pub fn colliding_keys<K: Key, T: Collidable>(
    entity: &impl Collidable,
    others: &SlotMap<K, T>,
) -> Vec<K> {
    others
        .iter()
        .filter(|(_, other)| collide_mask(entity, *other))
        .map(|(key, _)| key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn solid_entity(x: f32, y: f32, size: u32) -> Entity {
        Entity::new(x, y, 0.0, Rc::new(Mask::solid(size, size)))
    }

    #[test]
    fn test_aabb_intersect_overlapping() {
        let rect_a = Rect::new(0, 0, 32, 32);
        let rect_b = Rect::new(16, 16, 32, 32);

        assert!(aabb_intersect(&rect_a, &rect_b));
        assert!(aabb_intersect(&rect_b, &rect_a));
    }

    #[test]
    fn test_aabb_intersect_touching_edges() {
        let rect_a = Rect::new(0, 0, 32, 32);
        let rect_b = Rect::new(32, 0, 32, 32);

        assert!(!aabb_intersect(&rect_a, &rect_b));
    }

    #[test]
    fn test_collide_mask_solid_objects() {
        let a = solid_entity(100.0, 100.0, 20);
        let b = solid_entity(115.0, 110.0, 20);
        let far = solid_entity(300.0, 300.0, 20);

        assert!(collide_mask(&a, &b));
        assert!(collide_mask(&b, &a));
        assert!(!collide_mask(&a, &far));
    }

    #[test]
    fn test_collide_mask_respects_transparent_pixels() {
        // Hollow 9x9 square: only the border is solid
        let mut alpha = vec![0u8; 81];
        for i in 0..9 {
            alpha[i] = 255;
            alpha[72 + i] = 255;
            alpha[i * 9] = 255;
            alpha[i * 9 + 8] = 255;
        }
        let hollow = Entity::new(50.0, 50.0, 0.0, Rc::new(Mask::from_alpha(9, 9, &alpha)));
        let inside = solid_entity(50.0, 50.0, 3);

        assert!(aabb_intersect(&hollow.get_bounds(), &inside.get_bounds()));
        assert!(!collide_mask(&hollow, &inside));
    }

    #[test]
    fn test_colliding_keys_reports_every_hit() {
        slotmap::new_key_type! { struct TestKey; }

        let ship = solid_entity(100.0, 100.0, 20);
        let mut others: SlotMap<TestKey, Entity> = SlotMap::with_key();
        let hit_a = others.insert(solid_entity(110.0, 100.0, 20));
        let _miss = others.insert(solid_entity(400.0, 100.0, 20));
        let hit_b = others.insert(solid_entity(100.0, 90.0, 20));

        let hits = colliding_keys(&ship, &others);
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&hit_a));
        assert!(hits.contains(&hit_b));
    }
}
