/// A one-shot explosion animation left behind by a destroyed object
///
/// Frame selection is driven by the millisecond clock rather than by frame
/// count, so the animation lasts the same time at any frame rate. Explosions
/// never collide, so only the pose of the destroyed object is kept.
pub struct Explosion {
    position: (f32, f32),
    direction: f32,
    size: (u32, u32),
    started_at: u64,
    frame_count: usize,
    frame_length: u64,
}

impl Explosion {
    /// Explosion covering `width` x `height` at the given pose
    ///
    /// `frame_count` frames share `duration_ms` evenly (integer division, at
    /// least one millisecond each).
    pub fn new(
        position: (f32, f32),
        direction: f32,
        size: (u32, u32),
        started_at: u64,
        frame_count: usize,
        duration_ms: u64,
    ) -> Self {
        let frame_length = if frame_count == 0 {
            duration_ms.max(1)
        } else {
            (duration_ms / frame_count as u64).max(1)
        };

        Explosion {
            position,
            direction,
            size,
            started_at,
            frame_count,
            frame_length,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn direction_degrees(&self) -> f32 {
        self.direction
    }

    /// Unrotated size of the sprite
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[cfg(test)]
    pub fn frame_length(&self) -> u64 {
        self.frame_length
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn frame_index(&self, now: u64) -> usize {
        (now.saturating_sub(self.started_at) / self.frame_length) as usize
    }

    /// Frame to draw at `now`, or None once the animation is over
    pub fn current_frame(&self, now: u64) -> Option<usize> {
        let index = self.frame_index(now);
        (index < self.frame_count).then_some(index)
    }

    pub fn is_finished(&self, now: u64) -> bool {
        self.current_frame(now).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explosion(started_at: u64) -> Explosion {
        Explosion::new((100.0, 100.0), 30.0, (60, 60), started_at, 8, 800)
    }

    #[test]
    fn test_frame_length_is_duration_over_count() {
        assert_eq!(explosion(0).frame_length(), 100);
        let uneven = Explosion::new((0.0, 0.0), 0.0, (10, 10), 0, 3, 1000);
        assert_eq!(uneven.frame_length(), 333);
    }

    #[test]
    fn test_frames_advance_with_time() {
        let explosion = explosion(1_000);
        assert_eq!(explosion.current_frame(1_000), Some(0));
        assert_eq!(explosion.current_frame(1_099), Some(0));
        assert_eq!(explosion.current_frame(1_100), Some(1));
        assert_eq!(explosion.current_frame(1_799), Some(7));
    }

    #[test]
    fn test_finishes_exactly_after_last_frame() {
        let explosion = explosion(500);
        let end = 500 + explosion.frame_count() as u64 * explosion.frame_length();

        assert!(!explosion.is_finished(end - 1));
        assert!(explosion.is_finished(end));
    }

    #[test]
    fn test_uneven_split_ends_at_whole_frames() {
        // 3 frames of 333 ms: over at 999, not at the nominal 1000
        let explosion = Explosion::new((0.0, 0.0), 0.0, (10, 10), 0, 3, 1000);
        assert!(!explosion.is_finished(998));
        assert!(explosion.is_finished(999));
    }

    #[test]
    fn test_keeps_orientation_of_destroyed_object() {
        let explosion = explosion(0);
        assert_eq!(explosion.position(), (100.0, 100.0));
        assert_eq!(explosion.direction_degrees(), 30.0);
        assert_eq!(explosion.size(), (60, 60));
    }
}
