//! Narrow-phase collision tests.
//!
//! Pure functions over boxes, circles and velocities; nothing here touches
//! the ECS. Both swept tests consider linear motion over one frame of `dt`
//! seconds and return the first time of contact within `[0, dt]`, `Some(0.0)`
//! when the shapes already overlap.

use crate::math::{Aabb, Circle, Vector2};

/// How the vertical relative velocity of a box sweep is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// `vb.y - va.y`, the true relative velocity.
    #[default]
    Corrected,
    /// `va.y` alone. Ignores the second body's vertical motion; kept for
    /// levels tuned against it.
    Legacy,
}

/// Swept AABB test of box `a` moving at `va` against box `b` moving at `vb`.
///
/// Boxes that strictly overlap collide at `t = 0`. Boxes separated (or only
/// touching) on both axes never collide. Otherwise each axis yields an entry
/// and exit time and the boxes collide if the latest entry is not after the
/// earliest exit.
pub fn rect_rect(
    a: &Aabb,
    va: Vector2,
    b: &Aabb,
    vb: Vector2,
    dt: f32,
    mode: SweepMode,
) -> Option<f32> {
    if a.overlaps(b) {
        return Some(0.0);
    }
    let extents = a.overlap_extents(b);
    if extents.x <= 0.0 && extents.y <= 0.0 {
        return None;
    }

    let vrel = Vector2::new(
        vb.x - va.x,
        match mode {
            SweepMode::Corrected => vb.y - va.y,
            SweepMode::Legacy => va.y,
        },
    );

    let mut t_first = 0.0_f32;
    let mut t_last = dt;
    sweep_axis(a.min.x, a.max.x, b.min.x, b.max.x, vrel.x, &mut t_first, &mut t_last)?;
    sweep_axis(a.min.y, a.max.y, b.min.y, b.max.y, vrel.y, &mut t_first, &mut t_last)?;

    (t_first <= t_last).then_some(t_first)
}

/// Narrow `[t_first, t_last]` by one axis. `v` is the velocity of `b`
/// relative to `a`. `None` means this axis alone rules out contact.
fn sweep_axis(
    a_min: f32,
    a_max: f32,
    b_min: f32,
    b_max: f32,
    v: f32,
    t_first: &mut f32,
    t_last: &mut f32,
) -> Option<()> {
    if v < 0.0 {
        // b is left of a and moving away
        if a_min > b_max {
            return None;
        }
        if a_max < b_min {
            *t_first = t_first.max((a_max - b_min) / v);
        }
        if a_min < b_max {
            *t_last = t_last.min((a_min - b_max) / v);
        }
    } else if v > 0.0 {
        if a_min > b_max {
            *t_first = t_first.max((a_min - b_max) / v);
        }
        if a_max > b_min {
            *t_last = t_last.min((a_max - b_min) / v);
        }
        // b is right of a and moving away
        if a_max < b_min {
            return None;
        }
    } else if a_max <= b_min || a_min >= b_max {
        return None;
    }

    (*t_first <= *t_last).then_some(())
}

/// Swept circle test. Circles already overlapping (or touching) collide at
/// `t = 0`; otherwise the entry time must fall within `[0, dt]`.
pub fn circle_circle(c1: &Circle, v1: Vector2, c2: &Circle, v2: Vector2, dt: f32) -> Option<f32> {
    let delta = c2.center - c1.center;
    let combined = c1.radius + c2.radius;
    let dist_sqr = delta.length_sqr();
    if dist_sqr <= combined * combined {
        return Some(0.0);
    }

    let vrel = v2 - v1;
    let approach = delta.dot(vrel);
    if approach > 0.0 {
        return None;
    }
    let speed_sqr = vrel.length_sqr();
    if speed_sqr == 0.0 {
        return None;
    }
    let discriminant = approach * approach - speed_sqr * (dist_sqr - combined * combined);
    if discriminant < 0.0 {
        return None;
    }
    let t_enter = (-approach - discriminant.sqrt()) / speed_sqr;
    (0.0..=dt).contains(&t_enter).then_some(t_enter)
}

/// Symmetric substring match of two tags against two categories.
///
/// `"Laser Module"` contains `"Laser"`, so callers that need to tell them
/// apart must test the longer tag first.
pub fn is_collision(tag_a: &str, tag_b: &str, category1: &str, category2: &str) -> bool {
    (category1.contains(tag_a) && category2.contains(tag_b))
        || (category1.contains(tag_b) && category2.contains(tag_a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn still() -> Vector2 {
        Vector2::zero()
    }

    #[test]
    fn test_static_overlap_hits_at_zero() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 15.0, 15.0);
        assert_eq!(rect_rect(&a, still(), &b, still(), 1.0, SweepMode::Corrected), Some(0.0));
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 20.0, 10.0);
        assert_eq!(rect_rect(&a, still(), &b, still(), 1.0, SweepMode::Corrected), None);
        let below = Aabb::new(0.0, 10.0, 10.0, 20.0);
        assert_eq!(rect_rect(&a, still(), &below, still(), 1.0, SweepMode::Corrected), None);
    }

    #[test]
    fn test_sweep_entry_at_frame_end() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(15.0, 0.0, 25.0, 10.0);
        let t = rect_rect(&a, Vector2::new(5.0, 0.0), &b, still(), 1.0, SweepMode::Corrected);
        assert!(approx_eq(t.unwrap(), 1.0));
    }

    #[test]
    fn test_sweep_mid_frame() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(15.0, 0.0, 25.0, 10.0);
        let t = rect_rect(&a, Vector2::new(10.0, 0.0), &b, still(), 1.0, SweepMode::Corrected);
        assert!(approx_eq(t.unwrap(), 0.5));
    }

    #[test]
    fn test_sweep_too_slow_misses() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(15.0, 0.0, 25.0, 10.0);
        assert_eq!(
            rect_rect(&a, Vector2::new(4.0, 0.0), &b, still(), 1.0, SweepMode::Corrected),
            None
        );
    }

    #[test]
    fn test_moving_away_misses() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(15.0, 0.0, 25.0, 10.0);
        assert_eq!(
            rect_rect(&a, Vector2::new(-5.0, 0.0), &b, still(), 1.0, SweepMode::Corrected),
            None
        );
    }

    #[test]
    fn test_diagonal_separation_is_rejected() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(11.0, 11.0, 20.0, 20.0);
        assert_eq!(
            rect_rect(&a, Vector2::new(50.0, 50.0), &b, still(), 1.0, SweepMode::Corrected),
            None
        );
    }

    #[test]
    fn test_vertical_mode_changes_falling_pair() {
        // Both fall at the same speed: no relative motion, so no contact.
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(0.0, 15.0, 10.0, 25.0);
        let v = Vector2::new(0.0, 10.0);
        assert_eq!(rect_rect(&a, v, &b, v, 1.0, SweepMode::Corrected), None);
        // Legacy reads va.y as b's velocity relative to a, so moving up
        // counts as approaching the box below.
        assert!(rect_rect(&a, v, &b, v, 1.0, SweepMode::Legacy).is_none());
        let down = Vector2::new(0.0, 10.0);
        let t = rect_rect(&a, down, &b, still(), 1.0, SweepMode::Corrected);
        assert!(approx_eq(t.unwrap(), 0.5));
        let up = Vector2::new(0.0, -10.0);
        let t = rect_rect(&a, up, &b, still(), 1.0, SweepMode::Legacy);
        assert!(approx_eq(t.unwrap(), 0.5));
    }

    #[test]
    fn test_circles_meet_at_frame_end() {
        let c1 = Circle::new(Vector2::new(0.0, 0.0), 5.0);
        let c2 = Circle::new(Vector2::new(20.0, 0.0), 5.0);
        let t = circle_circle(&c1, still(), &c2, Vector2::new(-10.0, 0.0), 1.0);
        assert!(approx_eq(t.unwrap(), 1.0));
    }

    #[test]
    fn test_circles_overlapping_and_separating() {
        let c1 = Circle::new(Vector2::new(0.0, 0.0), 5.0);
        let c2 = Circle::new(Vector2::new(8.0, 0.0), 5.0);
        assert_eq!(circle_circle(&c1, still(), &c2, still(), 1.0), Some(0.0));

        let far = Circle::new(Vector2::new(20.0, 0.0), 5.0);
        assert_eq!(circle_circle(&c1, still(), &far, Vector2::new(10.0, 0.0), 1.0), None);
        assert_eq!(circle_circle(&c1, still(), &far, Vector2::new(-5.0, 0.0), 1.0), None);
        assert_eq!(circle_circle(&c1, still(), &far, Vector2::new(0.0, 50.0), 1.0), None);
    }

    #[test]
    fn test_is_collision_is_symmetric_substring() {
        assert!(is_collision("Thief", "Wall", "Thief", "Wall"));
        assert!(is_collision("Thief", "Wall", "Wall", "Thief"));
        assert!(is_collision("Thief", "Laser", "Thief", "Laser Module"));
        assert!(is_collision("Thief", "Door", "Thief", "LockDoor"));
        assert!(!is_collision("Thief", "Vent", "Thief", "Wall"));
    }
}
