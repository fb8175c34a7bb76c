//! Pointer path synthesis.
//!
//! Turns endpoints (or a list of waypoints) into the evenly spaced
//! intermediate positions a swipe moves through. Steps are computed in
//! floating point and truncated towards zero per point, so short legs
//! with many steps produce repeated coordinates rather than drift.

use uidrive_event_model::event::Coordinate;

/// Positions visited when moving from `start` to `end` in `steps` steps.
///
/// Returns exactly `steps` points: element `i` is step `i + 1`, and the
/// last element is `end`. `steps == 0` behaves like `steps == 1`.
pub fn interpolate(start: Coordinate, end: Coordinate, steps: u32) -> Vec<Coordinate> {
    let steps = steps.max(1);
    let x_step = f64::from(end.x - start.x) / f64::from(steps);
    let y_step = f64::from(end.y - start.y) / f64::from(steps);

    let mut points: Vec<Coordinate> = (1..steps)
        .map(|i| {
            let i = f64::from(i);
            Coordinate::new(
                start.x + (x_step * i) as i32,
                start.y + (y_step * i) as i32,
            )
        })
        .collect();
    points.push(end);
    points
}

/// Intermediate move positions for a swipe from `start` to `end`.
///
/// This is [`interpolate`] without its final element: the end point is
/// delivered by the touch-up, not by a move.
pub fn swipe_moves(start: Coordinate, end: Coordinate, steps: u32) -> Vec<Coordinate> {
    let mut points = interpolate(start, end, steps);
    points.pop();
    points
}

/// Intermediate move positions for a swipe through `waypoints`.
///
/// Each consecutive pair is one leg, interpolated independently with
/// `segment_steps` steps. Waypoints themselves are not emitted as moves;
/// the caller touches down at the first and up at the last.
pub fn segment_moves(waypoints: &[Coordinate], segment_steps: u32) -> Vec<Vec<Coordinate>> {
    waypoints
        .windows(2)
        .map(|leg| swipe_moves(leg[0], leg[1], segment_steps))
        .collect()
}

/// Length of the longest path, or 0 when there are none.
pub fn max_steps<P: AsRef<[Coordinate]>>(paths: &[P]) -> usize {
    paths.iter().map(|p| p.as_ref().len()).max().unwrap_or(0)
}

/// Position of `path` at `step`, holding the last point once the path runs out.
///
/// Returns `None` only for an empty path.
pub fn position_at(path: &[Coordinate], step: usize) -> Option<Coordinate> {
    path.get(step).or_else(|| path.last()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_interpolate_even_steps() {
        let points = interpolate(c(0, 0), c(100, 50), 4);
        assert_eq!(points, vec![c(25, 12), c(50, 25), c(75, 37), c(100, 50)]);
    }

    #[test]
    fn test_interpolate_truncates_towards_zero() {
        let points = interpolate(c(10, 10), c(0, 0), 3);
        // -3.33 truncates to -3, -6.66 to -6
        assert_eq!(points, vec![c(7, 7), c(4, 4), c(0, 0)]);
    }

    #[test]
    fn test_zero_steps_behaves_like_one() {
        assert_eq!(interpolate(c(1, 2), c(9, 9), 0), vec![c(9, 9)]);
        assert_eq!(interpolate(c(1, 2), c(9, 9), 0), interpolate(c(1, 2), c(9, 9), 1));
        assert!(swipe_moves(c(1, 2), c(9, 9), 0).is_empty());
    }

    #[test]
    fn test_segment_moves_interpolates_legs_independently() {
        let legs = segment_moves(&[c(0, 0), c(10, 0), c(10, 10)], 5);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0], vec![c(2, 0), c(4, 0), c(6, 0), c(8, 0)]);
        assert_eq!(legs[1], vec![c(10, 2), c(10, 4), c(10, 6), c(10, 8)]);
    }

    #[test]
    fn test_single_waypoint_has_no_legs() {
        assert!(segment_moves(&[c(3, 3)], 10).is_empty());
        assert!(segment_moves(&[], 10).is_empty());
    }

    #[test]
    fn test_position_at_freezes_short_paths() {
        let path = [c(0, 0), c(1, 1), c(2, 2)];
        assert_eq!(position_at(&path, 1), Some(c(1, 1)));
        assert_eq!(position_at(&path, 4), Some(c(2, 2)));
        assert_eq!(position_at(&[], 0), None);
        assert_eq!(max_steps(&[path.to_vec(), vec![c(0, 0)]]), 3);
    }

    proptest! {
        #[test]
        fn prop_interpolate_length_and_endpoint(
            sx in -2000i32..2000, sy in -2000i32..2000,
            ex in -2000i32..2000, ey in -2000i32..2000,
            steps in 1u32..200,
        ) {
            let points = interpolate(c(sx, sy), c(ex, ey), steps);
            prop_assert_eq!(points.len(), steps as usize);
            prop_assert_eq!(*points.last().unwrap(), c(ex, ey));
        }

        #[test]
        fn prop_points_stay_within_bounds(
            sx in -500i32..500, sy in -500i32..500,
            ex in -500i32..500, ey in -500i32..500,
            steps in 1u32..64,
        ) {
            for p in interpolate(c(sx, sy), c(ex, ey), steps) {
                prop_assert!(p.x >= sx.min(ex) && p.x <= sx.max(ex));
                prop_assert!(p.y >= sy.min(ey) && p.y <= sy.max(ey));
            }
        }
    }
}
