//! Closed-form kinematics under constant acceleration.
//!
//! All functions work in SI units (m, s, m/s, m/s^2). Infinite results are
//! meaningful "cannot reach" signals, not errors; callers branch on them.

use crate::util::fuzzy_eq;
use crate::TrainState;

/// Calculates the distance travelled from an initial speed
/// under constant acceleration over the elapsed time.
pub fn traveled_distance(speed: f64, elapsed_time: f64, acceleration: f64) -> f64 {
    speed * elapsed_time + elapsed_time * elapsed_time * acceleration / 2.0
}

/// Inverse of [traveled_distance], solves for the time needed
/// to cover the given distance (positive root).
///
/// With zero acceleration the caller must guard against zero speed.
/// With non-zero acceleration the radicand must be non-negative, which
/// holds whenever the distance is reachable under the given profile.
pub fn solve_time_for_distance(speed: f64, distance: f64, acceleration: f64) -> f64 {
    if acceleration == 0.0 {
        return distance / speed;
    }

    ((2.0 * acceleration * distance + speed * speed).sqrt() - speed) / acceleration
}

/// Calculates the time the train needs to advance the given distance
/// under its current acceleration regime, honoring its target speed.
///
/// Returns infinity if the train cannot cover the distance: it is
/// standing still with no acceleration, or it is decelerating and comes
/// to its target speed before the distance is reached.
pub fn required_time(state: &TrainState, distance: f64) -> f64 {
    if fuzzy_eq(distance, 0.0) {
        return 0.0;
    }

    if state.acceleration == 0.0 {
        return if state.speed == 0.0 {
            f64::INFINITY
        } else {
            distance / state.speed
        };
    }

    if state.acceleration > 0.0 {
        let accel_time = (state.target_speed - state.speed) / state.acceleration;
        let d = traveled_distance(state.speed, accel_time, state.acceleration);

        // The required distance is reached during acceleration
        if d > distance {
            solve_time_for_distance(state.speed, distance, state.acceleration)
        } else {
            // Time to accelerate plus remaining distance at target speed
            accel_time + (distance - d) / state.target_speed
        }
    } else {
        let decel_time = -(state.speed - state.target_speed) / state.acceleration;

        // Maximum distance that can be covered before reaching the target speed
        let max = traveled_distance(state.speed, decel_time, state.acceleration);

        if fuzzy_eq(distance, max) {
            decel_time
        } else if distance <= max {
            solve_time_for_distance(state.speed, distance, state.acceleration)
        } else {
            f64::INFINITY
        }
    }
}
