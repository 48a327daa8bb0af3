//! Resolves the speed a train must be limited to because of upcoming
//! speed restrictions, mandatory stops and the end of its route.

use crate::debug::debug_speed_target;
use crate::kinematics::traveled_distance;
use crate::util::fuzzy_geq;
use crate::{LinkSet, RailLink, UpdateEvent};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate speed restriction: the speed to steer toward and the
/// distance needed to decelerate from it down to the restricted speed.
///
/// Candidates are ordered by deceleration distance ascending, so the
/// earliest binding restriction compares smallest. Ties keep the
/// candidate discovered first in route order.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedTarget {
    /// The speed to steer toward in m/s.
    pub target_speed: f64,
    /// The distance in m needed to decelerate from the target speed
    /// down to the restricted speed.
    pub decel_dist: f64,
}

impl PartialOrd for SpeedTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.decel_dist.total_cmp(&other.decel_dist))
    }
}

/// Calculates the maximum speed that can still be reached under the
/// condition that the train must be back down to `final_speed` after
/// travelling `dist`.
///
/// While not accelerating, or already at or above the current target
/// speed, the answer is the current target speed itself together with
/// the distance needed to brake from it to `final_speed`. Otherwise the
/// peak speed is found such that accelerating and then immediately
/// braking lands exactly on `final_speed` after `dist`.
pub fn target_speed_for_restriction(
    dist: f64,
    acceleration: f64,
    deceleration: f64,
    current_speed: f64,
    target_speed: f64,
    final_speed: f64,
) -> SpeedTarget {
    let time_decel = (target_speed - final_speed) / deceleration;
    let dist_decel = traveled_distance(target_speed, time_decel, -deceleration);

    // The peak speed solution below only applies while accelerating
    if acceleration <= 0.0 || current_speed >= target_speed {
        return SpeedTarget {
            target_speed,
            decel_dist: dist_decel,
        };
    }

    assert!(
        fuzzy_geq(target_speed, final_speed),
        "final speed must be smaller than target"
    );

    let time_accel = (target_speed - current_speed) / acceleration;
    let dist_accel = traveled_distance(current_speed, time_accel, acceleration);

    // There is enough distance to reach the target speed and cruise
    if dist_accel + dist_decel < dist {
        return SpeedTarget {
            target_speed,
            decel_dist: dist_decel,
        };
    }

    // Energy balance across the acceleration and deceleration legs
    let nom = 2.0 * acceleration * deceleration * dist
        + acceleration * final_speed * final_speed
        + deceleration * current_speed * current_speed;

    let v = (nom / (acceleration + deceleration)).sqrt();

    let time_decel = (v - final_speed) / deceleration;
    let dist_decel = traveled_distance(v, time_decel, -deceleration);

    SpeedTarget {
        target_speed: v,
        decel_dist: dist_decel,
    }
}

/// Calculates the distance at which deceleration needs to start and the
/// speed the train must be down to by then.
///
/// Scans the route ahead of the train within a bounded lookahead window
/// (the worst-case full-stop distance plus the current link's length) for
/// allowed speeds below the current speed. A link immediately following a
/// mandatory stop, and the synthetic link past the end of the route, force
/// an allowed speed of zero. The earliest binding restriction wins; its
/// target speed is committed into the train state and its restricted speed
/// written to the event.
///
/// Returns the deceleration distance measured from the train head, or
/// infinity if no restriction binds within the window (also while the
/// train is stopped).
pub fn decel_distance_and_speed(
    links: &LinkSet,
    current_link: &RailLink,
    event: &mut UpdateEvent,
) -> f64 {
    let state = &mut *event.state;
    debug_assert!(state.speed >= 0.0, "train speed must not be negative");

    if state.speed == 0.0 {
        return f64::INFINITY;
    }

    let assumed_speed = state.speed;
    let max_speed = f64::max(assumed_speed, state.allowed_max_speed);
    let deceleration = state.train().deceleration();

    // Lookahead window
    let window = traveled_distance(max_speed, max_speed / deceleration, -deceleration)
        + current_link.length();

    // Distance to the next speed change point (start of the next link)
    let mut dist = current_link.length() - state.head_position;

    let mut decel_dist = f64::INFINITY;
    let mut target_speed = state.target_speed;
    let mut speed = 0.0;

    for i in state.route_idx..=state.route().len() {
        let route = state.route();

        // The synthetic link past the route's end, where the train halts
        let (link_length, allowed) = if i == route.len() {
            (None, 0.0)
        } else {
            let link = &links[route[i]];
            // A link after a mandatory stop must be entered from standstill;
            // the train stops at the very end of the preceding link
            let allowed = if i > 0 && state.is_stop(route[i - 1]) {
                0.0
            } else {
                link.allowed_speed(state.train())
            };
            (Some(link.length()), allowed)
        };

        if allowed < assumed_speed {
            let target = target_speed_for_restriction(
                dist,
                state.acceleration,
                deceleration,
                state.speed,
                state.target_speed,
                allowed,
            );

            let new_decel_dist = dist - target.decel_dist;

            // Strictly smaller keeps the first candidate on ties
            if new_decel_dist < decel_dist {
                decel_dist = new_decel_dist;
                target_speed = target.target_speed;
                speed = allowed;
            }
        }

        if let Some(length) = link_length {
            dist += length;
        }

        // No need to look further than the distance needed for a full stop
        if dist >= window {
            break;
        }
    }

    state.target_speed = target_speed;
    event.new_speed = speed;

    if decel_dist.is_finite() {
        log::trace!(
            "{:?} must be at {} m/s after {} m, steering toward {} m/s",
            event.state.driver(),
            speed,
            decel_dist,
            target_speed
        );
        debug_speed_target(event.state.driver(), target_speed, decel_dist);
    }

    decel_dist
}
