//! Decides when more track must be reserved ahead of a train and which
//! links make up the block to request.

use crate::kinematics::traveled_distance;
use crate::{LinkId, LinkSet, RailLink, TrainState};
use smallvec::SmallVec;

/// Extra margin applied to the full-stop braking distance.
///
/// Covers the unhandled case of a train stopping exactly before a link
/// that could not be reserved.
const SAFETY_FACTOR: f64 = 1.5;

/// The full-stop braking distance at the currently allowed maximum speed,
/// scaled by the safety factor.
fn safety_distance(state: &TrainState) -> f64 {
    let assumed_speed = state.allowed_max_speed;
    let deceleration = state.train().deceleration();
    let stop_time = assumed_speed / deceleration;

    assert!(stop_time >= 0.0, "stop time can not be negative");

    traveled_distance(assumed_speed, stop_time, -deceleration) * SAFETY_FACTOR
}

/// Calculates the travel distance after which reservations should be
/// updated, measured from the train's head position.
///
/// Walks the route ahead of the head; the first link not yet held by this
/// driver puts the trigger at the distance to that link minus the safety
/// distance. Returns infinity if every link within the safety envelope is
/// already reserved, or the route ends inside it, meaning the check can
/// happen at a later point.
pub fn next_reservation_distance(
    links: &LinkSet,
    state: &TrainState,
    current_link: &RailLink,
) -> f64 {
    let safety = safety_distance(state);

    let mut dist = current_link.length() - state.head_position;
    let mut idx = state.route_idx;

    loop {
        let Some(link_id) = state.route().get(idx) else {
            break;
        };
        let next_link = &links[*link_id];

        if !next_link.is_blocked_by(state.driver()) {
            return dist - safety;
        }

        dist += next_link.length();
        idx += 1;

        if dist > safety {
            break;
        }
    }

    // No need to reserve yet
    f64::INFINITY
}

/// Calculates the links that need to be blocked ahead of the train,
/// or otherwise a stop needs to be initiated.
///
/// Accumulates consecutive route links from `idx` onward until their
/// combined length covers the safety distance plus the train's head
/// position, or the route ends. This is the candidate set only; the
/// scheduler commits it atomically against the reservation registry.
pub fn links_to_block(links: &LinkSet, mut idx: usize, state: &TrainState) -> SmallVec<[LinkId; 8]> {
    let safety = safety_distance(state) + state.head_position;

    let mut result = SmallVec::new();
    let mut reserved = 0.0;

    while reserved < safety && idx < state.route().len() {
        let link_id = state.route()[idx];
        result.push(link_id);
        reserved += links[link_id].length();
        idx += 1;
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{LinkAttributes, RailNetwork, SimConfig, Train, TrainAttributes};
    use assert_approx_eq::assert_approx_eq;

    fn test_train() -> Train {
        // Full stop from 10 m/s takes 100 m; safety distance is 150 m
        Train::new(
            &TrainAttributes {
                max_speed: 10.0,
                acceleration: Some(0.5),
                deceleration: Some(0.5),
            },
            &SimConfig::default(),
        )
    }

    #[test]
    fn safety_distance_scales_stopping_distance() {
        let mut network = RailNetwork::new();
        let link = network.add_link(&LinkAttributes {
            length: 500.0,
            freespeed: 30.0,
        });
        let driver = network.add_driver();
        let state = TrainState::new(driver, test_train(), vec![link], network.links());
        assert_approx_eq!(safety_distance(&state), 150.0);
    }

    #[test]
    fn blocks_links_until_safety_covered() {
        let mut network = RailNetwork::new();
        let route: Vec<_> = (0..5)
            .map(|_| {
                network.add_link(&LinkAttributes {
                    length: 60.0,
                    freespeed: 30.0,
                })
            })
            .collect();
        let driver = network.add_driver();
        let state = TrainState::new(driver, test_train(), route.clone(), network.links());

        // 150 m of safety requires three 60 m links
        let blocks = links_to_block(network.links(), 0, &state);
        assert_eq!(blocks.as_slice(), &route[..3]);

        // A head position inside the first link extends the envelope
        let mut state = state;
        state.head_position = 40.0;
        let blocks = links_to_block(network.links(), 0, &state);
        assert_eq!(blocks.as_slice(), &route[..4]);
    }

    #[test]
    fn blocks_stop_at_route_end() {
        let mut network = RailNetwork::new();
        let route: Vec<_> = (0..2)
            .map(|_| {
                network.add_link(&LinkAttributes {
                    length: 60.0,
                    freespeed: 30.0,
                })
            })
            .collect();
        let driver = network.add_driver();
        let state = TrainState::new(driver, test_train(), route.clone(), network.links());

        let blocks = links_to_block(network.links(), 0, &state);
        assert_eq!(blocks.as_slice(), route.as_slice());
    }
}
