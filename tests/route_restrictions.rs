//! Tests for the speed restriction scan over a train's route.

use assert_approx_eq::assert_approx_eq;
use rail_sim::{
    restriction, LinkAttributes, LinkId, RailNetwork, SimConfig, Train, TrainAttributes,
    TrainState, UpdateEvent,
};

fn add_link(network: &mut RailNetwork, length: f64, freespeed: f64) -> LinkId {
    network.add_link(&LinkAttributes { length, freespeed })
}

fn train(max_speed: f64, deceleration: f64) -> Train {
    Train::new(
        &TrainAttributes {
            max_speed,
            acceleration: Some(0.5),
            deceleration: Some(deceleration),
        },
        &SimConfig::default(),
    )
}

/// A train cruising at 10 m/s toward a mandatory stop at the end of its
/// current link must begin braking 50 m before the stop, down to zero.
#[test]
fn mandatory_stop_forces_halt() {
    let mut network = RailNetwork::new();
    let a = add_link(&mut network, 100.0, 10.0);
    let b = add_link(&mut network, 100.0, 10.0);
    let driver = network.add_driver();

    let mut state = TrainState::new(driver, train(10.0, 1.0), vec![a, b], network.links());
    state.add_stop(a);
    state.speed = 10.0;
    state.target_speed = 10.0;

    let mut event = UpdateEvent::new(&mut state);
    let decel_dist = restriction::decel_distance_and_speed(network.links(), network.link(a), &mut event);

    assert_approx_eq!(decel_dist, 50.0);
    assert_eq!(event.new_speed, 0.0);
}

/// The synthetic link past the end of the route has allowed speed zero,
/// so a train on its last link brakes to a halt at the route's end.
#[test]
fn route_end_forces_halt() {
    let mut network = RailNetwork::new();
    let a = add_link(&mut network, 100.0, 10.0);
    let driver = network.add_driver();

    let mut state = TrainState::new(driver, train(10.0, 1.0), vec![a], network.links());
    state.speed = 10.0;
    state.target_speed = 10.0;

    let mut event = UpdateEvent::new(&mut state);
    let decel_dist = restriction::decel_distance_and_speed(network.links(), network.link(a), &mut event);

    assert_approx_eq!(decel_dist, 50.0);
    assert_eq!(event.new_speed, 0.0);
}

/// No restriction is relevant while the train is stopped.
#[test]
fn stopped_train_has_no_restriction() {
    let mut network = RailNetwork::new();
    let a = add_link(&mut network, 100.0, 10.0);
    let driver = network.add_driver();

    let mut state = TrainState::new(driver, train(10.0, 1.0), vec![a], network.links());

    let mut event = UpdateEvent::new(&mut state);
    let decel_dist = restriction::decel_distance_and_speed(network.links(), network.link(a), &mut event);

    assert_eq!(decel_dist, f64::INFINITY);
}

/// A slower link ahead binds earlier than the route end and wins the
/// candidate selection.
#[test]
fn upcoming_speed_limit_binds_first() {
    let mut network = RailNetwork::new();
    let a = add_link(&mut network, 500.0, 20.0);
    let b = add_link(&mut network, 500.0, 5.0);
    let driver = network.add_driver();

    let mut state = TrainState::new(driver, train(20.0, 1.0), vec![a, b], network.links());
    state.speed = 20.0;
    state.target_speed = 20.0;

    let mut event = UpdateEvent::new(&mut state);
    let decel_dist = restriction::decel_distance_and_speed(network.links(), network.link(a), &mut event);

    // Braking from 20 to 5 m/s at 1 m/s^2 takes 187.5 m, so deceleration
    // starts 312.5 m ahead of the head
    assert_approx_eq!(decel_dist, 312.5);
    assert_approx_eq!(event.new_speed, 5.0);
    assert_approx_eq!(state.target_speed, 20.0);
}

/// An accelerating train that cannot reach its target speed before the
/// route end gets the peak speed committed as its new target.
#[test]
fn accelerating_train_gets_peak_target() {
    let mut network = RailNetwork::new();
    let a = add_link(&mut network, 100.0, 10.0);
    let driver = network.add_driver();

    let mut state = TrainState::new(
        driver,
        Train::new(
            &TrainAttributes {
                max_speed: 10.0,
                acceleration: Some(1.0),
                deceleration: Some(1.0),
            },
            &SimConfig::default(),
        ),
        vec![a],
        network.links(),
    );
    state.speed = 2.0;
    state.acceleration = 1.0;
    state.target_speed = 10.0;
    state.head_position = 50.0;

    let mut event = UpdateEvent::new(&mut state);
    let decel_dist = restriction::decel_distance_and_speed(network.links(), network.link(a), &mut event);

    // Peak speed v with v^2 = (2 * 50 + 2^2) / 2 = 52, braking over 26 m
    assert_approx_eq!(decel_dist, 24.0);
    assert_eq!(event.new_speed, 0.0);
    assert_approx_eq!(state.target_speed, 52.0_f64.sqrt());
}
