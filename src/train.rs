use crate::{LinkId, LinkSet, SimConfig, TrainId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The immutable physical profile of a train.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Train {
    /// The maximum speed of the train in m/s.
    max_speed: f64,
    /// The maximum acceleration of the train in m/s^2.
    acceleration: f64,
    /// The maximum deceleration of the train, a positive number in m/s^2.
    deceleration: f64,
}

/// The attributes of a train.
///
/// Acceleration and deceleration fall back to the global defaults in
/// [SimConfig] when not given, resolved once at train creation.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrainAttributes {
    /// The maximum speed of the train in m/s.
    pub max_speed: f64,
    /// The maximum acceleration in m/s^2, if the train has its own value.
    pub acceleration: Option<f64>,
    /// The maximum deceleration in m/s^2 (positive), if the train has its own value.
    pub deceleration: Option<f64>,
}

impl Train {
    /// Creates a train profile, resolving missing attributes from the config.
    ///
    /// # Panics
    /// Panics if any resolved value is not strictly positive.
    pub fn new(attribs: &TrainAttributes, config: &SimConfig) -> Self {
        config.check();
        let acceleration = attribs.acceleration.unwrap_or(config.default_acceleration);
        let deceleration = attribs.deceleration.unwrap_or(config.default_deceleration);
        assert!(attribs.max_speed > 0.0, "train max speed must be positive");
        assert!(acceleration > 0.0, "train acceleration must be positive");
        assert!(deceleration > 0.0, "train deceleration must be positive");
        Self {
            max_speed: attribs.max_speed,
            acceleration,
            deceleration,
        }
    }

    /// The maximum speed of the train in m/s.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// The maximum acceleration of the train in m/s^2.
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// The maximum deceleration of the train, a positive number in m/s^2.
    pub fn deceleration(&self) -> f64 {
        self.deceleration
    }
}

/// The mutable kinematic state of a dispatched train.
///
/// Owned by the scheduler and passed by mutable reference into the engine.
/// The head of the train is on `route[route_idx - 1]`; `route_idx` is the
/// index of the next route link ahead of the head.
#[derive(Clone, Debug)]
pub struct TrainState {
    /// The driver identity, used for link reservations.
    driver: TrainId,
    /// The physical profile of the train.
    train: Train,
    /// The ordered links the train traverses to its destination.
    route: Vec<LinkId>,
    /// The links at whose end the train must come to a full halt.
    stops: Vec<LinkId>,
    /// The current speed in m/s; never negative.
    pub speed: f64,
    /// The current acceleration in m/s^2;
    /// positive while speeding up, negative while braking, zero when constant.
    pub acceleration: f64,
    /// The speed the train is currently steering toward in m/s.
    pub target_speed: f64,
    /// The maximum speed currently allowed in m/s.
    pub allowed_max_speed: f64,
    /// The position of the train head along the current link in m.
    pub head_position: f64,
    /// The index into the route of the next link ahead of the head.
    pub route_idx: usize,
}

impl TrainState {
    /// Creates the state of a freshly dispatched train at the start of its route.
    ///
    /// # Panics
    /// Panics if the route is empty or contains a link not in the network.
    pub fn new(driver: TrainId, train: Train, route: Vec<LinkId>, links: &LinkSet) -> Self {
        assert!(!route.is_empty(), "train route must not be empty");
        for id in &route {
            assert!(links.contains_key(*id), "route link not in network");
        }
        let allowed_max_speed = links[route[0]].allowed_speed(&train);
        Self {
            driver,
            train,
            route,
            stops: vec![],
            speed: 0.0,
            acceleration: 0.0,
            target_speed: 0.0,
            allowed_max_speed,
            head_position: 0.0,
            route_idx: 1,
        }
    }

    /// Gets the driver identity.
    pub fn driver(&self) -> TrainId {
        self.driver
    }

    /// Gets the physical profile of the train.
    pub fn train(&self) -> &Train {
        &self.train
    }

    /// Gets the train's route.
    pub fn route(&self) -> &[LinkId] {
        &self.route
    }

    /// The link the train head is currently on.
    pub fn current_link(&self) -> LinkId {
        debug_assert!(self.route_idx >= 1 && self.route_idx <= self.route.len());
        self.route[self.route_idx - 1]
    }

    /// Marks a route link as a mandatory stop.
    /// The train halts at the very end of the link.
    pub fn add_stop(&mut self, link: LinkId) {
        if !self.stops.contains(&link) {
            self.stops.push(link);
        }
    }

    /// Whether the given link is a mandatory stop for this train.
    pub fn is_stop(&self, link: LinkId) -> bool {
        self.stops.contains(&link)
    }

    /// Checks whether the head has travelled past the end of the current link,
    /// and if so, advances it onto the next route link.
    /// Returns the link that was left, so its reservation can be released.
    pub fn advance(&mut self, links: &LinkSet) -> Option<LinkId> {
        let current = self.current_link();
        let length = links[current].length();
        if self.head_position >= length && self.route_idx < self.route.len() {
            self.head_position -= length;
            self.route_idx += 1;
            return Some(current);
        }
        None
    }
}

/// A pending train update exchanged with the scheduler.
///
/// Carries the state being updated and an output slot for the speed
/// the train must switch to once the computed deceleration completes.
pub struct UpdateEvent<'a> {
    /// The train state being updated.
    pub state: &'a mut TrainState,
    /// The speed in m/s the upcoming restriction limits the train to.
    pub new_speed: f64,
}

impl<'a> UpdateEvent<'a> {
    /// Creates an update event for the given train.
    pub fn new(state: &'a mut TrainState) -> Self {
        Self {
            state,
            new_speed: 0.0,
        }
    }
}
