use crate::{LinkId, Train, TrainId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single track segment of the rail network.
///
/// Length and free speed are immutable after network construction;
/// the reservation flag is the only mutable field, written through
/// [RailNetwork](crate::RailNetwork) by the scheduler.
#[derive(Clone, Debug)]
pub struct RailLink {
    /// The link ID.
    id: LinkId,
    /// The length of the link in m.
    length: f64,
    /// The maximum speed permitted on the link in m/s.
    freespeed: f64,
    /// The driver currently holding an exclusive reservation, if any.
    reserved_by: Option<TrainId>,
}

/// The attributes of a rail link.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkAttributes {
    /// The length of the link in m; must be positive.
    pub length: f64,
    /// The maximum speed permitted on the link in m/s.
    pub freespeed: f64,
}

impl RailLink {
    /// Creates a new rail link.
    ///
    /// # Panics
    /// Panics if the length is not positive or the free speed is negative.
    pub(crate) fn new(id: LinkId, attribs: &LinkAttributes) -> Self {
        assert!(attribs.length > 0.0, "link length must be positive");
        assert!(attribs.freespeed >= 0.0, "link freespeed must not be negative");
        Self {
            id,
            length: attribs.length,
            freespeed: attribs.freespeed,
            reserved_by: None,
        }
    }

    /// Gets the link's ID.
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Gets the length of the link in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Gets the maximum speed permitted on the link in m/s.
    pub fn freespeed(&self) -> f64 {
        self.freespeed
    }

    /// Gets the speed the given train may travel on this link in m/s.
    pub fn allowed_speed(&self, train: &Train) -> f64 {
        f64::min(self.freespeed, train.max_speed())
    }

    /// The driver currently holding this link, if any.
    pub fn reserved_by(&self) -> Option<TrainId> {
        self.reserved_by
    }

    /// Whether this link is exclusively held by the given driver.
    pub fn is_blocked_by(&self, driver: TrainId) -> bool {
        self.reserved_by == Some(driver)
    }

    /// Whether no driver holds this link.
    pub fn is_free(&self) -> bool {
        self.reserved_by.is_none()
    }

    /// Records an exclusive reservation for the given driver.
    pub(crate) fn reserve(&mut self, driver: TrainId) {
        self.reserved_by = Some(driver);
    }

    /// Clears the reservation flag.
    pub(crate) fn clear_reservation(&mut self) {
        self.reserved_by = None;
    }
}
