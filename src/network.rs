use crate::debug::debug_reservation;
use crate::link::{LinkAttributes, RailLink};
use crate::{LinkId, LinkSet, TrainId};
use slotmap::SlotMap;

/// The static rail network together with its track-ownership registry.
///
/// Link lengths and free speeds are immutable once added; the only
/// mutation after construction is the per-link reservation flag, and all
/// of it goes through this type so the at-most-one-driver-per-link
/// invariant holds. The engine calculations themselves never reserve or
/// release anything; the scheduler commits the candidate sets computed by
/// [reservation::links_to_block](crate::reservation::links_to_block) here.
#[derive(Default)]
pub struct RailNetwork {
    /// The links in the network.
    links: LinkSet,
    /// The registered drivers.
    drivers: SlotMap<TrainId, ()>,
}

impl RailNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a link to the network.
    pub fn add_link(&mut self, attribs: &LinkAttributes) -> LinkId {
        self.links.insert_with_key(|id| RailLink::new(id, attribs))
    }

    /// Registers a new driver identity.
    pub fn add_driver(&mut self) -> TrainId {
        self.drivers.insert(())
    }

    /// Removes a driver, releasing every link reservation it holds.
    /// Used when a train completes its route or is removed mid-route.
    pub fn remove_driver(&mut self, driver: TrainId) {
        self.release_all(driver);
        self.drivers.remove(driver);
    }

    /// Gets a reference to the link with the given ID.
    pub fn link(&self, id: LinkId) -> &RailLink {
        &self.links[id]
    }

    /// Gets the links in the network.
    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    /// Attempts to reserve a single link for the given driver.
    /// Succeeds if the link is free or already held by the same driver.
    pub fn try_reserve(&mut self, id: LinkId, driver: TrainId) -> bool {
        let link = &mut self.links[id];
        match link.reserved_by() {
            None => {
                link.reserve(driver);
                true
            }
            Some(holder) => holder == driver,
        }
    }

    /// Attempts to reserve all the given links for the driver, atomically.
    ///
    /// Either every link is held by the driver afterwards and `true` is
    /// returned, or no additional link is held and `false` is returned;
    /// links the driver already held are untouched by the rollback.
    /// On denial the scheduler retries after its configured poll interval.
    pub fn try_reserve_all(&mut self, ids: &[LinkId], driver: TrainId) -> bool {
        let mut acquired = Vec::new();
        for id in ids {
            let link = &mut self.links[*id];
            match link.reserved_by() {
                None => {
                    link.reserve(driver);
                    acquired.push(*id);
                }
                Some(holder) if holder == driver => {}
                Some(_) => {
                    for id in acquired {
                        self.links[id].clear_reservation();
                    }
                    log::debug!("reservation denied for {:?} at {:?}", driver, id);
                    debug_reservation(driver, false, ids.len());
                    return false;
                }
            }
        }
        debug_reservation(driver, true, ids.len());
        true
    }

    /// Releases a link held by the given driver.
    /// Reservations held by other drivers are left untouched.
    pub fn release(&mut self, id: LinkId, driver: TrainId) {
        let link = &mut self.links[id];
        if link.is_blocked_by(driver) {
            link.clear_reservation();
        }
    }

    /// Releases every link held by the given driver.
    pub fn release_all(&mut self, driver: TrainId) {
        for (_, link) in &mut self.links {
            if link.is_blocked_by(driver) {
                link.clear_reservation();
            }
        }
    }
}
