pub use config::SimConfig;
pub use link::{LinkAttributes, RailLink};
pub use network::RailNetwork;
pub use restriction::SpeedTarget;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use train::{Train, TrainAttributes, TrainState, UpdateEvent};

mod config;
mod debug;
pub mod kinematics;
mod link;
mod network;
pub mod reservation;
pub mod restriction;
mod train;
mod util;

#[cfg(feature = "debug")]
pub use debug::take_debug_frame;

new_key_type! {
    /// Unique ID of a [RailLink].
    pub struct LinkId;
    /// Unique ID of a train driver.
    pub struct TrainId;
}

/// The rail links of a static network, indexed by [LinkId].
pub type LinkSet = SlotMap<LinkId, RailLink>;
