use crate::TrainId;
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

/// Records a committed speed target for a train.
#[allow(unused)]
pub fn debug_speed_target(driver: TrainId, target_speed: f64, decel_dist: f64) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "speed_target",
            "driver": format!("{:?}", driver),
            "target_speed": target_speed,
            "decel_dist": decel_dist,
        }))
    })
}

/// Records the outcome of a block reservation attempt.
#[allow(unused)]
pub fn debug_reservation(driver: TrainId, granted: bool, num_links: usize) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "reservation",
            "driver": format!("{:?}", driver),
            "granted": granted,
            "num_links": num_links,
        }))
    })
}

/// Takes the debugging records accumulated since the last call, as a JSON array.
#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
