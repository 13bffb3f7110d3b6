//! Standalone lane simulation module
//!
//! All the core simulation logic: vehicle kinematics, the car-following
//! control law, lane containers, the lane-change evaluator, and the tick
//! driver. It runs headless and can be tested without any rendering.

mod lane;
mod lane_change;
mod run_state;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
pub use lane::SimLane;
pub use lane_change::{evaluate_lane_change, LaneChange};
pub use run_state::RunState;
pub use types::{SimConfig, SimError, VehicleClass};
pub use vehicle::{follow_action, FollowAction, SimVehicle};
pub use world::SimWorld;
