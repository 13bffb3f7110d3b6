//! Vehicle kinematics and the car-following control law
//!
//! A vehicle is pure kinematic state; lane membership is owned by the lane
//! containers, so a vehicle can be handed from one lane to another.

use super::types::{SimConfig, VehicleClass};

/// What a follower should do about the vehicle ahead of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    /// The follower overlaps its predecessor; both must halt
    Collision,
    /// Too close, apply the braking constant
    Brake,
    /// Open road ahead, apply the vehicle's top acceleration
    Accelerate,
    /// Gap is inside the safe band, coast
    Hold,
}

/// Maps the gap to the vehicle ahead onto a follow action.
///
/// Branches are evaluated in this order: collision, too close, open road,
/// in-band hold. `gap` is the clearance between the follower's leading edge
/// and the predecessor's rear edge.
pub fn follow_action(gap: f32, config: &SimConfig) -> FollowAction {
    if gap <= 0.0 {
        FollowAction::Collision
    } else if gap < config.min_safe_distance {
        FollowAction::Brake
    } else if gap > config.max_safe_distance {
        FollowAction::Accelerate
    } else {
        FollowAction::Hold
    }
}

/// A vehicle in the lane simulation
#[derive(Debug, Clone)]
pub struct SimVehicle {
    /// Rear-edge coordinate along the direction of travel; the leading edge
    /// is `position + length`
    pub position: f32,
    pub length: f32,
    pub width: f32,
    /// Always within `0..=top_speed`
    pub speed: f32,
    /// Current control input, set by the follow law or the braking constant
    pub acceleration: f32,
    pub top_speed: f32,
    pub top_acceleration: f32,
    /// Display-only label, e.g. "2-1" for the first vehicle spawned in lane 2
    pub label: String,
    /// Display-only color name, opaque to the simulation
    pub color: &'static str,
}

impl SimVehicle {
    /// Create a stationary vehicle of the given class at a position.
    pub fn from_class(class: VehicleClass, position: f32, label: String) -> Self {
        Self {
            position,
            length: class.length(),
            width: class.width(),
            speed: 0.0,
            acceleration: 0.0,
            top_speed: class.top_speed(),
            top_acceleration: class.top_acceleration(),
            label,
            color: class.color(),
        }
    }

    /// Front edge in the direction of travel
    pub fn leading_edge(&self) -> f32 {
        self.position + self.length
    }

    /// One tick of motion: move at the current speed, then fold the current
    /// acceleration into the speed, clamped to `0..=top_speed`.
    pub fn advance(&mut self) {
        self.position += self.speed;
        self.speed = (self.speed + self.acceleration).clamp(0.0, self.top_speed);
    }
}
