//! Core types for the lane simulation
//!
//! Configuration record, vehicle class presets, and the error conditions
//! surfaced by the public API.

use thiserror::Error;

/// Errors surfaced by the simulation API.
///
/// Collisions and finish-line crossings are not errors; they are terminal
/// state transitions observable through the run state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// A lane index outside the current lane set was given.
    #[error("lane index {index} is out of range ({lanes} lanes)")]
    InvalidLane { index: usize, lanes: usize },

    /// A restore was requested but no usable snapshot exists. Distinct from
    /// a legitimate empty-lane reset.
    #[error("no snapshot available to restore")]
    NoSnapshot,
}

/// Built-in vehicle classes
///
/// The two classes differ in length, top speed, top acceleration, and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Small,
    Big,
}

impl VehicleClass {
    pub fn length(&self) -> f32 {
        match self {
            VehicleClass::Small => 22.0,
            VehicleClass::Big => 280.0,
        }
    }

    pub fn width(&self) -> f32 {
        20.0
    }

    pub fn top_speed(&self) -> f32 {
        match self {
            VehicleClass::Small => 1.2,
            VehicleClass::Big => 1.0,
        }
    }

    pub fn top_acceleration(&self) -> f32 {
        match self {
            VehicleClass::Small => 6.0,
            VehicleClass::Big => 3.0,
        }
    }

    /// Display-only color name, opaque to the simulation core.
    pub fn color(&self) -> &'static str {
        match self {
            VehicleClass::Small => "green",
            VehicleClass::Big => "red",
        }
    }
}

/// Tunable constants for a simulation run
///
/// Supplied at construction rather than hard-coded so a layout can be tested
/// with whatever thresholds the test needs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Gap below which a follower brakes
    pub min_safe_distance: f32,
    /// Gap above which a follower accelerates
    pub max_safe_distance: f32,
    /// Spacing left behind the rearmost vehicle when spawning
    pub min_standing_distance: f32,
    /// Fixed braking acceleration, negative
    pub braking_acceleration: f32,
    /// Coordinate at which a lane is complete
    pub finish_line: f32,
    /// Leading-edge coordinate for a vehicle spawned into an empty lane
    pub start_line: f32,
    /// Whether vehicles may relocate to adjacent lanes
    pub lane_changes_enabled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            min_safe_distance: 15.0,
            max_safe_distance: 20.0,
            min_standing_distance: 10.0,
            braking_acceleration: -0.5,
            finish_line: 100.0,
            start_line: 0.0,
            lane_changes_enabled: true,
        }
    }
}
