//! Lane container for the simulation
//!
//! A lane owns the ordered sequence of vehicles sharing one lateral offset.
//! Vehicles are kept in descending-position order: index 0 is the vehicle
//! closest to the finish line. Insertions and removals preserve the order
//! directly; the sequence is never re-sorted wholesale.

use super::types::{SimConfig, VehicleClass};
use super::vehicle::SimVehicle;

/// One lane of traffic
#[derive(Debug, Clone)]
pub struct SimLane {
    /// Fixed sideways placement, read by the renderer only
    pub lateral_offset: f32,
    /// 1-based identifier, used for vehicle labels
    pub identifier: usize,
    /// Vehicles front to back, ordered by descending position
    pub vehicles: Vec<SimVehicle>,
    /// Count of vehicles ever spawned here, for label generation
    pub spawned: usize,
}

impl SimLane {
    pub fn new(identifier: usize, lateral_offset: f32) -> Self {
        Self {
            lateral_offset,
            identifier,
            vehicles: Vec::new(),
            spawned: 0,
        }
    }

    /// Spawn a vehicle of the given class at the back of the lane.
    ///
    /// An empty lane places the leading edge at the start line; otherwise the
    /// vehicle is placed `min_standing_distance` behind the rearmost vehicle.
    /// Appending at the back keeps the descending-position order.
    pub fn spawn_vehicle(&mut self, class: VehicleClass, config: &SimConfig) {
        let position = match self.vehicles.last() {
            Some(rearmost) => rearmost.position - config.min_standing_distance - class.length(),
            None => config.start_line - class.length(),
        };
        self.spawned += 1;
        let label = format!("{}-{}", self.identifier, self.spawned);
        self.vehicles.push(SimVehicle::from_class(class, position, label));
    }

    /// Whether the front-most vehicle's leading edge has reached the finish.
    pub fn leader_finished(&self, finish_line: f32) -> bool {
        self.vehicles
            .first()
            .is_some_and(|leader| leader.leading_edge() >= finish_line)
    }

    /// First index, scanning front to back, whose vehicle sits fully behind
    /// `position` with at least `clearance` to spare.
    ///
    /// This is the slot a merging vehicle at `position` could take, in front
    /// of the vehicle found. `None` when every vehicle in the lane is ahead
    /// of `position` or too close behind it.
    pub fn slot_behind(&self, position: f32, clearance: f32) -> Option<usize> {
        self.vehicles
            .iter()
            .position(|vehicle| vehicle.leading_edge() + clearance < position)
    }

    /// True when the descending-position order holds with no overlaps.
    pub fn is_ordered(&self) -> bool {
        self.vehicles
            .windows(2)
            .all(|pair| pair[1].leading_edge() < pair[0].position)
    }
}
