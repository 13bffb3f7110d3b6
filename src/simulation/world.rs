//! Main simulation world that ties everything together
//!
//! Owns the lane set, the run state, and the pre-run snapshot, and drives
//! one synchronized tick across all lanes per invocation.

use log::{debug, info, warn};

use super::lane::SimLane;
use super::lane_change::evaluate_lane_change;
use super::run_state::RunState;
use super::types::{SimConfig, SimError, VehicleClass};
use super::vehicle::{follow_action, FollowAction};

/// The main simulation world
///
/// Mutated only by the state-machine transitions and by `tick`; the external
/// trigger (one invocation per display refresh) calls `tick` and then reads
/// `lanes` for rendering.
pub struct SimWorld {
    /// Run configuration, fixed for the world's lifetime
    pub config: SimConfig,
    /// Current run state
    pub state: RunState,
    /// The live, mutable lane set, in adjacency order
    pub lanes: Vec<SimLane>,
    /// Deep copy of the lane set taken when the run starts
    snapshot: Option<Vec<SimLane>>,
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimWorld {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            state: RunState::NotStarted,
            lanes: Vec::new(),
            snapshot: None,
        }
    }

    /// Append a lane and return its index. Adjacency follows lane indices:
    /// lane `i` neighbors lanes `i - 1` and `i + 1`.
    pub fn add_lane(&mut self, lateral_offset: f32) -> usize {
        let identifier = self.lanes.len() + 1;
        self.lanes.push(SimLane::new(identifier, lateral_offset));
        self.lanes.len() - 1
    }

    /// Spawn a vehicle of the given class at the back of a lane.
    pub fn add_vehicle(&mut self, lane_index: usize, class: VehicleClass) -> Result<(), SimError> {
        let lane_count = self.lanes.len();
        let lane = self
            .lanes
            .get_mut(lane_index)
            .ok_or(SimError::InvalidLane {
                index: lane_index,
                lanes: lane_count,
            })?;
        lane.spawn_vehicle(class, &self.config);
        Ok(())
    }

    /// Begin a run: snapshot the lane set, then start ticking.
    pub fn start(&mut self) {
        if self.state != RunState::NotStarted {
            warn!("start ignored while {}", self.state);
            return;
        }
        self.snapshot = Some(self.snapshot_lanes());
        self.state = RunState::Running;
        info!("simulation started with {} lanes", self.lanes.len());
    }

    /// Suspend ticking; positions and snapshot are untouched.
    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            warn!("pause ignored while {}", self.state);
            return;
        }
        self.state = RunState::Paused;
        info!("simulation paused");
    }

    /// Resume ticking after a pause.
    pub fn resume(&mut self) {
        if self.state != RunState::Paused {
            warn!("resume ignored while {}", self.state);
            return;
        }
        self.state = RunState::Running;
        info!("simulation resumed");
    }

    /// Put every vehicle back where the run began. The stored snapshot is
    /// kept so the run can be replayed again.
    pub fn stop_to_start(&mut self) -> Result<(), SimError> {
        let snapshot = self.snapshot.clone().ok_or(SimError::NoSnapshot)?;
        self.restore_lanes(snapshot)?;
        self.state = RunState::NotStarted;
        info!("lane set restored to the pre-run snapshot");
        Ok(())
    }

    /// Full reset: discard vehicles, lanes, and the snapshot.
    pub fn reset(&mut self) {
        self.lanes.clear();
        self.snapshot = None;
        self.state = RunState::NotStarted;
        info!("full reset, lanes and snapshot discarded");
    }

    /// Deep copy of the live lane set.
    pub fn snapshot_lanes(&self) -> Vec<SimLane> {
        self.lanes.clone()
    }

    /// Replace the live lane set with a previously taken snapshot.
    pub fn restore_lanes(&mut self, snapshot: Vec<SimLane>) -> Result<(), SimError> {
        if snapshot.is_empty() {
            return Err(SimError::NoSnapshot);
        }
        self.lanes = snapshot;
        Ok(())
    }

    /// One-line digest of the world state.
    pub fn summary(&self) -> String {
        let vehicles: usize = self.lanes.iter().map(|lane| lane.vehicles.len()).sum();
        format!(
            "State: {} | Lanes: {} | Vehicles: {} | Control: {}",
            self.state,
            self.lanes.len(),
            vehicles,
            self.state.control_label()
        )
    }

    /// Advance the simulation by one time unit if it is running.
    ///
    /// Lanes are stepped in index order. A terminal condition (collision or
    /// finish) flips the state to Stopped immediately, but the state is only
    /// consulted here, between ticks, so the remaining lanes still complete
    /// the current tick.
    pub fn tick(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        for lane_index in 0..self.lanes.len() {
            self.step_lane(lane_index);
        }
    }

    /// Step every vehicle in one lane.
    ///
    /// The cursor is not advanced after a relocation: the vacated slot now
    /// holds the next vehicle, which must be processed in the same pass. A
    /// vehicle that relocates into a lane not yet visited this tick is
    /// stepped again with that lane; one that relocates backward waits for
    /// the next tick. Lanes are never revisited within a tick, which keeps
    /// per-tick cost bounded and rules out migration loops.
    fn step_lane(&mut self, lane_index: usize) {
        let finish = self.config.finish_line;

        if self.lanes[lane_index].leader_finished(finish) {
            info!("lane {} finished", self.lanes[lane_index].identifier);
            self.state = RunState::Stopped;
            return;
        }

        let mut index = 0;
        while index < self.lanes[lane_index].vehicles.len() {
            let lead = index == 0;
            {
                let vehicle = &mut self.lanes[lane_index].vehicles[index];
                vehicle.advance();
                if lead {
                    // Nothing ahead of the leader: open road at top speed.
                    vehicle.speed = vehicle.top_speed;
                }
            }
            if lead {
                index += 1;
                continue;
            }

            if self.config.lane_changes_enabled
                && self.lanes[lane_index].vehicles[index].leading_edge() < finish
            {
                let decision = {
                    let lane = &self.lanes[lane_index];
                    let curr = &lane.vehicles[index];
                    let ahead = &lane.vehicles[index - 1];
                    let mut neighbors: Vec<(usize, &SimLane)> = Vec::with_capacity(2);
                    if lane_index > 0 {
                        neighbors.push((lane_index - 1, &self.lanes[lane_index - 1]));
                    }
                    if lane_index + 1 < self.lanes.len() {
                        neighbors.push((lane_index + 1, &self.lanes[lane_index + 1]));
                    }
                    evaluate_lane_change(curr, ahead, &neighbors, &self.config)
                };

                if let Some(change) = decision {
                    // Remove and insert back-to-back: no observer can see the
                    // vehicle in zero or two lanes.
                    let vehicle = self.lanes[lane_index].vehicles.remove(index);
                    debug!(
                        "{} moves from lane {} to lane {}",
                        vehicle.label,
                        self.lanes[lane_index].identifier,
                        self.lanes[change.lane].identifier
                    );
                    self.lanes[change.lane].vehicles.insert(change.insert_at, vehicle);
                    continue;
                }
            }

            let (front, back) = self.lanes[lane_index].vehicles.split_at_mut(index);
            let ahead = &mut front[index - 1];
            let curr = &mut back[0];
            let gap = ahead.position - curr.position - curr.length;
            match follow_action(gap, &self.config) {
                FollowAction::Collision => {
                    warn!("{} collided with {}", curr.label, ahead.label);
                    ahead.speed = 0.0;
                    ahead.acceleration = 0.0;
                    curr.speed = 0.0;
                    curr.acceleration = 0.0;
                    self.state = RunState::Stopped;
                }
                FollowAction::Brake => curr.acceleration = self.config.braking_acceleration,
                FollowAction::Accelerate => curr.acceleration = curr.top_acceleration,
                FollowAction::Hold => curr.acceleration = 0.0,
            }
            index += 1;
        }
    }
}
