//! Lane-change evaluation
//!
//! Pure decision logic: given a vehicle, its same-lane predecessor, and the
//! adjacent lanes, score every feasible relocation against staying put and
//! pick the best. The caller executes the move.

use ordered_float::OrderedFloat;

use super::lane::SimLane;
use super::types::SimConfig;
use super::vehicle::SimVehicle;

/// A relocation selected by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneChange {
    /// Index of the target lane in the world's lane list
    pub lane: usize,
    /// Position in the target lane's vehicle sequence to insert at
    pub insert_at: usize,
}

/// A scored relocation option. `target` is `None` for the stay candidate.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    target: Option<LaneChange>,
    distance: f32,
    speed: f32,
}

impl Candidate {
    /// A slot with nothing ahead of it: unbounded road, guaranteed preferred.
    fn open_road(target: Option<LaneChange>) -> Self {
        Self {
            target,
            distance: f32::INFINITY,
            speed: f32::INFINITY,
        }
    }

    /// Ranking score, higher is better: distance over speed of the nearest
    /// obstruction ahead. A zero-speed obstruction is ranked by distance
    /// alone so a stalled vehicle never scores as attractive through an
    /// infinite quotient. Open road scores infinite outright.
    fn score(&self) -> OrderedFloat<f32> {
        if !self.distance.is_finite() {
            OrderedFloat(f32::INFINITY)
        } else if self.speed == 0.0 {
            OrderedFloat(self.distance)
        } else {
            OrderedFloat(self.distance / self.speed)
        }
    }
}

/// Evaluate whether `curr` should leave its lane.
///
/// `neighbors` holds the adjacent lanes as (world index, lane) pairs, nearest
/// first. Returns the relocation to perform, or `None` to stay. Ties go to
/// the incumbent: stay beats an equal-scored move, and among moves the
/// earlier-listed lane wins.
pub fn evaluate_lane_change(
    curr: &SimVehicle,
    ahead: &SimVehicle,
    neighbors: &[(usize, &SimLane)],
    config: &SimConfig,
) -> Option<LaneChange> {
    let gap = ahead.position - curr.position - curr.length;
    let stay = Candidate {
        target: None,
        distance: gap,
        speed: ahead.speed,
    };

    let mut best = stay;
    for &(lane_index, lane) in neighbors {
        for candidate in lane_candidates(curr, lane_index, lane, config) {
            if candidate.score() > best.score() {
                best = candidate;
            }
        }
    }
    best.target
}

/// Build the feasible candidates for one adjacent lane.
fn lane_candidates(
    curr: &SimVehicle,
    lane_index: usize,
    lane: &SimLane,
    config: &SimConfig,
) -> Vec<Candidate> {
    // An empty lane is an unbounded slot; nothing else to scan.
    if lane.vehicles.is_empty() {
        return vec![Candidate::open_road(Some(LaneChange {
            lane: lane_index,
            insert_at: 0,
        }))];
    }

    let mut candidates = Vec::new();

    if let Some(slot) = lane.slot_behind(curr.position, config.max_safe_distance) {
        if slot == 0 {
            // Nothing ahead of the insertion point.
            candidates.push(Candidate::open_road(Some(LaneChange {
                lane: lane_index,
                insert_at: 0,
            })));
        } else if let Some(candidate) =
            slot_candidate(curr, &lane.vehicles[slot - 1], lane_index, slot, config)
        {
            candidates.push(candidate);
        }
    }

    // The very end of the lane is always worth testing: slipping in behind
    // the rearmost vehicle may be the only opening.
    let last = &lane.vehicles[lane.vehicles.len() - 1];
    if let Some(candidate) =
        slot_candidate(curr, last, lane_index, lane.vehicles.len(), config)
    {
        candidates.push(candidate);
    }

    candidates
}

/// Candidate for inserting behind `in_front`, if `curr` clears it.
fn slot_candidate(
    curr: &SimVehicle,
    in_front: &SimVehicle,
    lane_index: usize,
    insert_at: usize,
    config: &SimConfig,
) -> Option<Candidate> {
    if curr.leading_edge() + config.max_safe_distance < in_front.position {
        Some(Candidate {
            target: Some(LaneChange {
                lane: lane_index,
                insert_at,
            }),
            distance: in_front.position - curr.leading_edge(),
            speed: in_front.speed,
        })
    } else {
        None
    }
}
