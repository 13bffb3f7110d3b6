//! Lane Simulation Library
//!
//! A discrete-time, lane-based traffic simulation with a car-following
//! control law and overtaking. The core runs headless; the binary provides
//! a terminal harness that drives the tick loop and renders the lanes.

pub mod simulation;
