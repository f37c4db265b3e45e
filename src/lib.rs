//! Two-ball free fall and horizontal launch simulator.
//!
//! [`simulate`](crate::core::motion::simulate) turns a [`SimulationConfig`](crate::core::motion::SimulationConfig) into a
//! fixed-step [`Trajectory`](crate::core::motion::Trajectory); everything else in the crate
//! (experiment setup, playback timing, charts, the interactive viewer) only
//! reads trajectories.

pub mod core;
