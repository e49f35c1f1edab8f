//! Ready-made decision problems, used by the binaries, tests and benchmarks.

pub mod gridworld;
pub mod party;

pub use gridworld::{gridworld, render_policy, Cell, GridworldConfig, Move, Teleport};
pub use party::{party, Activity, Health};
