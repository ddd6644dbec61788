// src/pathfinding/mod.rs
pub mod astar;

pub use astar::{find_path, path_to_runs, GridPathfinder};
