//! Utility modules for marine_planner

pub mod visualization;

pub use visualization::{colors, plot_scene};
