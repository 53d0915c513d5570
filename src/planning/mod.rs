//! Hybrid sampling-based planning module
//!
//! The planner combines three cooperating pieces:
//! - a bidirectional RRT* search over two arena-backed trees
//! - an adaptive sampler mixing five weighted strategies
//! - a particle swarm that shortens every path the trees produce

pub mod tree;
pub mod sampling;
pub mod swarm;
pub mod hybrid;

// Re-exports for convenience
pub use tree::{PathTree, TreeNode};
pub use sampling::{AdaptiveSampler, SamplingWeights};
pub use swarm::PathRefiner;
pub use hybrid::{HybridPlanner, HybridPlannerConfig, PlannerStats, PlanningOutcome};
