//! Common traits defining interfaces for planners

use crate::common::error::PlanningError;
use crate::common::types::{Path2D, Point2D};

/// Trait for path planning algorithms
///
/// Stochastic planners advance an internal random stream, hence the
/// mutable receiver.
pub trait PathPlanner {
    /// Plan a path from start to goal
    fn plan(&mut self, start: Point2D, goal: Point2D) -> Result<Path2D, PlanningError>;
}
