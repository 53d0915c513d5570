//! Error types for marine_planner

use std::fmt;

/// Main error type for planning operations
///
/// An exhausted search is not an error: the planner returns an empty
/// path with infinite cost in that case. Only invalid inputs fail hard.
#[derive(Debug)]
pub enum PlanningError {
    /// Start or goal outside the workspace or inside an obstacle
    InvalidEndpoint(String),
    /// Degenerate workspace rectangle
    InvalidWorkspace(String),
    /// Non-positive iteration budget, step size, or swarm size
    InvalidConfig(String),
}

impl fmt::Display for PlanningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningError::InvalidEndpoint(msg) => write!(f, "Invalid endpoint: {}", msg),
            PlanningError::InvalidWorkspace(msg) => write!(f, "Invalid workspace: {}", msg),
            PlanningError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for PlanningError {}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanningError::InvalidEndpoint("start is inside an obstacle".to_string());
        assert_eq!(format!("{}", err), "Invalid endpoint: start is inside an obstacle");
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PlanningError::InvalidConfig("max_iterations must be at least 1".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
