//! Canonical benchmark maps for the hybrid planner
//!
//! Four obstacle layouts in a 400 x 350 workspace, crossed corner to
//! corner. They double as fixtures for the end-to-end tests and as the
//! scenes driven by the demo binary.

use crate::common::{Point2D, Polygon, Workspace};

/// Workspace shared by all benchmark maps
pub fn benchmark_workspace() -> Workspace {
    Workspace::new(0.0, 400.0, 0.0, 350.0)
}

/// Start and goal positions shared by all benchmark maps
pub fn benchmark_endpoints() -> (Point2D, Point2D) {
    (Point2D::new(20.0, 20.0), Point2D::new(380.0, 330.0))
}

/// Map 1: four staggered rectangles forming a slalom across the diagonal
pub fn slalom_rectangles() -> Vec<Polygon> {
    vec![
        Polygon::rectangle(60.0, 0.0, 90.0, 110.0),
        Polygon::rectangle(140.0, 120.0, 170.0, 350.0),
        Polygon::rectangle(220.0, 0.0, 250.0, 245.0),
        Polygon::rectangle(300.0, 250.0, 330.0, 350.0),
    ]
}

/// Map 2: a sampled circle and a regular pentagon astride the diagonal
pub fn circle_and_pentagon() -> Vec<Polygon> {
    vec![
        Polygon::regular(Point2D::new(150.0, 130.0), 50.0, 40),
        Polygon::regular(Point2D::new(280.0, 240.0), 45.0, 5),
    ]
}

/// Map 3: four parallel horizontal bars with staggered openings
pub fn horizontal_bars() -> Vec<Polygon> {
    vec![
        Polygon::rectangle(0.0, 70.0, 140.0, 90.0),
        Polygon::rectangle(130.0, 140.0, 400.0, 160.0),
        Polygon::rectangle(0.0, 210.0, 290.0, 230.0),
        Polygon::rectangle(270.0, 280.0, 400.0, 300.0),
    ]
}

/// Map 4: I-shaped composite of three rectangles
pub fn i_shape() -> Vec<Polygon> {
    vec![
        Polygon::rectangle(140.0, 95.0, 260.0, 115.0),
        Polygon::rectangle(180.0, 115.0, 220.0, 230.0),
        Polygon::rectangle(140.0, 230.0, 260.0, 250.0),
    ]
}
