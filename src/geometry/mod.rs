//! Geometric primitives for collision checking against polygonal obstacles
//!
//! Everything here is plain Euclidean 2D geometry:
//! - even-odd ray-casting point-in-polygon test
//! - point-to-segment and point-to-polygon distances
//! - sampled segment collision test against an obstacle set

use crate::common::{Point2D, Polygon};

/// Sampling step along a segment for collision tests [workspace units]
const COLLISION_STEP: f64 = 0.5;

/// Even-odd ray-casting point-in-polygon test.
///
/// A horizontal ray is cast towards +x; crossings are counted with a
/// strict comparison on the x-intercept, so points on the boundary ray
/// through a vertex are counted once. The cached bounding box rejects
/// far-away points before the edge walk.
pub fn point_in_polygon(p: Point2D, poly: &Polygon) -> bool {
    let (x_min, x_max, y_min, y_max) = poly.bounding_box();
    if p.x < x_min || p.x > x_max || p.y < y_min || p.y > y_max {
        return false;
    }

    let vertices = poly.vertices();
    let n = vertices.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Euclidean distance from a point to the closed segment ab
pub fn point_to_segment_distance(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let l2 = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    if l2 == 0.0 {
        return p.distance(&a);
    }

    let t = (((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / l2)
        .max(0.0)
        .min(1.0);
    let projection = Point2D::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
    p.distance(&projection)
}

/// Unsigned distance from a point to the polygon boundary.
///
/// Minimum over all edges of the closed polygon. Callers that need to
/// distinguish inside from outside combine this with [`point_in_polygon`].
pub fn point_to_polygon_distance(p: Point2D, poly: &Polygon) -> f64 {
    let vertices = poly.vertices();
    let n = vertices.len();
    let mut min_dist = f64::INFINITY;
    for i in 0..n {
        let d = point_to_segment_distance(p, vertices[i], vertices[(i + 1) % n]);
        if d < min_dist {
            min_dist = d;
        }
    }
    min_dist
}

/// Sampled collision test for the segment ab against all obstacles.
///
/// The segment is discretized at steps of 0.5 workspace units
/// (at least one step, endpoints included); it is free iff no sample
/// point lies inside any obstacle.
pub fn segment_collision_free(a: Point2D, b: Point2D, obstacles: &[Polygon]) -> bool {
    if obstacles.is_empty() {
        return true;
    }

    let steps = ((a.distance(&b) / COLLISION_STEP).ceil() as usize).max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let p = Point2D::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y));
        for poly in obstacles {
            if point_in_polygon(p, poly) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::rectangle(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_point_in_polygon_square() {
        let square = unit_square();
        assert!(point_in_polygon(Point2D::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point2D::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(Point2D::new(-1.0, 5.0), &square));
        assert!(!point_in_polygon(Point2D::new(5.0, 11.0), &square));
    }

    #[test]
    fn test_point_in_polygon_concave() {
        // L-shape: notch cut out of the upper-right quadrant
        let poly = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 5.0),
            Point2D::new(5.0, 5.0),
            Point2D::new(5.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]);
        assert!(point_in_polygon(Point2D::new(2.0, 8.0), &poly));
        assert!(point_in_polygon(Point2D::new(8.0, 2.0), &poly));
        assert!(!point_in_polygon(Point2D::new(8.0, 8.0), &poly));
    }

    #[test]
    fn test_point_to_segment_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 0.0);
        assert!((point_to_segment_distance(Point2D::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-10);
        // Projection clamps to the endpoints
        assert!((point_to_segment_distance(Point2D::new(14.0, 3.0), a, b) - 5.0).abs() < 1e-10);
        assert!((point_to_segment_distance(Point2D::new(-3.0, 4.0), a, b) - 5.0).abs() < 1e-10);
        // Degenerate segment
        assert!((point_to_segment_distance(Point2D::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_point_to_polygon_distance() {
        let square = unit_square();
        assert!((point_to_polygon_distance(Point2D::new(15.0, 5.0), &square) - 5.0).abs() < 1e-10);
        // The closing edge (last vertex back to first) is part of the boundary
        let triangle = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 10.0),
        ]);
        assert!((point_to_polygon_distance(Point2D::new(-4.0, 5.0), &triangle) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_segment_collision() {
        let obstacles = vec![unit_square()];
        // Straight through the square
        assert!(!segment_collision_free(
            Point2D::new(-5.0, 5.0),
            Point2D::new(15.0, 5.0),
            &obstacles
        ));
        // Passing above it
        assert!(segment_collision_free(
            Point2D::new(-5.0, 15.0),
            Point2D::new(15.0, 15.0),
            &obstacles
        ));
        // Endpoint buried inside the obstacle
        assert!(!segment_collision_free(
            Point2D::new(-5.0, 5.0),
            Point2D::new(5.0, 5.0),
            &obstacles
        ));
    }

    #[test]
    fn test_segment_collision_degenerate() {
        let obstacles = vec![unit_square()];
        let inside = Point2D::new(5.0, 5.0);
        let outside = Point2D::new(20.0, 20.0);
        assert!(!segment_collision_free(inside, inside, &obstacles));
        assert!(segment_collision_free(outside, outside, &obstacles));
        assert!(segment_collision_free(outside, outside, &[]));
    }
}
