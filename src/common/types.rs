//! Common geometric types used throughout marine_planner

use nalgebra::Vector2;

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Axis-aligned rectangular planning workspace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workspace {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Workspace {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// A workspace is usable when both extents are finite and positive
    pub fn is_valid(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
            && self.x_min < self.x_max
            && self.y_min < self.y_max
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// Clamp a point onto the workspace rectangle
    pub fn clamp(&self, p: Point2D) -> Point2D {
        Point2D::new(
            p.x.max(self.x_min).min(self.x_max),
            p.y.max(self.y_min).min(self.y_max),
        )
    }
}

/// Simple polygonal obstacle
///
/// Vertices are stored in order and the polygon is implicitly closed
/// (last vertex connects back to the first). The axis-aligned bounding
/// box is cached at construction and used as a pre-filter by the
/// geometry routines; obstacles never change during planning.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    bbox: (f64, f64, f64, f64), // (x_min, x_max, y_min, y_max)
}

impl Polygon {
    pub fn new(vertices: Vec<Point2D>) -> Self {
        assert!(vertices.len() >= 3, "a polygon needs at least 3 vertices");

        let mut bbox = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for v in &vertices {
            bbox.0 = bbox.0.min(v.x);
            bbox.1 = bbox.1.max(v.x);
            bbox.2 = bbox.2.min(v.y);
            bbox.3 = bbox.3.max(v.y);
        }

        Self { vertices, bbox }
    }

    /// Axis-aligned rectangle spanning (x0, y0) to (x1, y1)
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(vec![
            Point2D::new(x0, y0),
            Point2D::new(x1, y0),
            Point2D::new(x1, y1),
            Point2D::new(x0, y1),
        ])
    }

    /// Regular polygon with `sides` vertices on a circle around `center`.
    ///
    /// With a large vertex count this doubles as a sampled circle.
    pub fn regular(center: Point2D, radius: f64, sides: usize) -> Self {
        let vertices = (0..sides)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / sides as f64;
                Point2D::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();
        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Cached bounding box as (x_min, x_max, y_min, y_max)
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        self.bbox
    }
}

/// Path represented as a sequence of 2D points
#[derive(Debug, Clone)]
pub struct Path2D {
    pub points: Vec<Point2D>,
}

impl Path2D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

impl Default for Path2D {
    fn default() -> Self {
        Self::new()
    }
}
