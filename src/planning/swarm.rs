//! Particle-swarm refinement of candidate paths
//!
//! Each stored path is shortened independently: the endpoints stay
//! fixed and a small swarm searches over the interior waypoints. A
//! candidate whose reconstructed path clips an obstacle costs infinity,
//! so the swarm can only trade the current shape for a shorter
//! collision-free one.
//!
//! Reference: Kennedy, J., & Eberhart, R. (1995). "Particle Swarm
//! Optimization"

use std::f64::consts::PI;

use nalgebra::Vector2;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::common::{Path2D, Point2D, Polygon, Workspace};
use crate::geometry::{point_in_polygon, segment_collision_free};

/// Initial waypoint perturbation half-range
const INIT_POSITION_SPREAD: f64 = 5.0;
/// Initial velocity half-range
const INIT_VELOCITY_SPREAD: f64 = 1.0;
/// Escape-scan step and bound for waypoints trapped inside an obstacle
const PROJECT_RADIUS_STEP: f64 = 5.0;
const PROJECT_RADIUS_MAX: f64 = 50.0;
const PROJECT_ANGLES: usize = 16;

struct Particle {
    points: Vec<Vector2<f64>>,
    velocity: Vec<Vector2<f64>>,
    best: Vec<Vector2<f64>>,
    best_cost: f64,
}

/// Swarm optimizer over the interior waypoints of a single path
#[derive(Debug, Clone)]
pub struct PathRefiner {
    pub particles: usize,
    pub iterations: usize,
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
}

impl PathRefiner {
    pub fn new(particles: usize, iterations: usize, inertia: f64, cognitive: f64, social: f64) -> Self {
        Self { particles, iterations, inertia, cognitive, social }
    }

    /// Rewrite `path` in place with the best waypoint layout the swarm
    /// finds. The global best is seeded from the incoming waypoints, so
    /// the result never costs more than the input.
    pub fn refine<R: Rng>(
        &self,
        path: &mut Path2D,
        obstacles: &[Polygon],
        workspace: &Workspace,
        rng: &mut R,
    ) {
        if path.len() < 3 {
            return;
        }

        let start = path.points[0];
        let goal = path.points[path.len() - 1];
        let interior: Vec<Vector2<f64>> = path.points[1..path.len() - 1]
            .iter()
            .map(|p| p.to_vector())
            .collect();

        let mut gbest = interior.clone();
        let mut gbest_cost = reconstructed_cost(start, &gbest, goal, obstacles);

        let position_noise = Uniform::new_inclusive(-INIT_POSITION_SPREAD, INIT_POSITION_SPREAD);
        let velocity_noise = Uniform::new_inclusive(-INIT_VELOCITY_SPREAD, INIT_VELOCITY_SPREAD);

        let mut swarm: Vec<Particle> = Vec::with_capacity(self.particles);
        for _ in 0..self.particles {
            let mut points: Vec<Vector2<f64>> = interior
                .iter()
                .map(|w| {
                    Vector2::new(
                        w.x + position_noise.sample(rng),
                        w.y + position_noise.sample(rng),
                    )
                })
                .collect();
            let velocity: Vec<Vector2<f64>> = (0..points.len())
                .map(|_| Vector2::new(velocity_noise.sample(rng), velocity_noise.sample(rng)))
                .collect();

            for p in points.iter_mut() {
                *p = project_to_free_space(*p, obstacles, workspace);
            }
            let cost = reconstructed_cost(start, &points, goal, obstacles);

            if cost < gbest_cost {
                gbest = points.clone();
                gbest_cost = cost;
            }
            swarm.push(Particle {
                best: points.clone(),
                best_cost: cost,
                points,
                velocity,
            });
        }

        for _ in 0..self.iterations {
            for particle in swarm.iter_mut() {
                for j in 0..particle.points.len() {
                    let r1 = Vector2::new(rng.gen::<f64>(), rng.gen::<f64>());
                    let r2 = Vector2::new(rng.gen::<f64>(), rng.gen::<f64>());

                    let x = particle.points[j];
                    let v = self.inertia * particle.velocity[j]
                        + self.cognitive * r1.component_mul(&(particle.best[j] - x))
                        + self.social * r2.component_mul(&(gbest[j] - x));

                    particle.velocity[j] = v;
                    particle.points[j] = project_to_free_space(x + v, obstacles, workspace);
                }

                let cost = reconstructed_cost(start, &particle.points, goal, obstacles);
                if cost < particle.best_cost {
                    particle.best = particle.points.clone();
                    particle.best_cost = cost;
                }
                if cost < gbest_cost {
                    gbest = particle.points.clone();
                    gbest_cost = cost;
                }
            }
        }

        if gbest_cost.is_finite() {
            let mut points = Vec::with_capacity(gbest.len() + 2);
            points.push(start);
            points.extend(gbest.iter().map(|w| Point2D::from(*w)));
            points.push(goal);
            path.points = points;
        }
    }
}

/// Length of [start] ++ interior ++ [goal], or infinity if any segment
/// clips an obstacle
fn reconstructed_cost(
    start: Point2D,
    interior: &[Vector2<f64>],
    goal: Point2D,
    obstacles: &[Polygon],
) -> f64 {
    let mut prev = start;
    let mut total = 0.0;
    for w in interior {
        let p = Point2D::from(*w);
        if !segment_collision_free(prev, p, obstacles) {
            return f64::INFINITY;
        }
        total += prev.distance(&p);
        prev = p;
    }
    if !segment_collision_free(prev, goal, obstacles) {
        return f64::INFINITY;
    }
    total + prev.distance(&goal)
}

/// Clamp a waypoint to the workspace and, if it landed inside an
/// obstacle, scan outward over growing radii and 16 headings for the
/// first free spot. Falls back to the clamped input.
fn project_to_free_space(p: Vector2<f64>, obstacles: &[Polygon], workspace: &Workspace) -> Vector2<f64> {
    let clamped = workspace.clamp(Point2D::from(p));
    if !obstacles.iter().any(|o| point_in_polygon(clamped, o)) {
        return clamped.to_vector();
    }

    let mut radius = PROJECT_RADIUS_STEP;
    while radius <= PROJECT_RADIUS_MAX {
        for k in 0..PROJECT_ANGLES {
            let angle = 2.0 * PI * k as f64 / PROJECT_ANGLES as f64;
            let candidate = Point2D::new(
                clamped.x + radius * angle.cos(),
                clamped.y + radius * angle.sin(),
            );
            if workspace.contains(candidate)
                && !obstacles.iter().any(|o| point_in_polygon(candidate, o))
            {
                return candidate.to_vector();
            }
        }
        radius += PROJECT_RADIUS_STEP;
    }

    clamped.to_vector()
}
