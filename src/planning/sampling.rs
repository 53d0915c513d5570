//! Adaptive sampling strategies for the bidirectional search
//!
//! A single sample is drawn from one of five strategies selected by
//! weight: root bias, low-density regions, narrow passages, the
//! neighborhood of already-found paths, and plain uniform. The weights
//! start exploration-heavy and shift towards path-guided sampling as the
//! iteration budget is consumed.

use rand::Rng;

use crate::common::{Path2D, Point2D, Polygon, Workspace};
use crate::geometry::point_to_polygon_distance;
use crate::planning::tree::PathTree;

/// Cells per axis of the node-density grid
const DENSITY_GRID: usize = 20;
/// Obstacle clearance band accepted by the narrow-passage strategy
const NARROW_BAND: f64 = 30.0;
/// Rejection attempts before the narrow-passage strategy gives up
const NARROW_MAX_ATTEMPTS: usize = 50;
/// Noise magnitude around interpolated path points
const PATH_NOISE: f64 = 20.0;
/// Noise magnitude around the tree roots
const ROOT_NOISE: f64 = 0.1;

/// Weights of the five sampling strategies; always sum to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingWeights {
    pub goal: f64,
    pub density: f64,
    pub narrow: f64,
    pub path: f64,
    pub uniform: f64,
}

impl SamplingWeights {
    /// Weights used while no path has been found yet
    pub fn initial() -> Self {
        Self {
            goal: 0.10,
            density: 0.20,
            narrow: 0.15,
            path: 0.0,
            uniform: 0.55,
        }
    }

    /// Weights at iteration `iteration` of `max_iterations` once the
    /// path set is non-empty: path-guided sampling ramps up while the
    /// exploration strategies fade out.
    pub fn scheduled(iteration: usize, max_iterations: usize) -> Self {
        let progress = iteration as f64 / max_iterations as f64;
        let goal = 0.05;
        let density = (0.15 - 0.10 * progress).max(0.0);
        let narrow = (0.10 - 0.05 * progress).max(0.0);
        let path = 0.30 + 0.20 * progress;
        let uniform = (1.0 - goal - density - narrow - path).max(0.0);
        Self { goal, density, narrow, path, uniform }
    }

    pub fn sum(&self) -> f64 {
        self.goal + self.density + self.narrow + self.path + self.uniform
    }
}

/// Strategy-mixing sampler shared by both trees
pub struct AdaptiveSampler {
    workspace: Workspace,
    start: Point2D,
    goal: Point2D,
    weights: SamplingWeights,
}

impl AdaptiveSampler {
    pub fn new(workspace: Workspace, start: Point2D, goal: Point2D) -> Self {
        Self {
            workspace,
            start,
            goal,
            weights: SamplingWeights::initial(),
        }
    }

    pub fn weights(&self) -> SamplingWeights {
        self.weights
    }

    /// Recompute the strategy weights for the current iteration
    pub fn update_weights(&mut self, iteration: usize, max_iterations: usize, have_paths: bool) {
        self.weights = if have_paths {
            SamplingWeights::scheduled(iteration, max_iterations)
        } else {
            SamplingWeights::initial()
        };
    }

    /// Draw one candidate point, clamped to the workspace
    pub fn sample<R: Rng>(
        &self,
        start_tree: &PathTree,
        goal_tree: &PathTree,
        paths: &[Path2D],
        obstacles: &[Polygon],
        rng: &mut R,
    ) -> Point2D {
        let w = self.weights;
        let u: f64 = rng.gen();

        let p = if u < w.goal {
            self.sample_root_bias(rng)
        } else if u < w.goal + w.density {
            self.sample_low_density(start_tree, goal_tree, rng)
        } else if u < w.goal + w.density + w.narrow {
            self.sample_narrow_passage(obstacles, rng)
        } else if u < w.goal + w.density + w.narrow + w.path && !paths.is_empty() {
            self.sample_along_path(paths, rng)
        } else {
            self.sample_uniform(rng)
        };

        self.workspace.clamp(p)
    }

    fn sample_uniform<R: Rng>(&self, rng: &mut R) -> Point2D {
        Point2D::new(
            rng.gen_range(self.workspace.x_min..=self.workspace.x_max),
            rng.gen_range(self.workspace.y_min..=self.workspace.y_max),
        )
    }

    /// Either tree root, slightly perturbed
    fn sample_root_bias<R: Rng>(&self, rng: &mut R) -> Point2D {
        let root = if rng.gen_bool(0.5) { self.start } else { self.goal };
        Point2D::new(
            root.x + ROOT_NOISE * (rng.gen::<f64>() - 0.5),
            root.y + ROOT_NOISE * (rng.gen::<f64>() - 0.5),
        )
    }

    /// Pick a grid cell with probability inverse to its node count and
    /// emit a point uniformly inside that cell.
    fn sample_low_density<R: Rng>(
        &self,
        start_tree: &PathTree,
        goal_tree: &PathTree,
        rng: &mut R,
    ) -> Point2D {
        let cell_w = self.workspace.width() / DENSITY_GRID as f64;
        let cell_h = self.workspace.height() / DENSITY_GRID as f64;

        // counts[iy][ix], ix along x
        let mut counts = [[0usize; DENSITY_GRID]; DENSITY_GRID];
        for tree in [start_tree, goal_tree] {
            for node in tree.nodes() {
                let ix = (((node.position.x - self.workspace.x_min) / cell_w) as usize)
                    .min(DENSITY_GRID - 1);
                let iy = (((node.position.y - self.workspace.y_min) / cell_h) as usize)
                    .min(DENSITY_GRID - 1);
                counts[iy][ix] += 1;
            }
        }

        let max_count = counts.iter().flatten().copied().max().unwrap_or(0);
        let total: f64 = counts
            .iter()
            .flatten()
            .map(|&c| (max_count + 1 - c) as f64)
            .sum();

        let mut target = rng.gen::<f64>() * total;
        let mut chosen = (DENSITY_GRID - 1, DENSITY_GRID - 1);
        'outer: for iy in 0..DENSITY_GRID {
            for ix in 0..DENSITY_GRID {
                target -= (max_count + 1 - counts[iy][ix]) as f64;
                if target <= 0.0 {
                    chosen = (iy, ix);
                    break 'outer;
                }
            }
        }

        let (iy, ix) = chosen;
        let cx = self.workspace.x_min + (ix as f64 + 0.5) * cell_w;
        let cy = self.workspace.y_min + (iy as f64 + 0.5) * cell_h;
        Point2D::new(
            cx + (rng.gen::<f64>() - 0.5) * cell_w,
            cy + (rng.gen::<f64>() - 0.5) * cell_h,
        )
    }

    /// Reject-sample points close to (but not on) an obstacle boundary
    fn sample_narrow_passage<R: Rng>(&self, obstacles: &[Polygon], rng: &mut R) -> Point2D {
        if obstacles.is_empty() {
            return self.sample_uniform(rng);
        }

        for _ in 0..NARROW_MAX_ATTEMPTS {
            let p = self.sample_uniform(rng);
            let clearance = obstacles
                .iter()
                .map(|o| point_to_polygon_distance(p, o))
                .fold(f64::INFINITY, f64::min);
            if clearance > 0.0 && clearance <= NARROW_BAND {
                return p;
            }
        }

        self.sample_uniform(rng)
    }

    /// Interpolate along a random segment of a random stored path and
    /// perturb the result.
    fn sample_along_path<R: Rng>(&self, paths: &[Path2D], rng: &mut R) -> Point2D {
        let path = &paths[rng.gen_range(0..paths.len())];
        if path.len() < 2 {
            return self.sample_uniform(rng);
        }

        let seg = rng.gen_range(0..path.len() - 1);
        let a = path.points[seg];
        let b = path.points[seg + 1];
        let t: f64 = rng.gen();
        Point2D::new(
            a.x + t * (b.x - a.x) + PATH_NOISE * (rng.gen::<f64>() - 0.5),
            a.y + t * (b.y - a.y) + PATH_NOISE * (rng.gen::<f64>() - 0.5),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> (AdaptiveSampler, PathTree, PathTree) {
        let workspace = Workspace::new(0.0, 100.0, 0.0, 80.0);
        let start = Point2D::new(10.0, 10.0);
        let goal = Point2D::new(90.0, 70.0);
        let sampler = AdaptiveSampler::new(workspace, start, goal);
        (sampler, PathTree::new(start), PathTree::new(goal))
    }

    #[test]
    fn test_initial_weights_normalized() {
        let w = SamplingWeights::initial();
        assert!((w.sum() - 1.0).abs() < 1e-12);
        assert_eq!(w.path, 0.0);
    }

    #[test]
    fn test_scheduled_weights_normalized() {
        for (k, max) in [(0, 100), (50, 100), (100, 100), (4999, 5000)] {
            let w = SamplingWeights::scheduled(k, max);
            assert!((w.sum() - 1.0).abs() < 1e-12, "sum at {}/{}", k, max);
            for v in [w.goal, w.density, w.narrow, w.path, w.uniform] {
                assert!(v >= 0.0);
            }
        }
    }

    #[test]
    fn test_scheduled_weights_shift_towards_paths() {
        let early = SamplingWeights::scheduled(0, 1000);
        let late = SamplingWeights::scheduled(1000, 1000);
        assert!(late.path > early.path);
        assert!(late.density < early.density);
        assert!(late.narrow < early.narrow);
    }

    #[test]
    fn test_path_weight_zero_without_paths() {
        let (mut sampler, _, _) = fixture();
        sampler.update_weights(500, 1000, false);
        assert_eq!(sampler.weights().path, 0.0);
        sampler.update_weights(500, 1000, true);
        assert!(sampler.weights().path > 0.0);
    }

    #[test]
    fn test_samples_stay_in_workspace() {
        let (mut sampler, start_tree, goal_tree) = fixture();
        let obstacles = vec![Polygon::rectangle(40.0, 30.0, 60.0, 50.0)];
        let paths = vec![Path2D::from_points(vec![
            Point2D::new(10.0, 10.0),
            Point2D::new(50.0, 60.0),
            Point2D::new(90.0, 70.0),
        ])];
        let workspace = Workspace::new(0.0, 100.0, 0.0, 80.0);
        let mut rng = StdRng::seed_from_u64(3);

        sampler.update_weights(100, 200, true);
        for _ in 0..500 {
            let p = sampler.sample(&start_tree, &goal_tree, &paths, &obstacles, &mut rng);
            assert!(workspace.contains(p), "sample {:?} escaped the workspace", p);
        }
    }

    #[test]
    fn test_sampling_without_paths_or_obstacles() {
        let (sampler, start_tree, goal_tree) = fixture();
        let workspace = Workspace::new(0.0, 100.0, 0.0, 80.0);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..500 {
            let p = sampler.sample(&start_tree, &goal_tree, &[], &[], &mut rng);
            assert!(workspace.contains(p));
        }
    }

    #[test]
    fn test_low_density_prefers_empty_regions() {
        let (sampler, mut start_tree, goal_tree) = fixture();
        // Crowd the lower-left corner
        for i in 0..200 {
            let offset = (i % 10) as f64;
            start_tree.add_node(Point2D::new(1.0 + offset, 1.0 + offset * 0.5), 0, 1.0);
        }

        let mut rng = StdRng::seed_from_u64(5);
        let mut upper_half = 0;
        for _ in 0..400 {
            let p = sampler.sample_low_density(&start_tree, &goal_tree, &mut rng);
            if p.y > 40.0 {
                upper_half += 1;
            }
        }
        // The crowded band sits well below y = 40
        assert!(upper_half > 150, "only {} samples in the empty half", upper_half);
    }
}
