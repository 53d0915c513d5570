//! Hybrid bidirectional RRT* planner with particle-swarm path refinement
//!
//! Two trees grow from the start and goal positions under an adaptive
//! sampling policy. Every successful expansion probes the opposite tree
//! for a collision-free link; each link yields a complete start-to-goal
//! path. The accumulated paths are periodically rewritten by a particle
//! swarm over their interior waypoints, and the cheapest path seen so
//! far is tracked throughout.
//!
//! References:
//! - Karaman, S., & Frazzoli, E. (2011). "Sampling-based algorithms for
//!   optimal motion planning"
//! - Kuffner, J., & LaValle, S. (2000). "RRT-Connect: An efficient
//!   approach to single-query path planning"

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{
    Path2D, PathPlanner, PlanningError, PlanningResult, Point2D, Polygon, Workspace,
};
use crate::geometry::{point_in_polygon, segment_collision_free};
use crate::planning::sampling::AdaptiveSampler;
use crate::planning::swarm::PathRefiner;
use crate::planning::tree::PathTree;

/// Absolute tolerance for cost comparisons; ties keep the incumbent
const COST_EPS: f64 = 1e-9;
/// Lower bound on the rewiring radius
const MIN_REWIRE_RADIUS: f64 = 15.0;

/// Configuration for the hybrid planner
#[derive(Debug, Clone)]
pub struct HybridPlannerConfig {
    /// Outer-loop iteration budget
    pub max_iterations: usize,
    /// Maximum length of a single steer
    pub step_size: f64,
    /// Iterations between swarm refinement passes
    pub optimization_interval: usize,
    /// Rewiring radius coefficient
    pub gamma: f64,
    /// Cross-tree candidates probed per connection attempt
    pub connection_k: usize,
    /// Swarm size per refined path
    pub pso_particles: usize,
    /// Swarm update steps per refinement
    pub pso_iterations: usize,
    /// Swarm inertia weight
    pub pso_inertia: f64,
    /// Swarm cognitive coefficient
    pub pso_cognitive: f64,
    /// Swarm social coefficient
    pub pso_social: f64,
    /// Random seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for HybridPlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            step_size: 20.0,
            optimization_interval: 200,
            gamma: 150.0,
            connection_k: 5,
            pso_particles: 20,
            pso_iterations: 50,
            pso_inertia: 0.7,
            pso_cognitive: 1.5,
            pso_social: 1.5,
            seed: None,
        }
    }
}

impl HybridPlannerConfig {
    fn validate(&self) -> PlanningResult<()> {
        if self.max_iterations == 0 {
            return Err(PlanningError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(PlanningError::InvalidConfig(
                "step_size must be positive".to_string(),
            ));
        }
        if self.optimization_interval == 0 {
            return Err(PlanningError::InvalidConfig(
                "optimization_interval must be at least 1".to_string(),
            ));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(PlanningError::InvalidConfig(
                "gamma must be positive".to_string(),
            ));
        }
        if self.connection_k == 0 {
            return Err(PlanningError::InvalidConfig(
                "connection_k must be at least 1".to_string(),
            ));
        }
        if self.pso_particles == 0 || self.pso_iterations == 0 {
            return Err(PlanningError::InvalidConfig(
                "swarm size and iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counters reported alongside the planned path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlannerStats {
    pub iterations: usize,
    pub paths_found: usize,
    /// Combined size of both trees
    pub nodes_explored: usize,
}

/// Result of one planning call
#[derive(Debug, Clone)]
pub struct PlanningOutcome {
    /// Cheapest path found; empty when the search came up dry
    pub path: Path2D,
    /// Length of `path`, or infinity when no path was found
    pub cost: f64,
    pub stats: PlannerStats,
}

impl PlanningOutcome {
    pub fn found(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Bidirectional RRT* planner with adaptive sampling and swarm-based
/// path shortening.
///
/// The planner is constructed once per scene; every `plan` call starts
/// from scratch. The trees and path set of the most recent call remain
/// available for inspection and plotting.
pub struct HybridPlanner {
    obstacles: Vec<Polygon>,
    workspace: Workspace,
    config: HybridPlannerConfig,
    start_tree: PathTree,
    goal_tree: PathTree,
    paths: Vec<Path2D>,
}

impl HybridPlanner {
    pub fn new(
        obstacles: Vec<Polygon>,
        workspace: Workspace,
        config: HybridPlannerConfig,
    ) -> PlanningResult<Self> {
        if !workspace.is_valid() {
            return Err(PlanningError::InvalidWorkspace(format!(
                "degenerate rectangle [{}, {}] x [{}, {}]",
                workspace.x_min, workspace.x_max, workspace.y_min, workspace.y_max
            )));
        }
        config.validate()?;

        Ok(Self {
            obstacles,
            workspace,
            config,
            start_tree: PathTree::new(Point2D::origin()),
            goal_tree: PathTree::new(Point2D::origin()),
            paths: Vec::new(),
        })
    }

    /// Tree rooted at the start of the most recent `plan` call
    pub fn start_tree(&self) -> &PathTree {
        &self.start_tree
    }

    /// Tree rooted at the goal of the most recent `plan` call
    pub fn goal_tree(&self) -> &PathTree {
        &self.goal_tree
    }

    /// All start-to-goal paths found by the most recent `plan` call
    pub fn paths(&self) -> &[Path2D] {
        &self.paths
    }

    /// Search for a cheap collision-free path from `start` to `goal`.
    ///
    /// Always succeeds once the inputs validate; an exhausted search
    /// reports an empty path with infinite cost.
    pub fn plan(&mut self, start: Point2D, goal: Point2D) -> PlanningResult<PlanningOutcome> {
        self.validate_endpoint(start, "start")?;
        self.validate_endpoint(goal, "goal")?;

        let mut start_tree = PathTree::new(start);
        let mut goal_tree = PathTree::new(goal);
        let mut paths: Vec<Path2D> = Vec::new();
        let mut stats = PlannerStats {
            nodes_explored: 2,
            ..Default::default()
        };

        if start == goal {
            stats.iterations = 1;
            stats.paths_found = 1;
            self.start_tree = start_tree;
            self.goal_tree = goal_tree;
            self.paths = vec![Path2D::from_points(vec![start, goal])];
            return Ok(PlanningOutcome {
                path: Path2D::from_points(vec![start, goal]),
                cost: 0.0,
                stats,
            });
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut sampler = AdaptiveSampler::new(self.workspace, start, goal);
        let refiner = PathRefiner::new(
            self.config.pso_particles,
            self.config.pso_iterations,
            self.config.pso_inertia,
            self.config.pso_cognitive,
            self.config.pso_social,
        );

        let mut best_path: Option<Path2D> = None;
        let mut best_cost = f64::INFINITY;

        for k in 1..=self.config.max_iterations {
            sampler.update_weights(k, self.config.max_iterations, !paths.is_empty());
            let x_rand = sampler.sample(&start_tree, &goal_tree, &paths, &self.obstacles, &mut rng);

            // Even iterations grow the start tree, odd ones the goal tree
            let active_is_start = k % 2 == 0;
            let (active, opposite) = if active_is_start {
                (&mut start_tree, &goal_tree)
            } else {
                (&mut goal_tree, &start_tree)
            };

            if let Some(new_index) = self.expand(active, x_rand) {
                if let Some(path) = self.try_connect(active, opposite, new_index, active_is_start) {
                    let cost = path.total_length();
                    paths.push(path);
                    if cost < best_cost {
                        best_cost = cost;
                        best_path = Some(paths.last().unwrap().clone());
                    }
                }
            }

            if k % self.config.optimization_interval == 0 && !paths.is_empty() {
                self.refine_paths(&refiner, &mut paths, &mut rng);
                Self::select_best(&paths, &mut best_path, &mut best_cost);
            }

            stats.iterations = k;
            stats.paths_found = paths.len();
            stats.nodes_explored = start_tree.len() + goal_tree.len();
        }

        if !paths.is_empty() {
            self.refine_paths(&refiner, &mut paths, &mut rng);
            Self::select_best(&paths, &mut best_path, &mut best_cost);
        }

        self.start_tree = start_tree;
        self.goal_tree = goal_tree;
        self.paths = paths;

        Ok(PlanningOutcome {
            path: best_path.unwrap_or_default(),
            cost: best_cost,
            stats,
        })
    }

    fn validate_endpoint(&self, p: Point2D, label: &str) -> PlanningResult<()> {
        if !self.workspace.contains(p) {
            return Err(PlanningError::InvalidEndpoint(format!(
                "{} ({:.1}, {:.1}) is outside the workspace",
                label, p.x, p.y
            )));
        }
        if self.obstacles.iter().any(|o| point_in_polygon(p, o)) {
            return Err(PlanningError::InvalidEndpoint(format!(
                "{} ({:.1}, {:.1}) is inside an obstacle",
                label, p.x, p.y
            )));
        }
        Ok(())
    }

    /// One RRT* expansion: steer towards the sample, pick the cheapest
    /// collision-free parent in the rewiring radius, insert, and rewire
    /// the neighborhood through the new node.
    fn expand(&self, tree: &mut PathTree, x_rand: Point2D) -> Option<usize> {
        let nearest = tree.nearest(x_rand);
        let x_near = tree.position(nearest);
        let x_new = steer(x_near, x_rand, self.config.step_size);
        if !segment_collision_free(x_near, x_new, &self.obstacles) {
            return None;
        }

        let radius = self.rewire_radius(tree.len());
        let neighbors = tree.near(x_new, radius);

        let mut parent = nearest;
        let mut cost = tree.cost(nearest) + x_near.distance(&x_new);
        for &i in &neighbors {
            if i == nearest {
                continue;
            }
            let through = tree.cost(i) + tree.position(i).distance(&x_new);
            if through + COST_EPS < cost
                && segment_collision_free(tree.position(i), x_new, &self.obstacles)
            {
                parent = i;
                cost = through;
            }
        }

        let new_index = tree.add_node(x_new, parent, cost);

        for &i in &neighbors {
            if i == parent {
                continue;
            }
            let through = cost + x_new.distance(&tree.position(i));
            if through + COST_EPS < tree.cost(i)
                && segment_collision_free(x_new, tree.position(i), &self.obstacles)
                && !tree.is_ancestor(i, new_index)
            {
                tree.reparent(i, new_index, through);
            }
        }

        Some(new_index)
    }

    /// Shrinking RRT* neighborhood radius with a fixed floor
    fn rewire_radius(&self, tree_size: usize) -> f64 {
        let n = tree_size as f64;
        (self.config.gamma * (n.ln() / n).sqrt()).max(MIN_REWIRE_RADIUS)
    }

    /// Probe the opposite tree from a freshly inserted node and, on the
    /// first collision-free link, assemble the full start-to-goal path.
    fn try_connect(
        &self,
        active: &PathTree,
        opposite: &PathTree,
        new_index: usize,
        active_is_start: bool,
    ) -> Option<Path2D> {
        let x_new = active.position(new_index);

        let mut candidates: Vec<(usize, f64)> = (0..opposite.len())
            .map(|i| (i, opposite.position(i).distance(&x_new)))
            .collect();
        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
        candidates.truncate(self.config.connection_k.min(opposite.len()));

        for &(i, _) in &candidates {
            if segment_collision_free(x_new, opposite.position(i), &self.obstacles) {
                let active_half = active.path_to_root(new_index);
                let opposite_half = opposite.path_to_root(i);

                // Orient the joined path start-first, goal-last
                let points = if active_is_start {
                    let mut pts = active_half;
                    pts.extend(opposite_half.into_iter().rev());
                    pts
                } else {
                    let mut pts = opposite_half;
                    pts.extend(active_half.into_iter().rev());
                    pts
                };
                return Some(Path2D::from_points(points));
            }
        }
        None
    }

    fn refine_paths(&self, refiner: &PathRefiner, paths: &mut [Path2D], rng: &mut StdRng) {
        for path in paths.iter_mut() {
            refiner.refine(path, &self.obstacles, &self.workspace, rng);
        }
    }

    fn select_best(paths: &[Path2D], best_path: &mut Option<Path2D>, best_cost: &mut f64) {
        for path in paths {
            let cost = path.total_length();
            if cost < *best_cost {
                *best_cost = cost;
                *best_path = Some(path.clone());
            }
        }
    }
}

impl PathPlanner for HybridPlanner {
    fn plan(&mut self, start: Point2D, goal: Point2D) -> Result<Path2D, PlanningError> {
        HybridPlanner::plan(self, start, goal).map(|outcome| outcome.path)
    }
}

/// Move from `from` towards `to`, travelling at most `step`
fn steer(from: Point2D, to: Point2D, step: f64) -> Point2D {
    let d = from.distance(&to);
    if d <= step {
        return to;
    }
    let scale = step / d;
    Point2D::new(from.x + scale * (to.x - from.x), from.y + scale * (to.y - from.y))
}
