use marine_planner::maps;
use marine_planner::planning::{HybridPlanner, HybridPlannerConfig};
use marine_planner::utils::plot_scene;

fn main() {
    println!("Hybrid RRT*-PSO path planning start!!");

    let workspace = maps::benchmark_workspace();
    let (start, goal) = maps::benchmark_endpoints();

    let scenarios = vec![
        ("slalom_rectangles", maps::slalom_rectangles()),
        ("circle_and_pentagon", maps::circle_and_pentagon()),
        ("horizontal_bars", maps::horizontal_bars()),
        ("i_shape", maps::i_shape()),
    ];

    std::fs::create_dir_all("img").ok();

    for (name, obstacles) in scenarios {
        let config = HybridPlannerConfig {
            max_iterations: 1500,
            optimization_interval: 500,
            pso_particles: 10,
            pso_iterations: 20,
            seed: Some(1),
            ..Default::default()
        };
        let mut planner = HybridPlanner::new(obstacles.clone(), workspace, config)
            .expect("benchmark setup is valid");

        match planner.plan(start, goal) {
            Ok(outcome) if outcome.found() => {
                println!(
                    "{}: cost {:.1}, {} paths, {} nodes, {} iterations",
                    name,
                    outcome.cost,
                    outcome.stats.paths_found,
                    outcome.stats.nodes_explored,
                    outcome.stats.iterations
                );

                let output_path = format!("img/{}_result.png", name);
                let trees = [planner.start_tree(), planner.goal_tree()];
                match plot_scene(
                    &obstacles,
                    start,
                    goal,
                    &outcome.path,
                    &trees,
                    &workspace,
                    name,
                    &output_path,
                ) {
                    Ok(()) => println!("Plot saved to: {}", output_path),
                    Err(e) => println!("Plotting failed: {}", e),
                }
            }
            Ok(_) => println!("{}: no path found", name),
            Err(e) => println!("{}: {}", name, e),
        }
    }

    println!("Hybrid RRT*-PSO path planning finish!!");
}
