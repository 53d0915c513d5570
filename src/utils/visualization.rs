//! Visualization helpers for planning results
//!
//! Thin gnuplot wrapper consumed by the demo binary; the planning core
//! never draws.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{Path2D, Point2D, Polygon, Workspace};
use crate::planning::PathTree;

/// Color palette for consistent styling
pub mod colors {
    pub const OBSTACLE: &str = "#404040";
    pub const TREE: &str = "#8FAADC";
    pub const PATH: &str = "#FF0000";
    pub const START: &str = "#00A000";
    pub const GOAL: &str = "#0000FF";
}

/// Render one planning scene to a PNG file.
///
/// Obstacles are drawn as closed outlines, the trees as their edge
/// sets, and the best path on top.
pub fn plot_scene(
    obstacles: &[Polygon],
    start: Point2D,
    goal: Point2D,
    path: &Path2D,
    trees: &[&PathTree],
    workspace: &Workspace,
    title: &str,
    output_path: &str,
) -> Result<(), String> {
    let mut fg = Figure::new();
    let axes = fg.axes2d();

    for poly in obstacles {
        let mut x: Vec<f64> = poly.vertices().iter().map(|v| v.x).collect();
        let mut y: Vec<f64> = poly.vertices().iter().map(|v| v.y).collect();
        x.push(x[0]);
        y.push(y[0]);
        axes.lines(&x, &y, &[Color(colors::OBSTACLE), LineWidth(1.5)]);
    }

    for tree in trees {
        for node in tree.nodes() {
            if let Some(parent) = node.parent {
                let p = tree.position(parent);
                axes.lines(
                    &[p.x, node.position.x],
                    &[p.y, node.position.y],
                    &[Color(colors::TREE)],
                );
            }
        }
    }

    if !path.is_empty() {
        axes.lines(
            &path.x_coords(),
            &path.y_coords(),
            &[Caption("Best Path"), Color(colors::PATH), LineWidth(2.0)],
        );
    }

    axes.points(
        &[start.x],
        &[start.y],
        &[Caption("Start"), Color(colors::START), PointSymbol('O'), PointSize(1.5)],
    );
    axes.points(
        &[goal.x],
        &[goal.y],
        &[Caption("Goal"), Color(colors::GOAL), PointSymbol('O'), PointSize(1.5)],
    );

    axes.set_title(title, &[])
        .set_x_label("X", &[])
        .set_y_label("Y", &[])
        .set_x_range(
            AutoOption::Fix(workspace.x_min),
            AutoOption::Fix(workspace.x_max),
        )
        .set_y_range(
            AutoOption::Fix(workspace.y_min),
            AutoOption::Fix(workspace.y_max),
        )
        .set_aspect_ratio(AutoOption::Fix(1.0));

    fg.save_to_png(output_path, 800, 600).map_err(|e| e.to_string())
}
