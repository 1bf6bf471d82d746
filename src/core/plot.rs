//! SVG chart export for finished runs.

use std::path::Path;

use macroquad::math::Vec2;
use plotters::prelude::*;

use crate::core::window::fixed_ratio_axis_window;
use crate::error::{Result, SimError};

const CHART_SIZE: (u32, u32) = (960, 540);

fn plot_err<E: std::fmt::Display>(err: E) -> SimError {
    SimError::Plot(err.to_string())
}

/// Writes the flight path relative to its launch point, with the target
/// marked on the ground line.
pub fn export_trajectory(path: &Path, points: &[Vec2], origin: Vec2, target_x: f32) -> Result<()> {
    if points.is_empty() {
        return Err(SimError::Plot("trajectory has no points".to_string()));
    }

    let relative: Vec<(f32, f32)> = points
        .iter()
        .map(|p| (p.x - origin.x, (p.y - origin.y).max(0.0)))
        .collect();
    let target_rel = target_x - origin.x;
    let raw_max_x = relative
        .iter()
        .fold(target_rel, |acc, (x, _)| acc.max(*x));
    let raw_max_y = relative.iter().fold(0.0f32, |acc, (_, y)| acc.max(*y));
    let (x_span, y_span) = fixed_ratio_axis_window(raw_max_x, raw_max_y);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Projectile trajectory", ("sans-serif", 26))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(52)
        .build_cartesian_2d(0f32..x_span, 0f32..y_span)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(relative.iter().copied(), BLUE.stroke_width(2)))
        .map_err(plot_err)?
        .label("flight path")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(std::iter::once(Circle::new(
            (target_rel, 0.0),
            6,
            RED.filled(),
        )))
        .map_err(plot_err)?
        .label("target")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    log::info!("Exported trajectory plot to {}", path.display());
    Ok(())
}

/// A drawn ray segment: start, end, intensity in `0..=1`.
pub type RaySegment = (Vec2, Vec2, f32);

/// Writes the interface line and every ray segment; fainter rays are drawn
/// with lower opacity.
pub fn export_ray_diagram(path: &Path, segments: &[RaySegment]) -> Result<()> {
    let extent = segments
        .iter()
        .flat_map(|(a, b, _)| [a.x.abs(), a.y.abs(), b.x.abs(), b.y.abs()])
        .fold(1.0f32, f32::max)
        * 1.1;

    let root = SVGBackend::new(path, (720, 720)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Refraction at y = 0", ("sans-serif", 26))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(-extent..extent, -extent..extent)
        .map_err(plot_err)?;

    chart.configure_mesh().draw().map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            [(-extent, 0.0), (extent, 0.0)],
            BLACK.stroke_width(2),
        ))
        .map_err(plot_err)?;

    for (start, end, intensity) in segments {
        let style = BLUE.mix(f64::from(intensity.clamp(0.1, 1.0))).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                [(start.x, start.y), (end.x, end.y)],
                style,
            ))
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    log::info!("Exported ray diagram to {}", path.display());
    Ok(())
}
