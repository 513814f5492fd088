//! Comparison charts for aggregated, aligned series
//!
//! Consumes equal-length series (align them first, see [`crate::align`]) and
//! renders one SVG artifact per call: grouped bars for per-project coverage
//! comparisons, line charts for fitness trajectories with an optional dotted
//! average companion per strategy.

use std::path::PathBuf;

use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};

use crate::error::{Error, Result};

/// Series colors, assigned in order: strategy under evaluation first, then
/// the baselines.
const PALETTE: [RGBColor; 4] = [
    RGBColor(65, 105, 225),  // royal blue
    RGBColor(255, 140, 0),   // dark orange
    RGBColor(34, 139, 34),   // forest green
    RGBColor(220, 20, 60),   // crimson
];

/// Half of a category slot taken by each bar in a grouped comparison.
const BAR_WIDTH: f64 = 0.35;

/// One bar series across all categories of a grouped comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    /// Legend label.
    pub label: String,
    /// One value per category.
    pub values: Vec<f64>,
}

/// One strategy's fitness trajectory, with an optional average companion
/// drawn dotted in the same color.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Legend label.
    pub label: String,
    /// Best fitness per iteration (solid line).
    pub best: Vec<f64>,
    /// Average fitness per iteration (dotted line), when available.
    pub average: Option<Vec<f64>>,
}

/// Renders comparison charts into an output directory, one SVG per call.
#[derive(Debug, Clone)]
pub struct ComparativePlotter {
    out_dir: PathBuf,
}

impl ComparativePlotter {
    /// Create a plotter writing into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Render a grouped bar comparison: two bars per category, the left one
    /// for `left`, the right one for `right`, offset by half the bar width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeriesLength`] if either group's value count differs
    /// from the category count, or [`Error::Plot`] on a rendering failure.
    pub fn grouped_bars(
        &self,
        name: &str,
        title: &str,
        y_desc: &str,
        categories: &[String],
        left: &BarGroup,
        right: &BarGroup,
    ) -> Result<PathBuf> {
        for group in [left, right] {
            if group.values.len() != categories.len() {
                return Err(Error::SeriesLength {
                    label: group.label.clone(),
                    expected: categories.len(),
                    found: group.values.len(),
                });
            }
        }

        let path = self.chart_path(name)?;
        let root = SVGBackend::new(&path, (800, 600)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let y_max = left
            .values
            .iter()
            .chain(&right.values)
            .copied()
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max);
        let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

        #[allow(clippy::cast_precision_loss)]
        let x_max = categories.len() as f64 - 0.5;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(60)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5..x_max, 0.0..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(y_desc)
            .x_labels(categories.len())
            .x_label_formatter(&|x| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let index = x.round().max(0.0) as usize;
                categories.get(index).cloned().unwrap_or_default()
            })
            .draw()
            .map_err(plot_err)?;

        // Left bars first so the legend order matches the bar order.
        let left_color = PALETTE[0];
        chart
            .draw_series(left.values.iter().enumerate().map(|(index, &value)| {
                #[allow(clippy::cast_precision_loss)]
                let center = index as f64;
                Rectangle::new([(center - BAR_WIDTH, 0.0), (center, value)], left_color.filled())
            }))
            .map_err(plot_err)?
            .label(&left.label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 10, y + 4)], left_color.filled())
            });

        let right_color = PALETTE[1];
        chart
            .draw_series(right.values.iter().enumerate().map(|(index, &value)| {
                #[allow(clippy::cast_precision_loss)]
                let center = index as f64;
                Rectangle::new([(center, 0.0), (center + BAR_WIDTH, value)], right_color.filled())
            }))
            .map_err(plot_err)?
            .label(&right.label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 4), (x + 10, y + 4)], right_color.filled())
            });

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
        root.present().map_err(plot_err)?;
        drop(chart);
        drop(root);
        Ok(path)
    }

    /// Render fitness trajectories over an iteration axis: a solid line per
    /// strategy plus a dotted line for its average companion, same color.
    ///
    /// All series must already be aligned to equal length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeries`] when there is nothing to plot,
    /// [`Error::SeriesLength`] when series lengths diverge, or
    /// [`Error::Plot`] on a rendering failure.
    pub fn trajectory_lines(
        &self,
        name: &str,
        title: &str,
        x_desc: &str,
        y_desc: &str,
        trajectories: &[Trajectory],
    ) -> Result<PathBuf> {
        let Some(len) = trajectories.first().map(|t| t.best.len()) else {
            return Err(Error::EmptySeries);
        };
        if len == 0 {
            return Err(Error::EmptySeries);
        }
        for trajectory in trajectories {
            if trajectory.best.len() != len {
                return Err(Error::SeriesLength {
                    label: trajectory.label.clone(),
                    expected: len,
                    found: trajectory.best.len(),
                });
            }
            if let Some(average) = &trajectory.average {
                if average.len() != len {
                    return Err(Error::SeriesLength {
                        label: format!("{} (avg)", trajectory.label),
                        expected: len,
                        found: average.len(),
                    });
                }
            }
        }

        let path = self.chart_path(name)?;
        let root = SVGBackend::new(&path, (800, 600)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let all_values = trajectories.iter().flat_map(|trajectory| {
            trajectory
                .best
                .iter()
                .chain(trajectory.average.iter().flatten())
                .copied()
                .filter(|value| value.is_finite())
        });
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for value in all_values {
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            return Err(Error::EmptySeries);
        }
        let pad = ((y_max - y_min) * 0.05).max(0.5);

        #[allow(clippy::cast_precision_loss)]
        let x_max = (len - 1).max(1) as f64;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..x_max, (y_min - pad)..(y_max + pad))
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()
            .map_err(plot_err)?;

        for (index, trajectory) in trajectories.iter().enumerate() {
            let color = PALETTE[index % PALETTE.len()];
            chart
                .draw_series(LineSeries::new(points(&trajectory.best), color))
                .map_err(plot_err)?
                .label(&trajectory.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color)
                });

            if let Some(average) = &trajectory.average {
                chart
                    .draw_series(DashedLineSeries::new(points(average), 2, 3, color.into()))
                    .map_err(plot_err)?
                    .label(format!("{} (avg)", trajectory.label))
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], color)
                    });
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_err)?;
        root.present().map_err(plot_err)?;
        drop(chart);
        drop(root);
        Ok(path)
    }

    fn chart_path(&self, name: &str) -> Result<PathBuf> {
        if !self.out_dir.is_dir() {
            std::fs::create_dir_all(&self.out_dir)?;
        }
        Ok(self.out_dir.join(format!("{name}.svg")))
    }
}

fn points(values: &[f64]) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
    values.iter().enumerate().map(|(index, &value)| {
        #[allow(clippy::cast_precision_loss)]
        let x = index as f64;
        (x, value)
    })
}

fn plot_err<E: std::fmt::Display>(error: E) -> Error {
    Error::Plot(error.to_string())
}
