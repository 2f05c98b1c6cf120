//! Realizes a `ChartSpec` with egui_plot.
//!
//! egui_plot draws every line in a single coordinate space, so the two
//! independently scaled axes are realized by mapping each axis linearly
//! onto a shared [0, 1] plot space (reversed for the inverted primary) and
//! letting the left/right axis tick formatters translate plot coordinates
//! back into axis values.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui;
use egui_plot::{AxisHints, GridMark, HPlacement, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::chart::{AxisId, AxisSide, AxisSpec, ChartSpec, StrokePattern};

/// Linear map between axis values and the shared [0, 1] plot space
#[derive(Debug, Clone, Copy)]
struct AxisMapper {
    min: f64,
    span: f64,
    inverted: bool,
}

impl AxisMapper {
    fn from_values(values: impl Iterator<Item = f64>, inverted: bool) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            min = 0.0;
            max = 1.0;
        }
        let span = if (max - min).abs() < f64::EPSILON {
            1.0
        } else {
            max - min
        };
        Self { min, span, inverted }
    }

    fn to_plot(&self, value: f64) -> f64 {
        let t = (value - self.min) / self.span;
        if self.inverted {
            1.0 - t
        } else {
            t
        }
    }

    fn from_plot(&self, t: f64) -> f64 {
        let t = if self.inverted { 1.0 - t } else { t };
        self.min + t * self.span
    }
}

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn fmt_tick(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn axis_hints(spec: &AxisSpec, mapper: AxisMapper) -> AxisHints<'static> {
    let placement = match spec.side {
        AxisSide::Left => HPlacement::Left,
        AxisSide::Right => HPlacement::Right,
    };
    AxisHints::new_y()
        .label(spec.title)
        .placement(placement)
        .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            fmt_tick(mapper.from_plot(mark.value))
        })
}

pub fn render(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
    ui.horizontal(|ui| {
        ui.heading(spec.title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(format!("Legend: {}", spec.legend_title));
        });
    });
    ui.add_space(4.0);

    let primary = AxisMapper::from_values(
        spec.series
            .iter()
            .filter(|s| s.axis == AxisId::Primary)
            .flat_map(|s| s.points.iter().map(|(_, v)| *v)),
        spec.primary.inverted,
    );
    let secondary = AxisMapper::from_values(
        spec.series
            .iter()
            .filter(|s| s.axis == AxisId::Secondary)
            .flat_map(|s| s.points.iter().map(|(_, v)| *v)),
        spec.secondary.inverted,
    );

    Plot::new("dual_axis_chart")
        .height(height)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(false)
        .legend(Legend::default())
        .custom_y_axes(vec![
            axis_hints(&spec.primary, primary),
            axis_hints(&spec.secondary, secondary),
        ])
        .x_axis_label("Date")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            x_to_date(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|name, point| {
            // The shared y coordinate is normalized and meaningless to the
            // user; show the series and the hovered date instead.
            if name.is_empty() {
                return String::new();
            }
            match x_to_date(point.x) {
                Some(date) => format!("{name}\n{date}"),
                None => name.to_string(),
            }
        })
        .show(ui, |plot_ui| {
            for series in &spec.series {
                let mapper = match series.axis {
                    AxisId::Primary => primary,
                    AxisId::Secondary => secondary,
                };
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|(date, value)| [date_to_x(*date), mapper.to_plot(*value)])
                    .collect();

                let mut line = Line::new(points).name(&series.label);
                if let Some(color) = series.style.color {
                    line = line.color(color);
                }
                if let Some(width) = series.style.width {
                    line = line.width(width);
                }
                // egui_plot has no dash-dot stroke; loose dashes are the
                // closest available pattern
                if series.style.pattern == StrokePattern::DashDot {
                    line = line.style(LineStyle::dashed_loose());
                }
                plot_ui.line(line);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_mapper_draws_larger_values_lower() {
        let mapper = AxisMapper::from_values([100.0, 105.0, 50.0].into_iter(), true);
        assert!(
            mapper.to_plot(105.0) < mapper.to_plot(100.0),
            "larger close must land lower on the inverted axis"
        );
        assert!((mapper.to_plot(105.0) - 0.0).abs() < 1e-12);
        assert!((mapper.to_plot(50.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_upright_mapper_preserves_order() {
        let mapper = AxisMapper::from_values([200.0, 210.0].into_iter(), false);
        assert!(mapper.to_plot(210.0) > mapper.to_plot(200.0));
    }

    #[test]
    fn test_mapper_round_trip() {
        let mapper = AxisMapper::from_values([12.5, 99.0, 47.1].into_iter(), true);
        for v in [12.5, 47.1, 99.0] {
            let back = mapper.from_plot(mapper.to_plot(v));
            assert!((back - v).abs() < 1e-9, "round trip lost {v}: {back}");
        }
    }

    #[test]
    fn test_mapper_degenerate_and_empty_inputs() {
        let flat = AxisMapper::from_values([42.0, 42.0].into_iter(), false);
        assert!(flat.to_plot(42.0).is_finite());

        let empty = AxisMapper::from_values(std::iter::empty(), false);
        assert!(empty.to_plot(0.5).is_finite());
    }

    #[test]
    fn test_date_x_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(x_to_date(date_to_x(date)), Some(date));
    }
}
