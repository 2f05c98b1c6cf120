//! Pure chart assembly: (tables, selection, color) -> ChartSpec.
//!
//! The UI layer re-runs this on every interaction and only renders the
//! result; nothing here performs I/O or touches egui widgets.

use chrono::NaiveDate;
use eframe::egui::Color32;

use crate::config;
use crate::data::models::{BankTable, BenchmarkTable};
use crate::error::DataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Left,
    Right,
}

/// Which vertical scale a series is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisId {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePattern {
    Solid,
    DashDot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub title: &'static str,
    pub side: AxisSide,
    /// Larger values drawn lower when set
    pub inverted: bool,
}

/// Per-series style overrides. Bank series carry no overrides and take
/// whatever the renderer's palette assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub color: Option<Color32>,
    pub width: Option<f32>,
    pub pattern: StrokePattern,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: None,
            width: None,
            pattern: StrokePattern::Solid,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub axis: AxisId,
    pub points: Vec<(NaiveDate, f64)>,
    pub style: SeriesStyle,
}

/// A fully specified chart, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub legend_title: &'static str,
    pub primary: AxisSpec,
    pub secondary: AxisSpec,
    pub series: Vec<Series>,
}

/// First five labels of the sorted universe, or all of them if fewer
pub fn default_selection(universe: &[String]) -> Vec<String> {
    universe
        .iter()
        .take(config::DEFAULT_SELECTION)
        .cloned()
        .collect()
}

/// Build the dual-axis chart: one line per selected bank on the inverted
/// primary axis, plus the styled benchmark line on the secondary axis.
pub fn build_chart(
    banks: &BankTable,
    benchmark: &BenchmarkTable,
    selected: &[String],
    benchmark_color: Color32,
) -> Result<ChartSpec, DataError> {
    if selected.is_empty() {
        return Err(DataError::EmptySelection);
    }

    let filtered = banks.filter(selected);
    if filtered.is_empty() || benchmark.is_empty() {
        return Err(DataError::NoMatchingRows);
    }

    let mut series: Vec<Series> = selected
        .iter()
        .map(|bank| Series {
            label: bank.clone(),
            axis: AxisId::Primary,
            points: filtered
                .rows_for(bank)
                .map(|r| (r.date, r.close))
                .collect(),
            style: SeriesStyle::default(),
        })
        .collect();

    series.push(Series {
        label: config::BENCHMARK_NAME.to_string(),
        axis: AxisId::Secondary,
        points: benchmark.rows.iter().map(|r| (r.date, r.close)).collect(),
        style: SeriesStyle {
            color: Some(benchmark_color),
            width: Some(config::BENCHMARK_LINE_WIDTH),
            pattern: StrokePattern::DashDot,
        },
    });

    Ok(ChartSpec {
        title: config::CHART_TITLE,
        legend_title: config::LEGEND_TITLE,
        primary: AxisSpec {
            title: config::PRIMARY_AXIS_TITLE,
            side: AxisSide::Left,
            inverted: true,
        },
        secondary: AxisSpec {
            title: config::SECONDARY_AXIS_TITLE,
            side: AxisSide::Right,
            inverted: false,
        },
        series,
    })
}
