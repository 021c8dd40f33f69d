use super::aggregate::{
    self, CategoryCounts, CorrelationMatrix, Distribution, LongStats, Ranking,
};
use super::filter::{apply_filters, Selection};
use super::model::Table;

// ---------------------------------------------------------------------------
// Chart specifications handed to the presentation surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    BoxPlot,
    Heatmap,
    HorizontalBar,
    Line,
    GroupedBar,
}

/// The projection behind a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Counts(CategoryCounts),
    Distribution(Distribution),
    Correlation(CorrelationMatrix),
    Ranking(Ranking),
    LongStats(LongStats),
}

impl ChartData {
    /// Whether the underlying projection has no rows to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Counts(c) => c.is_empty(),
            ChartData::Distribution(d) => d.is_empty(),
            ChartData::Correlation(m) => m.is_empty(),
            ChartData::Ranking(r) => r.is_empty(),
            ChartData::LongStats(l) => l.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Legend title when the chart has several series.
    pub series_label: Option<&'static str>,
    pub data: ChartData,
}

/// Everything the dashboard draws for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    pub selection: Selection,
    /// Table rows shown in the raw-data grid.
    pub visible_indices: Vec<usize>,
    pub charts: Vec<ChartSpec>,
}

// ---------------------------------------------------------------------------
// Event handler
// ---------------------------------------------------------------------------

/// Re-run the whole pipeline for a new selection: filter, then derive every
/// chart from the filtered view.
pub fn on_selection_change(table: &Table, selection: &Selection) -> RenderPayload {
    let view = apply_filters(table, selection);
    log::debug!("{selection}: {} of {} records visible", view.len(), table.len());

    let charts = vec![
        ChartSpec {
            kind: ChartKind::Histogram,
            title: "Creatures per primary type",
            x_label: "Primary type",
            y_label: "Count",
            series_label: None,
            data: ChartData::Counts(aggregate::type_histogram(&view)),
        },
        ChartSpec {
            kind: ChartKind::BoxPlot,
            title: "Attack distribution by generation",
            x_label: "Generation",
            y_label: "Attack",
            series_label: None,
            data: ChartData::Distribution(aggregate::attack_by_generation(&view)),
        },
        ChartSpec {
            kind: ChartKind::BoxPlot,
            title: "Ordinary vs legendary base stats",
            x_label: "Stat",
            y_label: "Value",
            series_label: Some("Special group"),
            data: ChartData::Distribution(aggregate::special_group_comparison(&view)),
        },
        ChartSpec {
            kind: ChartKind::Heatmap,
            title: "Stat correlation",
            x_label: "Stat",
            y_label: "Stat",
            series_label: Some("Correlation"),
            data: ChartData::Correlation(aggregate::stat_correlation(&view)),
        },
        ChartSpec {
            kind: ChartKind::HorizontalBar,
            title: "Top 10 tallest (m)",
            x_label: "Height (m)",
            y_label: "Name",
            series_label: None,
            data: ChartData::Ranking(aggregate::top_by_height(&view)),
        },
        ChartSpec {
            kind: ChartKind::HorizontalBar,
            title: "Top 10 heaviest (kg)",
            x_label: "Weight (kg)",
            y_label: "Name",
            series_label: None,
            data: ChartData::Ranking(aggregate::top_by_weight(&view)),
        },
        ChartSpec {
            kind: ChartKind::Line,
            title: "Mean base stats by generation",
            x_label: "Generation",
            y_label: "Mean",
            series_label: Some("Stat"),
            data: ChartData::LongStats(aggregate::mean_stats_by_generation(&view)),
        },
        ChartSpec {
            kind: ChartKind::BoxPlot,
            title: "Speed distribution by type",
            x_label: "Primary type",
            y_label: "Speed",
            series_label: None,
            data: ChartData::Distribution(aggregate::speed_by_type(&view)),
        },
        ChartSpec {
            kind: ChartKind::GroupedBar,
            title: "Mean stats by type",
            x_label: "Primary type",
            y_label: "Mean",
            series_label: Some("Stat"),
            data: ChartData::LongStats(aggregate::mean_stats_by_type(&view)),
        },
    ];

    RenderPayload {
        selection: selection.clone(),
        visible_indices: view.indices().to_vec(),
        charts,
    }
}
