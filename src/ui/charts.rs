use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, RichText, ScrollArea, Sense, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line,
    Plot, Points,
};

use crate::color::{self, SeriesColors};
use crate::data::aggregate::{CategoryCounts, CorrelationMatrix, Distribution, LongStats, Ranking};
use crate::data::model::Stat;
use crate::data::pipeline::{ChartData, ChartKind, ChartSpec};
use crate::state::AppState;
use crate::ui::table;

const CHART_HEIGHT: f32 = 300.0;
const BAR_FILL: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the raw table followed by every chart of the current payload.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(payload)) = (&state.table, &state.payload) else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Creature catalog dashboard");
            if table.is_empty() {
                ui.label(RichText::new("The loaded file has no records.").italics());
            }
            ui.separator();
            table::raw_table(ui, table, &payload.visible_indices);

            for (idx, chart) in payload.charts.iter().enumerate() {
                ui.separator();
                chart_view(ui, idx, chart, &state.series_colors);
            }
        });
}

fn chart_view(ui: &mut Ui, idx: usize, spec: &ChartSpec, colors: &SeriesColors) {
    ui.strong(spec.title);
    if spec.data.is_empty() {
        ui.label(RichText::new("No records match the current filters.").italics());
        return;
    }

    match (spec.kind, &spec.data) {
        (ChartKind::Histogram, ChartData::Counts(counts)) => histogram(ui, idx, spec, counts),
        (ChartKind::BoxPlot, ChartData::Distribution(dist)) => {
            box_plot(ui, idx, spec, dist, colors)
        }
        (ChartKind::Heatmap, ChartData::Correlation(matrix)) => heatmap(ui, matrix),
        (ChartKind::HorizontalBar, ChartData::Ranking(ranking)) => {
            ranking_bars(ui, idx, spec, ranking)
        }
        (ChartKind::Line, ChartData::LongStats(means)) => stat_lines(ui, idx, spec, means, colors),
        (ChartKind::GroupedBar, ChartData::LongStats(means)) => {
            grouped_bars(ui, idx, spec, means, colors)
        }
        (kind, _) => log::warn!("No renderer for {kind:?} with this projection"),
    }
}

// -- Plot helpers --

fn base_plot(idx: usize, spec: &ChartSpec) -> Plot {
    Plot::new(("chart", idx))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
}

/// Axis formatter that shows `labels[i]` at integer position `i`.
fn category_labels(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn distinct_stats(means: &LongStats) -> Vec<Stat> {
    let mut stats = Vec::new();
    for row in &means.rows {
        if !stats.contains(&row.stat) {
            stats.push(row.stat);
        }
    }
    stats
}

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

fn histogram(ui: &mut Ui, idx: usize, spec: &ChartSpec, counts: &CategoryCounts) {
    let labels: Vec<String> = counts.rows.iter().map(|(label, _)| label.clone()).collect();
    let bars: Vec<Bar> = counts
        .rows
        .iter()
        .enumerate()
        .map(|(i, (label, n))| Bar::new(i as f64, *n as f64).name(label).width(0.8))
        .collect();

    base_plot(idx, spec)
        .x_axis_formatter(category_labels(labels))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .show(ui, |plot_ui| {
            let name = format!("{} ({} total)", spec.y_label, counts.total());
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_FILL).name(name));
        });
}

fn box_plot(
    ui: &mut Ui,
    idx: usize,
    spec: &ChartSpec,
    dist: &Distribution,
    colors: &SeriesColors,
) {
    let series: Vec<Option<String>> = match dist.series() {
        names if names.is_empty() => vec![None],
        names => names.into_iter().map(Some).collect(),
    };
    let slot = 0.8 / series.len() as f64;

    base_plot(idx, spec)
        .x_axis_formatter(category_labels(dist.category_order.clone()))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .show(ui, |plot_ui| {
            for (s_idx, name) in series.iter().enumerate() {
                let color = name
                    .as_deref()
                    .map_or(BAR_FILL, |n| colors.color_for(n));
                let offset = (s_idx as f64 - (series.len() - 1) as f64 / 2.0) * slot;

                let mut boxes = Vec::new();
                let mut outliers: Vec<[f64; 2]> = Vec::new();
                for group in dist.groups.iter().filter(|g| &g.series == name) {
                    let Some(pos) = dist.category_order.iter().position(|c| c == &group.category)
                    else {
                        continue;
                    };
                    let Some(summary) = group.summary() else {
                        continue;
                    };
                    let x = pos as f64 + offset;
                    boxes.push(
                        BoxElem::new(
                            x,
                            BoxSpread::new(
                                summary.lower_whisker,
                                summary.q1,
                                summary.median,
                                summary.q3,
                                summary.upper_whisker,
                            ),
                        )
                        .name(&group.category)
                        .box_width(slot * 0.8)
                        .whisker_width(slot * 0.4),
                    );
                    outliers.extend(summary.outliers.iter().map(|&v| [x, v]));
                }

                let mut plot = BoxPlot::new(boxes).color(color);
                if let Some(n) = name {
                    plot = plot.name(n);
                }
                plot_ui.box_plot(plot);
                if !outliers.is_empty() {
                    plot_ui.points(Points::new(outliers).radius(2.5).color(color));
                }
            }
        });
}

fn ranking_bars(ui: &mut Ui, idx: usize, spec: &ChartSpec, ranking: &Ranking) {
    // Highest value at the top: rank 0 gets the largest y position.
    let n = ranking.rows.len();
    let labels: Vec<String> = ranking.rows.iter().rev().map(|r| r.name.clone()).collect();
    let bars: Vec<Bar> = ranking
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| Bar::new((n - 1 - i) as f64, r.value).name(&r.name).width(0.7))
        .collect();

    base_plot(idx, spec)
        .y_axis_formatter(category_labels(labels))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .color(BAR_FILL)
                    .name(spec.x_label),
            );
        });
}

fn stat_lines(
    ui: &mut Ui,
    idx: usize,
    spec: &ChartSpec,
    means: &LongStats,
    colors: &SeriesColors,
) {
    let keys = means.keys();
    let stats = distinct_stats(means);

    base_plot(idx, spec)
        .x_axis_formatter(category_labels(keys.clone()))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .show(ui, |plot_ui| {
            for stat in stats {
                let color = colors.color_for(stat.label());
                let points: Vec<[f64; 2]> = keys
                    .iter()
                    .enumerate()
                    .filter_map(|(i, key)| means.get(key, stat).map(|v| [i as f64, v]))
                    .collect();
                plot_ui.line(
                    Line::new(points.clone())
                        .name(stat.label())
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(Points::new(points).radius(3.0).color(color));
            }
        });
}

fn grouped_bars(
    ui: &mut Ui,
    idx: usize,
    spec: &ChartSpec,
    means: &LongStats,
    colors: &SeriesColors,
) {
    let keys = means.keys();
    let stats = distinct_stats(means);
    let slot = 0.8 / stats.len().max(1) as f64;

    base_plot(idx, spec)
        .x_axis_formatter(category_labels(keys.clone()))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .show(ui, |plot_ui| {
            for (s_idx, &stat) in stats.iter().enumerate() {
                let offset = (s_idx as f64 - (stats.len() - 1) as f64 / 2.0) * slot;
                let bars: Vec<Bar> = keys
                    .iter()
                    .enumerate()
                    .filter_map(|(i, key)| {
                        means
                            .get(key, stat)
                            .map(|v| Bar::new(i as f64 + offset, v).name(key).width(slot))
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(stat.label())
                        .color(colors.color_for(stat.label())),
                );
            }
        });
}

/// Correlation grid painted cell by cell; egui_plot has no heatmap item.
fn heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    const LABEL: f32 = 64.0;
    const CELL: f32 = 52.0;

    let n = matrix.stats.len();
    let size = egui::vec2(LABEL + CELL * n as f32, CELL * n as f32 + 24.0);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();

    for (i, row_stat) in matrix.stats.iter().enumerate() {
        let y = rect.top() + CELL * i as f32;
        painter.text(
            egui::pos2(rect.left() + LABEL - 6.0, y + CELL / 2.0),
            Align2::RIGHT_CENTER,
            row_stat.label(),
            font.clone(),
            text_color,
        );

        for (j, col_stat) in matrix.stats.iter().enumerate() {
            let value = matrix.get(*row_stat, *col_stat).unwrap_or(f64::NAN);
            let cell = egui::Rect::from_min_size(
                egui::pos2(rect.left() + LABEL + CELL * j as f32, y),
                egui::vec2(CELL, CELL),
            );
            painter.rect_filled(cell.shrink(1.0), 2.0, color::diverging(value));
            let label = if value.is_nan() {
                "NaN".to_string()
            } else {
                format!("{value:.2}")
            };
            let ink = if value.abs() > 0.6 {
                Color32::WHITE
            } else {
                Color32::BLACK
            };
            painter.text(cell.center(), Align2::CENTER_CENTER, label, font.clone(), ink);
        }
    }

    for (j, col_stat) in matrix.stats.iter().enumerate() {
        painter.text(
            egui::pos2(
                rect.left() + LABEL + CELL * j as f32 + CELL / 2.0,
                rect.top() + CELL * n as f32 + 4.0,
            ),
            Align2::CENTER_TOP,
            col_stat.label(),
            font.clone(),
            text_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_at_integer_marks() {
        let fmt = category_labels(vec!["Fire".to_string(), "Water".to_string()]);
        let range = 0.0..=1.0;

        let at = |value: f64| {
            fmt(
                GridMark {
                    value,
                    step_size: 1.0,
                },
                &range,
            )
        };
        assert_eq!(at(0.0), "Fire");
        assert_eq!(at(1.0), "Water");
        assert_eq!(at(0.5), "");
        assert_eq!(at(2.0), "");
        assert_eq!(at(-1.0), "");
    }
}
