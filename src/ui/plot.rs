use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::data::pivot::LongRow;
use crate::state::AppState;

pub const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Ordinal year axis
// ---------------------------------------------------------------------------

/// Maps the distinct years of a chart to evenly spaced x positions
/// `0, 1, 2, …` in ascending order, so gaps between years are not drawn
/// to scale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearAxis {
    years: Vec<i32>,
}

impl YearAxis {
    pub fn from_rows(rows: &[LongRow]) -> Self {
        let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        Self { years }
    }

    pub fn position(&self, year: i32) -> Option<f64> {
        self.years.binary_search(&year).ok().map(|i| i as f64)
    }

    /// Tick label for an x value; only exact category positions get one.
    pub fn label(&self, x: f64) -> String {
        if x < 0.0 || x.fract() != 0.0 {
            return String::new();
        }
        self.years
            .get(x as usize)
            .map(|y| y.to_string())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Series: one line per genre
// ---------------------------------------------------------------------------

/// Points of one genre line, sorted by x.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreSeries {
    pub genre: String,
    pub points: Vec<[f64; 2]>,
}

/// Group long-form rows into per-genre series on `axis`.
pub fn build_series(rows: &[LongRow], axis: &YearAxis) -> Vec<GenreSeries> {
    let mut by_genre: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for row in rows {
        if let Some(x) = axis.position(row.year) {
            by_genre
                .entry(row.genre.as_str())
                .or_default()
                .push([x, row.gross]);
        }
    }
    by_genre
        .into_iter()
        .map(|(genre, mut points)| {
            points.sort_by(|a, b| a[0].total_cmp(&b[0]));
            GenreSeries {
                genre: genre.to_string(),
                points,
            }
        })
        .collect()
}

/// Render the gross-by-year line chart.
pub fn gross_chart(ui: &mut Ui, state: &AppState) {
    let axis = YearAxis::from_rows(&state.long_form);
    let series = build_series(&state.long_form, &axis);

    let tick_axis = axis.clone();
    let hover_axis = axis;

    Plot::new("gross_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Gross ($)")
        .x_axis_formatter(move |mark, _range| tick_axis.label(mark.value))
        .label_formatter(move |name, value| {
            let year = hover_axis.label(value.x.round());
            if name.is_empty() {
                year
            } else {
                format!("{name}\n{year}: ${}", super::table::format_gross(value.y))
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let color = state.color_map.color_for(&s.genre);
                let points: PlotPoints = s.points.into_iter().collect();
                let line = Line::new(points)
                    .name(&s.genre)
                    .color(color)
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}
