use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 260.0;

/// Whole dollars with thousands separators: `1234567.8` → `1,234,568`.
pub fn format_gross(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Pivot table (central panel, above the chart)
// ---------------------------------------------------------------------------

/// Render the year × genre table.
pub fn pivot_table(ui: &mut Ui, state: &AppState) {
    let table = &state.table;
    if table.is_empty() {
        ui.label(RichText::new("No rows match the current filters.").italics());
        return;
    }

    let genres = table.genres();
    let rows: Vec<(i32, &[f64])> = table.rows().collect();

    TableBuilder::new(ui)
        .id_salt("pivot_table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
        .column(Column::auto().at_least(60.0))
        .columns(Column::auto().at_least(90.0), genres.len())
        .max_scroll_height(MAX_TABLE_HEIGHT)
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Year");
            });
            for genre in genres {
                header.col(|ui| {
                    ui.label(
                        RichText::new(genre)
                            .strong()
                            .color(state.color_map.color_for(genre)),
                    );
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let (year, values) = rows[row.index()];
                row.col(|ui| {
                    ui.label(year.to_string());
                });
                for &value in values {
                    row.col(|ui| {
                        ui.monospace(format_gross(value));
                    });
                }
            });
        });
}
