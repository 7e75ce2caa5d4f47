use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::YearRange;
use crate::state::AppState;
use crate::ui::table::format_gross;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: genre multi-select and year range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    if dataset.is_empty() {
        ui.label("The dataset has no rows.");
        return;
    }
    let genres = dataset.genres().to_vec();

    year_range_widget(ui, state);
    ui.separator();

    // ---- Genre multi-select ----
    let header_text = format!("Genres  ({}/{})", state.selected_genres.len(), genres.len());
    ui.strong(header_text);
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_genres();
        }
        if ui.small_button("None").clicked() {
            state.select_no_genres();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for genre in &genres {
                let mut checked = state.selected_genres.contains(genre);
                let text = RichText::new(genre).color(state.color_map.color_for(genre));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_genre(genre);
                }
            }
        });
}

/// Two sliders bounded by the dataset years; the window stays ordered.
fn year_range_widget(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Years");
    let Some(bounds) = state.year_bounds else {
        ui.label("No years in dataset.");
        return;
    };

    let mut low = state.years.low;
    let mut high = state.years.high;
    let from = ui.add(egui::Slider::new(&mut low, bounds.low..=bounds.high).text("from"));
    let to = ui.add(egui::Slider::new(&mut high, bounds.low..=bounds.high).text("to"));

    if from.changed() && low > high {
        high = low;
    }
    if to.changed() && high < low {
        low = high;
    }
    if from.changed() || to.changed() {
        state.set_years(YearRange::new(low, high));
    }

    ui.label(format!("Showing {}", state.years));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.table.is_empty(), egui::Button::new("Export table…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} years × {} genres shown, total ${}",
                ds.len(),
                state.table.years().len(),
                state.table.genres().len(),
                format_gross(state.table.total())
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open genre summary")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export table")
        .add_filter("CSV", &["csv"])
        .set_file_name("genre_gross_by_year.csv")
        .save_file();

    if let Some(path) = file {
        state.export_table(&path);
    }
}
