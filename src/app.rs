use eframe::egui::{self, Color32, RichText};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const DESCRIPTION: &str = "Box-office gross per movie genre over the years, summarised from \
the TMDB movie metadata. Pick genres and a year range on the left to compare them.";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MovieGenresApp {
    pub state: AppState,
}

impl MovieGenresApp {
    /// Build the app and run the initial (memoized) load.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load_initial();
        Self { state }
    }
}

impl eframe::App for MovieGenresApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Fatal startup error: nothing else is rendered ----
        if let Some(err) = &self.state.startup_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("🎬 Movie genres");
                ui.add_space(8.0);
                ui.label(RichText::new("Could not load the dataset").strong());
                ui.label(RichText::new(err).color(Color32::RED).monospace());
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: title, table, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("🎬 Movie genres");
                    ui.label(DESCRIPTION);
                    ui.add_space(8.0);

                    table::pivot_table(ui, &self.state);
                    ui.add_space(12.0);
                    plot::gross_chart(ui, &self.state);
                });
        });
    }
}
