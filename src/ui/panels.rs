use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Choice;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No catalog loaded.");
        return;
    }

    let mut selection = state.selection.clone();

    ui.strong("Generation");
    choice_combo(ui, "generation", &state.options.generations, &mut selection.generation);
    ui.add_space(8.0);

    ui.strong("Type");
    choice_combo(ui, "type1", &state.options.types, &mut selection.type1);

    if selection != state.selection {
        state.select(selection);
    }
}

/// A combo box over a sentinel-prefixed option list.
fn choice_combo<T>(ui: &mut Ui, id: &str, options: &[Choice<T>], current: &mut Choice<T>)
where
    T: Clone + PartialEq + std::fmt::Display,
{
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui
                    .selectable_label(current == option, option.to_string())
                    .clicked()
                {
                    *current = option.clone();
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Dexboard");
        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} records loaded, {} visible",
                table.len(),
                state.visible_count()
            ));
            ui.separator();
            ui.label(
                RichText::new(state.source.display().to_string()).color(Color32::GRAY),
            );
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Load failure
// ---------------------------------------------------------------------------

/// Shown in place of the dashboard when the catalog could not be loaded.
pub fn load_error(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading("The catalog could not be loaded");
        ui.add_space(8.0);
        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        ui.add_space(12.0);
        if ui.button("Open data file…").clicked() {
            open_file_dialog(state);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open creature catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}
