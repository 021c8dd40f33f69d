use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Record, Table, REQUIRED_COLUMNS};

/// Height of the scrollable raw-data grid.
const RAW_TABLE_HEIGHT: f32 = 260.0;
const ROW_HEIGHT: f32 = 18.0;

/// Render the filtered records as a scrollable grid.
pub fn raw_table(ui: &mut Ui, table: &Table, indices: &[usize]) {
    ui.label(format!("Catalog records ({} rows)", indices.len()));

    ui.push_id("raw_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(RAW_TABLE_HEIGHT)
            .columns(Column::auto().at_least(48.0), REQUIRED_COLUMNS.len())
            .header(20.0, |mut header| {
                for name in REQUIRED_COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, indices.len(), |mut row| {
                    let record = table.record(indices[row.index()]);
                    for cell in cells(record) {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// Display text for each required column, in header order.
fn cells(rec: &Record) -> [String; 13] {
    [
        rec.dexnum.to_string(),
        rec.name.clone(),
        rec.type1.clone(),
        rec.generation.clone(),
        rec.special_group.clone(),
        rec.hp.to_string(),
        rec.attack.to_string(),
        rec.defense.to_string(),
        rec.speed.to_string(),
        rec.sp_atk.to_string(),
        rec.sp_def.to_string(),
        format!("{:.2}", rec.height),
        format!("{:.2}", rec.weight),
    ]
}
