use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::SeriesColors;
use crate::data::aggregate::COMPARED_GROUPS;
use crate::data::filter::{FilterOptions, Selection};
use crate::data::loader::load_file;
use crate::data::model::{Table, ALL_STATS};
use crate::data::pipeline::{on_selection_change, RenderPayload};

/// File read at startup from the working directory.
pub const DEFAULT_DATA_FILE: &str = "pokemon_data.csv";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the catalog was (or failed to be) read from.
    pub source: PathBuf,

    /// Loaded catalog, immutable for the rest of the session.
    pub table: Option<Arc<Table>>,

    /// Values offered by the two filter controls.
    pub options: FilterOptions,

    /// Current filter selection.
    pub selection: Selection,

    /// Pipeline output for `selection`.
    pub payload: Option<RenderPayload>,

    /// Colours for multi-series charts.
    pub series_colors: SeriesColors,

    /// Load error shown instead of the dashboard.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the catalog once. A failure leaves the state without a table and
    /// with the error message set.
    pub fn load(path: &Path) -> Self {
        let mut state = AppState {
            source: path.to_path_buf(),
            table: None,
            options: FilterOptions::default(),
            selection: Selection::default(),
            payload: None,
            series_colors: default_series_colors(),
            status_message: None,
        };
        state.load_from(path);
        state
    }

    /// Retry after a failed startup load. A session keeps the first table it
    /// successfully loads.
    pub fn load_from(&mut self, path: &Path) {
        if self.table.is_some() {
            log::warn!("Ignoring load of {}: catalog already loaded", path.display());
            return;
        }
        self.source = path.to_path_buf();
        match load_file(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error loading {}: {e}", path.display()));
            }
        }
    }

    /// Ingest the loaded table, populate filter options and run the pipeline
    /// for the default selection.
    fn set_table(&mut self, table: Table) {
        let table = Arc::new(table);
        self.options = FilterOptions::from_table(&table);
        self.selection = Selection::default();
        self.payload = Some(on_selection_change(&table, &self.selection));
        self.table = Some(table);
        self.status_message = None;
    }

    /// Handle a filter change. An unchanged selection keeps the current
    /// payload; any other selection re-runs the full pipeline.
    pub fn select(&mut self, selection: Selection) {
        if selection == self.selection && self.payload.is_some() {
            return;
        }
        self.selection = selection;
        if let Some(table) = &self.table {
            self.payload = Some(on_selection_change(table, &self.selection));
        }
    }

    /// Number of rows currently shown.
    pub fn visible_count(&self) -> usize {
        self.payload
            .as_ref()
            .map_or(0, |p| p.visible_indices.len())
    }
}

fn default_series_colors() -> SeriesColors {
    let labels: Vec<&str> = ALL_STATS
        .iter()
        .map(|s| s.label())
        .chain(COMPARED_GROUPS)
        .collect();
    SeriesColors::new(&labels)
}
