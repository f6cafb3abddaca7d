use std::path::PathBuf;

use crate::data::loader::{self, LoadError, LoadOptions};
use crate::data::model::TsDataset;
use crate::grid::auto_arrange;

/// Seconds between automatic page advances while playing.
pub const PLAY_INTERVAL: f32 = 0.2;

/// Initial view angles for the 3D surface subplots.
pub const DEFAULT_ROTATION: [f32; 2] = [0.5, 0.4];

// ---------------------------------------------------------------------------
// Shape dialog state
// ---------------------------------------------------------------------------

/// Pending "enter time surface shape" dialog for a headerless file.
#[derive(Debug, Clone)]
pub struct ShapeDialog {
    pub path: PathBuf,
    pub rows_text: String,
    pub cols_text: String,
    pub delimiter_text: String,
    pub has_times: bool,
}

impl ShapeDialog {
    pub fn new(path: PathBuf, defaults: &LoadOptions) -> Self {
        ShapeDialog {
            path,
            rows_text: String::new(),
            cols_text: String::new(),
            delimiter_text: defaults.delimiter.clone().unwrap_or_default(),
            has_times: defaults.has_times,
        }
    }

    /// The options described by the dialog fields, or `None` while the shape
    /// input does not parse.
    pub fn options(&self) -> Option<LoadOptions> {
        let rows: usize = self.rows_text.trim().parse().ok()?;
        let cols: usize = self.cols_text.trim().parse().ok()?;
        if rows == 0 || cols == 0 {
            return None;
        }
        let delimiter = (!self.delimiter_text.is_empty()).then(|| self.delimiter_text.clone());
        Some(LoadOptions {
            shape: Some((rows, cols)),
            has_times: self.has_times,
            delimiter,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<TsDataset>,

    /// Index of the first surface on the current page. Always a multiple of
    /// the page size.
    current: usize,

    /// Subplot arrangement (rows, cols).
    arrangement: (usize, usize),

    /// Whether playback is running.
    pub playing: bool,

    /// Time since the last automatic advance.
    play_accum: f32,

    /// Shared 3D view angles for all surface subplots.
    pub rotation: [f32; 2],

    /// Default options for headerless files (seeded from the CLI).
    pub load_options: LoadOptions,

    /// Open shape dialog, if a headerless file is waiting for its shape.
    pub shape_dialog: Option<ShapeDialog>,

    /// Whether the shortcuts window is open.
    pub show_shortcuts: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Editable texts for the control bar fields.
    pub rows_text: String,
    pub cols_text: String,
    pub index_text: String,
}

impl Default for AppState {
    fn default() -> Self {
        let mut state = AppState {
            dataset: None,
            current: 0,
            arrangement: (2, 2),
            playing: false,
            play_accum: 0.0,
            rotation: DEFAULT_ROTATION,
            load_options: LoadOptions::default(),
            shape_dialog: None,
            show_shortcuts: false,
            status_message: None,
            rows_text: String::new(),
            cols_text: String::new(),
            index_text: String::new(),
        };
        state.reset_control_texts();
        state
    }
}

impl AppState {
    /// Subplot arrangement (rows, cols).
    pub fn arrangement(&self) -> (usize, usize) {
        self.arrangement
    }

    /// Number of surfaces shown per page.
    pub fn page_size(&self) -> usize {
        self.arrangement.0 * self.arrangement.1
    }

    /// Index of the first displayed surface.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Total number of surfaces loaded.
    pub fn total(&self) -> usize {
        self.dataset.as_ref().map(TsDataset::len).unwrap_or(0)
    }

    /// Ingest a newly loaded dataset and reset paging. Datasets smaller than
    /// one page get a best-effort arrangement with fewer empty slots.
    pub fn set_dataset(&mut self, dataset: TsDataset) {
        if !dataset.is_empty() && dataset.len() < self.page_size() {
            self.arrangement = auto_arrange(dataset.len());
        }
        self.dataset = Some(dataset);
        self.current = 0;
        self.playing = false;
        self.play_accum = 0.0;
        self.status_message = None;
        self.reset_control_texts();
    }

    /// Change the subplot arrangement and restart from the first page.
    pub fn rearrange(&mut self, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            self.reset_control_texts();
            return;
        }
        self.arrangement = (rows, cols);
        self.current = 0;
        self.reset_control_texts();
    }

    /// Seek to the page containing `new`.
    ///
    /// The index is aligned down to a page boundary. With `wrap`, running past
    /// either end jumps to the opposite one; otherwise the index clamps to
    /// the first or last page.
    pub fn seek(&mut self, new: isize, wrap: bool) {
        let total = self.total() as isize;
        if total == 0 {
            return;
        }
        let page = self.page_size() as isize;

        let mut new = new - new.rem_euclid(page);

        let last_page = {
            // total % page == 0 would otherwise point one page past the end
            let mut start = page * (total / page);
            if start == total {
                start -= page;
            }
            start
        };

        if wrap {
            if new >= total {
                new = 0;
            }
            if new < 0 {
                new = last_page;
            }
        } else {
            if new >= total {
                new = last_page;
            }
            if new < 0 {
                new = 0;
            }
        }

        self.current = new as usize;
        self.update_index_text();
    }

    /// Seek to the page containing the given 0-based surface index, clamped.
    pub fn set_current(&mut self, idx: isize) {
        self.seek(idx, false);
    }

    /// Show the next page, wrapping past the end.
    pub fn advance(&mut self) {
        self.seek(self.current as isize + self.page_size() as isize, true);
    }

    /// Show the previous page, wrapping before the start.
    pub fn go_back(&mut self) {
        self.seek(self.current as isize - self.page_size() as isize, true);
    }

    /// Start/stop automatic paging. Returns whether playback is now running.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.play_accum = 0.0;
        self.playing
    }

    /// Advance playback time; pages forward once per [`PLAY_INTERVAL`].
    pub fn tick(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.play_accum += dt;
        while self.play_accum >= PLAY_INTERVAL {
            self.play_accum -= PLAY_INTERVAL;
            self.advance();
        }
    }

    /// Sync the control-bar text fields with the actual state. Called after
    /// every change so invalid edits revert.
    pub fn reset_control_texts(&mut self) {
        self.rows_text = self.arrangement.0.to_string();
        self.cols_text = self.arrangement.1.to_string();
        self.update_index_text();
    }

    /// Refresh only the index field. Navigation must not clobber an
    /// arrangement edit in progress.
    fn update_index_text(&mut self) {
        self.index_text = if self.total() == 0 {
            "0".to_string()
        } else {
            (self.current + 1).to_string()
        };
    }

    // -- Loading --------------------------------------------------------

    /// Load a file, opening the shape dialog when the file carries no header
    /// and no shape is known.
    pub fn open_path(&mut self, path: PathBuf) {
        match loader::load_file(&path, &self.load_options) {
            Ok(dataset) => {
                log::info!(
                    "loaded {} surfaces ({}) from {}",
                    dataset.len(),
                    if dataset.is_1d() { "1D" } else { "2D" },
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(err) => match err.downcast_ref::<LoadError>() {
                Some(LoadError::ShapeRequired) => {
                    self.shape_dialog = Some(ShapeDialog::new(path, &self.load_options));
                }
                _ => {
                    log::error!("failed to load {}: {err:#}", path.display());
                    self.status_message = Some(format!("Error: {err:#}"));
                }
            },
        }
    }

    /// Retry a load with the options confirmed in the shape dialog.
    pub fn open_with_options(&mut self, path: PathBuf, options: LoadOptions) {
        match loader::load_file(&path, &options) {
            Ok(dataset) => {
                log::info!("loaded {} surfaces from {}", dataset.len(), path.display());
                self.set_dataset(dataset);
            }
            Err(err) => {
                log::error!("failed to load {}: {err:#}", path.display());
                self.status_message = Some(format!("Error: {err:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{TimeSurface, TsDataset};

    fn state_with(total: usize, rows: usize, cols: usize) -> AppState {
        let surfaces = (0..total)
            .map(|_| TimeSurface::new(1, 3, vec![0.0; 3]).unwrap())
            .collect();
        let mut state = AppState::default();
        state.rearrange(rows, cols);
        state.dataset = Some(TsDataset::new(surfaces, None));
        state
    }

    #[test]
    fn advance_wraps_past_the_end() {
        let mut state = state_with(10, 2, 2);
        assert_eq!(state.current(), 0);
        state.advance();
        assert_eq!(state.current(), 4);
        state.advance();
        assert_eq!(state.current(), 8);
        state.advance();
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn go_back_wraps_to_last_partial_page() {
        let mut state = state_with(10, 2, 2);
        state.go_back();
        assert_eq!(state.current(), 8);
    }

    #[test]
    fn go_back_wraps_when_total_divides_evenly() {
        // 8 % 4 == 0: the last page starts at 4, not 8.
        let mut state = state_with(8, 2, 2);
        state.go_back();
        assert_eq!(state.current(), 4);
    }

    #[test]
    fn seek_clamps_without_wrap() {
        let mut state = state_with(10, 2, 2);
        state.seek(100, false);
        assert_eq!(state.current(), 8);
        state.seek(-5, false);
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn seek_aligns_to_page_boundary() {
        let mut state = state_with(10, 2, 2);
        state.seek(6, false);
        assert_eq!(state.current(), 4);
        state.seek(7, false);
        assert_eq!(state.current(), 4);
    }

    #[test]
    fn page_larger_than_dataset() {
        let mut state = state_with(3, 2, 2);
        state.advance();
        assert_eq!(state.current(), 0);
        state.go_back();
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn rearrange_resets_paging() {
        let mut state = state_with(10, 2, 2);
        state.advance();
        assert_eq!(state.current(), 4);
        state.rearrange(1, 3);
        assert_eq!(state.current(), 0);
        assert_eq!(state.page_size(), 3);
        state.advance();
        assert_eq!(state.current(), 3);
    }

    #[test]
    fn rearrange_rejects_zero() {
        let mut state = state_with(10, 2, 2);
        state.rearrange(0, 3);
        assert_eq!(state.arrangement(), (2, 2));
    }

    #[test]
    fn small_dataset_gets_auto_arranged() {
        let mut state = AppState::default();
        let surfaces = (0..3)
            .map(|_| TimeSurface::new(1, 3, vec![0.0; 3]).unwrap())
            .collect();
        state.set_dataset(TsDataset::new(surfaces, None));
        assert_eq!(state.arrangement(), (1, 3));
    }

    #[test]
    fn playback_ticks_advance_pages() {
        let mut state = state_with(10, 2, 2);
        assert!(state.toggle_play());
        state.tick(PLAY_INTERVAL / 2.0);
        assert_eq!(state.current(), 0);
        state.tick(PLAY_INTERVAL);
        assert_eq!(state.current(), 4);
        assert!(!state.toggle_play());
        state.tick(10.0 * PLAY_INTERVAL);
        assert_eq!(state.current(), 4);
    }

    #[test]
    fn control_texts_follow_state() {
        let mut state = state_with(10, 2, 2);
        state.reset_control_texts();
        assert_eq!(state.rows_text, "2");
        assert_eq!(state.index_text, "1");
        state.advance();
        assert_eq!(state.index_text, "5");
    }

    #[test]
    fn shape_dialog_validation() {
        let mut dialog = ShapeDialog::new(PathBuf::from("x.txt"), &LoadOptions::default());
        assert!(dialog.options().is_none());
        dialog.rows_text = "5".into();
        dialog.cols_text = "abc".into();
        assert!(dialog.options().is_none());
        dialog.cols_text = "5".into();
        dialog.has_times = true;
        dialog.delimiter_text = ",".into();
        let opts = dialog.options().unwrap();
        assert_eq!(opts.shape, Some((5, 5)));
        assert!(opts.has_times);
        assert_eq!(opts.delimiter.as_deref(), Some(","));
    }
}
