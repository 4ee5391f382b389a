use std::path::PathBuf;

use crate::messages::ProcessStats;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    /// Size of the original file on disk, in bytes.
    pub original_size: Option<usize>,
    pub processed_dims: Option<(u32, u32)>,
    pub last_stats: Option<ProcessStats>,

    /// Bumped for every processing request; older results are stale.
    pub process_generation: u64,
    /// Generation of the `Process` command still awaiting a reply.
    pub in_flight: Option<u64>,

    /// A native open dialog is showing.
    pub dialog_open: bool,
    pub show_about: bool,
    /// Files are being dragged over the window.
    pub drop_hovering: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Modal UI that should keep viewport shortcuts from firing.
    pub fn is_modal(&self) -> bool {
        self.dialog_open || self.show_about
    }

    /// Start a new processing generation and return it.
    pub fn next_generation(&mut self) -> u64 {
        self.process_generation += 1;
        self.process_generation
    }

    pub fn clear_image(&mut self) {
        self.file_path = None;
        self.original_size = None;
        self.processed_dims = None;
        self.last_stats = None;
    }
}
