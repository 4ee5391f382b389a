use std::path::PathBuf;
use std::time::Duration;

use glimpse_core::surface::{RasterBuffer, SurfaceId};

use crate::states::ProcessingSettings;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode an image from disk and keep it as the processing source.
    LoadOriginal { path: PathBuf },

    /// Produce a processed preview of the cached original.
    Process {
        settings: ProcessingSettings,
        generation: u64,
    },
}

/// Size and timing of one processing run.
#[derive(Clone, Copy, Debug)]
pub struct ProcessStats {
    pub encoded_size: usize,
    pub savings_percent: f32,
    pub elapsed: Duration,
}

/// Results sent from worker (and dialog) threads back to UI thread.
pub enum WorkerResult {
    OriginalLoaded {
        path: PathBuf,
        buffer: RasterBuffer,
        file_size: usize,
    },

    ProcessedReady {
        buffer: RasterBuffer,
        stats: ProcessStats,
        /// Matches the `Process` command that produced it.
        generation: u64,
    },

    /// Open-file dialog closed, with or without a selection.
    DialogClosed { path: Option<PathBuf> },

    /// A `Process` command failed; tagged like `ProcessedReady`.
    ProcessingFailed {
        message: String,
        generation: u64,
    },

    Error {
        surface: SurfaceId,
        message: String,
    },
    Log {
        message: String,
    },
}
