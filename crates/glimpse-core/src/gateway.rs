//! Drag-and-drop and open-dialog intake.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{GlimpseError, Result};

/// Drop notifications, independent of any windowing toolkit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileDropEvent {
    Hovered,
    Left,
    Dropped(Vec<PathBuf>),
}

/// A source of native drop notifications, e.g. an adapter over the host
/// toolkit's raw input.
pub trait ExternalEventSource {
    fn poll_drop_events(&mut self) -> Vec<FileDropEvent>;
}

/// Ask the external loader to open `path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct DropGateway {
    extensions: Vec<String>,
    highlighted: bool,
}

impl DropGateway {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_ascii_lowercase()).collect(),
            highlighted: false,
        }
    }

    /// Case-insensitive extension check against the allow-list.
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)))
    }

    /// Drag-hover feedback flag.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Only the first supported path of a drop is forwarded. Everything else
    /// in the same gesture is discarded.
    pub fn handle(&mut self, event: FileDropEvent) -> Option<LoadRequest> {
        match event {
            FileDropEvent::Hovered => {
                self.highlighted = true;
                None
            }
            FileDropEvent::Left => {
                self.highlighted = false;
                None
            }
            FileDropEvent::Dropped(paths) => {
                self.highlighted = false;
                let count = paths.len();
                let request = paths
                    .into_iter()
                    .find(|p| self.is_supported(p))
                    .map(|path| LoadRequest { path });
                match &request {
                    Some(req) => info!(path = %req.path.display(), dropped = count, "Accepted drop"),
                    None => debug!(dropped = count, "Ignored drop with no supported files"),
                }
                request
            }
        }
    }

    /// Drain a source and return the last load request it produced.
    pub fn drain(&mut self, source: &mut dyn ExternalEventSource) -> Option<LoadRequest> {
        source
            .poll_drop_events()
            .into_iter()
            .filter_map(|event| self.handle(event))
            .last()
    }

    /// Result of an open-file dialog; same validation as a drop.
    pub fn open_path(&self, path: Option<PathBuf>) -> Option<LoadRequest> {
        path.and_then(|path| self.request_for(path).ok())
    }

    /// Validate a single explicit path, e.g. from the command line.
    pub fn request_for(&self, path: PathBuf) -> Result<LoadRequest> {
        if self.is_supported(&path) {
            Ok(LoadRequest { path })
        } else {
            Err(GlimpseError::UnsupportedFile(path.display().to_string()))
        }
    }
}
