use std::sync::Arc;

use tracing::debug;

use crate::consts::RGBA_CHANNELS;
use crate::error::{GlimpseError, Result};
use crate::transform::ViewportTransform;

/// Raw RGBA8 pixels at native resolution.
///
/// Pixels are shared behind an `Arc` so handing a buffer from the worker to
/// the renderer never copies the bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Arc<Vec<u8>>,
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GlimpseError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * RGBA_CHANNELS;
        if pixels.len() != expected {
            return Err(GlimpseError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: Arc::new(pixels),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    Original,
    Processed,
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Processed => write!(f, "processed"),
        }
    }
}

/// Status signals from the external pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineStatus {
    pub is_loading: bool,
    pub is_processing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// No processed result exists yet; shown instead of a processed layer.
    Optimizing,
    /// A previous processed result stays visible while a new one is computed.
    Updating,
}

/// What the view layer should draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderPlan {
    Empty,
    Loading,
    /// Original only, unclipped. There is nothing to reveal.
    Single { overlay: Option<Overlay> },
    /// Both layers, split at `reveal_position` percent of the viewport width.
    Compare {
        reveal_position: f32,
        overlay: Option<Overlay>,
    },
}

impl RenderPlan {
    pub fn shows_divider(&self) -> bool {
        matches!(self, Self::Compare { .. })
    }
}

#[derive(Debug, Default)]
struct Surface {
    buffer: Option<RasterBuffer>,
    revision: u64,
}

/// Holds the original and processed surfaces.
///
/// Painting stores buffers exactly as received. All visual scaling is done
/// by the shared [`ViewportTransform`] at display time.
#[derive(Debug, Default)]
pub struct SurfaceRenderer {
    original: Surface,
    processed: Surface,
}

impl SurfaceRenderer {
    /// Replace a surface's content. Its dimensions become the buffer's.
    pub fn paint(&mut self, id: SurfaceId, buffer: RasterBuffer) {
        debug!(
            surface = %id,
            width = buffer.width(),
            height = buffer.height(),
            "Painting surface"
        );
        let surface = self.surface_mut(id);
        surface.buffer = Some(buffer);
        surface.revision += 1;
    }

    pub fn clear(&mut self, id: SurfaceId) {
        let surface = self.surface_mut(id);
        if surface.buffer.take().is_some() {
            surface.revision += 1;
            debug!(surface = %id, "Cleared surface");
        }
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&RasterBuffer> {
        match id {
            SurfaceId::Original => self.original.buffer.as_ref(),
            SurfaceId::Processed => self.processed.buffer.as_ref(),
        }
    }

    pub fn has_surface(&self, id: SurfaceId) -> bool {
        self.surface(id).is_some()
    }

    /// Bumped on every paint and every effective clear.
    pub fn revision(&self, id: SurfaceId) -> u64 {
        match id {
            SurfaceId::Original => self.original.revision,
            SurfaceId::Processed => self.processed.revision,
        }
    }

    /// Content-space extent both layers are displayed over: the original's
    /// native size.
    pub fn content_size(&self) -> Option<(u32, u32)> {
        self.original
            .buffer
            .as_ref()
            .map(|b| (b.width(), b.height()))
    }

    /// Display transform string applied identically to both layers.
    pub fn transform_css(&self, transform: &ViewportTransform) -> String {
        transform.css()
    }

    pub fn render_plan(&self, status: PipelineStatus, reveal_position: f32) -> RenderPlan {
        if self.original.buffer.is_none() {
            return if status.is_loading {
                RenderPlan::Loading
            } else {
                RenderPlan::Empty
            };
        }

        if self.processed.buffer.is_none() {
            return RenderPlan::Single {
                overlay: status.is_processing.then_some(Overlay::Optimizing),
            };
        }

        RenderPlan::Compare {
            reveal_position,
            overlay: status.is_processing.then_some(Overlay::Updating),
        }
    }

    fn surface_mut(&mut self, id: SurfaceId) -> &mut Surface {
        match id {
            SurfaceId::Original => &mut self.original,
            SurfaceId::Processed => &mut self.processed,
        }
    }
}
