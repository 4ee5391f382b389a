#![allow(dead_code)]

use glimpse_core::geometry::{ContainerRect, ScreenPoint};
use glimpse_core::surface::RasterBuffer;
use glimpse_core::viewer::{PipelineEvent, Viewer};

/// 800x600 viewport at the window origin.
pub const CONTAINER: ContainerRect = ContainerRect::new(0.0, 0.0, 800.0, 600.0);

pub fn pt(x: f32, y: f32) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

/// Build a buffer filled with a single RGBA colour.
pub fn solid_buffer(width: u32, height: u32, rgba: [u8; 4]) -> RasterBuffer {
    let pixels = rgba
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * 4)
        .collect();
    RasterBuffer::new(width, height, pixels).expect("valid buffer")
}

/// Viewer with an original loaded and, optionally, a processed result.
pub fn loaded_viewer(with_processed: bool) -> Viewer {
    let mut viewer = Viewer::default();
    viewer.apply_pipeline_event(PipelineEvent::LoadStarted);
    viewer.apply_pipeline_event(PipelineEvent::OriginalLoaded(solid_buffer(
        64,
        48,
        [200, 10, 10, 255],
    )));
    if with_processed {
        viewer.apply_pipeline_event(PipelineEvent::ProcessingStarted);
        viewer.apply_pipeline_event(PipelineEvent::ProcessedReady(solid_buffer(
            64,
            48,
            [10, 200, 10, 255],
        )));
    }
    viewer
}
