mod common;

use common::solid_buffer;
use glimpse_core::error::GlimpseError;
use glimpse_core::surface::{
    Overlay, PipelineStatus, RasterBuffer, RenderPlan, SurfaceId, SurfaceRenderer,
};
use glimpse_core::transform::ViewportTransform;

const IDLE: PipelineStatus = PipelineStatus {
    is_loading: false,
    is_processing: false,
};
const PROCESSING: PipelineStatus = PipelineStatus {
    is_loading: false,
    is_processing: true,
};

#[test]
fn test_buffer_rejects_bad_length() {
    let err = RasterBuffer::new(4, 4, vec![0; 63]).unwrap_err();
    assert!(matches!(
        err,
        GlimpseError::BufferSizeMismatch {
            expected: 64,
            actual: 63,
            ..
        }
    ));
}

#[test]
fn test_buffer_rejects_zero_dimensions() {
    let err = RasterBuffer::new(0, 10, Vec::new()).unwrap_err();
    assert!(matches!(err, GlimpseError::InvalidDimensions { width: 0, height: 10 }));
}

#[test]
fn test_paint_keeps_native_dimensions_and_bytes() {
    let mut renderer = SurfaceRenderer::default();
    let pixels: Vec<u8> = (0..3 * 2 * 4).map(|i| i as u8).collect();
    let buffer = RasterBuffer::new(3, 2, pixels.clone()).unwrap();

    renderer.paint(SurfaceId::Original, buffer);
    let painted = renderer.surface(SurfaceId::Original).unwrap();
    assert_eq!((painted.width(), painted.height()), (3, 2));
    assert_eq!(painted.pixels(), pixels.as_slice());
    assert_eq!(painted.byte_len(), 24);
}

#[test]
fn test_processed_may_differ_in_size() {
    let mut renderer = SurfaceRenderer::default();
    renderer.paint(SurfaceId::Original, solid_buffer(64, 48, [1, 2, 3, 255]));
    renderer.paint(SurfaceId::Processed, solid_buffer(32, 24, [1, 2, 3, 255]));

    let processed = renderer.surface(SurfaceId::Processed).unwrap();
    assert_eq!((processed.width(), processed.height()), (32, 24));
    assert_eq!(renderer.content_size(), Some((64, 48)));
}

#[test]
fn test_revision_tracks_paint_and_clear() {
    let mut renderer = SurfaceRenderer::default();
    assert_eq!(renderer.revision(SurfaceId::Processed), 0);

    renderer.clear(SurfaceId::Processed);
    assert_eq!(renderer.revision(SurfaceId::Processed), 0, "clearing nothing");

    renderer.paint(SurfaceId::Processed, solid_buffer(2, 2, [0; 4]));
    renderer.paint(SurfaceId::Processed, solid_buffer(2, 2, [9; 4]));
    assert_eq!(renderer.revision(SurfaceId::Processed), 2);

    renderer.clear(SurfaceId::Processed);
    assert_eq!(renderer.revision(SurfaceId::Processed), 3);
    assert!(!renderer.has_surface(SurfaceId::Processed));
    assert_eq!(renderer.revision(SurfaceId::Original), 0);
}

#[test]
fn test_plan_empty_and_loading() {
    let renderer = SurfaceRenderer::default();
    assert_eq!(renderer.render_plan(IDLE, 50.0), RenderPlan::Empty);
    let loading = PipelineStatus {
        is_loading: true,
        is_processing: false,
    };
    assert_eq!(renderer.render_plan(loading, 50.0), RenderPlan::Loading);
}

#[test]
fn test_plan_optimizing_placeholder_without_processed() {
    let mut renderer = SurfaceRenderer::default();
    renderer.paint(SurfaceId::Original, solid_buffer(8, 8, [0; 4]));

    let plan = renderer.render_plan(PROCESSING, 30.0);
    assert_eq!(
        plan,
        RenderPlan::Single {
            overlay: Some(Overlay::Optimizing)
        }
    );
    assert!(!plan.shows_divider());

    assert_eq!(
        renderer.render_plan(IDLE, 30.0),
        RenderPlan::Single { overlay: None }
    );
}

#[test]
fn test_plan_keeps_stale_processed_while_updating() {
    let mut renderer = SurfaceRenderer::default();
    renderer.paint(SurfaceId::Original, solid_buffer(8, 8, [0; 4]));
    renderer.paint(SurfaceId::Processed, solid_buffer(8, 8, [5; 4]));

    let plan = renderer.render_plan(PROCESSING, 30.0);
    assert_eq!(
        plan,
        RenderPlan::Compare {
            reveal_position: 30.0,
            overlay: Some(Overlay::Updating)
        }
    );
    assert!(plan.shows_divider());
    assert!(renderer.has_surface(SurfaceId::Processed));
}

#[test]
fn test_same_transform_string_for_both_layers() {
    let renderer = SurfaceRenderer::default();
    let t = ViewportTransform {
        scale: 3.0,
        translate_x: 12.0,
        translate_y: -6.0,
    };
    assert_eq!(renderer.transform_css(&t), "translate(12px, -6px) scale(3)");
}
