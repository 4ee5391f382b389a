use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::gateway::{DropGateway, ExternalEventSource, FileDropEvent, LoadRequest};
use crate::geometry::ContainerRect;
use crate::interaction::{InputEvent, InteractionMode, InteractionRouter, RouterContext, ViewerIntent};
use crate::reveal::RevealController;
use crate::surface::{PipelineStatus, RasterBuffer, RenderPlan, SurfaceId, SurfaceRenderer};
use crate::transform::{TransformModel, ViewportTransform};

/// Completion and status signals from the external image pipeline.
#[derive(Clone, Debug)]
pub enum PipelineEvent {
    LoadStarted,
    OriginalLoaded(RasterBuffer),
    ProcessingStarted,
    ProcessedReady(RasterBuffer),
    /// The in-flight processing run was superseded and will not report.
    ProcessingCancelled,
    Failed { surface: SurfaceId, message: String },
}

/// One comparison viewer instance. Owns all of its state; nothing is global.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    transform: TransformModel,
    reveal: RevealController,
    surfaces: SurfaceRenderer,
    router: InteractionRouter,
    gateway: DropGateway,
    status: PipelineStatus,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::build(ViewerConfig::default())
    }
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ViewerConfig) -> Self {
        Self {
            transform: TransformModel::with_valid_limits(config.zoom),
            reveal: RevealController::default(),
            surfaces: SurfaceRenderer::default(),
            router: InteractionRouter::default(),
            gateway: DropGateway::new(&config.extensions),
            status: PipelineStatus::default(),
            config,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform.transform()
    }

    pub fn transform_model_mut(&mut self) -> &mut TransformModel {
        &mut self.transform
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut RevealController {
        &mut self.reveal
    }

    pub fn surfaces(&self) -> &SurfaceRenderer {
        &self.surfaces
    }

    pub fn gateway(&self) -> &DropGateway {
        &self.gateway
    }

    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    pub fn mode(&self) -> InteractionMode {
        self.router.mode()
    }

    pub fn zoom_percent(&self) -> f32 {
        self.transform.zoom_percent()
    }

    pub fn reveal_position(&self) -> f32 {
        self.reveal.position()
    }

    pub fn render_plan(&self) -> RenderPlan {
        self.surfaces.render_plan(self.status, self.reveal.position())
    }

    pub fn set_input_suppressed(&mut self, suppressed: bool) {
        self.router.set_input_suppressed(suppressed);
    }

    /// Route one input event. `container` is the viewport's current rect.
    pub fn handle_input(&mut self, event: InputEvent, container: ContainerRect) -> Option<ViewerIntent> {
        let mut ctx = RouterContext {
            transform: &mut self.transform,
            reveal: &mut self.reveal,
            container,
            divider_hit_width: self.config.divider.hit_width,
            has_original: self.surfaces.has_surface(SurfaceId::Original),
            has_processed: self.surfaces.has_surface(SurfaceId::Processed),
            is_loading: self.status.is_loading,
        };
        self.router.handle(event, &mut ctx).intent
    }

    pub fn handle_drop(&mut self, event: FileDropEvent) -> Option<LoadRequest> {
        self.gateway.handle(event)
    }

    pub fn drain_drops(&mut self, source: &mut dyn ExternalEventSource) -> Option<LoadRequest> {
        self.gateway.drain(source)
    }

    /// Validate an open-dialog result.
    pub fn open_path(&self, path: Option<std::path::PathBuf>) -> Option<LoadRequest> {
        self.gateway.open_path(path)
    }

    pub fn apply_pipeline_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::LoadStarted => self.status.is_loading = true,
            PipelineEvent::OriginalLoaded(buffer) => {
                info!(
                    width = buffer.width(),
                    height = buffer.height(),
                    "Original image loaded"
                );
                self.status.is_loading = false;
                self.surfaces.clear(SurfaceId::Processed);
                self.surfaces.paint(SurfaceId::Original, buffer);
                self.reset_view();
            }
            PipelineEvent::ProcessingStarted => self.status.is_processing = true,
            PipelineEvent::ProcessedReady(buffer) => {
                self.status.is_processing = false;
                if self.surfaces.has_surface(SurfaceId::Original) {
                    self.surfaces.paint(SurfaceId::Processed, buffer);
                } else {
                    warn!("Discarding processed result with no original loaded");
                }
            }
            PipelineEvent::ProcessingCancelled => {
                if self.status.is_processing {
                    debug!("Processing cancelled");
                }
                self.status.is_processing = false;
            }
            PipelineEvent::Failed { surface, message } => {
                // Keep whatever the surface showed before.
                warn!(%surface, %message, "Pipeline failed");
                match surface {
                    SurfaceId::Original => self.status.is_loading = false,
                    SurfaceId::Processed => self.status.is_processing = false,
                }
            }
        }
    }

    /// Drop both surfaces and return to the empty state.
    pub fn close_image(&mut self) {
        self.surfaces.clear(SurfaceId::Original);
        self.surfaces.clear(SurfaceId::Processed);
        self.status = PipelineStatus::default();
        self.reset_view();
        info!("Image closed");
    }

    /// Identity transform, centred divider, no gesture in progress.
    pub fn reset_view(&mut self) {
        self.router.reset();
        self.transform.reset();
        self.reveal.reset();
    }
}
