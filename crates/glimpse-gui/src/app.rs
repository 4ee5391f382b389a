use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use glimpse_core::debounce::Debouncer;
use glimpse_core::gateway::LoadRequest;
use glimpse_core::surface::SurfaceId;
use glimpse_core::viewer::{PipelineEvent, Viewer};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::panels::viewport_input::WheelAccumulator;
use crate::states::{AppConfig, UIState, ViewportTextures};
use crate::workers;

pub struct GlimpseApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub viewer: Viewer,
    pub textures: ViewportTextures,
    pub ui_state: UIState,
    pub config: AppConfig,
    pub debouncer: Debouncer,
    pub wheel: WheelAccumulator,
}

impl GlimpseApp {
    pub fn new(
        ctx: &egui::Context,
        config: AppConfig,
        initial_file: Option<PathBuf>,
    ) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone())?;

        // Config was validated on load; the default is always valid.
        let mut viewer = Viewer::new(config.viewer.clone()).unwrap_or_default();
        let repaint = ctx.clone();
        viewer
            .transform_model_mut()
            .subscribe(move |_| repaint.request_repaint());
        let repaint = ctx.clone();
        viewer.reveal_mut().subscribe(move |_| repaint.request_repaint());

        let debouncer = Debouncer::new(config.viewer.debounce());
        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            viewer,
            textures: ViewportTextures::default(),
            ui_state: UIState::default(),
            config,
            debouncer,
            wheel: WheelAccumulator::default(),
        };

        if let Some(path) = initial_file {
            match app.viewer.gateway().request_for(path) {
                Ok(request) => app.request_load(request),
                Err(e) => {
                    tracing::warn!("{e}");
                    app.ui_state.add_log(format!("ERROR: {e}"));
                }
            }
        }

        Ok(app)
    }

    /// Drain all pending results from the worker and dialog threads.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::OriginalLoaded {
                    path,
                    buffer,
                    file_size,
                } => {
                    self.ui_state.file_path = Some(path);
                    self.ui_state.original_size = Some(file_size);
                    self.ui_state.processed_dims = None;
                    self.ui_state.last_stats = None;
                    self.viewer
                        .apply_pipeline_event(PipelineEvent::OriginalLoaded(buffer));
                    self.debouncer.cancel();
                    self.request_process();
                }
                WorkerResult::ProcessedReady {
                    buffer,
                    stats,
                    generation,
                } => {
                    if self.ui_state.in_flight != Some(generation) {
                        tracing::debug!(
                            generation,
                            current = self.ui_state.process_generation,
                            "Discarding stale processed result"
                        );
                        continue;
                    }
                    self.ui_state.in_flight = None;
                    self.ui_state.processed_dims = Some((buffer.width(), buffer.height()));
                    self.ui_state.last_stats = Some(stats);
                    self.viewer
                        .apply_pipeline_event(PipelineEvent::ProcessedReady(buffer));
                }
                WorkerResult::DialogClosed { path } => {
                    self.ui_state.dialog_open = false;
                    match path.map(|p| self.viewer.gateway().request_for(p)) {
                        Some(Ok(request)) => self.request_load(request),
                        Some(Err(e)) => self.ui_state.add_log(format!("ERROR: {e}")),
                        None => tracing::debug!("Open dialog cancelled"),
                    }
                }
                WorkerResult::ProcessingFailed {
                    message,
                    generation,
                } => {
                    if self.ui_state.in_flight != Some(generation) {
                        tracing::debug!(generation, "Discarding stale processing failure");
                        continue;
                    }
                    self.ui_state.in_flight = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.viewer.apply_pipeline_event(PipelineEvent::Failed {
                        surface: SurfaceId::Processed,
                        message,
                    });
                }
                WorkerResult::Error { surface, message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.viewer
                        .apply_pipeline_event(PipelineEvent::Failed { surface, message });
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Ask the worker to decode a new original.
    pub fn request_load(&mut self, request: LoadRequest) {
        tracing::info!(path = %request.path.display(), "Loading image");
        // Anything still in flight belongs to the previous image.
        self.ui_state.next_generation();
        self.debouncer.cancel();
        self.cancel_processing();
        self.viewer.apply_pipeline_event(PipelineEvent::LoadStarted);
        self.send_command(WorkerCommand::LoadOriginal { path: request.path });
    }

    /// Reprocess the current original with the current settings.
    pub fn request_process(&mut self) {
        if !self.viewer.surfaces().has_surface(SurfaceId::Original) {
            return;
        }
        let generation = self.ui_state.next_generation();
        self.ui_state.in_flight = Some(generation);
        self.viewer
            .apply_pipeline_event(PipelineEvent::ProcessingStarted);
        self.send_command(WorkerCommand::Process {
            settings: self.config.processing,
            generation,
        });
    }

    /// A processing parameter changed; reprocess once edits settle.
    pub fn schedule_process(&mut self) {
        if self.viewer.surfaces().has_surface(SurfaceId::Original) {
            self.debouncer.schedule(Instant::now());
        }
    }

    pub fn step_quality(&mut self, up: bool) {
        if self.config.processing.step_quality(up) {
            self.ui_state
                .add_log(format!("Quality: {}", self.config.processing.quality));
            self.schedule_process();
        }
    }

    /// Forget the in-flight `Process` so its reply is treated as stale.
    fn cancel_processing(&mut self) {
        if self.ui_state.in_flight.take().is_some() {
            self.viewer
                .apply_pipeline_event(PipelineEvent::ProcessingCancelled);
        }
    }

    pub fn close_image(&mut self) {
        self.ui_state.next_generation();
        self.debouncer.cancel();
        self.cancel_processing();
        self.ui_state.clear_image();
        self.viewer.close_image();
    }

    /// Show the native open dialog on its own thread.
    pub fn open_file_dialog(&mut self, ctx: &egui::Context) {
        if self.ui_state.dialog_open {
            return;
        }
        self.ui_state.dialog_open = true;

        let extensions = self.viewer.config().extensions.clone();
        let result_tx = self.result_tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let path = rfd::FileDialog::new()
                .add_filter("Images", &extensions)
                .pick_file();
            workers::send(&result_tx, &ctx, WorkerResult::DialogClosed { path });
        });
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    fn tick_debounce(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.debouncer.fire(now) {
            self.request_process();
        } else if let Some(remaining) = self.debouncer.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for GlimpseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.tick_debounce(ctx);
        self.viewer.set_input_suppressed(self.ui_state.is_modal());

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Glimpse")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Glimpse");
                        ui.label("Original vs processed image comparison");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}

pub(crate) fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.2} MB", b / MB)
    }
}

pub(crate) fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", d.as_millis())
    } else {
        format!("{secs:.1}s")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glimpse_core::surface::{Overlay, RasterBuffer, RenderPlan};

    use super::*;
    use crate::messages::ProcessStats;

    /// App on a headless context whose commands land in the returned receiver.
    fn headless_app() -> (GlimpseApp, mpsc::Receiver<WorkerCommand>) {
        let ctx = egui::Context::default();
        let mut app = GlimpseApp::new(&ctx, AppConfig::default(), None).unwrap();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        app.cmd_tx = cmd_tx;
        (app, cmd_rx)
    }

    fn last_process_generation(rx: &mpsc::Receiver<WorkerCommand>) -> Option<u64> {
        rx.try_iter()
            .filter_map(|cmd| match cmd {
                WorkerCommand::Process { generation, .. } => Some(generation),
                WorkerCommand::LoadOriginal { .. } => None,
            })
            .last()
    }

    fn buffer() -> RasterBuffer {
        RasterBuffer::new(4, 4, vec![128; 4 * 4 * 4]).unwrap()
    }

    fn ready(generation: u64) -> WorkerResult {
        WorkerResult::ProcessedReady {
            buffer: buffer(),
            stats: ProcessStats {
                encoded_size: 10,
                savings_percent: 90.0,
                elapsed: Duration::from_millis(5),
            },
            generation,
        }
    }

    fn load_original(app: &mut GlimpseApp) {
        app.result_tx
            .send(WorkerResult::OriginalLoaded {
                path: PathBuf::from("a.png"),
                buffer: buffer(),
                file_size: 100,
            })
            .unwrap();
        app.poll_results();
    }

    #[test]
    fn test_failed_reload_clears_superseded_processing() {
        let (mut app, cmd_rx) = headless_app();
        load_original(&mut app);
        let generation = last_process_generation(&cmd_rx).unwrap();
        assert_eq!(
            app.viewer.render_plan(),
            RenderPlan::Single {
                overlay: Some(Overlay::Optimizing)
            }
        );

        app.request_load(LoadRequest {
            path: PathBuf::from("broken.png"),
        });
        app.result_tx.send(ready(generation)).unwrap();
        app.result_tx
            .send(WorkerResult::Error {
                surface: SurfaceId::Original,
                message: "Cannot decode image".into(),
            })
            .unwrap();
        app.poll_results();

        let status = app.viewer.status();
        assert!(!status.is_processing);
        assert!(!status.is_loading);
        assert_eq!(app.viewer.render_plan(), RenderPlan::Single { overlay: None });
        assert!(!app.viewer.surfaces().has_surface(SurfaceId::Processed));
    }

    #[test]
    fn test_stale_failure_keeps_newer_request_pending() {
        let (mut app, cmd_rx) = headless_app();
        load_original(&mut app);
        let first = last_process_generation(&cmd_rx).unwrap();

        app.request_process();
        let second = last_process_generation(&cmd_rx).unwrap();
        assert_ne!(first, second);

        app.result_tx
            .send(WorkerResult::ProcessingFailed {
                message: "boom".into(),
                generation: first,
            })
            .unwrap();
        app.poll_results();
        assert!(app.viewer.status().is_processing);

        app.result_tx.send(ready(second)).unwrap();
        app.poll_results();
        assert!(!app.viewer.status().is_processing);
        assert!(app.viewer.surfaces().has_surface(SurfaceId::Processed));
        assert_eq!(app.ui_state.in_flight, None);
    }

    #[test]
    fn test_current_failure_clears_processing() {
        let (mut app, cmd_rx) = headless_app();
        load_original(&mut app);
        let generation = last_process_generation(&cmd_rx).unwrap();

        app.result_tx
            .send(WorkerResult::ProcessingFailed {
                message: "boom".into(),
                generation,
            })
            .unwrap();
        app.poll_results();
        assert!(!app.viewer.status().is_processing);
        assert_eq!(app.viewer.render_plan(), RenderPlan::Single { overlay: None });
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(std::time::Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(std::time::Duration::from_millis(1500)), "1.5s");
    }
}
