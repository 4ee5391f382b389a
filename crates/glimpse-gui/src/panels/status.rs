use glimpse_core::interaction::InteractionMode;

use crate::app::{format_bytes, format_duration, GlimpseApp};

pub fn show(ctx: &egui::Context, app: &mut GlimpseApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space to prevent layout jump.
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some(name) = app.ui_state.file_path.as_ref().and_then(|p| p.file_name()) {
                ui.label(name.to_string_lossy().into_owned());
                ui.separator();
            }
            if let Some((w, h)) = app.viewer.surfaces().content_size() {
                ui.label(format!("{w}x{h}"));
                if let Some((pw, ph)) = app.ui_state.processed_dims {
                    if (pw, ph) != (w, h) {
                        ui.label(format!("→ {pw}x{ph}"));
                    }
                }
                ui.separator();
            }

            ui.label(format!("Zoom: {:.0}%", app.viewer.zoom_percent()));
            ui.separator();
            if app.viewer.render_plan().shows_divider() {
                ui.label(format!("Reveal: {:.0}%", app.viewer.reveal_position()));
                ui.separator();
            }
            ui.label(format!("Quality: {}", app.config.processing.quality));

            if let (Some(original), Some(stats)) =
                (app.ui_state.original_size, app.ui_state.last_stats)
            {
                ui.separator();
                ui.label(format!(
                    "{} → {} ({:.1}% saved, {})",
                    format_bytes(original),
                    format_bytes(stats.encoded_size),
                    stats.savings_percent,
                    format_duration(stats.elapsed)
                ));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let status = app.viewer.status();
                if status.is_loading {
                    ui.label("Loading...");
                    ui.spinner();
                } else if status.is_processing {
                    ui.label("Processing...");
                    ui.spinner();
                } else if app.viewer.mode() != InteractionMode::Idle {
                    ui.label(app.viewer.mode().to_string());
                }
            });
        });

        ui.add_space(2.0);
    });
}
