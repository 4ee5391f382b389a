use glimpse_core::surface::SurfaceId;

use crate::app::GlimpseApp;
use crate::states::ResizeFilter;

pub fn show(ctx: &egui::Context, app: &mut GlimpseApp) {
    let has_image = app.viewer.surfaces().has_surface(SurfaceId::Original);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    app.open_file_dialog(ctx);
                }

                if ui.add_enabled(has_image, egui::Button::new("Close Image")).clicked() {
                    ui.close();
                    app.close_image();
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.add_enabled(has_image, egui::Button::new("Reset View").shortcut_text("Right-click")).clicked() {
                    ui.close();
                    app.viewer.reset_view();
                }
            });

            ui.menu_button("Processing", |ui| {
                ui.label(format!("JPEG quality: {}", app.config.processing.quality));
                if ui.add(egui::Button::new("Increase Quality").shortcut_text("]")).clicked() {
                    app.step_quality(true);
                }
                if ui.add(egui::Button::new("Decrease Quality").shortcut_text("[")).clicked() {
                    app.step_quality(false);
                }

                if let Some(mut resize) = app.config.processing.resize {
                    ui.separator();
                    ui.label(format!("Resize to {}x{}", resize.width, resize.height));
                    let mut changed = false;
                    for &filter in ResizeFilter::ALL {
                        changed |= ui
                            .radio_value(&mut resize.filter, filter, filter.to_string())
                            .changed();
                    }
                    if changed {
                        app.config.processing.resize = Some(resize);
                        app.ui_state.add_log(format!("Resize filter: {}", resize.filter));
                        app.schedule_process();
                    }
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus). Ctrl+O is routed
        // through the viewer so modal state can veto it.
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if !app.ui_state.is_modal() {
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::CloseBracket)) {
                app.step_quality(true);
            }
            if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::OpenBracket)) {
                app.step_quality(false);
            }
        }
    });
}
