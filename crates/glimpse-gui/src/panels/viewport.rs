use glimpse_core::geometry::{ClipRect, ContainerRect};
use glimpse_core::interaction::{InteractionMode, ViewerIntent};
use glimpse_core::surface::{Overlay, RenderPlan, SurfaceId};
use glimpse_core::transform::ViewportTransform;

use crate::app::GlimpseApp;

use super::viewport_input::{self, EguiDropSource};

const FULL_UV: egui::Rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
const HANDLE_RADIUS: f32 = 14.0;

pub fn show(ctx: &egui::Context, app: &mut GlimpseApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let container = ContainerRect::new(rect.left(), rect.top(), rect.width(), rect.height());

        route_input(ctx, ui.layer_id(), app, container);

        let mut drops = EguiDropSource {
            ctx,
            was_hovering: &mut app.ui_state.drop_hovering,
        };
        if let Some(request) = app.viewer.drain_drops(&mut drops) {
            app.request_load(request);
        }

        app.textures.sync(ctx, app.viewer.surfaces());
        paint_background(ui, rect);

        match app.viewer.render_plan() {
            RenderPlan::Empty => show_placeholder(ui, rect),
            RenderPlan::Loading => show_loading(ui, rect),
            RenderPlan::Single { overlay } => {
                draw_layer(ui, app, SurfaceId::Original, rect, rect);
                draw_overlay(ui, rect, overlay);
            }
            RenderPlan::Compare { overlay, .. } => {
                let reveal = app.viewer.reveal();
                let original_clip = to_egui_rect(reveal.original_clip(&container));
                let processed_clip = to_egui_rect(reveal.processed_clip(&container));
                let divider_x = reveal.divider_x(&container);

                draw_layer(ui, app, SurfaceId::Original, rect, original_clip);
                draw_layer(ui, app, SurfaceId::Processed, rect, processed_clip);
                draw_divider(ui, rect, divider_x);
                draw_corner_labels(ui, rect);
                draw_overlay(ui, rect, overlay);
            }
        }

        if app.viewer.gateway().is_highlighted() {
            ui.painter().rect_stroke(
                rect.shrink(4.0),
                8.0,
                egui::Stroke::new(3.0, egui::Color32::from_rgb(90, 160, 255)),
                egui::StrokeKind::Inside,
            );
        }

        update_cursor(ctx, &response, app, container);
    });
}

fn route_input(
    ctx: &egui::Context,
    layer: egui::LayerId,
    app: &mut GlimpseApp,
    container: ContainerRect,
) {
    for event in viewport_input::collect_input_events(ctx, layer, container, &mut app.wheel) {
        if let Some(ViewerIntent::OpenFile) = app.viewer.handle_input(event, container) {
            app.open_file_dialog(ctx);
        }
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn to_egui_rect(clip: ClipRect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(clip.left, clip.top),
        egui::pos2(clip.right, clip.bottom),
    )
}

/// Screen rect of the content under `transform`. Both layers share it, so a
/// resized processed image is stretched over the original's extent.
fn content_rect(rect: egui::Rect, content: (u32, u32), transform: ViewportTransform) -> egui::Rect {
    let min = rect.min + egui::vec2(transform.translate_x, transform.translate_y);
    let size = egui::vec2(content.0 as f32, content.1 as f32) * transform.scale;
    egui::Rect::from_min_size(min, size)
}

fn draw_layer(
    ui: &egui::Ui,
    app: &GlimpseApp,
    id: SurfaceId,
    rect: egui::Rect,
    clip: egui::Rect,
) {
    let (Some(texture_id), Some(content)) = (
        app.textures.texture_id(id),
        app.viewer.surfaces().content_size(),
    ) else {
        return;
    };
    let img_rect = content_rect(rect, content, app.viewer.transform());
    ui.painter()
        .with_clip_rect(clip)
        .image(texture_id, img_rect, FULL_UV, egui::Color32::WHITE);
}

fn draw_divider(ui: &egui::Ui, rect: egui::Rect, x: f32) {
    let painter = ui.painter().with_clip_rect(rect);
    let shadow = egui::Stroke::new(4.0, egui::Color32::from_black_alpha(90));
    let line = egui::Stroke::new(2.0, egui::Color32::WHITE);
    painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], shadow);
    painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], line);

    let center = egui::pos2(x, rect.center().y);
    painter.circle(
        center,
        HANDLE_RADIUS,
        egui::Color32::WHITE,
        egui::Stroke::new(1.0, egui::Color32::from_black_alpha(120)),
    );
    let arrow = egui::Color32::from_gray(60);
    for dir in [-1.0, 1.0] {
        let tip = center + egui::vec2(dir * 9.0, 0.0);
        let base = center + egui::vec2(dir * 3.0, 0.0);
        painter.add(egui::Shape::convex_polygon(
            vec![tip, base + egui::vec2(0.0, -5.0), base + egui::vec2(0.0, 5.0)],
            arrow,
            egui::Stroke::NONE,
        ));
    }
}

fn draw_corner_labels(ui: &egui::Ui, rect: egui::Rect) {
    let font = egui::FontId::proportional(14.0);
    let color = egui::Color32::from_white_alpha(200);
    ui.painter().text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        "Original",
        font.clone(),
        color,
    );
    ui.painter().text(
        rect.right_top() + egui::vec2(-8.0, 8.0),
        egui::Align2::RIGHT_TOP,
        "Processed",
        font,
        color,
    );
}

fn draw_overlay(ui: &mut egui::Ui, rect: egui::Rect, overlay: Option<Overlay>) {
    match overlay {
        None => {}
        Some(Overlay::Optimizing) => {
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_black_alpha(110));
            let spinner = egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0));
            egui::Spinner::new().size(32.0).paint_at(ui, spinner);
            ui.painter().text(
                rect.center() + egui::vec2(0.0, 32.0),
                egui::Align2::CENTER_TOP,
                "Optimizing…",
                egui::FontId::proportional(16.0),
                egui::Color32::WHITE,
            );
        }
        Some(Overlay::Updating) => {
            let badge = egui::Rect::from_min_size(
                rect.right_top() + egui::vec2(-120.0, 32.0),
                egui::vec2(110.0, 26.0),
            );
            ui.painter()
                .rect_filled(badge, 6.0, egui::Color32::from_black_alpha(160));
            let spinner = egui::Rect::from_center_size(
                badge.left_center() + egui::vec2(14.0, 0.0),
                egui::vec2(14.0, 14.0),
            );
            egui::Spinner::new().size(14.0).paint_at(ui, spinner);
            ui.painter().text(
                badge.left_center() + egui::vec2(28.0, 0.0),
                egui::Align2::LEFT_CENTER,
                "Updating…",
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
        }
    }
}

fn show_loading(ui: &mut egui::Ui, rect: egui::Rect) {
    let spinner = egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0));
    egui::Spinner::new().size(32.0).paint_at(ui, spinner);
    ui.painter().text(
        rect.center() + egui::vec2(0.0, 32.0),
        egui::Align2::CENTER_TOP,
        "Loading…",
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(160),
    );
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Drop an image here, or click to open (Ctrl+O)",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}

fn update_cursor(
    ctx: &egui::Context,
    response: &egui::Response,
    app: &GlimpseApp,
    container: ContainerRect,
) {
    let icon = match app.viewer.mode() {
        InteractionMode::Panning => Some(egui::CursorIcon::Grabbing),
        InteractionMode::DraggingDivider => Some(egui::CursorIcon::ResizeHorizontal),
        InteractionMode::Idle => response.hover_pos().map(|pos| {
            let plan = app.viewer.render_plan();
            let on_divider = plan.shows_divider()
                && app.viewer.reveal().hit_test(
                    pos.x,
                    &container,
                    app.viewer.config().divider.hit_width,
                );
            if on_divider {
                egui::CursorIcon::ResizeHorizontal
            } else if matches!(plan, RenderPlan::Empty) {
                egui::CursorIcon::PointingHand
            } else {
                egui::CursorIcon::Grab
            }
        }),
    };
    if let Some(icon) = icon {
        ctx.set_cursor_icon(icon);
    }
}
