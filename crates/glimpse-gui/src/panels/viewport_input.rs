//! Translation of egui input into toolkit-neutral viewer events.

use glimpse_core::gateway::{ExternalEventSource, FileDropEvent};
use glimpse_core::geometry::{ContainerRect, ScreenPoint};
use glimpse_core::interaction::{InputEvent, KeyChord, PointerButton};

fn point(pos: egui::Pos2) -> ScreenPoint {
    ScreenPoint::new(pos.x, pos.y)
}

/// Scroll distance in points that makes one zoom step.
const POINTS_PER_STEP: f32 = 50.0;
/// Pinch scale factor that makes one zoom step.
const PINCH_FACTOR_PER_STEP: f32 = 1.1;

/// Turns fractional wheel and pinch deltas into whole zoom steps.
///
/// Trackpads report many small deltas per gesture; each only contributes its
/// share of a step. A change of direction drops the leftover.
#[derive(Debug, Default)]
pub(crate) struct WheelAccumulator {
    pending: f32,
}

impl WheelAccumulator {
    /// Add `steps` and return the whole steps now due (signed).
    pub fn feed(&mut self, steps: f32) -> i32 {
        if !steps.is_finite() || steps == 0.0 {
            return 0;
        }
        if self.pending * steps < 0.0 {
            self.pending = 0.0;
        }
        self.pending += steps;
        let whole = self.pending.trunc();
        self.pending -= whole;
        whole as i32
    }
}

/// Collect this frame's events for the viewport on `layer`.
///
/// Presses and wheel steps only count when the viewport is the topmost
/// layer under the pointer, so clicks on menus and windows floating over it
/// are not routed. Moves and releases are window-wide.
pub(super) fn collect_input_events(
    ctx: &egui::Context,
    layer: egui::LayerId,
    container: ContainerRect,
    wheel: &mut WheelAccumulator,
) -> Vec<InputEvent> {
    let (events, pointer) = ctx.input(|i| (i.events.clone(), i.pointer.latest_pos()));

    let mut routed = Vec::new();
    for event in events.iter().filter_map(|event| map_event(event, pointer)) {
        let press_pos = match event {
            InputEvent::PointerDown { pos, .. }
            | InputEvent::Wheel { pos, .. }
            | InputEvent::TouchStart { pos, .. } => Some(pos),
            _ => None,
        };
        if let Some(pos) = press_pos {
            let on_viewport = container.contains(pos)
                && ctx.layer_id_at(egui::pos2(pos.x, pos.y)) == Some(layer);
            if !on_viewport {
                continue;
            }
        }

        match event {
            InputEvent::Wheel { pos, delta_y } => {
                let steps = wheel.feed(delta_y);
                let unit = steps.signum() as f32;
                routed.extend((0..steps.unsigned_abs()).map(|_| InputEvent::Wheel {
                    pos,
                    delta_y: unit,
                }));
            }
            other => routed.push(other),
        }
    }
    routed
}

/// Map one raw egui event. `pointer` is the latest pointer position, used
/// for wheel and pinch events which carry none. Wheel `delta_y` is measured
/// in (fractional) zoom steps.
pub(super) fn map_event(event: &egui::Event, pointer: Option<egui::Pos2>) -> Option<InputEvent> {
    match event {
        egui::Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let pos = point(*pos);
            if *pressed {
                let button = match button {
                    egui::PointerButton::Primary => PointerButton::Primary,
                    egui::PointerButton::Secondary => PointerButton::Secondary,
                    egui::PointerButton::Middle => PointerButton::Middle,
                    _ => return None,
                };
                Some(InputEvent::PointerDown { pos, button })
            } else {
                Some(InputEvent::PointerUp { pos })
            }
        }
        egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove { pos: point(*pos) }),
        egui::Event::MouseWheel { unit, delta, .. } => {
            let steps = match unit {
                egui::MouseWheelUnit::Point => delta.y / POINTS_PER_STEP,
                egui::MouseWheelUnit::Line | egui::MouseWheelUnit::Page => delta.y,
            };
            pointer.map(|pos| InputEvent::Wheel {
                pos: point(pos),
                delta_y: steps,
            })
        }
        // Trackpad pinch: factor > 1 zooms in.
        egui::Event::Zoom(factor) if *factor > 0.0 => pointer.map(|pos| InputEvent::Wheel {
            pos: point(pos),
            delta_y: factor.ln() / PINCH_FACTOR_PER_STEP.ln(),
        }),
        egui::Event::Touch { id, phase, pos, .. } => {
            let id = id.0;
            let pos = point(*pos);
            Some(match phase {
                egui::TouchPhase::Start => InputEvent::TouchStart { id, pos },
                egui::TouchPhase::Move => InputEvent::TouchMove { id, pos },
                egui::TouchPhase::End | egui::TouchPhase::Cancel => InputEvent::TouchEnd { id },
            })
        }
        egui::Event::Key {
            key: egui::Key::O,
            pressed: true,
            repeat: false,
            modifiers,
            ..
        } => Some(InputEvent::Key(KeyChord {
            key: 'o',
            command: modifiers.command,
        })),
        egui::Event::WindowFocused(false) => Some(InputEvent::FocusLost),
        _ => None,
    }
}

/// Drop notifications derived from egui's raw hovered/dropped file lists.
pub(super) struct EguiDropSource<'a> {
    pub ctx: &'a egui::Context,
    /// Hover state seen on the previous frame.
    pub was_hovering: &'a mut bool,
}

impl ExternalEventSource for EguiDropSource<'_> {
    fn poll_drop_events(&mut self) -> Vec<FileDropEvent> {
        let (hovering, dropped) = self.ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .collect::<Vec<_>>(),
            )
        });

        let mut events = Vec::new();
        if hovering && !*self.was_hovering {
            events.push(FileDropEvent::Hovered);
        }
        if !dropped.is_empty() {
            events.push(FileDropEvent::Dropped(dropped));
        } else if !hovering && *self.was_hovering {
            events.push(FileDropEvent::Left);
        }
        *self.was_hovering = hovering;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(button: egui::PointerButton, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(10.0, 20.0),
            button,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_maps_pointer_buttons() {
        assert_eq!(
            map_event(&button(egui::PointerButton::Primary, true), None),
            Some(InputEvent::PointerDown {
                pos: ScreenPoint::new(10.0, 20.0),
                button: PointerButton::Primary,
            })
        );
        assert_eq!(
            map_event(&button(egui::PointerButton::Secondary, true), None),
            Some(InputEvent::PointerDown {
                pos: ScreenPoint::new(10.0, 20.0),
                button: PointerButton::Secondary,
            })
        );
        assert_eq!(
            map_event(&button(egui::PointerButton::Extra1, true), None),
            None
        );
        assert_eq!(
            map_event(&button(egui::PointerButton::Primary, false), None),
            Some(InputEvent::PointerUp {
                pos: ScreenPoint::new(10.0, 20.0)
            })
        );
    }

    #[test]
    fn test_pinch_uses_pointer_position() {
        let pinch = egui::Event::Zoom(1.1);
        assert_eq!(map_event(&pinch, None), None);
        let Some(InputEvent::Wheel { pos, delta_y }) =
            map_event(&pinch, Some(egui::pos2(5.0, 6.0)))
        else {
            panic!("pinch should map to a wheel event");
        };
        assert_eq!(pos, ScreenPoint::new(5.0, 6.0));
        assert!((delta_y - 1.0).abs() < 1e-4, "one 10% pinch is one step, got {delta_y}");
    }

    #[test]
    fn test_small_deltas_accumulate_into_single_steps() {
        let mut wheel = WheelAccumulator::default();
        // A trackpad flick: many 0.02-step events (1 point each).
        let steps: i32 = (0..60).map(|_| wheel.feed(1.0 / POINTS_PER_STEP)).sum();
        assert_eq!(steps, 1);

        // Small pinch events add up the same way.
        let mut pinch = WheelAccumulator::default();
        let per_event = 1.01f32.ln() / PINCH_FACTOR_PER_STEP.ln();
        let steps: i32 = (0..10).map(|_| pinch.feed(per_event)).sum();
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_accumulator_steps_and_direction_change() {
        let mut wheel = WheelAccumulator::default();
        assert_eq!(wheel.feed(1.0), 1);
        assert_eq!(wheel.feed(2.5), 2);
        assert_eq!(wheel.feed(-0.6), 0, "reversal drops the leftover half step");
        assert_eq!(wheel.feed(-0.6), -1);
        assert_eq!(wheel.feed(f32::NAN), 0);
        assert_eq!(wheel.feed(0.0), 0);
    }

    #[test]
    fn test_focus_loss() {
        assert_eq!(
            map_event(&egui::Event::WindowFocused(false), None),
            Some(InputEvent::FocusLost)
        );
        assert_eq!(map_event(&egui::Event::WindowFocused(true), None), None);
    }
}
