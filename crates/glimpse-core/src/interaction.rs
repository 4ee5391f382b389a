//! Input classification: divider drag, pan, zoom, reset and open-file.
//!
//! The router is toolkit-neutral. Hosts translate their native events into
//! [`InputEvent`] values and must deliver pointer-up/move from the whole
//! window, not just the viewport, so a release outside the viewport still
//! ends the gesture.

use tracing::debug;

use crate::geometry::{ContainerRect, ScreenPoint};
use crate::reveal::RevealController;
use crate::transform::{TransformModel, ViewportTransform, ZoomDirection};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Idle,
    DraggingDivider,
    Panning,
}

impl std::fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::DraggingDivider => write!(f, "Dragging divider"),
            Self::Panning => write!(f, "Panning"),
        }
    }
}

/// State captured when a gesture starts. Moves are computed against this
/// rather than accumulated, so rounding never drifts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSnapshot {
    pub pointer: ScreenPoint,
    pub transform: ViewportTransform,
    pub reveal_position: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A key press. `command` is Ctrl on Linux/Windows and Cmd on macOS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub command: bool,
}

impl KeyChord {
    pub const OPEN_FILE: Self = Self {
        key: 'o',
        command: true,
    };

    pub fn is_open_file(&self) -> bool {
        self.command && self.key.eq_ignore_ascii_case(&Self::OPEN_FILE.key)
    }
}

/// Window coordinates throughout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: ScreenPoint, button: PointerButton },
    PointerMove { pos: ScreenPoint },
    PointerUp { pos: ScreenPoint },
    /// Positive `delta_y` zooms in.
    Wheel { pos: ScreenPoint, delta_y: f32 },
    TouchStart { id: u64, pos: ScreenPoint },
    TouchMove { id: u64, pos: ScreenPoint },
    TouchEnd { id: u64 },
    Key(KeyChord),
    /// The window lost focus; any gesture in progress is abandoned.
    FocusLost,
}

/// Requests the viewer raises to its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerIntent {
    OpenFile,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouterOutcome {
    /// The event was consumed; hosts should suppress default handling
    /// (text selection, native drag, context menu).
    pub handled: bool,
    pub intent: Option<ViewerIntent>,
}

impl RouterOutcome {
    const IGNORED: Self = Self {
        handled: false,
        intent: None,
    };
    const HANDLED: Self = Self {
        handled: true,
        intent: None,
    };

    fn intent(intent: ViewerIntent) -> Self {
        Self {
            handled: true,
            intent: Some(intent),
        }
    }
}

/// Everything the router may read or mutate while handling one event.
pub struct RouterContext<'a> {
    pub transform: &'a mut TransformModel,
    pub reveal: &'a mut RevealController,
    pub container: ContainerRect,
    pub divider_hit_width: f32,
    pub has_original: bool,
    pub has_processed: bool,
    /// A load is in flight; clicking the empty state must not start another.
    pub is_loading: bool,
}

#[derive(Debug, Default)]
pub struct InteractionRouter {
    mode: InteractionMode,
    snapshot: Option<DragSnapshot>,
    active_touch: Option<u64>,
    input_suppressed: bool,
}

impl InteractionRouter {
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn snapshot(&self) -> Option<&DragSnapshot> {
        self.snapshot.as_ref()
    }

    /// While set (a modal dialog is open), open-file requests are not raised.
    pub fn set_input_suppressed(&mut self, suppressed: bool) {
        self.input_suppressed = suppressed;
    }

    pub fn is_input_suppressed(&self) -> bool {
        self.input_suppressed
    }

    /// Abandon any gesture in progress.
    pub fn reset(&mut self) {
        self.end_gesture();
    }

    pub fn handle(&mut self, event: InputEvent, ctx: &mut RouterContext<'_>) -> RouterOutcome {
        match event {
            InputEvent::PointerDown { pos, button } => self.pointer_down(pos, button, ctx),
            InputEvent::PointerMove { pos } => self.pointer_move(pos, ctx),
            InputEvent::PointerUp { .. } | InputEvent::FocusLost => {
                if self.end_gesture() {
                    RouterOutcome::HANDLED
                } else {
                    RouterOutcome::IGNORED
                }
            }
            InputEvent::Wheel { pos, delta_y } => self.wheel(pos, delta_y, ctx),
            InputEvent::TouchStart { id, pos } => self.touch_start(id, pos, ctx),
            InputEvent::TouchMove { id, pos } => {
                if self.active_touch == Some(id) && self.mode == InteractionMode::DraggingDivider {
                    ctx.reveal
                        .set_from_pointer(pos.x, ctx.container.left, ctx.container.width);
                    RouterOutcome::HANDLED
                } else {
                    RouterOutcome::IGNORED
                }
            }
            InputEvent::TouchEnd { id } => {
                if self.active_touch == Some(id) {
                    self.end_gesture();
                    RouterOutcome::HANDLED
                } else {
                    RouterOutcome::IGNORED
                }
            }
            InputEvent::Key(chord) => {
                if chord.is_open_file() && !self.input_suppressed {
                    RouterOutcome::intent(ViewerIntent::OpenFile)
                } else {
                    RouterOutcome::IGNORED
                }
            }
        }
    }

    fn pointer_down(
        &mut self,
        pos: ScreenPoint,
        button: PointerButton,
        ctx: &mut RouterContext<'_>,
    ) -> RouterOutcome {
        if !ctx.container.contains(pos) {
            return RouterOutcome::IGNORED;
        }

        match button {
            PointerButton::Secondary => {
                self.end_gesture();
                ctx.transform.reset();
                ctx.reveal.reset();
                debug!("View reset");
                RouterOutcome::HANDLED
            }
            _ if self.mode != InteractionMode::Idle => RouterOutcome::HANDLED,
            PointerButton::Primary if !ctx.has_original => {
                if self.input_suppressed || ctx.is_loading {
                    RouterOutcome::IGNORED
                } else {
                    RouterOutcome::intent(ViewerIntent::OpenFile)
                }
            }
            PointerButton::Primary
                if ctx.has_processed
                    && ctx.reveal.hit_test(pos.x, &ctx.container, ctx.divider_hit_width) =>
            {
                self.begin(InteractionMode::DraggingDivider, pos, ctx);
                RouterOutcome::HANDLED
            }
            PointerButton::Primary | PointerButton::Middle if ctx.has_original => {
                self.begin(InteractionMode::Panning, pos, ctx);
                RouterOutcome::HANDLED
            }
            _ => RouterOutcome::IGNORED,
        }
    }

    fn pointer_move(&mut self, pos: ScreenPoint, ctx: &mut RouterContext<'_>) -> RouterOutcome {
        match self.mode {
            InteractionMode::Idle => RouterOutcome::IGNORED,
            // A touch-driven drag only follows its own touch.
            InteractionMode::DraggingDivider if self.active_touch.is_some() => {
                RouterOutcome::IGNORED
            }
            InteractionMode::DraggingDivider => {
                ctx.reveal
                    .set_from_pointer(pos.x, ctx.container.left, ctx.container.width);
                RouterOutcome::HANDLED
            }
            InteractionMode::Panning => {
                if let Some(snap) = self.snapshot {
                    ctx.transform.set_translate(
                        snap.transform.translate_x + (pos.x - snap.pointer.x),
                        snap.transform.translate_y + (pos.y - snap.pointer.y),
                    );
                }
                RouterOutcome::HANDLED
            }
        }
    }

    fn wheel(&mut self, pos: ScreenPoint, delta_y: f32, ctx: &mut RouterContext<'_>) -> RouterOutcome {
        if !ctx.has_original || ctx.container.is_degenerate() {
            return RouterOutcome::IGNORED;
        }
        let Some(direction) = ZoomDirection::from_scroll_delta(delta_y) else {
            return RouterOutcome::IGNORED;
        };
        ctx.transform
            .apply_zoom(ctx.container.to_local(pos), direction);

        // Re-base an in-flight pan so the next move doesn't undo the zoom.
        if let Some(snap) = self.snapshot.as_mut() {
            if self.mode == InteractionMode::Panning {
                snap.pointer = pos;
                snap.transform = ctx.transform.transform();
            }
        }
        RouterOutcome::HANDLED
    }

    fn touch_start(&mut self, id: u64, pos: ScreenPoint, ctx: &mut RouterContext<'_>) -> RouterOutcome {
        if self.mode != InteractionMode::Idle
            || !ctx.has_processed
            || !ctx.container.contains(pos)
            || !ctx.reveal.hit_test(pos.x, &ctx.container, ctx.divider_hit_width)
        {
            return RouterOutcome::IGNORED;
        }
        self.begin(InteractionMode::DraggingDivider, pos, ctx);
        self.active_touch = Some(id);
        RouterOutcome::HANDLED
    }

    fn begin(&mut self, mode: InteractionMode, pos: ScreenPoint, ctx: &RouterContext<'_>) {
        self.mode = mode;
        self.snapshot = Some(DragSnapshot {
            pointer: pos,
            transform: ctx.transform.transform(),
            reveal_position: ctx.reveal.position(),
        });
        debug!(%mode, x = pos.x, y = pos.y, "Gesture started");
    }

    /// Returns whether a gesture was in progress.
    fn end_gesture(&mut self) -> bool {
        let was_active = self.mode != InteractionMode::Idle;
        if was_active {
            debug!(mode = %self.mode, "Gesture ended");
        }
        self.mode = InteractionMode::Idle;
        self.snapshot = None;
        self.active_touch = None;
        was_active
    }
}
