use tracing::trace;

use crate::config::ZoomLimits;
use crate::error::Result;
use crate::geometry::ScreenPoint;
use crate::observe::{Observers, SubscriptionId};

/// Content-to-screen mapping shared by both surfaces:
/// `screen = content * scale + translate`.
///
/// Screen coordinates here are local to the viewport container, origin at
/// its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn content_to_screen(&self, p: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }

    pub fn screen_to_content(&self, p: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            (p.x - self.translate_x) / self.scale,
            (p.y - self.translate_y) / self.scale,
        )
    }

    pub fn zoom_percent(&self) -> f32 {
        self.scale * 100.0
    }

    /// Composed translate-then-scale operation with a top-left origin.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ViewportTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive scroll (wheel away from the user) zooms in.
    pub fn from_scroll_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::In)
        } else if delta_y < 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// Owns the current [`ViewportTransform`] and notifies observers on change.
#[derive(Debug)]
pub struct TransformModel {
    transform: ViewportTransform,
    limits: ZoomLimits,
    observers: Observers<ViewportTransform>,
}

impl Default for TransformModel {
    fn default() -> Self {
        Self::with_valid_limits(ZoomLimits::default())
    }
}

impl TransformModel {
    pub fn new(limits: ZoomLimits) -> Result<Self> {
        limits.validate()?;
        Ok(Self::with_valid_limits(limits))
    }

    /// Caller guarantees `limits` passed [`ZoomLimits::validate`].
    pub(crate) fn with_valid_limits(limits: ZoomLimits) -> Self {
        Self {
            transform: ViewportTransform::IDENTITY,
            limits,
            observers: Observers::default(),
        }
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub fn zoom_percent(&self) -> f32 {
        self.transform.zoom_percent()
    }

    /// Zoom one step around `cursor` (container-local), keeping the content
    /// point under the cursor at the same screen position.
    pub fn apply_zoom(&mut self, cursor: ScreenPoint, direction: ZoomDirection) {
        if !cursor.is_finite() {
            return;
        }
        let t = self.transform;
        let content = t.screen_to_content(cursor);
        let new_scale = self
            .limits
            .clamp(t.scale + direction.sign() * self.limits.intensity * t.scale);

        self.commit(ViewportTransform {
            scale: new_scale,
            translate_x: cursor.x - content.x * new_scale,
            translate_y: cursor.y - content.y * new_scale,
        });
    }

    /// Translate by a screen-space delta. The delta is not scaled.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let t = self.transform;
        self.commit(ViewportTransform {
            translate_x: t.translate_x + dx,
            translate_y: t.translate_y + dy,
            ..t
        });
    }

    /// Set the translation directly, keeping the scale.
    pub fn set_translate(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let t = self.transform;
        self.commit(ViewportTransform {
            translate_x: x,
            translate_y: y,
            ..t
        });
    }

    pub fn reset(&mut self) {
        self.commit(ViewportTransform::IDENTITY);
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ViewportTransform) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn commit(&mut self, next: ViewportTransform) {
        if next == self.transform {
            return;
        }
        self.transform = next;
        trace!(transform = %next, "Transform changed");
        self.observers.notify(&next);
    }
}
