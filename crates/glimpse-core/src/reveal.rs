use tracing::trace;

use crate::consts::DEFAULT_REVEAL_POSITION;
use crate::geometry::{ClipRect, ContainerRect};
use crate::observe::{Observers, SubscriptionId};

/// Owns the divider position, a percentage of the viewport width.
///
/// Everything here is computed from container geometry only, so the clip
/// stays anchored to the viewport whatever the pan/zoom transform is.
#[derive(Debug)]
pub struct RevealController {
    position: f32,
    observers: Observers<f32>,
}

impl Default for RevealController {
    fn default() -> Self {
        Self {
            position: DEFAULT_REVEAL_POSITION,
            observers: Observers::default(),
        }
    }
}

impl RevealController {
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Place the divider under the pointer.
    ///
    /// A zero-width container clamps to the nearest bound instead of
    /// producing NaN.
    pub fn set_from_pointer(&mut self, pointer_x: f32, container_left: f32, container_width: f32) {
        if !pointer_x.is_finite() || !container_left.is_finite() {
            return;
        }
        let position = if container_width > 0.0 && container_width.is_finite() {
            ((pointer_x - container_left) / container_width) * 100.0
        } else if pointer_x > container_left {
            100.0
        } else {
            0.0
        };
        self.set_position(position);
    }

    /// Set the position directly. Clamped to `[0, 100]`; NaN is ignored.
    pub fn set_position(&mut self, position: f32) {
        if position.is_nan() {
            return;
        }
        let position = position.clamp(0.0, 100.0);
        if position == self.position {
            return;
        }
        self.position = position;
        trace!(position, "Reveal position changed");
        self.observers.notify(&position);
    }

    pub fn reset(&mut self) {
        self.set_position(DEFAULT_REVEAL_POSITION);
    }

    /// Divider x in window coordinates.
    pub fn divider_x(&self, container: &ContainerRect) -> f32 {
        container.left + container.width.max(0.0) * self.position / 100.0
    }

    /// Whether `pointer_x` falls inside the grab band centred on the divider.
    pub fn hit_test(&self, pointer_x: f32, container: &ContainerRect, hit_width: f32) -> bool {
        (pointer_x - self.divider_x(container)).abs() <= hit_width / 2.0
    }

    /// Visible region of the original layer (left of the divider).
    pub fn original_clip(&self, container: &ContainerRect) -> ClipRect {
        ClipRect {
            left: container.left,
            top: container.top,
            right: self.divider_x(container),
            bottom: container.bottom(),
        }
    }

    /// Visible region of the processed layer (right of the divider).
    pub fn processed_clip(&self, container: &ContainerRect) -> ClipRect {
        ClipRect {
            left: self.divider_x(container),
            top: container.top,
            right: container.left + container.width.max(0.0),
            bottom: container.bottom(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&f32) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
