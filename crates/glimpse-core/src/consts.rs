/// Smallest allowed display scale.
pub const DEFAULT_MIN_SCALE: f32 = 0.1;

/// Largest allowed display scale.
pub const DEFAULT_MAX_SCALE: f32 = 50.0;

/// Fraction of the current scale added or removed per wheel notch.
pub const DEFAULT_ZOOM_INTENSITY: f32 = 0.1;

/// Divider position (percent of viewport width) after a reset.
pub const DEFAULT_REVEAL_POSITION: f32 = 50.0;

/// Width in screen pixels of the band around the divider that starts a drag.
/// Independent of zoom.
pub const DEFAULT_DIVIDER_HIT_WIDTH: f32 = 24.0;

/// Quiet period after the last parameter change before reprocessing.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// File extensions accepted by drag-and-drop and the open dialog.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;
