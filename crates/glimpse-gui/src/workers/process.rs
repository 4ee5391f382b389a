use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::messages::{ProcessStats, WorkerResult};
use crate::states::ProcessingSettings;

use super::io::rgba_to_raster;
use super::{send, SourceCache};

pub(super) fn handle_process(
    settings: &ProcessingSettings,
    generation: u64,
    cache: &SourceCache,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(source) = cache.image.as_ref() else {
        send_failure(tx, ctx, generation, "No image loaded".into());
        return;
    };

    let start = Instant::now();
    let result = process_image(source, settings).and_then(|(preview, encoded_size)| {
        Ok((rgba_to_raster(preview)?, encoded_size))
    });

    match result {
        Ok((buffer, encoded_size)) => {
            let stats = ProcessStats {
                encoded_size,
                savings_percent: savings_percent(cache.file_size, encoded_size),
                elapsed: start.elapsed(),
            };
            tracing::debug!(
                generation,
                quality = settings.quality,
                encoded_size,
                source = ?cache.path,
                "Processed preview ready"
            );
            send(
                tx,
                ctx,
                WorkerResult::ProcessedReady {
                    buffer,
                    stats,
                    generation,
                },
            );
        }
        Err(e) => {
            tracing::warn!(generation, "Processing failed: {e:#}");
            send_failure(tx, ctx, generation, format!("Processing failed: {e:#}"));
        }
    }
}

fn send_failure(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    generation: u64,
    message: String,
) {
    send(
        tx,
        ctx,
        WorkerResult::ProcessingFailed {
            message,
            generation,
        },
    );
}

/// Resize (optionally), encode as JPEG and decode again so the preview
/// shows the real compression artifacts. Returns the decoded preview and
/// the encoded byte count.
pub(super) fn process_image(
    source: &DynamicImage,
    settings: &ProcessingSettings,
) -> Result<(RgbaImage, usize)> {
    let rgb = match &settings.resize {
        Some(resize) => source
            .resize_exact(resize.width, resize.height, resize.filter.into())
            .to_rgb8(),
        None => source.to_rgb8(),
    };

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, settings.quality.clamp(1, 100))
        .encode_image(&rgb)
        .context("JPEG encode failed")?;

    let preview = image::load_from_memory_with_format(&encoded, ImageFormat::Jpeg)
        .context("JPEG decode failed")?
        .to_rgba8();
    Ok((preview, encoded.len()))
}

/// Percentage saved relative to the original file. Negative when larger.
pub(super) fn savings_percent(original: usize, optimized: usize) -> f32 {
    if original == 0 {
        return 0.0;
    }
    ((original as f64 - optimized as f64) / original as f64 * 100.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::{ResizeFilter, ResizeSettings};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 4) as u8, (y * 4) as u8, 128, 255])
        }))
    }

    #[test]
    fn test_round_trip_keeps_size() {
        let settings = ProcessingSettings::default();
        let (preview, encoded) = process_image(&gradient(40, 30), &settings).unwrap();
        assert_eq!(preview.dimensions(), (40, 30));
        assert!(encoded > 0);
        assert!(preview.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_resize_changes_output_dimensions() {
        let settings = ProcessingSettings {
            quality: 60,
            resize: Some(ResizeSettings {
                width: 20,
                height: 10,
                filter: ResizeFilter::Triangle,
            }),
        };
        let (preview, _) = process_image(&gradient(40, 30), &settings).unwrap();
        assert_eq!(preview.dimensions(), (20, 10));
    }

    #[test]
    fn test_lower_quality_encodes_smaller() {
        let source = gradient(64, 64);
        let low = ProcessingSettings {
            quality: 10,
            resize: None,
        };
        let high = ProcessingSettings {
            quality: 95,
            resize: None,
        };
        let (_, low_size) = process_image(&source, &low).unwrap();
        let (_, high_size) = process_image(&source, &high).unwrap();
        assert!(low_size < high_size);
    }

    #[test]
    fn test_savings_percent() {
        assert_eq!(savings_percent(1000, 250), 75.0);
        assert_eq!(savings_percent(100, 150), -50.0);
        assert_eq!(savings_percent(0, 10), 0.0);
    }
}
