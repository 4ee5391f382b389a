use std::io::Cursor;
use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use glimpse_core::surface::{RasterBuffer, SurfaceId};
use image::{DynamicImage, ImageReader, RgbaImage};

use crate::messages::WorkerResult;

use super::{send, send_error, send_log, SourceCache};

pub(super) fn handle_load_original(
    path: &Path,
    cache: &mut SourceCache,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let loaded = read_image(path).and_then(|(image, file_size)| {
        let buffer = rgba_to_raster(image.to_rgba8())?;
        Ok((image, buffer, file_size))
    });

    match loaded {
        Ok((image, buffer, file_size)) => {
            tracing::info!(
                path = %path.display(),
                width = buffer.width(),
                height = buffer.height(),
                file_size,
                "Decoded original"
            );
            send_log(
                tx,
                ctx,
                format!(
                    "Opened: {} ({}x{}, {:.0}ms)",
                    path.display(),
                    buffer.width(),
                    buffer.height(),
                    start.elapsed().as_secs_f64() * 1000.0
                ),
            );
            cache.store(path.to_path_buf(), image, file_size);
            send(
                tx,
                ctx,
                WorkerResult::OriginalLoaded {
                    path: path.to_path_buf(),
                    buffer,
                    file_size,
                },
            );
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to load image: {e:#}");
            send_error(tx, ctx, SurfaceId::Original, format!("Failed to open file: {e:#}"));
        }
    }
}

/// Read and decode a file, sniffing the format from its contents.
pub(super) fn read_image(path: &Path) -> Result<(DynamicImage, usize)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let image = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .context("Cannot detect image format")?
        .decode()
        .context("Cannot decode image")?;
    Ok((image, bytes.len()))
}

pub(super) fn rgba_to_raster(image: RgbaImage) -> Result<RasterBuffer> {
    let (width, height) = image.dimensions();
    Ok(RasterBuffer::new(width, height, image.into_raw())?)
}
