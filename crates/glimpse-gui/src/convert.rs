use glimpse_core::surface::RasterBuffer;
use rayon::prelude::*;

/// Convert a straight-alpha RGBA buffer to an egui ColorImage.
pub fn raster_to_color_image(buffer: &RasterBuffer) -> egui::ColorImage {
    let pixels = buffer
        .pixels()
        .par_chunks_exact(4)
        .map(|p| egui::Color32::from_rgba_unmultiplied(p[0], p[1], p[2], p[3]))
        .collect();

    egui::ColorImage {
        size: [buffer.width() as usize, buffer.height() as usize],
        pixels,
        source_size: Default::default(),
    }
}
