use std::path::PathBuf;

use image::DynamicImage;

/// The decoded original kept on the worker for reprocessing.
#[derive(Default)]
pub(crate) struct SourceCache {
    pub path: Option<PathBuf>,
    pub image: Option<DynamicImage>,
    pub file_size: usize,
}

impl SourceCache {
    pub fn store(&mut self, path: PathBuf, image: DynamicImage, file_size: usize) {
        self.path = Some(path);
        self.image = Some(image);
        self.file_size = file_size;
    }
}
