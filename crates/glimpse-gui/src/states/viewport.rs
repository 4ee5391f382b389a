use glimpse_core::surface::{SurfaceId, SurfaceRenderer};

use crate::convert::raster_to_color_image;

struct CachedTexture {
    revision: u64,
    handle: Option<egui::TextureHandle>,
}

/// GPU textures mirroring the viewer's two surfaces.
///
/// A surface is re-uploaded only when its revision changes.
pub struct ViewportTextures {
    original: CachedTexture,
    processed: CachedTexture,
}

impl Default for ViewportTextures {
    fn default() -> Self {
        Self {
            original: CachedTexture {
                revision: 0,
                handle: None,
            },
            processed: CachedTexture {
                revision: 0,
                handle: None,
            },
        }
    }
}

impl ViewportTextures {
    pub fn sync(&mut self, ctx: &egui::Context, surfaces: &SurfaceRenderer) {
        for id in [SurfaceId::Original, SurfaceId::Processed] {
            let revision = surfaces.revision(id);
            let cached = self.cached_mut(id);
            if cached.revision == revision {
                continue;
            }
            cached.revision = revision;
            cached.handle = surfaces.surface(id).map(|buffer| {
                ctx.load_texture(
                    format!("viewport-{id}"),
                    raster_to_color_image(buffer),
                    egui::TextureOptions::NEAREST,
                )
            });
        }
    }

    pub fn texture_id(&self, id: SurfaceId) -> Option<egui::TextureId> {
        let cached = match id {
            SurfaceId::Original => &self.original,
            SurfaceId::Processed => &self.processed,
        };
        cached.handle.as_ref().map(|t| t.id())
    }

    fn cached_mut(&mut self, id: SurfaceId) -> &mut CachedTexture {
        match id {
            SurfaceId::Original => &mut self.original,
            SurfaceId::Processed => &mut self.processed,
        }
    }
}
