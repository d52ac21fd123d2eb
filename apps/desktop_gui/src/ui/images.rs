//! Product image decoding and texture bookkeeping.

use std::collections::HashMap;

use eframe::egui;
use image::GenericImageView;
use shared::domain::ProductId;

const THUMBNAIL_MAX_EDGE: u32 = 512;

/// Decoded RGBA pixels, ready to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes)
        .map_err(|err| format!("failed to decode image bytes: {err}"))?;
    let (orig_w, orig_h) = GenericImageView::dimensions(&dynamic);
    let resized = if orig_w > THUMBNAIL_MAX_EDGE || orig_h > THUMBNAIL_MAX_EDGE {
        dynamic.thumbnail(THUMBNAIL_MAX_EDGE, THUMBNAIL_MAX_EDGE)
    } else {
        dynamic
    }
    .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

pub enum ImageSlot {
    Requested,
    Ready(egui::TextureHandle),
    Failed,
}

/// One slot per product; an image is requested at most once per session.
#[derive(Default)]
pub struct ProductImages {
    slots: HashMap<ProductId, ImageSlot>,
}

impl ProductImages {
    /// Marks `id` as requested. Returns false if it was already known.
    pub fn begin_request(&mut self, id: ProductId) -> bool {
        if self.slots.contains_key(&id) {
            return false;
        }
        self.slots.insert(id, ImageSlot::Requested);
        true
    }

    pub fn store(&mut self, ctx: &egui::Context, id: ProductId, image: PreviewImage) {
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
        let texture = ctx.load_texture(
            format!("product-image:{}", id.0),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        self.slots.insert(id, ImageSlot::Ready(texture));
    }

    pub fn mark_failed(&mut self, id: ProductId) {
        self.slots.insert(id, ImageSlot::Failed);
    }

    pub fn is_pending(&self, id: ProductId) -> bool {
        matches!(self.slots.get(&id), Some(ImageSlot::Requested))
    }

    pub fn is_failed(&self, id: ProductId) -> bool {
        matches!(self.slots.get(&id), Some(ImageSlot::Failed))
    }

    pub fn texture(&self, id: ProductId) -> Option<&egui::TextureHandle> {
        match self.slots.get(&id) {
            Some(ImageSlot::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png_into_rgba() {
        let decoded = decode_preview_image(&encode_png(4, 3)).expect("decode");
        assert_eq!((decoded.width, decoded.height), (4, 3));
        assert_eq!(decoded.rgba.len(), 4 * 3 * 4);
        assert_eq!(&decoded.rgba[..4], &[200, 10, 10, 255]);
    }

    #[test]
    fn large_images_are_thumbnailed() {
        let decoded = decode_preview_image(&encode_png(1024, 256)).expect("decode");
        assert_eq!(decoded.width, 512);
        assert_eq!(decoded.height, 128);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_preview_image(b"definitely not an image").expect_err("garbage");
        assert!(err.contains("failed to decode"));
    }

    #[test]
    fn each_product_is_requested_once() {
        let mut images = ProductImages::default();
        assert!(images.begin_request(ProductId(1)));
        assert!(!images.begin_request(ProductId(1)));
        assert!(images.is_pending(ProductId(1)));
        images.mark_failed(ProductId(1));
        assert!(images.is_failed(ProductId(1)));
        assert!(!images.begin_request(ProductId(1)));
        assert!(images.texture(ProductId(1)).is_none());
    }
}
