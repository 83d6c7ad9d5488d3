use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::ImageSize;
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::foundation::math::premultiply_rgba8_in_place;

#[derive(Clone, Debug)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Natural dimensions.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Upload types the engine accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    /// `image/png`
    Png,
    /// `image/jpeg`
    Jpeg,
}

impl ImageKind {
    /// Check a declared MIME type.
    ///
    /// Matching ignores ASCII case and any `;`-separated parameters. Anything
    /// other than PNG or JPEG is rejected without looking at the bytes.
    pub fn from_declared_type(declared: &str) -> FramefitResult<Self> {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("image/png") {
            Ok(Self::Png)
        } else if essence.eq_ignore_ascii_case("image/jpeg") {
            Ok(Self::Jpeg)
        } else {
            Err(FramefitError::unsupported_type(declared))
        }
    }

    /// Canonical MIME type.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// MIME type a file picker would declare for `path`, from its extension.
///
/// Unknown extensions map to `application/octet-stream`.
pub fn declared_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" | "jfif" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Largest width or height the rasterizer can sample from.
pub(crate) const MAX_IMAGE_SIDE: u32 = u16::MAX as u32;

/// Check that a raster of `width` x `height` can be drawn.
pub(crate) fn check_drawable(width: u32, height: u32) -> FramefitResult<ImageSize> {
    if width > MAX_IMAGE_SIDE || height > MAX_IMAGE_SIDE {
        return Err(FramefitError::decode(format!(
            "image is {width}x{height}, sides above {MAX_IMAGE_SIDE} px are not supported"
        )));
    }
    ImageSize::new(width, height)
}

/// Decode any supported raster container into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> FramefitResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FramefitError::decode(format!("decode image from memory: {e}")))?;
    check_drawable(dyn_img.width(), dyn_img.height())?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
