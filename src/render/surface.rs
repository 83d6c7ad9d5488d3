use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{FramefitError, FramefitResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A rendered square composite as premultiplied RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Surface {
    /// Premultiplied pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy suitable for encoders.
    pub fn to_rgba_image(&self) -> FramefitResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight).ok_or_else(|| {
            FramefitError::render(format!(
                "surface byte length {} does not match {}x{}",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }

    /// Encode as a PNG byte stream.
    pub fn encode_png(&self) -> FramefitResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}
