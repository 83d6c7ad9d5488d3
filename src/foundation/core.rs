use crate::foundation::error::{FramefitError, FramefitResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Natural pixel dimensions of a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Build a size, rejecting zero-area images.
    pub fn new(width: u32, height: u32) -> FramefitResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramefitError::validation(format!(
                "image size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Size scaled uniformly by `scale`.
    pub fn scaled(self, scale: f64) -> Vec2 {
        Vec2::new(self.w() * scale, self.h() * scale)
    }
}
