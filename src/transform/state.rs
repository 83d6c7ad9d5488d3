use crate::foundation::core::{Affine, ImageSize, Rect, Vec2};

/// Placement of the user image inside the square reference space.
///
/// `offset` is the top-left corner of the scaled image, in reference pixels.
/// A state returned by [`TransformState::clamp`] always covers the whole
/// `reference × reference` square.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    /// Uniform image scale (image pixels to reference pixels).
    pub scale: f64,
    /// Top-left corner of the scaled image in reference pixels.
    pub offset: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl TransformState {
    /// Smallest scale at which `image` still covers the square on both axes.
    pub fn cover_scale(image: ImageSize, reference: f64) -> f64 {
        (reference / image.w()).max(reference / image.h())
    }

    /// Auto-fit: cover scale, image centered on both axes.
    pub fn fit(image: ImageSize, reference: f64) -> Self {
        let scale = Self::cover_scale(image, reference);
        let extent = image.scaled(scale);
        Self {
            scale,
            offset: Vec2::new(
                (reference - extent.x) / 2.0,
                (reference - extent.y) / 2.0,
            ),
        }
    }

    /// Enforce the cover invariants.
    ///
    /// Raises the scale to [`TransformState::cover_scale`] if needed, then per axis
    /// either clamps the offset into `[reference - extent, 0]` (image overflows the
    /// square) or centers the image (image exactly spans or underflows the square).
    /// There is no upper bound on scale here.
    pub fn clamp(self, image: ImageSize, reference: f64) -> Self {
        let min_scale = Self::cover_scale(image, reference);
        let scale = if self.scale >= min_scale {
            self.scale
        } else {
            min_scale
        };
        let extent = image.scaled(scale);
        Self {
            scale,
            offset: Vec2::new(
                clamp_axis(self.offset.x, extent.x, reference),
                clamp_axis(self.offset.y, extent.y, reference),
            ),
        }
    }

    /// Scaled image rectangle in reference space.
    pub fn image_rect(self, image: ImageSize) -> Rect {
        let extent = image.scaled(self.scale);
        Rect::new(
            self.offset.x,
            self.offset.y,
            self.offset.x + extent.x,
            self.offset.y + extent.y,
        )
    }

    /// Image-space to reference-space mapping.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Same transform with offset shifted by `delta` (no clamping).
    pub fn panned(self, delta: Vec2) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }

    /// Same transform with scale multiplied by `factor` (no clamping).
    pub fn zoomed(self, factor: f64) -> Self {
        Self {
            scale: self.scale * factor,
            ..self
        }
    }
}

fn clamp_axis(offset: f64, extent: f64, reference: f64) -> f64 {
    if extent <= reference || !offset.is_finite() {
        return (reference - extent) / 2.0;
    }
    offset.clamp(reference - extent, 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/state.rs"]
mod tests;
