use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::Affine;
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::render::plan::{CompositePlan, DrawOp, Layer};
use crate::render::surface::Surface;

/// CPU rasterizer for [`CompositePlan`]s, powered by `vello_cpu`.
///
/// Converting a decoded image into a `vello_cpu` paint is the expensive part
/// of a preview redraw, so the last paint per layer is cached and reused while
/// the same pixel buffer is drawn.
#[derive(Default)]
pub struct CpuRenderer {
    photo: Option<CachedPaint>,
    frame: Option<CachedPaint>,
}

struct CachedPaint {
    pixels: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("photo_cached", &self.photo.is_some())
            .field("frame_cached", &self.frame.is_some())
            .finish()
    }
}

impl CpuRenderer {
    /// Create a renderer with empty paint caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize `plan`, sampling `photo` and `frame` for their layers.
    pub fn render(
        &mut self,
        plan: &CompositePlan,
        photo: &PreparedImage,
        frame: &PreparedImage,
    ) -> FramefitResult<Surface> {
        let side: u16 = plan
            .target_size
            .try_into()
            .map_err(|_| FramefitError::render("target size exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(side, side);
        let mut ctx = vello_cpu::RenderContext::new(side, side);
        for op in &plan.ops {
            let (image, slot) = match op.layer {
                Layer::Photo => (photo, &mut self.photo),
                Layer::Frame => (frame, &mut self.frame),
            };
            let paint = paint_for(slot, image)?;
            draw_image(&mut ctx, op, paint, image)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(Surface {
            width: plan.target_size,
            height: plan.target_size,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn paint_for(
    slot: &mut Option<CachedPaint>,
    image: &PreparedImage,
) -> FramefitResult<vello_cpu::Image> {
    if let Some(cached) = slot
        && Arc::ptr_eq(&cached.pixels, &image.rgba8_premul)
    {
        return Ok(cached.paint.clone());
    }

    let pixmap = image_premul_bytes_to_pixmap(&image.rgba8_premul, image.width, image.height)?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    *slot = Some(CachedPaint {
        pixels: Arc::clone(&image.rgba8_premul),
        paint: paint.clone(),
    });
    Ok(paint)
}

fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
    paint: vello_cpu::Image,
    image: &PreparedImage,
) -> FramefitResult<()> {
    let (w, h) = (f64::from(image.width), f64::from(image.height));
    if w <= 0.0 || h <= 0.0 {
        return Err(FramefitError::render("cannot draw an empty image"));
    }
    let transform = Affine::translate((op.dest.x0, op.dest.y0))
        * Affine::scale_non_uniform(op.dest.width() / w, op.dest.height() / h);

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
    Ok(())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FramefitResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FramefitError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FramefitError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FramefitError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
