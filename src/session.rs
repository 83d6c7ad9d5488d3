use std::path::Path;
use std::time::{Duration, Instant};

use crate::assets::decode::{ImageKind, PreparedImage, check_drawable};
use crate::assets::pending::{LoadState, PendingImage};
use crate::config::EngineConfig;
use crate::foundation::core::{ImageSize, Point, Vec2};
use crate::foundation::error::{FramefitError, FramefitResult};
use crate::render::cpu::CpuRenderer;
use crate::render::plan::plan_composite;
use crate::render::surface::Surface;
use crate::transform::gesture::{GestureTracker, PointerMapping, bound_scale, pinch_distance};
use crate::transform::state::TransformState;

const UNSUPPORTED_TYPE_NOTICE: &str = "File type not supported. Upload .png or .jpg";
const DECODE_FAILED_NOTICE: &str = "Could not read that image. Try another file";

/// A transient, user-facing message with an expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Text to show.
    pub message: String,
    /// Instant after which the notice is no longer shown.
    pub expires_at: Instant,
}

/// What changed when a pending upload settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadEvent {
    /// The upload decoded and is now the active photo.
    Installed(ImageSize),
    /// The upload could not be decoded; the previous state is kept.
    Failed(String),
}

/// An encoded export ready to hand to the user.
#[derive(Clone, Debug)]
pub struct Export {
    /// Suggested file name.
    pub file_name: String,
    /// Side of the exported square, in pixels.
    pub size: u32,
    /// PNG byte stream.
    pub png: Vec<u8>,
}

/// One editing session: a frame overlay, at most one user photo, and its transform.
///
/// Every mutation goes through `&mut self`, so gesture steps are naturally
/// serialized. Gestures, rendering and export are no-ops until both the photo
/// and the frame have finished decoding.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    frame: PendingImage,
    photo: Option<PreparedImage>,
    incoming: Option<PendingImage>,
    transform: TransformState,
    gestures: GestureTracker,
    pointer: PointerMapping,
    renderer: CpuRenderer,
    preview: Option<Surface>,
    notice: Option<Notice>,
}

impl Session {
    /// Start a session around a (possibly still decoding) frame overlay.
    pub fn new(config: EngineConfig, frame: PendingImage) -> FramefitResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            frame,
            photo: None,
            incoming: None,
            transform: TransformState::default(),
            gestures: GestureTracker::default(),
            pointer: PointerMapping::identity(),
            renderer: CpuRenderer::new(),
            preview: None,
            notice: None,
        })
    }

    /// Start a session, loading the frame overlay from `path` in the background.
    pub fn with_frame_path(config: EngineConfig, path: &Path) -> FramefitResult<Self> {
        Self::new(config, PendingImage::from_path(path))
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame overlay load state as of the last poll.
    pub fn frame_state(&self) -> &LoadState {
        self.frame.state()
    }

    /// Whether a photo is installed.
    pub fn is_loaded(&self) -> bool {
        self.photo.is_some()
    }

    /// Whether an upload is still decoding.
    pub fn is_loading(&self) -> bool {
        self.incoming.is_some()
    }

    /// Natural size of the installed photo.
    pub fn photo_size(&self) -> Option<ImageSize> {
        self.photo.as_ref().map(PreparedImage::size)
    }

    /// Current transform in reference space.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Current scale rounded to two decimals, as a zoom slider shows it.
    pub fn zoom_value(&self) -> f64 {
        (self.transform.scale * 100.0).round() / 100.0
    }

    /// Most recent preview raster, re-rendered after every transform change.
    pub fn preview(&self) -> Option<&Surface> {
        self.preview.as_ref()
    }

    /// The notice visible at `now`, if any.
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now < n.expires_at)
            .map(|n| n.message.as_str())
    }

    /// Submit an upload whose declared MIME type is `declared_type`.
    ///
    /// Unsupported types are rejected before any decode is attempted: a notice
    /// is posted and nothing else changes. Accepted uploads start decoding in
    /// the background; call [`Session::poll`] or [`Session::wait`] to pick up
    /// the result.
    pub fn submit_upload(
        &mut self,
        declared_type: &str,
        bytes: Vec<u8>,
        now: Instant,
    ) -> FramefitResult<()> {
        let kind = match ImageKind::from_declared_type(declared_type) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!(declared_type, "rejected upload");
                self.post_notice(UNSUPPORTED_TYPE_NOTICE, now);
                return Err(e);
            }
        };
        tracing::debug!(mime = kind.mime(), bytes = bytes.len(), "upload accepted");
        self.incoming = Some(PendingImage::spawn(bytes));
        Ok(())
    }

    /// Install an already-decoded photo, resetting the transform to auto-fit.
    pub fn install_photo(&mut self, photo: PreparedImage) -> FramefitResult<()> {
        let size = check_drawable(photo.width, photo.height)?;
        self.transform = TransformState::fit(size, self.config.reference());
        self.photo = Some(photo);
        self.gestures.reset();
        tracing::info!(
            width = size.width,
            height = size.height,
            scale = self.transform.scale,
            "photo installed"
        );
        self.refresh_preview()
    }

    /// Pick up finished decodes without blocking.
    pub fn poll(&mut self, now: Instant) -> FramefitResult<Option<LoadEvent>> {
        let frame_was_pending = !self.frame.state().is_settled();
        self.frame.poll();
        if frame_was_pending {
            self.on_frame_settled()?;
        }

        let Some(incoming) = self.incoming.as_mut() else {
            return Ok(None);
        };
        let state = incoming.poll().clone();
        self.on_upload_state(state, now)
    }

    /// Block until the frame and any pending upload have settled.
    pub fn wait(&mut self, now: Instant) -> FramefitResult<Option<LoadEvent>> {
        let frame_was_pending = !self.frame.state().is_settled();
        self.frame.wait();
        if frame_was_pending {
            self.on_frame_settled()?;
        }

        let Some(incoming) = self.incoming.as_mut() else {
            return Ok(None);
        };
        let state = incoming.wait().clone();
        self.on_upload_state(state, now)
    }

    /// Tell the session how large the preview is displayed on screen.
    pub fn set_display_size(&mut self, displayed: Vec2) -> FramefitResult<()> {
        self.pointer = PointerMapping::new(self.config.reference(), displayed)?;
        Ok(())
    }

    /// Pointer pressed at screen position `p`.
    pub fn drag_start(&mut self, p: Point) {
        if !self.is_loaded() {
            return;
        }
        self.gestures.drag_start(self.pointer.to_reference(p));
    }

    /// Pointer moved to screen position `p` during a drag.
    pub fn drag_move(&mut self, p: Point) -> FramefitResult<()> {
        if !self.is_loaded() {
            return Ok(());
        }
        let Some(delta) = self.gestures.drag_move(self.pointer.to_reference(p)) else {
            return Ok(());
        };
        self.apply(self.transform.panned(delta))
    }

    /// Pointer released or left the surface.
    pub fn drag_end(&mut self) {
        self.gestures.drag_end();
    }

    /// Two fingers down at screen positions `a` and `b`.
    pub fn pinch_start(&mut self, a: Point, b: Point) {
        if !self.is_loaded() {
            return;
        }
        self.gestures.pinch_start(pinch_distance(a, b));
    }

    /// Two fingers moved to `a` and `b`.
    pub fn pinch_move(&mut self, a: Point, b: Point) -> FramefitResult<()> {
        if !self.is_loaded() {
            return Ok(());
        }
        let Some(factor) = self.gestures.pinch_move(pinch_distance(a, b)) else {
            return Ok(());
        };
        self.apply(self.transform.zoomed(factor))
    }

    /// Fewer than two fingers remain.
    pub fn pinch_end(&mut self) {
        self.gestures.pinch_end();
    }

    /// Set the scale absolutely (zoom slider).
    pub fn set_zoom(&mut self, scale: f64) -> FramefitResult<()> {
        if !scale.is_finite() {
            return Err(FramefitError::validation(format!(
                "zoom must be finite, got {scale}"
            )));
        }
        if !self.is_loaded() {
            return Ok(());
        }
        self.apply(TransformState {
            scale,
            ..self.transform
        })
    }

    /// Discard the photo, any pending upload and the transform.
    pub fn reset(&mut self) {
        self.photo = None;
        self.incoming = None;
        self.transform = TransformState::default();
        self.gestures.reset();
        self.preview = None;
        tracing::info!("session reset");
    }

    /// Composite photo and frame into a `target_size` square.
    ///
    /// Returns `Ok(None)` without touching any state when no photo is
    /// installed or the frame has not finished loading.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self, target_size: u32) -> FramefitResult<Option<Surface>> {
        let (Some(photo), Some(frame)) = (self.photo.as_ref(), self.frame.image()) else {
            return Ok(None);
        };
        let plan = plan_composite(
            self.transform,
            photo.size(),
            self.config.reference(),
            target_size,
        )?;
        let surface = self.renderer.render(&plan, photo, frame)?;
        self.transform = plan.transform;
        Ok(Some(surface))
    }

    /// Render at the export size and encode as PNG.
    #[tracing::instrument(skip(self))]
    pub fn export(&mut self) -> FramefitResult<Option<Export>> {
        let size = self.config.export_size;
        let Some(surface) = self.render(size)? else {
            return Ok(None);
        };
        let png = surface.encode_png()?;
        tracing::info!(
            size,
            bytes = png.len(),
            file_name = %self.config.export_file_name,
            "export encoded"
        );
        Ok(Some(Export {
            file_name: self.config.export_file_name.clone(),
            size,
            png,
        }))
    }

    fn apply(&mut self, next: TransformState) -> FramefitResult<()> {
        let Some(size) = self.photo_size() else {
            return Ok(());
        };
        let reference = self.config.reference();
        let cover = TransformState::cover_scale(size, reference);
        let bounded = TransformState {
            scale: bound_scale(next.scale, self.config.max_scale, cover),
            ..next
        };
        self.transform = bounded.clamp(size, reference);
        tracing::debug!(
            scale = self.transform.scale,
            x = self.transform.offset.x,
            y = self.transform.offset.y,
            "transform updated"
        );
        self.refresh_preview()
    }

    fn refresh_preview(&mut self) -> FramefitResult<()> {
        let size = self.config.reference_size;
        if let Some(surface) = self.render(size)? {
            self.preview = Some(surface);
        }
        Ok(())
    }

    fn on_frame_settled(&mut self) -> FramefitResult<()> {
        match self.frame.state() {
            LoadState::Pending => Ok(()),
            LoadState::Ready(img) => {
                tracing::debug!(width = img.width, height = img.height, "frame ready");
                self.refresh_preview()
            }
            LoadState::Failed(msg) => {
                tracing::warn!(error = %msg, "frame overlay failed to load");
                Ok(())
            }
        }
    }

    fn on_upload_state(
        &mut self,
        state: LoadState,
        now: Instant,
    ) -> FramefitResult<Option<LoadEvent>> {
        match state {
            LoadState::Pending => Ok(None),
            LoadState::Ready(photo) => {
                self.incoming = None;
                let size = photo.size();
                self.install_photo(photo)?;
                Ok(Some(LoadEvent::Installed(size)))
            }
            LoadState::Failed(msg) => {
                self.incoming = None;
                tracing::warn!(error = %msg, "upload failed to decode");
                self.post_notice(DECODE_FAILED_NOTICE, now);
                Ok(Some(LoadEvent::Failed(msg)))
            }
        }
    }

    fn post_notice(&mut self, message: &str, now: Instant) {
        self.notice = Some(Notice {
            message: message.to_string(),
            expires_at: now + Duration::from_millis(self.config.notice_ttl_ms),
        });
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
