use std::path::Path;
use std::sync::mpsc;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::FramefitResult;

/// Outcome of an asset load.
#[derive(Clone, Debug)]
pub enum LoadState {
    /// Decode submitted, no answer yet.
    Pending,
    /// Decoded and ready to draw.
    Ready(PreparedImage),
    /// Decode (or read) failed; the message is user-presentable.
    Failed(String),
}

impl LoadState {
    /// Whether the load has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// An image whose decode may still be running on the rayon pool.
///
/// The owner observes completion by calling [`PendingImage::poll`] (non-blocking)
/// or [`PendingImage::wait`]; once settled the state never changes again.
#[derive(Debug)]
pub struct PendingImage {
    state: LoadState,
    rx: Option<mpsc::Receiver<FramefitResult<PreparedImage>>>,
}

impl PendingImage {
    /// Submit `bytes` for decoding in the background.
    pub fn spawn(bytes: Vec<u8>) -> Self {
        let (tx, rx) = mpsc::channel();
        rayon::spawn(move || {
            // The receiver may already be gone if the load was superseded.
            let _ = tx.send(decode_image(&bytes));
        });
        Self {
            state: LoadState::Pending,
            rx: Some(rx),
        }
    }

    /// Read `path` and submit it for decoding; read failures settle immediately.
    pub fn from_path(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => Self::spawn(bytes),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "asset read failed");
                Self::failed(format!("read '{}': {e}", path.display()))
            }
        }
    }

    /// An already-decoded image.
    pub fn ready(image: PreparedImage) -> Self {
        Self {
            state: LoadState::Ready(image),
            rx: None,
        }
    }

    /// A load that has already failed.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            state: LoadState::Failed(msg.into()),
            rx: None,
        }
    }

    /// Check for a decode result without blocking.
    pub fn poll(&mut self) -> &LoadState {
        if let Some(rx) = &self.rx {
            match rx.try_recv() {
                Ok(result) => self.settle(result),
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.settle_lost();
                }
            }
        }
        &self.state
    }

    /// Block until the decode settles.
    pub fn wait(&mut self) -> &LoadState {
        if let Some(rx) = &self.rx {
            match rx.recv() {
                Ok(result) => self.settle(result),
                Err(mpsc::RecvError) => self.settle_lost(),
            }
        }
        &self.state
    }

    /// Last observed state (does not poll).
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The decoded image, once ready.
    pub fn image(&self) -> Option<&PreparedImage> {
        match &self.state {
            LoadState::Ready(img) => Some(img),
            _ => None,
        }
    }

    fn settle(&mut self, result: FramefitResult<PreparedImage>) {
        self.rx = None;
        self.state = match result {
            Ok(img) => LoadState::Ready(img),
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    fn settle_lost(&mut self) {
        self.rx = None;
        self.state = LoadState::Failed("decode worker exited without a result".to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/pending.rs"]
mod tests;
