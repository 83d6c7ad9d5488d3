use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::foundation::error::{FramefitError, FramefitResult};

/// Engine-wide settings shared by the preview and export paths.
///
/// All transform state is expressed in a square reference space of
/// `reference_size` pixels; `export_size` only affects the final raster.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Side of the square reference space (and of the preview raster).
    pub reference_size: u32,
    /// Side of the exported square PNG.
    pub export_size: u32,
    /// Upper bound applied to zoom gestures before clamping.
    pub max_scale: f64,
    /// Lifetime of transient user notices, in milliseconds.
    pub notice_ttl_ms: u64,
    /// Suggested file name for exported images.
    pub export_file_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_size: 1080,
            export_size: 1280,
            max_scale: 6.0,
            notice_ttl_ms: 3000,
            export_file_name: "dp-trans.png".to_string(),
        }
    }
}

impl EngineConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> FramefitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FramefitError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse and validate a JSON config from any reader.
    pub fn from_reader(r: impl Read) -> FramefitResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| FramefitError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that sizes fit the rasterizer and the zoom bound is usable.
    pub fn validate(&self) -> FramefitResult<()> {
        for (name, v) in [
            ("reference_size", self.reference_size),
            ("export_size", self.export_size),
        ] {
            if v == 0 || v > u32::from(u16::MAX) {
                return Err(FramefitError::config(format!(
                    "{name} must be in 1..={}, got {v}",
                    u16::MAX
                )));
            }
        }
        if !self.max_scale.is_finite() || self.max_scale <= 0.0 {
            return Err(FramefitError::config(format!(
                "max_scale must be finite and > 0, got {}",
                self.max_scale
            )));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(FramefitError::config("export_file_name must not be empty"));
        }
        Ok(())
    }

    /// Reference size as `f64`, the unit all transform math works in.
    pub fn reference(&self) -> f64 {
        f64::from(self.reference_size)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
