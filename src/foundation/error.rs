/// Convenience result type used across framefit.
pub type FramefitResult<T> = Result<T, FramefitError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramefitError {
    /// Invalid caller-provided data (sizes, transforms, arguments).
    #[error("validation error: {0}")]
    Validation(String),

    /// Upload rejected by the declared-type check before any decode attempt.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// Bytes could not be decoded into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rasterization or encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Engine configuration could not be loaded or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramefitError {
    /// Build a [`FramefitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramefitError::UnsupportedType`] value.
    pub fn unsupported_type(declared: impl Into<String>) -> Self {
        Self::UnsupportedType(declared.into())
    }

    /// Build a [`FramefitError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FramefitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FramefitError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
