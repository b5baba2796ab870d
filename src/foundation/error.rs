/// Convenience result type used across the badge pipeline.
pub type BadgeResult<T> = Result<T, BadgeError>;

/// Error taxonomy for configuration, layout and rendering.
///
/// Upstream fetch failures have their own taxonomy in [`crate::FetchError`]; they are expected
/// outcomes that end up rendered on a panel, while a `BadgeError` means the badge itself could
/// not be produced.
#[derive(thiserror::Error, Debug)]
pub enum BadgeError {
    /// Invalid caller-provided data (canvas size, colors, query values).
    #[error("validation error: {0}")]
    Validation(String),

    /// The SVG document could not be rasterized or encoded.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid or unreadable service configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BadgeError {
    /// Build a [`BadgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BadgeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BadgeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
