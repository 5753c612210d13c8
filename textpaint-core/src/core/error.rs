use thiserror::Error;

/// Runtime errors raised by drawing devices and font loading.
///
/// Contract violations (binding a renderer twice, drawing while unbound,
/// negative underline boxes) are not represented here: they panic, since they
/// signal a bug in the caller rather than a condition to recover from.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// A glyph source names a face the device has not loaded
    #[error("Font '{0}' not loaded on this device")]
    FontNotLoaded(String),

    /// Glyphs were shown before any glyph source was set
    #[error("No glyph source set")]
    NoGlyphSource,

    /// Font data could not be parsed
    #[error("Failed to parse font data: {0}")]
    FontParse(String),

    /// Geometry the device cannot represent
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            RenderError::FontNotLoaded("Sans".into()).to_string(),
            "Font 'Sans' not loaded on this device"
        );
        assert_eq!(RenderError::NoGlyphSource.to_string(), "No glyph source set");
    }
}
