//! Body table validation errors.

/// Errors raised when a body descriptor cannot be placed in a scene.
///
/// These only surface while a scene is being built. Nothing on the per-frame
/// path returns an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    /// A distance, size or speed was zero, negative, NaN or infinite.
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A backdrop extent was negative, NaN or infinite.
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A fraction such as the star saturation fell outside `0..=1`.
    #[error("{field} must be between 0 and 1, got {value}")]
    OutOfUnitRange {
        field: &'static str,
        value: f64,
    },

    /// The surface texture identity was empty.
    #[error("texture identity is empty")]
    EmptyTexture,

    /// A light intensity was negative or not finite.
    #[error("light intensity must be non-negative and finite, got {0}")]
    InvalidLight(f32),

    /// An orbiting body at a given table index failed validation.
    #[error("body {index} is invalid: {source}")]
    Body {
        /// Registration index of the body.
        index: usize,
        /// What was wrong with it.
        #[source]
        source: Box<DescriptorError>,
    },
}
