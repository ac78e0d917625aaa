use thiserror::Error;

/// Result type for colormask operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for mask detection and compositing operations
///
/// Threshold values are never reported here: a negative color distance
/// threshold is clamped to zero by the detector instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input image cannot be classified
    ///
    /// Returned for images with a zero width or height, and for decoded
    /// images that are not exactly three 8-bit channels.
    #[error("Invalid input image: {0}")]
    InvalidInput(String),

    /// Image and mask dimensions do not match
    ///
    /// This error occurs when compositing a mask onto an image of a
    /// different size.
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// Segmentation seed rectangle does not overlap the image
    #[error("Seed rectangle at ({left}, {top}) size {width}x{height} lies outside a {image_width}x{image_height} image")]
    InvalidSeed {
        left: i32,
        top: i32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
}
