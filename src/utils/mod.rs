//! Internal utility functions for colormask.
//!
//! Input validation shared by the detectors and the compositing helpers.

use image::{DynamicImage, GenericImageView, RgbImage};

use crate::error::{Error, Result};

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
/// * `context` - A description of the context for error messages
pub fn validate_non_empty_image(width: u32, height: u32, context: &str) -> Result<()> {
    if width == 0 || height == 0 {
        Err(Error::InvalidInput(format!(
            "{}: image dimensions must be non-zero, got {}x{}",
            context, width, height
        )))
    } else {
        Ok(())
    }
}

/// Validates that two images have matching dimensions.
pub fn validate_matching_dimensions<I1, I2>(image: &I1, mask: &I2) -> Result<()>
where
    I1: GenericImageView,
    I2: GenericImageView,
{
    let expected = image.dimensions();
    let actual = mask.dimensions();

    if expected != actual {
        Err(Error::DimensionMismatch { expected, actual })
    } else {
        Ok(())
    }
}

/// Borrows the 8-bit RGB buffer of a decoded image.
///
/// Anything other than three channels of 8-bit depth is rejected, as is an
/// empty image.
pub fn as_rgb8<'a>(image: &'a DynamicImage, context: &str) -> Result<&'a RgbImage> {
    let rgb = image.as_rgb8().ok_or_else(|| {
        Error::InvalidInput(format!(
            "{}: expected 3 channels of 8-bit depth, got {:?}",
            context,
            image.color()
        ))
    })?;
    validate_non_empty_image(rgb.width(), rgb.height(), context)?;
    Ok(rgb)
}
