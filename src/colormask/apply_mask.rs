use image::{Luma, Rgb, Rgba};
use imageproc::{definitions::Image, map::map_colors2};

use crate::error::Result;
use crate::utils::validate_matching_dimensions;

/// Trait for compositing a binary mask with the image it was computed from
///
/// Detectors return single-channel masks; this trait turns a mask back into
/// something viewable, either as transparency or by blanking out the
/// unselected pixels.
pub trait ApplyMaskExt {
    /// Attaches the mask as an alpha channel
    ///
    /// # Arguments
    ///
    /// * `mask` - The mask to attach (grayscale image)
    ///
    /// # Returns
    ///
    /// RGBA image whose alpha is the mask value
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use colormask::{ApplyMaskExt, Image};
    /// use image::{Luma, Rgb};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// // RGB image and mask must have the same dimensions
    /// let rgb_image: Image<Rgb<u8>> = Image::new(10, 10);
    /// let mask: Image<Luma<u8>> = Image::new(10, 10);
    ///
    /// let rgba_image = rgb_image.apply_alpha_mask(&mask)?;
    /// # Ok(())
    /// # }
    /// ```
    fn apply_alpha_mask(&self, mask: &Image<Luma<u8>>) -> Result<Image<Rgba<u8>>>;

    /// Keeps the pixels selected by the mask and paints the rest
    ///
    /// A pixel is kept when its mask value is nonzero; every other pixel is
    /// replaced by `background`.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    fn keep_masked(&self, mask: &Image<Luma<u8>>, background: Rgb<u8>)
        -> Result<Image<Rgb<u8>>>;

    /// Paints the pixels selected by the mask with `color`
    ///
    /// The inverse of [`keep_masked`](Self::keep_masked): pixels with a
    /// nonzero mask value become `color`, all others are kept.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    fn fill_masked(&self, mask: &Image<Luma<u8>>, color: Rgb<u8>) -> Result<Image<Rgb<u8>>>;
}

impl ApplyMaskExt for Image<Rgb<u8>> {
    fn apply_alpha_mask(&self, mask: &Image<Luma<u8>>) -> Result<Image<Rgba<u8>>> {
        validate_matching_dimensions(self, mask)?;

        Ok(map_colors2(self, mask, |Rgb([red, green, blue]), Luma([alpha])| {
            Rgba([red, green, blue, alpha])
        }))
    }

    fn keep_masked(
        &self,
        mask: &Image<Luma<u8>>,
        background: Rgb<u8>,
    ) -> Result<Image<Rgb<u8>>> {
        validate_matching_dimensions(self, mask)?;

        Ok(map_colors2(self, mask, |pixel, Luma([value])| {
            if value != 0 {
                pixel
            } else {
                background
            }
        }))
    }

    fn fill_masked(&self, mask: &Image<Luma<u8>>, color: Rgb<u8>) -> Result<Image<Rgb<u8>>> {
        validate_matching_dimensions(self, mask)?;

        Ok(map_colors2(self, mask, |pixel, Luma([value])| {
            if value != 0 {
                color
            } else {
                pixel
            }
        }))
    }
}
