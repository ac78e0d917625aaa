//! Hue/saturation band masking.
//!
//! Pixels are selected by their 8-bit HSV hue and saturation. The hue axis
//! is circular, so a band whose lower bound is not below its upper bound is
//! read as the arc that wraps through zero.

use image::{DynamicImage, Luma, Rgb};
use imageproc::definitions::Image;
use imageproc::map::map_colors;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::colormask::color_distance::{MASK_OFF, MASK_ON};
use crate::colormask::convert_color::rgb_to_hsv;
use crate::error::Result;
use crate::utils::{as_rgb8, validate_non_empty_image};

/// Hue and saturation bounds of a band mask
///
/// Bounds use the 8-bit HSV encoding: hue in `[0, 180)`, saturation in
/// `[0, 255]`. All bounds are inclusive.
///
/// - `min_hue < max_hue`: hue must lie in `min_hue..=max_hue`.
/// - `min_hue >= max_hue`: hue must be `<= max_hue` or `>= min_hue`.
///
/// Saturation is not circular. A band with `min_saturation > max_saturation`
/// selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HueSaturationBand {
    /// Lower hue bound, `[0, 180)`
    pub min_hue: u8,
    /// Upper hue bound, `[0, 180)`
    pub max_hue: u8,
    pub min_saturation: u8,
    pub max_saturation: u8,
}

impl HueSaturationBand {
    /// Creates a band from inclusive hue and saturation bounds.
    pub const fn new(min_hue: u8, max_hue: u8, min_saturation: u8, max_saturation: u8) -> Self {
        Self {
            min_hue,
            max_hue,
            min_saturation,
            max_saturation,
        }
    }

    /// Whether the hue band crosses the end of the hue circle.
    #[inline]
    pub const fn wraps(&self) -> bool {
        self.min_hue >= self.max_hue
    }

    /// Whether `hue` lies on the band's arc of the hue circle.
    #[inline]
    pub fn hue_passes(&self, hue: u8) -> bool {
        if self.wraps() {
            hue <= self.max_hue || hue >= self.min_hue
        } else {
            self.min_hue <= hue && hue <= self.max_hue
        }
    }

    /// Whether `saturation` lies between the saturation bounds.
    #[inline]
    pub fn saturation_passes(&self, saturation: u8) -> bool {
        self.min_saturation <= saturation && saturation <= self.max_saturation
    }

    /// Whether an HSV pixel with this hue and saturation is selected.
    #[inline]
    pub fn contains(&self, hue: u8, saturation: u8) -> bool {
        self.hue_passes(hue) && self.saturation_passes(saturation)
    }
}

/// Returns the mask of pixels whose hue and saturation fall in `band`.
///
/// # Errors
///
/// * `Error::InvalidInput` - When the image has a zero width or height
pub fn detect_hue_saturation(
    image: &Image<Rgb<u8>>,
    band: &HueSaturationBand,
) -> Result<Image<Luma<u8>>> {
    let (width, height) = image.dimensions();
    validate_non_empty_image(width, height, "detect_hue_saturation")?;

    let hsv = rgb_to_hsv(image);
    let mask = map_colors(&hsv, |Rgb([hue, saturation, _])| {
        Luma([if band.contains(hue, saturation) {
            MASK_ON
        } else {
            MASK_OFF
        }])
    });

    tracing::debug!(
        width,
        height,
        min_hue = band.min_hue,
        max_hue = band.max_hue,
        wraps = band.wraps(),
        min_saturation = band.min_saturation,
        max_saturation = band.max_saturation,
        selected = mask.iter().filter(|&&value| value == MASK_ON).count(),
        "classified pixels by hue/saturation band"
    );

    Ok(mask)
}

/// Band detection on a decoded image of unknown layout.
///
/// # Errors
///
/// * `Error::InvalidInput` - When the image is empty or is not exactly three
///   8-bit channels
pub fn detect_hue_saturation_dynamic(
    image: &DynamicImage,
    band: &HueSaturationBand,
) -> Result<Image<Luma<u8>>> {
    detect_hue_saturation(as_rgb8(image, "detect_hue_saturation_dynamic")?, band)
}

/// Trait providing hue/saturation band masks on 8-bit RGB images
///
/// # Examples
///
/// ```no_run
/// use colormask::{HueSaturationBand, HueSaturationBandExt, Image};
/// use image::Rgb;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let image: Image<Rgb<u8>> = Image::from_pixel(4, 4, Rgb([220, 180, 150]));
///
/// // skin tones: reddish hues wrapping through zero, moderate saturation
/// let band = HueSaturationBand::new(160, 10, 25, 166);
/// let mask = image.detect_hue_saturation_band(&band)?;
/// # Ok(())
/// # }
/// ```
pub trait HueSaturationBandExt {
    /// # Errors
    ///
    /// * `Error::InvalidInput` - When the image has a zero width or height
    fn detect_hue_saturation_band(&self, band: &HueSaturationBand) -> Result<Image<Luma<u8>>>;
}

impl HueSaturationBandExt for Image<Rgb<u8>> {
    fn detect_hue_saturation_band(&self, band: &HueSaturationBand) -> Result<Image<Luma<u8>>> {
        detect_hue_saturation(self, band)
    }
}
