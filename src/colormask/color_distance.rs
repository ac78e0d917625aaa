//! Nearest-color thresholding.
//!
//! A pixel is selected when its city-block distance to a target color is
//! strictly below a threshold. The distance can be measured on the raw RGB
//! channels or after converting the image to 8-bit Lab.

use image::{DynamicImage, Luma, Rgb};
use imageproc::definitions::Image;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::colormask::convert_color::rgb_to_lab;
use crate::error::Result;
use crate::utils::{as_rgb8, validate_non_empty_image};

/// Threshold used when none is given.
pub const DEFAULT_DISTANCE_THRESHOLD: u32 = 100;

/// Mask value of a selected pixel.
pub const MASK_ON: u8 = 255;

/// Mask value of a rejected pixel.
pub const MASK_OFF: u8 = 0;

/// Color space in which distances are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DistanceSpace {
    /// Raw 8-bit RGB channels
    #[default]
    Rgb,
    /// 8-bit Lab, see [`crate::rgb_to_lab`]
    ///
    /// Only the image is converted. The target color is compared as given,
    /// so it should already be expressed in 8-bit Lab.
    Lab,
}

/// Computes the city-block distance between two colors.
///
/// This is the sum of the absolute per-channel differences, in `[0, 765]`.
#[inline]
pub fn color_distance(first: Rgb<u8>, second: Rgb<u8>) -> u32 {
    let Rgb([r1, g1, b1]) = first;
    let Rgb([r2, g2, b2]) = second;
    u32::from(r1.abs_diff(r2)) + u32::from(g1.abs_diff(g2)) + u32::from(b1.abs_diff(b2))
}

/// Parameters of a color-distance classification
///
/// This is the stateless form of [`ColorDistanceDetector`]: it can be copied
/// freely and [`detect`](Self::detect) returns a fresh mask on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorDistanceConfig {
    target: [u8; 3],
    threshold: u32,
    space: DistanceSpace,
}

impl Default for ColorDistanceConfig {
    fn default() -> Self {
        Self {
            target: [0, 0, 0],
            threshold: DEFAULT_DISTANCE_THRESHOLD,
            space: DistanceSpace::Rgb,
        }
    }
}

impl ColorDistanceConfig {
    /// Creates a configuration from a target color, threshold and space.
    ///
    /// A negative threshold is clamped to zero.
    pub fn new(target: Rgb<u8>, threshold: i32, space: DistanceSpace) -> Self {
        Self::default()
            .with_target_color(target)
            .with_distance_threshold(threshold)
            .with_space(space)
    }

    /// Sets the color pixels are compared with.
    #[must_use]
    pub fn with_target_color(mut self, target: Rgb<u8>) -> Self {
        self.target = target.0;
        self
    }

    /// Sets the threshold, clamping negative values to zero.
    #[must_use]
    pub fn with_distance_threshold(mut self, threshold: i32) -> Self {
        self.threshold = clamp_threshold(threshold);
        self
    }

    /// Sets the color space distances are measured in.
    #[must_use]
    pub fn with_space(mut self, space: DistanceSpace) -> Self {
        self.space = space;
        self
    }

    /// Color pixels are compared with.
    pub fn target_color(&self) -> Rgb<u8> {
        Rgb(self.target)
    }

    /// Exclusive upper bound on the distance of a selected pixel.
    pub fn distance_threshold(&self) -> u32 {
        self.threshold
    }

    /// Color space distances are measured in.
    pub fn space(&self) -> DistanceSpace {
        self.space
    }

    /// City-block distance from `color` to the target color.
    #[inline]
    pub fn distance_to(&self, color: Rgb<u8>) -> u32 {
        color_distance(color, self.target_color())
    }

    /// Classifies every pixel of `image` into a new binary mask.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - When the image has a zero width or height
    pub fn detect(&self, image: &Image<Rgb<u8>>) -> Result<Image<Luma<u8>>> {
        let (width, height) = image.dimensions();
        validate_non_empty_image(width, height, "ColorDistanceConfig::detect")?;

        let mut mask = Image::new(width, height);
        classify_into(self, image, &mut mask);
        Ok(mask)
    }
}

#[inline]
fn clamp_threshold(threshold: i32) -> u32 {
    threshold.max(0).unsigned_abs()
}

/// Writes the classification of `image` into `mask`, which must have the
/// same dimensions.
fn classify_into(
    config: &ColorDistanceConfig,
    image: &Image<Rgb<u8>>,
    mask: &mut Image<Luma<u8>>,
) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());

    let converted;
    let source = match config.space {
        DistanceSpace::Rgb => image,
        DistanceSpace::Lab => {
            converted = rgb_to_lab(image);
            &converted
        }
    };

    let target = config.target_color();
    let threshold = config.threshold;

    #[cfg(feature = "rayon")]
    {
        let width = source.width() as usize;
        mask.par_chunks_mut(width)
            .zip(source.par_chunks(width * 3))
            .for_each(|(mask_row, image_row)| {
                classify_row(image_row, mask_row, target, threshold);
            });
    }

    #[cfg(not(feature = "rayon"))]
    classify_row(source, mask, target, threshold);

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        space = ?config.space,
        threshold,
        selected = mask.iter().filter(|&&value| value == MASK_ON).count(),
        "classified pixels by color distance"
    );
}

#[inline]
fn classify_row(pixels: &[u8], mask: &mut [u8], target: Rgb<u8>, threshold: u32) {
    for (value, pixel) in mask.iter_mut().zip(pixels.chunks_exact(3)) {
        let distance = color_distance(Rgb([pixel[0], pixel[1], pixel[2]]), target);
        *value = if distance < threshold { MASK_ON } else { MASK_OFF };
    }
}

/// Reusable color-distance detector
///
/// Holds a [`ColorDistanceConfig`] and the mask buffer of the last call, so
/// repeated processing of same-sized images does not reallocate. The buffer
/// follows the geometry of each new input.
///
/// # Examples
///
/// ```no_run
/// use colormask::{ColorDistanceDetector, Image};
/// use image::Rgb;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let image: Image<Rgb<u8>> = Image::from_pixel(8, 8, Rgb([130, 190, 230]));
///
/// let mut detector = ColorDistanceDetector::new();
/// detector.set_target_color(Rgb([130, 190, 230]));
/// let mask = detector.process(&image)?;
/// assert_eq!(mask.get_pixel(0, 0)[0], 255);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ColorDistanceDetector {
    config: ColorDistanceConfig,
    result: Image<Luma<u8>>,
}

impl Default for ColorDistanceDetector {
    fn default() -> Self {
        Self::from_config(ColorDistanceConfig::default())
    }
}

impl ColorDistanceDetector {
    /// Black target, threshold 100, RGB distances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default target and threshold in the given space.
    pub fn with_space(space: DistanceSpace) -> Self {
        Self::from_config(ColorDistanceConfig::default().with_space(space))
    }

    /// Fully specified detector. A negative threshold is clamped to zero.
    pub fn with_target(target: Rgb<u8>, threshold: i32, space: DistanceSpace) -> Self {
        Self::from_config(ColorDistanceConfig::new(target, threshold, space))
    }

    /// Detector with the given parameters and an empty mask buffer.
    pub fn from_config(config: ColorDistanceConfig) -> Self {
        Self {
            config,
            result: Image::new(0, 0),
        }
    }

    /// Current parameters.
    pub fn config(&self) -> &ColorDistanceConfig {
        &self.config
    }

    /// Changes the color pixels are compared with.
    pub fn set_target_color(&mut self, target: Rgb<u8>) {
        self.config = self.config.with_target_color(target);
    }

    /// Color pixels are compared with.
    pub fn target_color(&self) -> Rgb<u8> {
        self.config.target_color()
    }

    /// Sets the admission threshold.
    ///
    /// The threshold must be positive; a negative value is silently set to
    /// zero, which selects nothing.
    pub fn set_distance_threshold(&mut self, threshold: i32) {
        self.config = self.config.with_distance_threshold(threshold);
    }

    /// Current threshold, after clamping.
    pub fn distance_threshold(&self) -> u32 {
        self.config.distance_threshold()
    }

    /// Changes the color space distances are measured in.
    pub fn set_space(&mut self, space: DistanceSpace) {
        self.config = self.config.with_space(space);
    }

    /// Color space distances are measured in.
    pub fn space(&self) -> DistanceSpace {
        self.config.space()
    }

    /// City-block distance from `color` to the target color.
    #[inline]
    pub fn distance_to(&self, color: Rgb<u8>) -> u32 {
        self.config.distance_to(color)
    }

    /// Classifies `image` into the detector's mask buffer and returns it.
    ///
    /// Mask pixels are 255 where the distance to the target is strictly
    /// below the threshold and 0 elsewhere.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - When the image has a zero width or height
    pub fn process(&mut self, image: &Image<Rgb<u8>>) -> Result<&Image<Luma<u8>>> {
        let (width, height) = image.dimensions();
        validate_non_empty_image(width, height, "ColorDistanceDetector::process")?;

        if self.result.dimensions() != (width, height) {
            tracing::trace!(width, height, "reallocating color distance mask");
            self.result = Image::new(width, height);
        }

        classify_into(&self.config, image, &mut self.result);
        Ok(&self.result)
    }

    /// Classifies a decoded image of unknown layout.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - When the image is empty or is not exactly
    ///   three 8-bit channels
    pub fn process_dynamic(&mut self, image: &DynamicImage) -> Result<&Image<Luma<u8>>> {
        let rgb = as_rgb8(image, "ColorDistanceDetector::process_dynamic")?;
        self.process(rgb)
    }
}

/// Trait providing color-distance classification on 8-bit RGB images
pub trait DetectColorExt {
    /// Returns the mask of pixels closer than the configured threshold to
    /// the configured target color.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - When the image has a zero width or height
    fn detect_color(&self, config: &ColorDistanceConfig) -> Result<Image<Luma<u8>>>;
}

impl DetectColorExt for Image<Rgb<u8>> {
    fn detect_color(&self, config: &ColorDistanceConfig) -> Result<Image<Luma<u8>>> {
        config.detect(self)
    }
}

/// Classifies a decoded image of unknown layout.
///
/// # Errors
///
/// * `Error::InvalidInput` - When the image is empty or is not exactly three
///   8-bit channels
pub fn detect_color_dynamic(
    image: &DynamicImage,
    config: &ColorDistanceConfig,
) -> Result<Image<Luma<u8>>> {
    config.detect(as_rgb8(image, "detect_color_dynamic")?)
}
