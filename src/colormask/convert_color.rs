//! 8-bit color-space conversions.
//!
//! All conversions work on `Image<Rgb<u8>>` buffers and keep the three
//! output channels in the same container, so a Lab image is an
//! `Image<Rgb<u8>>` whose channels are L, a, b and an HSV image one whose
//! channels are H, S, V.
//!
//! # Encoding
//!
//! The 8-bit encodings follow the widely used OpenCV conventions:
//!
//! - Lab: sRGB companding and the D65 white point, stored as
//!   `L * 255 / 100`, `a + 128` and `b + 128`.
//! - HSV: hue in degrees divided by two, so `[0, 180)`; saturation and value
//!   scaled to `[0, 255]`.
//!
//! Every value is rounded to nearest and clamped to the channel range.
//!
//! One deviation: OpenCV saturates a hue that rounds up to 180 (reds just
//! below 360 degrees), while here it wraps to 0 so every encoded hue stays
//! in `[0, 180)`. `Rgb([255, 0, 2])` encodes with hue 0, not 180.

use image::Rgb;
use imageproc::definitions::Image;
use imageproc::map::map_colors;
use palette::{FromColor, Hsv, Lab, Srgb};

/// Largest encoded hue value plus one.
pub const HUE_RANGE: u8 = 180;

#[inline]
fn to_unit(value: u8) -> f32 {
    f32::from(value) / 255.0
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Converts one RGB pixel to 8-bit Lab.
pub fn rgb_to_lab_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let Rgb([red, green, blue]) = pixel;
    let lab: Lab = Lab::from_color(Srgb::new(to_unit(red), to_unit(green), to_unit(blue)));

    Rgb([
        to_channel(lab.l * 255.0 / 100.0),
        to_channel(lab.a + 128.0),
        to_channel(lab.b + 128.0),
    ])
}

/// Converts one 8-bit Lab pixel back to RGB, clamping out-of-gamut colors.
pub fn lab_to_rgb_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let Rgb([l, a, b]) = pixel;
    let lab: Lab = Lab::new(
        f32::from(l) * 100.0 / 255.0,
        f32::from(a) - 128.0,
        f32::from(b) - 128.0,
    );
    let srgb: Srgb = Srgb::from_color(lab);

    Rgb([
        to_channel(srgb.red * 255.0),
        to_channel(srgb.green * 255.0),
        to_channel(srgb.blue * 255.0),
    ])
}

/// Converts one RGB pixel to 8-bit HSV.
///
/// Gray pixels get hue 0 and saturation 0.
pub fn rgb_to_hsv_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let Rgb([red, green, blue]) = pixel;
    let hsv: Hsv = Hsv::from_color(Srgb::new(to_unit(red), to_unit(green), to_unit(blue)));

    let hue = to_channel(hsv.hue.into_positive_degrees() / 2.0);
    // 359 degrees rounds up onto the start of the circle
    let hue = if hue >= HUE_RANGE { hue - HUE_RANGE } else { hue };

    Rgb([
        hue,
        to_channel(hsv.saturation * 255.0),
        to_channel(hsv.value * 255.0),
    ])
}

/// Converts one 8-bit HSV pixel back to RGB.
pub fn hsv_to_rgb_pixel(pixel: Rgb<u8>) -> Rgb<u8> {
    let Rgb([hue, saturation, value]) = pixel;
    let hsv: Hsv = Hsv::new(f32::from(hue) * 2.0, to_unit(saturation), to_unit(value));
    let srgb: Srgb = Srgb::from_color(hsv);

    Rgb([
        to_channel(srgb.red * 255.0),
        to_channel(srgb.green * 255.0),
        to_channel(srgb.blue * 255.0),
    ])
}

/// Converts a whole RGB image to 8-bit Lab.
pub fn rgb_to_lab(image: &Image<Rgb<u8>>) -> Image<Rgb<u8>> {
    map_colors(image, rgb_to_lab_pixel)
}

/// Converts a whole 8-bit Lab image to RGB.
pub fn lab_to_rgb(image: &Image<Rgb<u8>>) -> Image<Rgb<u8>> {
    map_colors(image, lab_to_rgb_pixel)
}

/// Converts a whole RGB image to 8-bit HSV.
pub fn rgb_to_hsv(image: &Image<Rgb<u8>>) -> Image<Rgb<u8>> {
    map_colors(image, rgb_to_hsv_pixel)
}

/// Converts a whole 8-bit HSV image to RGB.
pub fn hsv_to_rgb(image: &Image<Rgb<u8>>) -> Image<Rgb<u8>> {
    map_colors(image, hsv_to_rgb_pixel)
}

/// Trait providing color-space conversions on 8-bit RGB images
///
/// The input is never modified; each method returns a new image of the
/// same dimensions.
///
/// # Examples
///
/// ```no_run
/// use colormask::{ConvertColorExt, Image};
/// use image::Rgb;
///
/// let image: Image<Rgb<u8>> = Image::from_pixel(4, 4, Rgb([255, 0, 0]));
/// let hsv = image.to_hsv();
/// assert_eq!(hsv.get_pixel(0, 0), &Rgb([0, 255, 255]));
/// ```
pub trait ConvertColorExt {
    /// Converts RGB to 8-bit Lab
    fn to_lab(&self) -> Self;

    /// Converts RGB to 8-bit HSV
    fn to_hsv(&self) -> Self;

    /// Interprets the image as 8-bit Lab and converts it to RGB
    fn lab_to_rgb(&self) -> Self;

    /// Interprets the image as 8-bit HSV and converts it to RGB
    fn hsv_to_rgb(&self) -> Self;
}

impl ConvertColorExt for Image<Rgb<u8>> {
    fn to_lab(&self) -> Self {
        rgb_to_lab(self)
    }

    fn to_hsv(&self) -> Self {
        rgb_to_hsv(self)
    }

    fn lab_to_rgb(&self) -> Self {
        lab_to_rgb(self)
    }

    fn hsv_to_rgb(&self) -> Self {
        hsv_to_rgb(self)
    }
}
