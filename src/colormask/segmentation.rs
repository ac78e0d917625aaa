//! Foreground/background segmentation seam.
//!
//! The graph-cut optimisation itself lives outside this crate. What is
//! defined here is the per-pixel label model it works with, the rectangle
//! initialisation it starts from, and the extraction of a binary mask from
//! its result.

use image::{Luma, Rgb};
use imageproc::definitions::Image;
use imageproc::map::map_colors;
use imageproc::rect::Rect;
use itertools::iproduct;

use crate::colormask::color_distance::{MASK_OFF, MASK_ON};
use crate::error::{Error, Result};
use crate::utils::validate_non_empty_image;

/// Per-pixel segmentation label
///
/// The discriminants are the values stored in a [`LabelMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SegmentLabel {
    /// Definitely background
    Background = 0,
    /// Definitely foreground
    Foreground = 1,
    /// Probably background
    ProbableBackground = 2,
    /// Probably foreground
    ProbableForeground = 3,
}

impl SegmentLabel {
    /// Label stored as `value` in a label map, if any.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            1 => Some(Self::Foreground),
            2 => Some(Self::ProbableBackground),
            3 => Some(Self::ProbableForeground),
            _ => None,
        }
    }

    /// Value stored in a label map for this label.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Definite or probable foreground.
    pub const fn is_foreground(self) -> bool {
        matches!(self, Self::Foreground | Self::ProbableForeground)
    }
}

/// Single-channel image of [`SegmentLabel`] values.
pub type LabelMap = Image<Luma<u8>>;

/// A foreground/background segmentation algorithm seeded by a rectangle
///
/// Everything outside `seed` is background; the algorithm decides which
/// pixels inside it belong to the foreground, refining its estimate
/// `iterations` times.
pub trait Segmenter {
    /// # Errors
    ///
    /// * `Error::InvalidInput` - When the image has a zero width or height
    /// * `Error::InvalidSeed` - When the seed does not overlap the image
    fn segment(&self, image: &Image<Rgb<u8>>, seed: Rect, iterations: u32) -> Result<LabelMap>;
}

/// Builds the initial label map for a rectangle seed.
///
/// Pixels inside `seed` are [`SegmentLabel::ProbableForeground`], all others
/// [`SegmentLabel::Background`]. The seed is clipped to the image.
///
/// # Errors
///
/// * `Error::InvalidInput` - When `width` or `height` is zero
/// * `Error::InvalidSeed` - When the seed does not overlap the image
pub fn init_labels_with_rect(width: u32, height: u32, seed: Rect) -> Result<LabelMap> {
    validate_non_empty_image(width, height, "init_labels_with_rect")?;

    let bounds = Rect::at(0, 0).of_size(width, height);
    let inside = seed.intersect(bounds).ok_or(Error::InvalidSeed {
        left: seed.left(),
        top: seed.top(),
        width: seed.width(),
        height: seed.height(),
        image_width: width,
        image_height: height,
    })?;

    let mut labels = Image::from_pixel(width, height, Luma([SegmentLabel::Background.as_u8()]));
    iproduct!(inside.top()..=inside.bottom(), inside.left()..=inside.right()).for_each(|(y, x)| {
        labels.put_pixel(
            x as u32,
            y as u32,
            Luma([SegmentLabel::ProbableForeground.as_u8()]),
        );
    });

    Ok(labels)
}

/// Segmenter that stops at the rectangle initialisation
///
/// This is the state a graph cut starts from before its first iteration,
/// useful as a baseline and wherever no optimiser is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectSegmenter;

impl Segmenter for RectSegmenter {
    fn segment(&self, image: &Image<Rgb<u8>>, seed: Rect, iterations: u32) -> Result<LabelMap> {
        let (width, height) = image.dimensions();
        tracing::debug!(
            width,
            height,
            seed = ?seed,
            iterations,
            "initialising segmentation from rectangle"
        );
        init_labels_with_rect(width, height, seed)
    }
}

/// Binary mask of the foreground pixels of a label map.
///
/// Definite foreground is always selected; probable foreground only when
/// `include_probable` is set. Values that are not labels count as
/// background.
pub fn foreground_mask(labels: &LabelMap, include_probable: bool) -> Image<Luma<u8>> {
    map_colors(labels, |Luma([value])| {
        let selected = match SegmentLabel::from_u8(value) {
            Some(SegmentLabel::Foreground) => true,
            Some(SegmentLabel::ProbableForeground) => include_probable,
            _ => false,
        };
        Luma([if selected { MASK_ON } else { MASK_OFF }])
    })
}

/// Binary mask of the pixels labelled exactly probable foreground.
pub fn probable_foreground_mask(labels: &LabelMap) -> Image<Luma<u8>> {
    map_colors(labels, |Luma([value])| {
        Luma([if value == SegmentLabel::ProbableForeground.as_u8() {
            MASK_ON
        } else {
            MASK_OFF
        }])
    })
}
