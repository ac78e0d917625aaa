//! Connected region selection by color tolerance.
//!
//! `imageproc::drawing::flood_fill` repaints the region of pixels exactly
//! equal to the seed color. Here the region is the 4-connected set of pixels
//! whose channels each stay within a fixed range around the seed color, and
//! the result is returned as a mask so it can be composited like any other
//! detector output.

use image::{Luma, Rgb};
use imageproc::definitions::Image;

use crate::colormask::color_distance::{MASK_OFF, MASK_ON};
use crate::error::{Error, Result};
use crate::utils::validate_non_empty_image;

/// Per-channel inclusive bounds derived from the seed color.
#[derive(Debug, Clone, Copy)]
struct FixedRange {
    low: [u8; 3],
    high: [u8; 3],
}

impl FixedRange {
    fn around(seed: Rgb<u8>, lower: [u8; 3], upper: [u8; 3]) -> Self {
        let Rgb(seed) = seed;
        Self {
            low: [0, 1, 2].map(|c| seed[c].saturating_sub(lower[c])),
            high: [0, 1, 2].map(|c| seed[c].saturating_add(upper[c])),
        }
    }

    #[inline]
    fn contains(&self, pixel: &Rgb<u8>) -> bool {
        pixel
            .0
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(value, (low, high))| low <= value && value <= high)
    }
}

#[inline]
fn accepts(
    image: &Image<Rgb<u8>>,
    mask: &Image<Luma<u8>>,
    range: &FixedRange,
    x: u32,
    y: u32,
) -> bool {
    mask.get_pixel(x, y)[0] == MASK_OFF && range.contains(image.get_pixel(x, y))
}

/// Pushes the start of every accepted run of row `y` within `left..=right`.
fn push_runs(
    image: &Image<Rgb<u8>>,
    mask: &Image<Luma<u8>>,
    range: &FixedRange,
    (left, right, y): (u32, u32, u32),
    stack: &mut Vec<(u32, u32)>,
) {
    let mut in_run = false;
    for x in left..=right {
        let accepted = accepts(image, mask, range, x, y);
        if accepted && !in_run {
            stack.push((x, y));
        }
        in_run = accepted;
    }
}

/// Selects the 4-connected region around `seed` whose colors lie within a
/// fixed range of the seed color.
///
/// A pixel belongs to the range when, for every channel `c`,
/// `seed[c] - lower[c] <= pixel[c] <= seed[c] + upper[c]` (saturating at the
/// channel limits). Every pixel is compared with the seed color, never with
/// its neighbours.
///
/// Returns a mask with [`MASK_ON`] over the region and [`MASK_OFF`]
/// elsewhere. The seed pixel is always selected.
///
/// # Errors
///
/// * `Error::InvalidInput` - When the image is empty or `seed` lies outside it
///
/// # Examples
///
/// ```no_run
/// use colormask::{flood_fill_fixed_range, Image};
/// use image::Rgb;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let image: Image<Rgb<u8>> = Image::from_pixel(8, 8, Rgb([130, 190, 230]));
/// let region = flood_fill_fixed_range(&image, (4, 4), [35; 3], [35; 3])?;
/// assert_eq!(region.get_pixel(0, 0)[0], 255);
/// # Ok(())
/// # }
/// ```
pub fn flood_fill_fixed_range(
    image: &Image<Rgb<u8>>,
    seed: (u32, u32),
    lower: [u8; 3],
    upper: [u8; 3],
) -> Result<Image<Luma<u8>>> {
    let (width, height) = image.dimensions();
    validate_non_empty_image(width, height, "flood_fill_fixed_range")?;

    let (seed_x, seed_y) = seed;
    if seed_x >= width || seed_y >= height {
        return Err(Error::InvalidInput(format!(
            "flood_fill_fixed_range: seed ({seed_x}, {seed_y}) lies outside a {width}x{height} image"
        )));
    }

    let range = FixedRange::around(*image.get_pixel(seed_x, seed_y), lower, upper);
    let mut mask: Image<Luma<u8>> = Image::new(width, height);
    let mut stack = vec![(seed_x, seed_y)];

    // Scanline fill: each popped point grows into the widest accepted span of
    // its row, then seeds the accepted runs directly above and below.
    while let Some((x, y)) = stack.pop() {
        if mask.get_pixel(x, y)[0] == MASK_ON {
            continue;
        }

        let mut left = x;
        while left > 0 && accepts(image, &mask, &range, left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < width && accepts(image, &mask, &range, right + 1, y) {
            right += 1;
        }

        for fill_x in left..=right {
            mask.put_pixel(fill_x, y, Luma([MASK_ON]));
        }

        if y > 0 {
            push_runs(image, &mask, &range, (left, right, y - 1), &mut stack);
        }
        if y + 1 < height {
            push_runs(image, &mask, &range, (left, right, y + 1), &mut stack);
        }
    }

    tracing::debug!(
        width,
        height,
        seed_x,
        seed_y,
        selected = mask.iter().filter(|&&value| value == MASK_ON).count(),
        "flood filled fixed-range region"
    );

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{capture_debug_logs, create_large_test_image};

    fn selected(mask: &Image<Luma<u8>>) -> usize {
        mask.iter().filter(|&&value| value == MASK_ON).count()
    }

    #[test]
    fn test_uniform_image_is_filled_completely() {
        let image: Image<Rgb<u8>> = Image::from_pixel(7, 5, Rgb([10, 20, 30]));
        let mask = flood_fill_fixed_range(&image, (3, 2), [0; 3], [0; 3]).unwrap();
        assert_eq!(selected(&mask), 35);
    }

    #[test]
    fn test_tolerance_bounds_are_inclusive() {
        for (red, expected) in [(135, MASK_ON), (136, MASK_OFF), (65, MASK_ON), (64, MASK_OFF)] {
            let image: Image<Rgb<u8>> =
                Image::from_fn(2, 1, |x, _| Rgb([if x == 0 { 100 } else { red }, 50, 50]));
            let mask = flood_fill_fixed_range(&image, (0, 0), [35; 3], [35; 3]).unwrap();
            assert_eq!(mask.get_pixel(1, 0)[0], expected, "red {red}");
        }
    }

    #[test]
    fn test_lower_and_upper_are_separate() {
        let image: Image<Rgb<u8>> =
            Image::from_fn(3, 1, |x, _| Rgb([[100, 110, 90][x as usize], 0, 0]));
        let mask = flood_fill_fixed_range(&image, (0, 0), [0, 0, 0], [10, 0, 0]).unwrap();
        assert_eq!(mask.as_raw(), &vec![255, 255, 0]);
    }

    #[test]
    fn test_range_is_fixed_to_seed_color() {
        // a gradient of steps of 10: a floating range would walk all the way
        let image: Image<Rgb<u8>> = Image::from_fn(6, 1, |x, _| Rgb([(x * 10) as u8, 0, 0]));
        let mask = flood_fill_fixed_range(&image, (0, 0), [15; 3], [15; 3]).unwrap();
        assert_eq!(mask.as_raw(), &vec![255, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_diagonal_pixels_are_not_connected() {
        // checkerboard: same colors only touch at corners
        let image = create_large_test_image(5, 5);
        let mask = flood_fill_fixed_range(&image, (2, 2), [0; 3], [0; 3]).unwrap();
        assert_eq!(selected(&mask), 1);
        assert_eq!(mask.get_pixel(2, 2)[0], MASK_ON);
    }

    #[test]
    fn test_region_stops_at_barrier() {
        // vertical wall at x = 3 with a gap at y = 4
        let wall = Rgb([0, 0, 0]);
        let floor = Rgb([200, 200, 200]);
        let image: Image<Rgb<u8>> =
            Image::from_fn(7, 5, |x, y| if x == 3 && y != 4 { wall } else { floor });

        let mask = flood_fill_fixed_range(&image, (0, 0), [20; 3], [20; 3]).unwrap();
        assert_eq!(mask.get_pixel(6, 0)[0], MASK_ON);
        assert_eq!(mask.get_pixel(3, 0)[0], MASK_OFF);
        assert_eq!(selected(&mask), 7 * 5 - 4);

        let closed: Image<Rgb<u8>> =
            Image::from_fn(7, 5, |x, _| if x == 3 { wall } else { floor });
        let mask = flood_fill_fixed_range(&closed, (0, 0), [20; 3], [20; 3]).unwrap();
        assert_eq!(selected(&mask), 3 * 5);
        assert_eq!(mask.get_pixel(6, 0)[0], MASK_OFF);
    }

    #[test]
    fn test_concave_region_is_filled() {
        // U shape around a black tongue hanging from the top edge
        let image: Image<Rgb<u8>> = Image::from_fn(5, 4, |x, y| {
            if x == 2 && y < 3 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let mask = flood_fill_fixed_range(&image, (0, 0), [0; 3], [0; 3]).unwrap();
        assert_eq!(selected(&mask), 5 * 4 - 3);
        assert_eq!(mask.get_pixel(4, 0)[0], MASK_ON);
        assert_eq!(mask.get_pixel(2, 0)[0], MASK_OFF);
    }

    #[test]
    fn test_debug_event_reports_selected_count() {
        let image: Image<Rgb<u8>> = Image::from_pixel(3, 3, Rgb([1, 2, 3]));
        let logs = capture_debug_logs(|| {
            flood_fill_fixed_range(&image, (1, 1), [0; 3], [0; 3]).unwrap();
        });
        assert!(logs.contains("selected=9"), "{logs}");
    }

    #[test]
    fn test_seed_outside_image_is_invalid_input() {
        let image: Image<Rgb<u8>> = Image::new(4, 3);
        for seed in [(4, 0), (0, 3), (100, 50)] {
            assert!(matches!(
                flood_fill_fixed_range(&image, seed, [35; 3], [35; 3]),
                Err(Error::InvalidInput(_))
            ));
        }

        let empty: Image<Rgb<u8>> = Image::new(0, 0);
        assert!(matches!(
            flood_fill_fixed_range(&empty, (0, 0), [35; 3], [35; 3]),
            Err(Error::InvalidInput(_))
        ));
    }
}
