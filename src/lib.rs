mod colormask;
mod error;
mod utils;

#[cfg(test)]
mod test_utils;

pub use colormask::apply_mask::ApplyMaskExt;
pub use colormask::color_distance::{
    color_distance, detect_color_dynamic, ColorDistanceConfig, ColorDistanceDetector,
    DetectColorExt, DistanceSpace, DEFAULT_DISTANCE_THRESHOLD, MASK_OFF, MASK_ON,
};
pub use colormask::convert_color::{
    hsv_to_rgb, hsv_to_rgb_pixel, lab_to_rgb, lab_to_rgb_pixel, rgb_to_hsv, rgb_to_hsv_pixel,
    rgb_to_lab, rgb_to_lab_pixel, ConvertColorExt, HUE_RANGE,
};
pub use colormask::flood_fill::flood_fill_fixed_range;
pub use colormask::hue_saturation::{
    detect_hue_saturation, detect_hue_saturation_dynamic, HueSaturationBand, HueSaturationBandExt,
};
pub use colormask::segmentation::{
    foreground_mask, init_labels_with_rect, probable_foreground_mask, LabelMap, RectSegmenter,
    SegmentLabel, Segmenter,
};
pub use error::{Error, Result};

pub use imageproc::definitions::Image;
pub use imageproc::rect::Rect;
