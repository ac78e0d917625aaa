pub mod apply_mask;
pub mod color_distance;
pub mod convert_color;
pub mod flood_fill;
pub mod hue_saturation;
pub mod segmentation;
