//! Detects pixels close to a target color, once on raw RGB distances and
//! once on Lab distances, and writes both masks next to the masked images.
//! Finally flood fills the region connected to a seed point and repaints it
//! in white.

use std::path::PathBuf;

use clap::Parser;
use colormask::{
    flood_fill_fixed_range, rgb_to_lab_pixel, ApplyMaskExt, ColorDistanceDetector, DistanceSpace,
};
use image::Rgb;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Input image
    #[arg(short, long)]
    image_path: PathBuf,

    /// Target color as R,G,B (default: blue sky)
    #[arg(long, value_delimiter = ',', num_args = 3, default_values_t = [130u8, 190, 230])]
    target: Vec<u8>,

    /// City-block distance threshold for RGB distances
    #[arg(long, default_value_t = 100)]
    threshold: i32,

    /// City-block distance threshold for Lab distances
    #[arg(long, default_value_t = 45)]
    lab_threshold: i32,

    /// Flood fill seed point as X,Y
    #[arg(long, value_delimiter = ',', num_args = 2, default_values_t = [100u32, 50])]
    seed: Vec<u32>,

    /// Per-channel flood fill tolerance around the seed color
    #[arg(long, default_value_t = 35)]
    tolerance: u8,

    /// Directory receiving the result images
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let target = Rgb([args.target[0], args.target[1], args.target[2]]);

    let image = image::open(&args.image_path)?.to_rgb8();
    println!(
        "Processing {}: {}x{}",
        args.image_path.display(),
        image.width(),
        image.height()
    );

    let mut detector = ColorDistanceDetector::new();
    detector.set_target_color(target);
    detector.set_distance_threshold(args.threshold);

    let mask = detector.process(&image)?;
    mask.save(args.output_dir.join("result.png"))?;
    image
        .keep_masked(mask, Rgb([0, 0, 0]))?
        .save(args.output_dir.join("result_masked.png"))?;

    // Lab distances compare against the Lab encoding of the target
    let mut lab_detector = ColorDistanceDetector::with_target(
        rgb_to_lab_pixel(target),
        args.lab_threshold,
        DistanceSpace::Lab,
    );
    let lab_mask = lab_detector.process(&image)?;
    lab_mask.save(args.output_dir.join("result_lab.png"))?;
    image
        .keep_masked(lab_mask, Rgb([0, 0, 0]))?
        .save(args.output_dir.join("result_lab_masked.png"))?;

    let region = flood_fill_fixed_range(
        &image,
        (args.seed[0], args.seed[1]),
        [args.tolerance; 3],
        [args.tolerance; 3],
    )?;
    region.save(args.output_dir.join("result_flood.png"))?;
    image
        .fill_masked(&region, Rgb([255, 255, 255]))?
        .save(args.output_dir.join("result_flood_filled.png"))?;

    println!("Results written to {}", args.output_dir.display());
    Ok(())
}
