//! Selects pixels by hue and saturation band and writes the mask together
//! with the selected part of the image. The default band picks skin tones.

use std::path::PathBuf;

use clap::Parser;
use colormask::{ApplyMaskExt, HueSaturationBand, HueSaturationBandExt};
use image::Rgb;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Input image
    #[arg(short, long)]
    image_path: PathBuf,

    /// Lower hue bound in [0, 180); a value above max-hue wraps through red
    #[arg(long, default_value_t = 160)]
    min_hue: u8,

    /// Upper hue bound in [0, 180)
    #[arg(long, default_value_t = 10)]
    max_hue: u8,

    /// Lower saturation bound in [0, 255]
    #[arg(long, default_value_t = 25)]
    min_saturation: u8,

    /// Upper saturation bound in [0, 255]
    #[arg(long, default_value_t = 166)]
    max_saturation: u8,

    /// Directory receiving the result images
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let band = HueSaturationBand::new(
        args.min_hue,
        args.max_hue,
        args.min_saturation,
        args.max_saturation,
    );

    let image = image::open(&args.image_path)?.to_rgb8();
    let mask = image.detect_hue_saturation_band(&band)?;
    let detected = image.keep_masked(&mask, Rgb([0, 0, 0]))?;

    let selected = mask.iter().filter(|&&value| value != 0).count();
    println!(
        "{} of {} pixels in band {:?}",
        selected,
        mask.len(),
        band
    );

    mask.save(args.output_dir.join("band_mask.png"))?;
    detected.save(args.output_dir.join("band_detected.png"))?;
    Ok(())
}
