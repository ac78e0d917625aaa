//! Extracts the foreground inside a rectangle seed and writes it on a white
//! background, along with the input annotated with the seed.

use std::path::PathBuf;

use clap::Parser;
use colormask::{probable_foreground_mask, ApplyMaskExt, Rect, RectSegmenter, Segmenter};
use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Input image
    #[arg(short, long)]
    image_path: PathBuf,

    /// Seed rectangle as X,Y,WIDTH,HEIGHT
    #[arg(long, value_delimiter = ',', num_args = 4, default_values_t = [50u32, 25, 210, 175])]
    seed: Vec<u32>,

    /// Refinement iterations handed to the segmenter
    #[arg(long, default_value_t = 5)]
    iterations: u32,

    /// Directory receiving the result images
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let [x, y, width, height] = [args.seed[0], args.seed[1], args.seed[2], args.seed[3]];
    if width == 0 || height == 0 {
        return Err("seed rectangle must have a non-zero size".into());
    }
    let seed = Rect::at(x as i32, y as i32).of_size(width, height);

    let image = image::open(&args.image_path)?.to_rgb8();
    let labels = RectSegmenter.segment(&image, seed, args.iterations)?;
    let mask = probable_foreground_mask(&labels);

    let foreground = image.keep_masked(&mask, Rgb([255, 255, 255]))?;
    foreground.save(args.output_dir.join("segmented.png"))?;

    let mut annotated = image.clone();
    draw_hollow_rect_mut(&mut annotated, seed, Rgb([255, 255, 255]));
    annotated.save(args.output_dir.join("seed.png"))?;

    println!("Results written to {}", args.output_dir.display());
    Ok(())
}
