//! Writes two synthetic images showing how RGB and Lab differ:
//!
//! - three color patches shifted by the same amount in RGB and in Lab;
//! - a gray ramp above a ramp of constant Lab chroma, comparing brightness
//!   with luminance.

use std::path::PathBuf;

use clap::Parser;
use colormask::{lab_to_rgb, rgb_to_lab, Image};
use image::Rgb;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Directory receiving the result images
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

/// Adds a per-channel offset to every pixel of the given column range.
fn shift_columns(image: &mut Image<Rgb<u8>>, columns: std::ops::Range<u32>, offset: [i8; 3]) {
    for y in 0..image.height() {
        for x in columns.clone() {
            let pixel = image.get_pixel_mut(x, y);
            for (channel, delta) in pixel.0.iter_mut().zip(offset) {
                *channel = channel.saturating_add_signed(delta);
            }
        }
    }
}

fn three_colors(base: Rgb<u8>) -> (Image<Rgb<u8>>, Image<Rgb<u8>>) {
    let mut rgb = Image::from_pixel(300, 100, base);
    shift_columns(&mut rgb, 0..100, [10, 10, 10]);
    shift_columns(&mut rgb, 200..300, [10, -10, -10]);

    // the same shifts applied to the L, a and b channels
    let mut lab = rgb_to_lab(&Image::from_pixel(300, 100, base));
    shift_columns(&mut lab, 0..100, [10, 10, 10]);
    shift_columns(&mut lab, 200..300, [10, -10, -10]);

    (rgb, lab_to_rgb(&lab))
}

fn luminance_vs_brightness() -> Image<Rgb<u8>> {
    let gray: Image<Rgb<u8>> = Image::from_fn(256, 100, |x, _| {
        let level = x as u8;
        Rgb([level, level, level])
    });

    // lower half: constant a and b, varying L
    let lab: Image<Rgb<u8>> = Image::from_fn(256, 50, |x, _| Rgb([x as u8, 128, 128]));
    let lab = lab_to_rgb(&lab);

    Image::from_fn(256, 100, |x, y| {
        if y < 50 {
            *gray.get_pixel(x, y)
        } else {
            *lab.get_pixel(x, y - 50)
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let (rgb, lab) = three_colors(Rgb([150, 200, 100]));
    rgb.save(args.output_dir.join("three_colors.png"))?;
    lab.save(args.output_dir.join("three_colors_lab.png"))?;

    luminance_vs_brightness().save(args.output_dir.join("luminance_vs_brightness.png"))?;

    println!("Results written to {}", args.output_dir.display());
    Ok(())
}
