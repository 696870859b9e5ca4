use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mgc_core::consts::DEFAULT_LAYER_COUNT;
use mgc_core::io::image_io::{load_image, save_image};
use mgc_core::multiscale::{decompose, DecompositionParameters};

#[derive(Args)]
pub struct DecomposeArgs {
    /// Input image file (TIFF or PNG)
    pub file: PathBuf,

    /// Number of median layers to remove
    #[arg(long, default_value_t = DEFAULT_LAYER_COUNT)]
    pub layers: usize,

    /// Output file path
    #[arg(short, long, default_value = "lowpass.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &DecomposeArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    println!("Loaded {}x{} image", image.width(), image.height());

    let params = DecompositionParameters::new(args.layers);
    crate::summary::print_decompose_summary(&params);

    let low_pass = decompose(&image, &params)?;

    save_image(&low_pass, &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
