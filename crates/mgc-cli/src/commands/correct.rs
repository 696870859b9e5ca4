use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use mgc_core::cancel::CancelToken;
use mgc_core::io::image_io::{load_image, save_image};
use mgc_core::pipeline::{run_reported, MgcConfig, PipelineStage, ProgressReporter};
use tracing::debug;

#[derive(Args)]
pub struct CorrectArgs {
    /// Target image (TIFF or PNG)
    pub target: Option<PathBuf>,

    /// Registered wide-field reference image
    pub reference: Option<PathBuf>,

    /// Config file (TOML); command-line values override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of median layers removed from both images
    #[arg(long)]
    pub layers: Option<usize>,

    /// Correction strength (0.0 to 1.0)
    #[arg(short, long)]
    pub k: Option<f32>,

    /// Output file path (default: <target>_corrected.tiff)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
        self.pb.set_length(total_items.unwrap_or(1) as u64);
        self.pb.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        self.pb.set_position(self.pb.length().unwrap_or(1));
    }
}

pub fn run(args: &CorrectArgs) -> Result<()> {
    let config = resolve_config(args)?;

    crate::summary::print_correct_summary(&config);

    let target = load_image(&config.target)
        .with_context(|| format!("Failed to load target {}", config.target.display()))?;
    let reference = load_image(&config.reference)
        .with_context(|| format!("Failed to load reference {}", config.reference.display()))?;
    debug!(
        target_shape = %target.shape(),
        reference_shape = %reference.shape(),
        "Images loaded"
    );

    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };

    let corrected = run_reported(
        &target,
        &reference,
        config.correction,
        &reporter,
        &CancelToken::new(),
    )
    .context("Gradient correction failed")?;
    drop(reference);

    reporter.begin_stage(PipelineStage::Writing, None);
    save_image(&corrected, &config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    reporter.finish_stage();
    reporter.pb.finish_with_message("Done");

    println!("\nOutput saved to {}", config.output.display());
    Ok(())
}

/// Merge the optional config file with command-line values.
fn resolve_config(args: &CorrectArgs) -> Result<MgcConfig> {
    let mut config = if let Some(ref path) = args.config {
        MgcConfig::load(path).with_context(|| format!("Invalid config {}", path.display()))?
    } else {
        let target = args
            .target
            .clone()
            .context("A target image is required (or pass --config)")?;
        let reference = args
            .reference
            .clone()
            .context("A reference image is required (or pass --config)")?;
        MgcConfig {
            output: default_output(&target),
            target,
            reference,
            ..Default::default()
        }
    };

    if let Some(ref target) = args.target {
        config.target = target.clone();
    }
    if let Some(ref reference) = args.reference {
        config.reference = reference.clone();
    }
    if let Some(layers) = args.layers {
        config.correction.layers = layers;
    }
    if let Some(k) = args.k {
        config.correction.k = k;
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }

    Ok(config)
}

/// `dir/name.ext` -> `dir/name_corrected.tiff`
fn default_output(target: &std::path::Path) -> PathBuf {
    let stem = target
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("target");
    target.with_file_name(format!(
        "{}.tiff",
        mgc_core::pipeline::corrected_id(stem)
    ))
}
