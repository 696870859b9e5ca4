use tracing::info;

use crate::cancel::CancelToken;
use crate::consts::CORRECTED_SUFFIX;
use crate::correction::{apply_correction, estimate_gradient};
use crate::error::{MgcError, Result};
use crate::frame::{ensure_non_empty, ensure_same_shape, Image};
use crate::io::store::ImageStore;
use crate::multiscale::decompose_cancellable;

use super::config::CorrectionRequest;
use super::types::{NoOpReporter, PipelineStage, ProgressReporter};

/// Remove the large-scale gradient of `target` using `reference`.
///
/// The target is left untouched; a new image of the same shape is returned.
pub fn run(target: &Image, reference: &Image, request: CorrectionRequest) -> Result<Image> {
    run_reported(target, reference, request, &NoOpReporter, &CancelToken::new())
}

/// Run the correction with progress reporting and cooperative cancellation.
///
/// Cancellation is checked at every stage boundary and between decomposition
/// layers. Intermediate images are dropped as soon as they are consumed, and
/// on every error path.
pub fn run_reported(
    target: &Image,
    reference: &Image,
    request: CorrectionRequest,
    reporter: &dyn ProgressReporter,
    cancel: &CancelToken,
) -> Result<Image> {
    request.validate()?;
    ensure_non_empty(target)?;
    ensure_same_shape(target, reference)?;
    cancel.check()?;

    let shape = target.shape();
    info!(
        width = shape.width,
        height = shape.height,
        channels = shape.channels,
        layers = request.layers,
        k = request.k,
        "Starting gradient correction"
    );

    // Target and reference decompose independently; both must finish first.
    reporter.begin_stage(PipelineStage::Decomposition, Some(2));
    let params = request.decomposition();
    let (decomposed_target, decomposed_reference) = rayon::join(
        || decompose_cancellable(target, &params, Some(cancel)),
        || decompose_cancellable(reference, &params, Some(cancel)),
    );
    let decomposed_target = decomposed_target?;
    let decomposed_reference = decomposed_reference?;
    reporter.advance(2);
    reporter.finish_stage();
    info!(layers = request.layers, "Decomposition complete");
    cancel.check()?;

    reporter.begin_stage(PipelineStage::GradientEstimation, None);
    let gradient = estimate_gradient(
        &decomposed_reference,
        &decomposed_target,
        &request.correction(),
    )?;
    drop(decomposed_target);
    drop(decomposed_reference);
    reporter.finish_stage();
    info!(k = request.k, "Gradient estimated");
    cancel.check()?;

    reporter.begin_stage(PipelineStage::Correction, None);
    let corrected = apply_correction(target, gradient)?;
    reporter.finish_stage();
    info!("Gradient correction complete");

    Ok(corrected)
}

/// Id under which the corrected version of `target_id` is stored.
pub fn corrected_id(target_id: &str) -> String {
    format!("{target_id}{CORRECTED_SUFFIX}")
}

/// Resolve target/reference through a store, correct, and store the result.
///
/// Returns the id of the new image (`<target_id>_corrected`). Nothing but the
/// final image is written to the store.
pub fn run_with_store<S: ImageStore + ?Sized>(
    store: &mut S,
    target_id: &str,
    reference_id: &str,
    request: CorrectionRequest,
    reporter: &dyn ProgressReporter,
    cancel: &CancelToken,
) -> Result<String> {
    if target_id.trim().is_empty() {
        return Err(MgcError::InvalidParameter("no target image selected".into()));
    }
    if reference_id.trim().is_empty() {
        return Err(MgcError::InvalidParameter(
            "no reference image selected".into(),
        ));
    }

    reporter.begin_stage(PipelineStage::Reading, Some(2));
    let target = store.load(target_id)?;
    reporter.advance(1);
    let reference = store.load(reference_id)?;
    reporter.advance(2);
    reporter.finish_stage();

    let corrected = run_reported(&target, &reference, request, reporter, cancel)?;
    drop(reference);

    reporter.begin_stage(PipelineStage::Writing, None);
    let id = store.store(&corrected_id(target_id), corrected)?;
    reporter.finish_stage();
    info!(target_id, output = %id, "Corrected image stored");

    Ok(id)
}
