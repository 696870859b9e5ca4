use std::path::PathBuf;

use mgc_core::error::MgcError;
use mgc_core::pipeline::{CorrectionRequest, MgcConfig, PipelineStage};

// ---------------------------------------------------------------------------
// CorrectionRequest
// ---------------------------------------------------------------------------

#[test]
fn test_request_defaults() {
    let r = CorrectionRequest::default();
    assert_eq!(r.layers, 8);
    assert!((r.k - 0.2).abs() < 1e-6);
    assert!(r.validate().is_ok());
}

#[test]
fn test_request_split_parameters() {
    let r = CorrectionRequest::new(5, 0.7);
    assert_eq!(r.decomposition().layer_count, 5);
    assert!((r.correction().k - 0.7).abs() < 1e-6);
}

#[test]
fn test_request_zero_layers_invalid() {
    let err = CorrectionRequest::new(0, 0.2).validate().unwrap_err();
    assert!(matches!(err, MgcError::InvalidParameter(_)));
}

#[test]
fn test_request_out_of_range_k_accepted() {
    assert!(CorrectionRequest::new(8, 1.5).validate().is_ok());
    assert!(CorrectionRequest::new(8, -0.1).validate().is_ok());
    assert!(CorrectionRequest::new(8, f32::INFINITY).validate().is_err());
}

#[test]
fn test_request_json_roundtrip() {
    let r = CorrectionRequest::new(6, 0.35);
    let json = serde_json::to_string(&r).unwrap();
    let back: CorrectionRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}

// ---------------------------------------------------------------------------
// MgcConfig
// ---------------------------------------------------------------------------

#[test]
fn test_config_parse_with_defaults() {
    let toml = r#"
target = "m42.tiff"
reference = "widefield.tiff"
output = "m42_corrected.tiff"
"#;
    let config = MgcConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.target, PathBuf::from("m42.tiff"));
    assert_eq!(config.correction, CorrectionRequest::default());
}

#[test]
fn test_config_parse_partial_correction() {
    let toml = r#"
target = "a.tiff"
reference = "b.tiff"
output = "c.tiff"

[correction]
k = 0.5
"#;
    let config = MgcConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.correction.layers, 8);
    assert!((config.correction.k - 0.5).abs() < 1e-6);
}

#[test]
fn test_config_missing_target_rejected() {
    let err = MgcConfig::from_toml_str("reference = \"b.tiff\"\noutput = \"c.tiff\"\n").unwrap_err();
    assert!(matches!(err, MgcError::Config(_)));
}

#[test]
fn test_config_save_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mgc.toml");

    let config = MgcConfig {
        correction: CorrectionRequest::new(10, 0.4),
        ..Default::default()
    };
    config.save(&path).unwrap();

    let loaded = MgcConfig::load(&path).unwrap();
    assert_eq!(loaded.target, config.target);
    assert_eq!(loaded.reference, config.reference);
    assert_eq!(loaded.output, config.output);
    assert_eq!(loaded.correction, config.correction);
}

// ---------------------------------------------------------------------------
// PipelineStage Display
// ---------------------------------------------------------------------------

#[test]
fn test_stage_display() {
    assert_eq!(format!("{}", PipelineStage::Decomposition), "Decomposing");
    assert_eq!(
        format!("{}", PipelineStage::GradientEstimation),
        "Estimating gradient"
    );
    assert_eq!(format!("{}", PipelineStage::Correction), "Correcting");
}
