mod common;

use ndarray::Array2;

use common::*;
use mgc_core::frame::{Frame, Image};
use mgc_core::io::image_io::{load_frame, load_image, save_image, save_png, save_tiff};

#[test]
fn test_save_load_roundtrip_tiff() {
    let mut data = Array2::<f32>::zeros((4, 4));
    data[[0, 1]] = 0.5;
    data[[1, 0]] = 1.0;
    data[[2, 3]] = 0.25;
    let frame = Frame::new(data, 16);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.tiff");

    save_tiff(&frame, &path).unwrap();
    let loaded = load_frame(&path).unwrap();

    assert_eq!(loaded.width(), 4);
    assert_eq!(loaded.height(), 4);
    assert!((loaded.data[[0, 0]] - 0.0).abs() < 1e-4);
    assert!((loaded.data[[0, 1]] - 0.5).abs() < 1e-3);
    assert!((loaded.data[[1, 0]] - 1.0).abs() < 1e-4);
    assert!((loaded.data[[2, 3]] - 0.25).abs() < 1e-3);
}

#[test]
fn test_save_png() {
    let frame = flat_frame(8, 8, 0.5);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.png");

    save_png(&frame, &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_save_clamps_out_of_range() {
    let mut frame = flat_frame(2, 2, 0.5);
    frame.data[[0, 0]] = 1.7;
    frame.data[[1, 1]] = -0.3;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clamped.tiff");
    save_tiff(&frame, &path).unwrap();

    let loaded = load_frame(&path).unwrap();
    assert!((loaded.data[[0, 0]] - 1.0).abs() < 1e-4);
    assert!(loaded.data[[1, 1]].abs() < 1e-4);
}

#[test]
fn test_mono_image_loads_as_mono() {
    let img = horizontal_ramp(6, 10, 0.0, 1.0);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mono.tiff");

    save_image(&img, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert!(!loaded.is_color());
    assert_eq!(loaded.shape(), img.shape());
}

#[test]
fn test_color_image_roundtrip_tiff() {
    let img = color(
        flat_frame(5, 7, 0.25),
        horizontal_ramp_frame(5, 7, 0.0, 1.0),
        flat_frame(5, 7, 0.75),
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color.tiff");

    save_image(&img, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.shape(), img.shape());

    let Image::Color(cf) = loaded else {
        panic!("expected color image");
    };
    assert!((cf.red.data[[2, 3]] - 0.25).abs() < 1e-3);
    assert!((cf.green.data[[0, 6]] - 1.0).abs() < 1e-3);
    assert!((cf.blue.data[[4, 0]] - 0.75).abs() < 1e-3);
}

#[test]
fn test_color_image_png() {
    let img = color(
        flat_frame(3, 3, 0.0),
        flat_frame(3, 3, 0.5),
        flat_frame(3, 3, 1.0),
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color.png");

    save_image(&img, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert!(loaded.is_color());
    assert_eq!(loaded.width(), 3);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("missing.tiff")).is_err());
}
