#![allow(dead_code)]

use ndarray::Array2;

use mgc_core::frame::{ColorFrame, Frame, Image};

pub fn flat_frame(h: usize, w: usize, value: f32) -> Frame {
    Frame::new(Array2::from_elem((h, w), value), 16)
}

pub fn flat(h: usize, w: usize, value: f32) -> Image {
    Image::Mono(flat_frame(h, w, value))
}

/// Horizontal ramp from `lo` (first column) to `hi` (last column).
pub fn horizontal_ramp_frame(h: usize, w: usize, lo: f32, hi: f32) -> Frame {
    let denom = (w.max(2) - 1) as f32;
    let data = Array2::from_shape_fn((h, w), |(_, c)| lo + (hi - lo) * c as f32 / denom);
    Frame::new(data, 16)
}

pub fn horizontal_ramp(h: usize, w: usize, lo: f32, hi: f32) -> Image {
    Image::Mono(horizontal_ramp_frame(h, w, lo, hi))
}

/// Vertical ramp from `lo` (first row) to `hi` (last row).
pub fn vertical_ramp_frame(h: usize, w: usize, lo: f32, hi: f32) -> Frame {
    let denom = (h.max(2) - 1) as f32;
    let data = Array2::from_shape_fn((h, w), |(r, _)| lo + (hi - lo) * r as f32 / denom);
    Frame::new(data, 16)
}

/// Smooth-ish texture with fine detail, values in [0.2, 0.8].
pub fn textured_frame(h: usize, w: usize) -> Frame {
    let data = Array2::from_shape_fn((h, w), |(r, c)| {
        0.5 + 0.2 * (r as f32 * 0.7).sin() * (c as f32 * 1.3).cos() + 0.1 * ((r + c) % 3) as f32
            - 0.1
    });
    Frame::new(data, 16)
}

pub fn color(red: Frame, green: Frame, blue: Frame) -> Image {
    Image::Color(ColorFrame { red, green, blue })
}

pub fn mono(image: &Image) -> &Frame {
    match image {
        Image::Mono(f) => f,
        Image::Color(_) => panic!("expected mono image"),
    }
}

pub fn mean(data: &Array2<f32>) -> f64 {
    data.iter().map(|&v| v as f64).sum::<f64>() / data.len() as f64
}

pub fn variance(data: &Array2<f32>) -> f64 {
    let m = mean(data);
    data.iter().map(|&v| (v as f64 - m).powi(2)).sum::<f64>() / data.len() as f64
}

/// Mean of the columns in [from, to).
pub fn column_band_mean(data: &Array2<f32>, from: usize, to: usize) -> f64 {
    let h = data.nrows();
    let mut sum = 0.0f64;
    for r in 0..h {
        for c in from..to {
            sum += data[[r, c]] as f64;
        }
    }
    sum / (h * (to - from)) as f64
}
