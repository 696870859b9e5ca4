use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma, Rgb};

use crate::color::process::from_channels;
use crate::error::{MgcError, Result};
use crate::frame::{alloc_plane, ColorFrame, Frame, Image};

fn buffer_error(w: usize, h: usize) -> MgcError {
    MgcError::DimensionMismatch {
        expected: format!("{w}x{h} pixel buffer"),
        actual: "short buffer".into(),
    }
}

fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0) as u16
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    let (h, w) = frame.data.dim();
    let pixels: Vec<u16> = frame.data.iter().map(|&v| to_u16(v)).collect();

    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| buffer_error(w, h))?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let (h, w) = frame.data.dim();
    let pixels: Vec<u8> = frame.data.iter().map(|&v| to_u8(v)).collect();

    let img = GrayImage::from_raw(w as u32, h as u32, pixels).ok_or_else(|| buffer_error(w, h))?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a ColorFrame as 16-bit RGB TIFF.
pub fn save_color_tiff(color: &ColorFrame, path: &Path) -> Result<()> {
    let (h, w) = color.red.data.dim();
    let mut pixels: Vec<u16> = Vec::with_capacity(h * w * 3);
    for ((r, g), b) in color
        .red
        .data
        .iter()
        .zip(color.green.data.iter())
        .zip(color.blue.data.iter())
    {
        pixels.extend_from_slice(&[to_u16(*r), to_u16(*g), to_u16(*b)]);
    }

    let img = ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| buffer_error(w, h))?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a ColorFrame as 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) -> Result<()> {
    let (h, w) = color.red.data.dim();
    let mut pixels: Vec<u8> = Vec::with_capacity(h * w * 3);
    for ((r, g), b) in color
        .red
        .data
        .iter()
        .zip(color.green.data.iter())
        .zip(color.blue.data.iter())
    {
        pixels.extend_from_slice(&[to_u8(*r), to_u8(*g), to_u8(*b)]);
    }

    let img = image::RgbImage::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| buffer_error(w, h))?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an image, choosing format from file extension (TIFF unless `.png`).
pub fn save_image(image: &Image, path: &Path) -> Result<()> {
    let png = matches!(path.extension().and_then(|e| e.to_str()), Some("png"));
    match (image, png) {
        (Image::Mono(f), true) => save_png(f, path),
        (Image::Mono(f), false) => save_tiff(f, path),
        (Image::Color(cf), true) => save_color_png(cf, path),
        (Image::Color(cf), false) => save_color_tiff(cf, path),
    }
}

/// Load a grayscale Frame from a decoded image.
fn gray_frame(img: &DynamicImage) -> Result<Frame> {
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = alloc_plane(h as usize, w as usize)?;
    for (dst, px) in data.iter_mut().zip(gray.pixels()) {
        *dst = px.0[0] as f32 / 65535.0;
    }
    Ok(Frame::new(data, 16))
}

/// Load a ColorFrame from a decoded image.
fn color_frame(img: &DynamicImage) -> Result<ColorFrame> {
    let rgb = img.to_rgb16();
    let (w, h) = rgb.dimensions();
    let mut red = alloc_plane(h as usize, w as usize)?;
    let mut green = alloc_plane(h as usize, w as usize)?;
    let mut blue = alloc_plane(h as usize, w as usize)?;
    for (((r, g), b), px) in red
        .iter_mut()
        .zip(green.iter_mut())
        .zip(blue.iter_mut())
        .zip(rgb.pixels())
    {
        *r = px.0[0] as f32 / 65535.0;
        *g = px.0[1] as f32 / 65535.0;
        *b = px.0[2] as f32 / 65535.0;
    }
    Ok(from_channels(
        Frame::new(red, 16),
        Frame::new(green, 16),
        Frame::new(blue, 16),
    ))
}

/// Load a grayscale image file into a Frame.
pub fn load_frame(path: &Path) -> Result<Frame> {
    gray_frame(&image::open(path)?)
}

/// Load an image file, keeping color when the file has it.
pub fn load_image(path: &Path) -> Result<Image> {
    let img = image::open(path)?;
    if img.color().has_color() {
        Ok(Image::Color(color_frame(&img)?))
    } else {
        Ok(Image::Mono(gray_frame(&img)?))
    }
}
