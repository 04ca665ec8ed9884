#![allow(dead_code)]

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Transparent 1200x800 PNG with an opaque red square in the middle
pub fn create_rgba_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img = RgbaImage::from_fn(1200, 800, |x, y| {
        if (500..700).contains(&x) && (300..500).contains(&y) {
            Rgba([220, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    img.save(&path).unwrap();
    path
}

pub fn create_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
        .save(&path)
        .unwrap();
    path
}

pub fn create_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([40, 90, 160]))
        .save(&path)
        .unwrap();
    path
}

pub fn create_corrupt_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"fake image data").unwrap();
    path
}

pub fn webp_dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).unwrap();
    (img.width(), img.height())
}
