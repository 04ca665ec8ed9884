/// Source pixel formats and normalization to opaque RGB
///
/// Every decoded image is classified into a small closed set of source
/// formats, then mapped through [`normalize_to_rgb`] to the one canonical
/// layout the WebP encoder receives: opaque, 8-bit, three channels.
use crate::constants::BACKGROUND_RGB;
use image::{DynamicImage, RgbImage, RgbaImage};
use std::fmt;

/// Color layout of a decoded source image.
///
/// Palette images are expanded by the decoders before they reach us: an
/// indexed PNG or GIF with a transparent entry arrives as [`Rgba`], one
/// without transparency as [`Rgb`].
///
/// [`Rgba`]: SourcePixelFormat::Rgba
/// [`Rgb`]: SourcePixelFormat::Rgb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePixelFormat {
    /// 8-bit RGB, passed through untouched
    Rgb,
    /// RGB with alpha at any bit depth
    Rgba,
    /// Grayscale with alpha at any bit depth
    LumaAlpha,
    /// Anything else without alpha (grayscale, 16-bit or float RGB)
    Other,
}

impl SourcePixelFormat {
    pub fn of(img: &DynamicImage) -> Self {
        match img {
            DynamicImage::ImageRgb8(_) => SourcePixelFormat::Rgb,
            DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
                SourcePixelFormat::LumaAlpha
            }
            other if other.color().has_alpha() => SourcePixelFormat::Rgba,
            _ => SourcePixelFormat::Other,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, SourcePixelFormat::Rgba | SourcePixelFormat::LumaAlpha)
    }
}

impl fmt::Display for SourcePixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourcePixelFormat::Rgb => "RGB",
            SourcePixelFormat::Rgba => "RGBA",
            SourcePixelFormat::LumaAlpha => "LA",
            SourcePixelFormat::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Converts any decoded image into opaque 8-bit RGB.
///
/// Formats carrying alpha are composited onto [`BACKGROUND_RGB`]; the rest
/// are converted channel-wise.
pub fn normalize_to_rgb(img: DynamicImage) -> RgbImage {
    let format = SourcePixelFormat::of(&img);
    if format.has_alpha() {
        flatten_onto_background(&img.into_rgba8())
    } else {
        img.into_rgb8()
    }
}

pub fn flatten_onto_background(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        image::Rgb([
            blend_channel(r, BACKGROUND_RGB[0], a),
            blend_channel(g, BACKGROUND_RGB[1], a),
            blend_channel(b, BACKGROUND_RGB[2], a),
        ])
    })
}

/// `alpha` weights the foreground; 255 keeps it exactly, 0 yields the background.
pub fn blend_channel(foreground: u8, background: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    let blended = foreground as u32 * a + background as u32 * (255 - a);
    ((blended + 127) / 255) as u8
}
