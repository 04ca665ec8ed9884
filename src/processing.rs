use crate::constants::{
    DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, PROCESSING_PREFIX, RESIZE_PREFIX, SAVED_PREFIX,
    SIZE_PREFIX, WEBP_METHOD,
};
use crate::error::{OptimizeError, Result};
use crate::formats::{normalize_to_rgb, SourcePixelFormat};
use crate::utils::{calculate_reduction, display_name, format_kb, parent_dir, webp_output_path};
use crate::validation::{validate_file_exists, validate_max_width, validate_quality};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, RgbImage};
use libwebp_sys::WebPConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by every file of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    pub max_width: u32,
    pub quality: u8,
    /// `None` writes next to each input file
    pub output_dir: Option<PathBuf>,
}

impl TransformConfig {
    pub fn new(
        max_width: Option<u32>,
        quality: Option<u8>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let max_width = validate_max_width(max_width.unwrap_or(DEFAULT_MAX_WIDTH))?;
        let quality = validate_quality(quality.unwrap_or(DEFAULT_QUALITY))?;

        Ok(Self {
            max_width,
            quality,
            output_dir,
        })
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            quality: DEFAULT_QUALITY,
            output_dir: None,
        }
    }
}

/// A decoded input file
#[derive(Debug)]
pub struct SourceImage {
    pub path: PathBuf,
    pub image: DynamicImage,
    pub format: SourcePixelFormat,
    pub width: u32,
    pub height: u32,
    /// Size on disk in bytes
    pub file_size: u64,
}

/// Outcome of one successful transform
#[derive(Debug, Clone, PartialEq)]
pub struct TransformReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub source_format: SourcePixelFormat,
    pub original_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
    pub original_size: u64,
    pub output_size: u64,
}

impl TransformReport {
    pub fn resized(&self) -> bool {
        self.original_dimensions != self.output_dimensions
    }

    /// Percentage size reduction, negative when the output grew
    pub fn reduction(&self) -> f64 {
        calculate_reduction(self.original_size, self.output_size)
    }
}

pub type TransformResult = Result<TransformReport>;

/// Decodes an image file and records its size on disk.
///
/// The format is sniffed from the file contents, falling back to the
/// extension, so a mislabeled file still decodes.
///
/// # Returns
/// * `Err(OptimizeError::InputNotFound)` - if `input_path` is not a regular file
/// * `Err(OptimizeError::Decode)` - if the data is not a recognized or intact image
pub fn load_source_image(input_path: &Path) -> Result<SourceImage> {
    validate_file_exists(input_path)?;
    decode_source(input_path)
}

fn decode_source(input_path: &Path) -> Result<SourceImage> {
    let file_size = fs::metadata(input_path)?.len();
    let image = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| OptimizeError::Decode {
            path: input_path.to_path_buf(),
            source,
        })?;

    let (width, height) = image.dimensions();
    let format = SourcePixelFormat::of(&image);
    debug!(
        "Decoded {:?}: {}x{} {:?} ({} bytes)",
        input_path,
        width,
        height,
        image.color(),
        file_size
    );

    Ok(SourceImage {
        path: input_path.to_path_buf(),
        image,
        format,
        width,
        height,
        file_size,
    })
}

/// Output directory for `input_path`, creating the configured one if needed.
///
/// `create_dir_all` succeeds when the directory already exists, so repeated
/// calls across a batch are harmless.
pub fn resolve_output_dir(input_path: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|source| OptimizeError::DirectoryCreationFailed {
                path: dir.to_path_buf(),
                source,
            })?;
            Ok(dir.to_path_buf())
        }
        None => Ok(parent_dir(input_path)),
    }
}

/// Dimensions after fitting `width` into `max_width`.
///
/// Never upscales. Height is scaled proportionally and rounded down, but
/// kept at least one pixel so extreme panoramas still encode.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }

    let new_height = (height as u64 * max_width as u64 / width as u64) as u32;
    (max_width, new_height.max(1))
}

pub fn resize_to_max_width(img: RgbImage, max_width: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    let (new_width, new_height) = target_dimensions(width, height, max_width);

    if (new_width, new_height) == (width, height) {
        debug!("No resize needed: {}x{} within {}px", width, height, max_width);
        return img;
    }

    debug!(
        "Resizing {}x{} -> {}x{} (Lanczos3)",
        width, height, new_width, new_height
    );
    image::imageops::resize(&img, new_width, new_height, FilterType::Lanczos3)
}

/// Lossy WebP encode at `quality` using the slowest, smallest-output method.
pub fn encode_webp(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut config = WebPConfig::new()
        .map_err(|_| OptimizeError::Encode("could not initialise encoder config".to_string()))?;
    config.lossless = 0;
    config.quality = quality as f32;
    config.method = WEBP_METHOD;

    let encoder = webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height());
    let memory = encoder
        .encode_advanced(&config)
        .map_err(|e| OptimizeError::Encode(format!("{:?}", e)))?;

    debug!(
        "Encoded {}x{} at quality {} -> {} bytes",
        img.width(),
        img.height(),
        quality,
        memory.len()
    );
    Ok(memory.to_vec())
}

/// Core image processing pipeline:
/// load -> normalize -> resize -> encode -> write
///
/// Writes `<stem>.webp` into the configured output directory, or next to the
/// input. An existing file at that path is overwritten, including the source
/// itself when a `.webp` input is written back in place; the original size is
/// captured before the write.
///
/// # Returns
/// * `Ok(TransformReport)` - dimensions and on-disk sizes before and after
/// * `Err(OptimizeError)` - if any step fails; nothing is written unless encoding succeeded
pub fn transform_image(input_path: &Path, config: &TransformConfig) -> TransformResult {
    validate_file_exists(input_path)?;

    let output_dir = resolve_output_dir(input_path, config.output_dir.as_deref())?;
    let output_path = webp_output_path(input_path, &output_dir)?;
    debug!("Processing {:?} -> {:?}", input_path, output_path);

    let source = decode_source(input_path)?;
    let original_dimensions = (source.width, source.height);
    let source_format = source.format;
    let original_size = source.file_size;

    let rgb = normalize_to_rgb(source.image);
    let rgb = resize_to_max_width(rgb, config.max_width);
    let output_dimensions = rgb.dimensions();

    let encoded = encode_webp(&rgb, config.quality)?;
    fs::write(&output_path, &encoded).map_err(|source| OptimizeError::Write {
        path: output_path.clone(),
        source,
    })?;

    let output_size = fs::metadata(&output_path)
        .map_err(|source| OptimizeError::Write {
            path: output_path.clone(),
            source,
        })?
        .len();

    Ok(TransformReport {
        input_path: input_path.to_path_buf(),
        output_path,
        source_format,
        original_dimensions,
        output_dimensions,
        original_size,
        output_size,
    })
}

/// Print the per-file console report for a finished transform
pub fn report_transform(input_path: &Path, result: &TransformResult) {
    crate::info!("{} Processing: {}", PROCESSING_PREFIX, display_name(input_path));

    match result {
        Ok(report) => {
            let (ow, oh) = report.original_dimensions;
            let (nw, nh) = report.output_dimensions;
            crate::verbose!("Color mode: {}", report.source_format);
            if report.resized() {
                crate::info!("   {} Resized: {}x{} → {}x{}", RESIZE_PREFIX, ow, oh, nw, nh);
            } else {
                crate::info!("   {} Size: {}x{} (no resize needed)", SIZE_PREFIX, ow, oh);
            }
            crate::info!(
                "   {} Size: {} → {} ({:.1}% reduction)",
                SIZE_PREFIX,
                format_kb(report.original_size),
                format_kb(report.output_size),
                report.reduction()
            );
            crate::info!("   {} Saved: {}", SAVED_PREFIX, report.output_path.display());
        }
        Err(e) => {
            crate::error!("   Error processing {}: {}", display_name(input_path), e);
        }
    }
    crate::info!("");
}

/// Transform a single file and print its report.
pub fn compress_image(input_path: &Path, config: &TransformConfig) -> TransformResult {
    let result = transform_image(input_path, config);
    report_transform(input_path, &result);
    result
}
