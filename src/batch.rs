use crate::constants::{FOLDER_PREFIX, PROGRESS_BAR_TEMPLATE, SIZE_PREFIX, SUCCESS_PREFIX};
use crate::error::{OptimizeError, Result};
use crate::processing::{report_transform, transform_image, TransformConfig};
use crate::utils::{calculate_reduction, format_file_size, is_image_file};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;
use walkdir::WalkDir;

/// Totals for one directory run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Supported-extension files found in the directory
    pub total: usize,
    pub succeeded: usize,
    pub failed_files: Vec<PathBuf>,
    /// Bytes on disk, summed over successful files only
    pub total_original_size: u64,
    pub total_output_size: u64,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.failed_files.len()
    }

    pub fn reduction(&self) -> f64 {
        calculate_reduction(self.total_original_size, self.total_output_size)
    }
}

/// Lists the supported images directly inside `input_dir`.
///
/// Subdirectories are not entered. Entries are sorted by file name so runs
/// are reproducible regardless of the platform's listing order.
pub fn collect_image_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    if !input_dir.exists() {
        return Err(OptimizeError::InputNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(OptimizeError::NotAFileOrDirectory(input_dir.to_path_buf()));
    }

    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut image_files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| OptimizeError::Io(e.into()))?;
        let path = entry.path();

        // is_file follows symlinks
        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    Ok(image_files)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    match ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => debug!("Falling back to default progress style: {}", e),
    }
    pb
}

/// Converts every supported image in `input_dir`, one file at a time.
///
/// A failure on one file is reported and counted; the remaining files are
/// still processed. Only a missing or unreadable directory is an error.
pub fn batch_compress_images(input_dir: &Path, config: &TransformConfig) -> Result<BatchSummary> {
    let image_files = collect_image_files(input_dir)?;
    let total_files = image_files.len();

    if total_files == 0 {
        crate::info!("No images found in {}", input_dir.display());
        return Ok(BatchSummary::default());
    }

    let output_display = config
        .output_dir
        .as_deref()
        .unwrap_or(input_dir)
        .display()
        .to_string();
    crate::info!("{} Found {} images to optimize", SIZE_PREFIX, total_files);
    crate::info!("{} Input: {}", FOLDER_PREFIX, input_dir.display());
    crate::info!("{} Output: {}", FOLDER_PREFIX, output_display);
    crate::info!("📏 Max width: {}px", config.max_width);
    crate::info!("🎯 Quality: {}/100", config.quality);
    crate::info!("");

    let start_time = Instant::now();
    let progress = create_progress_bar(total_files as u64);
    let mut summary = BatchSummary {
        total: total_files,
        ..BatchSummary::default()
    };

    for input_path in &image_files {
        debug!("Batch item {:?}", input_path);
        let result = transform_image(input_path, config);
        progress.suspend(|| report_transform(input_path, &result));

        match result {
            Ok(report) => {
                summary.succeeded += 1;
                summary.total_original_size += report.original_size;
                summary.total_output_size += report.output_size;
            }
            Err(_) => summary.failed_files.push(input_path.clone()),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    print_batch_summary(&summary, start_time.elapsed().as_secs_f64());

    Ok(summary)
}

fn print_batch_summary(summary: &BatchSummary, elapsed_secs: f64) {
    crate::info!(
        "{} Complete! Successfully optimized {}/{} images",
        SUCCESS_PREFIX,
        summary.succeeded,
        summary.total
    );
    crate::info!(
        "  {} Total size: {} → {} ({:.1}% reduction)",
        SIZE_PREFIX,
        format_file_size(summary.total_original_size),
        format_file_size(summary.total_output_size),
        summary.reduction()
    );
    crate::verbose!("Total time: {:.2}s", elapsed_secs);

    if summary.failed() > 0 {
        crate::warn!("Failed files: {}", summary.failed());
        for path in &summary.failed_files {
            crate::verbose!("  failed: {}", path.display());
        }
    }
}
