/// Utility functions for common operations
///
/// Small helpers shared by the single-file pipeline, the batch driver and
/// the console reporting.
use crate::constants::{OUTPUT_EXTENSION, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{OptimizeError, Result};
use std::path::{Path, PathBuf};

/// Check if a file path has one of the supported image extensions (case-insensitive)
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Build `<output_dir>/<input stem>.webp`
pub fn webp_output_path(input_path: &Path, output_dir: &Path) -> Result<PathBuf> {
    let file_stem = input_path.file_stem().ok_or_else(|| {
        OptimizeError::InvalidParameter(format!("Invalid file name: {}", input_path.display()))
    })?;

    let mut file_name = file_stem.to_os_string();
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);
    Ok(output_dir.join(file_name))
}

/// Directory holding `path`, with `.` for bare file names
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format file size in human-readable format
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Size in kilobytes with one decimal, the unit used in per-file reports
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1}KB", bytes as f64 / 1024.0)
}

/// Percentage size reduction
///
/// Positive means the output is smaller; negative means it grew.
pub fn calculate_reduction(original_size: u64, output_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - output_size as f64) / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("test.jpg")));
        assert!(is_image_file(Path::new("test.JPEG")));
        assert!(is_image_file(Path::new("test.png")));
        assert!(is_image_file(Path::new("test.webp")));
        assert!(is_image_file(Path::new("test.bmp")));
        assert!(is_image_file(Path::new("test.TIFF")));
        assert!(is_image_file(Path::new("test.gif")));

        assert!(!is_image_file(Path::new("test.tif")));
        assert!(!is_image_file(Path::new("test.avif")));
        assert!(!is_image_file(Path::new("test.txt")));
        assert!(!is_image_file(Path::new("test")));
    }

    #[test]
    fn test_webp_output_path() {
        let result = webp_output_path(Path::new("/images/photo.PNG"), Path::new("/tmp/out")).unwrap();
        assert_eq!(result, PathBuf::from("/tmp/out/photo.webp"));

        // only the last extension is replaced
        let result = webp_output_path(Path::new("archive.tar.gif"), Path::new("out")).unwrap();
        assert_eq!(result, PathBuf::from("out/archive.tar.webp"));
    }

    #[test]
    fn test_webp_output_path_same_name_for_webp_input() {
        let result = webp_output_path(Path::new("dir/cover.webp"), Path::new("dir")).unwrap();
        assert_eq!(result, PathBuf::from("dir/cover.webp"));
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("a/b.png")), PathBuf::from("a"));
        assert_eq!(parent_dir(Path::new("b.png")), PathBuf::from("."));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(2048), "2.0KB");
        assert_eq!(format_kb(100), "0.1KB");
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(calculate_reduction(1000, 800), 20.0);
        assert_eq!(calculate_reduction(1000, 1200), -20.0);
        assert_eq!(calculate_reduction(1000, 1000), 0.0);
        assert_eq!(calculate_reduction(0, 500), 0.0);
    }
}
