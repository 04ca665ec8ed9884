pub const DEFAULT_MAX_WIDTH: u32 = 300;
pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 0;
pub const MAX_QUALITY: u8 = 100;

/// libwebp compression method: 0 is fastest, 6 is slowest with the smallest output.
pub const WEBP_METHOD: i32 = 6;

pub const OUTPUT_EXTENSION: &str = "webp";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"];

/// Background used when flattening transparent pixels.
pub const BACKGROUND_RGB: [u8; 3] = [255, 255, 255];

pub const BANNER_TITLE: &str = "WebP Squeeze - Image Optimizer";
pub const BANNER_WIDTH: usize = 60;

pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Common output message prefixes
pub const PROCESSING_PREFIX: &str = "🗜️ ";
pub const RESIZE_PREFIX: &str = "🔄";
pub const SIZE_PREFIX: &str = "📊";
pub const SAVED_PREFIX: &str = "💾";
pub const SUCCESS_PREFIX: &str = "✅";
pub const FOLDER_PREFIX: &str = "📁";
