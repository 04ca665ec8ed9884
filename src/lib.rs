pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod processing;
pub mod utils;
pub mod validation;

pub use batch::{batch_compress_images, collect_image_files, BatchSummary};
pub use error::{OptimizeError, Result};
pub use formats::{normalize_to_rgb, SourcePixelFormat};
pub use processing::{
    compress_image, encode_webp, load_source_image, resize_to_max_width, target_dimensions,
    transform_image, SourceImage, TransformConfig, TransformReport, TransformResult,
};
pub use utils::{is_image_file, webp_output_path};
pub use validation::{classify_input, InputKind};
