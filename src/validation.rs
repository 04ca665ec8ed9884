use crate::constants::{MAX_QUALITY, MIN_QUALITY};
use crate::error::{OptimizeError, Result};
use std::path::Path;

/// What the positional input argument points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
}

/// Classify the input path, failing when it is missing or neither a file nor a directory
pub fn classify_input(path: &Path) -> Result<InputKind> {
    if !path.exists() {
        return Err(OptimizeError::InputNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        Ok(InputKind::File)
    } else if path.is_dir() {
        Ok(InputKind::Directory)
    } else {
        Err(OptimizeError::NotAFileOrDirectory(path.to_path_buf()))
    }
}

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(OptimizeError::InputNotFound(path.to_path_buf()));
    }
    Ok(())
}

pub fn validate_max_width(width: u32) -> Result<u32> {
    if width == 0 {
        return Err(OptimizeError::InvalidParameter(
            "Invalid width value: 0. Must be a positive integer.".to_string(),
        ));
    }
    Ok(width)
}

pub fn validate_quality(quality: u8) -> Result<u8> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(OptimizeError::InvalidParameter(format!(
            "Invalid quality value: {}. Must be {}-{}.",
            quality, MIN_QUALITY, MAX_QUALITY
        )));
    }
    Ok(quality)
}

/// Parse a max width argument such as `"400"`
pub fn parse_max_width(value: &str) -> Result<u32> {
    let invalid = || {
        OptimizeError::InvalidParameter(format!(
            "Invalid width value: {}. Must be a positive integer.",
            value
        ))
    };

    let parsed: i64 = value.trim().parse().map_err(|_| invalid())?;
    if parsed <= 0 {
        return Err(invalid());
    }
    u32::try_from(parsed).map_err(|_| invalid())
}

/// Parse a quality argument such as `"85"`
pub fn parse_quality(value: &str) -> Result<u8> {
    let invalid = || {
        OptimizeError::InvalidParameter(format!(
            "Invalid quality value: {}. Must be {}-{}.",
            value, MIN_QUALITY, MAX_QUALITY
        ))
    };

    let parsed: i64 = value.trim().parse().map_err(|_| invalid())?;
    if !(MIN_QUALITY as i64..=MAX_QUALITY as i64).contains(&parsed) {
        return Err(invalid());
    }
    Ok(parsed as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_classify_input_not_found() {
        let result = classify_input(Path::new("nonexistent.jpg"));
        assert!(matches!(result, Err(OptimizeError::InputNotFound(_))));
    }

    #[test]
    fn test_classify_input_file_and_directory() {
        let temp_dir = TempDir::new().unwrap();
        let test_file = temp_dir.path().join("test.jpg");
        File::create(&test_file).unwrap();

        assert_eq!(classify_input(&test_file).unwrap(), InputKind::File);
        assert_eq!(classify_input(temp_dir.path()).unwrap(), InputKind::Directory);
    }

    #[test]
    fn test_validate_file_exists_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            validate_file_exists(temp_dir.path()),
            Err(OptimizeError::InputNotFound(_))
        ));
    }

    #[test]
    fn test_validate_max_width() {
        assert_eq!(validate_max_width(1).unwrap(), 1);
        assert!(matches!(
            validate_max_width(0),
            Err(OptimizeError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_quality() {
        assert_eq!(validate_quality(0).unwrap(), 0);
        assert_eq!(validate_quality(100).unwrap(), 100);
        assert!(validate_quality(101).is_err());
    }

    #[test]
    fn test_parse_max_width() {
        assert_eq!(parse_max_width("400").unwrap(), 400);
        assert_eq!(parse_max_width(" 12 ").unwrap(), 12);
        assert!(parse_max_width("0").is_err());
        assert!(parse_max_width("-5").is_err());
        assert!(parse_max_width("abc").is_err());
        assert!(parse_max_width("4.5").is_err());
        assert!(parse_max_width("99999999999").is_err());
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!(parse_quality("0").unwrap(), 0);
        assert_eq!(parse_quality("85").unwrap(), 85);
        assert_eq!(parse_quality("100").unwrap(), 100);
        assert!(parse_quality("101").is_err());
        assert!(parse_quality("-1").is_err());
        assert!(parse_quality("high").is_err());
    }
}
