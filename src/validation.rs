//! Input checks shared by the client and the processing endpoint.

use crate::error::ValidationError;

pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// 5 MiB, inclusive.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

pub fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    if prompt.trim().is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }
    Ok(())
}

pub fn validate_image_type(mime: &str) -> Result<(), ValidationError> {
    if ACCEPTED_MIME_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(mime.to_string()))
    }
}

pub fn validate_image_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::SizeExceeded {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Type first, then size.
pub fn validate_image(mime: &str, size: u64) -> Result<(), ValidationError> {
    validate_image_type(mime)?;
    validate_image_size(size)
}

/// Human readable size, e.g. `1536 -> "1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut whole = bytes;
    while whole >= 1024 && exponent < UNITS.len() - 1 {
        whole /= 1024;
        exponent += 1;
    }
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompts_are_rejected() {
        for prompt in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(validate_prompt(prompt), Err(ValidationError::EmptyPrompt));
        }
        assert!(validate_prompt("a red circle").is_ok());
        assert!(validate_prompt("  x  ").is_ok());
    }

    #[test]
    fn only_jpeg_and_png_are_accepted() {
        assert!(validate_image_type("image/jpeg").is_ok());
        assert!(validate_image_type("image/png").is_ok());

        for mime in ["image/gif", "text/plain", "image/webp", "IMAGE/PNG", "image/jpg", ""] {
            assert_eq!(
                validate_image_type(mime),
                Err(ValidationError::InvalidFormat(mime.to_string()))
            );
        }
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_image_size(0).is_ok());
        assert!(validate_image_size(MAX_IMAGE_BYTES).is_ok());
        assert_eq!(
            validate_image_size(MAX_IMAGE_BYTES + 1),
            Err(ValidationError::SizeExceeded {
                size: MAX_IMAGE_BYTES + 1,
                limit: MAX_IMAGE_BYTES
            })
        );
    }

    #[test]
    fn type_is_checked_before_size() {
        assert!(matches!(
            validate_image("image/gif", MAX_IMAGE_BYTES * 2),
            Err(ValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn formats_file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1025), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
