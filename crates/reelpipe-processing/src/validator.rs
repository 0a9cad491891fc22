/// Upload validation errors. None of them has side effects: they are raised
/// before anything is written to disk.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type} (expected: {expected})")]
    InvalidContentType {
        content_type: String,
        expected: String,
    },

    #[error("Empty file")]
    EmptyFile,
}

/// Checks the declared size and media type of an incoming video.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    accepted_content_type: String,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, accepted_content_type: impl Into<String>) -> Self {
        Self {
            max_file_size,
            accepted_content_type: accepted_content_type.into().trim().to_lowercase(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn accepted_content_type(&self) -> &str {
        &self.accepted_content_type
    }

    pub fn validate(&self, content_type: &str, size: usize) -> Result<(), ValidationError> {
        self.validate_file_size(size)?;
        self.validate_content_type(content_type)
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Case-insensitive; parameters such as `; codecs=...` are ignored.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        if essence(content_type) != self.accepted_content_type {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                expected: self.accepted_content_type.clone(),
            });
        }

        Ok(())
    }
}

/// `type/subtype` part of a media type, lowercased.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// File extension used for objects of the given media type.
pub fn extension_for(content_type: &str) -> String {
    let essence = essence(content_type);
    match essence.as_str() {
        "video/mp4" => "mp4".to_string(),
        "video/quicktime" => "mov".to_string(),
        "video/x-matroska" => "mkv".to_string(),
        other => other
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("bin")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIB: usize = 1 << 30;

    fn validator() -> UploadValidator {
        UploadValidator::new(GIB, "video/mp4")
    }

    #[test]
    fn test_accepts_mp4_within_ceiling() {
        assert!(validator().validate("video/mp4", 1024).is_ok());
        assert!(validator().validate("video/mp4", GIB).is_ok());
    }

    #[test]
    fn test_rejects_oversized() {
        let err = validator().validate("video/mp4", GIB + 1).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::FileTooLarge { size, max } if size == GIB + 1 && max == GIB
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validator().validate("video/mp4", 0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_content_type_match_ignores_case_and_parameters() {
        assert!(validator()
            .validate_content_type("Video/MP4; codecs=\"avc1.42E01E\"")
            .is_ok());
        assert!(matches!(
            validator().validate_content_type("video/quicktime"),
            Err(ValidationError::InvalidContentType { .. })
        ));
        assert!(validator().validate_content_type("").is_err());
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("video/mp4"), "mp4");
        assert_eq!(extension_for("VIDEO/MP4; codecs=avc1"), "mp4");
        assert_eq!(extension_for("video/quicktime"), "mov");
        assert_eq!(extension_for("video/webm"), "webm");
        assert_eq!(extension_for("garbage"), "bin");
    }
}
