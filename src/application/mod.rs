//! Application layer - runs declarations -> target pipelines end to end

pub mod dto;
pub mod errors;
pub mod pipeline;
pub mod traits;

pub use dto::*;
pub use errors::*;
pub use pipeline::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_MARKER;
    use std::path::PathBuf;

    fn request() -> GenerateRequest {
        GenerateRequest {
            declarations: PathBuf::from("include/action.hpp"),
            usages: vec![PathBuf::from("src/unit.cpp")],
            target: PathBuf::from("src/action.cpp"),
            marker: DEFAULT_MARKER.to_string(),
            mode: WriteMode::Write,
        }
    }

    #[test]
    fn test_generate_request_validation() {
        assert!(request().validate().is_ok());

        let mut no_usages = request();
        no_usages.usages.clear();
        match no_usages.validate() {
            Err(ValidationError::MissingField(msg)) => assert!(msg.contains("usage")),
            other => panic!("Expected MissingField error, got {other:?}"),
        }

        let mut bad_marker = request();
        bad_marker.marker = "Generated".to_string();
        assert!(matches!(
            bad_marker.validate(),
            Err(ValidationError::InvalidMarker(_))
        ));
    }

    #[test]
    fn test_application_error_display() {
        let error = ApplicationError::OutOfDate(PathBuf::from("src/action.cpp"));
        assert_eq!(error.to_string(), "Target src/action.cpp is out of date");

        let validation: ApplicationError =
            ValidationError::MissingField("target file path".to_string()).into();
        assert!(validation.to_string().contains("target file path"));
    }
}
