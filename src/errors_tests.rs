//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::HairAdvisorError;

    // ====== Error Type Tests ======

    #[test]
    fn test_custom_error() {
        let error = HairAdvisorError::Custom("Test error message".to_string());
        assert_eq!(format!("{error}"), "Test error message");
    }

    #[test]
    fn test_source_unavailable_mentions_path() {
        let error = HairAdvisorError::SourceUnavailable {
            path: "data/missing.txt".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
        };
        let display = format!("{error}");
        assert!(display.contains("data/missing.txt"));
        assert!(display.contains("No such file"));
    }

    #[test]
    fn test_generation_unavailable() {
        let error = HairAdvisorError::GenerationUnavailable("quota exhausted".to_string());
        assert!(matches!(error, HairAdvisorError::GenerationUnavailable(_)));
        assert!(format!("{error}").contains("quota exhausted"));
    }

    #[test]
    fn test_description_unavailable() {
        let error = HairAdvisorError::DescriptionUnavailable("provider down".to_string());
        assert!(format!("{error}").starts_with("Image description unavailable"));
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: HairAdvisorError = io_err.into();
        assert!(matches!(err, HairAdvisorError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: HairAdvisorError = json_err.into();
        assert!(matches!(err, HairAdvisorError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("key = ").unwrap_err();
        let err: HairAdvisorError = toml_err.into();
        assert!(matches!(err, HairAdvisorError::TomlParsing(_)));
    }

    #[test]
    fn test_result_question_mark_propagation() {
        fn inner() -> crate::Result<u32> {
            let value: u32 = serde_json::from_str("42")?;
            Ok(value)
        }
        assert_eq!(inner().unwrap(), 42);
    }
}
