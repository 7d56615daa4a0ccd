#[cfg(test)]
mod tests {
    use crate::error::SetupError;
    use crate::telemetry::otlp_metadata;

    #[test]
    fn test_otlp_headers_become_metadata() {
        let metadata = otlp_metadata("x-honeycomb-team=abc123, X-Dataset = schema-setup")
            .expect("headers are valid");

        assert_eq!(metadata.len(), 2);
        assert_eq!(
            metadata.get("x-honeycomb-team").and_then(|v| v.to_str().ok()),
            Some("abc123")
        );
        assert_eq!(
            metadata.get("x-dataset").and_then(|v| v.to_str().ok()),
            Some("schema-setup")
        );
    }

    #[test]
    fn test_empty_headers() {
        let metadata = otlp_metadata("").expect("no headers is fine");
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_malformed_headers_are_rejected() {
        assert!(matches!(
            otlp_metadata("missing-separator"),
            Err(SetupError::Config(_))
        ));
        assert!(matches!(
            otlp_metadata("bad header=value"),
            Err(SetupError::Config(_))
        ));
    }
}
