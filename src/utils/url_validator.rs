//! URL validation for submitted links.
//!
//! Only absolute `http` and `https` URLs with a non-empty host are accepted.
//! Control characters and surrounding whitespace are rejected outright.
//! The URL is not normalized: the submitted text is what gets hashed and stored.

use url::{ParseError, Url};

/// Reasons a candidate URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL cannot be empty")]
    EmptyInput,

    #[error("invalid URL format: {0}")]
    MalformedUrl(String),

    #[error("URL must start with http:// or https://")]
    UnsupportedScheme(String),

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `candidate` is a well-formed `http`/`https` URL with a host.
///
/// # Errors
///
/// - [`UrlValidationError::EmptyInput`] for an empty string
/// - [`UrlValidationError::MalformedUrl`] when the string contains control
///   characters, has surrounding whitespace or does not parse
/// - [`UrlValidationError::UnsupportedScheme`] for any scheme other than `http`/`https`
/// - [`UrlValidationError::MissingHost`] when the authority is empty
///
/// # Examples
///
/// ```
/// use hash_shortener::utils::url_validator::{validate_url, UrlValidationError};
///
/// assert!(validate_url("https://example.com").is_ok());
/// assert_eq!(validate_url(""), Err(UrlValidationError::EmptyInput));
/// ```
pub fn validate_url(candidate: &str) -> Result<(), UrlValidationError> {
    if candidate.is_empty() {
        return Err(UrlValidationError::EmptyInput);
    }

    // The parser silently drops these, but the raw text is what gets stored
    // and later sent back as a `Location` header.
    if candidate.chars().any(char::is_control) {
        return Err(UrlValidationError::MalformedUrl(
            "invalid control character in URL".to_string(),
        ));
    }
    if candidate.trim() != candidate {
        return Err(UrlValidationError::MalformedUrl(
            "leading or trailing whitespace in URL".to_string(),
        ));
    }

    let url = Url::parse(candidate).map_err(|e| match e {
        ParseError::EmptyHost => UrlValidationError::MissingHost,
        other => UrlValidationError::MalformedUrl(other.to_string()),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_http() {
        assert!(validate_url("http://example.com").is_ok());
    }

    #[test]
    fn test_validate_https_with_path_and_query() {
        assert!(validate_url("https://example.com/search?q=rust&lang=en").is_ok());
    }

    #[test]
    fn test_validate_with_port() {
        assert!(validate_url("http://localhost:8080/test").is_ok());
    }

    #[test]
    fn test_validate_ip_address() {
        assert!(validate_url("http://192.168.1.1:8080/api").is_ok());
    }

    #[test]
    fn test_validate_empty_string() {
        assert_eq!(validate_url(""), Err(UrlValidationError::EmptyInput));
    }

    #[test]
    fn test_validate_no_scheme() {
        let result = validate_url("example.com");
        assert!(matches!(result, Err(UrlValidationError::MalformedUrl(_))));
    }

    #[test]
    fn test_validate_garbage() {
        let result = validate_url("not a valid url");
        assert!(matches!(result, Err(UrlValidationError::MalformedUrl(_))));
    }

    #[test]
    fn test_validate_ftp_scheme() {
        let result = validate_url("ftp://example.com/file.txt");
        assert_eq!(
            result,
            Err(UrlValidationError::UnsupportedScheme("ftp".to_string()))
        );
    }

    #[test]
    fn test_validate_javascript_scheme() {
        let result = validate_url("javascript:alert('xss')");
        assert!(matches!(
            result,
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_validate_mailto_scheme() {
        let result = validate_url("mailto:test@example.com");
        assert!(matches!(
            result,
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_validate_trailing_newline() {
        let result = validate_url("https://example.com\n");
        assert!(matches!(result, Err(UrlValidationError::MalformedUrl(_))));
    }

    #[test]
    fn test_validate_embedded_control_characters() {
        for candidate in [
            "https://example.com/a\tb",
            "https://example.com/a\nb",
            "https://exa\rmple.com",
            "https://example.com/\u{7f}",
        ] {
            let result = validate_url(candidate);
            assert!(
                matches!(result, Err(UrlValidationError::MalformedUrl(_))),
                "accepted {candidate:?}"
            );
        }
    }

    #[test]
    fn test_validate_surrounding_whitespace() {
        for candidate in [" https://example.com", "https://example.com "] {
            let result = validate_url(candidate);
            assert!(matches!(result, Err(UrlValidationError::MalformedUrl(_))));
        }
    }

    #[test]
    fn test_validate_missing_host() {
        assert_eq!(
            validate_url("http://"),
            Err(UrlValidationError::MissingHost)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            UrlValidationError::EmptyInput.to_string(),
            "URL cannot be empty"
        );
        assert_eq!(
            UrlValidationError::MissingHost.to_string(),
            "URL must contain a host"
        );
        assert_eq!(
            UrlValidationError::UnsupportedScheme("ftp".into()).to_string(),
            "URL must start with http:// or https://"
        );
    }
}
