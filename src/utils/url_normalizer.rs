//! Target URL validation and normalization at the HTTP boundary.
//!
//! The alias engine stores whatever string it is given; handlers run
//! [`normalize_url`] first so that stored targets are absolute http(s) URLs
//! in a canonical form.

use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must have a host")]
    MissingHost,
}

/// Parses `input` and returns its canonical string form.
///
/// - only `http` and `https` are accepted
/// - the host is lowercased and default ports are dropped (done by the `url` parser)
/// - fragments are removed
/// - an empty path becomes `/`
///
/// # Examples
///
/// ```
/// use url_alias::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com/");
/// assert_eq!(
///     normalize_url("HTTPS://Example.COM:443/Path#top").unwrap(),
///     "https://example.com/Path"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url = Url::parse(input.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url.into())
}
