use std::net::IpAddr;
use thiserror::Error;
use url::{Host, Url};

/// Errors that can occur during URL validation.
///
/// These errors cover both parsing failures and security policy violations
/// designed to prevent SSRF (Server-Side Request Forgery) attacks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("Private IP address not allowed: {0}")]
    PrivateIp(String),
    #[error("Localhost not allowed")]
    Localhost,
}

/// Validates a feed URL before it is fetched.
///
/// Only `http` and `https` are accepted. Unless `allow_private` is set, the
/// host may not be `localhost`, a loopback address, or an address in a
/// private, link-local or unique-local range.
///
/// ```
/// use syndkit::util::validate_feed_url;
///
/// assert!(validate_feed_url("https://example.com/feed.xml", false).is_ok());
/// assert!(validate_feed_url("http://192.168.1.1/feed", false).is_err());
/// assert!(validate_feed_url("http://127.0.0.1:8080/feed", true).is_ok());
/// assert!(validate_feed_url("file:///etc/passwd", true).is_err());
/// ```
pub fn validate_feed_url(url_str: &str, allow_private: bool) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if allow_private {
        return Ok(url);
    }

    let ip = match url.host() {
        Some(Host::Domain(domain)) if domain.eq_ignore_ascii_case("localhost") => {
            return Err(UrlValidationError::Localhost)
        }
        Some(Host::Ipv4(ip)) => IpAddr::V4(ip),
        Some(Host::Ipv6(ip)) => IpAddr::V6(ip),
        _ => return Ok(url),
    };

    if ip.is_loopback() {
        return Err(UrlValidationError::Localhost);
    }
    if is_private_ip(&ip) {
        return Err(UrlValidationError::PrivateIp(ip.to_string()));
    }
    Ok(url)
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => ipv4.is_private() || ipv4.is_link_local() || ipv4.is_unspecified(),
        IpAddr::V6(ipv6) => {
            let first = ipv6.segments()[0];
            // fc00::/7 unique local, fe80::/10 link local
            ipv6.is_unspecified() || (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_urls_accepted() {
        assert!(validate_feed_url("https://example.com/feed.xml", false).is_ok());
        assert!(validate_feed_url("http://news.example.org", false).is_ok());
        assert!(validate_feed_url("https://example.com:443/feed.xml", false).is_ok());
    }

    #[test]
    fn test_invalid_schemes() {
        assert_eq!(
            validate_feed_url("ftp://example.com", false),
            Err(UrlValidationError::UnsupportedScheme("ftp".into()))
        );
        assert!(validate_feed_url("file:///etc/passwd", true).is_err());
    }

    #[test]
    fn test_localhost_rejected() {
        assert_eq!(
            validate_feed_url("http://localhost/feed", false),
            Err(UrlValidationError::Localhost)
        );
        assert_eq!(
            validate_feed_url("http://127.0.0.1/feed", false),
            Err(UrlValidationError::Localhost)
        );
        assert_eq!(
            validate_feed_url("http://[::1]/feed", false),
            Err(UrlValidationError::Localhost)
        );
    }

    #[test]
    fn test_private_ranges_rejected() {
        for url in [
            "http://192.168.1.1/feed",
            "http://10.0.0.1:3000/feed",
            "http://172.16.0.1/feed",
            "http://169.254.1.1/feed",
            "http://0.0.0.0/feed",
            "http://[fe80::1]/feed",
            "http://[fd00::1]/feed",
        ] {
            assert!(
                matches!(validate_feed_url(url, false), Err(UrlValidationError::PrivateIp(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn test_allow_private_opens_local_hosts() {
        assert!(validate_feed_url("http://localhost:8080/feed", true).is_ok());
        assert!(validate_feed_url("http://10.0.0.1/feed", true).is_ok());
    }

    #[test]
    fn test_unparseable_url() {
        assert!(matches!(
            validate_feed_url("not a url", false),
            Err(UrlValidationError::InvalidUrl(_))
        ));
    }
}
