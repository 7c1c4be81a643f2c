use url::Url;

/// Extracts the network location (`host[:port]`) of a URL, lowercased
///
/// The port is only present when it differs from the scheme's default, since
/// the `url` parser drops default ports.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use homepage_harvest::url::network_location;
///
/// let url = Url::parse("https://Example.TEST:8443/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.test:8443".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Parses a URL string and extracts its network location
///
/// Returns `None` for anything that does not parse or has no host.
pub fn network_location_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(network_location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_matches_bare_host() {
        assert_eq!(
            network_location_of("https://example.test:443/x"),
            network_location_of("https://example.test/")
        );
        assert_ne!(
            network_location_of("http://example.test:443/x"),
            network_location_of("http://example.test/")
        );
    }

    #[test]
    fn test_simple_host() {
        let url = Url::parse("https://example.test/").unwrap();
        assert_eq!(network_location(&url), Some("example.test".to_string()));
    }

    #[test]
    fn test_subdomain_kept() {
        let url = Url::parse("https://blog.example.test/post").unwrap();
        assert_eq!(network_location(&url), Some("blog.example.test".to_string()));
    }

    #[test]
    fn test_explicit_port_kept() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
    }

    #[test]
    fn test_uppercase_converted_to_lowercase() {
        let url = Url::parse("https://EXAMPLE.TEST/").unwrap();
        assert_eq!(network_location(&url), Some("example.test".to_string()));
    }

    #[test]
    fn test_of_malformed() {
        assert_eq!(network_location_of("not a url"), None);
        assert_eq!(network_location_of("https://"), None);
        assert_eq!(
            network_location_of("https://example.test/a?b#c"),
            Some("example.test".to_string())
        );
    }
}
