//! Endpoint templating for the breed image API.

/// Default API root; the breed endpoint hangs off it.
pub const DEFAULT_BASE_URL: &str = "https://dog.ceo/api";

/// Build `<base>/breed/<breed>/images/random`.
///
/// The breed is substituted verbatim. Characters that are not valid in a URL
/// path are not escaped here; the HTTP client either normalizes them or
/// rejects the URL as a transport failure.
pub fn breed_image_url(base: &str, breed: &str) -> String {
    format!(
        "{}/breed/{}/images/random",
        base.trim_end_matches('/'),
        breed
    )
}
