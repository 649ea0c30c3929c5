//! Image URL resolution. Pure string work, no I/O.

/// Local asset shown when an image URL is absent.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.jpg";

/// Route `image_url` through the backend image proxy: `{api_base}/images?url=<encoded>`.
///
/// Absolute and relative URLs are both proxied; the backend resolves relative ones.
///
/// ```rust
/// use client::utils::image_url::proxied_image_url;
///
/// assert_eq!(
///     proxied_image_url("http://127.0.0.1:3000", Some("http://ext.example/x.jpg")),
///     "http://127.0.0.1:3000/images?url=http%3A%2F%2Fext.example%2Fx.jpg"
/// );
/// assert_eq!(proxied_image_url("http://127.0.0.1:3000", None), "/placeholder-image.jpg");
/// ```
pub fn proxied_image_url(api_base: &str, image_url: Option<&str>) -> String {
    match image_url.filter(|url| !url.is_empty()) {
        Some(url) => format!(
            "{}/images?url={}",
            api_base.trim_end_matches('/'),
            encode_component(url)
        ),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Marks `encodeURIComponent` leaves unescaped but `urlencoding` escapes.
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

/// Percent-encode a query value the way the backend's browser clients do.
///
/// A literal `%` is encoded as `%25` first, so restoring the marks cannot touch input text.
fn encode_component(raw: &str) -> String {
    UNRESERVED_MARKS
        .iter()
        .fold(urlencoding::encode(raw).into_owned(), |encoded, (escaped, mark)| {
            encoded.replace(escaped, mark)
        })
}

/// Use `image_url` as-is, bypassing the proxy.
pub fn direct_image_url(image_url: Option<&str>) -> String {
    match image_url.filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Proxied or direct depending on `direct`.
pub fn resolve_image_url(api_base: &str, image_url: Option<&str>, direct: bool) -> String {
    if direct {
        direct_image_url(image_url)
    } else {
        proxied_image_url(api_base, image_url)
    }
}
