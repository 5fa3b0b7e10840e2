//! Small string helpers used when presenting profiles.

/// Host that serves avatar images referenced by bare tokens.
pub const IMAGE_BASE_URL: &str = "https://dummyjson.com/docs/image/";

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Builds an image URL from a token.
///
/// Absolute http(s) URLs are returned unchanged; anything else is appended
/// to [`IMAGE_BASE_URL`].
pub fn construct_image_url(url_token: &str) -> String {
    if url_token.starts_with("http://") || url_token.starts_with("https://") {
        return url_token.to_string();
    }

    format!("{}{}", IMAGE_BASE_URL, url_token)
}
