// Small shared helpers.

/// Ensure a user-supplied link has an explicit scheme.
///
/// Prepends `https://` unless the input already starts with `http://` or
/// `https://`. The rest of the string is not validated.
pub fn ensure_valid_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
