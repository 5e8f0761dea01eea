use url::Url;

/// Parses a target URL for analysis. Only absolute URLs are accepted.
pub fn parse_target_url(input: &str) -> Option<Url> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Url::parse(input).ok()
}

/// Validates that a presented API key is not blank.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
