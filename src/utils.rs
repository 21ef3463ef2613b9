use url::Url;

/// Lowercased, trimmed form used for case-insensitive name matching
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive substring test on normalized names
pub fn name_contains(haystack: &str, needle: &str) -> bool {
    normalize_name(haystack).contains(&normalize_name(needle))
}

/// Resolves a possibly relative `href` against the page it was found on
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match base.join(href) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            ::log::debug!("Could not resolve link '{}' against {}: {}", href, base, e);
            None
        }
    }
}
