/// Convert a display name into its URL slug
///
/// Lowercases, collapses whitespace runs into a single hyphen and drops
/// apostrophes, so `"Coeur d'Alene"` becomes `"coeur-dalene"`.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.replace('\'', "").to_lowercase())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Rebuild a display name from a slug by title-casing each hyphen part
///
/// `"san-antonio"` becomes `"San Antonio"`.
pub fn title_case(segment: &str) -> String {
    segment
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a path segment names the given city
///
/// Matches either the slugified city name or the title-cased reconstruction
/// of the segment, both case-insensitively.
#[inline]
pub fn city_matches(city_name: &str, segment: &str) -> bool {
    let segment = segment.trim().to_lowercase();
    if segment.is_empty() {
        return false;
    }

    slugify(city_name) == segment || city_name.to_lowercase() == title_case(&segment).to_lowercase()
}

/// Canonical form of a request path
///
/// Query string and fragment are ignored. Trailing slashes are removed except
/// for the root path.
pub fn canonical_path(path: &str) -> String {
    let path = path
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .trim();

    if path.is_empty() || path.chars().all(|c| c == '/') {
        return "/".to_string();
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
