use std::collections::HashMap;

/// Parse query parameters from a page location such as `/post.html?id=12`.
///
/// Values are percent-decoded, and `+` is read as a space the way browsers submit forms.
/// When a key repeats, the last value wins.
///
/// # Example
/// ```
/// use feedr::core::query_params::parse_query_params;
///
/// let params = parse_query_params("/profile.html?name=ola%20nordmann&tab=posts");
/// assert_eq!(params.get("name"), Some(&"ola nordmann".to_string()));
/// assert_eq!(params.get("tab"), Some(&"posts".to_string()));
/// ```
pub fn parse_query_params(location: &str) -> HashMap<String, String> {
    match location.find('?') {
        Some(query_start) => parse_pairs(&location[query_start + 1..]),
        None => HashMap::new(),
    }
}

fn parse_pairs(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let query = query.split('#').next().unwrap_or_default();

    for param in query.split('&').filter(|p| !p.is_empty()) {
        match param.find('=') {
            Some(eq_idx) => {
                params.insert(decode(&param[..eq_idx]), decode(&param[eq_idx + 1..]));
            }
            None => {
                // Flag parameter without value
                params.insert(decode(param), String::new());
            }
        }
    }

    params
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|v| v.into_owned())
        .unwrap_or(spaced)
}

/// Get a non-blank string parameter, falling back to `default`.
pub fn get_string(params: &HashMap<String, String>, key: &str, default: Option<&str>) -> Option<String> {
    params
        .get(key)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .or(default)
        .map(str::to_string)
}
