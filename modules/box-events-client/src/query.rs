/// Append query parameters to a base URL: first pair prefixed with `?`,
/// the rest joined with `&`. Pair order is preserved, which is why this
/// takes a slice rather than a map.
pub fn append_query_params(url: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    format!("{url}?{}", query.join("&"))
}
