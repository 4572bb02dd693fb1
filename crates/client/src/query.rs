/// Query parameters for one page of the designer list.
///
/// Generates: `page=2&ordering=-email`
pub fn designer_page_query(page: u32, ordering: &str) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("ordering", ordering.to_string())]
}

/// Query parameters for the top-designers view: `limit=10`.
pub fn limit_query(limit: u32) -> Vec<(&'static str, String)> {
    vec![("limit", limit.to_string())]
}

/// Query parameters for the newest comments: `ordering=-date_created&limit=10`.
pub fn latest_comments_query(limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("ordering", "-date_created".to_string()),
        ("limit", limit.to_string()),
    ]
}

/// Render query parameters as a `?a=b&c=d` suffix for logging.
pub fn render(params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("?{}", pairs.join("&"))
}
