//! Path template utilities.
//!
//! Templates use `{name}` placeholders, optionally with a `{name:pattern}`
//! constraint that is ignored here.

/// Extracts placeholder names from a path template in order of appearance.
///
/// ## Examples
///
/// ```
/// use conduit_gen::parser::extract_path_params;
///
/// assert_eq!(extract_path_params("/orders"), vec![] as Vec<&str>);
/// assert_eq!(extract_path_params("/orders/{orderId}"), vec!["orderId"]);
/// assert_eq!(
///     extract_path_params("/users/{user}/orders/{id:\\d+}"),
///     vec!["user", "id"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut pos = 0;

    for (idx, c) in path.char_indices() {
        if c == '{' {
            pos = idx + 1; // Start after '{'
        } else if c == '}' && pos > 0 {
            let inner = &path[pos..idx];
            let param = inner.split(':').next().unwrap_or(inner).trim();
            if !param.is_empty() {
                params.push(param);
            }
            pos = 0;
        }
    }

    params
}

/// Normalizes a type-level base path.
///
/// Blank paths become empty; otherwise the result has exactly one leading
/// slash and no trailing slash.
///
/// ## Examples
///
/// ```
/// use conduit_gen::parser::normalize_base_path;
///
/// assert_eq!(normalize_base_path(Some("orders/")), "/orders");
/// assert_eq!(normalize_base_path(Some("/")), "");
/// assert_eq!(normalize_base_path(None), "");
/// ```
pub fn normalize_base_path(path: Option<&str>) -> String {
    let trimmed = path.unwrap_or_default().trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Normalizes a method path so it can be appended to a base address.
///
/// Non-empty paths gain a leading slash; trailing slashes are kept since
/// they can be significant to the remote service.
///
/// ## Examples
///
/// ```
/// use conduit_gen::parser::normalize_method_path;
///
/// assert_eq!(normalize_method_path("{orderId}"), "/{orderId}");
/// assert_eq!(normalize_method_path("/items/"), "/items/");
/// assert_eq!(normalize_method_path("  "), "");
/// ```
pub fn normalize_method_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Builds the default base address of an interface.
///
/// ## Examples
///
/// ```
/// use conduit_gen::parser::base_address;
///
/// assert_eq!(base_address("http", "orders-svc", Some("/orders")), "http://orders-svc/orders");
/// assert_eq!(base_address("https", "billing", None), "https://billing");
/// ```
pub fn base_address(scheme: &str, host: &str, base_path: Option<&str>) -> String {
    format!(
        "{}://{}{}",
        scheme,
        host.trim().trim_end_matches('/'),
        normalize_base_path(base_path)
    )
}
