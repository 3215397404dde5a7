//! External configuration lookup for generated connectors.
//!
//! Keys use the dotted form emitted by the generator, for example
//! `orders-svc.baseUrl`. A value is looked up in the environment first under
//! the exact key, then under its relaxed form (`ORDERS_SVC_BASEURL`), which is
//! the spelling shells can export.

/// Converts a dotted property key into an environment variable name.
///
/// ## Examples
///
/// ```
/// use conduit::property::relaxed_name;
///
/// assert_eq!(relaxed_name("orders-svc.baseUrl"), "ORDERS_SVC_BASEURL");
/// ```
pub fn relaxed_name(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Looks up a configured property value.
pub fn property(key: &str) -> Option<String> {
    let value = std::env::var(key)
        .ok()
        .or_else(|| std::env::var(relaxed_name(key)).ok());
    if value.is_some() {
        tracing::debug!(key, "resolved configured property");
    }
    value
}
