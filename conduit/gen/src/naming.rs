//! Names derived from interface descriptors.
//!
//! ## Derivation Rules
//!
//! - Connector: interface name plus suffix (`Orders` -> `OrdersConnector`)
//! - Service name: connector name with a lower-cased first letter
//!   (`ordersConnector`)
//! - Module file: snake case of the interface name (`OrderHistory` ->
//!   `order_history`)

use heck::ToSnakeCase;
use proc_macro2::{Ident, Span};

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Returns the connector type name for an interface.
pub fn connector_name(interface: &str, suffix: &str) -> String {
    format!("{}{}", interface.trim(), suffix)
}

/// Returns the registration name of a connector.
///
/// ## Examples
///
/// ```
/// use conduit_gen::naming::service_name;
///
/// assert_eq!(service_name("OrdersConnector"), "ordersConnector");
/// assert_eq!(service_name(""), "");
/// ```
pub fn service_name(connector: &str) -> String {
    let mut chars = connector.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the module name a connector is written to.
///
/// ## Examples
///
/// ```
/// use conduit_gen::naming::module_name;
///
/// assert_eq!(module_name("Orders"), "orders");
/// assert_eq!(module_name("OrderHistory"), "order_history");
/// ```
pub fn module_name(interface: &str) -> String {
    interface.trim().to_snake_case()
}

/// Parses a descriptor name into an identifier.
///
/// Keywords such as `type` become raw identifiers (`r#type`).
///
/// ## Errors
///
/// Returns a reason string if `name` cannot be an identifier at all.
pub fn ident(name: &str) -> Result<Ident, String> {
    let name = name.trim();
    if let Ok(ident) = syn::parse_str::<Ident>(name) {
        return Ok(ident);
    }

    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic());
    if !starts_well || !chars.all(|c| c == '_' || c.is_alphanumeric()) {
        return Err(format!("'{name}' is not a valid identifier"));
    }
    if NON_RAW_KEYWORDS.contains(&name) {
        return Err(format!("'{name}' is a reserved word"));
    }
    Ok(Ident::new_raw(name, Span::call_site()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connector_name_appends_suffix() {
        assert_eq!(connector_name("Orders", "Connector"), "OrdersConnector");
        assert_eq!(connector_name(" Billing ", "Client"), "BillingClient");
    }

    #[test]
    fn service_name_handles_acronyms() {
        assert_eq!(service_name("HTTPConnector"), "hTTPConnector");
    }

    #[test]
    fn ident_accepts_plain_names() {
        assert_eq!(ident("orderId").unwrap().to_string(), "orderId");
        assert_eq!(ident(" page ").unwrap().to_string(), "page");
    }

    #[test]
    fn ident_escapes_keywords() {
        assert_eq!(ident("type").unwrap().to_string(), "r#type");
        assert_eq!(ident("match").unwrap().to_string(), "r#match");
    }

    #[test]
    fn ident_rejects_invalid_names() {
        assert!(ident("").is_err());
        assert!(ident("order-id").is_err());
        assert!(ident("1st").is_err());
        assert!(ident("self").is_err());
    }
}
