//! Pre-synthesis validation.
//!
//! Checks that would otherwise surface as confusing failures in the
//! generated code are run before anything is emitted.
//!
//! ## Validation Checks
//!
//! - **Names**: the interface and client names must not be blank
//! - **Method names**: each method name may appear only once per interface
//! - **Options**: the connector suffix must be alphanumeric and the scheme
//!   a valid URI scheme
//!
//! ## Examples
//!
//! ```
//! use conduit_define::InterfaceDescriptor;
//! use conduit_gen::validation::validate_interface;
//!
//! assert!(validate_interface(&InterfaceDescriptor::new("Orders", "orders-svc")).is_ok());
//! assert!(validate_interface(&InterfaceDescriptor::new("Orders", " ")).is_err());
//! ```

use std::collections::HashSet;

use conduit_define::InterfaceDescriptor;

use crate::errors::GeneratorError;
use crate::manifest::GeneratorOptions;

/// Validates an interface descriptor before synthesis.
///
/// ## Errors
///
/// Returns [`GeneratorError::BlankInterfaceName`] or
/// [`GeneratorError::BlankClientName`] for blank names, and
/// [`GeneratorError::InvalidIdentifier`] when a method name repeats.
pub fn validate_interface(iface: &InterfaceDescriptor) -> Result<(), GeneratorError> {
    if iface.name.trim().is_empty() {
        return Err(GeneratorError::BlankInterfaceName);
    }
    if iface.client_name.trim().is_empty() {
        return Err(GeneratorError::BlankClientName {
            interface: iface.name.clone(),
        });
    }

    let mut seen = HashSet::new();
    for method in &iface.methods {
        if !seen.insert(method.name.trim()) {
            return Err(GeneratorError::InvalidIdentifier {
                interface: iface.name.clone(),
                identifier: method.name.clone(),
                reason: "method is declared more than once".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates generator options.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidSuffix`] if the suffix is empty or not
/// alphanumeric, and [`GeneratorError::ConfigError`] for an invalid scheme.
pub fn validate_options(options: &GeneratorOptions) -> Result<(), GeneratorError> {
    if options.suffix.is_empty() {
        return Err(GeneratorError::InvalidSuffix {
            suffix: options.suffix.clone(),
            reason: "suffix cannot be empty".to_string(),
        });
    }
    if !options.suffix.chars().all(|c| c.is_alphanumeric()) {
        return Err(GeneratorError::InvalidSuffix {
            suffix: options.suffix.clone(),
            reason: "suffix must contain only alphanumeric characters (letters and numbers)"
                .to_string(),
        });
    }

    let mut scheme = options.scheme.chars();
    let valid_scheme = scheme.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return Err(GeneratorError::ConfigError(format!(
            "'{}' is not a valid URI scheme",
            options.scheme
        )));
    }

    Ok(())
}
