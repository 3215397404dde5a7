//! Error types for the connector synthesizer.

use thiserror::Error;

/// Errors that can occur while synthesizing or writing connectors.
///
/// Synthesis errors abort the whole interface they were raised for; no
/// partial connector is emitted.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The interface descriptor has a blank name.
    #[error("Interface descriptor has a blank name")]
    BlankInterfaceName,

    /// The interface descriptor has a blank client name.
    ///
    /// The client name keys the base-address property and the circuit
    /// breaker, so a connector cannot be emitted without one.
    #[error("Interface '{interface}' has a blank client name")]
    BlankClientName { interface: String },

    /// A method's route metadata names a verb outside [`conduit_define::HttpVerb`].
    #[error("Unsupported HTTP verb '{verb}' on {interface}::{method}")]
    UnsupportedVerb {
        interface: String,
        method: String,
        verb: String,
    },

    /// A parameter's metadata cannot be turned into a request fragment.
    ///
    /// Covers path variables with neither name nor position, duplicate or
    /// gapped positions, blank header names, and unparseable types or
    /// reader expressions.
    #[error("Malformed metadata on {interface}::{method} parameter '{parameter}': {reason}")]
    MalformedMetadata {
        interface: String,
        method: String,
        parameter: String,
        reason: String,
    },

    /// A method's declared return type does not parse as a Rust type.
    #[error("Invalid return type '{ty}' on {interface}::{method}: {reason}")]
    InvalidReturnType {
        interface: String,
        method: String,
        ty: String,
        reason: String,
    },

    /// A name from the descriptor is not usable as a Rust identifier.
    #[error("Invalid identifier '{identifier}' in interface '{interface}': {reason}")]
    InvalidIdentifier {
        interface: String,
        identifier: String,
        reason: String,
    },

    /// Invalid connector suffix configuration.
    ///
    /// The suffix must be alphanumeric (letters and numbers only) to keep
    /// the connector name a valid Rust identifier.
    #[error("Invalid connector suffix '{suffix}': {reason}")]
    InvalidSuffix {
        /// The invalid suffix value.
        suffix: String,
        /// Explanation of why the suffix is invalid.
        reason: String,
    },

    /// Invalid generator configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to parse the manifest.
    #[error("Failed to parse manifest '{path}': {message}")]
    ManifestError { path: String, message: String },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_verb_names_interface_and_method() {
        let err = GeneratorError::UnsupportedVerb {
            interface: "Orders".to_string(),
            method: "get_order".to_string(),
            verb: "FETCH".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported HTTP verb 'FETCH' on Orders::get_order"
        );
    }

    #[test]
    fn malformed_metadata_names_parameter() {
        let err = GeneratorError::MalformedMetadata {
            interface: "Orders".to_string(),
            method: "get_order".to_string(),
            parameter: "orderId".to_string(),
            reason: "path variable has neither a name nor a position".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Orders::get_order"));
        assert!(message.contains("'orderId'"));
    }
}
