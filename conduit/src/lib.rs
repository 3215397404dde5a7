//! Runtime vocabulary for generated HTTP connectors.
//!
//! Connectors produced by `conduit-gen` do not talk to the network directly.
//! They assemble a URI, a header set and a body envelope, then hand all of it
//! to a [`Transport`] together with a [`TypeToken`] describing the decoded
//! response type. This crate defines those pieces.
//!
//! ## Features
//!
//! - **URI assembly**: [`UriBuilder`] folds query parameters into a path
//!   template and resolves `{name}` placeholders by name and by position
//! - **Envelopes**: [`HttpHeaders`], [`HttpEntity`] and [`ResponseEntity`]
//! - **Reified response types**: [`TypeToken`] carries the full response type
//!   to the transport as a value
//! - **Metadata**: [`CircuitBreaker`] and [`Service`] expose the names that
//!   resilience wrappers and registries key on
//! - **Configuration**: [`property`] resolves externally configured values
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use conduit::UriBuilder;
//!
//! let mut builder = UriBuilder::from_uri_string("http://orders-svc/orders/{orderId}");
//! builder.query_param("expand", "lines");
//!
//! let mut uri_variables = HashMap::new();
//! uri_variables.insert("orderId", 42.to_string());
//!
//! let uri = builder.uri_variables(&uri_variables).build().unwrap().to_uri().unwrap();
//! assert_eq!(uri.as_str(), "http://orders-svc/orders/42?expand=lines");
//! ```

pub mod assert;
pub mod entity;
pub mod error;
pub mod metadata;
pub mod method;
pub mod property;
pub mod token;
pub mod transport;
pub mod uri;

pub use entity::{HttpEntity, HttpHeaders, ResponseEntity};
pub use error::{Error, Result};
pub use metadata::{CircuitBreaker, Service};
pub use method::HttpMethod;
pub use property::property;
pub use token::TypeToken;
pub use transport::Transport;
pub use uri::{UriBuilder, UriComponents};
pub use url::Url;
