//! Conduit connector synthesizer.
//!
//! This crate turns interface descriptors from `conduit-define` into Rust
//! source for concrete HTTP connectors. A generated connector implements the
//! described trait by building a URI, a header set and a body envelope, then
//! handing them to a `conduit::Transport` with a reified response type.
//!
//! ## Modules
//!
//! - [`classify`] - Assigns each parameter its role and query shape
//! - [`codegen`] - Emitters for URI assembly, envelopes, dispatch and the connector shell
//! - [`ir`] - Method-body statements as data
//! - [`synth`] - Per-interface synthesis driver
//! - [`output`] - Validation, formatting and atomic file writing
//! - [`manifest`] - YAML/JSON manifests and generator options
//! - [`parser`] - Path template utilities
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use conduit_gen::manifest::Manifest;
//! use conduit_gen::output::generate_and_write_all;
//!
//! let manifest = Manifest::load(Path::new("connectors.yaml")).unwrap();
//! let files = generate_and_write_all(
//!     &manifest.interfaces,
//!     &manifest.options,
//!     Path::new("generated/src"),
//!     false,
//! )
//! .unwrap();
//! println!("wrote {} files", files.len());
//! ```
//!
//! ## Generated Code Structure
//!
//! For an interface `Orders` (client `orders-svc`, base path `/orders`) with
//! `GET /{orderId}` returning `Order`:
//!
//! ```text
//! pub struct OrdersConnector<T> { rest_template: Arc<T>, base_url: String }
//!
//! impl<T: ::conduit::Transport> Orders for OrdersConnector<T> {
//!     fn get_order(&self, orderId: i64) -> ::conduit::Result<Order> {
//!         let mut builder = ::conduit::UriBuilder::from_uri_string(
//!             format!("{}{}", self.base_url, "/{orderId}"),
//!         );
//!         let mut uri_variables = HashMap::<&'static str, String>::new();
//!         uri_variables.insert("orderId", ToString::to_string(&orderId));
//!         let headers = ::conduit::HttpHeaders::new();
//!         let http_entity = ::conduit::HttpEntity::<()>::new(None, headers);
//!         let uri = builder.uri_variables(&uri_variables).build()?.to_uri()?;
//!         Ok(self.rest_template
//!             .exchange(uri, ::conduit::HttpMethod::Get, http_entity, &Self::ORDER)?
//!             .into_body())
//!     }
//! }
//!
//! impl<T> OrdersConnector<T> {
//!     pub const ORDER: ::conduit::TypeToken<Order> = ::conduit::TypeToken::new();
//! }
//! ```

pub mod classify;
pub mod codegen;
pub mod errors;
pub mod ir;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod parser;
pub mod synth;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
