//! Conduit Definition Library
//!
//! This crate provides the descriptor types a metadata layer fills in to
//! describe a remote-procedure interface. The descriptors are consumed by the
//! `conduit-gen` synthesizer, which emits a concrete HTTP connector for each
//! interface.
//!
//! ## Core Types
//!
//! - [`InterfaceDescriptor`] - One interface: trait name, client name, base path, methods
//! - [`MethodDescriptor`] - One remote call: verb, path template, parameters, return type
//! - [`HttpVerb`] - The HTTP verbs a method may declare
//! - [`ParameterDescriptor`] - One method parameter and its declared type
//! - [`ParamRole`] - Where a parameter goes: path, query, header or body
//! - [`PropertyDescriptor`] - A bean property expanded into the query string
//! - [`TypeTraits`] - Capability flags for user-defined parameter types
//!
//! ## Examples
//!
//! ```
//! use conduit_define::{InterfaceDescriptor, MethodDescriptor, ParameterDescriptor};
//!
//! let orders = InterfaceDescriptor::new("Orders", "orders-svc")
//!     .with_base_path("/orders")
//!     .with_method(
//!         MethodDescriptor::new("get_order", "GET", "/{orderId}")
//!             .with_param(ParameterDescriptor::path_variable("orderId", "i64", "orderId"))
//!             .returning("Order"),
//!     );
//!
//! assert_eq!(orders.methods.len(), 1);
//! assert_eq!(orders.service_host(), "orders-svc");
//! ```
//!
//! Descriptors are plain serde types, so a metadata layer can also hand them
//! over as YAML or JSON.

pub mod param;
pub mod prelude;
pub mod types;

pub use param::{ParamRole, ParameterDescriptor, PropertyDescriptor, TypeTraits};
pub use types::{HttpVerb, InterfaceDescriptor, MethodDescriptor};
