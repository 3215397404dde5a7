//! Convenient re-exports for building interface descriptors.
//!
//! ## Examples
//!
//! ```
//! use conduit_define::prelude::*;
//!
//! let catalog = InterfaceDescriptor::new("Catalog", "catalog")
//!     .with_method(
//!         MethodDescriptor::new("search", "GET", "/items")
//!             .with_param(ParameterDescriptor::query("tags", "Vec<String>"))
//!             .returning("Vec<Item>"),
//!     );
//! assert_eq!(catalog.methods[0].verb, "GET");
//! ```

pub use crate::param::{ParamRole, ParameterDescriptor, PropertyDescriptor, TypeTraits};
pub use crate::types::{HttpVerb, InterfaceDescriptor, MethodDescriptor};
