//! Interface and method descriptors.
//!
//! - [`InterfaceDescriptor`] - The interface a connector is synthesized for
//! - [`MethodDescriptor`] - One HTTP call
//! - [`HttpVerb`] - HTTP verb enumeration

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::param::ParameterDescriptor;

/// HTTP verbs a method may be routed with.
///
/// Parsing is case-insensitive so route metadata may spell verbs either way.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use conduit_define::HttpVerb;
///
/// assert_eq!(HttpVerb::from_str("get").unwrap(), HttpVerb::Get);
/// assert_eq!(HttpVerb::Post.to_string(), "POST");
/// assert!(HttpVerb::from_str("FETCH").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpVerb {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
    /// HTTP TRACE - Echo the request
    Trace,
}

/// The interface a connector is synthesized for.
///
/// Built once per interface by the metadata layer and read-only afterwards.
///
/// ## Base Address
///
/// The connector's default base address is
/// `"http://" + service_host() + base_path`, computed once per interface.
/// At runtime it can be overridden through the `<client_name>.baseUrl`
/// property.
///
/// ## Examples
///
/// ```
/// use conduit_define::InterfaceDescriptor;
///
/// let billing = InterfaceDescriptor::new("Billing", "billing")
///     .with_service("billing.internal")
///     .with_base_path("/v2");
///
/// assert_eq!(billing.service_host(), "billing.internal");
/// assert_eq!(billing.base_path.as_deref(), Some("/v2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    /// Declared name of the source trait (e.g. `Orders`).
    ///
    /// The connector is named after it (`OrdersConnector`).
    pub name: String,
    /// Logical client name used for config keys and resilience naming.
    pub client_name: String,
    /// Host the default base address points at. Defaults to `client_name`.
    #[serde(default)]
    pub service: Option<String>,
    /// Optional type-level route template prepended to every method path.
    #[serde(default)]
    pub base_path: Option<String>,
    /// Use-paths the generated module needs to see the trait and user types.
    ///
    /// Example: `vec!["crate::orders::*".to_string()]`
    #[serde(default)]
    pub imports: Vec<String>,
    /// Human-readable description, rendered as the connector's doc comment.
    #[serde(default)]
    pub description: Option<String>,
    /// Methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl InterfaceDescriptor {
    pub fn new(name: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client_name: client_name.into(),
            service: None,
            base_path: None,
            imports: vec![],
            description: None,
            methods: vec![],
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Returns the host the default base address points at.
    pub fn service_host(&self) -> &str {
        self.service
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.client_name)
    }
}

/// One remote call.
///
/// ## Path Template
///
/// Paths may contain `{name}` placeholders. Each placeholder is expected to be
/// filled by a path-variable parameter, either by name or by position. The
/// correspondence is a precondition of the descriptor.
///
/// ## Examples
///
/// ```
/// use conduit_define::{MethodDescriptor, ParameterDescriptor};
///
/// let delete = MethodDescriptor::new("delete_order", "DELETE", "/{id}")
///     .with_param(ParameterDescriptor::path_variable("id", "u64", "id"));
///
/// assert!(delete.params[0].role.is_some());
/// assert_eq!(delete.returns, "()");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name as declared on the trait.
    pub name: String,
    /// HTTP verb as written in the route metadata.
    ///
    /// Kept as text so an unsupported verb is reported against its method
    /// during synthesis.
    pub verb: String,
    /// Path template relative to the interface base path. May be empty.
    #[serde(default)]
    pub path: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<ParameterDescriptor>,
    /// Declared return type, `()` for methods without a result.
    #[serde(default = "unit_type")]
    pub returns: String,
}

fn unit_type() -> String {
    "()".to_string()
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verb: verb.into(),
            path: path.into(),
            params: vec![],
            returns: unit_type(),
        }
    }

    pub fn with_param(mut self, param: ParameterDescriptor) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the declared return type.
    pub fn returning(mut self, returns: impl Into<String>) -> Self {
        self.returns = returns.into();
        self
    }
}
