//! Parameter descriptors.
//!
//! A parameter's [`ParamRole`] comes straight from the route metadata the
//! metadata layer found on it. How a query parameter is expanded depends on
//! its declared type; [`TypeTraits`] lets the metadata layer vouch for
//! capabilities of user-defined types the synthesizer cannot see into.

use serde::{Deserialize, Serialize};

/// Where a parameter's value goes in the HTTP request.
///
/// ## Examples
///
/// ```
/// use conduit_define::ParamRole;
///
/// let role: ParamRole = serde_json::from_str(r#"{ "kind": "header", "name": "X-Trace" }"#).unwrap();
/// assert_eq!(role, ParamRole::Header { name: "X-Trace".to_string() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamRole {
    /// Expanded into the query string.
    Query {
        /// Query key; defaults to the parameter name.
        #[serde(default)]
        name: Option<String>,
    },
    /// Substituted into a `{placeholder}` of the path template.
    ///
    /// A non-blank `name` selects named substitution; otherwise `index`
    /// selects positional substitution.
    PathVariable {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },
    /// Sent as a request header.
    Header {
        /// Header name.
        name: String,
    },
    /// Sent as the request body.
    Body,
}

/// Capability flags for parameter types the synthesizer does not recognize.
///
/// Standard collections are recognized from the declared type; these flags
/// cover user-defined types (e.g. a newtype that derefs to a map).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeTraits {
    /// The type iterates as key/value entries.
    pub map: bool,
    /// The type is a fixed-size array or slice.
    pub array: bool,
    /// The type iterates as an ordered sequence of elements.
    pub iterable: bool,
}

/// One property of a bean-shaped query parameter.
///
/// ## Examples
///
/// ```
/// use conduit_define::PropertyDescriptor;
///
/// let status = PropertyDescriptor::new("status", "filter.status", "Option<String>");
/// assert_eq!(status.reader, "filter.status");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Query key the property is appended under.
    pub name: String,
    /// Rust expression reading the property from the parameter.
    pub reader: String,
    /// Declared type of `reader`. An `Option<_>` makes the append conditional.
    pub ty: String,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, reader: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reader: reader.into(),
            ty: ty.into(),
        }
    }
}

/// One method parameter.
///
/// ## Examples
///
/// ```
/// use conduit_define::{ParameterDescriptor, ParamRole, PropertyDescriptor};
///
/// let filter = ParameterDescriptor::query("filter", "OrderFilter")
///     .with_property(PropertyDescriptor::new("status", "filter.status", "Option<String>"))
///     .with_property(PropertyDescriptor::new("limit", "filter.limit", "u32"));
///
/// assert_eq!(filter.role, Some(ParamRole::Query { name: None }));
/// assert_eq!(filter.properties.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name as declared on the trait method.
    pub name: String,
    /// Declared Rust type (e.g. `Option<HashMap<String, String>>`).
    pub ty: String,
    /// Route role. `None` leaves the parameter out of the request.
    #[serde(default)]
    pub role: Option<ParamRole>,
    /// Capability flags for user-defined types.
    #[serde(default)]
    pub traits: TypeTraits,
    /// Properties expanded when the parameter is bean-shaped.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
}

impl ParameterDescriptor {
    /// Creates a parameter without a route role.
    pub fn passthrough(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            role: None,
            traits: TypeTraits::default(),
            properties: vec![],
        }
    }

    /// Creates a query parameter keyed by its own name.
    pub fn query(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::passthrough(name, ty).with_role(ParamRole::Query { name: None })
    }

    /// Creates a query parameter with an explicit query key.
    pub fn query_named(
        name: impl Into<String>,
        ty: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::passthrough(name, ty).with_role(ParamRole::Query {
            name: Some(key.into()),
        })
    }

    /// Creates a named path variable.
    pub fn path_variable(
        name: impl Into<String>,
        ty: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::passthrough(name, ty).with_role(ParamRole::PathVariable {
            name: Some(placeholder.into()),
            index: None,
        })
    }

    /// Creates a positional path variable.
    pub fn indexed_path_variable(
        name: impl Into<String>,
        ty: impl Into<String>,
        index: usize,
    ) -> Self {
        Self::passthrough(name, ty).with_role(ParamRole::PathVariable {
            name: None,
            index: Some(index),
        })
    }

    pub fn header(
        name: impl Into<String>,
        ty: impl Into<String>,
        header: impl Into<String>,
    ) -> Self {
        Self::passthrough(name, ty).with_role(ParamRole::Header {
            name: header.into(),
        })
    }

    pub fn body(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::passthrough(name, ty).with_role(ParamRole::Body)
    }

    pub fn with_role(mut self, role: ParamRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_traits(mut self, traits: TypeTraits) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_assign_roles() {
        assert_eq!(ParameterDescriptor::passthrough("ctx", "Context").role, None);
        assert_eq!(
            ParameterDescriptor::query_named("page", "u32", "p").role,
            Some(ParamRole::Query {
                name: Some("p".to_string())
            })
        );
        assert_eq!(
            ParameterDescriptor::indexed_path_variable("slot", "u8", 1).role,
            Some(ParamRole::PathVariable {
                name: None,
                index: Some(1)
            })
        );
        assert_eq!(
            ParameterDescriptor::body("order", "NewOrder").role,
            Some(ParamRole::Body)
        );
    }

    #[test]
    fn role_serializes_with_kind_tag() {
        let json = serde_json::to_string(&ParamRole::Body).unwrap();
        assert_eq!(json, r#"{"kind":"body"}"#);

        let role: ParamRole =
            serde_json::from_str(r#"{"kind":"path_variable","index":0}"#).unwrap();
        assert_eq!(
            role,
            ParamRole::PathVariable {
                name: None,
                index: Some(0)
            }
        );
    }

    #[test]
    fn traits_default_when_absent() {
        let param: ParameterDescriptor =
            serde_json::from_str(r#"{"name":"filters","ty":"Filters","traits":{"map":true}}"#)
                .unwrap();
        assert!(param.traits.map);
        assert!(!param.traits.iterable);
        assert!(param.properties.is_empty());
    }
}
