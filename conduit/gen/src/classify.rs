//! Parameter classification.
//!
//! Every method parameter is classified exactly once, before any code is
//! emitted. The route role comes from the metadata; the query shape is
//! derived from the declared type.

use conduit_define::{ParamRole, ParameterDescriptor};
use proc_macro2::Ident;
use syn::{Expr, Type};

use crate::naming;
use crate::types::{DeclaredType, Shape};

/// A metadata problem attributed to one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataIssue {
    pub parameter: String,
    pub reason: String,
}

impl MetadataIssue {
    pub fn new(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// A parameter as it appears in the signature, with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedParam {
    /// Name as declared in the descriptor.
    pub name: String,
    pub ident: Ident,
    pub ty: Type,
    pub class: ParamClass,
}

impl ClassifiedParam {
    /// Parses and classifies a parameter descriptor.
    ///
    /// ## Errors
    ///
    /// Returns a [`MetadataIssue`] naming the parameter when its name, type
    /// or role metadata is unusable.
    pub fn from_descriptor(param: &ParameterDescriptor) -> Result<Self, MetadataIssue> {
        let issue = |reason: String| MetadataIssue::new(param.name.trim(), reason);
        let ident = naming::ident(&param.name).map_err(issue)?;
        let ty = crate::types::parse_type(&param.ty).map_err(|e| issue(format!("invalid type: {e}")))?;
        let class = classify(param).map_err(issue)?;
        Ok(Self {
            name: param.name.trim().to_string(),
            ident,
            ty,
            class,
        })
    }
}

/// A parameter with its role and, for query parameters, its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamClass {
    /// No route role; the parameter is accepted but not sent.
    Passthrough,
    /// Folded into the query string.
    Query(QueryParam),
    /// Substituted into the template by placeholder name.
    NamedPathVariable { placeholder: String },
    /// Substituted into the template by position.
    PositionalPathVariable { index: usize },
    /// Sent as a request header.
    Header { name: String },
    /// Sent as the request body, typed with the declared type.
    Body { ty: Type },
}

/// A query parameter ready for expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParam {
    /// Query key for map-less shapes.
    pub key: String,
    pub shape: Shape,
    pub declared: DeclaredType,
    /// Properties appended for bean and scalar shapes.
    pub properties: Vec<QueryProperty>,
}

/// One independently guarded query append of a bean.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryProperty {
    pub key: String,
    pub reader: Expr,
    pub declared: DeclaredType,
}

/// Classifies one parameter.
///
/// ## Errors
///
/// Returns a reason string when the metadata is malformed: a path variable
/// with neither a name nor a position, a blank header name, or a type or
/// reader expression that does not parse.
///
/// ## Examples
///
/// ```
/// use conduit_define::ParameterDescriptor;
/// use conduit_gen::classify::{classify, ParamClass};
/// use conduit_gen::types::Shape;
///
/// let class = classify(&ParameterDescriptor::query("filters", "Option<HashMap<String, String>>")).unwrap();
/// let ParamClass::Query(query) = class else { panic!("expected a query parameter") };
/// assert_eq!(query.shape, Shape::Map);
/// assert!(query.declared.nullable);
/// ```
pub fn classify(param: &ParameterDescriptor) -> Result<ParamClass, String> {
    let Some(role) = &param.role else {
        return Ok(ParamClass::Passthrough);
    };

    match role {
        ParamRole::PathVariable { name, index } => {
            match (name.as_deref().map(str::trim).filter(|n| !n.is_empty()), index) {
                (Some(placeholder), _) => Ok(ParamClass::NamedPathVariable {
                    placeholder: placeholder.to_string(),
                }),
                (None, Some(index)) => Ok(ParamClass::PositionalPathVariable { index: *index }),
                (None, None) => Err("path variable has neither a name nor a position".to_string()),
            }
        }
        ParamRole::Header { name } => {
            if name.trim().is_empty() {
                return Err("header name is blank".to_string());
            }
            Ok(ParamClass::Header {
                name: name.trim().to_string(),
            })
        }
        ParamRole::Body => {
            let declared = DeclaredType::parse(&param.ty).map_err(|e| format!("invalid type: {e}"))?;
            Ok(ParamClass::Body { ty: declared.ty })
        }
        ParamRole::Query { name } => classify_query(param, name.as_deref()).map(ParamClass::Query),
    }
}

fn classify_query(param: &ParameterDescriptor, key: Option<&str>) -> Result<QueryParam, String> {
    let key = key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .unwrap_or(param.name.trim())
        .to_string();
    let declared = DeclaredType::parse(&param.ty).map_err(|e| format!("invalid type: {e}"))?;
    let shape = declared.shape(param.traits);

    let properties = match shape {
        Shape::Scalar => {
            let ident = naming::ident(&param.name)?;
            let reader: Expr = syn::parse_quote!(#ident);
            vec![QueryProperty {
                key: key.clone(),
                reader,
                declared: declared.clone(),
            }]
        }
        Shape::Bean => param
            .properties
            .iter()
            .map(|property| {
                let reader = syn::parse_str::<Expr>(&property.reader).map_err(|e| {
                    format!("invalid reader '{}' for property '{}': {e}", property.reader, property.name)
                })?;
                let declared = DeclaredType::parse(&property.ty)
                    .map_err(|e| format!("invalid type for property '{}': {e}", property.name))?;
                Ok(QueryProperty {
                    key: property.name.trim().to_string(),
                    reader,
                    declared,
                })
            })
            .collect::<Result<Vec<_>, String>>()?,
        Shape::Map | Shape::Array | Shape::Collection => vec![],
    };

    if shape == Shape::Bean && properties.is_empty() {
        tracing::warn!(
            parameter = %param.name,
            ty = %param.ty,
            "bean query parameter declares no properties; it contributes nothing"
        );
    }

    Ok(QueryParam {
        key,
        shape,
        declared,
        properties,
    })
}
