//! URI assembly statements.
//!
//! A method's URI is built in three steps:
//!
//! 1. Seed the builder with the base address joined with the method path
//! 2. Fold in every query parameter, in declaration order, by shape
//! 3. Declare named and positional path variables for the final expansion
//!
//! ## Guards
//!
//! Map, array and collection parameters are guarded by a null check on the
//! parameter itself. Bean parameters are not; each property append is
//! guarded by a null check on its own reader expression instead.

use proc_macro2::Ident;
use quote::format_ident;
use syn::Expr;

use crate::classify::{ClassifiedParam, MetadataIssue, ParamClass, QueryParam, QueryProperty};
use crate::ir::{Guard, QueryAppend, Stmt};
use crate::types::Shape;

/// Statements contributed by URI assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct UriStatements {
    /// Builder seed, query appends and variable declarations.
    pub prelude: Vec<Stmt>,
    /// Final expansion, emitted after the envelope.
    pub resolve: Stmt,
}

/// Emits the URI statements of one method.
///
/// ## Errors
///
/// Returns a [`MetadataIssue`] if positional indices are duplicated or do
/// not run contiguously from zero.
pub fn emit_uri(path: &str, params: &[ClassifiedParam]) -> Result<UriStatements, MetadataIssue> {
    let mut queries = Vec::new();
    let mut named = Vec::new();
    let mut positional = Vec::new();

    for param in params {
        match &param.class {
            ParamClass::Query(query) => queries.extend(query_statements(&param.ident, query)),
            ParamClass::NamedPathVariable { placeholder } => {
                named.push((placeholder.clone(), param.ident.clone()));
            }
            ParamClass::PositionalPathVariable { index } => {
                positional.push((*index, param));
            }
            _ => {}
        }
    }

    let positional = order_positional(positional)?;
    let appends = queries.iter().any(Stmt::appends_query);

    let mut prelude = vec![Stmt::InitBuilder {
        path: path.to_string(),
        mutable: appends || !named.is_empty(),
    }];
    prelude.extend(queries);

    let resolve = Stmt::ResolveUri {
        named: !named.is_empty(),
        positional: !positional.is_empty(),
    };
    if !named.is_empty() {
        prelude.push(Stmt::NamedVariables(named));
    }
    if !positional.is_empty() {
        prelude.push(Stmt::PositionalVariables(positional));
    }

    Ok(UriStatements { prelude, resolve })
}

/// Emits the guarded appends of one query parameter.
pub fn query_statements(ident: &Ident, query: &QueryParam) -> Vec<Stmt> {
    let append = match query.shape {
        Shape::Map => QueryAppend::Entries {
            source: ident.clone(),
        },
        Shape::Array => QueryAppend::Values {
            key: query.key.clone(),
            source: ident.clone(),
        },
        Shape::Collection => QueryAppend::Each {
            key: query.key.clone(),
            source: ident.clone(),
        },
        Shape::Scalar | Shape::Bean => {
            return query.properties.iter().map(property_statement).collect();
        }
    };

    let source: Expr = syn::parse_quote!(#ident);
    let refs = query.declared.refs;
    let guard = if query.declared.nullable {
        Guard::Present {
            binding: ident.clone(),
            source,
            refs,
        }
    } else {
        Guard::Always {
            binding: ident.clone(),
            source,
            refs,
        }
    };
    vec![Stmt::Guarded {
        guard,
        body: vec![Stmt::Query(append)],
    }]
}

fn property_statement(property: &QueryProperty) -> Stmt {
    let reader = receiver(&property.reader);
    if property.declared.nullable {
        let binding = format_ident!("value");
        Stmt::Guarded {
            guard: Guard::Present {
                binding: binding.clone(),
                source: reader,
                refs: 0,
            },
            body: vec![Stmt::Query(QueryAppend::Single {
                key: property.key.clone(),
                value: syn::parse_quote!(#binding),
            })],
        }
    } else {
        Stmt::Query(QueryAppend::Single {
            key: property.key.clone(),
            value: syn::parse_quote!(&#reader),
        })
    }
}

/// Wraps `expr` in parentheses unless it already binds tighter than a
/// method call or a reference.
pub fn receiver(expr: &Expr) -> Expr {
    match expr {
        Expr::Path(_)
        | Expr::Field(_)
        | Expr::MethodCall(_)
        | Expr::Call(_)
        | Expr::Index(_)
        | Expr::Paren(_)
        | Expr::Lit(_) => expr.clone(),
        _ => syn::parse_quote!((#expr)),
    }
}

fn order_positional(
    mut positional: Vec<(usize, &ClassifiedParam)>,
) -> Result<Vec<Ident>, MetadataIssue> {
    positional.sort_by_key(|(index, _)| *index);
    for (expected, (index, param)) in positional.iter().enumerate() {
        if *index + 1 == expected {
            return Err(MetadataIssue::new(
                &param.name,
                format!("path variable position {index} is used more than once"),
            ));
        }
        if *index != expected {
            return Err(MetadataIssue::new(
                &param.name,
                format!("path variable position {index} leaves position {expected} unfilled"),
            ));
        }
    }
    Ok(positional
        .into_iter()
        .map(|(_, param)| param.ident.clone())
        .collect())
}
