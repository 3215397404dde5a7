//! Intermediate representation of connector method bodies.
//!
//! Emitters build [`Stmt`] lists; [`crate::codegen::render`] turns them into
//! tokens. Guard placement and statement order are decided while the list is
//! built, so the renderer never reorders or drops anything.

use conduit_define::HttpVerb;
use proc_macro2::Ident;
use syn::{Expr, Type};

/// One trait method implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodBody {
    pub name: Ident,
    /// Parameters in declaration order, as they appear in the signature.
    pub params: Vec<Param>,
    /// Declared return type; `()` for void methods.
    pub returns: Type,
    pub statements: Vec<Stmt>,
}

/// A signature parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ident: Ident,
    pub ty: Type,
}

/// One statement of a method body.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Seeds the URI builder with the base address joined with `path`.
    InitBuilder { path: String, mutable: bool },
    /// Runs `body` only when the guard admits it.
    Guarded { guard: Guard, body: Vec<Stmt> },
    /// Appends query pairs to the builder.
    Query(QueryAppend),
    /// Declares the placeholder-name to value map.
    NamedVariables(Vec<(String, Ident)>),
    /// Declares the ordered positional value list.
    PositionalVariables(Vec<Ident>),
    /// Declares the header set with one append per header parameter.
    Headers(Vec<(String, Ident)>),
    /// Declares the request envelope.
    Entity(Option<BodyEnvelope>),
    /// Expands the template and converts it to the final address.
    ResolveUri { named: bool, positional: bool },
    /// Hands the request to the transport.
    Dispatch {
        verb: HttpVerb,
        token: Ident,
        void: bool,
    },
}

/// A null check, or its absence for non-nullable values.
///
/// `refs` counts the references declared between the bound value and the
/// type being iterated. The guard dereferences them so the body always sees
/// exactly one reference (`&Vec<_>`, never `&&Vec<_>`).
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    /// `if let Some(binding) = source.as_ref() { .. }`
    Present {
        binding: Ident,
        source: Expr,
        refs: usize,
    },
    /// `{ let binding = &source; .. }`
    Always {
        binding: Ident,
        source: Expr,
        refs: usize,
    },
}

/// A query-string contribution.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAppend {
    /// One pair per entry of the map bound to `source`.
    Entries { source: Ident },
    /// Every element of `source` under one multi-valued key.
    Values { key: String, source: Ident },
    /// One pair per element of `source`, each under `key`.
    Each { key: String, source: Ident },
    /// One pair with `value` as written.
    Single { key: String, value: Expr },
}

/// The body parameter of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyEnvelope {
    pub source: Ident,
    /// Payload type the envelope is typed with.
    pub ty: Type,
    /// Whether `source` is already an `Option` of the payload.
    pub nullable: bool,
}

impl Stmt {
    /// Returns `true` if the statement appends to the URI builder.
    pub fn appends_query(&self) -> bool {
        match self {
            Stmt::Query(_) => true,
            Stmt::Guarded { body, .. } => body.iter().any(Stmt::appends_query),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::format_ident;

    #[test]
    fn nested_appends_are_detected() {
        let guarded = Stmt::Guarded {
            guard: Guard::Present {
                binding: format_ident!("tags"),
                source: syn::parse_quote!(tags),
                refs: 0,
            },
            body: vec![Stmt::Query(QueryAppend::Each {
                key: "tags".to_string(),
                source: format_ident!("tags"),
            })],
        };
        assert!(guarded.appends_query());

        let empty = Stmt::Guarded {
            guard: Guard::Always {
                binding: format_ident!("filter"),
                source: syn::parse_quote!(filter),
                refs: 0,
            },
            body: vec![],
        };
        assert!(!empty.appends_query());
        assert!(!Stmt::Headers(vec![]).appends_query());
    }
}
