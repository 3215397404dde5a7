//! Reified return-type tokens and the dispatch statement.
//!
//! Every method's full return type is captured as a named
//! `TypeToken<R>` constant on the connector, so the transport receives the
//! complete generic type as a value. Tokens are deduplicated per interface
//! by derived name; the first type registered under a name wins. A name
//! that would shadow one of the shell's own constants gets a `_TYPE` suffix.

use std::collections::HashSet;

use conduit_define::HttpVerb;
use proc_macro2::Ident;
use quote::format_ident;
use syn::Type;

use crate::ir::Stmt;
use crate::types::{is_unit, token_name};

/// Associated consts the connector shell defines alongside the tokens.
const SHELL_CONSTS: &[&str] = &["DEFAULT_BASE_URL", "BASE_URL_PROPERTY"];

/// A named, reified return type.
#[derive(Debug, Clone, PartialEq)]
pub struct ReifiedTypeToken {
    pub ident: Ident,
    pub ty: Type,
}

/// The tokens collected while synthesizing one interface.
///
/// ## Examples
///
/// ```
/// use conduit_gen::codegen::dispatch::TokenRegistry;
///
/// let mut tokens = TokenRegistry::default();
/// let first = tokens.register(&syn::parse_quote!(Vec<Order>));
/// let second = tokens.register(&syn::parse_quote!(Vec<Order>));
///
/// assert_eq!(first, second);
/// assert_eq!(tokens.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    seen: HashSet<String>,
    tokens: Vec<ReifiedTypeToken>,
}

impl TokenRegistry {
    /// Registers `ty` and returns the name of its token.
    pub fn register(&mut self, ty: &Type) -> Ident {
        let mut name = token_name(ty);
        if SHELL_CONSTS.contains(&name.as_str()) {
            name.push_str("_TYPE");
        }
        let ident = format_ident!("{}", name);
        if self.seen.insert(name) {
            tracing::debug!(token = %ident, "registered type token");
            self.tokens.push(ReifiedTypeToken {
                ident: ident.clone(),
                ty: ty.clone(),
            });
        }
        ident
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consumes the registry, returning tokens in first-registration order.
    pub fn into_tokens(self) -> Vec<ReifiedTypeToken> {
        self.tokens
    }
}

/// Registers the return type and emits the dispatch statement.
pub fn emit_dispatch(tokens: &mut TokenRegistry, verb: HttpVerb, returns: &Type) -> Stmt {
    Stmt::Dispatch {
        verb,
        token: tokens.register(returns),
        void: is_unit(returns),
    }
}
