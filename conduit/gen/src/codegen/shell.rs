//! The connector type enclosing the synthesized methods.
//!
//! A [`ClientShell`] is opened once per interface, collects every method body
//! and return-type token, and is consumed by [`ClientShell::finalize`], which
//! emits the whole connector.
//!
//! ## Generated Shape
//!
//! For an interface `Orders` with client name `orders-svc`:
//!
//! ```ignore
//! pub struct OrdersConnector<T> {
//!     rest_template: Arc<T>,
//!     base_url: String,
//! }
//!
//! impl<T> ::conduit::CircuitBreaker for OrdersConnector<T> {
//!     const CIRCUIT_BREAKER: &'static str = "orders-svc";
//! }
//!
//! impl<T> ::conduit::Service for OrdersConnector<T> {
//!     const SERVICE_NAME: &'static str = "ordersConnector";
//! }
//!
//! impl<T> OrdersConnector<T> {
//!     pub const DEFAULT_BASE_URL: &'static str = "http://orders-svc/orders";
//!     pub const BASE_URL_PROPERTY: &'static str = "orders-svc.baseUrl";
//!     pub fn new(rest_template: Option<Arc<T>>) -> ::conduit::Result<Self> { .. }
//!     pub fn with_base_url(self, base_url: impl Into<String>) -> Self { .. }
//! }
//!
//! impl<T: ::conduit::Transport> Orders for OrdersConnector<T> { .. }
//!
//! impl<T> OrdersConnector<T> {
//!     pub const ORDER: ::conduit::TypeToken<Order> = ::conduit::TypeToken::new();
//! }
//! ```

use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::codegen::dispatch::TokenRegistry;
use crate::codegen::render::{RenderContext, render_method};
use crate::ir::MethodBody;

/// Per-interface synthesis state.
#[derive(Debug)]
pub struct ClientShell {
    trait_name: Ident,
    connector: Ident,
    client_name: String,
    service_name: String,
    default_base_url: String,
    description: Option<String>,
    methods: Vec<MethodBody>,
    tokens: TokenRegistry,
}

impl ClientShell {
    /// Opens the shell of one connector.
    pub fn open(
        trait_name: Ident,
        connector: Ident,
        client_name: impl Into<String>,
        service_name: impl Into<String>,
        default_base_url: impl Into<String>,
    ) -> Self {
        Self {
            trait_name,
            connector,
            client_name: client_name.into(),
            service_name: service_name.into(),
            default_base_url: default_base_url.into(),
            description: None,
            methods: vec![],
            tokens: TokenRegistry::default(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    /// Returns the token registry for return types of this interface.
    pub fn tokens_mut(&mut self) -> &mut TokenRegistry {
        &mut self.tokens
    }

    /// Adds a finished method body, keeping declaration order.
    pub fn push_method(&mut self, method: MethodBody) {
        self.methods.push(method);
    }

    pub fn default_base_url(&self) -> &str {
        &self.default_base_url
    }

    /// Emits the connector and drops the per-interface state.
    pub fn finalize(self, ctx: &RenderContext) -> TokenStream {
        let runtime = &ctx.runtime;
        let transport = &ctx.transport;
        let trait_name = &self.trait_name;
        let connector = &self.connector;
        let client_name = &self.client_name;
        let service_name = &self.service_name;
        let default_base_url = &self.default_base_url;
        let base_url_property = format!("{}.baseUrl", self.client_name);
        let null_message = format!("{transport} must not be null!");

        let description = self
            .description
            .clone()
            .unwrap_or_else(|| format!(" HTTP connector implementing [`{trait_name}`]."));
        let description = if description.starts_with(' ') {
            description
        } else {
            format!(" {description}")
        };

        let methods = self.methods.iter().map(|method| render_method(method, ctx));
        let tokens = self.tokens.into_tokens();
        let token_consts = tokens.iter().map(|token| {
            let ident = &token.ident;
            let ty = &token.ty;
            quote! {
                pub const #ident: #runtime::TypeToken<#ty> = #runtime::TypeToken::new();
            }
        });

        quote! {
            #[doc = #description]
            pub struct #connector<T> {
                #transport: ::std::sync::Arc<T>,
                base_url: String,
            }

            impl<T> #runtime::CircuitBreaker for #connector<T> {
                const CIRCUIT_BREAKER: &'static str = #client_name;
            }

            impl<T> #runtime::Service for #connector<T> {
                const SERVICE_NAME: &'static str = #service_name;
            }

            impl<T> #connector<T> {
                /// Base address used when no property overrides it.
                pub const DEFAULT_BASE_URL: &'static str = #default_base_url;

                /// Property key that overrides the base address.
                pub const BASE_URL_PROPERTY: &'static str = #base_url_property;

                /// Creates a connector over the given transport.
                ///
                /// The base address is read from [`Self::BASE_URL_PROPERTY`],
                /// falling back to [`Self::DEFAULT_BASE_URL`].
                pub fn new(#transport: Option<::std::sync::Arc<T>>) -> #runtime::Result<Self> {
                    let #transport = #runtime::assert::not_null(#transport, #null_message)?;
                    let base_url = #runtime::property(Self::BASE_URL_PROPERTY)
                        .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());
                    Ok(Self { #transport, base_url })
                }

                /// Replaces the base address.
                pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
                    self.base_url = base_url.into();
                    self
                }

                /// Returns the base address requests are sent to.
                pub fn base_url(&self) -> &str {
                    &self.base_url
                }
            }

            #[allow(non_snake_case, unused_variables)]
            impl<T: #runtime::Transport> #trait_name for #connector<T> {
                #(#methods)*
            }

            impl<T> #connector<T> {
                #(#token_consts)*
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::validate_code;
    use quote::format_ident;

    fn shell() -> ClientShell {
        ClientShell::open(
            format_ident!("Orders"),
            format_ident!("OrdersConnector"),
            "orders-svc",
            "ordersConnector",
            "http://orders-svc/orders",
        )
    }

    #[test]
    fn empty_shell_is_valid_rust() {
        let tokens = shell().finalize(&RenderContext::default());
        assert!(validate_code(&tokens).is_ok());
    }

    #[test]
    fn metadata_and_constants_are_emitted() {
        let code = shell().finalize(&RenderContext::default()).to_string();
        assert!(code.contains("const CIRCUIT_BREAKER : & 'static str = \"orders-svc\""));
        assert!(code.contains("const SERVICE_NAME : & 'static str = \"ordersConnector\""));
        assert!(code.contains("\"http://orders-svc/orders\""));
        assert!(code.contains("\"orders-svc.baseUrl\""));
        assert!(code.contains("\"rest_template must not be null!\""));
    }

    #[test]
    fn tokens_land_in_trailing_block() {
        let mut shell = shell();
        shell.tokens_mut().register(&syn::parse_quote!(Order));
        let code = shell.finalize(&RenderContext::default()).to_string();

        let trait_impl = code.find("for OrdersConnector").unwrap();
        let token = code.find("pub const ORDER").unwrap();
        assert!(token > trait_impl);
    }

    #[test]
    fn custom_description_becomes_doc() {
        let code = shell()
            .with_description(Some("Order lookups.".to_string()))
            .finalize(&RenderContext::default())
            .to_string();
        assert!(code.contains("\" Order lookups.\""));
    }
}
