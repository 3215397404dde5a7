//! Renders method-body IR as Rust tokens.

use conduit_define::HttpVerb;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::ir::{BodyEnvelope, Guard, MethodBody, QueryAppend, Stmt};

/// Names the renderer needs from the generator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// Path of the runtime crate, e.g. `::conduit`.
    pub runtime: syn::Path,
    /// Field holding the transport handle.
    pub transport: Ident,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            runtime: syn::parse_quote!(::conduit),
            transport: format_ident!("rest_template"),
        }
    }
}

/// Renders one trait method implementation.
pub fn render_method(body: &MethodBody, ctx: &RenderContext) -> TokenStream {
    let runtime = &ctx.runtime;
    let name = &body.name;
    let returns = &body.returns;
    let params = body.params.iter().map(|param| {
        let ident = &param.ident;
        let ty = &param.ty;
        quote! { #ident: #ty }
    });
    let statements = render_statements(&body.statements, ctx);

    quote! {
        fn #name(&self, #(#params),*) -> #runtime::Result<#returns> {
            #statements
        }
    }
}

fn render_statements(statements: &[Stmt], ctx: &RenderContext) -> TokenStream {
    statements.iter().map(|stmt| render_stmt(stmt, ctx)).collect()
}

fn render_stmt(stmt: &Stmt, ctx: &RenderContext) -> TokenStream {
    let runtime = &ctx.runtime;
    match stmt {
        Stmt::InitBuilder { path, mutable } => {
            let mutability = mutable.then(|| quote!(mut));
            let seed = if path.is_empty() {
                quote! { self.base_url.clone() }
            } else {
                quote! { format!("{}{}", self.base_url, #path) }
            };
            quote! {
                let #mutability builder = #runtime::UriBuilder::from_uri_string(#seed);
            }
        }
        Stmt::Guarded { guard, body } => {
            let body = render_statements(body, ctx);
            match guard {
                Guard::Present {
                    binding,
                    source,
                    refs,
                } => {
                    // `as_ref()` adds one reference on top of the declared ones.
                    let reborrow = (*refs > 0).then(|| {
                        let stars = derefs(refs + 1);
                        quote! { let #binding = &#stars #binding; }
                    });
                    quote! {
                        if let Some(#binding) = #source.as_ref() {
                            #reborrow
                            #body
                        }
                    }
                }
                Guard::Always {
                    binding,
                    source,
                    refs,
                } => {
                    let stars = derefs(*refs);
                    quote! {
                        {
                            let #binding = &#stars #source;
                            #body
                        }
                    }
                }
            }
        }
        Stmt::Query(append) => render_query(append),
        Stmt::NamedVariables(variables) => {
            let inserts = variables.iter().map(|(placeholder, ident)| {
                quote! {
                    uri_variables.insert(#placeholder, ::std::string::ToString::to_string(&#ident));
                }
            });
            quote! {
                let mut uri_variables = ::std::collections::HashMap::<&'static str, String>::new();
                #(#inserts)*
            }
        }
        Stmt::PositionalVariables(variables) => quote! {
            let index_uri_variables: ::std::vec::Vec<String> = ::std::vec![
                #(::std::string::ToString::to_string(&#variables)),*
            ];
        },
        Stmt::Headers(headers) => {
            let mutability = (!headers.is_empty()).then(|| quote!(mut));
            let adds = headers.iter().map(|(name, ident)| {
                quote! { headers.add(#name, &#ident); }
            });
            quote! {
                let #mutability headers = #runtime::HttpHeaders::new();
                #(#adds)*
            }
        }
        Stmt::Entity(None) => quote! {
            let http_entity = #runtime::HttpEntity::<()>::new(None, headers);
        },
        Stmt::Entity(Some(BodyEnvelope {
            source,
            ty,
            nullable,
        })) => {
            let payload = if *nullable {
                quote!(#source)
            } else {
                quote!(Some(#source))
            };
            quote! {
                let http_entity = #runtime::HttpEntity::<#ty>::new(#payload, headers);
            }
        }
        Stmt::ResolveUri { named, positional } => {
            let variables = named.then(|| quote!(.uri_variables(&uri_variables)));
            let build = if *positional {
                quote!(.build_and_expand(&index_uri_variables))
            } else {
                quote!(.build())
            };
            quote! {
                let uri = builder #variables #build?.to_uri()?;
            }
        }
        Stmt::Dispatch { verb, token, void } => {
            let transport = &ctx.transport;
            let method = method_variant(*verb);
            let exchange = quote! {
                self.#transport.exchange(uri, #runtime::HttpMethod::#method, http_entity, &Self::#token)?
            };
            if *void {
                quote! {
                    #exchange;
                    Ok(())
                }
            } else {
                quote! {
                    Ok(#exchange.into_body())
                }
            }
        }
    }
}

fn render_query(append: &QueryAppend) -> TokenStream {
    match append {
        QueryAppend::Entries { source } => quote! {
            for (key, value) in #source {
                builder.query_param(key, value);
            }
        },
        QueryAppend::Values { key, source } => quote! {
            builder.query_param_values(#key, #source.iter());
        },
        QueryAppend::Each { key, source } => quote! {
            for value in #source {
                builder.query_param(#key, value);
            }
        },
        QueryAppend::Single { key, value } => quote! {
            builder.query_param(#key, #value);
        },
    }
}

fn derefs(count: usize) -> TokenStream {
    (0..count).map(|_| quote!(*)).collect()
}

fn method_variant(verb: HttpVerb) -> Ident {
    let name = match verb {
        HttpVerb::Get => "Get",
        HttpVerb::Post => "Post",
        HttpVerb::Put => "Put",
        HttpVerb::Patch => "Patch",
        HttpVerb::Delete => "Delete",
        HttpVerb::Head => "Head",
        HttpVerb::Options => "Options",
        HttpVerb::Trace => "Trace",
    };
    format_ident!("{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Param;

    fn render(stmt: Stmt) -> String {
        render_stmt(&stmt, &RenderContext::default()).to_string()
    }

    #[test]
    fn immutable_builder_without_path() {
        let code = render(Stmt::InitBuilder {
            path: String::new(),
            mutable: false,
        });
        assert!(code.contains("let builder = :: conduit :: UriBuilder :: from_uri_string (self . base_url . clone ())"));
    }

    #[test]
    fn builder_seeded_with_base_and_path() {
        let code = render(Stmt::InitBuilder {
            path: "/{orderId}".to_string(),
            mutable: true,
        });
        assert!(code.contains("let mut builder"));
        assert!(code.contains("format ! (\"{}{}\" , self . base_url , \"/{orderId}\")"));
    }

    #[test]
    fn present_guard_uses_as_ref() {
        let code = render(Stmt::Guarded {
            guard: Guard::Present {
                binding: format_ident!("filters"),
                source: syn::parse_quote!(filters),
                refs: 0,
            },
            body: vec![Stmt::Query(QueryAppend::Entries {
                source: format_ident!("filters"),
            })],
        });
        assert!(code.starts_with("if let Some (filters) = filters . as_ref ()"));
        assert!(code.contains("for (key , value) in filters"));
        assert!(!code.contains("let filters"));
    }

    #[test]
    fn borrowed_optional_map_is_reborrowed_once() {
        let code = render(Stmt::Guarded {
            guard: Guard::Present {
                binding: format_ident!("filters"),
                source: syn::parse_quote!(filters),
                refs: 1,
            },
            body: vec![Stmt::Query(QueryAppend::Entries {
                source: format_ident!("filters"),
            })],
        });
        assert_eq!(
            code,
            "if let Some (filters) = filters . as_ref () { let filters = & * * filters ; \
             for (key , value) in filters { builder . query_param (key , value) ; } }"
        );
    }

    #[test]
    fn borrowed_collection_is_dereferenced() {
        let code = render(Stmt::Guarded {
            guard: Guard::Always {
                binding: format_ident!("tags"),
                source: syn::parse_quote!(tags),
                refs: 1,
            },
            body: vec![Stmt::Query(QueryAppend::Each {
                key: "tags".to_string(),
                source: format_ident!("tags"),
            })],
        });
        assert!(code.starts_with("{ let tags = & * tags ;"));

        let owned = render(Stmt::Guarded {
            guard: Guard::Always {
                binding: format_ident!("tags"),
                source: syn::parse_quote!(tags),
                refs: 0,
            },
            body: vec![],
        });
        assert_eq!(owned, "{ let tags = & tags ; }");
    }

    #[test]
    fn resolve_variants() {
        assert_eq!(
            render(Stmt::ResolveUri {
                named: false,
                positional: false
            }),
            "let uri = builder . build () ? . to_uri () ? ;"
        );
        assert_eq!(
            render(Stmt::ResolveUri {
                named: true,
                positional: true
            }),
            "let uri = builder . uri_variables (& uri_variables) . build_and_expand (& index_uri_variables) ? . to_uri () ? ;"
        );
    }

    #[test]
    fn void_dispatch_discards_body() {
        let code = render(Stmt::Dispatch {
            verb: HttpVerb::Delete,
            token: format_ident!("UNIT"),
            void: true,
        });
        assert!(code.contains(":: conduit :: HttpMethod :: Delete"));
        assert!(code.contains("& Self :: UNIT) ? ;"));
        assert!(code.ends_with("Ok (())"));
        assert!(!code.contains("into_body"));
    }

    #[test]
    fn headers_are_not_guarded() {
        let code = render(Stmt::Headers(vec![(
            "X-Trace".to_string(),
            format_ident!("trace"),
        )]));
        assert_eq!(
            code,
            "let mut headers = :: conduit :: HttpHeaders :: new () ; headers . add (\"X-Trace\" , & trace) ;"
        );
    }

    #[test]
    fn method_signature_uses_runtime_result() {
        let body = MethodBody {
            name: format_ident!("get_order"),
            params: vec![Param {
                ident: format_ident!("orderId"),
                ty: syn::parse_quote!(i64),
            }],
            returns: syn::parse_quote!(Order),
            statements: vec![],
        };
        let code = render_method(&body, &RenderContext::default()).to_string();
        assert!(code.starts_with(
            "fn get_order (& self , orderId : i64) -> :: conduit :: Result < Order >"
        ));
    }
}
