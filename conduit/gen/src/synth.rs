//! Per-interface synthesis driver.
//!
//! For each interface a [`ClientShell`] is opened, every method is
//! classified and lowered to IR in declaration order, and the shell is
//! finalized into one module. Any error aborts the whole interface; no
//! partial connector is returned.

use std::collections::HashSet;
use std::str::FromStr;

use conduit_define::{HttpVerb, InterfaceDescriptor, MethodDescriptor};
use proc_macro2::TokenStream;
use quote::quote;

use crate::classify::{ClassifiedParam, MetadataIssue, ParamClass};
use crate::codegen::dispatch::emit_dispatch;
use crate::codegen::envelope::emit_envelope;
use crate::codegen::shell::ClientShell;
use crate::codegen::uri::emit_uri;
use crate::errors::GeneratorError;
use crate::ir::{MethodBody, Param};
use crate::manifest::GeneratorOptions;
use crate::naming;
use crate::parser::{base_address, extract_path_params, normalize_base_path, normalize_method_path};
use crate::types::parse_type;
use crate::validation::{validate_interface, validate_options};

/// Local names bound by every generated method body.
const RESERVED_BINDINGS: &[&str] = &[
    "builder",
    "headers",
    "http_entity",
    "uri",
    "uri_variables",
    "index_uri_variables",
];

/// Synthesizes the connector module of one interface.
///
/// ## Errors
///
/// Returns the first metadata error found; see [`GeneratorError`].
///
/// ## Examples
///
/// ```
/// use conduit_define::{InterfaceDescriptor, MethodDescriptor, ParameterDescriptor};
/// use conduit_gen::manifest::GeneratorOptions;
/// use conduit_gen::synth::synthesize;
///
/// let orders = InterfaceDescriptor::new("Orders", "orders-svc")
///     .with_base_path("/orders")
///     .with_method(
///         MethodDescriptor::new("get_order", "GET", "/{orderId}")
///             .with_param(ParameterDescriptor::path_variable("orderId", "i64", "orderId"))
///             .returning("Order"),
///     );
///
/// let code = synthesize(&orders, &GeneratorOptions::default()).unwrap().to_string();
/// assert!(code.contains("OrdersConnector"));
/// ```
pub fn synthesize(
    iface: &InterfaceDescriptor,
    options: &GeneratorOptions,
) -> Result<TokenStream, GeneratorError> {
    validate_options(options)?;
    validate_interface(iface)?;
    let ctx = options.render_context()?;

    let interface = iface.name.trim();
    let invalid_identifier = |identifier: &str, reason: String| GeneratorError::InvalidIdentifier {
        interface: interface.to_string(),
        identifier: identifier.to_string(),
        reason,
    };

    let trait_name = naming::ident(interface).map_err(|r| invalid_identifier(interface, r))?;
    let connector_name = naming::connector_name(interface, &options.suffix);
    let connector =
        naming::ident(&connector_name).map_err(|r| invalid_identifier(&connector_name, r))?;
    let imports = iface
        .imports
        .iter()
        .map(|import| {
            syn::parse_str::<syn::ItemUse>(&format!("use {};", import.trim().trim_end_matches(';')))
                .map_err(|e| invalid_identifier(import, format!("invalid import: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let default_base_url = base_address(
        &options.scheme,
        iface.service_host(),
        iface.base_path.as_deref(),
    );
    let mut shell = ClientShell::open(
        trait_name,
        connector,
        iface.client_name.trim(),
        naming::service_name(&connector_name),
        default_base_url,
    )
    .with_description(iface.description.clone());

    for method in &iface.methods {
        let body = synthesize_method(&mut shell, iface, method)?;
        shell.push_method(body);
    }

    tracing::debug!(
        interface,
        connector = %connector_name,
        base_url = shell.default_base_url(),
        methods = iface.methods.len(),
        "synthesized connector"
    );

    let module_doc = format!(" HTTP connector for the `{interface}` interface.");
    let connector_tokens = shell.finalize(&ctx);
    Ok(quote! {
        #![doc = #module_doc]

        #(#imports)*

        #connector_tokens
    })
}

/// Lowers one method to IR, registering its return token with `shell`.
///
/// ## Errors
///
/// Returns [`GeneratorError::UnsupportedVerb`], [`GeneratorError::InvalidReturnType`],
/// [`GeneratorError::InvalidIdentifier`] or [`GeneratorError::MalformedMetadata`],
/// each naming the interface and method.
pub fn synthesize_method(
    shell: &mut ClientShell,
    iface: &InterfaceDescriptor,
    method: &MethodDescriptor,
) -> Result<MethodBody, GeneratorError> {
    let interface = iface.name.trim();
    let method_name = method.name.trim();
    let malformed = |issue: MetadataIssue| GeneratorError::MalformedMetadata {
        interface: interface.to_string(),
        method: method_name.to_string(),
        parameter: issue.parameter,
        reason: issue.reason,
    };

    let verb = HttpVerb::from_str(method.verb.trim()).map_err(|_| GeneratorError::UnsupportedVerb {
        interface: interface.to_string(),
        method: method_name.to_string(),
        verb: method.verb.clone(),
    })?;
    let name = naming::ident(method_name).map_err(|reason| GeneratorError::InvalidIdentifier {
        interface: interface.to_string(),
        identifier: method_name.to_string(),
        reason,
    })?;
    let returns = parse_type(&method.returns).map_err(|reason| GeneratorError::InvalidReturnType {
        interface: interface.to_string(),
        method: method_name.to_string(),
        ty: method.returns.clone(),
        reason,
    })?;

    let params = method
        .params
        .iter()
        .map(ClassifiedParam::from_descriptor)
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;
    check_unique_params(&params).map_err(malformed)?;

    let path = normalize_method_path(&method.path);
    warn_on_placeholder_mismatch(iface, method_name, &path, &params);

    let uri = emit_uri(&path, &params).map_err(malformed)?;
    let envelope = emit_envelope(&params).map_err(malformed)?;
    let dispatch = emit_dispatch(shell.tokens_mut(), verb, &returns);

    let mut statements = uri.prelude;
    statements.extend(envelope);
    statements.push(uri.resolve);
    statements.push(dispatch);

    tracing::debug!(
        interface,
        method = method_name,
        %verb,
        path = %path,
        params = params.len(),
        "synthesized method"
    );

    Ok(MethodBody {
        name,
        params: params
            .into_iter()
            .map(|param| Param {
                ident: param.ident,
                ty: param.ty,
            })
            .collect(),
        returns,
        statements,
    })
}

fn check_unique_params(params: &[ClassifiedParam]) -> Result<(), MetadataIssue> {
    let mut seen = HashSet::new();
    for param in params {
        if !seen.insert(param.ident.to_string()) {
            return Err(MetadataIssue::new(
                &param.name,
                "parameter is declared more than once",
            ));
        }
    }
    // Generated bodies bind these names; a parameter using one would be shadowed.
    for reserved in RESERVED_BINDINGS {
        if let Some(param) = params.iter().find(|p| p.ident == reserved) {
            return Err(MetadataIssue::new(
                &param.name,
                format!("'{reserved}' is reserved in connector method bodies"),
            ));
        }
    }
    Ok(())
}

fn warn_on_placeholder_mismatch(
    iface: &InterfaceDescriptor,
    method: &str,
    path: &str,
    params: &[ClassifiedParam],
) {
    let base_path = normalize_base_path(iface.base_path.as_deref());
    let template = format!("{base_path}{path}");
    let placeholders = extract_path_params(&template);

    let mut positional = 0;
    for param in params {
        match &param.class {
            ParamClass::NamedPathVariable { placeholder } => {
                if !placeholders.contains(&placeholder.as_str()) {
                    tracing::warn!(
                        interface = %iface.name,
                        method,
                        placeholder = %placeholder,
                        template = %template,
                        "path variable names a placeholder missing from the template"
                    );
                }
            }
            ParamClass::PositionalPathVariable { .. } => positional += 1,
            _ => {}
        }
    }

    let unnamed = placeholders
        .iter()
        .filter(|placeholder| {
            !params.iter().any(|param| {
                matches!(&param.class, ParamClass::NamedPathVariable { placeholder: p } if p == *placeholder)
            })
        })
        .count();
    if unnamed != positional {
        tracing::warn!(
            interface = %iface.name,
            method,
            template = %template,
            unnamed,
            positional,
            "positional path variables do not match the unnamed placeholders"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Stmt;
    use conduit_define::ParameterDescriptor;
    use quote::format_ident;
    use tracing_test::traced_test;

    fn orders() -> InterfaceDescriptor {
        InterfaceDescriptor::new("Orders", "orders-svc").with_base_path("/orders")
    }

    fn method_body(method: MethodDescriptor) -> Result<MethodBody, GeneratorError> {
        let iface = orders();
        let mut shell = ClientShell::open(
            format_ident!("Orders"),
            format_ident!("OrdersConnector"),
            "orders-svc",
            "ordersConnector",
            "http://orders-svc/orders",
        );
        synthesize_method(&mut shell, &iface, &method)
    }

    #[test]
    fn statements_follow_fixed_order() {
        let body = method_body(
            MethodDescriptor::new("update", "PUT", "/{id}")
                .with_param(ParameterDescriptor::header("trace", "String", "X-Trace"))
                .with_param(ParameterDescriptor::body("order", "Order"))
                .with_param(ParameterDescriptor::path_variable("id", "u64", "id"))
                .with_param(ParameterDescriptor::query("dry_run", "bool")),
        )
        .unwrap();

        let kinds: Vec<_> = body
            .statements
            .iter()
            .map(|stmt| match stmt {
                Stmt::InitBuilder { .. } => "init",
                Stmt::Query(_) | Stmt::Guarded { .. } => "query",
                Stmt::NamedVariables(_) => "named",
                Stmt::PositionalVariables(_) => "positional",
                Stmt::Headers(_) => "headers",
                Stmt::Entity(_) => "entity",
                Stmt::ResolveUri { .. } => "resolve",
                Stmt::Dispatch { .. } => "dispatch",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["init", "query", "named", "headers", "entity", "resolve", "dispatch"]
        );
        assert_eq!(body.params.len(), 4);
    }

    #[test]
    fn reserved_parameter_names_are_rejected() {
        let err = method_body(
            MethodDescriptor::new("get", "GET", "").with_param(ParameterDescriptor::query("uri", "String")),
        )
        .unwrap_err();
        assert!(err.to_string().contains("'uri' is reserved"));
    }

    #[test]
    fn duplicate_parameter_names_are_rejected() {
        let err = method_body(
            MethodDescriptor::new("get", "GET", "")
                .with_param(ParameterDescriptor::query("page", "u32"))
                .with_param(ParameterDescriptor::header("page", "u32", "X-Page")),
        )
        .unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    #[traced_test]
    fn missing_placeholder_only_warns() {
        let body = method_body(
            MethodDescriptor::new("get", "GET", "/items")
                .with_param(ParameterDescriptor::path_variable("id", "u64", "id")),
        );
        assert!(body.is_ok());
        assert!(logs_contain("placeholder missing from the template"));
    }

    #[test]
    #[traced_test]
    fn unfilled_placeholder_only_warns() {
        let body = method_body(MethodDescriptor::new("get", "GET", "/{id}"));
        assert!(body.is_ok());
        assert!(logs_contain("do not match the unnamed placeholders"));
    }
}
