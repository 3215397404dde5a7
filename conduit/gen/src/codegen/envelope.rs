//! Header set and request body envelope.
//!
//! Header appends carry no null guard, unlike query appends. The value is
//! passed through as declared, so a header parameter's type must implement
//! `Display` itself.

use crate::classify::{ClassifiedParam, MetadataIssue, ParamClass};
use crate::ir::{BodyEnvelope, Stmt};
use crate::types::extract_option_inner;

/// Emits the header-set and entity declarations of one method.
///
/// ## Errors
///
/// Returns a [`MetadataIssue`] naming the second body parameter if a method
/// declares more than one.
pub fn emit_envelope(params: &[ClassifiedParam]) -> Result<Vec<Stmt>, MetadataIssue> {
    let mut headers = Vec::new();
    let mut body: Option<BodyEnvelope> = None;

    for param in params {
        match &param.class {
            ParamClass::Header { name } => headers.push((name.clone(), param.ident.clone())),
            ParamClass::Body { ty } => {
                if body.is_some() {
                    return Err(MetadataIssue::new(
                        &param.name,
                        "method declares more than one body parameter",
                    ));
                }
                body = Some(match extract_option_inner(ty) {
                    Some(inner) => BodyEnvelope {
                        source: param.ident.clone(),
                        ty: inner.clone(),
                        nullable: true,
                    },
                    None => BodyEnvelope {
                        source: param.ident.clone(),
                        ty: ty.clone(),
                        nullable: false,
                    },
                });
            }
            _ => {}
        }
    }

    Ok(vec![Stmt::Headers(headers), Stmt::Entity(body)])
}
