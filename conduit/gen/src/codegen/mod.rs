//! Code generation for connectors.
//!
//! Each submodule contributes one part of a connector. Method-level emitters
//! produce [`crate::ir`] statements; [`render`] is the only place that turns
//! IR into tokens.
//!
//! ## Submodules
//!
//! - [`uri`] - Builder seed, query appends and path variables
//! - [`envelope`] - Header set and request body
//! - [`dispatch`] - Return-type tokens and the transport call
//! - [`render`] - IR to `TokenStream`
//! - [`shell`] - The connector struct, metadata, constructor and trait impl
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod dispatch;
pub mod envelope;
pub mod render;
pub mod shell;
pub mod uri;

pub use dispatch::{ReifiedTypeToken, TokenRegistry, emit_dispatch};
pub use envelope::emit_envelope;
pub use render::{RenderContext, render_method};
pub use shell::ClientShell;
pub use uri::{UriStatements, emit_uri};
