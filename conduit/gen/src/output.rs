//! Output assembly and file writing for generated connectors.
//!
//! ## Output Structure
//!
//! ```text
//! generated/src/
//! ├── lib.rs         # Module declarations and connector re-exports
//! ├── orders.rs      # OrdersConnector
//! └── billing.rs     # BillingConnector
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes
//! - **All or nothing**: Every interface is synthesized before the first write

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use conduit_define::InterfaceDescriptor;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::errors::GeneratorError;
use crate::manifest::GeneratorOptions;
use crate::naming::{connector_name, module_name};
use crate::synth::synthesize;

/// One formatted output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub file_name: String,
    pub content: String,
}

/// Assembles `lib.rs`, declaring every connector module and re-exporting
/// its connector.
///
/// ## Arguments
///
/// * `modules` - `(module, connector)` name pairs in manifest order
pub fn assemble_lib_rs(modules: &[(String, String)]) -> TokenStream {
    let declarations = modules.iter().map(|(module, connector)| {
        let module = format_ident!("{}", module);
        let connector = format_ident!("{}", connector);
        quote! {
            pub mod #module;
            pub use #module::#connector;
        }
    });

    quote! {
        //! Generated HTTP connectors.
        //!
        //! Each module holds one connector implementing its interface over a
        //! `conduit::Transport`.

        #(#declarations)*
    }
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's syntactically
/// valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
///
/// Converts a parsed syn::File back to a nicely formatted string,
/// prepending an auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by conduit-gen. Do not edit manually.\n\n{}",
        formatted
    )
}

/// Writes content to a file atomically using temp file + rename.
///
/// This pattern ensures that:
/// - The file is never left in a partially-written state
/// - Other processes see either the old or new content, never a mix
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Synthesizes, validates and formats every connector plus `lib.rs`.
///
/// ## Errors
///
/// Returns the first synthesis error, a [`GeneratorError::ConfigError`] if
/// two interfaces map to the same module, or a
/// [`GeneratorError::CodeGenError`] if emitted code does not parse.
pub fn generate_all(
    interfaces: &[InterfaceDescriptor],
    options: &GeneratorOptions,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut modules = Vec::new();
    let mut files = Vec::new();

    for iface in interfaces {
        let tokens = synthesize(iface, options)?;
        let file = validate_code(&tokens)?;

        let module = module_name(&iface.name);
        if let Some(previous) = owners.insert(module.clone(), &iface.name) {
            return Err(GeneratorError::ConfigError(format!(
                "interfaces '{}' and '{}' both generate module '{}'",
                previous, iface.name, module
            )));
        }

        files.push(GeneratedFile {
            file_name: format!("{module}.rs"),
            content: format_code(&file),
        });
        modules.push((module, connector_name(&iface.name, &options.suffix)));
    }

    let lib = validate_code(&assemble_lib_rs(&modules))?;
    files.insert(
        0,
        GeneratedFile {
            file_name: "lib.rs".to_string(),
            content: format_code(&lib),
        },
    );
    Ok(files)
}

/// Generates every connector and writes the files to `output_dir`.
///
/// ## Arguments
///
/// * `interfaces` - Interfaces to synthesize
/// * `options` - Options shared by all connectors
/// * `output_dir` - Directory to write generated files to
/// * `dry_run` - If true, print code instead of writing files
///
/// ## Returns
///
/// The generated files, `lib.rs` first.
///
/// ## Errors
///
/// Returns an error if:
/// - Any interface fails to synthesize (nothing is written)
/// - File writing fails
pub fn generate_and_write_all(
    interfaces: &[InterfaceDescriptor],
    options: &GeneratorOptions,
    output_dir: &Path,
    dry_run: bool,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let files = generate_all(interfaces, options)?;

    if dry_run {
        for file in &files {
            println!("=== {} ===\n{}\n", file.file_name, file.content);
        }
    } else {
        for file in &files {
            let path = output_dir.join(&file.file_name);
            write_atomic(&path, &file.content)?;
            tracing::info!(path = %path.display(), "wrote generated file");
        }
    }

    Ok(files)
}
