//! Generator manifests.
//!
//! A manifest lists the interfaces to synthesize and the options shared by
//! all of them. YAML (`.yaml`, `.yml`) and JSON (`.json`) are accepted.
//!
//! ```yaml
//! options:
//!   suffix: Connector
//! interfaces:
//!   - name: Orders
//!     client_name: orders-svc
//!     base_path: /orders
//!     imports:
//!       - crate::orders::*
//!     methods:
//!       - name: get_order
//!         verb: GET
//!         path: /{orderId}
//!         returns: Order
//!         params:
//!           - name: orderId
//!             ty: i64
//!             role: { kind: path_variable, name: orderId }
//! ```

use std::fs;
use std::path::Path;

use conduit_define::InterfaceDescriptor;
use serde::{Deserialize, Serialize};

use crate::codegen::render::RenderContext;
use crate::errors::GeneratorError;
use crate::naming;

/// Path-prefix keywords that must not gain a leading `::`.
const RELATIVE_ROOTS: &[&str] = &["crate", "self", "super"];

/// Options shared by every connector of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Path of the runtime crate the emitted code calls into.
    pub runtime: String,
    /// Appended to the interface name to form the connector name.
    pub suffix: String,
    /// Name of the transport handle field and constructor parameter.
    pub transport_field: String,
    /// Scheme of the default base address.
    pub scheme: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime: "conduit".to_string(),
            suffix: "Connector".to_string(),
            transport_field: "rest_template".to_string(),
            scheme: "http".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Resolves the names the renderer emits.
    ///
    /// A bare crate name such as `conduit` is made absolute (`::conduit`).
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ConfigError`] if the runtime is not a path
    /// or the transport field is not an identifier.
    pub fn render_context(&self) -> Result<RenderContext, GeneratorError> {
        let mut runtime = syn::parse_str::<syn::Path>(self.runtime.trim()).map_err(|e| {
            GeneratorError::ConfigError(format!("runtime '{}' is not a path: {e}", self.runtime))
        })?;
        let relative = runtime
            .segments
            .first()
            .is_some_and(|segment| RELATIVE_ROOTS.iter().any(|root| segment.ident == root));
        if runtime.leading_colon.is_none() && !relative {
            runtime.leading_colon = Some(Default::default());
        }

        let transport = naming::ident(&self.transport_field).map_err(|reason| {
            GeneratorError::ConfigError(format!("transport field: {reason}"))
        })?;

        Ok(RenderContext { runtime, transport })
    }
}

/// Interfaces and options loaded from a manifest file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub options: GeneratorOptions,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDescriptor>,
}

impl Manifest {
    /// Loads a manifest, choosing the format by file extension.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ReadError`] if the file cannot be read,
    /// [`GeneratorError::ManifestError`] if it does not parse, and
    /// [`GeneratorError::ConfigError`] for an unknown extension.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let manifest = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => {
                return Err(GeneratorError::ConfigError(format!(
                    "unsupported manifest format '{}': expected .yaml, .yml or .json",
                    path.display()
                )));
            }
        };

        let manifest = manifest.map_err(|message| GeneratorError::ManifestError {
            path: path.display().to_string(),
            message,
        })?;
        tracing::debug!(
            path = %path.display(),
            interfaces = manifest.interfaces.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parses a YAML manifest.
    pub fn from_yaml_str(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Parses a JSON manifest.
    pub fn from_json_str(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}
