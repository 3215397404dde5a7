//! HTTP methods a connector can dispatch with.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP method passed to [`Transport::exchange`](crate::Transport::exchange).
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use conduit::HttpMethod;
///
/// assert_eq!(HttpMethod::from_str("PATCH").unwrap(), HttpMethod::Patch);
/// assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Returns the uppercase wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }
}
