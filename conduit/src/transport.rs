//! The seam between generated connectors and an HTTP client library.

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::entity::{HttpEntity, ResponseEntity};
use crate::error::Result;
use crate::method::HttpMethod;
use crate::token::TypeToken;

/// Performs one HTTP exchange on behalf of a generated connector.
///
/// Implementations serialize the entity body, send the request, and decode the
/// response body as the type carried by `response_type`. A `()` token means
/// the caller discards the body.
///
/// ## Examples
///
/// ```
/// use conduit::{HttpEntity, HttpHeaders, HttpMethod, ResponseEntity, Result, Transport, TypeToken, Url};
///
/// struct Offline;
///
/// impl Transport for Offline {
///     fn exchange<B, R>(
///         &self,
///         _uri: Url,
///         _method: HttpMethod,
///         _entity: HttpEntity<B>,
///         _response_type: &TypeToken<R>,
///     ) -> Result<ResponseEntity<R>>
///     where
///         B: serde::Serialize,
///         R: serde::de::DeserializeOwned,
///     {
///         Err(conduit::Error::transport("offline"))
///     }
/// }
/// ```
pub trait Transport {
    /// Sends `entity` to `uri` with `method` and decodes the response as `R`.
    ///
    /// ## Errors
    ///
    /// Implementations report network, status and decoding failures as
    /// [`Error`](crate::Error) values.
    fn exchange<B, R>(
        &self,
        uri: Url,
        method: HttpMethod,
        entity: HttpEntity<B>,
        response_type: &TypeToken<R>,
    ) -> Result<ResponseEntity<R>>
    where
        B: Serialize,
        R: DeserializeOwned;
}
