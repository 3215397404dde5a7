//! Request and response envelopes.

use std::fmt::Display;

/// Ordered, multi-valued HTTP header set.
///
/// Names are stored as given; lookups compare names case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    entries: Vec<(String, String)>,
}

impl HttpHeaders {
    /// Creates an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header value. Existing values for the same name are kept.
    pub fn add(&mut self, name: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries.push((name.into(), value.to_string()));
        self
    }

    /// Returns the first value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value recorded for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over all `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Header set plus an optional typed body, handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpEntity<B> {
    body: Option<B>,
    headers: HttpHeaders,
}

impl<B> HttpEntity<B> {
    /// Pairs a body (or `None`) with a header set.
    pub fn new(body: Option<B>, headers: HttpHeaders) -> Self {
        Self { body, headers }
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Splits the entity into its body and headers.
    pub fn into_parts(self) -> (Option<B>, HttpHeaders) {
        (self.body, self.headers)
    }
}

/// Decoded response returned by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntity<R> {
    status: u16,
    headers: HttpHeaders,
    body: R,
}

impl<R> ResponseEntity<R> {
    pub fn new(status: u16, headers: HttpHeaders, body: R) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn body(&self) -> &R {
        &self.body
    }

    /// Consumes the response, keeping only the decoded body.
    pub fn into_body(self) -> R {
        self.body
    }
}
