//! URI assembly for generated connectors.
//!
//! A [`UriBuilder`] starts from a base address joined with a path template,
//! collects query parameters in the order they are appended, and resolves
//! `{name}` placeholders in two independent passes:
//!
//! 1. **Named**: [`UriBuilder::uri_variables`] registers values by placeholder
//!    name. Only placeholders with a registered name are touched.
//! 2. **Positional**: [`UriBuilder::build_and_expand`] fills every placeholder
//!    the named pass left open, in order of appearance in the template.
//!
//! A template may therefore mix both styles without one pass clobbering the
//! other's placeholders.

use std::collections::HashMap;
use std::fmt::{self, Display};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::error::{Error, Result};

/// Characters escaped when a variable value is substituted into a path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One piece of a parsed URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Variable(&'a str),
}

/// Splits a template into literal text and `{name}` placeholders.
///
/// A `{name:pattern}` placeholder is reduced to its name.
fn parse_template(template: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        if open > 0 {
            segments.push(Segment::Literal(&rest[..open]));
        }
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| Error::InvalidTemplate {
            template: template.to_string(),
            message: "unclosed '{'".to_string(),
        })?;
        let body = &after[..close];
        let name = body.split(':').next().unwrap_or(body).trim();
        if name.is_empty() {
            return Err(Error::InvalidTemplate {
                template: template.to_string(),
                message: "empty variable name".to_string(),
            });
        }
        segments.push(Segment::Variable(name));
        rest = &after[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }

    Ok(segments)
}

/// Builder for a connector request URI.
///
/// ## Examples
///
/// ```
/// use std::collections::HashMap;
/// use conduit::UriBuilder;
///
/// let mut builder = UriBuilder::from_uri_string("http://svc/a/{id}/b/{slot}");
/// let mut uri_variables = HashMap::new();
/// uri_variables.insert("id", "7".to_string());
///
/// let index_uri_variables = vec!["9".to_string()];
/// let uri = builder
///     .uri_variables(&uri_variables)
///     .build_and_expand(&index_uri_variables)
///     .unwrap();
/// assert_eq!(uri.to_string(), "http://svc/a/7/b/9");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriBuilder {
    template: String,
    named: HashMap<String, String>,
    query: Vec<(String, String)>,
}

impl UriBuilder {
    /// Starts a builder from a base address already joined with its path template.
    pub fn from_uri_string(uri: impl Into<String>) -> Self {
        Self {
            template: uri.into(),
            ..Self::default()
        }
    }

    /// Returns the unexpanded template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Appends one query pair.
    pub fn query_param(&mut self, name: impl Display, value: impl Display) -> &mut Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends every value under the same query key, preserving order.
    pub fn query_param_values<I>(&mut self, name: impl Display, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let name = name.to_string();
        for value in values {
            self.query.push((name.clone(), value.to_string()));
        }
        self
    }

    /// Registers named placeholder values for the named expansion pass.
    pub fn uri_variables<K, V>(&mut self, variables: &HashMap<K, V>) -> &mut Self
    where
        K: AsRef<str>,
        V: Display,
    {
        for (name, value) in variables {
            self.named
                .insert(name.as_ref().to_string(), value.to_string());
        }
        self
    }

    /// Resolves every placeholder by name only.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::UnresolvedVariable`] if a placeholder has no named value,
    /// or [`Error::InvalidTemplate`] if the template is malformed.
    pub fn build(&self) -> Result<UriComponents> {
        self.expand(None::<&[String]>)
    }

    /// Resolves named placeholders, then fills the remaining ones from `values`
    /// in order of appearance.
    ///
    /// Surplus values are ignored.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::MissingVariable`] if `values` runs out, or
    /// [`Error::InvalidTemplate`] if the template is malformed.
    pub fn build_and_expand<V: Display>(&self, values: &[V]) -> Result<UriComponents> {
        self.expand(Some(values))
    }

    fn expand<V: Display>(&self, positional: Option<&[V]>) -> Result<UriComponents> {
        let segments = parse_template(&self.template)?;
        let mut next = positional.map(|values| values.iter());
        let mut expanded = String::with_capacity(self.template.len());

        for segment in segments {
            match segment {
                Segment::Literal(text) => expanded.push_str(text),
                Segment::Variable(name) => {
                    if let Some(value) = self.named.get(name) {
                        expanded.extend(utf8_percent_encode(value, PATH_SEGMENT));
                        continue;
                    }
                    let value = match next.as_mut() {
                        Some(values) => values.next().ok_or_else(|| Error::MissingVariable {
                            name: name.to_string(),
                            template: self.template.clone(),
                        })?,
                        None => {
                            return Err(Error::UnresolvedVariable {
                                name: name.to_string(),
                                template: self.template.clone(),
                            });
                        }
                    };
                    let value = value.to_string();
                    expanded.extend(utf8_percent_encode(&value, PATH_SEGMENT));
                }
            }
        }

        tracing::trace!(
            template = %self.template,
            expanded = %expanded,
            query_pairs = self.query.len(),
            "expanded URI template"
        );

        Ok(UriComponents {
            expanded,
            query: self.query.clone(),
        })
    }
}

/// A fully expanded URI waiting to be converted into a [`Url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriComponents {
    expanded: String,
    query: Vec<(String, String)>,
}

impl UriComponents {
    /// Returns the expanded address without the appended query pairs.
    pub fn path(&self) -> &str {
        &self.expanded
    }

    /// Returns the appended query pairs in append order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Converts to a parsed [`Url`], form-encoding the appended query pairs.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::InvalidUri`] if the expanded address does not parse.
    pub fn to_uri(&self) -> Result<Url> {
        let mut url = Url::parse(&self.expanded)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

impl fmt::Display for UriComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expanded)?;
        let mut separator = if self.expanded.contains('?') { '&' } else { '?' };
        for (name, value) in &self.query {
            write!(f, "{separator}{name}={value}")?;
            separator = '&';
        }
        Ok(())
    }
}
