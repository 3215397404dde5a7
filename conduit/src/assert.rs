//! Argument checks emitted into generated constructors.

use crate::error::{Error, Result};

/// Unwraps a required argument, failing with `message` when it is `None`.
///
/// ## Examples
///
/// ```
/// use conduit::assert::not_null;
///
/// assert_eq!(not_null(Some(3), "value must not be null!").unwrap(), 3);
/// assert!(not_null(None::<u8>, "value must not be null!").is_err());
/// ```
pub fn not_null<T>(value: Option<T>, message: &str) -> Result<T> {
    value.ok_or_else(|| Error::null_argument(message))
}
