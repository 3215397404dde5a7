//! Reified response types.

use std::fmt;
use std::marker::PhantomData;

/// A value standing for the full type `T`, generic arguments included.
///
/// Generated connectors declare one token per distinct response type as an
/// associated constant and pass it to [`Transport::exchange`], which selects
/// its decoder from the token's type parameter.
///
/// [`Transport::exchange`]: crate::Transport::exchange
///
/// ## Examples
///
/// ```
/// use conduit::TypeToken;
///
/// const ORDERS: TypeToken<Vec<String>> = TypeToken::new();
/// assert!(ORDERS.type_name().contains("Vec"));
/// ```
pub struct TypeToken<T: ?Sized>(PhantomData<fn() -> T>);

impl<T: ?Sized> TypeToken<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }

    /// Returns the compiler's name for `T`.
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T: ?Sized> Clone for TypeToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for TypeToken<T> {}

impl<T: ?Sized> Default for TypeToken<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for TypeToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken<{}>", self.type_name())
    }
}
