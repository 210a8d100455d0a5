use std::fmt;

const REDACTED: &str = "<redacted>";

/// Holds a sensitive value (merchant salt, signing secret) so it cannot leak into logs.
///
/// `Debug` and `Display` both print a redaction marker, and the wrapper deliberately implements neither
/// `Deref` nor serde, so the inner value cannot travel anywhere by accident. The only ways at it are
/// [`Secret::expose`] and [`Secret::into_inner`], which keeps every access grep-able.
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Grants read access to the wrapped value.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Unwraps the value, giving up the redaction guarantees.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Default> Default for Secret<T> {
    fn default() -> Self {
        Self(T::default())
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
