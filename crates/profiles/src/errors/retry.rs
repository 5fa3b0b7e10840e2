/// Classification for retry policy.
///
/// Used by the fetch loop to decide whether a failed attempt is worth
/// reissuing.
///
/// | Class | Reissue request? | Consumes retry budget? |
/// |-------|------------------|------------------------|
/// | `Transient` | Yes, after the configured delay | Yes |
/// | `Never` | No | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Server-side or transport failure (5xx, timeout, refused connection).
    /// The identical request may succeed later.
    Transient,

    /// Client error, malformed payload or invalid arguments.
    /// Reissuing the same request cannot change the outcome.
    Never,
}

impl RetryClass {
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }
}
