//! Error types.

/// Detailed cause of a [`DecodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Invalid percent-encoded octet with a non-hexadecimal character.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// Percent-encoded octet truncated by the end of input.
    ///
    /// The error index points to the percent character "%" of the octet.
    UnexpectedEnd,
}

/// An error occurred when strictly decoding a percent-encoded string.
///
/// Only returned by [`decode_strict`](crate::encoding::decode_strict);
/// lenient decoding replaces malformed input instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeError {
    pub(crate) index: usize,
    pub(crate) kind: DecodeErrorKind,
}

impl DecodeError {
    /// Returns the index where the error occurred in the input string.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[inline]
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }
}

impl std::error::Error for DecodeError {}

#[derive(Clone, Copy, Debug)]
pub(crate) enum BuildErrorKind {
    OpaqueWithoutScheme,
}

/// An error occurred when building a URI.
///
/// Returned by [`Builder::build`](crate::Builder::build).
#[derive(Clone, Copy, Debug)]
pub struct BuildError {
    pub(crate) kind: BuildErrorKind,
}

impl std::error::Error for BuildError {}
