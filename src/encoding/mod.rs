//! Utilities for percent-encoding.
//!
//! Encoding leaves the RFC 2396 unreserved characters (ALPHA, DIGIT and
//! `_-!.~'()*`) intact and renders every other byte of the UTF-8 encoding
//! as an uppercase `%XX` escape. Decoding is lenient by default: malformed
//! escapes come out as U+FFFD instead of failing, in keeping with the
//! garbage-in, garbage-out contract of the crate.

pub(crate) mod table;

use crate::error::{DecodeError, DecodeErrorKind};
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::{borrow::Cow, fmt, hash, str};

use table::{decode_octet, HEX_TABLE, UNRESERVED};

/// The replacement for a malformed escape or an invalid octet sequence.
const REPLACEMENT: char = '\u{FFFD}';

fn allowed(byte: u8, allow: &str) -> bool {
    UNRESERVED.allows(byte) || (byte.is_ascii() && allow.as_bytes().contains(&byte))
}

/// Percent-encodes a string, leaving only the unreserved characters intact.
///
/// Returns `Cow::Borrowed` when nothing needed encoding.
///
/// # Examples
///
/// ```
/// use lenient_uri::encoding::encode;
///
/// assert_eq!(encode("hello world"), "hello%20world");
/// assert_eq!(encode("unchanged"), "unchanged");
/// ```
pub fn encode(s: &str) -> Cow<'_, str> {
    encode_allowing(s, "")
}

/// Percent-encodes a string, additionally allowing the characters in `allow`.
///
/// # Examples
///
/// ```
/// use lenient_uri::encoding::encode_allowing;
///
/// assert_eq!(encode_allowing("a/b c", "/"), "a/b%20c");
/// ```
pub fn encode_allowing<'a>(s: &'a str, allow: &str) -> Cow<'a, str> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && allowed(bytes[i], allow) {
        i += 1;
    }
    if i == bytes.len() {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..i]);
    for &byte in &bytes[i..] {
        if allowed(byte, allow) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX_TABLE[byte as usize * 2] as char);
            out.push(HEX_TABLE[byte as usize * 2 + 1] as char);
        }
    }
    Cow::Owned(out)
}

/// Decodes `%XX` escapes in a string leniently.
///
/// Malformed or truncated escapes and invalid UTF-8 octet runs are replaced
/// with U+FFFD. Returns `Cow::Borrowed` when the input contains no escapes.
/// A `+` is left as-is.
///
/// # Examples
///
/// ```
/// use lenient_uri::encoding::decode;
///
/// assert_eq!(decode("hello%20world"), "hello world");
/// assert_eq!(decode("100%"), "100\u{FFFD}");
/// ```
pub fn decode(s: &str) -> Cow<'_, str> {
    if !s.bytes().any(|b| b == b'%') {
        return Cow::Borrowed(s);
    }
    match decode_inner(s, false, false) {
        Ok(out) => Cow::Owned(out),
        Err(_) => unreachable!("lenient decoding cannot fail"),
    }
}

/// Decodes `%XX` escapes, failing on the first malformed escape.
///
/// When `convert_plus` is set, a `+` outside of an escape decodes to a
/// space. Invalid UTF-8 octet runs are still replaced with U+FFFD; only the
/// escape syntax itself is checked.
///
/// # Errors
///
/// Returns a [`DecodeError`] carrying the index of the offending `%`.
///
/// # Examples
///
/// ```
/// use lenient_uri::encoding::decode_strict;
///
/// assert_eq!(decode_strict("a+b%2Fc", true).unwrap(), "a b/c");
/// assert_eq!(decode_strict("ab%GG", false).unwrap_err().index(), 2);
/// ```
pub fn decode_strict(s: &str, convert_plus: bool) -> Result<String, DecodeError> {
    decode_inner(s, convert_plus, true)
}

/// Lenient decoding with `+` converted to space, for query parameter values.
pub(crate) fn decode_plus(s: &str) -> String {
    match decode_inner(s, true, false) {
        Ok(out) => out,
        Err(_) => unreachable!("lenient decoding cannot fail"),
    }
}

fn decode_inner(s: &str, convert_plus: bool, strict: bool) -> Result<String, DecodeError> {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    // Escaped octets accumulate here and are flushed through UTF-8
    // validation on every transition to an unescaped character, so that a
    // multi-byte sequence split across several escapes stays one character.
    let mut pending = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len() {
                    if strict {
                        return Err(DecodeError {
                            index: i,
                            kind: DecodeErrorKind::UnexpectedEnd,
                        });
                    }
                    flush(&mut out, &mut pending);
                    out.push(REPLACEMENT);
                    break;
                }
                match decode_octet(bytes[i + 1], bytes[i + 2]) {
                    Some(octet) => {
                        pending.push(octet);
                        i += 3;
                    }
                    None => {
                        if strict {
                            return Err(DecodeError {
                                index: i,
                                kind: DecodeErrorKind::InvalidOctet,
                            });
                        }
                        flush(&mut out, &mut pending);
                        out.push(REPLACEMENT);
                        // Consume the escape up to the first bad character.
                        i += if decode_octet(bytes[i + 1], b'0').is_some() {
                            3
                        } else {
                            2
                        };
                    }
                }
            }
            b'+' => {
                flush(&mut out, &mut pending);
                out.push(if convert_plus { ' ' } else { '+' });
                i += 1;
            }
            _ => {
                flush(&mut out, &mut pending);
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b'%' | b'+') {
                    i += 1;
                }
                // '%' and '+' are ASCII, so these are char boundaries.
                out.push_str(&s[start..i]);
            }
        }
    }

    flush(&mut out, &mut pending);
    Ok(out)
}

fn flush(out: &mut String, pending: &mut Vec<u8>) {
    if !pending.is_empty() {
        out.push_str(&String::from_utf8_lossy(pending));
        pending.clear();
    }
}

/// Percent-encoded string slices.
///
/// An `EncStr` makes no guarantee that its contents are well-formed; it
/// merely records that the string is in its encoded representation. Methods
/// that decode it are as forgiving as [`decode`].
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EncStr {
    inner: str,
}

impl EncStr {
    /// An empty `EncStr`.
    pub const EMPTY: &'static EncStr = EncStr::new("");

    /// Wraps a string slice assumed to be percent-encoded.
    ///
    /// No validation is performed; garbage in, garbage out.
    #[ref_cast_custom]
    pub const fn new(s: &str) -> &EncStr;

    /// Returns the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the encoded form in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the encoded form is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decodes the slice leniently.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::encoding::EncStr;
    ///
    /// assert_eq!(EncStr::new("a%20b").decode(), "a b");
    /// ```
    pub fn decode(&self) -> Cow<'_, str> {
        decode(&self.inner)
    }

    /// Splits the slice on the given delimiter.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::encoding::EncStr;
    ///
    /// let mut split = EncStr::new("x=1&y=2").split('&');
    /// assert_eq!(split.next().map(EncStr::as_str), Some("x=1"));
    /// assert_eq!(split.next().map(EncStr::as_str), Some("y=2"));
    /// assert_eq!(split.next(), None);
    /// ```
    pub fn split(&self, delim: char) -> Split<'_> {
        Split {
            inner: self.inner.split(delim),
        }
    }
}

/// An iterator over subslices of an [`EncStr`] separated by a delimiter.
///
/// This struct is created by [`EncStr::split`].
#[derive(Clone)]
pub struct Split<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EncStr;

    #[inline]
    fn next(&mut self) -> Option<&'a EncStr> {
        self.inner.next().map(EncStr::new)
    }
}

impl fmt::Debug for Split<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Split").finish_non_exhaustive()
    }
}

impl AsRef<str> for EncStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EncStr {
    #[inline]
    fn eq(&self, other: &EncStr) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EncStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<EncStr> for str {
    #[inline]
    fn eq(&self, other: &EncStr) -> bool {
        self == &other.inner
    }
}

impl Eq for EncStr {}

impl hash::Hash for EncStr {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

impl Default for &EncStr {
    #[inline]
    fn default() -> Self {
        EncStr::EMPTY
    }
}

impl fmt::Debug for EncStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for EncStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
