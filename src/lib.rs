#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! A lenient URI handling library modeled on [RFC 2396].
//!
//! [RFC 2396]: https://datatracker.ietf.org/doc/html/rfc2396/
//!
//! In the interest of performance, this crate performs little to no
//! validation: behavior is undefined for invalid input in the sense that
//! parsing returns garbage rather than an error. Components are kept in
//! whichever representation they were supplied in, and the other form
//! (encoded or decoded) is derived lazily and memoized.
//!
//! A URI is either *hierarchical*, like `http://example.com/a`, where the
//! scheme-specific part starts with `/` (relative URIs are always
//! hierarchical), or *opaque*, like `mailto:nobody@example.com`, where the
//! scheme-specific part is an unstructured string.
//!
//! # Examples
//!
//! ```
//! use lenient_uri::Uri;
//!
//! let uri = Uri::parse("https://example.com/search?q=uri#top");
//! assert!(uri.is_hierarchical());
//! assert_eq!(uri.scheme(), Some("https"));
//! assert_eq!(uri.host(), Some("example.com"));
//! assert_eq!(uri.path(), Some("/search"));
//! assert_eq!(uri.query_parameter("q").as_deref(), Some("uri"));
//! assert_eq!(uri.fragment(), Some("top"));
//! ```
//!
//! # Feature flags
//!
//! - `serde`: Enables `Serialize` and `Deserialize` for [`Uri`], using the
//!   encoded string form.

pub mod encoding;

mod builder;
mod error;
mod fmt;
mod internal;
mod part;

pub use builder::Builder;
pub use error::{BuildError, DecodeError, DecodeErrorKind};

use encoding::EncStr;
use internal::{HierarchicalUri, OpaqueUri, Repr, StrUri};
use part::{Part, PathPart};
use std::{cmp::Ordering, convert::Infallible, hash, path::Path, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The message used when an opaque URI is asked a hierarchical question.
const NOT_HIERARCHICAL: &str = "not a hierarchical URI";

/// An immutable URI reference.
///
/// A `Uri` is a value object: all accessors take `&self`, derived state is
/// computed at most once and cached internally, and equality, ordering and
/// hashing are all over the encoded string form.
#[derive(Clone)]
pub struct Uri {
    repr: Repr,
}

impl Uri {
    /// Parses a URI from its encoded string form.
    ///
    /// Parsing never fails; components are located lazily by separator and
    /// may be garbage if the input is. The string form round-trips exactly:
    /// `Uri::parse(s).to_string() == s`.
    pub fn parse(uri: impl Into<String>) -> Uri {
        Uri {
            repr: Repr::Str(StrUri::new(uri.into())),
        }
    }

    /// Creates a `file:` URI from a path, encoding everything but `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::Uri;
    /// use std::path::Path;
    ///
    /// let uri = Uri::from_file(Path::new("/tmp/notes.txt"));
    /// assert_eq!(uri.to_string(), "file:///tmp/notes.txt");
    /// ```
    pub fn from_file(file: &Path) -> Uri {
        let path = PathPart::from_decoded(file.to_string_lossy());
        Uri::from_hierarchical(
            Some("file".to_owned()),
            Some(Part::empty()),
            path,
            None,
            None,
        )
    }

    /// Creates an opaque URI from its components, encoding the
    /// scheme-specific part and the fragment.
    ///
    /// ```
    /// use lenient_uri::Uri;
    ///
    /// let uri = Uri::from_parts("mailto", "nobody@example.com", None);
    /// assert_eq!(uri.to_string(), "mailto:nobody@example.com");
    /// assert!(uri.is_opaque());
    /// ```
    pub fn from_parts(scheme: &str, ssp: &str, fragment: Option<&str>) -> Uri {
        Uri::from_opaque(
            scheme.to_owned(),
            Part::from_decoded(ssp),
            fragment.map(Part::from_decoded),
        )
    }

    /// Creates a new [`Builder`] with no components set.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a new URI by appending an already-encoded path segment to a
    /// base URI.
    pub fn with_appended_path(base: &Uri, segment: &str) -> Uri {
        match base.build_upon().append_encoded_path(segment).build() {
            Ok(uri) => uri,
            // Appending a path makes the URI hierarchical.
            Err(_) => unreachable!(),
        }
    }

    pub(crate) fn from_hierarchical(
        scheme: Option<String>,
        authority: Option<Part>,
        path: PathPart,
        query: Option<Part>,
        fragment: Option<Part>,
    ) -> Uri {
        Uri {
            repr: Repr::Hierarchical(HierarchicalUri::new(
                scheme, authority, path, query, fragment,
            )),
        }
    }

    pub(crate) fn from_opaque(scheme: String, ssp: Part, fragment: Option<Part>) -> Uri {
        Uri {
            repr: Repr::Opaque(OpaqueUri::new(scheme, ssp, fragment)),
        }
    }

    /// Returns `true` if this URI is hierarchical, i.e. if its
    /// scheme-specific part starts with `/`. Relative URIs are always
    /// hierarchical.
    pub fn is_hierarchical(&self) -> bool {
        self.repr.is_hierarchical()
    }

    /// Returns `true` if this URI is opaque, like `mailto:nobody@example.com`.
    pub fn is_opaque(&self) -> bool {
        !self.is_hierarchical()
    }

    /// Returns `true` if this URI has no explicit scheme.
    pub fn is_relative(&self) -> bool {
        self.scheme().is_none()
    }

    /// Returns `true` if this URI has an explicit scheme.
    pub fn is_absolute(&self) -> bool {
        !self.is_relative()
    }

    /// The scheme, or `None` for a relative URI.
    pub fn scheme(&self) -> Option<&str> {
        self.repr.scheme()
    }

    /// The decoded scheme-specific part: everything between the scheme
    /// separator and the fragment separator. For a relative URI this is
    /// everything before the fragment separator.
    pub fn scheme_specific_part(&self) -> &str {
        self.repr.ssp_part().decoded()
    }

    /// The encoded scheme-specific part.
    pub fn encoded_scheme_specific_part(&self) -> &EncStr {
        self.repr.ssp_part().encoded()
    }

    /// The decoded authority, structured as `[userinfo "@"] host [":" port]`
    /// for server addresses, or `None` if not present.
    pub fn authority(&self) -> Option<&str> {
        self.repr.authority_part().map(Part::decoded)
    }

    /// The encoded authority, or `None` if not present.
    pub fn encoded_authority(&self) -> Option<&EncStr> {
        self.repr.authority_part().map(Part::encoded)
    }

    /// The decoded user information from the authority, or `None` if not
    /// present.
    pub fn userinfo(&self) -> Option<&str> {
        let cache = self.repr.auth_cache()?;
        Some(cache.userinfo_part(self.encoded_authority())?.decoded())
    }

    /// The encoded user information from the authority, or `None` if not
    /// present.
    pub fn encoded_userinfo(&self) -> Option<&EncStr> {
        let cache = self.repr.auth_cache()?;
        Some(cache.userinfo_part(self.encoded_authority())?.encoded())
    }

    /// The decoded host from the authority, or `None` if not present.
    pub fn host(&self) -> Option<&str> {
        let cache = self.repr.auth_cache()?;
        cache.host(self.encoded_authority())
    }

    /// The port from the authority, or `None` if absent or unparsable.
    pub fn port(&self) -> Option<u16> {
        let cache = self.repr.auth_cache()?;
        cache.port(self.encoded_authority())
    }

    /// The decoded path, or `None` for an opaque URI.
    pub fn path(&self) -> Option<&str> {
        self.repr.path_part().map(PathPart::decoded)
    }

    /// The encoded path, or `None` for an opaque URI.
    pub fn encoded_path(&self) -> Option<&EncStr> {
        self.repr.path_part().map(PathPart::encoded)
    }

    /// The decoded path segments, each without a leading or trailing `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("a/b/c").path_segments(), ["a", "b", "c"]);
    /// ```
    pub fn path_segments(&self) -> &[String] {
        match self.repr.path_part() {
            Some(path) => path.segments(),
            None => &[],
        }
    }

    /// The decoded last segment in the path, or `None` if the path is empty.
    pub fn last_path_segment(&self) -> Option<&str> {
        self.path_segments().last().map(String::as_str)
    }

    /// The decoded query, or `None` if there isn't one.
    pub fn query(&self) -> Option<&str> {
        self.repr.query_part().map(Part::decoded)
    }

    /// The encoded query, or `None` if there isn't one.
    pub fn encoded_query(&self) -> Option<&EncStr> {
        self.repr.query_part().map(Part::encoded)
    }

    /// The decoded fragment, or `None` if there isn't one.
    pub fn fragment(&self) -> Option<&str> {
        self.repr.fragment_part().map(Part::decoded)
    }

    /// The encoded fragment, or `None` if there isn't one.
    pub fn encoded_fragment(&self) -> Option<&EncStr> {
        self.repr.fragment_part().map(Part::encoded)
    }

    /// The encoded string form. Computed at most once.
    pub fn as_str(&self) -> &str {
        self.repr.as_str()
    }

    fn require_hierarchical(&self) {
        if self.is_opaque() {
            panic!("{}", NOT_HIERARCHICAL);
        }
    }

    /// Searches the query for the first value with the given key, `+`
    /// decoding to a space.
    ///
    /// Returns `Some("")` for a key present without a value.
    ///
    /// # Panics
    ///
    /// Panics if this is not a hierarchical URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::Uri;
    ///
    /// let uri = Uri::parse("http://a.com/b?x=1&y=2#f");
    /// assert_eq!(uri.query_parameter("x").as_deref(), Some("1"));
    /// assert_eq!(uri.query_parameter("z"), None);
    /// ```
    pub fn query_parameter(&self, key: &str) -> Option<String> {
        self.require_hierarchical();
        let query = self.encoded_query()?;
        let encoded_key = encoding::encode(key);
        for segment in query.split('&') {
            let segment = segment.as_str();
            let (name, value) = match segment.find('=') {
                Some(i) => (&segment[..i], Some(&segment[i + 1..])),
                None => (segment, None),
            };
            if name == encoded_key.as_ref() {
                return Some(match value {
                    Some(value) => encoding::decode_plus(value),
                    None => String::new(),
                });
            }
        }
        None
    }

    /// Searches the query for all values with the given key, decoded.
    ///
    /// # Panics
    ///
    /// Panics if this is not a hierarchical URI.
    pub fn query_parameters(&self, key: &str) -> Vec<String> {
        self.require_hierarchical();
        let query = match self.encoded_query() {
            Some(query) => query,
            None => return Vec::new(),
        };
        let encoded_key = encoding::encode(key);
        let mut values = Vec::new();
        for segment in query.split('&') {
            let segment = segment.as_str();
            let (name, value) = match segment.find('=') {
                Some(i) => (&segment[..i], &segment[i + 1..]),
                None => (segment, ""),
            };
            if name == encoded_key.as_ref() {
                values.push(encoding::decode(value).into_owned());
            }
        }
        values
    }

    /// The unique decoded names of all query parameters, in order of first
    /// occurrence.
    ///
    /// # Panics
    ///
    /// Panics if this is not a hierarchical URI.
    pub fn query_parameter_names(&self) -> Vec<String> {
        self.require_hierarchical();
        let query = match self.encoded_query() {
            Some(query) => query,
            None => return Vec::new(),
        };
        let mut names = Vec::new();
        for segment in query.split('&') {
            let segment = segment.as_str();
            let name = match segment.find('=') {
                Some(i) => &segment[..i],
                None => segment,
            };
            let name = encoding::decode(name).into_owned();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Searches the query for the first value with the given key and
    /// interprets it as a boolean: `"false"` and `"0"` are false, any other
    /// value is true, and `default` is returned when the key is absent.
    ///
    /// # Panics
    ///
    /// Panics if this is not a hierarchical URI.
    pub fn boolean_query_parameter(&self, key: &str, default: bool) -> bool {
        match self.query_parameter(key) {
            None => default,
            Some(flag) => {
                let flag = flag.to_lowercase();
                flag != "false" && flag != "0"
            }
        }
    }

    /// Returns an equivalent URI with a lowercase scheme, reusing this
    /// instance when the scheme is absent or already lowercase.
    ///
    /// This does not validate or fix a badly formatted URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::Uri;
    ///
    /// assert_eq!(Uri::parse("HTTP://X").normalize_scheme().scheme(), Some("http"));
    /// ```
    pub fn normalize_scheme(&self) -> Uri {
        let scheme = match self.scheme() {
            Some(scheme) => scheme,
            None => return self.clone(),
        };
        let lower = scheme.to_lowercase();
        if scheme == lower {
            return self.clone();
        }
        match self.build_upon().scheme(&lower).build() {
            Ok(uri) => uri,
            // The scheme is set, so an opaque part cannot be missing one.
            Err(_) => unreachable!(),
        }
    }

    /// Tests whether `prefix` matches this URI on scheme, authority and
    /// whole path segments.
    pub fn is_path_prefix_match(&self, prefix: &Uri) -> bool {
        if self.scheme() != prefix.scheme() || self.authority() != prefix.authority() {
            return false;
        }
        let segments = self.path_segments();
        let prefix_segments = prefix.path_segments();
        segments.len() >= prefix_segments.len()
            && segments[..prefix_segments.len()] == *prefix_segments
    }

    /// A string form with common kinds of PII redacted, safer for logging.
    ///
    /// For `tel:`, `sip:`, `sms:`, `smsto:`, `mailto:` and `nfc:` URIs the
    /// scheme-specific part is masked with `x`, keeping `-`, `@` and `.`.
    /// For all other schemes only the scheme, host and port are kept and
    /// any path is elided.
    pub fn to_safe_string(&self) -> String {
        const MASKED_SCHEMES: [&str; 6] = ["tel", "sip", "sms", "smsto", "mailto", "nfc"];

        let mut out = String::with_capacity(64);
        if let Some(scheme) = self.scheme() {
            out.push_str(scheme);
            out.push(':');
            if MASKED_SCHEMES.iter().any(|&s| scheme.eq_ignore_ascii_case(s)) {
                for c in self.scheme_specific_part().chars() {
                    out.push(if matches!(c, '-' | '@' | '.') { c } else { 'x' });
                }
            } else {
                let has_authority = self.authority().is_some();
                if has_authority {
                    out.push_str("//");
                }
                if let Some(host) = self.host() {
                    out.push_str(host);
                }
                if let Some(port) = self.port() {
                    out.push(':');
                    out.push_str(&port.to_string());
                }
                if has_authority || self.path().is_some() {
                    out.push_str("/...");
                }
            }
        }
        out
    }

    /// Constructs a new [`Builder`], copying the components of this URI.
    pub fn build_upon(&self) -> Builder {
        if self.is_hierarchical() {
            Builder {
                scheme: self.scheme().map(String::from),
                opaque: None,
                authority: self.repr.authority_part().cloned(),
                path: self.repr.path_part().cloned(),
                query: self.repr.query_part().cloned(),
                fragment: self.repr.fragment_part().cloned(),
            }
        } else {
            Builder {
                scheme: self.scheme().map(String::from),
                opaque: Some(self.repr.ssp_part().clone()),
                authority: None,
                path: None,
                query: None,
                fragment: self.repr.fragment_part().cloned(),
            }
        }
    }
}

/// The empty URI, equivalent to `Uri::parse("")`.
impl Default for Uri {
    fn default() -> Uri {
        Uri::from_hierarchical(None, None, PathPart::empty(), None, None)
    }
}

impl FromStr for Uri {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Uri, Infallible> {
        Ok(Uri::parse(s))
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Uri) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Uri {}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Uri) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Uri) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl hash::Hash for Uri {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

#[cfg(feature = "serde")]
impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Uri::parse(s))
    }
}
