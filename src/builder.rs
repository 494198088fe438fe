//! A builder for URI references.

use crate::{
    encoding,
    error::{BuildError, BuildErrorKind},
    part::{Part, PathPart},
    Uri,
};

/// A builder that assembles a [`Uri`] from discrete components.
///
/// This struct is created by [`Uri::builder`] or [`Uri::build_upon`].
///
/// Every component may be set either from its decoded form (which gets
/// percent-encoded) or from an already-encoded form via the `encoded_*`
/// methods. A URI is either hierarchical or opaque: setting the authority,
/// path or query discards any opaque part set before.
///
/// # Examples
///
/// ```
/// use lenient_uri::Uri;
///
/// let uri = Uri::builder()
///     .scheme("https")
///     .authority("example.com")
///     .path("/over there")
///     .append_query_parameter("name", "ferret")
///     .build()?;
///
/// assert_eq!(
///     uri.to_string(),
///     "https://example.com/over%20there?name=ferret"
/// );
/// # Ok::<_, lenient_uri::BuildError>(())
/// ```
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct Builder {
    pub(crate) scheme: Option<String>,
    pub(crate) opaque: Option<Part>,
    pub(crate) authority: Option<Part>,
    pub(crate) path: Option<PathPart>,
    pub(crate) query: Option<Part>,
    pub(crate) fragment: Option<Part>,
}

impl Builder {
    /// Creates a builder with no components set.
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Sets the scheme. Any `://` in the input is stripped.
    pub fn scheme(mut self, scheme: &str) -> Builder {
        self.scheme = Some(scheme.replace("://", ""));
        self
    }

    /// Encodes and sets the opaque scheme-specific part.
    pub fn opaque_part(mut self, ssp: &str) -> Builder {
        self.opaque = Some(Part::from_decoded(ssp));
        self
    }

    /// Sets the already-encoded opaque scheme-specific part.
    pub fn encoded_opaque_part(mut self, ssp: &str) -> Builder {
        self.opaque = Some(Part::from_encoded(ssp));
        self
    }

    /// Encodes and sets the authority.
    pub fn authority(mut self, authority: &str) -> Builder {
        // This URI will be hierarchical.
        self.opaque = None;
        self.authority = Some(Part::from_decoded(authority));
        self
    }

    /// Sets the already-encoded authority.
    pub fn encoded_authority(mut self, authority: &str) -> Builder {
        self.opaque = None;
        self.authority = Some(Part::from_encoded(authority));
        self
    }

    /// Sets the path, encoding everything but `/` as necessary.
    ///
    /// If the path is relative and a scheme and/or authority is set,
    /// [`build`](Self::build) prepends a `/`.
    pub fn path(mut self, path: &str) -> Builder {
        self.opaque = None;
        self.path = Some(PathPart::from_decoded(path));
        self
    }

    /// Sets the already-encoded path.
    pub fn encoded_path(mut self, path: &str) -> Builder {
        self.opaque = None;
        self.path = Some(PathPart::from_encoded(path));
        self
    }

    /// Encodes the segment and appends it to the path.
    pub fn append_path(mut self, segment: &str) -> Builder {
        self.opaque = None;
        self.path = Some(PathPart::append_decoded_segment(self.path.as_ref(), segment));
        self
    }

    /// Appends the already-encoded segment to the path.
    pub fn append_encoded_path(mut self, segment: &str) -> Builder {
        self.opaque = None;
        self.path = Some(PathPart::append_encoded_segment(self.path.as_ref(), segment));
        self
    }

    /// Encodes and sets the query.
    pub fn query(mut self, query: &str) -> Builder {
        self.opaque = None;
        self.query = Some(Part::from_decoded(query));
        self
    }

    /// Sets the already-encoded query.
    pub fn encoded_query(mut self, query: &str) -> Builder {
        self.opaque = None;
        self.query = Some(Part::from_encoded(query));
        self
    }

    /// Removes any previously set query.
    pub fn clear_query(mut self) -> Builder {
        self.opaque = None;
        self.query = None;
        self
    }

    /// Encodes the key and value and appends the parameter to the query.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenient_uri::Uri;
    ///
    /// let uri = Uri::parse("http://a.com/b")
    ///     .build_upon()
    ///     .append_query_parameter("x", "1")
    ///     .append_query_parameter("y", "a b")
    ///     .build()?;
    /// assert_eq!(uri.to_string(), "http://a.com/b?x=1&y=a%20b");
    /// # Ok::<_, lenient_uri::BuildError>(())
    /// ```
    pub fn append_query_parameter(mut self, key: &str, value: &str) -> Builder {
        self.opaque = None;
        let parameter = format!("{}={}", encoding::encode(key), encoding::encode(value));
        self.query = Some(match self.query.take() {
            Some(old) if !old.encoded().is_empty() => {
                Part::from_encoded(format!("{}&{}", old.encoded(), parameter))
            }
            _ => Part::from_encoded(parameter),
        });
        self
    }

    /// Encodes and sets the fragment.
    pub fn fragment(mut self, fragment: &str) -> Builder {
        self.fragment = Some(Part::from_decoded(fragment));
        self
    }

    /// Sets the already-encoded fragment.
    pub fn encoded_fragment(mut self, fragment: &str) -> Builder {
        self.fragment = Some(Part::from_encoded(fragment));
        self
    }

    /// Constructs a [`Uri`] from the accumulated components.
    ///
    /// A hierarchical URI with no path gets the empty path, and a relative
    /// path is made absolute when a scheme or authority is present.
    ///
    /// # Errors
    ///
    /// Fails if an opaque part is set without a scheme.
    pub fn build(self) -> Result<Uri, BuildError> {
        if let Some(opaque) = self.opaque {
            let scheme = match self.scheme {
                Some(scheme) => scheme,
                None => {
                    return Err(BuildError {
                        kind: BuildErrorKind::OpaqueWithoutScheme,
                    })
                }
            };
            return Ok(Uri::from_opaque(scheme, opaque, self.fragment));
        }

        let has_scheme_or_authority = self.scheme.is_some() || self.authority.is_some();
        let path = match self.path {
            None => PathPart::empty(),
            Some(path) if has_scheme_or_authority => path.make_absolute(),
            Some(path) => path,
        };
        Ok(Uri::from_hierarchical(
            self.scheme,
            self.authority,
            path,
            self.query,
            self.fragment,
        ))
    }
}
