//! Internal URI representations.
//!
//! A [`Repr`] is one of three variants: a string-backed URI that parses its
//! components on demand, a hierarchical URI assembled from parts, or an
//! opaque URI. All derived state is memoized in `OnceCell`s, so a variant is
//! immutable after construction and cheap to query repeatedly.

use crate::{
    encoding::{self, EncStr},
    part::{Part, PathPart},
};
use log::warn;
use once_cell::sync::OnceCell;

#[derive(Clone, Debug)]
pub(crate) enum Repr {
    Str(StrUri),
    Hierarchical(HierarchicalUri),
    Opaque(OpaqueUri),
}

impl Repr {
    pub(crate) fn is_hierarchical(&self) -> bool {
        match self {
            Repr::Str(u) => u.is_hierarchical(),
            Repr::Hierarchical(_) => true,
            Repr::Opaque(_) => false,
        }
    }

    pub(crate) fn scheme(&self) -> Option<&str> {
        match self {
            Repr::Str(u) => u.scheme(),
            Repr::Hierarchical(u) => u.scheme.as_deref(),
            Repr::Opaque(u) => Some(&u.scheme),
        }
    }

    pub(crate) fn ssp_part(&self) -> &Part {
        match self {
            Repr::Str(u) => u.ssp_part(),
            Repr::Hierarchical(u) => u.ssp_part(),
            Repr::Opaque(u) => &u.ssp,
        }
    }

    pub(crate) fn authority_part(&self) -> Option<&Part> {
        match self {
            Repr::Str(u) => u.authority_part(),
            Repr::Hierarchical(u) => u.authority.as_ref(),
            Repr::Opaque(_) => None,
        }
    }

    pub(crate) fn path_part(&self) -> Option<&PathPart> {
        match self {
            Repr::Str(u) => u.path_part(),
            Repr::Hierarchical(u) => Some(&u.path),
            Repr::Opaque(_) => None,
        }
    }

    pub(crate) fn query_part(&self) -> Option<&Part> {
        match self {
            Repr::Str(u) => u.query_part(),
            Repr::Hierarchical(u) => u.query.as_ref(),
            Repr::Opaque(_) => None,
        }
    }

    pub(crate) fn fragment_part(&self) -> Option<&Part> {
        match self {
            Repr::Str(u) => u.fragment_part(),
            Repr::Hierarchical(u) => u.fragment.as_ref(),
            Repr::Opaque(u) => u.fragment.as_ref(),
        }
    }

    /// The userinfo/host/port caches, absent for opaque URIs.
    pub(crate) fn auth_cache(&self) -> Option<&AuthorityCache> {
        match self {
            Repr::Str(u) => Some(&u.auth),
            Repr::Hierarchical(u) => Some(&u.auth),
            Repr::Opaque(_) => None,
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        match self {
            Repr::Str(u) => &u.raw,
            Repr::Hierarchical(u) => u.as_str(),
            Repr::Opaque(u) => u.as_str(),
        }
    }
}

/// A URI backed by its raw string form.
///
/// Separator indices and component parts are found on first use and cached;
/// the raw string is never rewritten, so `as_str` is the identity.
#[derive(Clone, Debug)]
pub(crate) struct StrUri {
    raw: String,
    scheme_sep: OnceCell<Option<usize>>,
    fragment_sep: OnceCell<Option<usize>>,
    ssp: OnceCell<Part>,
    authority: OnceCell<Option<Part>>,
    path: OnceCell<Option<PathPart>>,
    query: OnceCell<Option<Part>>,
    fragment: OnceCell<Option<Part>>,
    auth: AuthorityCache,
}

impl StrUri {
    pub(crate) fn new(raw: String) -> StrUri {
        StrUri {
            raw,
            scheme_sep: OnceCell::new(),
            fragment_sep: OnceCell::new(),
            ssp: OnceCell::new(),
            authority: OnceCell::new(),
            path: OnceCell::new(),
            query: OnceCell::new(),
            fragment: OnceCell::new(),
            auth: AuthorityCache::default(),
        }
    }

    /// Index of the first `:`, or `None` for a relative URI.
    fn scheme_sep(&self) -> Option<usize> {
        *self.scheme_sep.get_or_init(|| self.raw.find(':'))
    }

    /// Index of the first `#` at or after the scheme separator.
    fn fragment_sep(&self) -> Option<usize> {
        *self.fragment_sep.get_or_init(|| {
            let start = self.scheme_sep().unwrap_or(0);
            self.raw[start..].find('#').map(|i| start + i)
        })
    }

    /// Relative URIs are always hierarchical; absolute URIs are
    /// hierarchical iff the scheme-specific part starts with `/`.
    pub(crate) fn is_hierarchical(&self) -> bool {
        match self.scheme_sep() {
            None => true,
            Some(ssi) => self.raw.len() > ssi + 1 && self.raw.as_bytes()[ssi + 1] == b'/',
        }
    }

    pub(crate) fn scheme(&self) -> Option<&str> {
        self.scheme_sep().map(|ssi| &self.raw[..ssi])
    }

    /// Everything between the scheme separator and the fragment separator.
    pub(crate) fn ssp_part(&self) -> &Part {
        self.ssp.get_or_init(|| {
            let start = self.scheme_sep().map_or(0, |ssi| ssi + 1);
            let end = self.fragment_sep().unwrap_or(self.raw.len());
            Part::from_encoded(&self.raw[start..end])
        })
    }

    pub(crate) fn authority_part(&self) -> Option<&Part> {
        self.authority
            .get_or_init(|| {
                parse_authority(&self.raw, self.scheme_sep()).map(Part::from_encoded)
            })
            .as_ref()
    }

    pub(crate) fn path_part(&self) -> Option<&PathPart> {
        self.path
            .get_or_init(|| {
                if let Some(ssi) = self.scheme_sep() {
                    // Opaque URIs have no path.
                    if self.raw.len() == ssi + 1 || self.raw.as_bytes()[ssi + 1] != b'/' {
                        return None;
                    }
                }
                Some(PathPart::from_encoded(parse_path(
                    &self.raw,
                    self.scheme_sep(),
                )))
            })
            .as_ref()
    }

    pub(crate) fn query_part(&self) -> Option<&Part> {
        self.query
            .get_or_init(|| {
                let start = self.scheme_sep().unwrap_or(0);
                let qsi = start + self.raw[start..].find('?')?;
                match self.fragment_sep() {
                    None => Some(Part::from_encoded(&self.raw[qsi + 1..])),
                    // A '?' inside the fragment is not a query.
                    Some(fsi) if fsi < qsi => None,
                    Some(fsi) => Some(Part::from_encoded(&self.raw[qsi + 1..fsi])),
                }
            })
            .as_ref()
    }

    pub(crate) fn fragment_part(&self) -> Option<&Part> {
        self.fragment
            .get_or_init(|| {
                self.fragment_sep()
                    .map(|fsi| Part::from_encoded(&self.raw[fsi + 1..]))
            })
            .as_ref()
    }
}

/// Parses an authority out of a URI string, given the scheme separator
/// index. The authority is present iff `//` immediately follows the
/// separator; it extends to the next `/`, `\`, `?`, `#` or the end of the
/// string. A `\` terminates the authority because the WHATWG URL standard
/// treats it like `/` in a host.
fn parse_authority(s: &str, scheme_sep: Option<usize>) -> Option<&str> {
    let bytes = s.as_bytes();
    let start = scheme_sep.map_or(0, |ssi| ssi + 1);
    if s.len() > start + 1 && bytes[start] == b'/' && bytes[start + 1] == b'/' {
        let mut end = start + 2;
        while end < s.len() && !matches!(bytes[end], b'/' | b'\\' | b'?' | b'#') {
            end += 1;
        }
        Some(&s[start + 2..end])
    } else {
        None
    }
}

/// Parses the path span of a hierarchical URI string, skipping over any
/// authority.
fn parse_path(s: &str, scheme_sep: Option<usize>) -> &str {
    let bytes = s.as_bytes();
    let start = scheme_sep.map_or(0, |ssi| ssi + 1);

    let mut path_start = start;
    if s.len() > start + 1 && bytes[start] == b'/' && bytes[start + 1] == b'/' {
        path_start = start + 2;
        while path_start < s.len() {
            match bytes[path_start] {
                b'?' | b'#' => return "",
                b'/' | b'\\' => break,
                _ => path_start += 1,
            }
        }
    }

    let mut path_end = path_start;
    while path_end < s.len() && !matches!(bytes[path_end], b'?' | b'#') {
        path_end += 1;
    }
    &s[path_start..path_end]
}

/// A hierarchical URI assembled from parts.
#[derive(Clone, Debug)]
pub(crate) struct HierarchicalUri {
    scheme: Option<String>,
    authority: Option<Part>,
    path: PathPart,
    query: Option<Part>,
    fragment: Option<Part>,
    ssp: OnceCell<Part>,
    string: OnceCell<String>,
    auth: AuthorityCache,
}

impl HierarchicalUri {
    pub(crate) fn new(
        scheme: Option<String>,
        authority: Option<Part>,
        path: PathPart,
        query: Option<Part>,
        fragment: Option<Part>,
    ) -> HierarchicalUri {
        // With a scheme or authority present the path must be absolute.
        let has_scheme_or_authority = scheme.as_deref().map_or(false, |s| !s.is_empty())
            || authority.as_ref().map_or(false, |a| !a.is_empty());
        let path = if has_scheme_or_authority {
            path.make_absolute()
        } else {
            path
        };
        HierarchicalUri {
            scheme,
            authority,
            path,
            query,
            fragment,
            ssp: OnceCell::new(),
            string: OnceCell::new(),
            auth: AuthorityCache::default(),
        }
    }

    fn append_ssp_to(&self, out: &mut String) {
        if let Some(authority) = &self.authority {
            // Even an empty authority keeps its "//".
            out.push_str("//");
            out.push_str(authority.encoded().as_str());
        }
        out.push_str(self.path.encoded().as_str());
        if let Some(query) = &self.query {
            if !query.is_empty() {
                out.push('?');
                out.push_str(query.encoded().as_str());
            }
        }
    }

    pub(crate) fn ssp_part(&self) -> &Part {
        self.ssp.get_or_init(|| {
            let mut out = String::new();
            self.append_ssp_to(&mut out);
            Part::from_encoded(out)
        })
    }

    pub(crate) fn as_str(&self) -> &str {
        self.string.get_or_init(|| {
            let mut out = String::new();
            if let Some(scheme) = &self.scheme {
                out.push_str(scheme);
                out.push(':');
            }
            self.append_ssp_to(&mut out);
            if let Some(fragment) = &self.fragment {
                if !fragment.is_empty() {
                    out.push('#');
                    out.push_str(fragment.encoded().as_str());
                }
            }
            out
        })
    }
}

/// An opaque URI: scheme, unstructured scheme-specific part, fragment.
#[derive(Clone, Debug)]
pub(crate) struct OpaqueUri {
    pub(crate) scheme: String,
    pub(crate) ssp: Part,
    pub(crate) fragment: Option<Part>,
    string: OnceCell<String>,
}

impl OpaqueUri {
    pub(crate) fn new(scheme: String, ssp: Part, fragment: Option<Part>) -> OpaqueUri {
        OpaqueUri {
            scheme,
            ssp,
            fragment,
            string: OnceCell::new(),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        self.string.get_or_init(|| {
            let mut out = String::new();
            out.push_str(&self.scheme);
            out.push(':');
            out.push_str(self.ssp.encoded().as_str());
            if let Some(fragment) = &self.fragment {
                if !fragment.is_empty() {
                    out.push('#');
                    out.push_str(fragment.encoded().as_str());
                }
            }
            out
        })
    }
}

/// Memoized userinfo, host and port, all derived from the encoded
/// authority: userinfo is everything up to the last `@`, the port is a
/// trailing all-digit run after a `:`, and the host is the decoded span in
/// between.
#[derive(Clone, Debug, Default)]
pub(crate) struct AuthorityCache {
    userinfo: OnceCell<Option<Part>>,
    host: OnceCell<Option<String>>,
    port: OnceCell<Option<u16>>,
}

impl AuthorityCache {
    pub(crate) fn userinfo_part(&self, authority: Option<&EncStr>) -> Option<&Part> {
        self.userinfo
            .get_or_init(|| {
                let authority = authority?.as_str();
                let end = authority.rfind('@')?;
                Some(Part::from_encoded(&authority[..end]))
            })
            .as_ref()
    }

    pub(crate) fn host(&self, authority: Option<&EncStr>) -> Option<&str> {
        self.host
            .get_or_init(|| {
                let authority = authority?.as_str();
                let start = authority.rfind('@').map_or(0, |i| i + 1);
                let end = find_port_separator(authority).unwrap_or(authority.len());
                Some(encoding::decode(&authority[start..end]).into_owned())
            })
            .as_deref()
    }

    pub(crate) fn port(&self, authority: Option<&EncStr>) -> Option<u16> {
        *self.port.get_or_init(|| {
            let authority = authority?.as_str();
            let sep = find_port_separator(authority)?;
            let digits = &authority[sep + 1..];
            match digits.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("authority {authority:?} has an unparsable port");
                    None
                }
            }
        })
    }
}

/// Reverse-scans for the `:` introducing the port, giving up on the first
/// character from the end that is neither a colon nor an ASCII digit.
fn find_port_separator(authority: &str) -> Option<usize> {
    for (i, byte) in authority.bytes().enumerate().rev() {
        if byte == b':' {
            return Some(i);
        }
        if !byte.is_ascii_digit() {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncStr;

    #[test]
    fn authority_detection() {
        assert_eq!(parse_authority("http://a.com/b", Some(4)), Some("a.com"));
        assert_eq!(parse_authority("http:/a.com/b", Some(4)), None);
        assert_eq!(parse_authority("//a.com/b", None), Some("a.com"));
        assert_eq!(parse_authority("http://a.com\\b", Some(4)), Some("a.com"));
        assert_eq!(parse_authority("http://a.com?q", Some(4)), Some("a.com"));
        assert_eq!(parse_authority("http://", Some(4)), Some(""));
        assert_eq!(parse_authority("mailto:x@y", Some(6)), None);
    }

    #[test]
    fn path_spans() {
        assert_eq!(parse_path("http://a.com/b/c?q#f", Some(4)), "/b/c");
        assert_eq!(parse_path("http://a.com", Some(4)), "");
        assert_eq!(parse_path("http://a.com?q", Some(4)), "");
        assert_eq!(parse_path("http:/rooted", Some(4)), "/rooted");
        assert_eq!(parse_path("a/b/c", None), "a/b/c");
        assert_eq!(parse_path("a/b?q", None), "a/b");
        assert_eq!(parse_path("http://a.com\\b", Some(4)), "\\b");
    }

    #[test]
    fn port_separator() {
        assert_eq!(find_port_separator("h:80"), Some(1));
        assert_eq!(find_port_separator("u@h:80"), Some(3));
        assert_eq!(find_port_separator("h"), None);
        assert_eq!(find_port_separator("h:80x"), None);
        assert_eq!(find_port_separator("h:"), Some(1));
        assert_eq!(find_port_separator(""), None);
    }

    #[test]
    fn authority_cache_parses_everything() {
        let cache = AuthorityCache::default();
        let authority = Some(EncStr::new("bob:pw@example.com:8080"));
        assert_eq!(
            cache.userinfo_part(authority).map(|p| p.decoded()),
            Some("bob:pw")
        );
        assert_eq!(cache.host(authority), Some("example.com"));
        assert_eq!(cache.port(authority), Some(8080));
    }

    #[test]
    fn port_overflow_is_none() {
        let cache = AuthorityCache::default();
        assert_eq!(cache.port(Some(EncStr::new("h:99999999"))), None);
        assert_eq!(cache.port(Some(EncStr::new("h:"))), None);
        assert_eq!(cache.port(None), None);
    }
}
