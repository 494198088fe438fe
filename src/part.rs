//! Lazily encoded/decoded URI components.

use crate::encoding::{self, EncStr};
use once_cell::sync::OnceCell;

fn cell(value: Option<String>) -> OnceCell<String> {
    match value {
        Some(v) => OnceCell::with_value(v),
        None => OnceCell::new(),
    }
}

/// An immutable pair of the encoded and decoded forms of a URI component.
///
/// A `Part` is constructed from one of the two representations; the other
/// is derived on first access and memoized. At least one cell is always
/// initialized, which the accessors rely on.
#[derive(Clone, Debug)]
pub(crate) struct Part {
    encoded: OnceCell<String>,
    decoded: OnceCell<String>,
}

impl Part {
    pub(crate) fn from_encoded(encoded: impl Into<String>) -> Part {
        Part {
            encoded: OnceCell::with_value(encoded.into()),
            decoded: OnceCell::new(),
        }
    }

    pub(crate) fn from_decoded(decoded: impl Into<String>) -> Part {
        Part {
            encoded: OnceCell::new(),
            decoded: OnceCell::with_value(decoded.into()),
        }
    }

    pub(crate) fn empty() -> Part {
        Part {
            encoded: OnceCell::with_value(String::new()),
            decoded: OnceCell::with_value(String::new()),
        }
    }

    pub(crate) fn encoded(&self) -> &EncStr {
        let s = self.encoded.get_or_init(|| match self.decoded.get() {
            Some(decoded) => encoding::encode(decoded).into_owned(),
            None => unreachable!("a Part holds at least one representation"),
        });
        EncStr::new(s)
    }

    pub(crate) fn decoded(&self) -> &str {
        self.decoded.get_or_init(|| match self.encoded.get() {
            Some(encoded) => encoding::decode(encoded).into_owned(),
            None => unreachable!("a Part holds at least one representation"),
        })
    }

    /// Returns `true` if the component's value is the empty string.
    pub(crate) fn is_empty(&self) -> bool {
        match self.encoded.get() {
            Some(s) => s.is_empty(),
            None => self.decoded.get().map_or(true, |s| s.is_empty()),
        }
    }
}

impl PartialEq for Part {
    fn eq(&self, other: &Part) -> bool {
        self.encoded() == other.encoded()
    }
}

impl Eq for Part {}

/// A [`Part`] specialized for paths.
///
/// Encoding a decoded path leaves `/` intact, and the decoded path segments
/// are derived from the encoded form and memoized.
#[derive(Clone, Debug)]
pub(crate) struct PathPart {
    encoded: OnceCell<String>,
    decoded: OnceCell<String>,
    segments: OnceCell<Vec<String>>,
}

impl PathPart {
    pub(crate) fn from_encoded(encoded: impl Into<String>) -> PathPart {
        PathPart {
            encoded: OnceCell::with_value(encoded.into()),
            decoded: OnceCell::new(),
            segments: OnceCell::new(),
        }
    }

    pub(crate) fn from_decoded(decoded: impl Into<String>) -> PathPart {
        PathPart {
            encoded: OnceCell::new(),
            decoded: OnceCell::with_value(decoded.into()),
            segments: OnceCell::new(),
        }
    }

    pub(crate) fn empty() -> PathPart {
        PathPart {
            encoded: OnceCell::with_value(String::new()),
            decoded: OnceCell::with_value(String::new()),
            segments: OnceCell::new(),
        }
    }

    pub(crate) fn encoded(&self) -> &EncStr {
        let s = self.encoded.get_or_init(|| match self.decoded.get() {
            Some(decoded) => encoding::encode_allowing(decoded, "/").into_owned(),
            None => unreachable!("a PathPart holds at least one representation"),
        });
        EncStr::new(s)
    }

    pub(crate) fn decoded(&self) -> &str {
        self.decoded.get_or_init(|| match self.encoded.get() {
            Some(encoded) => encoding::decode(encoded).into_owned(),
            None => unreachable!("a PathPart holds at least one representation"),
        })
    }

    /// The decoded path segments: the non-empty spans between slashes.
    pub(crate) fn segments(&self) -> &[String] {
        self.segments.get_or_init(|| {
            self.encoded()
                .split('/')
                .filter(|seg| !seg.is_empty())
                .map(|seg| seg.decode().into_owned())
                .collect()
        })
    }

    /// Prefixes the path with `/` unless it is empty or already absolute.
    ///
    /// Only the representations already computed are rewritten, so no
    /// encoding or decoding work is forced.
    pub(crate) fn make_absolute(self) -> PathPart {
        let raw = match self.encoded.get() {
            Some(s) => s,
            None => match self.decoded.get() {
                Some(s) => s,
                None => unreachable!("a PathPart holds at least one representation"),
            },
        };
        if raw.is_empty() || raw.starts_with('/') {
            return self;
        }
        PathPart {
            encoded: cell(self.encoded.get().map(|s| format!("/{s}"))),
            decoded: cell(self.decoded.get().map(|s| format!("/{s}"))),
            segments: OnceCell::new(),
        }
    }

    /// Appends an already-encoded segment to the path of `old`, joining
    /// with `/` and starting an absolute path when there is none.
    pub(crate) fn append_encoded_segment(old: Option<&PathPart>, segment: &str) -> PathPart {
        let old_path = match old {
            Some(part) => part.encoded().as_str(),
            None => "",
        };
        let new_path = if old_path.is_empty() {
            format!("/{segment}")
        } else if old_path.ends_with('/') {
            format!("{old_path}{segment}")
        } else {
            format!("{old_path}/{segment}")
        };
        PathPart::from_encoded(new_path)
    }

    /// Encodes a segment and appends it to the path of `old`.
    pub(crate) fn append_decoded_segment(old: Option<&PathPart>, segment: &str) -> PathPart {
        let encoded = encoding::encode(segment);
        Self::append_encoded_segment(old, &encoded)
    }
}
