use lenient_uri::Uri;
use std::path::Path;

#[test]
fn build_hierarchical() {
    let uri = Uri::builder()
        .scheme("https")
        .authority("example.com")
        .path("/over there")
        .fragment("top")
        .build()
        .unwrap();
    assert_eq!(uri.to_string(), "https://example.com/over%20there#top");
    assert_eq!(uri.path(), Some("/over there"));
}

#[test]
fn build_without_authority() {
    let uri = Uri::builder()
        .scheme("file")
        .path("/tmp/x")
        .build()
        .unwrap();
    assert_eq!(uri.to_string(), "file:/tmp/x");
    assert_eq!(uri.authority(), None);
}

#[test]
fn relative_path_is_made_absolute() {
    // A scheme or authority forces a rooted path.
    let uri = Uri::builder()
        .scheme("http")
        .encoded_authority("a.com")
        .path("b/c")
        .build()
        .unwrap();
    assert_eq!(uri.to_string(), "http://a.com/b/c");

    // Without either, the path stays relative.
    let uri = Uri::builder().path("b/c").build().unwrap();
    assert_eq!(uri.to_string(), "b/c");
}

#[test]
fn build_opaque() {
    let uri = Uri::builder()
        .scheme("mailto")
        .opaque_part("nobody@example.com")
        .fragment("frag")
        .build()
        .unwrap();
    assert!(uri.is_opaque());
    assert_eq!(uri.to_string(), "mailto:nobody@example.com#frag");
}

#[test]
fn opaque_without_scheme_fails() {
    let err = Uri::builder().opaque_part("x").build().unwrap_err();
    assert_eq!(err.to_string(), "an opaque URI must have a scheme");
}

#[test]
fn hierarchical_components_discard_opaque_part() {
    let uri = Uri::builder()
        .scheme("x")
        .opaque_part("opaque")
        .encoded_path("/a")
        .build()
        .unwrap();
    assert!(uri.is_hierarchical());
    assert_eq!(uri.to_string(), "x:/a");
}

#[test]
fn scheme_strips_separator() {
    let uri = Uri::builder()
        .scheme("http://")
        .encoded_authority("a.com")
        .build()
        .unwrap();
    assert_eq!(uri.scheme(), Some("http"));
    assert_eq!(uri.to_string(), "http://a.com");
}

#[test]
fn append_path_segments() {
    let uri = Uri::builder()
        .scheme("http")
        .encoded_authority("a.com")
        .append_path("b c")
        .append_encoded_path("d")
        .build()
        .unwrap();
    assert_eq!(uri.to_string(), "http://a.com/b%20c/d");
    assert_eq!(uri.path_segments(), ["b c", "d"]);
}

#[test]
fn append_query_parameters() {
    let uri = Uri::builder()
        .scheme("http")
        .encoded_authority("a.com")
        .encoded_path("/b")
        .append_query_parameter("x", "1")
        .append_query_parameter("y", "a b")
        .build()
        .unwrap();
    assert_eq!(uri.to_string(), "http://a.com/b?x=1&y=a%20b");

    let cleared = uri.build_upon().clear_query().build().unwrap();
    assert_eq!(cleared.to_string(), "http://a.com/b");
}

#[test]
fn build_upon_round_trips() {
    for s in [
        "http://user@a.com:80/b/c?q=1#f",
        "mailto:x@y#f",
        "a/b?q",
        "http://a.com",
    ] {
        let rebuilt = Uri::parse(s).build_upon().build().unwrap();
        assert_eq!(rebuilt.to_string(), s, "rebuilding {s:?}");
    }
}

#[test]
fn build_upon_replaces_components() {
    let uri = Uri::parse("http://a.com/b?q=1#f")
        .build_upon()
        .scheme("https")
        .encoded_path("/c")
        .build()
        .unwrap();
    assert_eq!(uri.to_string(), "https://a.com/c?q=1#f");
}

#[test]
fn empty_query_and_fragment_are_elided() {
    let uri = Uri::builder()
        .scheme("http")
        .encoded_authority("a.com")
        .query("")
        .fragment("")
        .build()
        .unwrap();
    assert_eq!(uri.to_string(), "http://a.com");
}

#[test]
fn from_file() {
    let uri = Uri::from_file(Path::new("/tmp/a file.txt"));
    assert_eq!(uri.to_string(), "file:///tmp/a%20file.txt");
    assert_eq!(uri.scheme(), Some("file"));
    assert_eq!(uri.authority(), Some(""));
    assert_eq!(uri.path(), Some("/tmp/a file.txt"));
}

#[test]
fn from_parts() {
    let uri = Uri::from_parts("tel", "800-466-4411", None);
    assert!(uri.is_opaque());
    assert_eq!(uri.to_string(), "tel:800-466-4411");
    assert_eq!(uri.scheme_specific_part(), "800-466-4411");

    let uri = Uri::from_parts("nfc", "a b", Some("f g"));
    assert_eq!(uri.to_string(), "nfc:a%20b#f%20g");
    assert_eq!(uri.fragment(), Some("f g"));
}
