use lenient_uri::Uri;

#[test]
fn parse_absolute_hierarchical() {
    let u = Uri::parse("http://user:pw@example.com:8042/over/there?name=ferret#nose");
    assert!(u.is_hierarchical());
    assert!(!u.is_opaque());
    assert!(u.is_absolute());
    assert_eq!(u.scheme(), Some("http"));
    assert_eq!(u.authority(), Some("user:pw@example.com:8042"));
    assert_eq!(u.userinfo(), Some("user:pw"));
    assert_eq!(u.host(), Some("example.com"));
    assert_eq!(u.port(), Some(8042));
    assert_eq!(u.path(), Some("/over/there"));
    assert_eq!(u.query(), Some("name=ferret"));
    assert_eq!(u.fragment(), Some("nose"));
    assert_eq!(
        u.scheme_specific_part(),
        "//user:pw@example.com:8042/over/there?name=ferret"
    );
}

#[test]
fn parse_relative() {
    let u = Uri::parse("a/b/c?q#f");
    assert!(u.is_relative());
    assert!(u.is_hierarchical());
    assert_eq!(u.scheme(), None);
    assert_eq!(u.authority(), None);
    assert_eq!(u.host(), None);
    assert_eq!(u.path(), Some("a/b/c"));
    assert_eq!(u.query(), Some("q"));
    assert_eq!(u.fragment(), Some("f"));
    assert_eq!(u.path_segments(), ["a", "b", "c"]);
}

#[test]
fn parse_opaque() {
    let u = Uri::parse("mailto:nobody@example.com#frag");
    assert!(u.is_opaque());
    assert!(u.is_absolute());
    assert_eq!(u.scheme(), Some("mailto"));
    assert_eq!(u.scheme_specific_part(), "nobody@example.com");
    assert_eq!(u.authority(), None);
    assert_eq!(u.userinfo(), None);
    assert_eq!(u.host(), None);
    assert_eq!(u.port(), None);
    assert_eq!(u.path(), None);
    assert_eq!(u.path_segments(), [""; 0]);
    assert_eq!(u.last_path_segment(), None);
    assert_eq!(u.fragment(), Some("frag"));
}

#[test]
fn opaque_ssp_spans_to_fragment() {
    let u = Uri::parse("scheme:opaque#frag");
    assert!(u.is_opaque());
    assert_eq!(u.scheme_specific_part(), "opaque");
    assert_eq!(u.fragment(), Some("frag"));
}

#[test]
fn round_trip_is_exact() {
    // Parsing never rewrites the input, however strange.
    for s in [
        "",
        "http://a.com",
        "http:///",
        "HTTP://a.com/CasePreserved",
        "scheme:opaque?query#frag",
        "http://a.com/%zz%2",
        "//host.only",
        "#onlyfragment",
        "http://a.com/b?",
    ] {
        assert_eq!(Uri::parse(s).as_str(), s);
        assert_eq!(Uri::parse(s).to_string(), s);
    }
}

#[test]
fn empty_uri() {
    let u = Uri::parse("");
    assert!(u.is_hierarchical());
    assert!(u.is_relative());
    assert_eq!(u.scheme(), None);
    assert_eq!(u.path(), Some(""));
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), None);
    assert_eq!(u.scheme_specific_part(), "");
}

#[test]
fn authority_requires_double_slash() {
    // A single slash after the scheme means a rooted path, no authority.
    let u = Uri::parse("file:/tmp/x");
    assert!(u.is_hierarchical());
    assert_eq!(u.authority(), None);
    assert_eq!(u.path(), Some("/tmp/x"));

    let u = Uri::parse("http://");
    assert_eq!(u.authority(), Some(""));
    assert_eq!(u.path(), Some(""));
}

#[test]
fn backslash_terminates_authority() {
    let u = Uri::parse("http://a.com\\evil.com/b");
    assert_eq!(u.host(), Some("a.com"));
    assert_eq!(u.path(), Some("\\evil.com/b"));
}

#[test]
fn query_before_path_means_empty_path() {
    let u = Uri::parse("http://a.com?q=1");
    assert_eq!(u.authority(), Some("a.com"));
    assert_eq!(u.path(), Some(""));
    assert_eq!(u.query(), Some("q=1"));
}

#[test]
fn question_mark_inside_fragment_is_not_a_query() {
    let u = Uri::parse("http://a.com/b#frag?not-a-query");
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), Some("frag?not-a-query"));
}

#[test]
fn last_at_sign_splits_userinfo() {
    // The host starts after the last '@', like the original RFC 2396 grammar.
    let u = Uri::parse("http://a@b@c.com/");
    assert_eq!(u.userinfo(), Some("a@b"));
    assert_eq!(u.host(), Some("c.com"));
}

#[test]
fn unparsable_port_is_none() {
    assert_eq!(Uri::parse("http://a.com:80/").port(), Some(80));
    assert_eq!(Uri::parse("http://a.com:/").port(), None);
    assert_eq!(Uri::parse("http://a.com:99999999/").port(), None);
    assert_eq!(Uri::parse("http://a.com/").port(), None);
    // 'x' before the digits stops the reverse scan.
    assert_eq!(Uri::parse("http://a.com:x80/").port(), None);
}

#[test]
fn components_decode_lazily() {
    let u = Uri::parse("http://ex%61mple.com/a%20b/c%2Fd?k%3Dv#fr%61g");
    assert_eq!(u.host(), Some("example.com"));
    assert_eq!(u.path(), Some("/a b/c/d"));
    assert_eq!(u.encoded_path().map(|p| p.as_str()), Some("/a%20b/c%2Fd"));
    assert_eq!(u.query(), Some("k=v"));
    assert_eq!(u.encoded_query().map(|q| q.as_str()), Some("k%3Dv"));
    assert_eq!(u.fragment(), Some("frag"));
}

#[test]
fn encoded_slash_is_one_segment() {
    // Splitting happens on the encoded form, so %2F stays inside a segment.
    let u = Uri::parse("http://a.com/x%2Fy/z");
    assert_eq!(u.path_segments(), ["x/y", "z"]);
    assert_eq!(u.last_path_segment(), Some("z"));
}

#[test]
fn path_segments_skip_empty_spans() {
    assert_eq!(Uri::parse("http://a.com//b///c/").path_segments(), ["b", "c"]);
    assert_eq!(Uri::parse("http://a.com/").path_segments(), [""; 0]);
    assert_eq!(Uri::parse("http://a.com").path_segments(), [""; 0]);
}

#[test]
fn malformed_escapes_decode_to_replacement() {
    let u = Uri::parse("http://a.com/a%2Xb");
    assert_eq!(u.path(), Some("/a\u{FFFD}b"));
    let u = Uri::parse("http://a.com/trailing%2");
    assert_eq!(u.path(), Some("/trailing\u{FFFD}"));
}

#[test]
fn from_str_is_parse() {
    let u: Uri = "http://a.com/b".parse().unwrap();
    assert_eq!(u, Uri::parse("http://a.com/b"));
}
