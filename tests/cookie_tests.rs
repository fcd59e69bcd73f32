use http_accord::{
    cookie::{InvalidCookieName, InvalidExpires},
    Cookie, Request, ServerRequest, StatusCode,
};

// 2019-01-01 12:21:00 UTC and 2019-12-31 23:42:00 UTC.
const NOW: i64 = 1_546_345_260;
const NEW_YEARS_EVE: i64 = 1_577_835_720;

fn cookie(name: &str, value: &str) -> Cookie {
    Cookie::new_at(name, value, NOW).unwrap()
}

#[test]
fn rejects_invalid_names() {
    for name in ["", "foo=bar", "foo;bar", "foo,bar", "foo bar", "foo\n"] {
        let err = Cookie::new_at(name, "bar", NOW).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.downcast_ref::<InvalidCookieName>().is_some());
    }
}

#[test]
fn lifetime_is_relative_to_the_reference_time() {
    assert_eq!(cookie("foo", "bar").lifetime(), None);
    assert_eq!(cookie("foo", "bar").with_expires(NOW + 3600).lifetime(), Some(3600));
    assert_eq!(cookie("foo", "bar").with_expires(NOW - 3600).lifetime(), Some(-3600));
}

#[test]
fn expiry_is_checked_against_the_reference_time() {
    assert!(!cookie("foo", "bar").is_expired());
    assert!(!cookie("foo", "bar").with_expires(NOW + 3600).is_expired());
    assert!(cookie("foo", "bar").with_expires(NOW - 3600).is_expired());
}

#[test]
fn parses_expires_header_dates() {
    let parsed = cookie("foo", "bar")
        .with_expires_header("Tuesday, 31-Dec-2019 23:42:00 GMT")
        .unwrap();
    assert_eq!(parsed.expires(), Some(NEW_YEARS_EVE));

    let parsed = cookie("foo", "bar")
        .with_expires_header("Tue, 31 Dec 2019 23:42:00 +0000")
        .unwrap();
    assert_eq!(parsed.expires(), Some(NEW_YEARS_EVE));

    let err = cookie("foo", "bar").with_expires_header("soon").unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(err.downcast_ref::<InvalidExpires>().is_some());
}

#[test]
fn expired_cookie_matches_nothing() {
    let expired = cookie("foo", "bar").with_expires(NOW - 3600);
    assert!(!expired.matches(&Request::get("https://example.com/")));
}

#[test]
fn domain_longer_than_host_does_not_match() {
    let scoped = cookie("foo", "bar").with_domain("one.example.com");
    assert!(!scoped.matches(&Request::get("https://example.com/")));
}

#[test]
fn domain_label_mismatch_does_not_match() {
    let scoped = cookie("foo", "bar").with_domain("two.one.example.com");
    assert!(!scoped.matches(&Request::get("https://three.foo.one.example.com/")));
}

#[test]
fn parent_domain_matches_subdomain_hosts() {
    let scoped = cookie("foo", "bar").with_domain("example.com");
    assert!(scoped.matches(&Request::get("https://example.com/")));
    assert!(scoped.matches(&Request::get("https://shop.example.com/")));
    assert!(!scoped.matches(&Request::get("https://example.org/")));
}

#[test]
fn domain_comparison_ignores_case_and_leading_dots() {
    let scoped = cookie("foo", "bar").with_domain(".Example.COM");
    assert_eq!(scoped.domain(), Some("example.com"));
    assert!(scoped.matches(&Request::get("https://EXAMPLE.com/")));
}

#[test]
fn host_only_requires_the_exact_host() {
    let scoped = cookie("foo", "bar")
        .with_domain("one.example.com")
        .with_host_only(true);
    assert!(scoped.matches(&Request::get("https://one.example.com/")));
    assert!(!scoped.matches(&Request::get("https://foo.one.example.com/")));
}

#[test]
fn path_must_prefix_the_request_target() {
    let scoped = cookie("foo", "bar").with_path("/bye");
    assert!(scoped.matches(&Request::get("https://example.com/bye")));
    assert!(scoped.matches(&Request::get("https://example.com/bye/now")));
    assert!(!scoped.matches(&Request::get("https://example.com/good/bye")));
}

#[test]
fn secure_cookie_requires_a_secure_request() {
    let secure = cookie("foo", "bar");
    assert!(secure.matches(&Request::get("https://example.com/")));
    assert!(!secure.matches(&Request::get("http://example.com/")));

    let insecure = cookie("foo", "bar").with_secure(false);
    assert!(insecure.matches(&Request::get("http://example.com/")));
}

#[test]
fn prepare_binds_the_request_context() {
    let original = cookie("foo", "bar");
    let request = Request::get("https://example.com/foobar.html");
    let bound = original.prepare(&request, None);

    assert_eq!(bound.domain(), Some("example.com"));
    assert_eq!(bound.path(), Some("/foobar.html"));
    assert!(bound.is_secure());
    assert!(bound.is_host_only());

    // The receiver stays untouched.
    assert_eq!(original.domain(), None);
    assert_eq!(original.path(), None);
    assert!(!original.is_host_only());
}

#[test]
fn prepare_takes_http_only_from_the_request_origin() {
    let request = Request::get("https://example.com/");
    assert!(!cookie("foo", "bar").prepare(&request, None).is_http_only());

    let server = ServerRequest::new(Request::get("https://example.com/"));
    assert!(cookie("foo", "bar").prepare(&server, None).is_http_only());
}

#[test]
fn prepared_host_only_cookie_rejects_subdomains() {
    let server = ServerRequest::new(Request::get("https://one.example.com/"));
    let bound = cookie("foo", "bar").prepare(&server, None);

    assert!(!bound.matches(&Request::get("https://foo.one.example.com/")));
}

#[test]
fn prepare_applies_an_explicit_expiry() {
    let request = ServerRequest::new(Request::get("https://example.com/"));
    let bound = cookie("foo", "bar").prepare(&request, Some(NEW_YEARS_EVE));

    assert!(bound
        .to_string()
        .contains("; Expires=Tuesday, 31-Dec-2019 23:42:00 GMT"));
}

#[test]
fn serializes_bare_cookie() {
    let plain = cookie("foo", "bar").with_secure(false).with_http_only(false);
    assert_eq!(plain.to_string(), "foo=bar");
}

#[test]
fn serializes_path_and_domain_in_order() {
    let plain = cookie("foo", "bar")
        .with_secure(false)
        .with_http_only(false)
        .with_path("/");
    assert_eq!(plain.to_string(), "foo=bar; Path=/");

    let scoped = plain.with_domain("localhost");
    assert_eq!(scoped.to_string(), "foo=bar; Path=/; Domain=localhost");
}

#[test]
fn serializes_secure_and_http_only_flags() {
    let secure = cookie("foo", "bar")
        .with_http_only(false)
        .with_path("/")
        .with_domain("localhost");
    assert_eq!(
        secure.to_string(),
        "__Secure-foo=bar; Path=/; Domain=localhost; Secure"
    );

    let locked = secure.with_http_only(true);
    assert_eq!(
        locked.to_string(),
        "__Secure-foo=bar; Path=/; Domain=localhost; Secure; HttpOnly"
    );
}

#[test]
fn serializes_expires_attribute() {
    let expiring = cookie("foo", "bar").with_expires(NEW_YEARS_EVE);
    assert_eq!(
        expiring.to_string(),
        "__Secure-foo=bar; Expires=Tuesday, 31-Dec-2019 23:42:00 GMT; Secure; HttpOnly"
    );
}

#[test]
fn empty_value_serializes_as_a_deletion() {
    let deletion = cookie("foo", "").with_secure(false).with_http_only(false);
    assert_eq!(
        deletion.to_string(),
        "foo=deleted; Expires=Monday, 01-Jan-2018 12:20:18 GMT; Max-Age=0"
    );
}

#[test]
fn name_prefix_depends_on_scope() {
    assert_eq!(cookie("foo", "bar").with_secure(false).prefix(), "");
    assert_eq!(cookie("foo", "bar").with_path("/limited/").prefix(), "__Secure-");
    assert_eq!(cookie("foo", "bar").with_domain(".example.com").prefix(), "__Secure-");
    assert_eq!(cookie("foo", "bar").with_path("/").prefix(), "__Host-");

    let host_scoped = cookie("foo", "bar").with_path("/").with_http_only(false);
    assert_eq!(host_scoped.to_string(), "__Host-foo=bar; Path=/; Secure");
}

#[test]
fn percent_encodes_name_and_value() {
    let spaced = cookie("foo", "b a r").with_secure(false).with_http_only(false);
    assert_eq!(spaced.to_string(), "foo=b%20a%20r");

    let bracketed = cookie("foo[0]", "bar").with_secure(false).with_http_only(false);
    assert_eq!(bracketed.to_string(), "foo%5B0%5D=bar");
}
