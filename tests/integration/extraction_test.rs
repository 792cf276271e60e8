//! Extraction tests
//!
//! These tests verify charset handling and the RegExp rules on recorded
//! responses read through the tag.

use super::{host_with_body, recorded};
use chrono::{Duration, Utc};
use response_extractor::config::ExtractorConfig;
use response_extractor::host::InMemoryHost;
use response_extractor::render::RenderContext;
use response_extractor::{RegexExtractorTag, StoredResponse, TagArguments, TagError};
use serde_json::json;

fn tag() -> RegexExtractorTag {
    RegexExtractorTag::with_config(ExtractorConfig::default())
}

async fn run_on(host: &InMemoryHost, args: TagArguments) -> Result<String, TagError> {
    tag().run(host, &RenderContext::send(), &args).await
}

fn host_with_recorded(response: StoredResponse) -> InMemoryHost {
    let now = Utc::now();
    let host = host_with_body("unused", now);
    host.record_response(
        response
            .with_environment(Some("env_dev".to_string()))
            .with_created(now - Duration::seconds(1)),
    );
    host
}

#[tokio::test]
async fn test_capture_group_value() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded("req_login", "user id=42 active", now, Duration::seconds(1)));

    let value = run_on(&host, TagArguments::new("req_login").filter(r"id=(\d+)"))
        .await
        .unwrap();
    assert_eq!(value, "42");
}

#[tokio::test]
async fn test_whole_match_without_groups() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded(
        "req_login",
        r#"{"session":"s-9f2"}"#,
        now,
        Duration::seconds(1),
    ));

    let value = run_on(&host, TagArguments::new("req_login").filter(r"s-[0-9a-f]+"))
        .await
        .unwrap();
    assert_eq!(value, "s-9f2");
}

#[tokio::test]
async fn test_no_match() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded("req_login", "bar baz", now, Duration::seconds(1)));

    let err = run_on(&host, TagArguments::new("req_login").filter("foo"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TagError::NoMatch {
            filter: "foo".to_string()
        }
    );
}

#[tokio::test]
async fn test_too_many_groups() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded("req_login", "xaby", now, Duration::seconds(1)));

    let err = run_on(&host, TagArguments::new("req_login").filter("(a)(b)"))
        .await
        .unwrap_err();
    assert!(matches!(err, TagError::TooManyMatches { groups: 2, .. }));
}

#[tokio::test]
async fn test_invalid_filter() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded("req_login", "anything", now, Duration::seconds(1)));

    let err = run_on(&host, TagArguments::new("req_login").filter("[unclosed"))
        .await
        .unwrap_err();
    match err {
        TagError::InvalidFilter { filter, .. } => assert_eq!(filter, "[unclosed"),
        other => panic!("expected InvalidFilter, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_filter() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded("req_login", "anything", now, Duration::seconds(1)));

    let err = run_on(&host, TagArguments::new("req_login")).await.unwrap_err();
    assert_eq!(err, TagError::MissingFilter);

    let err = run_on(&host, TagArguments::new("req_login").filter(""))
        .await
        .unwrap_err();
    assert_eq!(err, TagError::MissingFilter);
}

#[tokio::test]
async fn test_unsupported_attribute() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded("req_login", "anything", now, Duration::seconds(1)));

    // The filter is invalid too; the attribute is rejected before it is compiled.
    let err = run_on(
        &host,
        TagArguments::new("req_login").attribute("headers").filter("("),
    )
    .await
    .unwrap_err();
    assert_eq!(err, TagError::UnsupportedAttribute("headers".to_string()));
}

#[tokio::test]
async fn test_blank_attribute_reads_body() {
    let now = Utc::now();
    let host = host_with_body("", now);
    host.record_response(recorded("req_login", "user id=7", now, Duration::seconds(1)));

    let args = TagArguments::from_positional(&[
        json!("req_login"),
        json!(""),
        json!(r"id=(\d)"),
        json!("never"),
        json!(60),
    ]);
    assert_eq!(run_on(&host, args).await.unwrap(), "7");

    let args = TagArguments::new("req_login").attribute("  ").filter(r"id=(\d)");
    assert_eq!(run_on(&host, args).await.unwrap(), "7");
}

#[tokio::test]
async fn test_latin1_body_matches_independent_decode() {
    let bytes: Vec<u8> = vec![
        b'n', b'a', b'm', b'e', b'=', b'J', b'o', b's', 0xE9, b' ', 0xA3, b'5', 0x80, 0x9F,
    ];
    let host = host_with_recorded(
        StoredResponse::new("req_login", 200)
            .with_body(bytes.clone())
            .with_content_type("text/plain; charset=iso-8859-1"),
    );

    let value = run_on(&host, TagArguments::new("req_login").filter(r"(?s).*"))
        .await
        .unwrap();

    // ISO-8859-1 code points equal byte values, C1 controls included.
    let expected: String = bytes.iter().map(|&b| char::from(b)).collect();
    assert_eq!(value, expected);
    assert_eq!(value, "name=José £5\u{80}\u{9f}");
}

#[tokio::test]
async fn test_charset_in_group_from_shift_jis() {
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("user=山田");
    let host = host_with_recorded(
        StoredResponse::new("req_login", 200)
            .with_body(bytes.into_owned())
            .with_content_type("text/html; charset=Shift_JIS"),
    );

    let value = run_on(&host, TagArguments::new("req_login").filter(r"user=(\S+)"))
        .await
        .unwrap();
    assert_eq!(value, "山田");
}

#[tokio::test]
async fn test_invalid_bytes_fall_back_to_lossy_text() {
    let host = host_with_recorded(
        StoredResponse::new("req_login", 200)
            .with_body(vec![b'i', b'd', b'=', b'7', 0xFF, 0xFE])
            .with_content_type("text/plain"),
    );

    let value = run_on(&host, TagArguments::new("req_login").filter(r"id=(\d)"))
        .await
        .unwrap();
    assert_eq!(value, "7");
}

#[tokio::test]
async fn test_unknown_charset_falls_back_to_utf8() {
    let host = host_with_recorded(
        StoredResponse::new("req_login", 200)
            .with_body("café".as_bytes().to_vec())
            .with_content_type("text/plain; charset=x-not-a-charset"),
    );

    let value = run_on(&host, TagArguments::new("req_login").filter(r"caf."))
        .await
        .unwrap();
    assert_eq!(value, "café");
}
