use super::*;
use base64::engine::general_purpose::STANDARD;

#[test]
fn round_trip_preserves_unicode_empty_and_marker_content() {
    let cases = [
        SourceBundle::default(),
        SourceBundle::new("<p>héllo wörld</p>", "p::after{content:'→'}", "alert('🎉')"),
        SourceBundle::new("</head></body><html>", "</style>", "'</script>'"),
        SourceBundle::new("日本語のテキスト", "", "\u{0}\u{1F600}\n\t\"quoted\""),
    ];
    for bundle in cases {
        let token = encode(&bundle);
        let decoded = decode(token.as_str()).expect("decode").normalize();
        assert_eq!(decoded, bundle);
    }
}

#[test]
fn encoding_is_deterministic_and_url_safe() {
    let bundle = SourceBundle::new("<b>?&=</b>", "a{b:c}", "x >>= 1; y = a / b + c;");
    let first = encode(&bundle);
    let second = encode(&bundle);
    assert_eq!(first, second);
    assert!(first
        .as_str()
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'));
}

#[test]
fn malformed_tokens_fail_explicitly() {
    assert!(matches!(
        decode("not-valid-base64!!"),
        Err(DecodeError::Base64(_))
    ));
    assert!(matches!(decode(""), Err(DecodeError::Json(_))));

    let not_json = URL_SAFE_NO_PAD.encode("plain text");
    assert!(matches!(decode(&not_json), Err(DecodeError::Json(_))));

    let array = URL_SAFE_NO_PAD.encode(r#"["a","b","c"]"#);
    assert!(matches!(decode(&array), Err(DecodeError::NotAnObject)));

    let invalid_utf8 = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
    assert!(matches!(decode(&invalid_utf8), Err(DecodeError::Utf8(_))));

    let wrong_type = URL_SAFE_NO_PAD.encode(r#"{"markup": 5}"#);
    assert!(matches!(decode(&wrong_type), Err(DecodeError::Json(_))));
}

#[test]
fn malformed_token_falls_back_to_empty_bundle() {
    assert_eq!(decode_or_empty("not-valid-base64!!"), SourceBundle::default());
}

#[test]
fn missing_fields_stay_absent_until_normalized() {
    let token = URL_SAFE_NO_PAD.encode(r#"{"markup":"<p>only</p>"}"#);
    let partial = decode(&token).expect("decode");
    assert_eq!(partial.style, None);
    assert_eq!(partial.normalize(), SourceBundle::new("<p>only</p>", "", ""));
}

#[test]
fn standard_alphabet_padded_legacy_tokens_decode() {
    let legacy = STANDARD.encode(r#"{"html":"<i>?</i>","css":"a>b{}","js":"1"}"#);
    let bundle = decode(&legacy).expect("legacy decode").normalize();
    assert_eq!(bundle, SourceBundle::new("<i>?</i>", "a>b{}", "1"));
}

#[test]
fn share_url_round_trips_through_query_extraction() {
    let bundle = SourceBundle::new("<p>x</p>", "", "");
    let token = encode(&bundle);
    let url = share_url("https://lab.example/", "/", &token);
    assert_eq!(url, format!("https://lab.example/?code={}", token));
    assert_eq!(token_from_url(&url), Some(token.clone()));

    let nested = share_url("https://lab.example", "play", &token);
    assert_eq!(nested, format!("https://lab.example/play?code={}", token));
}

#[test]
fn token_from_query_handles_missing_and_escaped_values() {
    assert_eq!(token_from_query(""), None);
    assert_eq!(token_from_query("?theme=dark"), None);
    assert_eq!(token_from_query("code="), None);
    assert_eq!(
        token_from_query("?theme=dark&code=abc%3D%3D"),
        Some(ShareToken::from_raw("abc=="))
    );
    assert_eq!(
        token_from_query("code=ab+cd"),
        Some(ShareToken::from_raw("ab+cd"))
    );
    assert_eq!(
        token_from_url("https://x.test/?code=abc#frag"),
        Some(ShareToken::from_raw("abc"))
    );
    assert_eq!(token_from_url("https://x.test/"), None);
}
