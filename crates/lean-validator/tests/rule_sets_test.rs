//! Shipped rule sets and the sanitizer feeding a validator

use lean_validator::{ja, net, RuleTable, Sanitizer, Validator};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_net_rules() {
    let mut v = Validator::make(json!({
        "ip": "10.0.0.1",
        "v6": "::1",
        "public": "8.8.8.8",
        "private": "192.168.1.1",
        "mac": "00-1A-2B-3C-4D-5E",
        "id": "550e8400-e29b-41d4-a716-446655440000",
        "short_id": "550e8400e29b41d4a716446655440000",
        "host": "example.com.",
        "bad_host": "-example.com",
        "site": "https://example.com",
        "not_site": "example.com"
    }));
    v.field("ip").apply(net::ip(), vec![]).unwrap();
    v.field("v6").apply(net::ipv6(), vec![]).unwrap();
    v.field("public").apply(net::public_ip(), vec![]).unwrap();
    v.field("private").apply(net::public_ip(), vec![]).unwrap();
    v.field("mac").apply(net::mac(), vec![]).unwrap();
    v.field("id").apply(net::uuid(), vec![]).unwrap();
    v.field("short_id").apply(net::uuid(), vec![]).unwrap();
    v.field("host").apply(net::domain(), vec![]).unwrap();
    v.field("bad_host").apply(net::domain(), vec![]).unwrap();
    v.field("site").apply(net::url(), vec![]).unwrap();
    v.field("not_site").apply(net::url(), vec![]).unwrap();

    let failed: Vec<String> = v.errors_flat().into_keys().collect();
    assert_eq!(failed, ["private", "short_id", "bad_host", "not_site"]);
}

#[test]
fn test_net_rule_trailing_message() {
    let mut v = Validator::make(json!({ "ip": "256.0.0.1" }));
    v.field("ip")
        .apply(net::ipv4(), vec![json!("Enter an IPv4 address")])
        .unwrap();

    assert_eq!(v.errors().first("ip"), Some("Enter an IPv4 address"));
}

#[test]
fn test_net_rules_reject_non_strings() {
    let mut v = Validator::make(json!({ "ip": 127001 }));
    v.field("ip").apply(net::ip(), vec![]).unwrap();
    assert!(!v.is_valid());
}

#[test]
fn test_ja_rules() {
    let mut v = Validator::make(json!({
        "yomi": "やまだ",
        "kana_name": "ヤマダ",
        "mixed": "やまだタロウ",
        "half": "ﾔﾏﾀﾞ",
        "kanji_name": "山田",
        "zip": "100-0001",
        "tel": "03-1234-5678",
        "bad_zip": "1000001"
    }));
    v.field("yomi").required().apply(ja::hiragana(), vec![]).unwrap();
    v.field("kana_name").required().apply(ja::katakana(), vec![]).unwrap();
    v.field("mixed").apply(ja::kana(), vec![]).unwrap();
    v.field("half").apply(ja::hankaku_kana(), vec![]).unwrap();
    v.field("kanji_name").apply(ja::kanji(), vec![]).unwrap();
    v.field("zip").apply(ja::zip(), vec![]).unwrap();
    v.field("tel").apply(ja::tel(), vec![]).unwrap();
    v.field("bad_zip")
        .apply(ja::zip(), vec![json!("郵便番号を正しく入力してください")])
        .unwrap();

    assert_eq!(v.errors().len(), 1);
    assert_eq!(v.errors().first("bad_zip"), Some("郵便番号を正しく入力してください"));
}

#[test]
fn test_rule_set_registered_as_alias() {
    let rules = RuleTable::standard()
        .alias("hiragana", ja::hiragana(), vec![])
        .alias("zip", ja::zip(), vec![]);

    let mut v = Validator::make(json!({ "yomi": "ヤマダ", "zip": "100-0001" })).with_rules(Arc::new(rules));
    v.field("yomi").rule("hiragana").unwrap();
    v.field("zip").rule("zip").unwrap();

    assert_eq!(v.errors_flat().into_keys().collect::<Vec<_>>(), ["yomi"]);
}

#[test]
fn test_sanitize_then_validate() {
    let sanitizer = Sanitizer::new()
        .to_lower(["email"])
        .to_digits(["tel"])
        .to_kana(["yomi"])
        .skip(["password"]);

    let input = json!({
        "email": "  Alice@Example.COM ",
        "tel": "090-1234-5678",
        "yomi": " ﾔﾏﾀﾞ ",
        "password": "  spaced  "
    });
    let mut v = Validator::make(sanitizer.clean_value(input));
    v.field("email").required().email().unwrap();
    v.field("tel").required().numeric().unwrap().length(10, 11);
    v.field("yomi").required().apply(ja::katakana(), vec![]).unwrap();
    v.field("password").required().length(8, None);

    assert!(v.is_valid(), "{}", v.errors());
    assert_eq!(
        serde_json::Value::Object(v.into_validated().unwrap()),
        json!({
            "email": "alice@example.com",
            "tel": "09012345678",
            "yomi": "ヤマダ",
            "password": "  spaced  "
        })
    );
}

#[test]
fn test_sanitize_nested_lists() {
    let sanitizer = Sanitizer::new().to_upper(["orders.*.code"]);
    let cleaned = sanitizer.clean(
        json!({ "orders": [{ "code": " ab1 " }, { "code": "cd2" }] })
            .as_object()
            .cloned()
            .unwrap_or_default(),
    );

    let mut v = Validator::new(cleaned);
    v.field("orders")
        .as_list_object(|order| {
            order.field("code").required().regex(r"^[A-Z]{2}\d$")?;
            Ok(())
        })
        .unwrap();

    assert!(v.is_valid());
    assert_eq!(
        v.validated().unwrap()["orders"],
        json!([{ "code": "AB1" }, { "code": "CD2" }])
    );
}

#[test]
fn test_sanitizer_custom_rule() {
    let sanitizer = Sanitizer::new()
        .add_rule("collapse", |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .apply("collapse", ["title"])
        .unwrap();
    assert!(Sanitizer::new().apply("collapse", ["title"]).is_err());

    let cleaned = sanitizer.clean_value(json!({ "title": "  Hello    big   world " }));
    assert_eq!(cleaned["title"], "Hello big world");
}
