//! Walk-through of field rules, nested data, custom rules and the sanitizer

use lean_validator::{
    ja, net, Builtin, FieldRules, Predicate, Requirement, RuleRef, RuleTable, Sanitizer,
    Validator, ValidatorResult, Verdict,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🦀 lean-validator Demo");
    println!("======================\n");

    demo_field_rules()?;
    demo_conditional_rules();
    demo_nested_data()?;
    demo_custom_rules()?;
    demo_sanitize_then_validate()?;

    println!("✅ All validation demos completed successfully!");
    Ok(())
}

fn report(v: &Validator) {
    if v.is_valid() {
        if let Ok(validated) = v.validated() {
            println!("  ✅ valid: {}", Value::Object(validated.clone()));
        }
    } else {
        for (path, message) in v.errors_flat() {
            println!("  ❌ {}: {}", path, message);
        }
    }
    println!();
}

fn demo_field_rules() -> ValidatorResult<()> {
    println!("📝 Demo 1: Field Rules");
    println!("----------------------");

    let mut v = Validator::make(json!({
        "name": "Alice",
        "age": 17,
        "email": "alice@example",
        "role": "owner",
        "internal": "dropped from output"
    }));
    v.field("name").required().string().length(1, 20);
    v.field("age").required().int(18, None);
    v.field("email").required().email()?;
    v.field_with_message("role", "Choose admin or member").one_of(["admin", "member"]);
    report(&v);

    let mut v = Validator::make(json!({ "name": "Alice", "age": 30 }));
    v.field("name").required().string();
    v.field("age").required().int(18, None);
    report(&v);
    Ok(())
}

fn demo_conditional_rules() {
    println!("🔀 Demo 2: Conditional Rules");
    println!("----------------------------");

    let mut v = Validator::make(json!({ "type": "business", "company": "", "nickname": "" }));
    v.field("company")
        .required_if("type", "business", "Company name is required for business accounts")
        .string();
    v.field("nickname")
        .required_if("type", "personal", Requirement::new().otherwise("Guest"))
        .string();
    v.field("memo").optional_or("").string();
    report(&v);
}

fn demo_nested_data() -> ValidatorResult<()> {
    println!("🌳 Demo 3: Nested Data");
    println!("----------------------");

    let mut v = Validator::make(json!({
        "address": { "zip": "100-0001", "city": "Tokyo" },
        "tags": ["rust", 42],
        "items": [
            { "sku": "A-1", "qty": 2 },
            { "sku": "", "qty": 0 }
        ]
    }));
    v.field("address").required().as_object(|address| {
        address.field("zip").required().apply(ja::zip(), vec![json!("Use the 000-0000 format")])?;
        address.field("city").required().string();
        Ok(())
    })?;
    v.field("tags").as_list("string", vec![])?;
    v.field("items").array_count(1, None).as_list_object(|item| {
        item.field("sku").required().string();
        item.field("qty").required().int(1, 99);
        Ok(())
    })?;
    report(&v);
    Ok(())
}

fn demo_custom_rules() -> ValidatorResult<()> {
    println!("🔧 Demo 4: Custom Rules");
    println!("-----------------------");

    let even = Predicate::named("even", |value: &Value| {
        value.as_i64().is_some_and(|n| n % 2 == 0)
    });
    let rules = RuleTable::standard()
        .alias("adult", Builtin::Int, vec![json!(18), Value::Null])
        .alias("even", even, vec![])
        .alias(
            "username",
            RuleRef::chain(|rules: FieldRules<'_>| rules.required().string().length(3, 16).alpha_dash()),
            vec![],
        );

    let mut v = Validator::make(json!({
        "age": 15,
        "seats": 3,
        "user": "john_doe",
        "server": "10.0.0.1",
        "slug": "  hello  "
    }))
    .with_rules(Arc::new(rules));

    v.field("age").apply("adult", vec![json!("Adults only")])?;
    v.field("seats").rule("even")?;
    v.field("user").rule("username")?;
    v.field("server").apply(net::public_ip(), vec![json!("Use a public address")])?;
    v.field("slug")
        .apply(
            Predicate::unary(|value: &Value| match value.as_str() {
                Some(text) => Verdict::Replace(json!(text.trim())),
                None => Verdict::Fail,
            }),
            vec![],
        )?
        .length(1, 10);
    report(&v);
    Ok(())
}

fn demo_sanitize_then_validate() -> ValidatorResult<()> {
    println!("🧹 Demo 5: Sanitize, Then Validate");
    println!("----------------------------------");

    let sanitizer = Sanitizer::new()
        .to_lower(["email"])
        .to_digits(["tel"])
        .to_kana(["yomi"])
        .skip(["password"]);
    let input = sanitizer.clean_value(json!({
        "email": "  Alice@Example.COM ",
        "tel": "090-1234-5678",
        "yomi": "ﾔﾏﾀﾞ ﾀﾛｳ",
        "password": "  spaced secret  "
    }));

    let mut v = Validator::make(input);
    v.field("email").required().email()?;
    v.field("tel").required().numeric()?.length(10, 11);
    v.field("yomi").required().string();
    v.field("password").required().length(8, None);
    report(&v);
    Ok(())
}
