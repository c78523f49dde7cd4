//! Property-based tests for lean-validator.

use lean_validator::{Sanitizer, ValidationErrors, Validator};
use proptest::prelude::*;
use serde_json::{json, Value};

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}"
}

// ============================================================================
// ERROR PATHS: merging under a prefix is the same as adding at the full path
// ============================================================================

proptest! {
    #[test]
    fn merge_prefixes_every_path(
        prefix in segment(),
        path in proptest::collection::vec(segment(), 1..4),
        message in ".{0,20}",
    ) {
        let mut child = ValidationErrors::new();
        child.add(message.clone(), &path);

        let mut merged = ValidationErrors::new();
        merged.merge(child, &[prefix.as_str()]);

        let mut direct = ValidationErrors::new();
        let mut full = vec![prefix];
        full.extend(path);
        direct.add(message, &full);

        prop_assert_eq!(merged, direct);
    }

    #[test]
    fn empty_segments_do_not_add_dots(path in proptest::collection::vec("[a-z]{0,3}", 0..5)) {
        let mut errors = ValidationErrors::new();
        errors.add("x", &path);

        let (key, _) = errors.iter().next().unwrap();
        prop_assert!(!key.starts_with('.'));
        prop_assert!(!key.ends_with('.'));
        prop_assert!(!key.contains(".."));
    }
}

// ============================================================================
// FAIL-SLOW LISTS: every failing element is reported, none short-circuits
// ============================================================================

proptest! {
    #[test]
    fn list_reports_each_failing_element(items in proptest::collection::vec(any::<bool>(), 0..20)) {
        // true becomes a string (passes), false an integer (fails)
        let values: Vec<Value> = items
            .iter()
            .enumerate()
            .map(|(i, ok)| if *ok { json!(format!("item{}", i)) } else { json!(i) })
            .collect();
        let failing = items.iter().filter(|ok| !**ok).count();

        let mut v = Validator::make(json!({ "list": values }));
        v.field("list").as_list("string", vec![]).unwrap();

        prop_assert_eq!(v.errors().len(), failing);
        for (index, ok) in items.iter().enumerate() {
            let path = format!("list.{}", index);
            prop_assert_eq!(v.errors().has(&path), !ok);
        }
        prop_assert_eq!(v.is_valid(), failing == 0);
    }

    #[test]
    fn validated_output_only_holds_checked_fields(
        keys in proptest::collection::btree_set(segment(), 1..10),
        checked in proptest::collection::vec(any::<bool>(), 10),
    ) {
        let input: serde_json::Map<String, Value> =
            keys.iter().map(|key| (key.clone(), json!(key))).collect();
        let mut v = Validator::new(input);

        let mut expected = 0;
        for (key, check) in keys.iter().zip(&checked) {
            if *check {
                v.field(key.as_str()).string();
                expected += 1;
            }
        }

        let validated = v.validated().unwrap();
        prop_assert_eq!(validated.len(), expected);
    }
}

// ============================================================================
// INT BOUNDS: int(min, max) passes iff min <= n <= max
// ============================================================================

proptest! {
    #[test]
    fn int_bounds_are_inclusive(n in -2000i64..2000, a in -1000i64..1000, b in -1000i64..1000) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };

        let mut v = Validator::make(json!({ "n": n }));
        v.field("n").int(min, max);

        prop_assert_eq!(v.is_valid(), min <= n && n <= max);
    }

    #[test]
    fn length_counts_characters(s in "\\PC{0,20}", min in 0usize..10, max in 10usize..20) {
        let count = s.chars().count();
        let mut v = Validator::make(json!({ "s": s }));
        v.field("s").length(min, max);

        prop_assert_eq!(v.is_valid(), min <= count && count <= max);
    }
}

// ============================================================================
// SANITIZER: trimming is idempotent
// ============================================================================

proptest! {
    #[test]
    fn trim_idempotent(s in "\\s{0,3}[a-zA-Z ]{0,10}\\s{0,3}") {
        let sanitizer = Sanitizer::new();
        let once = sanitizer.clean_value(json!({ "s": s }));
        let twice = sanitizer.clean_value(once.clone());
        prop_assert_eq!(once, twice);
    }
}
