//! Japanese character-class and format rules.
//!
//! Character-class rules accept the empty string; combine with `required`
//! when a value must be present.

use crate::rules::Predicate;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// A named predicate matching string values against a lazily compiled pattern
macro_rules! pattern_rule {
    ($(#[$meta:meta])* $fn_name:ident, $name:literal, $pattern:literal) => {
        $(#[$meta])*
        pub fn $fn_name() -> Predicate {
            static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
            Predicate::named($name, |value: &Value| {
                let regex = PATTERN.get_or_init(|| Regex::new($pattern).ok());
                match (regex, value.as_str()) {
                    (Some(regex), Some(text)) => regex.is_match(text),
                    _ => false,
                }
            })
        }
    };
}

pattern_rule!(
    /// Hiragana and the long-vowel mark
    hiragana, "hiragana", r"^[ぁ-んー]*$"
);
pattern_rule!(
    /// Full-width katakana and the long-vowel mark
    katakana, "katakana", r"^[ァ-ヶー]*$"
);
pattern_rule!(kana, "kana", r"^[ぁ-んァ-ヶー]*$");
pattern_rule!(
    /// Half-width katakana
    hankaku_kana, "hankaku_kana", r"^[｡-ﾟ]*$"
);
pattern_rule!(kanji, "kanji", r"^[一-龠々]*$");
pattern_rule!(
    /// No ASCII printable and no half-width katakana
    zenkaku, "zenkaku", r"^[^ -~｡-ﾟ]*$"
);
pattern_rule!(
    /// Postal code, `000-0000`
    zip, "zip", r"^\d{3}-\d{4}$"
);
pattern_rule!(
    /// Phone number, `00-0000-0000` style with variable group widths
    tel, "tel", r"^\d{2,5}-\d{1,4}-\d{3,4}$"
);
