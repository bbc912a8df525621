//! Input predicates for the applicant text fields.

use std::sync::OnceLock;

use regex::Regex;

/// Predicate run against every edit of a text field.
pub type Validator = fn(&str) -> bool;

macro_rules! validator {
    ($(#[$meta:meta])* $name:ident, $pattern:literal) => {
        $(#[$meta])*
        pub fn $name(text: &str) -> bool {
            static PATTERN: OnceLock<Regex> = OnceLock::new();
            PATTERN
                .get_or_init(|| Regex::new($pattern).expect("static validator pattern"))
                .is_match(text)
        }
    };
}

validator!(
    /// Chinese characters (U+4E00..=U+9FA5) and the middle dot used in transliterated names.
    is_valid_name,
    r"^[\x{4E00}-\x{9FA5}\x{00B7}]+$"
);

validator!(
    /// 11-digit student number of the 2018 or 2019 intake.
    is_valid_student_id,
    r"^1[89][0-9]{9}$"
);

validator!(is_valid_phone_number, r"^1[3-9][0-9]{9}$");

validator!(
    is_valid_email,
    r"^[a-z0-9]+([._\-]*[a-z0-9])*@([a-z0-9]+[-a-z0-9]*[a-z0-9]+\.){1,63}[a-z0-9]+$"
);

validator!(
    /// Six digits, first one non-zero.
    is_valid_verification_code,
    r"^[1-9][0-9]{5}$"
);
