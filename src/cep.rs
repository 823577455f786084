//! Brazilian postal code (CEP) validation.

use regex::Regex;
use std::sync::LazyLock;

static CEP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // `\d` would also match non-ASCII digits
    Regex::new(r"^[0-9]{8}$").expect("static CEP regex is valid")
});

/// Strip the separators users commonly type (hyphens and spaces).
///
/// Idempotent: `format_cep(&format_cep(x)) == format_cep(x)`.
pub fn format_cep(raw: &str) -> String {
    raw.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// Check that `raw` is exactly 8 ASCII digits once separators are removed.
pub fn is_valid_cep(raw: &str) -> bool {
    validate_cep(raw).0
}

/// Validate and normalize a CEP.
///
/// Returns: (is_valid, normalized_cep)
pub fn validate_cep(raw: &str) -> (bool, String) {
    let normalized = format_cep(raw);
    let valid = CEP_REGEX.is_match(&normalized);
    if valid {
        tracing::debug!("✓ Valid CEP: {} → {}", raw, normalized);
    } else {
        tracing::debug!("❌ Invalid CEP: {:?}", raw);
    }
    (valid, normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_cep() {
        let cases = [
            ("01310100", true),
            ("01310-100", true),
            ("01310 100", true),
            ("12345678", true),
            ("123", false),
            ("1234567890", false),
            ("abcd1234", false),
            ("", false),
            ("123-456", false),
            ("12.345.678", false),
            ("１２３４５６７８", false),
        ];

        for (cep, expected) in cases {
            assert_eq!(is_valid_cep(cep), expected, "is_valid_cep({:?})", cep);
        }
    }

    #[test]
    fn test_format_cep() {
        let cases = [
            ("01310-100", "01310100"),
            ("01310 100", "01310100"),
            ("01310100", "01310100"),
            ("123-45-678", "12345678"),
            ("12 34 56 78", "12345678"),
        ];

        for (input, expected) in cases {
            assert_eq!(format_cep(input), expected, "format_cep({:?})", input);
        }
    }

    #[test]
    fn test_validate_cep_returns_normalized() {
        assert_eq!(validate_cep("01310 100"), (true, "01310100".to_string()));
        assert_eq!(validate_cep("12.345.678"), (false, "12.345.678".to_string()));
    }

    #[test]
    fn test_is_valid_cep_agrees_with_validate_cep() {
        for cep in ["01310-100", "0131-0100", "123", "", "abcdefgh", "1234 5678 9"] {
            assert_eq!(is_valid_cep(cep), validate_cep(cep).0, "{:?}", cep);
        }
    }
}
