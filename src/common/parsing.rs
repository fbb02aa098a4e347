// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

pub fn parse_boolish(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Trims whitespace and wrapping quotes that `.env` editors tend to leave around secrets.
pub fn clean_secret(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// `PRIVATE_KEY_7` -> `Some(7)`.
pub fn indexed_key_suffix(name: &str, prefix: &str) -> Option<u32> {
    name.strip_prefix(prefix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_boolish_rejects_invalid_values() {
        assert_eq!(parse_boolish("true"), Some(true));
        assert_eq!(parse_boolish("OFF"), Some(false));
        assert_eq!(parse_boolish("tru"), None);
    }

    #[test]
    fn strip_prefix_handles_both_cases() {
        assert_eq!(strip_0x("0xabc"), "abc");
        assert_eq!(strip_0x("0Xabc"), "abc");
        assert_eq!(strip_0x("abc"), "abc");
    }

    #[test]
    fn clean_secret_drops_quotes_and_blanks() {
        assert_eq!(clean_secret(" \"0xabc\" ").as_deref(), Some("0xabc"));
        assert_eq!(clean_secret("  "), None);
        assert_eq!(clean_secret("''"), None);
    }

    #[test]
    fn indexed_suffix_requires_numeric_tail() {
        assert_eq!(indexed_key_suffix("PRIVATE_KEY_2", "PRIVATE_KEY_"), Some(2));
        assert_eq!(indexed_key_suffix("PRIVATE_KEY_X", "PRIVATE_KEY_"), None);
        assert_eq!(indexed_key_suffix("OTHER_1", "PRIVATE_KEY_"), None);
    }
}
