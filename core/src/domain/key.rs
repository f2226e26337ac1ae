//! Composite key encoding
//!
//! Every record is stored under
//!
//! ```text
//! app:{app}|type:{type}|owner:{owner}|token:{token}
//! ```
//!
//! Lookups by token leave the owner segment as a wildcard and recover the
//! owner from the matched key. Owner-wide lookups fix the owner and leave the
//! token as a wildcard. Segment values are glob-escaped inside patterns so a
//! literal `*` or `?` in a value only ever matches itself.

use std::borrow::Cow;

use super::entities::token::mask_token;

const APP_MARKER: &str = "app:";
const TYPE_MARKER: &str = "|type:";
const OWNER_MARKER: &str = "owner:";
const TOKEN_MARKER: &str = "|token";
const TOKEN_SEGMENT: &str = "|token:";

/// Build the full key for a record
pub fn token_key(app: &str, token_type: &str, owner: &str, token: &str) -> String {
    format!(
        "app:{}|type:{}|owner:{}|token:{}",
        app, token_type, owner, token
    )
}

/// Pattern matching the record holding `token`, whoever owns it
pub fn lookup_pattern(app: &str, token_type: &str, token: &str) -> String {
    format!(
        "{}{}{}{}|owner:*|token:{}",
        APP_MARKER,
        escape_glob(app),
        TYPE_MARKER,
        escape_glob(token_type),
        escape_glob(token)
    )
}

/// Pattern matching every record owned by `owner`
pub fn owner_pattern(app: &str, token_type: &str, owner: &str) -> String {
    format!(
        "{}{}{}{}|owner:{}|token:*",
        APP_MARKER,
        escape_glob(app),
        TYPE_MARKER,
        escape_glob(token_type),
        escape_glob(owner)
    )
}

/// Loose pattern for a token lookup, with the owner and any text around it wildcarded
///
/// Values are used verbatim, so `*` or `?` in a segment act as wildcards
/// and a type that prefixes another (`sess`, `session`) matches both.
pub fn loose_lookup_pattern(app: &str, token_type: &str, token: &str) -> String {
    format!("app:{}|type:{}*token:{}", app, token_type, token)
}

/// Loose pattern for an owner-wide lookup
///
/// Also matches owners that start with `owner` (`O2` matches `O20`).
pub fn loose_owner_pattern(app: &str, token_type: &str, owner: &str) -> String {
    format!("app:{}|type:{}|owner:{}*", app, token_type, owner)
}

/// Recover the owner segment from a stored key
///
/// Takes everything after the first `owner:` up to the next `|token`.
pub fn owner_from_key(key: &str) -> Option<&str> {
    let (_, rest) = key.split_once(OWNER_MARKER)?;
    match rest.find(TOKEN_MARKER) {
        Some(end) => Some(&rest[..end]),
        None => Some(rest),
    }
}

/// Escape glob metacharacters understood by Redis `KEYS`/`SCAN MATCH`
pub fn escape_glob(segment: &str) -> Cow<'_, str> {
    if !segment.contains(is_glob_meta) {
        return Cow::Borrowed(segment);
    }

    let mut escaped = String::with_capacity(segment.len() + 4);
    for c in segment.chars() {
        if is_glob_meta(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Key with its token segment masked, for logs and error messages
pub fn mask_key(key: &str) -> String {
    match key.rfind(TOKEN_SEGMENT) {
        Some(pos) => {
            let (head, tail) = key.split_at(pos + TOKEN_SEGMENT.len());
            format!("{}{}", head, mask_token(tail))
        }
        None => key.to_string(),
    }
}

fn is_glob_meta(c: char) -> bool {
    matches!(c, '*' | '?' | '[' | ']' | '\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_key_format() {
        assert_eq!(
            token_key("app1", "reset", "alice", "tok"),
            "app:app1|type:reset|owner:alice|token:tok"
        );
    }

    #[test]
    fn test_patterns() {
        assert_eq!(
            lookup_pattern("app1", "reset", "tok"),
            "app:app1|type:reset|owner:*|token:tok"
        );
        assert_eq!(
            owner_pattern("app1", "reset", "alice"),
            "app:app1|type:reset|owner:alice|token:*"
        );
    }

    #[test]
    fn test_patterns_escape_glob_characters() {
        assert_eq!(
            lookup_pattern("a*", "t?", "x[1]"),
            "app:a\\*|type:t\\?|owner:*|token:x\\[1\\]"
        );
        assert_eq!(escape_glob("plain-value_1"), Cow::Borrowed("plain-value_1"));
        assert_eq!(escape_glob("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_loose_patterns() {
        assert_eq!(
            loose_lookup_pattern("app1", "reset", "tok"),
            "app:app1|type:reset*token:tok"
        );
        assert_eq!(
            loose_owner_pattern("app1", "reset", "O2"),
            "app:app1|type:reset|owner:O2*"
        );
    }

    #[test]
    fn test_owner_from_key() {
        assert_eq!(
            owner_from_key("app:a|type:t|owner:bob|token:xyz"),
            Some("bob")
        );
        assert_eq!(owner_from_key("app:a|type:t|owner:|token:xyz"), Some(""));
        assert_eq!(owner_from_key("app:a|type:t|owner:bob"), Some("bob"));
        assert_eq!(owner_from_key("app:a|type:t|token:xyz"), None);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(
            mask_key("app:a|type:t|owner:o|token:abcdefgh"),
            "app:a|type:t|owner:o|token:***efgh"
        );
        assert_eq!(mask_key("no-token-here"), "no-token-here");
    }

    #[test]
    fn test_owner_round_trip() {
        let key = token_key("a", "t", "user@example.com", "Zm9v_-");
        assert_eq!(owner_from_key(&key), Some("user@example.com"));
    }
}
