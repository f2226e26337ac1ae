//! Unit tests for glob matching

use crate::repositories::store::glob::glob_match;

#[test]
fn test_literal_and_star() {
    assert!(glob_match("app:a|type:t|owner:*|token:xyz", "app:a|type:t|owner:bob|token:xyz"));
    assert!(glob_match("*", ""));
    assert!(glob_match("a*", "a"));
    assert!(!glob_match("app:a|type:t|owner:*|token:xyz", "app:a|type:t|owner:bob|token:xyzz"));
    assert!(!glob_match("app:a|type:t|owner:*|token:xyz", "app:a|type:tt|owner:bob|token:xyz"));
}

#[test]
fn test_star_backtracking() {
    assert!(glob_match("*token:ab", "owner:token:ab|token:ab"));
    assert!(glob_match("a*b*c", "aXXbYYbZc"));
    assert!(!glob_match("a*b*c", "aXXbYY"));
}

#[test]
fn test_question_mark() {
    assert!(glob_match("h?llo", "hello"));
    assert!(!glob_match("h?llo", "hllo"));
}

#[test]
fn test_character_classes() {
    assert!(glob_match("h[ae]llo", "hallo"));
    assert!(!glob_match("h[ae]llo", "hillo"));
    assert!(glob_match("h[^e]llo", "hallo"));
    assert!(!glob_match("h[^e]llo", "hello"));
    assert!(glob_match("h[a-c]llo", "hbllo"));
    assert!(!glob_match("h[a-c]llo", "hdllo"));
}

#[test]
fn test_escapes() {
    assert!(glob_match("a\\*b", "a*b"));
    assert!(!glob_match("a\\*b", "axb"));
    assert!(glob_match("x\\[1\\]", "x[1]"));
    assert!(glob_match("a\\\\b", "a\\b"));
}

#[test]
fn test_unterminated_class_is_literal() {
    assert!(glob_match("a[b", "a[b"));
    assert!(!glob_match("a[b", "ab"));
}
