//! Unit tests for the token entity

use serde_json::json;

use crate::domain::entities::token::{mask_token, merge_data, Token, TokenData};

fn data(value: serde_json::Value) -> TokenData {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_token_key() {
    let token = Token::new("billing", "session", "user-1", TokenData::new(), "abc123");
    assert_eq!(token.key(), "app:billing|type:session|owner:user-1|token:abc123");
}

#[test]
fn test_serializes_type_field() {
    let token = Token::new("billing", "invite", "user-1", data(json!({"n": 1})), "abc");
    let value = serde_json::to_value(&token).unwrap();

    assert_eq!(value["type"], "invite");
    assert!(value.get("token_type").is_none());
    assert_eq!(value["data"]["n"], 1);

    let parsed: Token = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, token);
}

#[test]
fn test_missing_data_defaults_to_empty() {
    let parsed: Token = serde_json::from_value(json!({
        "app": "a", "type": "t", "owner": "o", "token": "x"
    }))
    .unwrap();
    assert!(parsed.data.is_empty());
}

#[test]
fn test_merge_data_removes_sets_and_keeps() {
    let mut current = data(json!({"a": 1, "b": 2}));
    merge_data(&mut current, data(json!({"a": null, "c": 3})));

    assert_eq!(serde_json::Value::Object(current), json!({"b": 2, "c": 3}));
}

#[test]
fn test_merge_data_overwrites_nested_values_whole() {
    let mut current = data(json!({"profile": {"name": "x", "age": 3}}));
    merge_data(&mut current, data(json!({"profile": {"name": "y"}})));

    assert_eq!(current["profile"], json!({"name": "y"}));
}

#[test]
fn test_merge_data_null_for_missing_key_is_noop() {
    let mut current = data(json!({"a": 1}));
    merge_data(&mut current, data(json!({"zzz": null})));
    assert_eq!(serde_json::Value::Object(current), json!({"a": 1}));
}

#[test]
fn test_mask_token() {
    assert_eq!(mask_token("abcdefgh"), "***efgh");
    assert_eq!(mask_token("abcd"), "****");
    assert_eq!(mask_token(""), "****");

    let token = Token::new("a", "t", "o", TokenData::new(), "secret-value-9876");
    assert_eq!(token.masked(), "***9876");
}
