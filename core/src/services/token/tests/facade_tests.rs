//! Tests for the lenient facade

use serde_json::json;
use std::sync::Arc;

use crate::domain::value_objects::{
    CreateToken, DeleteAllTokens, RefreshToken, TokenLookup, UpdateToken,
};
use crate::repositories::KeyValueStore;
use crate::services::token::{TokenFacade, TokenServiceConfig};

use super::mocks::MockStore;

fn facade(store: &MockStore) -> TokenFacade<MockStore> {
    TokenFacade::with_store(Arc::new(store.clone()), TokenServiceConfig::default())
}

#[tokio::test]
async fn test_facade_happy_path() {
    let store = MockStore::new();
    let facade = facade(&store);

    let created = facade
        .create(
            CreateToken::new("shop", "cart", "buyer-9")
                .with_data(json!({"items": 3}).as_object().cloned().unwrap())
                .with_duration(600),
        )
        .await
        .expect("token should be created");

    let lookup = TokenLookup::new("shop", "cart", &created.token);
    let found = facade.get(lookup.clone()).await.expect("token should exist");
    assert_eq!(found.owner, "buyer-9");
    assert_eq!(found.data["items"], 3);

    let updated = facade
        .update(UpdateToken::new(
            lookup.clone(),
            json!({"items": 4}).as_object().cloned().unwrap(),
        ))
        .await
        .expect("update should succeed");
    assert_eq!(updated.data["items"], 4);

    facade.refresh(RefreshToken::new(lookup.clone(), 900)).await;
    assert_eq!(store.inner.ttl(&created.key()).await.unwrap(), Some(900));

    facade.delete(lookup.clone()).await;
    assert!(facade.get(lookup).await.is_none());
}

#[tokio::test]
async fn test_facade_collapses_missing_tokens() {
    let store = MockStore::new();
    let facade = facade(&store);
    let lookup = TokenLookup::new("shop", "cart", "missing");

    assert!(facade.get(lookup.clone()).await.is_none());
    assert!(facade
        .update(UpdateToken::new(lookup.clone(), Default::default()))
        .await
        .is_none());

    // No-ops that must not panic
    facade.refresh(RefreshToken::new(lookup.clone(), 10)).await;
    facade.delete(lookup).await;
    facade
        .delete_all(DeleteAllTokens::new("shop", "cart", "nobody"))
        .await;
}

#[tokio::test]
async fn test_facade_collapses_store_failures() {
    let store = MockStore::failing();
    let facade = facade(&store);

    assert!(facade
        .create(CreateToken::new("shop", "cart", "buyer-9"))
        .await
        .is_none());
    assert!(facade
        .get(TokenLookup::new("shop", "cart", "abc"))
        .await
        .is_none());
    facade
        .delete_all(DeleteAllTokens::new("shop", "cart", "buyer-9"))
        .await;

    // The typed service still reports the cause
    let err = facade
        .service()
        .get(TokenLookup::new("shop", "cart", "abc"))
        .await
        .unwrap_err();
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_facade_collapses_invalid_input() {
    let store = MockStore::new();
    let facade = facade(&store);

    assert!(facade
        .create(CreateToken::new("shop", "cart", "a|b"))
        .await
        .is_none());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_facade_delete_all() {
    let store = MockStore::new();
    let facade = facade(&store);

    let first = facade
        .create(CreateToken::new("shop", "cart", "buyer-9"))
        .await
        .unwrap();
    let second = facade
        .create(CreateToken::new("shop", "cart", "buyer-9"))
        .await
        .unwrap();

    facade
        .delete_all(DeleteAllTokens::new("shop", "cart", "buyer-9"))
        .await;

    for token in [first, second] {
        assert!(facade
            .get(TokenLookup::new("shop", "cart", &token.token))
            .await
            .is_none());
    }
}
