//! Lenient facade over the token service
//!
//! Every failure, whether a missing token, an unreachable store or a
//! malformed record, is reported as `None` (or silently ignored for the
//! operations that return nothing). Use [`TokenFacade::service`] when the
//! cause matters.

use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::token::Token;
use crate::domain::value_objects::{
    CreateToken, DeleteAllTokens, DeleteToken, GetToken, RefreshToken, UpdateToken,
};
use crate::errors::TokenResult;
use crate::repositories::KeyValueStore;

use super::config::TokenServiceConfig;
use super::service::TokenService;

/// Token store with present/absent results
pub struct TokenFacade<S: KeyValueStore> {
    service: TokenService<S>,
}

impl<S: KeyValueStore> Clone for TokenFacade<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S: KeyValueStore> From<TokenService<S>> for TokenFacade<S> {
    fn from(service: TokenService<S>) -> Self {
        Self::new(service)
    }
}

impl<S: KeyValueStore> TokenFacade<S> {
    pub fn new(service: TokenService<S>) -> Self {
        Self { service }
    }

    /// Build a facade directly over a store
    pub fn with_store(store: Arc<S>, config: TokenServiceConfig) -> Self {
        Self::new(TokenService::new(store, config))
    }

    /// The typed service behind this facade
    pub fn service(&self) -> &TokenService<S> {
        &self.service
    }

    pub async fn create(&self, request: CreateToken) -> Option<Token> {
        collapse("create", self.service.create(request).await)
    }

    pub async fn get(&self, request: GetToken) -> Option<Token> {
        collapse("get", self.service.get(request).await)
    }

    pub async fn refresh(&self, request: RefreshToken) {
        collapse("refresh", self.service.refresh(request).await);
    }

    pub async fn update(&self, request: UpdateToken) -> Option<Token> {
        collapse("update", self.service.update(request).await)
    }

    pub async fn delete(&self, request: DeleteToken) {
        collapse("delete", self.service.delete(request).await);
    }

    pub async fn delete_all(&self, request: DeleteAllTokens) {
        collapse("delete_all", self.service.delete_all(request).await);
    }
}

fn collapse<T>(operation: &'static str, result: TokenResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(operation, kind = ?e.kind(), error = %e, "Token operation returned no result");
            None
        }
    }
}
