//! Token lifecycle walkthrough against a local Redis
//!
//! Run with: cargo run -p rt_infra --example token_lifecycle
//! Set REDIS_URL to point at another server.

use anyhow::Context;
use serde_json::json;

use rt_core::{CreateToken, DeleteAllTokens, RefreshToken, TokenLookup, UpdateToken};
use rt_infra::{load_config, telemetry, tokens};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();
    telemetry::init_tracing(&config.logging)?;

    println!("=== Token Lifecycle Demo ===\n");

    println!("Connecting to Redis...");
    let store = tokens::connect_with_config(&config)
        .await
        .context("Failed to connect to Redis")?;
    let service = store.service();
    println!("✓ Redis connected (ping: {})\n", service.ping().await?);

    // Issue a password reset token valid for 15 minutes
    let created = service
        .create(
            CreateToken::new("demo", "password-reset", "user-42")
                .with_data(json!({"email": "user42@example.com", "attempts": 0})
                    .as_object()
                    .cloned()
                    .unwrap_or_default())
                .with_duration(900),
        )
        .await?;
    println!("Created token ending in {}", created.masked());

    let lookup = TokenLookup::new("demo", "password-reset", &created.token);

    let found = service.get(lookup.clone()).await?;
    println!("Owner recovered from key: {}", found.owner);

    if let Some(ttl) = service.ttl(lookup.clone()).await? {
        println!("Token expires in {} seconds", ttl);
    }

    // Record an attempt and drop the email
    let patch = json!({"attempts": 1, "email": null})
        .as_object()
        .cloned()
        .unwrap_or_default();
    let updated = service.update(UpdateToken::new(lookup.clone(), patch)).await?;
    println!("Updated data: {}", serde_json::Value::Object(updated.data));

    service.refresh(RefreshToken::new(lookup.clone(), 3600)).await?;
    println!("Refreshed to one hour");

    service.delete(lookup.clone()).await?;
    match service.get(lookup).await {
        Ok(_) => println!("Token still present"),
        Err(e) => println!("After delete: {}", e),
    }

    // Several sessions for one owner, removed together
    for _ in 0..3 {
        store
            .create(CreateToken::new("demo", "session", "user-42").with_duration(600))
            .await;
    }
    let removed = service
        .delete_all(DeleteAllTokens::new("demo", "session", "user-42"))
        .await?;
    println!("Removed {} sessions", removed);

    println!("\nExample completed successfully!");
    Ok(())
}
