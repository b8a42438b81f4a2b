//! Registry integration tests against a real database.
//!
//! These run the full registration flow (validation, hashing, insert)
//! over an in-memory SQLite database with migrations applied, so the
//! unique indexes decide duplicates exactly as in deployment.

use std::sync::Arc;

use sea_orm::Database as SeaDatabase;
use sea_orm_migration::MigratorTrait;

use user_registry::config::Config;
use user_registry::domain::{NewUser, Password};
use user_registry::errors::AppError;
use user_registry::infra::{Migrator, UserStore};
use user_registry::services::{RegistryManager, UserRegistry};

/// Create a registry over a fresh in-memory database
async fn create_test_registry() -> RegistryManager {
    let db = SeaDatabase::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    RegistryManager::new(Arc::new(UserStore::new(db)), &Config::default())
}

fn ada() -> NewUser {
    NewUser {
        first_name: "Ada".to_string(),
        last_name: None,
        user_name: "ada".to_string(),
        email: "ada@x.com".to_string(),
    }
}

#[tokio::test]
async fn create_then_list_round_trips_the_visible_fields() {
    let registry = create_test_registry().await;

    let created = registry
        .register(ada(), "secret1".to_string())
        .await
        .expect("registration should succeed");

    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.user_name, "ada");
    assert_eq!(created.email, "ada@x.com");
    assert!(!created.password_digest.is_empty());
    assert_ne!(created.password_digest, "secret1");

    let users = registry.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, created.id);
    assert_eq!(users[0].user_name, "ada");
    assert_eq!(users[0].email, "ada@x.com");
}

#[tokio::test]
async fn duplicate_user_name_is_rejected_and_nothing_is_written() {
    let registry = create_test_registry().await;

    registry.register(ada(), "secret1".to_string()).await.unwrap();

    let mut same_name = ada();
    same_name.email = "other@x.com".to_string();

    let err = registry
        .register(same_name, "secret2".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Duplicate(_)));
    assert!(err.to_string().contains("already exists"));

    let users = registry.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let registry = create_test_registry().await;

    registry.register(ada(), "secret1".to_string()).await.unwrap();

    let mut same_email = ada();
    same_email.user_name = "lovelace".to_string();

    let err = registry
        .register(same_email, "secret2".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Duplicate(_)));
}

#[tokio::test]
async fn repeated_duplicate_attempts_fail_the_same_way() {
    let registry = create_test_registry().await;

    registry.register(ada(), "secret1".to_string()).await.unwrap();

    for _ in 0..2 {
        let err = registry
            .register(ada(), "secret1".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));

        let users = registry.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
    }
}

#[tokio::test]
async fn empty_user_name_is_rejected_before_storage() {
    let registry = create_test_registry().await;

    let mut input = ada();
    input.user_name = String::new();

    let err = registry
        .register(input, "secret1".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));

    let users = registry.list_users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn list_on_empty_collection_is_an_empty_sequence() {
    let registry = create_test_registry().await;

    let users = registry.list_users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn concurrent_registrations_with_same_user_name_yield_one_success() {
    let registry = create_test_registry().await;

    let mut second = ada();
    second.email = "other@x.com".to_string();

    let (first_result, second_result) = tokio::join!(
        registry.register(ada(), "secret1".to_string()),
        registry.register(second, "secret2".to_string()),
    );

    let successes = [&first_result, &second_result]
        .iter()
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(successes, 1, "exactly one concurrent insert may win");

    let loser = if first_result.is_ok() {
        second_result.unwrap_err()
    } else {
        first_result.unwrap_err()
    };
    assert!(matches!(loser, AppError::Duplicate(_)));

    let users = registry.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn same_plaintext_produces_distinct_verifiable_digests() {
    let registry = create_test_registry().await;

    let first = registry.register(ada(), "secret1".to_string()).await.unwrap();

    let other = NewUser {
        first_name: "Grace".to_string(),
        last_name: Some("Hopper".to_string()),
        user_name: "grace".to_string(),
        email: "grace@x.com".to_string(),
    };
    let second = registry
        .register(other, "secret1".to_string())
        .await
        .unwrap();

    // Salting: same plaintext, different digests
    assert_ne!(first.password_digest, second.password_digest);

    assert!(Password::from_digest(first.password_digest).verify("secret1"));
    assert!(Password::from_digest(second.password_digest).verify("secret1"));
}
