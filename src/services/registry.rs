//! User registry service - Owns the user creation and listing flow.
//!
//! The registry validates required fields, hashes the plaintext secret
//! off the request path, and hands the candidate to the repository for
//! a uniqueness-checked insert. Uniqueness is decided by the storage
//! layer's constraint at insert time, never by a read-then-write check
//! here; that keeps concurrent registrations correct across processes.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::domain::{HashSettings, NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User registry trait for dependency injection.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Register a new user from a candidate record and a plaintext secret
    async fn register(&self, candidate: NewUser, password: String) -> AppResult<User>;

    /// List all registered users
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRegistry.
pub struct RegistryManager {
    repo: Arc<dyn UserRepository>,
    hash_settings: HashSettings,
    storage_timeout: Duration,
}

impl RegistryManager {
    /// Create new registry instance
    pub fn new(repo: Arc<dyn UserRepository>, config: &Config) -> Self {
        Self {
            repo,
            hash_settings: config.hash_settings.clone(),
            storage_timeout: config.storage_timeout,
        }
    }

    /// Apply the configured deadline to a storage round-trip.
    async fn with_timeout<T>(&self, fut: impl Future<Output = AppResult<T>> + Send) -> AppResult<T>
    where
        T: Send,
    {
        tokio::time::timeout(self.storage_timeout, fut)
            .await
            .map_err(|_| AppError::StorageTimeout)?
    }
}

/// Reject a registration before touching storage if a required field
/// is missing.
fn validate_required(candidate: &NewUser, password: &str) -> AppResult<()> {
    if candidate.first_name.is_empty() {
        return Err(AppError::validation("First name is required"));
    }
    if candidate.user_name.is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    if candidate.email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }
    Ok(())
}

#[async_trait]
impl UserRegistry for RegistryManager {
    async fn register(&self, candidate: NewUser, password: String) -> AppResult<User> {
        validate_required(&candidate, &password)?;

        // Hashing is CPU-bound; run it on the blocking pool so a slow
        // hash does not stall unrelated requests. The plaintext moves
        // into the closure and is dropped once the digest exists.
        let settings = self.hash_settings.clone();
        let digest = tokio::task::spawn_blocking(move || {
            Password::new(&password, &settings).map(Password::into_string)
        })
        .await
        .map_err(|e| AppError::internal(format!("hashing task failed: {}", e)))??;

        // Single atomic insert; the unique indexes decide duplicates.
        self.with_timeout(self.repo.insert(candidate, digest)).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.with_timeout(self.repo.list()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use uuid::Uuid;

    use crate::infra::repositories::MockUserRepository;

    fn candidate() -> NewUser {
        NewUser {
            first_name: "Ada".to_string(),
            last_name: None,
            user_name: "ada".to_string(),
            email: "ada@x.com".to_string(),
        }
    }

    fn stored_user(candidate: NewUser, digest: String) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            user_name: candidate.user_name,
            email: candidate.email,
            password_digest: digest,
            created_at: now,
            updated_at: now,
        }
    }

    fn manager(repo: MockUserRepository) -> RegistryManager {
        RegistryManager::new(Arc::new(repo), &Config::default())
    }

    #[tokio::test]
    async fn register_stores_a_digest_not_the_plaintext() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .withf(|_, digest| digest.as_str() != "secret1" && !digest.is_empty())
            .returning(|c, d| Ok(stored_user(c, d)));

        let user = manager(repo)
            .register(candidate(), "secret1".to_string())
            .await
            .unwrap();

        assert_ne!(user.password_digest, "secret1");
        assert!(Password::from_digest(user.password_digest).verify("secret1"));
    }

    #[tokio::test]
    async fn register_rejects_empty_user_name_before_storage() {
        // No expectations: the repository must not be touched
        let repo = MockUserRepository::new();

        let mut input = candidate();
        input.user_name = String::new();

        let result = manager(repo).register(input, "secret1".to_string()).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn register_rejects_empty_password_before_storage() {
        let repo = MockUserRepository::new();

        let result = manager(repo).register(candidate(), String::new()).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn register_propagates_duplicate_from_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .returning(|_, _| Err(AppError::duplicate("Username or email")));

        let result = manager(repo)
            .register(candidate(), "secret1".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
    }

    #[tokio::test]
    async fn duplicate_failure_is_idempotent() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(2)
            .returning(|_, _| Err(AppError::duplicate("Username or email")));

        let registry = manager(repo);
        for _ in 0..2 {
            let result = registry
                .register(candidate(), "secret1".to_string())
                .await;
            assert!(matches!(result.unwrap_err(), AppError::Duplicate(_)));
        }
    }

    #[tokio::test]
    async fn list_users_returns_storage_contents() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![stored_user(
                NewUser {
                    first_name: "Ada".to_string(),
                    last_name: None,
                    user_name: "ada".to_string(),
                    email: "ada@x.com".to_string(),
                },
                "digest".to_string(),
            )])
        });

        let users = manager(repo).list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_name, "ada");
    }

    #[tokio::test]
    async fn list_users_on_empty_collection_is_empty_not_an_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));

        let users = manager(repo).list_users().await.unwrap();
        assert!(users.is_empty());
    }

    /// Repository that never answers, for exercising the deadline.
    struct StalledRepo;

    #[async_trait]
    impl UserRepository for StalledRepo {
        async fn insert(&self, _candidate: NewUser, _digest: String) -> AppResult<User> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(AppError::internal("unreachable"))
        }

        async fn list(&self) -> AppResult<Vec<User>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(vec![])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_storage_surfaces_a_timeout() {
        let mut config = Config::default();
        config.storage_timeout = Duration::from_millis(10);
        let registry = RegistryManager::new(Arc::new(StalledRepo), &config);

        let result = registry.list_users().await;
        assert!(matches!(result.unwrap_err(), AppError::StorageTimeout));
    }
}
