//! User repository implementation.
//!
//! The insert path relies on the storage layer's unique indexes for
//! uniqueness enforcement; a constraint violation surfaces as a typed
//! duplicate error via the `DbErr` conversion in `errors`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::user::{ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    ///
    /// The insert is a single atomic operation; a unique-index violation
    /// on `user_name` or `email` is returned as `AppError::Duplicate`.
    async fn insert(&self, candidate: NewUser, password_digest: String) -> AppResult<User>;

    /// List every stored user record, in storage-defined order.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository backed by SeaORM.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, candidate: NewUser, password_digest: String) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(candidate.first_name),
            last_name: Set(candidate.last_name),
            user_name: Set(candidate.user_name),
            email: Set(candidate.email),
            password_digest: Set(password_digest),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
