//! JSON extractor that validates the payload after deserializing.
//!
//! Rejections from either step are converted into the application's
//! validation error, so handlers only ever see well-formed input.
//!
//! ```rust,ignore
//! async fn create_user(
//!     State(state): State<AppState>,
//!     ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
//! ) -> AppResult<(StatusCode, Json<UserResponse>)> {
//!     // payload passed its `validator` rules
//! }
//! ```

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// JSON body that has passed its `validator` derive rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        if let Err(errors) = payload.validate() {
            return Err(AppError::validation(flatten_errors(&errors)));
        }

        Ok(Self(payload))
    }
}

/// Collapse field-level validation errors into one client message
fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{} is invalid", field)),
            }
        }
    }
    messages.join(", ")
}
