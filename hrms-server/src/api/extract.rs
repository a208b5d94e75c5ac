//! JSON body extractors
//!
//! Drop-in replacements for `axum::Json` whose rejections render as a 400
//! `Validation failed` in the endpoint family's envelope instead of axum's
//! plain-text 415/422.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use shared::error::{AppError, AuthError, FieldError, ResourceError};

/// Body for the auth and performance endpoints
#[derive(Debug, Clone)]
pub struct AuthJson<T>(pub T);

/// Body for the attendance, employee and leave endpoints
#[derive(Debug, Clone)]
pub struct ResourceJson<T>(pub T);

async fn read_json<T, S>(req: Request, state: &S) -> Result<T, AppError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    match Json::<T>::from_request(req, state).await {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(rejected(rejection)),
    }
}

fn rejected(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be JSON with Content-Type: application/json".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON".to_string(),
        JsonRejection::JsonDataError(_) => rejection.body_text(),
        _ => "Request body could not be read".to_string(),
    };
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::invalid_fields(vec![FieldError::new("body", message)])
}

impl<T, S> FromRequest<S> for AuthJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_json(req, state).await?))
    }
}

impl<T, S> FromRequest<S> for ResourceJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ResourceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_json(req, state).await?))
    }
}
