//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use elderease_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but also validates the body.
///
/// Malformed JSON and failed rules both become `400` responses in the
/// standard error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| AppError::validation(describe(&errors)))?;
        Ok(Self(value))
    }
}

/// Flatten field errors into one sentence, fields in alphabetical order.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, list)| {
            list.iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
