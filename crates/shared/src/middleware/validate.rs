use crate::{errors::HttpError, utils::validation_messages};
use axum::{
    Form,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Form body that has passed its `validator` rules.
pub struct ValidatedForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                HttpError::BadRequest("Invalid form".into(), vec![rejection.body_text()])
            })?;

        value.validate().map_err(|validation_errors| {
            HttpError::BadRequest(
                "Validation failed".into(),
                validation_messages(&validation_errors),
            )
        })?;

        Ok(Self(value))
    }
}
