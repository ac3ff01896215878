//! JSON extractor whose rejections use the API's `{"error": ...}` body

use axum::{
    async_trait,
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body".to_string(),
        JsonRejection::JsonSyntaxError(_) => "Invalid JSON format".to_string(),
        JsonRejection::JsonDataError(err) => format!("Invalid brief: {}", err.body_text()),
        _ => "Failed to parse JSON request".to_string(),
    };
    tracing::debug!("Rejected JSON body: {}", rejection);
    AppError::BadRequest(message)
}
