//! `POST /api/send-brief-email`: confirms a service request to the client.

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    extractors::ApiJson,
    models::{MessageResponse, ServiceRequestRecord},
    notification::compose_brief_email,
    AppState,
};

pub async fn handle_send_brief_email(
    State(state): State<AppState>,
    ApiJson(record): ApiJson<ServiceRequestRecord>,
) -> Result<Json<MessageResponse>> {
    record.validate()?;

    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("Mail delivery is not configured".to_string()))?;

    let email = compose_brief_email(&state.email_from, &record);
    mailer.send(&email).await?;

    info!("Brief confirmation sent to {} via {}", record.email, mailer.name());
    Ok(Json(MessageResponse::new("Transmission Successful")))
}

pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
