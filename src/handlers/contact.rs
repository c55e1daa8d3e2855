use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::ContactMessage;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// POST /contact - store a contact-form submission with status "new"
pub async fn contact_post(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    validate(&body)?;

    let stored = sqlx::query_as::<_, ContactMessage>(
        "INSERT INTO contact_messages (name, email, phone, subject, message, status) \
         VALUES ($1, $2, $3, $4, $5, 'new') \
         RETURNING *",
    )
    .bind(&body.name)
    .bind(&body.email)
    .bind(body.phone.as_deref().unwrap_or(""))
    .bind(body.subject.as_deref().unwrap_or(""))
    .bind(&body.message)
    .fetch_one(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Your message has been sent successfully",
            "id": stored.id,
            "created_at": stored.created_at,
        })),
    ))
}

fn validate(body: &ContactRequest) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if body.name.as_deref().map_or(true, str::is_empty) {
        field_errors.insert("name".to_string(), "This field is required".to_string());
    }
    if body.email.as_deref().map_or(true, str::is_empty) {
        field_errors.insert("email".to_string(), "This field is required".to_string());
    }
    if body.message.as_deref().map_or(true, str::is_empty) {
        field_errors.insert("message".to_string(), "This field is required".to_string());
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "Name, email and message are required",
            Some(field_errors),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_fails_validation() {
        let body = ContactRequest {
            name: Some("A".into()),
            email: Some("a@b.com".into()),
            phone: None,
            subject: None,
            message: Some(String::new()),
        };
        let err = validate(&body).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_json()["field_errors"]["message"].is_string());
    }

    #[test]
    fn complete_submission_passes_validation() {
        let body = ContactRequest {
            name: Some("A".into()),
            email: Some("a@b.com".into()),
            phone: Some("555".into()),
            subject: Some("Hi".into()),
            message: Some("Does it ship?".into()),
        };
        assert!(validate(&body).is_ok());
    }
}
