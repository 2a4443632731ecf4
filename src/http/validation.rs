//! Request bodies and their validation.
//!
//! Stores assume complete, well-formed candidates; everything that can be
//! wrong with a request is caught here.

use super::error::ApiError;
use crate::types::{NewFeedback, NewSubscriber};
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request body sent either as JSON or as an HTML form post.
///
/// Form bodies are recognised by their content type; anything else is read
/// as JSON.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE))
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = if is_form(&req) {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|e| e.body_text())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|e| e.body_text())
        };

        body.map(JsonOrForm).map_err(|text| ApiError::InvalidData {
            errors: json!({ "body": [text] }),
        })
    }
}

/// One `@`, a non-empty local part, a dotted domain, no whitespace.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Commas would split a subscriber log line in two.
const FORBIDDEN_EMAIL_CHARS: &[char] = &[','];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email) && !email.contains(FORBIDDEN_EMAIL_CHARS)
}

/// Body of `POST /api/subscribers`.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriberForm {
    #[serde(default)]
    pub email: Option<String>,
}

impl SubscriberForm {
    pub fn validate(self) -> Result<NewSubscriber, ApiError> {
        match self.email {
            Some(email) if is_valid_email(&email) => Ok(NewSubscriber::new(email)),
            Some(_) => Err(ApiError::invalid_field(
                "email",
                "Please enter a valid email address",
            )),
            None => Err(ApiError::invalid_field("email", "Required")),
        }
    }
}

/// Body of `POST /api/feedbacks`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FeedbackForm {
    pub fn validate(self) -> Result<NewFeedback, ApiError> {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|v| !v.trim().is_empty())
        }

        match (
            present(self.name),
            present(self.email),
            present(self.category),
            present(self.message),
        ) {
            (Some(name), Some(email), Some(category), Some(message)) => {
                Ok(NewFeedback::new(name, email, category, message))
            }
            _ => Err(ApiError::MissingFeedbackFields),
        }
    }
}

impl ApiError {
    fn invalid_field(field: &str, message: &str) -> Self {
        ApiError::InvalidData {
            errors: json!({ field: [message] }),
        }
    }
}
