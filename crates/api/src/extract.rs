//! Request extractors whose rejections use the project's error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose parse failures become [`AppError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
