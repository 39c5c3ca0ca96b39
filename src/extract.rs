//! Request extractors whose rejections render through `AppError`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body; a malformed body, missing field or wrong content type is a 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string; an unparsable parameter is a 400.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
