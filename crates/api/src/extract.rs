//! Extractors that report rejections through [`AppError`].
//!
//! Axum's stock `Json` and `Path` reject with a plain-text body. These
//! wrappers turn a malformed body or a non-numeric path segment into the
//! usual `{ "error", "code": "BAD_REQUEST" }` response.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
