// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates request ids, opens one span per request and stamps ids on error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

use axum::extract::Request as AxumRequest;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{info_span, Span};
use uuid::Uuid;

use crate::errors::ErrorResponse;

/// Header carrying the request id in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates `req_<uuid>` ids for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdGenerator;

impl MakeRequestId for RequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Span for one HTTP request, tagged with its request id
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Copy the request id into the body of error responses
pub async fn attach_request_id(request: AxumRequest, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let response = next.run(request).await;
    let Some(request_id) = request_id else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    match parts.extensions.remove::<ErrorResponse>() {
        Some(mut error) => {
            error.error.request_id = Some(request_id);
            (parts, Json(error)).into_response()
        }
        None => Response::from_parts(parts, body),
    }
}
