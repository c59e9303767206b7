// ABOUTME: HTTP middleware for request tracing, request ids and CORS
// ABOUTME: Layers are assembled once by the router builder

/// CORS configuration
pub mod cors;
/// Request id generation and per-request tracing spans
pub mod request_tracing;

pub use cors::setup_cors;
pub use request_tracing::{
    attach_request_id, make_request_span, RequestIdGenerator, REQUEST_ID_HEADER,
};
