/// Bearer-token extractors and role guards
pub mod auth;
/// Mapping from domain errors to HTTP responses
pub mod error_handling;
/// Body, query and path extractors with JSON rejections
pub mod extract;
