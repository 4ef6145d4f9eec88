//! # Campus Core
//!
//! Domain models, request/response types and the error taxonomy shared by the
//! store, API and assistant crates.

pub mod assistant;
pub mod errors;
pub mod models;
