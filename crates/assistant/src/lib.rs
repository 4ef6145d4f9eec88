//! # Campus Assistant
//!
//! The academic chat assistant. [`gateway::GeminiGateway`] forwards a prompt
//! to Google's Gemini `generateContent` API and hands back the reply text.

pub mod config;
pub mod gateway;

pub mod mock;

pub use gateway::GeminiGateway;
