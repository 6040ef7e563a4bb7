//! # traq-api
//!
//! REST client for the task backend.
//!
//! One method per endpoint, nothing clever: every task call attaches
//! `Authorization: Bearer <token>` and maps non-success statuses to
//! [`ApiError::Status`] carrying the HTTP status text. The backend's
//! behaviour is its own business — this crate only speaks the wire shapes.

#![deny(unsafe_code)]

pub mod client;
pub mod errors;

pub use client::{ApiClient, ClockOutResponse, RegisterRequest, RegisteredUser};
pub use errors::ApiError;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
