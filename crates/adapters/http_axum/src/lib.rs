//! # streetlight-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON status endpoint** polled by dashboards (`/api/data`)
//! - Accept **manual commands** (`POST /control`) and hand them to the
//!   control service
//! - Stream **light events** as Server-Sent Events (`/api/events/stream`)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `streetlight-app` (for port traits and services) and
//! `streetlight-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
