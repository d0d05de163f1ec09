//! # roombook-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST-ish JSON API** for rooms, availability and bookings
//!   (`/api/rooms`, `/api/rooms/available`, `/api/bookings`, …)
//! - Stream booking notifications as **Server-Sent Events**
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `roombook-app` (for port traits and services) and `roombook-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
