//! # roombook-domain
//!
//! Pure domain model for the roombook reservation engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Bookings** (immutable reserved intervals on one room)
//! - Define **Rooms** (owners of their bookings, answering overlap queries)
//! - Define **Notifications** (confirmation and cancellation notices)
//! - Define the **request** shapes accepted by the booking use-cases
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod booking;
pub mod notification;
pub mod request;
pub mod room;
