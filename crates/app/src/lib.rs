//! # roombook-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `TimeProvider` — the single source of "now"
//!   - `RoomRepository` — load and persist rooms with their bookings
//!   - `NotificationService` — booking and cancellation notices
//! - Define **driving/inbound ports** as use-case structs:
//!   - `BookingSystem` — book, query availability, cancel
//!   - `RoomService` — register, list, get rooms
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (per-room locks, the notification bus)
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `roombook-domain` only (plus `tokio::sync` for locks and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod notification_bus;
pub mod ports;
pub mod room_locks;
pub mod services;
