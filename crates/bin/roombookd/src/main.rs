//! # roombookd — roombook daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the repository, clock and notification bus (adapters)
//! - Construct application services, injecting them via port traits
//! - Seed configured rooms
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::EnvFilter;

use roombook_adapter_http_axum::state::AppState;
use roombook_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteRoomRepository};
use roombook_app::notification_bus::InProcessNotificationBus;
use roombook_app::ports::{NotificationFeed, SystemClock};
use roombook_app::room_locks::RoomLocks;
use roombook_app::services::booking_system::BookingSystem;
use roombook_app::services::room_service::RoomService;
use roombook_domain::notification::Notification;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database.url.clone(),
        max_connections: config.database.max_connections,
    }
    .build()
    .await?;
    let repo = Arc::new(SqliteRoomRepository::new(db.pool().clone()));

    // Notifications
    let bus = Arc::new(InProcessNotificationBus::new(
        config.notifications.channel_capacity,
    ));
    if config.notifications.log_deliveries {
        tokio::spawn(log_deliveries(bus.subscribe()));
    }

    // Services
    let locks = RoomLocks::new();
    let booking_system = BookingSystem::with_locks(
        SystemClock,
        Arc::clone(&repo),
        bus,
        locks.clone(),
    );
    let room_service = RoomService::new(repo, locks);

    for id in &config.rooms.seed {
        if room_service.ensure_room(id).await? {
            tracing::info!(room_id = %id, "seeded room");
        }
    }

    // HTTP
    let state = AppState::new(booking_system, room_service);
    let app = roombook_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "roombookd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("roombookd stopped");
    Ok(())
}

/// Write every notice published on the bus to the log until the bus closes.
async fn log_deliveries(mut rx: broadcast::Receiver<Notification>) {
    loop {
        match rx.recv().await {
            Ok(notification) => tracing::info!(
                kind = %notification.kind,
                booking_id = %notification.booking.id(),
                room_id = %notification.booking.room_id(),
                start_time = %notification.booking.start_time(),
                end_time = %notification.booking.end_time(),
                "notification delivered"
            ),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "notification log lagged behind the bus");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
