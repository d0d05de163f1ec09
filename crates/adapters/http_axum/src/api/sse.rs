//! Server-Sent Events (SSE) stream of booking notifications.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use roombook_app::ports::{NotificationFeed, NotificationService, RoomRepository, TimeProvider};

use crate::state::AppState;

/// `GET /api/notifications/stream` — SSE stream of booking notifications.
///
/// Subscribes to the notification bus and sends JSON-encoded notices as SSE
/// `data:` frames, with the notification kind as the SSE event name. The
/// stream continues until the client disconnects or the bus is closed.
pub async fn stream<C, R, N>(
    State(state): State<AppState<C, R, N>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    C: TimeProvider + Send + Sync + 'static,
    R: RoomRepository + Send + Sync + 'static,
    N: NotificationService + NotificationFeed + Send + Sync + 'static,
{
    let rx = state.booking_system.notifier().subscribe();
    let events = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(notification) => match serde_json::to_string(&notification) {
            Ok(json) => Some(Ok(Event::default()
                .event(notification.kind.to_string())
                .data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize notification for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(
                skipped = n,
                "SSE subscriber lagged, some notifications were dropped"
            );
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
