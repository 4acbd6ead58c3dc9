use std::convert::Infallible;

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::sse::{Event as SseEvent, KeepAlive, Sse},
};
use exprun::{Environment, Event, stream_execution};
use serde_json::json;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, error};

use crate::error::AppError;
use crate::models::StreamQuery;
use crate::server::AppState;

/// Run a program and stream its events
///
/// Each run event becomes one `data:` frame holding the event's JSON. The
/// response ends after the environment snapshot.
pub async fn stream_code(
    State(state): State<AppState>,
    query: Result<Query<StreamQuery>, QueryRejection>,
) -> Result<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>, AppError> {
    let Query(StreamQuery { code }) = query?;

    let execution = stream_execution(code, Environment::new(), &state.system_config);
    debug!(run_id = %execution.run_id(), "stream opened");

    let frames = execution.map(|event| Ok(to_sse(&event)));
    Ok(Sse::new(frames).keep_alive(KeepAlive::default()))
}

fn to_sse(event: &Event) -> SseEvent {
    let data = event.to_json().unwrap_or_else(|e| {
        error!("failed to encode {} event: {}", event.label(), e);
        json!({
            "type": "fatal_error",
            "content": format!("FATAL SERVER ERROR: {}", e),
        })
        .to_string()
    });
    SseEvent::default().data(data)
}
