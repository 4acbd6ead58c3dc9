//! # Streaming Execution
//!
//! Runs one program on a blocking worker while an async consumer reads its
//! events as they happen.
//!
//! ```text
//! ┌────────────────┐  Event ... Event, EnvSnapshot, EndOfStream  ┌──────────────────┐
//! │ worker (spawn_ │────────────────────────────────────────────▶│ ExecutionStream  │
//! │ blocking)      │        unbounded mpsc channel               │ (futures Stream) │
//! └────────────────┘                                             └──────────────────┘
//! ```
//!
//! Every stream, whatever happens on the worker, ends with exactly one
//! [`Event::EnvSnapshot`] (or a [`Event::FatalError`] when the snapshot cannot
//! be encoded) and is then closed. Host failures on the worker, including
//! panics and exceeding [`StreamConfig::max_events`], surface as a
//! `FatalError` placed before the snapshot.
//!
//! Dropping the stream does not cancel the run; the worker finishes and its
//! remaining sends are discarded.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{ready, Stream, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info_span};
use uuid::Uuid;

use crate::config::{StreamConfig, SystemConfig};
use crate::error::InternalResult;
use crate::eval::{Environment, Interpreter, RunOutcome};
use crate::event::{Event, OutputMode, SinkError};

pub const SNAPSHOT_FAILURE: &str = "Failed to serialize final environment.";
pub const WORKER_LOST: &str = "FATAL SERVER ERROR: execution worker stopped before finishing the stream.";

/// Message on the channel between a worker and its consumer.
#[derive(Debug)]
enum StreamMessage {
    Event(Event),
    EndOfStream,
}

/// Consumer half of a streaming run. Yields events in emission order and
/// ends after the final snapshot.
#[derive(Debug)]
pub struct ExecutionStream {
    run_id: Uuid,
    receiver: UnboundedReceiver<StreamMessage>,
    finished: bool,
}

impl ExecutionStream {
    fn new(run_id: Uuid, receiver: UnboundedReceiver<StreamMessage>) -> Self {
        Self {
            run_id,
            receiver,
            finished: false,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Next event, or `None` once the stream has ended.
    pub async fn recv(&mut self) -> Option<Event> {
        self.next().await
    }

    /// Drains the stream.
    pub async fn collect_events(self) -> Vec<Event> {
        self.collect().await
    }

    fn on_message(&mut self, message: Option<StreamMessage>) -> Option<Event> {
        match message {
            Some(StreamMessage::Event(event)) => Some(event),
            Some(StreamMessage::EndOfStream) => {
                self.finished = true;
                None
            }
            None => {
                self.finished = true;
                error!(run_id = %self.run_id, "worker channel closed without end of stream");
                Some(Event::FatalError(WORKER_LOST.to_string()))
            }
        }
    }
}

impl Stream for ExecutionStream {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        if self.finished {
            return Poll::Ready(None);
        }
        let message = ready!(self.receiver.poll_recv(cx));
        Poll::Ready(self.on_message(message))
    }
}

/// Starts `source` on a blocking worker seeded with `seed` and returns the
/// consumer side. Must be called from within a tokio runtime.
pub fn stream_execution(
    source: impl Into<String>,
    seed: Environment,
    config: &SystemConfig,
) -> ExecutionStream {
    let source = source.into();
    let interpreter = Interpreter::new(config.parser.clone()).with_environment(seed);
    spawn_worker(interpreter, config.stream.clone(), move |interpreter, output| {
        interpreter.run(&source, output)
    })
}

fn spawn_worker<F>(interpreter: Interpreter, config: StreamConfig, job: F) -> ExecutionStream
where
    F: FnOnce(&mut Interpreter, &mut OutputMode<'static>) -> InternalResult<RunOutcome>
        + Send
        + 'static,
{
    let run_id = Uuid::new_v4();
    let (sender, receiver) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let span = info_span!("stream_run", %run_id);
        let _guard = span.enter();
        execute(interpreter, config, job, sender);
    });

    ExecutionStream::new(run_id, receiver)
}

fn execute<F>(
    mut interpreter: Interpreter,
    config: StreamConfig,
    job: F,
    sender: UnboundedSender<StreamMessage>,
) where
    F: FnOnce(&mut Interpreter, &mut OutputMode<'static>) -> InternalResult<RunOutcome>,
{
    let send = |event: Event| {
        // the consumer may have gone away; the run still completes
        let _ = sender.send(StreamMessage::Event(event));
    };

    let relay = sender.clone();
    let mut emitted = 0usize;
    let mut output = OutputMode::Structured(Box::new(move |event: Event| -> Result<(), SinkError> {
        if let Some(limit) = config.max_events {
            if emitted >= limit {
                return Err(SinkError::LimitExceeded { limit });
            }
        }
        emitted += 1;
        let _ = relay.send(StreamMessage::Event(event));
        Ok(())
    }));

    let result = panic::catch_unwind(AssertUnwindSafe(|| job(&mut interpreter, &mut output)));
    match result {
        Ok(Ok(outcome)) => debug!("run finished: {:?}", outcome),
        Ok(Err(e)) => {
            error!("run failed: {}", e);
            send(Event::FatalError(format!("FATAL SERVER ERROR: {}", e)));
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("run panicked: {}", message);
            send(Event::FatalError(format!("FATAL SERVER ERROR: {}", message)));
        }
    }

    send(final_snapshot(interpreter.environment()));
    let _ = sender.send(StreamMessage::EndOfStream);
}

/// The snapshot event, or a fatal error when some value has no JSON form.
fn final_snapshot(environment: &Environment) -> Event {
    let snapshot = environment.snapshot();
    match serde_json::to_string(&snapshot) {
        Ok(_) => Event::EnvSnapshot(snapshot),
        Err(e) => {
            error!("snapshot encoding failed: {}", e);
            Event::FatalError(SNAPSHOT_FAILURE.to_string())
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
