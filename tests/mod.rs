mod language_tests;
mod streaming_tests;

use exprun::{Event, Interpreter, OutputMode, RunOutcome};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Runs `source` on a fresh interpreter, collecting every emitted event.
pub fn run_collecting(source: &str) -> (RunOutcome, Vec<Event>, Interpreter) {
    let mut interpreter = Interpreter::default();
    let mut events = Vec::new();
    let outcome = {
        let mut output = OutputMode::structured(|event| events.push(event));
        interpreter
            .run(source, &mut output)
            .expect("structured output never fails here")
    };
    (outcome, events, interpreter)
}
