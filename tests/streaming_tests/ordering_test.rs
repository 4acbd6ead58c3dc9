use exprun::{
    runtime::SNAPSHOT_FAILURE, stream_execution, Environment, Event, SystemConfig, Value,
};
use futures::{future::join_all, StreamExt};
use pretty_assertions::assert_eq;

fn labels(events: &[Event]) -> Vec<&'static str> {
    events.iter().map(Event::label).collect()
}

#[tokio::test]
async fn test_two_prints_then_runtime_error() {
    let events = stream_execution("a = 1\nprint a\nprint a + 1\nprint b", Environment::new(), &SystemConfig::default())
        .collect_events()
        .await;

    assert_eq!(
        labels(&events),
        vec!["stdout", "stdout", "runtime_error", "env_snapshot"]
    );
    assert_eq!(events[0], Event::Stdout("1.0".to_string()));
    assert_eq!(events[1], Event::Stdout("2.0".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_streams_stay_ordered() {
    let config = SystemConfig::default();
    let runs = (0..100).map(|i| {
        let source = format!("id = {i}\nprint id\nprint id * 2\nprint missing_{i}");
        let stream = stream_execution(source, Environment::new(), &config);
        async move { (i, stream.collect_events().await) }
    });

    for (i, events) in join_all(runs).await {
        assert_eq!(
            labels(&events),
            vec!["stdout", "stdout", "runtime_error", "env_snapshot"],
            "run {i}"
        );
        assert_eq!(events[0], Event::Stdout(Value::Number(f64::from(i)).to_string()));
        assert_eq!(
            events[1],
            Event::Stdout(Value::Number(f64::from(i * 2)).to_string())
        );
        assert!(
            matches!(&events[2], Event::RuntimeError(r) if r.contains(&format!("missing_{i}"))),
            "run {i}: {:?}",
            events[2]
        );
        match &events[3] {
            Event::EnvSnapshot(snapshot) => {
                assert_eq!(snapshot.len(), 1);
                assert_eq!(snapshot.get("id"), Some(&Value::Number(f64::from(i))));
            }
            other => panic!("run {i}: expected snapshot, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_syntax_error_stream() {
    let events = stream_execution("print 1\nprint (", Environment::new(), &SystemConfig::default())
        .collect_events()
        .await;
    assert_eq!(labels(&events), vec!["syntax_error", "env_snapshot"]);
}

#[tokio::test]
async fn test_seeded_snapshot() {
    let seed: Environment = [("x", Value::Number(1.0))].into_iter().collect();
    let events = stream_execution("y = x < 2", seed, &SystemConfig::default())
        .collect_events()
        .await;

    let expected: exprun::Snapshot = [
        ("x".to_string(), Value::Number(1.0)),
        ("y".to_string(), Value::Boolean(true)),
    ]
    .into_iter()
    .collect();
    assert_eq!(events, vec![Event::EnvSnapshot(expected)]);
}

#[tokio::test]
async fn test_stream_interface() {
    let stream = stream_execution("print 1; print 2", Environment::new(), &SystemConfig::default());
    let json: Vec<String> = stream
        .map(|event| event.to_json().unwrap())
        .collect()
        .await;
    assert_eq!(
        json,
        vec![
            r#"{"type":"stdout","content":"1.0"}"#.to_string(),
            r#"{"type":"stdout","content":"2.0"}"#.to_string(),
            r#"{"type":"env_snapshot","content":{}}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_unencodable_snapshot_is_fatal() {
    let events = stream_execution("print 1\nhuge = 10 ^ 400", Environment::new(), &SystemConfig::default())
        .collect_events()
        .await;
    assert_eq!(
        events,
        vec![
            Event::Stdout("1.0".to_string()),
            Event::FatalError(SNAPSHOT_FAILURE.to_string()),
        ]
    );
}

#[tokio::test]
async fn test_dropped_consumer_does_not_hang() {
    let mut stream = stream_execution("print 1\nprint 2\nprint 3", Environment::new(), &SystemConfig::default());
    assert_eq!(stream.recv().await, Some(Event::Stdout("1.0".to_string())));
    drop(stream);

    // a later run is unaffected
    let events = stream_execution("print 4", Environment::new(), &SystemConfig::default())
        .collect_events()
        .await;
    assert_eq!(labels(&events), vec!["stdout", "env_snapshot"]);
}

#[tokio::test]
async fn test_nesting_at_default_limit_streams_to_completion() {
    let config = SystemConfig::default();
    let depth = config.parser.max_depth - 1;
    let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    let events = stream_execution(source, Environment::new(), &config)
        .collect_events()
        .await;

    let expected: exprun::Snapshot = [("x".to_string(), Value::Number(1.0))]
        .into_iter()
        .collect();
    assert_eq!(events, vec![Event::EnvSnapshot(expected)]);
}

#[tokio::test]
async fn test_nesting_past_default_limit_is_syntax_error() {
    let config = SystemConfig::default();
    let depth = config.parser.max_depth + 1;
    let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    let events = stream_execution(source, Environment::new(), &config)
        .collect_events()
        .await;
    assert_eq!(labels(&events), vec!["syntax_error", "env_snapshot"]);
}
