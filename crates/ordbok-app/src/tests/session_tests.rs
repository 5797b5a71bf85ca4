use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use ordbok_config::Config;
use ordbok_loader::fetch::{DictionarySource, FetchOutcome};
use ordbok_types::{DisplayMode, LoadStatus, SegmentRole, SessionEvent};
use tokio::time::timeout;

use crate::events::event_loop;
use crate::state::AppState;

const DICT: &str = r#"<root>
  <n v="ca">
    <w v="cat">
      <l>cat<s n="s"/></l>
      <r>katt<s n="t:katt"/></r>
    </w>
  </n>
</root>"#;

struct StaticSource;

#[async_trait]
impl DictionarySource for StaticSource {
    async fn fetch(&self, _direction: &str) -> FetchOutcome {
        FetchOutcome::Loaded(DICT.to_string())
    }
}

struct SlowSource;

#[async_trait]
impl DictionarySource for SlowSource {
    async fn fetch(&self, _direction: &str) -> FetchOutcome {
        tokio::time::sleep(Duration::from_secs(10)).await;
        FetchOutcome::Loaded(DICT.to_string())
    }
}

struct MissingSource;

#[async_trait]
impl DictionarySource for MissingSource {
    async fn fetch(&self, _direction: &str) -> FetchOutcome {
        FetchOutcome::NotFound
    }
}

fn spawn_session(
    source: Arc<dyn DictionarySource>,
) -> (AsyncSender<SessionEvent>, AsyncReceiver<SessionEvent>) {
    let mut config = Config::default();
    config.direction = "en-sv-lr".to_string();
    let state = Arc::new(AppState::new(config));
    let (input_tx, input_rx) = kanal::bounded_async(64);
    let (output_tx, output_rx) = kanal::bounded_async(256);
    tokio::spawn(event_loop(state, input_rx, output_tx, source));
    (input_tx, output_rx)
}

async fn next_event(rx: &AsyncReceiver<SessionEvent>) -> SessionEvent {
    timeout(Duration::from_secs(30), rx.recv())
        .await
        .expect("timed out waiting for an event")
        .expect("session channel closed")
}

async fn expect_loaded(rx: &AsyncReceiver<SessionEvent>) {
    assert!(matches!(next_event(rx).await, SessionEvent::ClearResults));
    assert!(matches!(
        next_event(rx).await,
        SessionEvent::Status(LoadStatus::LoadingStarted)
    ));
    assert!(matches!(
        next_event(rx).await,
        SessionEvent::Status(LoadStatus::LoadingFinished)
    ));
}

async fn expect_silence(rx: &AsyncReceiver<SessionEvent>) {
    assert!(
        timeout(Duration::from_secs(5), rx.recv()).await.is_err(),
        "expected no further events"
    );
}

fn query(text: &str) -> SessionEvent {
    SessionEvent::QueryInput {
        text: text.to_string(),
        mode: DisplayMode::Detailed,
        direction: "en-sv-lr".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_matches_once_with_last_value() {
    let (tx, rx) = spawn_session(Arc::new(StaticSource));
    expect_loaded(&rx).await;

    // "c", "ca", "cat" delivered 50ms apart, quiet period 500ms
    tx.send(query("c")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(query("ca")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(query("cat")).await.unwrap();

    let SessionEvent::ShowResults(records) = next_event(&rx).await else {
        panic!("expected results");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].segments[0].role, SegmentRole::Headword);
    assert_eq!(records[0].segments[0].text, "cat");

    // A single match ran; earlier values never surfaced
    expect_silence(&rx).await;
}

#[tokio::test(start_paused = true)]
async fn empty_input_clears_instead_of_matching() {
    let (tx, rx) = spawn_session(Arc::new(StaticSource));
    expect_loaded(&rx).await;

    tx.send(query("ca")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(query("")).await.unwrap();

    assert!(matches!(next_event(&rx).await, SessionEvent::ClearResults));
    expect_silence(&rx).await;
}

#[tokio::test(start_paused = true)]
async fn queries_during_load_are_dropped() {
    let (tx, rx) = spawn_session(Arc::new(SlowSource));

    assert!(matches!(next_event(&rx).await, SessionEvent::ClearResults));
    assert!(matches!(
        next_event(&rx).await,
        SessionEvent::Status(LoadStatus::LoadingStarted)
    ));

    // Arrives while the fetch is still in flight
    tx.send(query("cat")).await.unwrap();

    assert!(matches!(
        next_event(&rx).await,
        SessionEvent::Status(LoadStatus::LoadingFinished)
    ));
    // The dropped query is gone for good, not queued
    expect_silence(&rx).await;
}

#[tokio::test(start_paused = true)]
async fn missing_dictionary_reports_not_found_and_matches_nothing() {
    let (tx, rx) = spawn_session(Arc::new(MissingSource));

    assert!(matches!(next_event(&rx).await, SessionEvent::ClearResults));
    assert!(matches!(
        next_event(&rx).await,
        SessionEvent::Status(LoadStatus::LoadingStarted)
    ));
    assert!(matches!(
        next_event(&rx).await,
        SessionEvent::Status(LoadStatus::NotFound)
    ));

    tx.send(query("cat")).await.unwrap();
    expect_silence(&rx).await;
}

#[tokio::test(start_paused = true)]
async fn direction_switch_reloads_and_links_swap() {
    let (tx, rx) = spawn_session(Arc::new(StaticSource));
    expect_loaded(&rx).await;

    tx.send(SessionEvent::SwitchDirection("en-sv-rl".to_string()))
        .await
        .unwrap();
    expect_loaded(&rx).await;

    tx.send(SessionEvent::QueryInput {
        text: "cat".to_string(),
        mode: DisplayMode::Simple,
        direction: "en-sv-rl".to_string(),
    })
    .await
    .unwrap();

    let SessionEvent::ShowResults(records) = next_event(&rx).await else {
        panic!("expected results");
    };
    // Reversed orientation: the headword side links to the sv wiktionary
    assert_eq!(
        records[0].segments[0].link.as_deref(),
        Some("http://sv.wiktionary.org/wiki/cat")
    );
    assert_eq!(
        records[0].segments[1].link.as_deref(),
        Some("http://en.wiktionary.org/wiki/katt")
    );
}
