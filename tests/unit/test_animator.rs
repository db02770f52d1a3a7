//! Animator behavior under simulated time
//!
//! Every test runs on a paused tokio clock, so sleeps advance time
//! deterministically. With default timing a phrase "Hi" writes
//! "H"@0, "Hi"@80, "H"@980, ""@1030.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use typist::config::TypingConfig;
use typist::sink::{from_fn, RecordingSink};
use typist::{ConfigError, Mode, Snapshot, SinkError, Typewriter, TypingAnimator};

fn animator(phrases: &[&str]) -> (TypingAnimator<RecordingSink>, RecordingSink) {
    let sink = RecordingSink::new();
    let config = TypingConfig::with_phrases(phrases.iter().copied());
    (TypingAnimator::new(config, sink.clone()).unwrap(), sink)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[test]
fn test_empty_phrases_is_config_error() {
    let result = TypingAnimator::new(
        TypingConfig::with_phrases(Vec::<String>::new()),
        RecordingSink::new(),
    );
    assert!(matches!(result, Err(ConfigError::NoPhrases)));
}

#[test]
fn test_empty_phrase_is_config_error() {
    let result = TypingAnimator::new(
        TypingConfig::with_phrases(["fine", ""]),
        RecordingSink::new(),
    );
    assert!(matches!(result, Err(ConfigError::EmptyPhrase { index: 1 })));
}

#[tokio::test(start_paused = true)]
async fn test_hi_sequence_then_advances() {
    let (mut animator, sink) = animator(&["Hi", "Yo"]);
    animator.start().unwrap();
    advance(1050).await;
    assert_eq!(sink.frames(), vec!["H", "Hi", "H", ""]);
    assert_eq!(
        animator.snapshot(),
        Snapshot {
            phrase_index: 1,
            char_count: 0,
            mode: Mode::Typing
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_matches_typewriter_schedule() {
    let phrases = ["Data", "AI"];
    let (mut animator, sink) = animator(&phrases);
    let mut reference = Typewriter::new(&TypingConfig::with_phrases(phrases)).unwrap();
    let expected: Vec<String> = reference.frames(2).unwrap().into_iter().map(|f| f.text).collect();

    animator.start().unwrap();
    // Two cycles: (3*80 + 900 + 4*50) + (80 + 900 + 2*50) = 1340 + 1080, twice
    advance(2 * (1340 + 1080) - 10).await;
    assert_eq!(sink.frames(), expected);
}

#[tokio::test(start_paused = true)]
async fn test_start_twice_same_as_once() {
    let (mut once, once_sink) = animator(&["Hello"]);
    let (mut twice, twice_sink) = animator(&["Hello"]);
    once.start().unwrap();
    twice.start().unwrap();
    twice.start().unwrap();
    advance(3_000).await;
    assert_eq!(once_sink.frames(), twice_sink.frames());
}

#[tokio::test(start_paused = true)]
async fn test_no_writes_after_stop() {
    let (mut animator, sink) = animator(&["Hello", "World"]);
    animator.start().unwrap();
    advance(500).await;
    animator.stop();
    let written = sink.len();
    advance(600_000).await;
    assert_eq!(sink.len(), written);
}

#[tokio::test(start_paused = true)]
async fn test_stop_start_resumes_exact_state() {
    let (mut animator, sink) = animator(&["Ab", "Cd"]);
    animator.start().unwrap();
    advance(1050).await; // first phrase done, index 1
    animator.stop();
    let paused = animator.snapshot();
    assert_eq!(paused.phrase_index, 1);

    advance(5_000).await;
    assert_eq!(animator.snapshot(), paused);

    animator.start().unwrap();
    advance(1).await;
    assert_eq!(sink.last().as_deref(), Some("C"));
}

#[tokio::test(start_paused = true)]
async fn test_single_phrase_forever() {
    let (mut animator, sink) = animator(&["A"]);
    animator.start().unwrap();
    advance(10 * 950 - 10).await;
    let frames = sink.frames();
    assert_eq!(frames.len(), 20);
    for pair in frames.chunks(2) {
        assert_eq!(pair, ["A", ""]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_sink_failures_are_not_fatal() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let recorder = RecordingSink::new();
    let mut inner = recorder.clone();
    let sink = from_fn(move |text: &str| {
        // Every other write fails
        if counter.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            return Err(SinkError::Rejected("target missing".to_string()));
        }
        typist::sink::Sink::display(&mut inner, text)
    });

    let mut animator = TypingAnimator::new(TypingConfig::with_phrases(["Hi"]), sink).unwrap();
    animator.start().unwrap();
    advance(1050).await;
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(recorder.frames(), vec!["Hi", ""]);
    assert!(animator.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_speed_multiplier_shortens_delays() {
    let sink = RecordingSink::new();
    let config = TypingConfig {
        speed: 2.0,
        ..TypingConfig::with_phrases(["Hi"])
    };
    let mut animator = TypingAnimator::new(config, sink.clone()).unwrap();
    animator.start().unwrap();
    // "H"@0, "Hi"@40, "H"@490, ""@515
    advance(520).await;
    assert_eq!(sink.frames(), vec!["H", "Hi", "H", ""]);
}
