//! Integration tests for the spread evaluation cycle
//!
//! Drives the evaluator with in-memory notifier and sink fakes, covering the
//! cooldown behavior, delivery-failure retries, and unconditional telemetry.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use spread_watch::monitor::{
    AlertCooldown, Breach, CycleOutcome, Evaluator, SpreadSample, ThresholdBand,
};
use spread_watch::notify::{Notifier, NotifyError};
use spread_watch::sink::{SinkError, TelemetrySink};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Notifier fake that counts deliveries and can be switched to fail
struct RecordingNotifier {
    sent: AtomicUsize,
    fail: AtomicBool,
    last_text: Mutex<Option<String>>,
}

impl RecordingNotifier {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            last_text: Mutex::new(None),
        })
    }

    fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Api {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

/// Sink fake that counts writes and can be switched to fail
struct RecordingSink {
    written: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            written: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    fn written_count(&self) -> usize {
        self.written.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl TelemetrySink for RecordingSink {
    async fn record(&self, _pair: &str, _sample: &SpreadSample) -> Result<(), SinkError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SinkError::Unreachable("gone".to_string()));
        }
        self.written.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn evaluator(
    notifier: Arc<RecordingNotifier>,
    sink: Arc<RecordingSink>,
    cooldown_secs: u64,
) -> Evaluator {
    Evaluator::new(
        "BTCUSDT".to_string(),
        ThresholdBand::new(dec!(0.05), dec!(0.4)),
        AlertCooldown::new(Duration::from_secs(cooldown_secs)),
        notifier,
        sink,
    )
}

#[tokio::test]
async fn test_in_band_spread_emits_sample_without_alert() {
    let notifier = RecordingNotifier::new();
    let sink = RecordingSink::new();
    let mut eval = evaluator(notifier.clone(), sink.clone(), 60);

    // 50000 -> 50100 is 0.2000%, inside [0.05, 0.4]
    let outcome = eval
        .run_cycle(dec!(50000.00), dec!(50100.00), Instant::now())
        .await;

    match outcome {
        CycleOutcome::InBand(sample) => assert_eq!(sample.diff_pct, dec!(0.2)),
        other => panic!("expected InBand, got {:?}", other),
    }
    assert_eq!(sink.written_count(), 1);
    assert_eq!(notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_below_band_spread_fires_alert() {
    let notifier = RecordingNotifier::new();
    let sink = RecordingSink::new();
    let mut eval = evaluator(notifier.clone(), sink.clone(), 60);

    // 50000 -> 49950 is -0.1000%, below the 0.05 lower bound
    let outcome = eval
        .run_cycle(dec!(50000.00), dec!(49950.00), Instant::now())
        .await;

    assert!(matches!(
        outcome,
        CycleOutcome::AlertSent(_, Breach::BelowLow)
    ));
    assert_eq!(notifier.sent_count(), 1);
    assert_eq!(sink.written_count(), 1);

    let text = notifier.last_text().unwrap();
    assert!(text.contains("-0.1000%"));
    assert!(text.contains("SPREAD BELOW BAND"));
}

#[tokio::test]
async fn test_boundary_spreads_do_not_alert() {
    let notifier = RecordingNotifier::new();
    let sink = RecordingSink::new();
    let mut eval = evaluator(notifier.clone(), sink.clone(), 60);

    // Exactly on the bounds: 0.05% and 0.4%
    let outcome = eval
        .run_cycle(dec!(100000.00), dec!(100050.00), Instant::now())
        .await;
    assert!(matches!(outcome, CycleOutcome::InBand(_)));

    let outcome = eval
        .run_cycle(dec!(100000.00), dec!(100400.00), Instant::now())
        .await;
    assert!(matches!(outcome, CycleOutcome::InBand(_)));

    // A hair beyond each bound alerts
    let outcome = eval
        .run_cycle(dec!(100000.00), dec!(100049.00), Instant::now())
        .await;
    assert!(matches!(
        outcome,
        CycleOutcome::AlertSent(_, Breach::BelowLow)
    ));

    assert_eq!(notifier.sent_count(), 1);
    assert_eq!(sink.written_count(), 3);
}

#[tokio::test]
async fn test_cooldown_suppresses_repeat_alerts() {
    let notifier = RecordingNotifier::new();
    let sink = RecordingSink::new();
    let mut eval = evaluator(notifier.clone(), sink.clone(), 60);

    let t0 = Instant::now();

    // Five violating cycles inside the window deliver exactly once
    for i in 0..5 {
        let now = t0 + Duration::from_secs(i * 5);
        let outcome = eval.run_cycle(dec!(50000.00), dec!(49950.00), now).await;
        if i == 0 {
            assert!(matches!(outcome, CycleOutcome::AlertSent(_, _)));
        } else {
            assert!(matches!(outcome, CycleOutcome::AlertSuppressed(_, _)));
        }
    }
    assert_eq!(notifier.sent_count(), 1);

    // After the window elapses, exactly one more goes out
    let outcome = eval
        .run_cycle(dec!(50000.00), dec!(49950.00), t0 + Duration::from_secs(61))
        .await;
    assert!(matches!(outcome, CycleOutcome::AlertSent(_, _)));
    assert_eq!(notifier.sent_count(), 2);

    // Telemetry was emitted on every cycle regardless
    assert_eq!(sink.written_count(), 6);
}

#[tokio::test]
async fn test_failed_delivery_retries_next_cycle() {
    let notifier = RecordingNotifier::new();
    let sink = RecordingSink::new();
    let mut eval = evaluator(notifier.clone(), sink.clone(), 60);

    let t0 = Instant::now();

    notifier.set_failing(true);
    let outcome = eval.run_cycle(dec!(50000.00), dec!(49950.00), t0).await;
    assert!(matches!(outcome, CycleOutcome::AlertFailed(_, _)));
    assert_eq!(notifier.sent_count(), 0);

    // The failed attempt did not advance the cooldown: the very next
    // violating cycle delivers
    notifier.set_failing(false);
    let outcome = eval
        .run_cycle(dec!(50000.00), dec!(49950.00), t0 + Duration::from_secs(5))
        .await;
    assert!(matches!(outcome, CycleOutcome::AlertSent(_, _)));
    assert_eq!(notifier.sent_count(), 1);
}

#[tokio::test]
async fn test_sink_failure_does_not_abort_cycle() {
    let notifier = RecordingNotifier::new();
    let sink = RecordingSink::new();
    let mut eval = evaluator(notifier.clone(), sink.clone(), 60);

    sink.set_failing(true);
    let outcome = eval
        .run_cycle(dec!(50000.00), dec!(49950.00), Instant::now())
        .await;

    // The write failed but the alert still went out
    assert!(matches!(outcome, CycleOutcome::AlertSent(_, _)));
    assert_eq!(notifier.sent_count(), 1);
    assert_eq!(sink.written_count(), 0);
}
