#![allow(clippy::expect_used)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use sentinel::application::services::monitor::MonitorService;
use sentinel::domain::entities::alert::{AlertCondition, Dispatch, DispatchOutcome};
use sentinel::domain::entities::process::ProcessInfo;
use sentinel::domain::entities::sample::Sample;
use sentinel::domain::ports::notifier::{Notifier, NotifyError};
use sentinel::domain::ports::sampler::Sampler;
use sentinel::domain::rules::AlertState;
use sentinel::domain::value_objects::thresholds::Thresholds;

// ---------------------------------------------------------------------------
// Fixture loader
// ---------------------------------------------------------------------------

fn load_fixture(name: &str) -> Vec<Sample> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

// ---------------------------------------------------------------------------
// ScriptedSampler
// ---------------------------------------------------------------------------

struct ScriptedSampler {
    remaining: Mutex<std::vec::IntoIter<Sample>>,
}

impl ScriptedSampler {
    fn new(samples: Vec<Sample>) -> Self {
        Self {
            remaining: Mutex::new(samples.into_iter()),
        }
    }
}

#[async_trait]
impl Sampler for ScriptedSampler {
    async fn sample(&self) -> Sample {
        self.remaining
            .lock()
            .expect("lock")
            .next()
            .expect("fixture has enough samples")
    }

    fn list_processes(&self) -> Vec<ProcessInfo> {
        vec![
            ProcessInfo {
                pid: 42,
                name: "stress-ng".into(),
                cpu_percent: 180.0,
                memory_percent: 2.0,
            },
            ProcessInfo {
                pid: 1,
                name: "systemd".into(),
                cpu_percent: 0.1,
                memory_percent: 0.2,
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// TrackingNotifier
// ---------------------------------------------------------------------------

struct TrackingNotifier {
    sent: Mutex<Vec<AlertCondition>>,
    reply: Result<(), NotifyError>,
}

impl TrackingNotifier {
    const fn new(reply: Result<(), NotifyError>) -> Self {
        Self {
            sent: Mutex::new(vec![]),
            reply,
        }
    }

    fn collected(&self) -> Vec<AlertCondition> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Notifier for TrackingNotifier {
    async fn send(&self, condition: &AlertCondition) -> Result<(), NotifyError> {
        self.sent.lock().expect("lock").push(condition.clone());
        self.reply.clone()
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_766_000_000 + secs, 0)
        .single()
        .expect("valid timestamp")
}

fn cpu_sample(secs: i64, cpu: f64) -> Sample {
    Sample::new(at(secs), cpu, 20.0, 1 << 30, 50.0, 1 << 34)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn spike_fixture_sends_twice_over_six_cycles() {
    let sampler = ScriptedSampler::new(load_fixture("cpu_spike.json"));
    let notifier = TrackingNotifier::new(Ok(()));
    let mut monitor = MonitorService::new(&sampler, &notifier, Thresholds::default());

    let mut dispatches = Vec::new();
    for _ in 0..6 {
        dispatches.push(monitor.run_once().await.dispatch);
    }

    let sent = Dispatch::Attempted(DispatchOutcome::Sent);
    assert_eq!(
        dispatches,
        vec![
            sent.clone(),
            Dispatch::Suppressed,
            Dispatch::Suppressed,
            // exactly 300 s after the first alert: still inside the window
            Dispatch::Suppressed,
            sent,
            Dispatch::NoCondition,
        ]
    );

    let collected = notifier.collected();
    assert_eq!(collected.len(), 2);
    assert!(collected[0].lines[0].contains("CPU en surchauffe : 92.5%"));
    assert!(collected[1].lines[0].contains("CPU en surchauffe : 90.0%"));
    assert_eq!(monitor.history().len(), 6);
    assert_eq!(monitor.alert_log().len(), 2);
    assert_eq!(monitor.processes().len(), 2);
}

#[tokio::test]
async fn debounce_scenario_at_0_10_and_301_seconds() {
    let sampler = ScriptedSampler::new(vec![
        cpu_sample(0, 95.0),
        cpu_sample(10, 95.0),
        cpu_sample(301, 95.0),
    ]);
    let notifier = TrackingNotifier::new(Ok(()));
    let mut monitor = MonitorService::new(&sampler, &notifier, Thresholds::default())
        .with_alert_state(AlertState::sent_at(at(-301)));

    monitor.run_once().await;
    assert_eq!(notifier.collected().len(), 1);
    assert_eq!(monitor.alert_state().last_alert_time(), Some(at(0)));
    monitor.run_once().await;
    assert_eq!(notifier.collected().len(), 1);
    assert_eq!(monitor.alert_state().last_alert_time(), Some(at(0)));
    monitor.run_once().await;
    assert_eq!(notifier.collected().len(), 2);
    assert_eq!(monitor.alert_state().last_alert_time(), Some(at(301)));
}

#[tokio::test]
async fn delivery_failure_is_recorded_and_debounced() {
    let sampler = ScriptedSampler::new(vec![cpu_sample(0, 99.0), cpu_sample(60, 99.0)]);
    let notifier = TrackingNotifier::new(Err(NotifyError::DeliveryFailed("HTTP 500".into())));
    let mut monitor = MonitorService::new(&sampler, &notifier, Thresholds::default());

    let first = monitor.run_once().await;
    assert_eq!(
        first.dispatch,
        Dispatch::Attempted(DispatchOutcome::Failed("HTTP 500".into()))
    );
    let second = monitor.run_once().await;
    assert_eq!(second.dispatch, Dispatch::Suppressed);

    assert_eq!(notifier.collected().len(), 1);
    let record = monitor.alert_log().last().expect("failed attempt logged");
    assert_eq!(record.outcome, DispatchOutcome::Failed("HTTP 500".into()));
}

#[tokio::test]
async fn missing_credentials_still_consume_the_window() {
    let sampler = ScriptedSampler::new(vec![cpu_sample(0, 99.0), cpu_sample(100, 99.0)]);
    let notifier = TrackingNotifier::new(Err(NotifyError::NotConfigured));
    let mut monitor = MonitorService::new(&sampler, &notifier, Thresholds::default());

    let first = monitor.run_once().await;
    assert_eq!(
        first.dispatch,
        Dispatch::Attempted(DispatchOutcome::NotConfigured)
    );
    assert_eq!(monitor.run_once().await.dispatch, Dispatch::Suppressed);
}

#[tokio::test]
async fn history_keeps_last_sixty_of_sixty_five() {
    let samples = (0..65).map(|i| cpu_sample(i, f64::from(u32::try_from(i).expect("small"))));
    let sampler = ScriptedSampler::new(samples.collect());
    let notifier = TrackingNotifier::new(Ok(()));
    let mut monitor = MonitorService::new(&sampler, &notifier, Thresholds::new(100.0, 100.0));

    for _ in 0..65 {
        monitor.run_once().await;
    }

    let history = monitor.history().to_vec();
    assert_eq!(history.len(), 60);
    assert!((history[0] - 5.0).abs() < f64::EPSILON);
    assert!((history[59] - 64.0).abs() < f64::EPSILON);
    assert!(notifier.collected().is_empty());
}

#[tokio::test]
async fn limit_equal_to_value_does_not_alert() {
    let sampler = ScriptedSampler::new(vec![cpu_sample(0, 80.0)]);
    let notifier = TrackingNotifier::new(Ok(()));
    let mut monitor = MonitorService::new(&sampler, &notifier, Thresholds::default());

    let report = monitor.run_once().await;
    assert!(report.condition.is_none());
    assert_eq!(report.dispatch, Dispatch::NoCondition);
}

#[tokio::test]
async fn resumed_state_honours_short_window() {
    let sampler = ScriptedSampler::new(vec![cpu_sample(30, 99.0), cpu_sample(61, 99.0)]);
    let notifier = TrackingNotifier::new(Ok(()));
    let mut monitor = MonitorService::new(&sampler, &notifier, Thresholds::default())
        .with_quiet_window(Duration::seconds(60))
        .with_alert_state(AlertState::sent_at(at(0)));

    assert_eq!(monitor.run_once().await.dispatch, Dispatch::Suppressed);
    assert!(matches!(
        monitor.run_once().await.dispatch,
        Dispatch::Attempted(_)
    ));
}
