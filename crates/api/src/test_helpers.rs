use agenda_scheduler_domain::{Event, ID};
use agenda_scheduler_infra::{AgendaContext, Config, INotifier, ISys};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub struct FakeSys {
    pub now: DateTime<Utc>,
}

impl ISys for FakeSys {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Notifier that records every delivered reminder, for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub delivered: Mutex<Vec<(ID, String)>>,
}

impl INotifier for RecordingNotifier {
    fn notify(&self, event: &Event, message: &str) {
        self.delivered
            .lock()
            .unwrap()
            .push((event.id.clone(), message.to_string()));
    }
}

pub struct TestContext {
    pub ctx: AgendaContext,
    pub notifier: Arc<RecordingNotifier>,
    // Keeps the backing data directory alive for the duration of the test.
    _data_dir: TempDir,
}

pub fn setup() -> TestContext {
    setup_at(Utc::now())
}

pub fn setup_at(now: DateTime<Utc>) -> TestContext {
    let data_dir = tempfile::tempdir().unwrap();
    let config = Config {
        port: 0,
        data_file: data_dir.path().join("events.json"),
        reminder_check_interval_secs: 60,
        reminder_window_minutes: 60,
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = AgendaContext::create_with(config, Arc::new(FakeSys { now }), notifier.clone());
    TestContext {
        ctx,
        notifier,
        _data_dir: data_dir,
    }
}
