use agenda_scheduler_domain::{format_reminder_message, ID};
use agenda_scheduler_infra::AgendaContext;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Background loop that periodically looks for events starting inside the
/// reminder window and hands each one to the notifier exactly once. Delivered
/// event ids stay tracked until the event starts or disappears, so an event
/// that remains inside the window across ticks is not re-announced.
pub struct ReminderScheduler {
    ctx: AgendaContext,
    check_interval: Duration,
    window_minutes: i64,
    tracked: Arc<Mutex<HashSet<ID>>>,
    worker: Mutex<Option<Worker>>,
}

struct Worker {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerStatus {
    pub running: bool,
    pub check_interval: Duration,
    pub tracked_events: usize,
}

impl ReminderScheduler {
    pub fn new(ctx: AgendaContext) -> Self {
        let check_interval = Duration::from_secs(ctx.config.reminder_check_interval_secs);
        let window_minutes = ctx.config.reminder_window_minutes;
        Self {
            ctx,
            check_interval,
            window_minutes,
            tracked: Arc::new(Mutex::new(HashSet::new())),
            worker: Mutex::new(None),
        }
    }

    /// Spawns the check loop. Calling this while the loop is already running
    /// is a no-op.
    pub fn start(&self) {
        let mut worker = self.worker.lock().unwrap();
        if worker.is_some() {
            return;
        }

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let ctx = self.ctx.clone();
        let tracked = self.tracked.clone();
        let window_minutes = self.window_minutes;
        let check_interval = self.check_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(check_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        check_reminders(&ctx, &tracked, window_minutes).await;
                    }
                    _ = shutdown_rx.changed() => {
                        info!("Reminder scheduler shutting down");
                        return;
                    }
                }
            }
        });

        info!(
            "Reminder scheduler started with a {}s check interval and a {}min window",
            check_interval.as_secs(),
            window_minutes
        );
        *worker = Some(Worker { shutdown, handle });
    }

    /// Stops the check loop and waits for the in-flight tick, if any, to
    /// finish.
    pub async fn stop(&self) {
        let worker = self.worker.lock().unwrap().take();
        if let Some(worker) = worker {
            if worker.shutdown.send(true).is_err() {
                error!("Reminder scheduler worker was already gone");
            }
            if let Err(e) = worker.handle.await {
                error!("Reminder scheduler worker panicked: {:?}", e);
            }
        }
    }

    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            running: self.worker.lock().unwrap().is_some(),
            check_interval: self.check_interval,
            tracked_events: self.tracked.lock().unwrap().len(),
        }
    }
}

/// One tick of the reminder loop: announce untracked events inside the
/// window, then drop tracked ids whose event started or no longer exists.
async fn check_reminders(
    ctx: &AgendaContext,
    tracked: &Arc<Mutex<HashSet<ID>>>,
    window_minutes: i64,
) {
    let now = ctx.sys.now();

    let due = ctx.repos.events.find_due_soon(window_minutes).await;
    for event in due {
        if tracked.lock().unwrap().contains(&event.id) {
            continue;
        }
        let message = format_reminder_message(&event, now);
        ctx.notifier.notify(&event, &message);
        tracked.lock().unwrap().insert(event.id.clone());
    }

    let tracked_ids: Vec<ID> = tracked.lock().unwrap().iter().cloned().collect();
    for event_id in tracked_ids {
        let stale = match ctx.repos.events.find(&event_id).await {
            Some(event) => event.start_time < now,
            None => true,
        };
        if stale {
            tracked.lock().unwrap().remove(&event_id);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::create_event::CreateEventUseCase;
    use crate::shared::usecase::execute;
    use crate::test_helpers::{setup, setup_at, FakeSys, TestContext};
    use agenda_scheduler_domain::Event;
    use chrono::{Duration as ChronoDuration, SecondsFormat, Timelike, Utc};

    async fn create_in(test: &TestContext, title: &str, minutes_from_now: i64) -> Event {
        let start = test.ctx.sys.now() + ChronoDuration::minutes(minutes_from_now);
        execute(
            CreateEventUseCase {
                title: title.to_string(),
                description: "".to_string(),
                start_time: start.to_rfc3339_opts(SecondsFormat::Secs, true),
                end_time: (start + ChronoDuration::minutes(15))
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                recurrence: None,
            },
            &test.ctx,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn announces_a_due_event_exactly_once() {
        // Whole-second clock so the second-precision wire times line up.
        let test = setup_at(Utc::now().with_nanosecond(0).unwrap());
        let scheduler = ReminderScheduler::new(test.ctx.clone());
        let event = create_in(&test, "Standup", 30).await;
        create_in(&test, "Far away", 300).await;

        check_reminders(&scheduler.ctx, &scheduler.tracked, 60).await;
        check_reminders(&scheduler.ctx, &scheduler.tracked, 60).await;

        let delivered = test.notifier.delivered.lock().unwrap().clone();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, event.id);
        assert!(delivered[0]
            .1
            .starts_with("REMINDER: 'Standup' starts in 30 minutes"));
        assert_eq!(scheduler.status().tracked_events, 1);
    }

    fn at(test: &TestContext, now: chrono::DateTime<Utc>) -> AgendaContext {
        // Same store, different clock.
        AgendaContext {
            sys: Arc::new(FakeSys { now }),
            ..test.ctx.clone()
        }
    }

    #[tokio::test]
    async fn tracked_ids_are_dropped_once_the_event_starts_or_is_deleted() {
        let now = Utc::now().with_nanosecond(0).unwrap();
        let test = setup_at(now);
        let scheduler = ReminderScheduler::new(test.ctx.clone());
        create_in(&test, "Starting", 5).await;
        let deleted = create_in(&test, "Deleted", 10).await;

        check_reminders(&scheduler.ctx, &scheduler.tracked, 60).await;
        assert_eq!(scheduler.status().tracked_events, 2);

        test.ctx.repos.events.delete(&deleted.id).await.unwrap();
        // At the exact start instant the id is still tracked; only a start
        // strictly in the past is purged.
        let at_start = at(&test, now + ChronoDuration::minutes(5));
        check_reminders(&at_start, &scheduler.tracked, 60).await;
        assert_eq!(scheduler.status().tracked_events, 1);

        let past_start = at(&test, now + ChronoDuration::minutes(6));
        check_reminders(&past_start, &scheduler.tracked, 60).await;
        assert_eq!(scheduler.status().tracked_events, 0);
    }

    #[tokio::test]
    async fn start_is_idempotent_and_stop_is_deterministic() {
        let test = setup();
        let scheduler = ReminderScheduler::new(test.ctx.clone());
        assert!(!scheduler.status().running);

        scheduler.start();
        scheduler.start();
        assert!(scheduler.status().running);

        scheduler.stop().await;
        assert!(!scheduler.status().running);
        scheduler.stop().await;
    }
}
