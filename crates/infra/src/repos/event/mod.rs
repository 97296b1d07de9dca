mod file;

use agenda_scheduler_domain::{Event, RecurrenceFilter, ID};
use chrono::{DateTime, Utc};
pub use file::FileEventRepo;

/// AND-composed search criteria; every present field narrows the result set.
#[derive(Debug, Default, Clone)]
pub struct EventSearchQuery {
    /// Case-insensitive substring matched against title or description
    pub text: Option<String>,
    /// Inclusive lower bound on `start_time`
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `end_time`
    pub end_date: Option<DateTime<Utc>>,
    pub recurrence: Option<RecurrenceFilter>,
}

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    async fn save(&self, e: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;
    async fn find_all(&self) -> Vec<Event>;
    async fn search(&self, query: &EventSearchQuery) -> Vec<Event>;
    async fn find_due_soon(&self, window_minutes: i64) -> Vec<Event>;
    async fn find_today(&self) -> Vec<Event>;
    async fn find_this_week(&self) -> Vec<Event>;
}
