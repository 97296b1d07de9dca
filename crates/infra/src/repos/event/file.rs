use super::{EventSearchQuery, IEventRepo};
use crate::system::ISys;
use agenda_scheduler_domain::{as_local_naive, local_date, week_bounds, Event, ID};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Event store backed by a single JSON file holding the full event list.
///
/// The in-memory list is the authority; the file is fully rewritten after
/// every mutation. One lock guards both the list and the read-then-write
/// persistence cycle so the request surface and the reminder loop never
/// observe a torn state.
pub struct FileEventRepo {
    data_file: PathBuf,
    events: Mutex<Vec<Event>>,
    sys: Arc<dyn ISys>,
}

impl FileEventRepo {
    pub fn new(data_file: &Path, sys: Arc<dyn ISys>) -> Self {
        Self {
            events: Mutex::new(Self::load(data_file)),
            data_file: data_file.to_path_buf(),
            sys,
        }
    }

    // A missing file is a fresh store. A file that no longer parses also
    // degrades to an empty store, which discards whatever was there; that
    // data-loss risk is inherited from the storage format.
    fn load(data_file: &Path) -> Vec<Event> {
        let content = match fs::read_to_string(data_file) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(events) => events,
            Err(e) => {
                warn!(
                    "Discarding malformed event file {}: {}. Starting from an empty store.",
                    data_file.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn persist(&self, events: &[Event]) -> anyhow::Result<()> {
        if let Some(dir) = self.data_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(events)?;
        fs::write(&self.data_file, json)?;
        Ok(())
    }

    fn sorted_by_start(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by_key(|e| e.start_time);
        events
    }
}

#[async_trait::async_trait]
impl IEventRepo for FileEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        let mut events = self.events.lock().unwrap();
        events.push(e.clone());
        if let Err(err) = self.persist(&events) {
            // Keep memory and file in sync when the write fails.
            events.pop();
            return Err(err);
        }
        Ok(())
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        let mut events = self.events.lock().unwrap();
        let Some(pos) = events.iter().position(|existing| existing.id == e.id) else {
            anyhow::bail!("No event with id {} to save", e.id);
        };
        let previous = std::mem::replace(&mut events[pos], e.clone());
        if let Err(err) = self.persist(&events) {
            events[pos] = previous;
            return Err(err);
        }
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| &e.id == event_id)
            .cloned()
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let mut events = self.events.lock().unwrap();
        let Some(pos) = events.iter().position(|e| &e.id == event_id) else {
            return Ok(None);
        };
        let removed = events.remove(pos);
        if let Err(err) = self.persist(&events) {
            events.insert(pos, removed);
            return Err(err);
        }
        Ok(Some(removed))
    }

    async fn find_all(&self) -> Vec<Event> {
        Self::sorted_by_start(self.events.lock().unwrap().clone())
    }

    async fn search(&self, query: &EventSearchQuery) -> Vec<Event> {
        let text = query.text.as_ref().map(|t| t.to_lowercase());
        let matches = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                if let Some(text) = &text {
                    if !e.title.to_lowercase().contains(text)
                        && !e.description.to_lowercase().contains(text)
                    {
                        return false;
                    }
                }
                if let Some(start_date) = query.start_date {
                    if e.start_time < start_date {
                        return false;
                    }
                }
                if let Some(end_date) = query.end_date {
                    if e.end_time > end_date {
                        return false;
                    }
                }
                if let Some(filter) = query.recurrence {
                    if !filter.matches(e.recurrence) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        Self::sorted_by_start(matches)
    }

    async fn find_due_soon(&self, window_minutes: i64) -> Vec<Event> {
        let now = self.sys.now();
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_due_soon(window_minutes, now))
            .cloned()
            .collect()
    }

    async fn find_today(&self) -> Vec<Event> {
        let today = local_date(self.sys.now());
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| as_local_naive(e.start_time).date() == today)
            .cloned()
            .collect()
    }

    async fn find_this_week(&self) -> Vec<Event> {
        let (week_start, week_end) = week_bounds(self.sys.now());
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                let local_start = as_local_naive(e.start_time);
                week_start <= local_start && local_start <= week_end
            })
            .cloned()
            .collect()
    }
}
