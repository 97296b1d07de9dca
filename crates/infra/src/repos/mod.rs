mod event;

use crate::system::ISys;
pub use event::{EventSearchQuery, FileEventRepo, IEventRepo};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
}

impl Repos {
    pub fn create_file_backed(data_file: &Path, sys: Arc<dyn ISys>) -> Self {
        Self {
            events: Arc::new(FileEventRepo::new(data_file, sys)),
        }
    }
}
