mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{EventSearchQuery, FileEventRepo, IEventRepo, Repos};
pub use services::{INotifier, LogNotifier};
use std::sync::Arc;
pub use system::{ISys, RealSys};

#[derive(Clone)]
pub struct AgendaContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

impl AgendaContext {
    pub fn create(config: Config) -> Self {
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        Self::create_with(config, sys, Arc::new(LogNotifier {}))
    }

    /// Context with injected clock and notifier, used by tests to control
    /// time and observe notifications.
    pub fn create_with(config: Config, sys: Arc<dyn ISys>, notifier: Arc<dyn INotifier>) -> Self {
        let repos = Repos::create_file_backed(&config.data_file, sys.clone());
        Self {
            repos,
            config,
            sys,
            notifier,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> AgendaContext {
    AgendaContext::create(Config::new())
}
