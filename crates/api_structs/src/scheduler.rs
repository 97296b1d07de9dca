use serde::{Deserialize, Serialize};

pub mod get_scheduler_status {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SchedulerStatusDTO {
        pub running: bool,
        /// Seconds between reminder loop iterations.
        pub check_interval: u64,
        /// Number of event ids currently tracked as already notified.
        pub tracked_events: usize,
    }

    #[derive(Serialize, Deserialize)]
    pub struct APIResponse {
        pub success: bool,
        pub data: SchedulerStatusDTO,
    }

    impl APIResponse {
        pub fn new(data: SchedulerStatusDTO) -> Self {
            Self {
                success: true,
                data,
            }
        }
    }
}
