use crate::job_schedulers::ReminderScheduler;
use actix_web::{web, HttpResponse};
use agenda_scheduler_api_structs::get_scheduler_status::*;
use std::sync::Arc;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/scheduler/status",
        web::get().to(get_scheduler_status_controller),
    );
}

async fn get_scheduler_status_controller(
    scheduler: web::Data<Arc<ReminderScheduler>>,
) -> HttpResponse {
    let status = scheduler.status();
    HttpResponse::Ok().json(APIResponse::new(SchedulerStatusDTO {
        running: status.running,
        check_interval: status.check_interval.as_secs(),
        tracked_events: status.tracked_events,
    }))
}
