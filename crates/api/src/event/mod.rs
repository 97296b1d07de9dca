use actix_web::web;

pub mod create_event;
pub mod delete_event;
pub mod get_event;
pub mod get_events;
pub mod get_today_events;
pub mod get_upcoming_reminders;
pub mod get_week_events;
pub mod update_event;

use create_event::create_event_controller;
use delete_event::delete_event_controller;
use get_event::get_event_controller;
use get_events::get_events_controller;
use get_today_events::get_today_events_controller;
use get_upcoming_reminders::get_upcoming_reminders_controller;
use get_week_events::get_week_events_controller;
use update_event::update_event_controller;

// The literal /events/today and /events/week segments are registered before
// the {event_id} matcher so they are never captured as ids.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::get().to(get_events_controller));
    cfg.route("/events", web::post().to(create_event_controller));

    cfg.route("/events/today", web::get().to(get_today_events_controller));
    cfg.route("/events/week", web::get().to(get_week_events_controller));

    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route(
        "/events/{event_id}",
        web::delete().to(delete_event_controller),
    );

    cfg.route(
        "/reminders",
        web::get().to(get_upcoming_reminders_controller),
    );
}
