use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_scheduler_api_structs::get_upcoming_reminders::*;
use agenda_scheduler_api_structs::{EventDTO, ReminderDTO};
use agenda_scheduler_domain::format_reminder_message;
use agenda_scheduler_infra::AgendaContext;

pub async fn get_upcoming_reminders_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, ApiError> {
    let minutes = query_params.minutes.unwrap_or(60);
    let usecase = GetUpcomingRemindersUseCase { minutes };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders, minutes)))
        .map_err(ApiError::from)
}

/// Peek at the events a reminder would fire for within the next `minutes`
/// minutes. Read only, does not mark anything as reminded.
#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {
    pub minutes: i64,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = Vec<ReminderDTO>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingReminders";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let reminders = ctx
            .repos
            .events
            .find_due_soon(self.minutes)
            .await
            .into_iter()
            .map(|e| ReminderDTO {
                message: format_reminder_message(&e, now),
                minutes_until: e.minutes_until_start(now),
                event: EventDTO::new(e),
            })
            .collect();
        Ok(reminders)
    }
}
