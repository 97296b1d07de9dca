use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_scheduler_api_structs::get_week_events::*;
use agenda_scheduler_domain::{week_bounds, Event};
use agenda_scheduler_infra::AgendaContext;
use chrono::NaiveDate;

pub async fn get_week_events_controller(
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetWeekEventsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.events, res.week_start)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetWeekEventsUseCase {}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub events: Vec<Event>,
    pub week_start: NaiveDate,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetWeekEventsUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetWeekEvents";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let (week_start, _) = week_bounds(ctx.sys.now());
        Ok(UseCaseResponse {
            events: ctx.repos.events.find_this_week().await,
            week_start: week_start.date(),
        })
    }
}
