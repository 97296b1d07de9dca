use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_scheduler_api_structs::get_today_events::*;
use agenda_scheduler_domain::{local_date, Event};
use agenda_scheduler_infra::AgendaContext;
use chrono::NaiveDate;

pub async fn get_today_events_controller(
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetTodayEventsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.events, res.date)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetTodayEventsUseCase {}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub events: Vec<Event>,
    pub date: NaiveDate,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTodayEventsUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTodayEvents";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        Ok(UseCaseResponse {
            events: ctx.repos.events.find_today().await,
            date: local_date(ctx.sys.now()),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::create_event::CreateEventUseCase;
    use crate::test_helpers::setup;
    use chrono::{Duration, Local, SecondsFormat, TimeZone, Utc};

    #[actix_web::test]
    async fn lists_only_events_on_the_current_local_date() {
        let test = setup();
        let today = local_date(test.ctx.sys.now());

        for (title, date) in [("Midday sync", today), ("Next week", today + Duration::days(7))] {
            let start = Local
                .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
                .earliest()
                .unwrap()
                .with_timezone(&Utc);
            execute(
                CreateEventUseCase {
                    title: title.to_string(),
                    description: "".to_string(),
                    start_time: start.to_rfc3339_opts(SecondsFormat::Secs, true),
                    end_time: (start + Duration::minutes(15))
                        .to_rfc3339_opts(SecondsFormat::Secs, true),
                    recurrence: None,
                },
                &test.ctx,
            )
            .await
            .unwrap();
        }

        let res = execute(GetTodayEventsUseCase {}, &test.ctx).await.unwrap();
        assert_eq!(res.date, today);
        assert_eq!(res.events.len(), 1);
        assert_eq!(res.events[0].title, "Midday sync");
    }
}
