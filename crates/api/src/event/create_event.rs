use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_scheduler_api_structs::create_event::*;
use agenda_scheduler_domain::{Event, Recurrence, ValidationError};
use agenda_scheduler_infra::AgendaContext;

pub async fn create_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = CreateEventUseCase {
        title: body.title,
        description: body.description,
        start_time: body.start_time,
        end_time: body.end_time,
        recurrence: body.recurrence,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Created().json(APIResponse::new(event)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    Invalid(ValidationError),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Invalid(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let event = Event::new(
            &self.title,
            &self.description,
            &self.start_time,
            &self.end_time,
            None,
            self.recurrence,
            ctx.sys.now(),
        )
        .map_err(UseCaseError::Invalid)?;

        ctx.repos
            .events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_helpers::setup;

    fn usecase(start: &str, end: &str) -> CreateEventUseCase {
        CreateEventUseCase {
            title: "Standup".to_string(),
            description: "Daily sync".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            recurrence: None,
        }
    }

    #[actix_web::test]
    async fn creates_and_persists_a_valid_event() {
        let test = setup();

        let created = execute(
            usecase("2026-03-02T09:00:00Z", "2026-03-02T09:15:00Z"),
            &test.ctx,
        )
        .await
        .unwrap();

        let stored = test.ctx.repos.events.find(&created.id).await;
        assert_eq!(stored, Some(created));
    }

    #[actix_web::test]
    async fn rejects_an_inverted_time_range_without_storing_anything() {
        let test = setup();

        let res = execute(
            usecase("2026-03-02T10:00:00Z", "2026-03-02T09:00:00Z"),
            &test.ctx,
        )
        .await;

        assert_eq!(
            res.unwrap_err(),
            UseCaseError::Invalid(ValidationError::InvalidTimeRange)
        );
        assert!(test.ctx.repos.events.find_all().await.is_empty());
    }

    #[actix_web::test]
    async fn rejects_unparsable_timestamps() {
        let test = setup();

        let res = execute(usecase("soon", "2026-03-02T09:00:00Z"), &test.ctx).await;
        assert!(matches!(
            res.unwrap_err(),
            UseCaseError::Invalid(ValidationError::InvalidTimestamp(_))
        ));
    }
}
