use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_scheduler_api_structs::update_event::*;
use agenda_scheduler_domain::{parse_datetime, Event, Recurrence, ValidationError, ID};
use agenda_scheduler_infra::AgendaContext;

pub async fn update_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id.clone(),
        title: body.title,
        description: body.description,
        start_time: body.start_time,
        end_time: body.end_time,
        recurrence: body.recurrence,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(ApiError::from)
}

/// Explicit optional-field update: absent fields are left untouched, and the
/// whole update is rejected when the resulting times are invalid.
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub recurrence: Option<Option<Recurrence>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Invalid(ValidationError),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => {
                Self::NotFound(format!("The event with id: {}, was not found.", event_id))
            }
            UseCaseError::Invalid(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let mut e = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.event_id.clone()))?;

        if let Some(title) = &self.title {
            e.title = title.clone();
        }
        if let Some(description) = &self.description {
            e.description = description.clone();
        }
        if let Some(start_time) = &self.start_time {
            e.start_time = parse_datetime(start_time).map_err(UseCaseError::Invalid)?;
        }
        if let Some(end_time) = &self.end_time {
            e.end_time = parse_datetime(end_time).map_err(UseCaseError::Invalid)?;
        }
        if let Some(recurrence) = self.recurrence {
            e.recurrence = recurrence;
        }

        // The stored event is only replaced after the whole update validates.
        e.validate_times().map_err(UseCaseError::Invalid)?;

        ctx.repos
            .events
            .save(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(e)
    }
}
