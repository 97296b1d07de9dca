use crate::error::ApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_scheduler_api_structs::get_events::*;
use agenda_scheduler_domain::{parse_datetime, Event, RecurrenceFilter};
use agenda_scheduler_infra::{AgendaContext, EventSearchQuery};

pub async fn get_events_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, ApiError> {
    let query_params = query_params.0;
    let usecase = GetEventsUseCase {
        query: to_events_query(&query_params),
    };

    execute(usecase, &ctx)
        .await
        .map(|events| {
            HttpResponse::Ok().json(APIResponse::new(events, FiltersApplied::from(query_params)))
        })
        .map_err(ApiError::from)
}

/// What the listing runs against. A recurrence value outside the known tags
/// is an exact-match filter that no event satisfies, while unparsable date
/// filters are merely dropped.
#[derive(Debug)]
pub enum EventsQuery {
    All,
    Search(EventSearchQuery),
    Unmatchable,
}

fn to_events_query(params: &QueryParams) -> EventsQuery {
    if !params.has_filters() {
        return EventsQuery::All;
    }
    let recurrence = match params.recurrence.as_deref() {
        Some(raw) => match raw.parse::<RecurrenceFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => return EventsQuery::Unmatchable,
        },
        None => None,
    };
    EventsQuery::Search(EventSearchQuery {
        text: params.search.clone(),
        start_date: params
            .start_date
            .as_deref()
            .and_then(|d| parse_datetime(d).ok()),
        end_date: params
            .end_date
            .as_deref()
            .and_then(|d| parse_datetime(d).ok()),
        recurrence,
    })
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub query: EventsQuery,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<Event>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let events = match &self.query {
            EventsQuery::All => ctx.repos.events.find_all().await,
            EventsQuery::Search(query) => ctx.repos.events.search(query).await,
            EventsQuery::Unmatchable => Vec::new(),
        };
        Ok(events)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::create_event::CreateEventUseCase;
    use crate::test_helpers::setup;
    use agenda_scheduler_domain::Recurrence;

    async fn create(ctx: &AgendaContext, title: &str, recurrence: Option<Recurrence>) -> Event {
        execute(
            CreateEventUseCase {
                title: title.to_string(),
                description: "".to_string(),
                start_time: "2026-03-02T09:00:00Z".to_string(),
                end_time: "2026-03-02T09:15:00Z".to_string(),
                recurrence,
            },
            ctx,
        )
        .await
        .unwrap()
    }

    #[actix_web::test]
    async fn without_filters_it_lists_every_event() {
        let test = setup();
        create(&test.ctx, "Standup", None).await;
        create(&test.ctx, "Retro", None).await;

        let events = execute(
            GetEventsUseCase {
                query: EventsQuery::All,
            },
            &test.ctx,
        )
        .await
        .unwrap();
        assert_eq!(events.len(), 2);
    }

    #[actix_web::test]
    async fn filters_compose_over_text_and_recurrence() {
        let test = setup();
        create(&test.ctx, "Standup", Some(Recurrence::Daily)).await;
        create(&test.ctx, "Standup prep", None).await;
        create(&test.ctx, "Retro", Some(Recurrence::Daily)).await;

        let events = execute(
            GetEventsUseCase {
                query: EventsQuery::Search(EventSearchQuery {
                    text: Some("standup".to_string()),
                    recurrence: Some(RecurrenceFilter::Tag(Recurrence::Daily)),
                    ..Default::default()
                }),
            },
            &test.ctx,
        )
        .await
        .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
    }

    #[actix_web::test]
    async fn an_unparsable_date_filter_is_ignored() {
        let query = to_events_query(&QueryParams {
            search: Some("standup".to_string()),
            start_date: Some("not-a-date".to_string()),
            end_date: None,
            recurrence: None,
        });

        let EventsQuery::Search(query) = query else {
            panic!("expected a search query, got {:?}", query);
        };
        assert_eq!(query.text.as_deref(), Some("standup"));
        assert_eq!(query.start_date, None);
    }

    #[actix_web::test]
    async fn an_unknown_recurrence_value_matches_no_event() {
        let test = setup();
        create(&test.ctx, "Standup", Some(Recurrence::Daily)).await;

        let query = to_events_query(&QueryParams {
            search: None,
            start_date: None,
            end_date: None,
            recurrence: Some("fortnightly".to_string()),
        });
        assert!(matches!(query, EventsQuery::Unmatchable));

        let events = execute(GetEventsUseCase { query }, &test.ctx)
            .await
            .unwrap();
        assert!(events.is_empty());
    }
}
