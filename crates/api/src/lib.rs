mod error;
mod event;
mod job_schedulers;
mod shared;
mod status;
#[cfg(test)]
mod test_helpers;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use agenda_scheduler_infra::AgendaContext;
pub use error::ApiError;
pub use job_schedulers::{ReminderScheduler, SchedulerStatus};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    scheduler: Arc<ReminderScheduler>,
}

impl Application {
    pub async fn new(context: AgendaContext) -> Result<Self, std::io::Error> {
        let scheduler = Arc::new(ReminderScheduler::new(context.clone()));
        let (server, port) = Application::configure_server(context, scheduler.clone()).await?;
        scheduler.start();

        Ok(Self {
            server,
            port,
            scheduler,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheduler(&self) -> Arc<ReminderScheduler> {
        self.scheduler.clone()
    }

    async fn configure_server(
        context: AgendaContext,
        scheduler: Arc<ReminderScheduler>,
    ) -> Result<(Server, u16), std::io::Error> {
        let address = format!("0.0.0.0:{}", context.config.port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();
            let scheduler = scheduler.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(web::Data::new(scheduler))
                .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                    ApiError::BadClientData(err.to_string()).into()
                }))
                .configure(configure_server_api)
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
