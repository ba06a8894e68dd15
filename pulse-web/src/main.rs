//! HTTP entry point for the pulse health-check service.
//!
//! Exposes `POST /api/lookup` plus a liveness route, with permissive CORS
//! headers on every response. The probe logic lives in `pulse-core`; this
//! binary is a thin decode/validate/encode boundary around it.

mod error;
mod routes;

use actix_web::{middleware, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use error::AppError;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let bind = std::env::var("PULSE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    tracing::info!("Starting pulse on {bind}");

    run_server(&bind).await
}

async fn run_server(bind: &str) -> Result<(), AppError> {
    HttpServer::new(|| {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add((
                        "Access-Control-Allow-Methods",
                        "GET, POST, PUT, DELETE, OPTIONS",
                    ))
                    .add((
                        "Access-Control-Allow-Headers",
                        "Content-Type, Authorization",
                    )),
            )
            .configure(routes::routes)
            .default_service(web::route().to(routes::preflight))
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
