//! Route registration.

mod lookup;

use actix_web::http::Method;
use actix_web::{get, web, HttpRequest, HttpResponse};

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(lookup::json_config())
        .service(lookup::lookup)
        .service(healthz);
}

/// Liveness route; the status code is the whole answer.
#[get("/healthz")]
async fn healthz() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Answer CORS preflight for any path; everything else is a 404.
pub async fn preflight(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        HttpResponse::Ok().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}
