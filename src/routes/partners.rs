use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::core::PartnerMatcher;
use crate::error::MatchError;
use crate::models::{ErrorResponse, HealthResponse, ListPartnersRequest, MatchPartnersRequest};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: PartnerMatcher,
}

/// Configure all partner-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(health_check))
        .route("/health", web::get().to(health_check))
        .route("/partners", web::get().to(list_partners))
        .route("/partners/{id}", web::get().to(get_partner))
        .route("/query", web::get().to(match_partners))
        .route("/query/{tail:.*}", web::get().to(match_partners));
}

/// Map a matcher error to its JSON response
pub fn error_response(err: &MatchError) -> HttpResponse {
    let status = match err {
        MatchError::MalformedLocation(_) | MatchError::MalformedId(_) | MatchError::InvalidMaterial(_) => {
            StatusCode::BAD_REQUEST
        }
        MatchError::NotFound(_) => StatusCode::NOT_FOUND,
        MatchError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::info!("Request rejected: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: err.kind().to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.matcher.registry_healthy().await;

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Single partner endpoint
///
/// GET /partners/{id}
async fn get_partner(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.matcher.lookup_partner(&id).await {
        Ok(partner) => HttpResponse::Ok().json(partner),
        Err(e) => error_response(&e),
    }
}

/// Partner listing endpoint
///
/// GET /partners?material=carpet,wood
async fn list_partners(state: web::Data<AppState>, query: web::Query<ListPartnersRequest>) -> impl Responder {
    match state.matcher.list_partners(&query.material).await {
        Ok(partners) => HttpResponse::Ok().json(partners),
        Err(e) => error_response(&e),
    }
}

/// Proximity match endpoint
///
/// GET /query?address=40.076763,113.30013&material=carpet,wood&phone=01604323444&sqm=65.22
async fn match_partners(state: web::Data<AppState>, query: web::Query<MatchPartnersRequest>) -> impl Responder {
    let request = query.into_inner();

    tracing::info!("Matching partners for address {:?}, material {:?}", request.address, request.material);

    match state
        .matcher
        .match_partners(&request.address, &request.material, &request.phone, &request.sqm)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}
