#[cfg(feature = "ssr")]
use actix_web::{web, HttpResponse};
#[cfg(feature = "ssr")]
use crate::completion::CompletionService;
#[cfg(feature = "ssr")]
use crate::db::ReviewStore;
#[cfg(feature = "ssr")]
use crate::handler::analyze_review;
#[cfg(feature = "ssr")]
use crate::models::review::{AnalysisResponse, ErrorResponse};
#[cfg(feature = "ssr")]
use leptos::logging::{error, log};
#[cfg(feature = "ssr")]
use serde_json::Value;
#[cfg(feature = "ssr")]
use std::sync::Arc;

/// Collaborators shared by every worker, created once at startup.
#[cfg(feature = "ssr")]
pub struct AppState {
    pub completion: Arc<dyn CompletionService>,
    pub store: Arc<dyn ReviewStore>,
}

#[cfg(feature = "ssr")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/analyze", web::post().to(analyze));
}

#[cfg(feature = "ssr")]
fn error_response(status: actix_web::http::StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: message.to_string(),
    })
}

#[cfg(feature = "ssr")]
pub async fn analyze(
    state: web::Data<AppState>,
    body: Result<web::Bytes, actix_web::Error>,
) -> HttpResponse {
    // Oversized or interrupted bodies still get the JSON error envelope.
    let body = match body {
        Ok(body) => body,
        Err(err) => {
            error!("[API] Failed to read request body: {}", err);
            return error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            );
        }
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            error!("[API] Unreadable request body: {}", err);
            return error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            );
        }
    };

    match analyze_review(
        payload.get("review"),
        state.completion.as_ref(),
        state.store.as_ref(),
    )
    .await
    {
        Ok(record) => {
            log!("[API] Stored review {} as {}", record.id, record.sentiment);
            HttpResponse::Ok().json(AnalysisResponse::from(&record))
        }
        Err(err) => {
            error!("[API] Analysis failed: {}", err);
            error_response(err.status(), err.public_message())
        }
    }
}
