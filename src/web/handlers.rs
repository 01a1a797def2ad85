//! Request handlers for the organizer page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    Form,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::input::ItineraryForm;
use crate::core::organizer::ItineraryService;
use crate::web::page::{PageRenderer, PageView};

/// Shared state of the web server
pub struct AppState {
    pub service: ItineraryService,
    pub pages: PageRenderer,
}

/// Health check endpoint
pub async fn health_check() -> Json<HashMap<String, String>> {
    let mut response = HashMap::new();
    response.insert("status".to_string(), "healthy".to_string());
    response.insert("service".to_string(), "itinerary-organizer".to_string());
    Json(response)
}

/// Render the empty form pre-filled with the sample itinerary
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let view = PageView::new(ItineraryForm::default(), state.service.model());
    render(&state, StatusCode::OK, &view)
}

/// Validate the submitted form, call the LLM once and render the outcome
pub async fn organize(State(state): State<Arc<AppState>>, Form(form): Form<ItineraryForm>) -> Response {
    tracing::debug!(
        "Received itinerary form: duration={:?}, {} chars",
        form.duration,
        form.raw_itinerary.chars().count()
    );

    let result = state.service.organize_form(&form).await;
    let view = PageView::new(form, state.service.model());

    match result {
        Ok(itinerary) => {
            tracing::info!("✅ Itinerary generated ({} chars)", itinerary.text.chars().count());
            render(&state, StatusCode::OK, &view.with_itinerary(itinerary.text))
        }
        Err(e) => {
            tracing::error!(
                "❌ Itinerary request failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            render(&state, status, &view.with_error(&e))
        }
    }
}

fn render(state: &AppState, status: StatusCode, view: &PageView) -> Response {
    match state.pages.render(view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.user_friendly_message()).into_response()
        }
    }
}
