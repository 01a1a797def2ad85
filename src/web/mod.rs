//! Web surface: a single form page plus a health endpoint.

pub mod handlers;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::adapters::GeminiClient;
use crate::config::AppConfig;
use crate::core::organizer::ItineraryService;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use handlers::{health_check, index, organize, AppState};
use page::PageRenderer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/organize", post(organize))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 以設定建立 Gemini 客戶端與頁面渲染器
pub fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    let client = GeminiClient::from_config(config)?;
    let service = ItineraryService::new(Arc::new(client), config.model());
    let pages = PageRenderer::new()?;
    Ok(Arc::new(AppState { service, pages }))
}

pub async fn serve(config: &AppConfig) -> Result<()> {
    let app = router(build_state(config)?);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 Itinerary organizer listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
