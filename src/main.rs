//src/main.rs

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração ou o banco falharem, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    let app = app(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = TcpListener::bind(&settings.bind_address).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Todas as rotas da API, sem a documentação
fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Json(json!({ "message": "Olá!" })) }))
        .route("/api/health", get(|| async { "OK" }))
        .route("/applications", post(handlers::applications::submit_application))
        // Caminho antigo do webhook
        .route("/add_application", post(handlers::applications::submit_application))
        .route("/job-postings/{job_code}", get(handlers::applications::get_job_posting))
        .route("/conversation-turns", post(handlers::conversation::record_turn))
        .route("/question-catalog", get(handlers::catalog::get_question_catalog))
        .with_state(app_state)
}
