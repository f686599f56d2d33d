// src/handlers/catalog.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError, config::AppState, handlers::TenantQuery,
    models::catalog::QuestionCatalog,
};

// GET /question-catalog?tenant=acme
#[utoipa::path(
    get,
    path = "/question-catalog",
    tag = "Catálogo",
    params(
        ("tenant" = String, Query, description = "Schema do tenant")
    ),
    responses(
        (status = 200, description = "Perguntas básicas na ordem do cadastro", body = QuestionCatalog),
        (status = 400, description = "Tenant inválido")
    )
)]
pub async fn get_question_catalog(
    State(app_state): State<AppState>,
    Query(query): Query<TenantQuery>,
) -> Result<impl IntoResponse, AppError> {

    let tenant = app_state.tenants.resolve(&query.tenant)?;

    let catalog = app_state.catalog_service.build_catalog(&tenant).await?;

    Ok((StatusCode::OK, Json(catalog)))
}
