// src/handlers/applications.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::TenantQuery,
    models::{
        application::{NewApplication, SubmissionSummary},
        catalog::JobPosting,
        question::Question,
    },
};

// =============================================================================
//  INSCRIÇÃO (webhook do fluxo conversacional)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitApplicationPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana Souza")]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "+5511988887777")]
    pub phone: String,

    #[serde(default)]
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "ana@email.com")]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "111.222.333-44")]
    pub document: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "acme")]
    pub tenant_name: String,

    #[validate(required(message = "required"))]
    #[schema(example = 7)]
    pub job_posting_id: Option<i64>,

    #[serde(default)]
    pub questions: Vec<Question>,
}

// POST /applications
#[utoipa::path(
    post,
    path = "/applications",
    tag = "Inscrições",
    request_body = SubmitApplicationPayload,
    responses(
        (status = 201, description = "Candidato, telefone, processo e respostas gravados", body = SubmissionSummary),
        (status = 400, description = "Campos obrigatórios ausentes ou tenant inválido"),
        (status = 500, description = "Falha de persistência (nada foi gravado)")
    )
)]
pub async fn submit_application(
    State(app_state): State<AppState>,
    Json(payload): Json<SubmitApplicationPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let tenant = app_state.tenants.resolve(&payload.tenant_name)?;

    let application = NewApplication {
        name: payload.name,
        email: payload.email,
        document: payload.document,
        phone: payload.phone,
        // `validate` já garantiu a presença
        job_posting_id: payload.job_posting_id.unwrap_or_default(),
        questions: payload.questions,
    };

    let summary = app_state
        .application_service
        .submit_application(&tenant, application)
        .await?;

    Ok((StatusCode::CREATED, Json(summary)))
}

// GET /job-postings/{job_code}?tenant=acme
#[utoipa::path(
    get,
    path = "/job-postings/{job_code}",
    tag = "Inscrições",
    params(
        ("job_code" = String, Path, description = "Código público da vaga"),
        ("tenant" = String, Query, description = "Schema do tenant")
    ),
    responses(
        (status = 200, description = "Vaga encontrada", body = JobPosting),
        (status = 404, description = "Vaga inexistente")
    )
)]
pub async fn get_job_posting(
    State(app_state): State<AppState>,
    Path(job_code): Path<String>,
    Query(query): Query<TenantQuery>,
) -> Result<impl IntoResponse, AppError> {

    let tenant = app_state.tenants.resolve(&query.tenant)?;

    let job = app_state
        .application_service
        .find_job_posting(&tenant, &job_code)
        .await?;

    Ok((StatusCode::OK, Json(job)))
}
