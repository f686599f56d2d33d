// src/handlers/conversation.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{error::AppError, normalize::scalar_to_string},
    config::AppState,
    models::chat_stage::{ConversationTurn, Interaction},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ConversationTurnPayload {
    #[validate(required(message = "required"))]
    #[schema(example = 10)]
    pub chat_stage_id: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "acme")]
    pub tenant_name: String,

    #[serde(default)]
    #[schema(example = "ana@email.com")]
    pub candidate_message: String,

    #[serde(default)]
    #[schema(example = "Qual é o seu e-mail?")]
    pub system_message: String,

    // Número ou string, conforme o contexto foi montado
    #[serde(default)]
    #[schema(value_type = Option<Object>, example = 2)]
    pub question_id: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Option<String>, example = "answer")]
    pub interaction: Option<Interaction>,

    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "in_progress")]
    pub status: String,
}

// POST /conversation-turns
#[utoipa::path(
    post,
    path = "/conversation-turns",
    tag = "Conversa",
    request_body = ConversationTurnPayload,
    responses(
        (status = 200, description = "Turno registrado"),
        (status = 400, description = "Pergunta não encontrada no contexto ou dados inválidos"),
        (status = 404, description = "Chat stage não encontrado")
    )
)]
pub async fn record_turn(
    State(app_state): State<AppState>,
    Json(payload): Json<ConversationTurnPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    // O chat_stage fica em public, mas o nome do tenant é validado do mesmo jeito
    let tenant = app_state.tenants.resolve(&payload.tenant_name)?;

    let turn = ConversationTurn {
        chat_stage_id: payload.chat_stage_id.unwrap_or_default(),
        tenant_name: tenant.as_str().to_string(),
        candidate_message: payload.candidate_message,
        system_message: payload.system_message,
        interaction: payload.interaction.unwrap_or(Interaction::Other),
        question_id: payload.question_id.as_ref().and_then(scalar_to_string),
        status: payload.status,
    };

    app_state.conversation_service.record_turn(turn).await?;

    Ok((StatusCode::OK, Json(json!({ "status": "OK" }))))
}
