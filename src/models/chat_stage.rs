// src/models/chat_stage.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

pub const SYSTEM_SPEAKER: &str = "system";
pub const CANDIDATE_SPEAKER: &str = "candidate";

/// Linha de `public.chat_stage` como lida do banco.
/// `conversation` e `context` podem estar gravados como JSON estruturado
/// ou como string JSON; quem decodifica é o serviço.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ChatStageRow {
    pub id: i64,
    pub conversation: Option<Value>,
    pub context: Option<Value>,
    pub status: Option<String>,
}

/// Entrada do histórico da conversa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranscriptEntry {
    #[schema(example = "2026-10-18T12:00:00.000Z")]
    pub date: String,
    #[schema(example = "candidate")]
    pub from: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    // O candidato respondeu a pergunta `question_id`
    Answer,
    #[serde(other)]
    Other,
}

/// Um turno da conversa, já com o tenant validado.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub chat_stage_id: i64,
    pub tenant_name: String,
    pub candidate_message: String,
    pub system_message: String,
    pub interaction: Interaction,
    pub question_id: Option<String>,
    pub status: String,
}

/// Escrita canônica após o merge. `context` só vai quando foi alterado.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatStageUpdate {
    pub id: i64,
    pub tenant_name: String,
    pub conversation: Value,
    pub context: Option<Value>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TurnOutcome {
    pub chat_stage_id: i64,
    pub conversation_length: usize,
    pub context_updated: bool,
}
