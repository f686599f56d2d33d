// src/services/conversation_service.rs

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::{
    common::{error::AppError, normalize::scalar_to_string},
    db::IntakeStore,
    models::chat_stage::{
        ChatStageUpdate, ConversationTurn, Interaction, TranscriptEntry, TurnOutcome,
        CANDIDATE_SPEAKER, SYSTEM_SPEAKER,
    },
};

#[derive(Clone)]
pub struct ConversationService {
    store: Arc<dyn IntakeStore>,
}

impl ConversationService {
    pub fn new(store: Arc<dyn IntakeStore>) -> Self {
        Self { store }
    }

    /// Registra um turno: anexa as duas mensagens ao histórico e, se for
    /// uma resposta, grava `user_answer` na pergunta correspondente do contexto.
    ///
    /// Leitura e escrita acontecem na mesma transação, com a linha travada,
    /// então turnos concorrentes no mesmo chat não se sobrescrevem.
    pub async fn record_turn(&self, turn: ConversationTurn) -> Result<TurnOutcome, AppError> {
        // Validação antes de tocar no banco
        let answered_question = match turn.interaction {
            Interaction::Answer => Some(turn.question_id.as_deref().ok_or_else(|| {
                AppError::InvalidRequest("question_id é obrigatório quando interaction = answer.".into())
            })?),
            Interaction::Other => None,
        };

        // 1. Transação + trava da linha
        let mut tx = self.store.begin().await?;

        let row = tx
            .lock_chat_stage(&turn.tenant_name, turn.chat_stage_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Chat stage {} não encontrado.", turn.chat_stage_id))
            })?;

        // 2. Decodifica o que estiver gravado (JSON ou string JSON)
        let conversation = decode_stored_json(row.conversation, Value::Array(Vec::new()))?;
        let context = decode_stored_json(row.context, Value::Object(Map::new()))?;

        // 3. Histórico: sistema primeiro, candidato depois, mesmo instante
        let conversation = append_exchange(
            conversation,
            &turn.system_message,
            &turn.candidate_message,
            Utc::now(),
        )?;
        let conversation_length = conversation.as_array().map_or(0, Vec::len);

        // 4. Resposta: atualiza exatamente uma pergunta do contexto
        let context = match answered_question {
            Some(question_id) => {
                let mut context = context;
                patch_question_answer(&mut context, question_id, &turn.candidate_message)?;
                Some(context)
            }
            None => None,
        };
        let context_updated = context.is_some();

        // 5. Grava e confirma
        tx.update_chat_stage(&ChatStageUpdate {
            id: turn.chat_stage_id,
            tenant_name: turn.tenant_name.clone(),
            conversation,
            context,
            status: turn.status.clone(),
        })
        .await?;

        tx.commit().await?;

        tracing::info!(
            chat_stage_id = turn.chat_stage_id,
            tenant = %turn.tenant_name,
            conversation_length,
            context_updated,
            "Turno registrado"
        );

        Ok(TurnOutcome {
            chat_stage_id: turn.chat_stage_id,
            conversation_length,
            context_updated,
        })
    }
}

// =========================================================================
//  MERGE (funções puras)
// =========================================================================

/// Aceita o campo já estruturado ou como string JSON. Nulo ou string vazia
/// viram `fallback`.
pub fn decode_stored_json(raw: Option<Value>, fallback: Value) -> Result<Value, AppError> {
    match raw {
        None | Some(Value::Null) => Ok(fallback),
        Some(Value::String(encoded)) => {
            if encoded.trim().is_empty() {
                return Ok(fallback);
            }
            match serde_json::from_str::<Value>(&encoded)? {
                Value::Null => Ok(fallback),
                decoded => Ok(decoded),
            }
        }
        Some(structured) => Ok(structured),
    }
}

/// Timestamp UTC, ISO-8601 com sufixo `Z`
pub fn transcript_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Anexa (sistema, candidato) ao final do histórico. Nunca reordena nem remove.
pub fn append_exchange(
    conversation: Value,
    system_message: &str,
    candidate_message: &str,
    at: DateTime<Utc>,
) -> Result<Value, AppError> {
    let mut entries = match conversation {
        Value::Array(entries) => entries,
        other => {
            return Err(AppError::PersistenceError(format!(
                "conversation armazenada não é uma lista: {}",
                other
            )))
        }
    };

    let date = transcript_timestamp(at);
    for (from, message) in [(SYSTEM_SPEAKER, system_message), (CANDIDATE_SPEAKER, candidate_message)] {
        entries.push(serde_json::to_value(TranscriptEntry {
            date: date.clone(),
            from: from.to_string(),
            message: message.to_string(),
        })?);
    }

    Ok(Value::Array(entries))
}

/// Grava `answer` em `context.steps.questions[i].user_answer` para a pergunta
/// cujo `id` é `question_id`. As demais perguntas não são tocadas.
pub fn patch_question_answer(
    context: &mut Value,
    question_id: &str,
    answer: &str,
) -> Result<(), AppError> {
    let wanted = question_id.trim();

    let question = context
        .pointer_mut("/steps/questions")
        .and_then(Value::as_array_mut)
        .and_then(|questions| {
            questions.iter_mut().find(|q| {
                q.get("id")
                    .and_then(scalar_to_string)
                    .is_some_and(|id| id.trim() == wanted)
            })
        })
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            AppError::InvalidRequest(format!(
                "Pergunta '{}' não encontrada no contexto.",
                question_id
            ))
        })?;

    question.insert("user_answer".to_string(), Value::String(answer.to_string()));
    Ok(())
}
