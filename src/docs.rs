// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Inscrições ---
        handlers::applications::submit_application,
        handlers::applications::get_job_posting,

        // --- Conversa ---
        handlers::conversation::record_turn,

        // --- Catálogo ---
        handlers::catalog::get_question_catalog,
    ),
    components(
        schemas(
            // --- Payloads ---
            handlers::applications::SubmitApplicationPayload,
            handlers::conversation::ConversationTurnPayload,

            // --- Perguntas ---
            models::question::Question,
            models::question::AnswerOption,

            // --- Inscrição ---
            models::application::SubmissionSummary,
            models::application::PersistedAnswer,
            models::application::SkippedAnswer,

            // --- Conversa ---
            models::chat_stage::TranscriptEntry,

            // --- Catálogo ---
            models::catalog::QuestionCatalog,
            models::catalog::JobPosting,
        )
    ),
    tags(
        (name = "Inscrições", description = "Webhook de inscrição de candidatos"),
        (name = "Conversa", description = "Histórico e contexto do chat de triagem"),
        (name = "Catálogo", description = "Perguntas básicas por tenant"),
    )
)]
pub struct ApiDoc;
