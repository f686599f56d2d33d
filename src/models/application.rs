// src/models/application.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::question::Question;

// Valores fixos de toda inscrição automática
pub const INITIAL_STATUS: &str = "em_andamento";
pub const SUBSCRIPTION_TYPE: &str = "automático";
pub const INITIAL_STAGE_ID: i64 = 1;
pub const INITIAL_STAGE_TYPE: &str = "inscrito";
pub const PHONE_TYPE: &str = "mobile";

// --- ESCRITAS (o que vai para o banco) ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    // Apenas dígitos
    pub cpf: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoneContact {
    pub candidate_id: i64,
    pub country_code: String,
    pub number: String,
    pub contact_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecruitmentProcess {
    pub candidate_id: i64,
    pub job_posting_id: i64,
    pub status: String,
    pub subscription_type: String,
    pub stage_id: i64,
    pub stage_type: String,
}

impl NewRecruitmentProcess {
    /// Processo recém-criado: sempre "inscrito" na primeira etapa.
    pub fn initial(candidate_id: i64, job_posting_id: i64) -> Self {
        Self {
            candidate_id,
            job_posting_id,
            status: INITIAL_STATUS.to_string(),
            subscription_type: SUBSCRIPTION_TYPE.to_string(),
            stage_id: INITIAL_STAGE_ID,
            stage_type: INITIAL_STAGE_TYPE.to_string(),
        }
    }
}

// --- ENTRADA DO SERVIÇO ---

/// Inscrição já validada, pronta para o registrador.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub document: String,
    pub phone: String,
    pub job_posting_id: i64,
    pub questions: Vec<Question>,
}

// --- RESULTADOS ---

/// Resposta classificada: linha em `answer_text` ou em `answer_alternative`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedAnswer {
    Text(String),
    // Identificador da alternativa escolhida
    Alternative(String),
}

impl ClassifiedAnswer {
    pub fn answer_type(&self) -> &'static str {
        match self {
            ClassifiedAnswer::Text(_) => "text",
            ClassifiedAnswer::Alternative(_) => "option",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ClassifiedAnswer::Text(v) | ClassifiedAnswer::Alternative(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PersistedAnswer {
    #[schema(example = "1")]
    pub question_id: Option<String>,
    #[schema(example = "text")]
    pub answer_type: String,
    #[schema(example = "Ana Souza")]
    pub value: String,
}

impl PersistedAnswer {
    pub fn new(question_id: Option<String>, answer: &ClassifiedAnswer) -> Self {
        Self {
            question_id,
            answer_type: answer.answer_type().to_string(),
            value: answer.value().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SkippedAnswer {
    #[schema(example = "3")]
    pub question_id: Option<String>,
    #[schema(example = "nenhuma opção corresponde à resposta 'Talvez'")]
    pub reason: String,
}

/// Resultado do persistidor de respostas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PersistenceReport {
    pub text_rows: usize,
    pub alternative_rows: usize,
    pub persisted: Vec<PersistedAnswer>,
    pub skipped: Vec<SkippedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmissionSummary {
    #[schema(example = 42)]
    pub candidate_id: i64,
    #[schema(example = 42)]
    pub phone_contact_id: i64,
    #[schema(example = 108)]
    pub recruitment_process_id: i64,
    pub text_answers: usize,
    pub alternative_answers: usize,
    pub persisted_answers: Vec<PersistedAnswer>,
    pub skipped_answers: Vec<SkippedAnswer>,
}
