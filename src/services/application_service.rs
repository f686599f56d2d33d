// src/services/application_service.rs

use std::sync::Arc;

use crate::{
    common::{
        db_utils::TenantSchema,
        error::AppError,
        normalize::{digits_only, normalize_phone, scalar_to_string, DocumentKind},
    },
    db::{IntakeStore, IntakeTransaction},
    models::{
        application::{
            ClassifiedAnswer, NewApplication, NewCandidate, NewPhoneContact,
            NewRecruitmentProcess, PersistedAnswer, PersistenceReport, SkippedAnswer,
            SubmissionSummary, PHONE_TYPE,
        },
        catalog::JobPosting,
        question::Question,
    },
    services::answer_classifier::{classify, numeric_id, ClassificationWarning},
};

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn IntakeStore>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn IntakeStore>) -> Self {
        Self { store }
    }

    /// LÓGICA DE NEGÓCIO: registra candidato, telefone e processo seletivo
    /// e grava as respostas, tudo numa única transação. Qualquer erro de
    /// escrita desfaz a cadeia inteira (o `tx` é descartado sem commit).
    pub async fn submit_application(
        &self,
        tenant: &TenantSchema,
        application: NewApplication,
    ) -> Result<SubmissionSummary, AppError> {
        // 0. Validações que não dependem do banco, antes de qualquer escrita
        let cpf = digits_only(&application.document);
        if cpf.is_empty() {
            return Err(AppError::InvalidRequest(
                "O documento precisa conter ao menos um dígito.".into(),
            ));
        }
        if normalize_phone(&application.phone).number.is_empty() {
            return Err(AppError::InvalidRequest("O telefone informado é inválido.".into()));
        }
        if DocumentKind::from_digits(&cpf) == DocumentKind::Unknown {
            tracing::warn!(tenant = %tenant, digits = cpf.len(), "Documento fora do tamanho de CPF/CNPJ");
        }

        // 1. Inicia a transação
        let mut tx = self.store.begin().await?;

        // 2. Candidato -> Telefone -> Processo (cada passo precisa do id anterior)
        let candidate_id = register_candidate(
            &mut *tx,
            tenant,
            &application.name,
            &application.email,
            &application.document,
        )
        .await?;

        let phone_contact_id =
            register_phone(&mut *tx, tenant, candidate_id, &application.phone).await?;

        let recruitment_process_id = register_application(
            &mut *tx,
            tenant,
            candidate_id,
            application.job_posting_id,
        )
        .await?;

        // 3. Respostas, na mesma transação
        let report =
            persist_answers(&mut *tx, tenant, recruitment_process_id, &application.questions)
                .await?;

        // 4. Commit
        tx.commit().await?;

        tracing::info!(
            tenant = %tenant,
            candidate_id,
            recruitment_process_id,
            text_rows = report.text_rows,
            alternative_rows = report.alternative_rows,
            skipped = report.skipped.len(),
            "Inscrição registrada"
        );

        Ok(SubmissionSummary {
            candidate_id,
            phone_contact_id,
            recruitment_process_id,
            text_answers: report.text_rows,
            alternative_answers: report.alternative_rows,
            persisted_answers: report.persisted,
            skipped_answers: report.skipped,
        })
    }

    /// Busca a vaga pelo código público (`job_code`).
    pub async fn find_job_posting(
        &self,
        tenant: &TenantSchema,
        job_code: &str,
    ) -> Result<JobPosting, AppError> {
        self.store
            .find_job_posting(tenant, job_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vaga '{}' não encontrada.", job_code)))
    }
}

// =========================================================================
//  REGISTRADOR DE CANDIDATOS
// =========================================================================

pub async fn register_candidate(
    tx: &mut dyn IntakeTransaction,
    tenant: &TenantSchema,
    name: &str,
    email: &str,
    document: &str,
) -> Result<i64, AppError> {
    let candidate = NewCandidate {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        cpf: digits_only(document),
    };

    tx.insert_candidate(tenant, &candidate)
        .await?
        .ok_or_else(|| missing_returning_id("candidate"))
}

pub async fn register_phone(
    tx: &mut dyn IntakeTransaction,
    tenant: &TenantSchema,
    candidate_id: i64,
    raw_phone: &str,
) -> Result<i64, AppError> {
    let phone = normalize_phone(raw_phone);

    let contact = NewPhoneContact {
        candidate_id,
        country_code: phone.country_code,
        number: phone.number,
        contact_type: PHONE_TYPE.to_string(),
    };

    tx.insert_phone_contact(tenant, &contact)
        .await?
        .ok_or_else(|| missing_returning_id("candidate_phone_contact"))
}

pub async fn register_application(
    tx: &mut dyn IntakeTransaction,
    tenant: &TenantSchema,
    candidate_id: i64,
    job_posting_id: i64,
) -> Result<i64, AppError> {
    let process = NewRecruitmentProcess::initial(candidate_id, job_posting_id);

    tx.insert_recruitment_process(tenant, &process)
        .await?
        .ok_or_else(|| missing_returning_id("recruitment_process"))
}

fn missing_returning_id(table: &str) -> AppError {
    AppError::PersistenceError(format!("INSERT em {} não retornou id", table))
}

// =========================================================================
//  PERSISTIDOR DE RESPOSTAS
// =========================================================================

/// Grava uma linha por resposta. Avisos de classificação não interrompem
/// o lote: a pergunta é pulada e o motivo vai para `skipped`.
/// Erros de banco, ao contrário, sobem e abortam a transação.
pub async fn persist_answers(
    tx: &mut dyn IntakeTransaction,
    tenant: &TenantSchema,
    recruitment_process_id: i64,
    questions: &[Question],
) -> Result<PersistenceReport, AppError> {
    let mut report = PersistenceReport::default();

    for question in questions {
        let question_id = question.id.as_ref().and_then(scalar_to_string);

        let (target_id, answer) = match prepare(question, question_id.as_deref()) {
            Ok(prepared) => prepared,
            Err(warning) => {
                tracing::warn!(
                    tenant = %tenant,
                    recruitment_process_id,
                    question_id = ?question_id,
                    "Resposta ignorada: {}",
                    warning
                );
                report.skipped.push(SkippedAnswer {
                    question_id,
                    reason: warning.to_string(),
                });
                continue;
            }
        };

        match &answer {
            ClassifiedAnswer::Text(text) => {
                tx.insert_answer_text(tenant, recruitment_process_id, target_id, text).await?;
                report.text_rows += 1;
            }
            ClassifiedAnswer::Alternative(_) => {
                tx.insert_answer_alternative(tenant, recruitment_process_id, target_id)
                    .await?;
                report.alternative_rows += 1;
            }
        }

        report.persisted.push(PersistedAnswer::new(question_id, &answer));
    }

    Ok(report)
}

// Classifica e resolve o id inteiro da linha: a pergunta para texto,
// a alternativa para múltipla escolha.
fn prepare(
    question: &Question,
    question_id: Option<&str>,
) -> Result<(i64, ClassifiedAnswer), ClassificationWarning> {
    let answer = classify(question)?;

    match &answer {
        ClassifiedAnswer::Text(_) => {
            let id = question_id.ok_or(ClassificationWarning::MissingQuestionId)?;
            Ok((numeric_id(id)?, answer))
        }
        ClassifiedAnswer::Alternative(option_id) => {
            let id = numeric_id(option_id)?;
            Ok((id, answer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::{Faults, MemoryStore};
    use crate::models::application::{
        INITIAL_STAGE_ID, INITIAL_STAGE_TYPE, INITIAL_STATUS, SUBSCRIPTION_TYPE,
    };
    use serde_json::json;

    fn tenant() -> TenantSchema {
        TenantSchema::parse("acme").expect("valid tenant")
    }

    fn questions(value: serde_json::Value) -> Vec<Question> {
        serde_json::from_value(value).expect("valid questions")
    }

    fn application(questions: Vec<Question>) -> NewApplication {
        NewApplication {
            name: "Ana".into(),
            email: "a@x.com".into(),
            document: "111.222.333-44".into(),
            phone: "+5511988887777".into(),
            job_posting_id: 7,
            questions,
        }
    }

    #[tokio::test]
    async fn end_to_end_submission_chains_all_rows() {
        let store = MemoryStore::new();
        let service = ApplicationService::new(Arc::new(store.clone()));

        let summary = service
            .submit_application(
                &tenant(),
                application(questions(json!([
                    { "id": 1, "answer_type": "text", "user_answer": "hi" }
                ]))),
            )
            .await
            .expect("submission succeeds");

        let state = store.snapshot().await;

        let (candidate_id, candidate_tenant, candidate) = &state.candidates[0];
        assert_eq!(*candidate_id, summary.candidate_id);
        assert_eq!(candidate_tenant, "acme");
        assert_eq!(candidate.cpf, "11122233344");

        let (phone_id, phone) = &state.phone_contacts[0];
        assert_eq!(*phone_id, summary.phone_contact_id);
        assert_eq!(phone.candidate_id, summary.candidate_id);
        assert_eq!(phone.country_code, "55");
        assert_eq!(phone.number, "11988887777");
        assert_eq!(phone.contact_type, "mobile");

        let (process_id, process) = &state.recruitment_processes[0];
        assert_eq!(*process_id, summary.recruitment_process_id);
        assert_eq!(process.candidate_id, summary.candidate_id);
        assert_eq!(process.job_posting_id, 7);
        assert_eq!(process.status, INITIAL_STATUS);
        assert_eq!(process.subscription_type, SUBSCRIPTION_TYPE);
        assert_eq!(process.stage_id, INITIAL_STAGE_ID);
        assert_eq!(process.stage_type, INITIAL_STAGE_TYPE);

        assert_eq!(state.answer_texts.len(), 1);
        assert_eq!(state.answer_texts[0].recruitment_process_id, summary.recruitment_process_id);
        assert_eq!(state.answer_texts[0].question_id, 1);
        assert_eq!(state.answer_texts[0].text, "hi");
        assert_eq!(summary.text_answers, 1);
        assert!(summary.skipped_answers.is_empty());
    }

    #[tokio::test]
    async fn mixed_batch_collects_warnings_and_keeps_going() {
        let store = MemoryStore::new();
        let service = ApplicationService::new(Arc::new(store.clone()));

        let summary = service
            .submit_application(
                &tenant(),
                application(questions(json!([
                    { "id": 1, "answer_type": "text", "user_answer": "hi" },
                    { "id": 2, "answer_type": "date", "user_answer": "2026-01-01" },
                    { "id": 3, "answer_type": "options", "user_answer": "Sim",
                      "answer_options": [{ "option": "Sim", "option_id": 31 }, { "option": "Não", "option_id": 32 }] },
                    { "id": 4, "answer_type": "options", "user_answer": "Talvez",
                      "answer_options": [{ "option": "Sim", "option_id": 41 }] },
                    { "answer_type": "text", "user_answer": "sem id" }
                ]))),
            )
            .await
            .expect("submission succeeds");

        assert_eq!(summary.text_answers, 1);
        assert_eq!(summary.alternative_answers, 1);
        assert_eq!(summary.skipped_answers.len(), 3);
        assert_eq!(summary.skipped_answers[0].question_id.as_deref(), Some("2"));
        assert_eq!(summary.skipped_answers[1].question_id.as_deref(), Some("4"));
        assert_eq!(summary.skipped_answers[2].question_id, None);

        let state = store.snapshot().await;
        assert_eq!(state.answer_alternatives.len(), 1);
        assert_eq!(state.answer_alternatives[0].question_alternative_id, 31);
        assert_eq!(
            summary.persisted_answers[1],
            PersistedAnswer {
                question_id: Some("3".into()),
                answer_type: "option".into(),
                value: "31".into()
            }
        );
    }

    #[tokio::test]
    async fn phone_failure_rolls_back_candidate() {
        let store = MemoryStore::with_faults(Faults { fail_phone_insert: true, ..Faults::default() });
        let service = ApplicationService::new(Arc::new(store.clone()));

        let result = service.submit_application(&tenant(), application(Vec::new())).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        let state = store.snapshot().await;
        assert!(state.candidates.is_empty());
        assert!(state.phone_contacts.is_empty());
    }

    #[tokio::test]
    async fn missing_returning_id_is_a_persistence_error() {
        let store = MemoryStore::with_faults(Faults { omit_process_id: true, ..Faults::default() });
        let service = ApplicationService::new(Arc::new(store.clone()));

        let result = service.submit_application(&tenant(), application(Vec::new())).await;

        assert!(matches!(result, Err(AppError::PersistenceError(_))));
        let state = store.snapshot().await;
        assert!(state.candidates.is_empty());
        assert!(state.recruitment_processes.is_empty());
    }

    #[tokio::test]
    async fn answer_write_failure_aborts_the_whole_submission() {
        let store = MemoryStore::with_faults(Faults { fail_answer_insert: true, ..Faults::default() });
        let service = ApplicationService::new(Arc::new(store.clone()));

        let result = service
            .submit_application(
                &tenant(),
                application(questions(json!([
                    { "id": 1, "answer_type": "text", "user_answer": "hi" }
                ]))),
            )
            .await;

        assert!(result.is_err());
        let state = store.snapshot().await;
        assert!(state.candidates.is_empty());
        assert!(state.recruitment_processes.is_empty());
    }

    #[tokio::test]
    async fn document_without_digits_is_rejected_before_writing() {
        let store = MemoryStore::new();
        let service = ApplicationService::new(Arc::new(store.clone()));
        let mut input = application(Vec::new());
        input.document = "não informado".into();

        let result = service.submit_application(&tenant(), input).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert!(store.snapshot().await.candidates.is_empty());
    }

    #[tokio::test]
    async fn job_posting_lookup_reports_not_found() {
        let store = MemoryStore::new();
        store
            .seed_job_posting(
                "acme",
                JobPosting { id: 7, job_code: "DEV-01".into(), title: "Dev".into() },
            )
            .await;
        let service = ApplicationService::new(Arc::new(store));

        let job = service.find_job_posting(&tenant(), "DEV-01").await.expect("found");
        assert_eq!(job.title, "Dev");

        let missing = service.find_job_posting(&tenant(), "NOPE").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
