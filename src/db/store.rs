// src/db/store.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    common::{db_utils::TenantSchema, error::AppError},
    db::{AnswerRepository, CandidateRepository, CatalogRepository, ChatStageRepository},
    models::{
        application::{NewCandidate, NewPhoneContact, NewRecruitmentProcess},
        catalog::{JobPosting, RegistrationField, SourceOption},
        chat_stage::{ChatStageRow, ChatStageUpdate},
    },
};

// =========================================================================
//  CONTRATO DE ARMAZENAMENTO
// =========================================================================

/// Ponto de injeção do armazenamento. Os serviços recebem um
/// `Arc<dyn IntakeStore>` montado no `AppState`.
#[async_trait]
pub trait IntakeStore: Send + Sync {
    /// Abre uma transação. Se o `Box` for descartado sem `commit`, tudo é desfeito.
    async fn begin(&self) -> Result<Box<dyn IntakeTransaction>, AppError>;

    async fn list_registration_fields(
        &self,
        tenant: &TenantSchema,
    ) -> Result<Vec<RegistrationField>, AppError>;

    async fn list_source_options(&self, tenant: &TenantSchema)
        -> Result<Vec<SourceOption>, AppError>;

    async fn find_job_posting(
        &self,
        tenant: &TenantSchema,
        job_code: &str,
    ) -> Result<Option<JobPosting>, AppError>;
}

/// Escritas que precisam acontecer juntas (ou não acontecer).
#[async_trait]
pub trait IntakeTransaction: Send {
    async fn insert_candidate(
        &mut self,
        tenant: &TenantSchema,
        candidate: &NewCandidate,
    ) -> Result<Option<i64>, AppError>;

    async fn insert_phone_contact(
        &mut self,
        tenant: &TenantSchema,
        contact: &NewPhoneContact,
    ) -> Result<Option<i64>, AppError>;

    async fn insert_recruitment_process(
        &mut self,
        tenant: &TenantSchema,
        process: &NewRecruitmentProcess,
    ) -> Result<Option<i64>, AppError>;

    async fn insert_answer_text(
        &mut self,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_id: i64,
        text: &str,
    ) -> Result<(), AppError>;

    async fn insert_answer_alternative(
        &mut self,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_alternative_id: i64,
    ) -> Result<(), AppError>;

    /// Lê e trava a linha do chat até o commit/rollback.
    async fn lock_chat_stage(
        &mut self,
        tenant_name: &str,
        chat_stage_id: i64,
    ) -> Result<Option<ChatStageRow>, AppError>;

    async fn update_chat_stage(&mut self, update: &ChatStageUpdate) -> Result<(), AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}

// =========================================================================
//  IMPLEMENTAÇÃO POSTGRES
// =========================================================================

#[derive(Clone)]
pub struct PgIntakeStore {
    pool: PgPool,
    candidate_repo: CandidateRepository,
    answer_repo: AnswerRepository,
    chat_stage_repo: ChatStageRepository,
    catalog_repo: CatalogRepository,
}

impl PgIntakeStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            candidate_repo: CandidateRepository::new(),
            answer_repo: AnswerRepository::new(),
            chat_stage_repo: ChatStageRepository::new(),
            catalog_repo: CatalogRepository::new(),
        }
    }
}

#[async_trait]
impl IntakeStore for PgIntakeStore {
    async fn begin(&self) -> Result<Box<dyn IntakeTransaction>, AppError> {
        let tx = self.pool.begin().await?;

        Ok(Box::new(PgIntakeTransaction {
            tx,
            candidate_repo: self.candidate_repo.clone(),
            answer_repo: self.answer_repo.clone(),
            chat_stage_repo: self.chat_stage_repo.clone(),
        }))
    }

    async fn list_registration_fields(
        &self,
        tenant: &TenantSchema,
    ) -> Result<Vec<RegistrationField>, AppError> {
        // Leitura simples: não precisa de transação, vai direto na pool
        self.catalog_repo.list_registration_fields(&self.pool, tenant).await
    }

    async fn list_source_options(
        &self,
        tenant: &TenantSchema,
    ) -> Result<Vec<SourceOption>, AppError> {
        self.catalog_repo.list_source_options(&self.pool, tenant).await
    }

    async fn find_job_posting(
        &self,
        tenant: &TenantSchema,
        job_code: &str,
    ) -> Result<Option<JobPosting>, AppError> {
        self.catalog_repo.find_job_posting(&self.pool, tenant, job_code).await
    }
}

pub struct PgIntakeTransaction {
    tx: Transaction<'static, Postgres>,
    candidate_repo: CandidateRepository,
    answer_repo: AnswerRepository,
    chat_stage_repo: ChatStageRepository,
}

#[async_trait]
impl IntakeTransaction for PgIntakeTransaction {
    async fn insert_candidate(
        &mut self,
        tenant: &TenantSchema,
        candidate: &NewCandidate,
    ) -> Result<Option<i64>, AppError> {
        self.candidate_repo
            .insert_candidate(&mut *self.tx, tenant, candidate)
            .await
    }

    async fn insert_phone_contact(
        &mut self,
        tenant: &TenantSchema,
        contact: &NewPhoneContact,
    ) -> Result<Option<i64>, AppError> {
        self.candidate_repo
            .insert_phone_contact(&mut *self.tx, tenant, contact)
            .await
    }

    async fn insert_recruitment_process(
        &mut self,
        tenant: &TenantSchema,
        process: &NewRecruitmentProcess,
    ) -> Result<Option<i64>, AppError> {
        self.candidate_repo
            .insert_recruitment_process(&mut *self.tx, tenant, process)
            .await
    }

    async fn insert_answer_text(
        &mut self,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_id: i64,
        text: &str,
    ) -> Result<(), AppError> {
        self.answer_repo
            .insert_text(&mut *self.tx, tenant, recruitment_process_id, question_id, text)
            .await
    }

    async fn insert_answer_alternative(
        &mut self,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_alternative_id: i64,
    ) -> Result<(), AppError> {
        self.answer_repo
            .insert_alternative(&mut *self.tx, tenant, recruitment_process_id, question_alternative_id)
            .await
    }

    async fn lock_chat_stage(
        &mut self,
        tenant_name: &str,
        chat_stage_id: i64,
    ) -> Result<Option<ChatStageRow>, AppError> {
        self.chat_stage_repo
            .find_for_update(&mut *self.tx, tenant_name, chat_stage_id)
            .await
    }

    async fn update_chat_stage(&mut self, update: &ChatStageUpdate) -> Result<(), AppError> {
        self.chat_stage_repo.update(&mut *self.tx, update).await
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}
