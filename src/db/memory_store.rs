// src/db/memory_store.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    common::{db_utils::TenantSchema, error::AppError},
    db::{IntakeStore, IntakeTransaction},
    models::{
        application::{NewCandidate, NewPhoneContact, NewRecruitmentProcess},
        catalog::{JobPosting, RegistrationField, SourceOption},
        chat_stage::{ChatStageRow, ChatStageUpdate},
    },
};

// Armazenamento em memória para os testes dos serviços e das rotas.
// Cada transação trava o estado inteiro e trabalha numa cópia; o commit
// substitui o estado, o drop descarta a cópia (rollback).

#[derive(Debug, Clone, PartialEq)]
pub struct StoredChatStage {
    pub tenant_name: String,
    pub row: ChatStageRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAnswerText {
    pub tenant: String,
    pub recruitment_process_id: i64,
    pub question_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAnswerAlternative {
    pub tenant: String,
    pub recruitment_process_id: i64,
    pub question_alternative_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    next_id: i64,
    pub candidates: Vec<(i64, String, NewCandidate)>,
    pub phone_contacts: Vec<(i64, NewPhoneContact)>,
    pub recruitment_processes: Vec<(i64, NewRecruitmentProcess)>,
    pub answer_texts: Vec<StoredAnswerText>,
    pub answer_alternatives: Vec<StoredAnswerAlternative>,
    pub chat_stages: HashMap<i64, StoredChatStage>,
    pub registration_fields: HashMap<String, Vec<RegistrationField>>,
    pub source_options: HashMap<String, Vec<SourceOption>>,
    pub job_postings: HashMap<String, Vec<JobPosting>>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Falhas simuladas
#[derive(Debug, Clone, Copy, Default)]
pub struct Faults {
    pub fail_phone_insert: bool,
    pub omit_process_id: bool,
    pub fail_answer_insert: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    faults: Faults,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faults(faults: Faults) -> Self {
        Self { faults, ..Self::default() }
    }

    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }

    pub async fn seed_chat_stage(
        &self,
        id: i64,
        tenant_name: &str,
        conversation: Option<Value>,
        context: Option<Value>,
    ) {
        self.state.lock().await.chat_stages.insert(
            id,
            StoredChatStage {
                tenant_name: tenant_name.to_string(),
                row: ChatStageRow { id, conversation, context, status: Some("open".into()) },
            },
        );
    }

    pub async fn seed_catalog(
        &self,
        tenant: &str,
        fields: Vec<RegistrationField>,
        sources: Vec<SourceOption>,
    ) {
        let mut state = self.state.lock().await;
        state.registration_fields.insert(tenant.to_string(), fields);
        state.source_options.insert(tenant.to_string(), sources);
    }

    pub async fn seed_job_posting(&self, tenant: &str, job: JobPosting) {
        self.state
            .lock()
            .await
            .job_postings
            .entry(tenant.to_string())
            .or_default()
            .push(job);
    }
}

#[async_trait]
impl IntakeStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn IntakeTransaction>, AppError> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();

        Ok(Box::new(MemoryTransaction { guard, working, faults: self.faults }))
    }

    async fn list_registration_fields(
        &self,
        tenant: &TenantSchema,
    ) -> Result<Vec<RegistrationField>, AppError> {
        let state = self.state.lock().await;
        Ok(state.registration_fields.get(tenant.as_str()).cloned().unwrap_or_default())
    }

    async fn list_source_options(
        &self,
        tenant: &TenantSchema,
    ) -> Result<Vec<SourceOption>, AppError> {
        let state = self.state.lock().await;
        let mut options = state.source_options.get(tenant.as_str()).cloned().unwrap_or_default();
        options.sort_by_key(|o| (o.sequence, o.id));
        Ok(options)
    }

    async fn find_job_posting(
        &self,
        tenant: &TenantSchema,
        job_code: &str,
    ) -> Result<Option<JobPosting>, AppError> {
        let state = self.state.lock().await;
        Ok(state
            .job_postings
            .get(tenant.as_str())
            .and_then(|jobs| jobs.iter().find(|j| j.job_code == job_code).cloned()))
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    faults: Faults,
}

#[async_trait]
impl IntakeTransaction for MemoryTransaction {
    async fn insert_candidate(
        &mut self,
        tenant: &TenantSchema,
        candidate: &NewCandidate,
    ) -> Result<Option<i64>, AppError> {
        let id = self.working.next_id();
        self.working.candidates.push((id, tenant.to_string(), candidate.clone()));
        Ok(Some(id))
    }

    async fn insert_phone_contact(
        &mut self,
        _tenant: &TenantSchema,
        contact: &NewPhoneContact,
    ) -> Result<Option<i64>, AppError> {
        if self.faults.fail_phone_insert {
            return Err(AppError::DatabaseError(sqlx::Error::Protocol(
                "simulated phone insert failure".into(),
            )));
        }
        let id = self.working.next_id();
        self.working.phone_contacts.push((id, contact.clone()));
        Ok(Some(id))
    }

    async fn insert_recruitment_process(
        &mut self,
        _tenant: &TenantSchema,
        process: &NewRecruitmentProcess,
    ) -> Result<Option<i64>, AppError> {
        if self.faults.omit_process_id {
            return Ok(None);
        }
        let id = self.working.next_id();
        self.working.recruitment_processes.push((id, process.clone()));
        Ok(Some(id))
    }

    async fn insert_answer_text(
        &mut self,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_id: i64,
        text: &str,
    ) -> Result<(), AppError> {
        if self.faults.fail_answer_insert {
            return Err(AppError::DatabaseError(sqlx::Error::Protocol(
                "simulated answer insert failure".into(),
            )));
        }
        self.working.answer_texts.push(StoredAnswerText {
            tenant: tenant.to_string(),
            recruitment_process_id,
            question_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn insert_answer_alternative(
        &mut self,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_alternative_id: i64,
    ) -> Result<(), AppError> {
        self.working.answer_alternatives.push(StoredAnswerAlternative {
            tenant: tenant.to_string(),
            recruitment_process_id,
            question_alternative_id,
        });
        Ok(())
    }

    async fn lock_chat_stage(
        &mut self,
        tenant_name: &str,
        chat_stage_id: i64,
    ) -> Result<Option<ChatStageRow>, AppError> {
        Ok(self
            .working
            .chat_stages
            .get(&chat_stage_id)
            .filter(|stored| stored.tenant_name == tenant_name)
            .map(|stored| stored.row.clone()))
    }

    async fn update_chat_stage(&mut self, update: &ChatStageUpdate) -> Result<(), AppError> {
        let stored = self
            .working
            .chat_stages
            .get_mut(&update.id)
            .filter(|stored| stored.tenant_name == update.tenant_name)
            .ok_or_else(|| {
                AppError::PersistenceError(format!("chat_stage {} não foi atualizado", update.id))
            })?;

        stored.row.conversation = Some(update.conversation.clone());
        if let Some(context) = &update.context {
            stored.row.context = Some(context.clone());
        }
        stored.row.status = Some(update.status.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoryTransaction { mut guard, working, .. } = *self;
        *guard = working;
        Ok(())
    }
}
